use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path as StdPath;
use tokio::fs;

use crate::{config::get_config, error::Result, AppState};

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}

fn allowed_extensions(file_type: &str) -> Option<&'static [&'static str]> {
    match file_type {
        "image" => Some(&["jpg", "jpeg", "png"]),
        "document" => Some(&["pdf"]),
        _ => None,
    }
}

fn subdirectory(file_type: &str) -> &'static str {
    if file_type == "image" {
        "images"
    } else {
        "documents"
    }
}

async fn save_upload(file_type: &str, filename: &str, data: &bytes::Bytes) -> Result<(String, String)> {
    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let allowed = allowed_extensions(file_type).ok_or_else(|| {
        crate::error::Error::BadRequest("File type must be 'image' or 'document'".into())
    })?;
    if !allowed.contains(&ext.as_str()) {
        return Err(crate::error::Error::BadRequest(format!(
            "File type .{} is not allowed for {} uploads",
            ext, file_type
        )));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(crate::error::Error::BadRequest(
            "Invalid PDF file content".into(),
        ));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(crate::error::Error::BadRequest(
            "Invalid JPEG file content".into(),
        ));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(crate::error::Error::BadRequest(
            "Invalid PNG file content".into(),
        ));
    }

    let subdir = subdirectory(file_type);
    let upload_dir = format!("{}/applications/{}", get_config().uploads_dir, subdir);
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| crate::error::Error::Internal(e.to_string()))?;

    let file_id = uuid::Uuid::new_v4();
    let safe_filename = format!("{}.{}", file_id, ext);
    let file_path = format!("{}/{}", upload_dir, safe_filename);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write uploaded file: {}", e);
        crate::error::Error::Internal(format!("Failed to save file: {}", e))
    })?;

    let url = format!("/uploads/applications/{}/{}", subdir, safe_filename);
    Ok((safe_filename, url))
}

/// Type-tagged multipart upload: `file` plus a `type` field of `image`
/// or `document`. Capped at 5 MB; the extension allowlist depends on
/// the tag. The caller attaches the returned URL to its record in a
/// follow-up write.
pub async fn upload_file(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut file_type = None;
    let mut filename = None;
    let mut data = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        crate::error::Error::BadRequest(e.to_string())
    })? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "type" => file_type = Some(field.text().await.unwrap_or_default()),
            "file" => {
                filename = Some(field.file_name().unwrap_or("upload.bin").to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read upload bytes: {}", e);
                    crate::error::Error::BadRequest("Failed to read file upload".into())
                })?;
                data = Some(bytes);
            }
            _ => {}
        }
    }

    let file_type = file_type
        .filter(|t| !t.is_empty())
        .ok_or_else(|| crate::error::Error::BadRequest("Upload type is required".into()))?;
    let filename = filename
        .ok_or_else(|| crate::error::Error::BadRequest("File is required".into()))?;
    let data = data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| crate::error::Error::BadRequest("File is required".into()))?;

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(crate::error::Error::BadRequest(
            "File exceeds the 5MB size limit".into(),
        ));
    }

    let (safe_filename, url) = save_upload(&file_type, &filename, &data).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            filename: safe_filename,
            url,
        }),
    ))
}
