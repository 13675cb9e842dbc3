use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use recruitment_portal::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::auth::{require_admin, require_auth, require_candidate},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route(
            "/api/auth/candidate/signup",
            post(routes::auth_routes::candidate_signup),
        )
        .route(
            "/api/auth/candidate/login",
            post(routes::auth_routes::candidate_login),
        )
        .route(
            "/api/auth/admin/login",
            post(routes::auth_routes::admin_login),
        )
        .route(
            "/api/job-positions",
            get(routes::job_position_routes::list_job_positions),
        )
        .route("/api/wilayas", get(routes::wilaya_routes::list_wilayas));

    let candidate_api = Router::new()
        .route(
            "/api/applications",
            post(routes::application_routes::create_application)
                .get(routes::application_routes::list_my_applications),
        )
        .route(
            "/api/applications/:id",
            get(routes::application_routes::get_application)
                .put(routes::application_routes::update_application),
        )
        .route(
            "/api/profile",
            get(routes::profile_routes::get_profile).put(routes::profile_routes::update_profile),
        )
        .route(
            "/api/profile/password",
            put(routes::profile_routes::change_password),
        )
        .route("/api/upload", post(routes::upload::upload_file))
        .route_layer(from_fn(require_candidate));

    // Document export is reachable by the owning candidate and by admins.
    let shared_api = Router::new()
        .route(
            "/api/applications/:id/pdf",
            get(routes::application_routes::export_application_pdf),
        )
        .route_layer(from_fn(require_auth));

    let admin_api = Router::new()
        .route(
            "/api/admin/applications",
            get(routes::admin_routes::list_applications),
        )
        .route(
            "/api/admin/applications/:id/status",
            put(routes::admin_routes::update_application_status),
        )
        .route(
            "/api/admin/applications/counts",
            get(routes::admin_routes::application_counts),
        )
        .route(
            "/api/admin/applications/export.csv",
            get(routes::export::export_applications_csv),
        )
        .route(
            "/api/admin/applications/export.xlsx",
            get(routes::export::export_applications_xlsx),
        )
        .route(
            "/api/admin/dashboard",
            get(routes::admin_routes::dashboard_stats),
        )
        .route(
            "/api/admin/users",
            get(routes::admin_routes::list_admins).post(routes::admin_routes::create_admin),
        )
        .route(
            "/api/job-positions",
            post(routes::job_position_routes::create_job_position),
        )
        .route(
            "/api/job-positions/:id",
            delete(routes::job_position_routes::delete_job_position),
        )
        .route_layer(from_fn(require_admin));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(candidate_api)
        .merge(shared_api)
        .merge(admin_api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
