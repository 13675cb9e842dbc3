use serde::Serialize;

/// Administrative region reference data. Read-mostly and small, so it
/// ships compiled into the binary rather than seeded into the store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Wilaya {
    pub id: &'static str,
    pub name: &'static str,
    pub ar_name: &'static str,
}

pub const WILAYAS: &[Wilaya] = &[
    Wilaya { id: "01", name: "Adrar", ar_name: "أدرار" },
    Wilaya { id: "02", name: "Chlef", ar_name: "الشلف" },
    Wilaya { id: "03", name: "Laghouat", ar_name: "الأغواط" },
    Wilaya { id: "04", name: "Oum El Bouaghi", ar_name: "أم البواقي" },
    Wilaya { id: "05", name: "Batna", ar_name: "باتنة" },
    Wilaya { id: "06", name: "Béjaïa", ar_name: "بجاية" },
    Wilaya { id: "07", name: "Biskra", ar_name: "بسكرة" },
    Wilaya { id: "08", name: "Béchar", ar_name: "بشار" },
    Wilaya { id: "09", name: "Blida", ar_name: "البليدة" },
    Wilaya { id: "10", name: "Bouira", ar_name: "البويرة" },
    Wilaya { id: "11", name: "Tamanrasset", ar_name: "تمنراست" },
    Wilaya { id: "12", name: "Tébessa", ar_name: "تبسة" },
    Wilaya { id: "13", name: "Tlemcen", ar_name: "تلمسان" },
    Wilaya { id: "14", name: "Tiaret", ar_name: "تيارت" },
    Wilaya { id: "15", name: "Tizi Ouzou", ar_name: "تيزي وزو" },
    Wilaya { id: "16", name: "Alger", ar_name: "الجزائر" },
    Wilaya { id: "17", name: "Djelfa", ar_name: "الجلفة" },
    Wilaya { id: "18", name: "Jijel", ar_name: "جيجل" },
    Wilaya { id: "19", name: "Sétif", ar_name: "سطيف" },
    Wilaya { id: "20", name: "Saïda", ar_name: "سعيدة" },
    Wilaya { id: "21", name: "Skikda", ar_name: "سكيكدة" },
    Wilaya { id: "22", name: "Sidi Bel Abbès", ar_name: "سيدي بلعباس" },
    Wilaya { id: "23", name: "Annaba", ar_name: "عنابة" },
    Wilaya { id: "24", name: "Guelma", ar_name: "قالمة" },
    Wilaya { id: "25", name: "Constantine", ar_name: "قسنطينة" },
    Wilaya { id: "26", name: "Médéa", ar_name: "المدية" },
    Wilaya { id: "27", name: "Mostaganem", ar_name: "مستغانم" },
    Wilaya { id: "28", name: "M'Sila", ar_name: "المسيلة" },
    Wilaya { id: "29", name: "Mascara", ar_name: "معسكر" },
    Wilaya { id: "30", name: "Ouargla", ar_name: "ورقلة" },
    Wilaya { id: "31", name: "Oran", ar_name: "وهران" },
    Wilaya { id: "32", name: "El Bayadh", ar_name: "البيض" },
    Wilaya { id: "33", name: "Illizi", ar_name: "إليزي" },
    Wilaya { id: "34", name: "Bordj Bou Arreridj", ar_name: "برج بوعريريج" },
    Wilaya { id: "35", name: "Boumerdès", ar_name: "بومرداس" },
    Wilaya { id: "36", name: "El Tarf", ar_name: "الطارف" },
    Wilaya { id: "37", name: "Tindouf", ar_name: "تندوف" },
    Wilaya { id: "38", name: "Tissemsilt", ar_name: "تيسمسيلت" },
    Wilaya { id: "39", name: "El Oued", ar_name: "الوادي" },
    Wilaya { id: "40", name: "Khenchela", ar_name: "خنشلة" },
    Wilaya { id: "41", name: "Souk Ahras", ar_name: "سوق أهراس" },
    Wilaya { id: "42", name: "Tipaza", ar_name: "تيبازة" },
    Wilaya { id: "43", name: "Mila", ar_name: "ميلة" },
    Wilaya { id: "44", name: "Aïn Defla", ar_name: "عين الدفلى" },
    Wilaya { id: "45", name: "Naâma", ar_name: "النعامة" },
    Wilaya { id: "46", name: "Aïn Témouchent", ar_name: "عين تموشنت" },
    Wilaya { id: "47", name: "Ghardaïa", ar_name: "غرداية" },
    Wilaya { id: "48", name: "Relizane", ar_name: "غليزان" },
];

pub fn find(id: &str) -> Option<&'static Wilaya> {
    WILAYAS.iter().find(|w| w.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(find("16").map(|w| w.name), Some("Alger"));
        assert!(find("99").is_none());
    }
}
