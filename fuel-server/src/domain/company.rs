//! Company brand normalization.
//!
//! Station signs carry free-text brand names ("REPSOL BILBAO NORTE",
//! "CEPSA EXPRESS A-2"). Filtering by company works on a small table of
//! canonical brands matched by substring against the uppercased sign.

/// Canonical brand → sign patterns that map to it.
const COMPANY_PATTERNS: &[(&str, &[&str])] = &[
    ("REPSOL", &["REPSOL", "REPSOL AUTOGAS", "REPSOL BUTANO"]),
    ("CEPSA", &["CEPSA", "CEPSA URBAN", "CEPSA EXPRESS"]),
    ("BP", &["BP", "BP OIL", "BP SERVICE"]),
    ("GALP", &["GALP", "GALPENERGIA"]),
    ("AVIA", &["AVIA"]),
    ("PETRONOR", &["PETRONOR"]),
    ("CARREFOUR", &["CARREFOUR", "CARREFOUR EXPRESS"]),
    ("ALCAMPO", &["ALCAMPO", "ALCAMPO SUPERMERCADOS"]),
    ("E.LECLERC", &["E.LECLERC", "LECLERC", "CENTRE LECLERC"]),
    ("SHELL", &["SHELL", "SHELL AUTOSERVICIO"]),
];

/// Map a raw station sign to its canonical brand, if it matches one.
pub fn normalize_company(raw_name: &str) -> Option<&'static str> {
    let trimmed = raw_name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_uppercase();

    for (brand, patterns) in COMPANY_PATTERNS {
        for pattern in *patterns {
            if upper.contains(pattern) {
                return Some(brand);
            }
        }
    }

    None
}

/// Whether a raw station sign belongs to a canonical brand.
///
/// A sign that normalizes to nothing belongs to no named company.
pub fn belongs_to_company(raw_name: &str, brand: &str) -> bool {
    normalize_company(raw_name) == Some(brand)
}
