//! Country codes and the static continent lookup

/// Bucket name used when a record carries no country
pub const UNKNOWN: &str = "Unknown";

/// Bucket name for country codes missing from the continent table
const OTHER: &str = "Other";

const CONTINENTS: &[(&str, &str)] = &[
    ("US", "North America"),
    ("CA", "North America"),
    ("MX", "North America"),
    ("BR", "South America"),
    ("AR", "South America"),
    ("GB", "Europe"),
    ("FR", "Europe"),
    ("DE", "Europe"),
    ("IT", "Europe"),
    ("ES", "Europe"),
    ("RU", "Europe/Asia"),
    ("CN", "Asia"),
    ("JP", "Asia"),
    ("IN", "Asia"),
    ("AU", "Oceania"),
    ("NZ", "Oceania"),
    ("ZA", "Africa"),
    ("EG", "Africa"),
];

/// Normalize a client-supplied country code.
///
/// Trims and upper-cases the input. Anything that is not exactly two ASCII
/// letters afterwards is discarded.
pub fn normalize_country(raw: Option<&str>) -> Option<String> {
    let code = raw?.trim().to_ascii_uppercase();
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Some(code)
    } else {
        None
    }
}

/// Grouping key for per-country maps
pub fn country_key(country: Option<&str>) -> String {
    match country.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => code.to_uppercase(),
        None => UNKNOWN.to_string(),
    }
}

/// Map a country code to its continent
pub fn continent_for(country: Option<&str>) -> &'static str {
    let Some(code) = country.map(str::trim).filter(|c| !c.is_empty()) else {
        return UNKNOWN;
    };
    let code = code.to_uppercase();
    CONTINENTS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(OTHER, |(_, continent)| continent)
}
