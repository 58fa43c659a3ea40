// src/export/country.rs

/// Code used for any country name missing from [`COUNTRY_CODES`].
pub const UNKNOWN_COUNTRY_CODE: &str = "N/A";

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("germany", "DE"),
    ("united states", "US"),
    ("united states of america", "US"),
    ("usa", "US"),
    ("canada", "CA"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("france", "FR"),
    ("united arab emirates", "AE"),
    ("switzerland", "CH"),
    ("netherlands", "NL"),
    ("spain", "ES"),
    ("ireland", "IE"),
    ("remote", UNKNOWN_COUNTRY_CODE),
];

/// Two-letter code for a country name as LinkedIn prints it.
pub fn country_to_iso(country: &str) -> &'static str {
    let country = country.trim();
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_COUNTRY_CODE)
}
