// src/linkedin/normalizer.rs
use super::types::{EmploymentType, WorkSettingType, SENTINEL};

const WORKPLACE_PHRASE: &str = "workplace type is";
const JOB_TYPE_PHRASE: &str = "job type is";

const WORK_SETTING_RULES: &[(&str, WorkSettingType)] = &[
    ("remote", WorkSettingType::Remote),
    ("hybrid", WorkSettingType::Hybrid),
    ("on-site", WorkSettingType::Onsite),
    ("onsite", WorkSettingType::Onsite),
];

const EMPLOYMENT_RULES: &[(&str, EmploymentType)] = &[
    ("full-time", EmploymentType::Fulltime),
    ("part-time", EmploymentType::Parttime),
    ("contract", EmploymentType::Contract),
];

/// Fields derived from raw page strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub work_setting_type: WorkSettingType,
    pub employment_type: EmploymentType,
    pub city: String,
    pub country: String,
}

pub struct DetailNormalizer;

impl DetailNormalizer {
    pub fn normalize(fragments: &[String], location: &str) -> JobDetails {
        let (city, country) = Self::split_location(location);
        JobDetails {
            work_setting_type: Self::work_setting_type(fragments),
            employment_type: Self::employment_type(fragments),
            city,
            country,
        }
    }

    pub fn work_setting_type(fragments: &[String]) -> WorkSettingType {
        scan(fragments, WORKPLACE_PHRASE, WORK_SETTING_RULES).unwrap_or_default()
    }

    pub fn employment_type(fragments: &[String]) -> EmploymentType {
        scan(fragments, JOB_TYPE_PHRASE, EMPLOYMENT_RULES).unwrap_or_default()
    }

    /// `(city, country)`: city is before the first comma, country after the
    /// last one. Without a comma the whole string is the country.
    pub fn split_location(location: &str) -> (String, String) {
        let location = location.trim();
        match (location.split_once(','), location.rsplit_once(',')) {
            (Some((city, _)), Some((_, country))) => {
                (non_empty_or_sentinel(city), non_empty_or_sentinel(country))
            }
            _ => (SENTINEL.to_string(), non_empty_or_sentinel(location)),
        }
    }
}

fn scan<T: Copy>(fragments: &[String], phrase: &str, rules: &[(&str, T)]) -> Option<T> {
    fragments
        .iter()
        .map(|fragment| fragment.to_lowercase())
        .filter(|fragment| fragment.contains(phrase))
        .find_map(|fragment| {
            rules
                .iter()
                .find(|(needle, _)| fragment.contains(needle))
                .map(|(_, value)| *value)
        })
}

fn non_empty_or_sentinel(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        SENTINEL.to_string()
    } else {
        value.to_string()
    }
}
