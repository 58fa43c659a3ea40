// src/linkedin/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder used whenever the page does not provide a value.
pub const SENTINEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkSettingType {
    Remote,
    Hybrid,
    Onsite,
    #[default]
    Unknown,
}

impl WorkSettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
            Self::Onsite => "onsite",
            Self::Unknown => "unknown",
        }
    }

    /// Lenient label parsing; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "remote" => Self::Remote,
            "hybrid" => Self::Hybrid,
            "onsite" | "on-site" => Self::Onsite,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for WorkSettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkSettingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Self::Unknown, |label| Self::from_label(&label)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentType {
    Fulltime,
    Parttime,
    Contract,
    #[default]
    Unknown,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fulltime => "fulltime",
            Self::Parttime => "parttime",
            Self::Contract => "contract",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "fulltime" | "full-time" => Self::Fulltime,
            "parttime" | "part-time" => Self::Parttime,
            "contract" => Self::Contract,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmploymentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Self::Unknown, |label| Self::from_label(&label)))
    }
}

/// Absent, `null` and blank values all read as the sentinel.
fn text_or_sentinel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| SENTINEL.to_string()))
}

/// One scraped job posting. Every field is always populated; missing values
/// in an incoming payload fall back to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRecord {
    #[serde(deserialize_with = "text_or_sentinel")]
    pub title: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub company: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub location: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub city: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub country: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub description: String,
    #[serde(deserialize_with = "text_or_sentinel")]
    pub url: String,
    pub work_setting_type: WorkSettingType,
    pub employment_type: EmploymentType,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            title: SENTINEL.to_string(),
            company: SENTINEL.to_string(),
            location: SENTINEL.to_string(),
            city: SENTINEL.to_string(),
            country: SENTINEL.to_string(),
            description: SENTINEL.to_string(),
            url: SENTINEL.to_string(),
            work_setting_type: WorkSettingType::Unknown,
            employment_type: EmploymentType::Unknown,
        }
    }
}

impl JobRecord {
    /// Names of fields that carry no real data.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("city", &self.city),
            ("country", &self.country),
            ("description", &self.description),
            ("url", &self.url),
        ];

        let mut missing: Vec<&'static str> = text_fields
            .iter()
            .filter(|(_, value)| value.is_empty() || value.as_str() == SENTINEL)
            .map(|(name, _)| *name)
            .collect();

        if self.work_setting_type == WorkSettingType::Unknown {
            missing.push("workSettingType");
        }
        if self.employment_type == EmploymentType::Unknown {
            missing.push("employmentType");
        }
        missing
    }
}
