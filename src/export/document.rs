// src/export/document.rs
use super::country::country_to_iso;
use crate::linkedin::{EmploymentType, JobRecord, WorkSettingType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "be2ffb22-4b5b-4875-8b9a-06eb02d24421";
pub const STATUS_ADDED: &str = "added";
pub const PLATFORM: &str = "LinkedIn";

/// Key order of the exported file.
pub const EXPORT_KEYS: [&str; 12] = [
    "title",
    "company",
    "user_id",
    "status",
    "country",
    "city",
    "work_setting_type",
    "employment_type",
    "platform",
    "url",
    "notes",
    "description",
];

/// The flat document written to disk. Field order is the file's key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub title: String,
    pub company: String,
    pub user_id: String,
    pub status: String,
    pub country: String,
    pub city: String,
    pub work_setting_type: WorkSettingType,
    pub employment_type: EmploymentType,
    pub platform: String,
    pub url: String,
    pub notes: String,
    pub description: String,
}

impl ExportDocument {
    pub fn from_record(record: &JobRecord, user_id: &str) -> Self {
        Self {
            title: record.title.clone(),
            company: record.company.clone(),
            user_id: user_id.to_string(),
            status: STATUS_ADDED.to_string(),
            country: country_to_iso(&record.country).to_string(),
            city: record.city.clone(),
            work_setting_type: record.work_setting_type,
            employment_type: record.employment_type,
            platform: PLATFORM.to_string(),
            url: record.url.clone(),
            notes: String::new(),
            description: record.description.clone(),
        }
    }
}
