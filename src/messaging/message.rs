// src/messaging/message.rs
use crate::error::MessagingError;
use crate::linkedin::JobRecord;
use serde::{Deserialize, Serialize};

/// Messages exchanged between the page and background contexts.
/// JSON form: `{"action": "save_yaml", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Message {
    ExtractJobDetails,
    SaveYaml { data: JobRecord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ExtractJobDetails,
    SaveYaml,
}

impl MessageKind {
    pub fn action(&self) -> &'static str {
        match self {
            Self::ExtractJobDetails => "extract_job_details",
            Self::SaveYaml => "save_yaml",
        }
    }
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::ExtractJobDetails => MessageKind::ExtractJobDetails,
            Self::SaveYaml { .. } => MessageKind::SaveYaml,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MessagingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MessagingError> {
        Ok(serde_json::to_string(self)?)
    }
}
