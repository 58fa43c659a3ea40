// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct OpenTabRequest {
    pub url: String,
    /// Page markup; fetched from `url` when absent.
    pub html: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct OpenTabResponse {
    pub success: bool,
    pub tab_id: u64,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TabResponse {
    pub success: bool,
    pub tab_id: u64,
    pub url: String,
    /// Name of the tab's execution context.
    pub context: String,
    pub active: bool,
    pub open_tabs: usize,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DispatchResponse {
    pub success: bool,
    /// `dispatched`, `busy` or `ignored`.
    pub status: &'static str,
    pub tab_id: Option<u64>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: &str) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
        }
    }
}
