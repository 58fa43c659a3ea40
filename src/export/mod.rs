// src/export/mod.rs
pub mod country;
pub mod document;
pub mod downloads;
pub mod exporter;
pub mod filename;
pub mod yaml;

pub use country::{country_to_iso, UNKNOWN_COUNTRY_CODE};
pub use document::{ExportDocument, DEFAULT_USER_ID, EXPORT_KEYS};
pub use downloads::{ConflictAction, DownloadItem, Downloads, FsDownloads};
pub use exporter::YamlExporter;
pub use filename::{export_filename, sanitize};
