// src/linkedin/mod.rs
pub mod field_extractor;
pub mod job_scraper;
pub mod normalizer;
pub mod selectors;
pub mod types;

pub use field_extractor::FieldExtractor;
pub use job_scraper::{JobScraper, Page};
pub use normalizer::{DetailNormalizer, JobDetails};
pub use types::{EmploymentType, JobRecord, WorkSettingType, SENTINEL};
