// src/linkedin/job_scraper.rs
use super::field_extractor::FieldExtractor;
use super::normalizer::DetailNormalizer;
use super::selectors;
use super::types::JobRecord;
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::Html;
use tracing::{info, warn};

/// A loaded job page: where it came from and its markup.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

pub struct JobScraper {
    client: Client,
}

impl JobScraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<Page> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(Page::new(url, html))
    }

    /// Builds the record for one page. Never fails: every miss is a sentinel
    /// and gets a warning.
    pub fn extract_record(page: &Page) -> JobRecord {
        let document = Html::parse_document(&page.html);
        let record = Self::parse_linkedin_job(&document, &page.url);

        for field in record.missing_fields() {
            warn!("Missing or incomplete data for field: {}", field);
        }

        info!(
            "Extracted job: {} at {}",
            record.title, record.company
        );
        record
    }

    fn parse_linkedin_job(document: &Html, url: &str) -> JobRecord {
        let extractor = FieldExtractor::new(document);

        let title = extractor.text_any(selectors::TITLE);
        let company = extractor.text_any(selectors::COMPANY);
        let location = extractor.text_any(selectors::LOCATION);
        let description = extractor.text_any(selectors::DESCRIPTION);
        let fragments = extractor.texts(selectors::PREFERENCE_FRAGMENTS);

        let details = DetailNormalizer::normalize(&fragments, &location);

        JobRecord {
            title,
            company,
            location,
            city: details.city,
            country: details.country,
            description,
            url: url.to_string(),
            work_setting_type: details.work_setting_type,
            employment_type: details.employment_type,
        }
    }
}
