// src/export/exporter.rs
use super::document::ExportDocument;
use super::downloads::{DownloadItem, Downloads};
use super::filename::export_filename;
use super::yaml;
use crate::error::ExportError;
use crate::linkedin::JobRecord;
use crate::messaging::{Message, MessageHandler};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// `save_yaml` listener of the background context.
pub struct YamlExporter {
    user_id: String,
    downloads: Arc<dyn Downloads>,
}

impl YamlExporter {
    pub fn new(user_id: impl Into<String>, downloads: Arc<dyn Downloads>) -> Self {
        Self {
            user_id: user_id.into(),
            downloads,
        }
    }

    pub async fn export(&self, record: &JobRecord) -> Result<DownloadItem, ExportError> {
        let document = ExportDocument::from_record(record, &self.user_id);
        let contents = yaml::render(&document)?;
        let filename = export_filename(&document.company, &document.title);

        let item = self.downloads.download(&filename, contents.as_bytes()).await?;
        info!("YAML file created: {}", item.path.display());
        Ok(item)
    }
}

#[async_trait]
impl MessageHandler for YamlExporter {
    async fn handle(&self, message: Message) -> anyhow::Result<()> {
        match message {
            Message::SaveYaml { data } => {
                // Failures end the flow here; nothing is retried.
                if let Err(e) = self.export(&data).await {
                    error!("Error while converting data to YAML: {}", e);
                }
            }
            other => warn!("Exporter ignoring '{}' message", other.kind().action()),
        }
        Ok(())
    }
}
