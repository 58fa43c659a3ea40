// src/browser/content_script.rs
use super::tabs::Tab;
use crate::linkedin::{JobScraper, Page};
use crate::messaging::{ContextHandle, Message, MessageHandler, MessageKind};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// `extract_job_details` listener living in a tab's context.
pub struct ContentScript {
    page: Arc<Page>,
    background: ContextHandle,
}

impl ContentScript {
    pub fn new(page: Arc<Page>, background: ContextHandle) -> Self {
        Self { page, background }
    }
}

#[async_trait]
impl MessageHandler for ContentScript {
    async fn handle(&self, message: Message) -> anyhow::Result<()> {
        match message {
            Message::ExtractJobDetails => {
                let record = JobScraper::extract_record(&self.page);
                self.background
                    .request(Message::SaveYaml { data: record })?
                    .wait()
                    .await?;
                info!("Job data sent to background context");
            }
            other => debug!("Content script ignoring '{}'", other.kind().action()),
        }
        Ok(())
    }
}

/// Make sure the tab has its content script. Returns `false` when it was
/// already there, in which case nothing changes.
pub fn inject(tab: &Tab, background: &ContextHandle) -> bool {
    tab.context.register_with(MessageKind::ExtractJobDetails, || {
        Arc::new(ContentScript::new(Arc::clone(&tab.page), background.clone()))
            as Arc<dyn MessageHandler>
    })
}
