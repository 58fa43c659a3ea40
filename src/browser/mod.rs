// src/browser/mod.rs
//! Tabs, the background context and the trigger path wired together.

pub mod content_script;
pub mod dispatcher;
pub mod tabs;

pub use dispatcher::{DispatchOutcome, Receipt, TriggerDispatcher, TriggerSignal, EXTRACT_COMMAND};
pub use tabs::{Tab, TabId, TabRegistry};

use crate::config::ExporterConfig;
use crate::error::DispatchError;
use crate::export::{Downloads, FsDownloads, YamlExporter};
use crate::linkedin::Page;
use crate::messaging::{ContextHandle, MessageKind};
use std::sync::Arc;
use tracing::info;

pub struct Extension {
    tabs: Arc<TabRegistry>,
    background: ContextHandle,
    dispatcher: TriggerDispatcher,
    downloads: Arc<dyn Downloads>,
}

impl Extension {
    /// Must be called from within a tokio runtime.
    pub fn start(config: &ExporterConfig) -> Self {
        let downloads = Arc::new(FsDownloads::new(
            config.download_dir.clone(),
            config.conflict_action,
        ));
        info!("Saving exports to {}", downloads.dir().display());
        Self::with_downloads(config.user_id.to_string(), downloads)
    }

    pub fn with_downloads(user_id: impl Into<String>, downloads: Arc<dyn Downloads>) -> Self {
        let background = ContextHandle::spawn("background");
        background.register(
            MessageKind::SaveYaml,
            Arc::new(YamlExporter::new(user_id, Arc::clone(&downloads))),
        );

        let tabs = Arc::new(TabRegistry::new());
        let dispatcher = TriggerDispatcher::new(Arc::clone(&tabs), background.clone());

        Self {
            tabs,
            background,
            dispatcher,
            downloads,
        }
    }

    pub fn open_page(&self, page: Page) -> TabId {
        self.tabs.open(page)
    }

    pub fn trigger(&self, signal: TriggerSignal) -> Result<DispatchOutcome, DispatchError> {
        self.dispatcher.dispatch(signal)
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn background(&self) -> &ContextHandle {
        &self.background
    }

    pub fn downloads(&self) -> &Arc<dyn Downloads> {
        &self.downloads
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }
}
