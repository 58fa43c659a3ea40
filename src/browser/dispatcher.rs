// src/browser/dispatcher.rs
use super::content_script;
use super::tabs::{TabId, TabRegistry};
use crate::error::{DispatchError, MessagingError};
use crate::messaging::{ContextHandle, Message};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

/// Name of the keyboard-shortcut command that starts an extraction.
pub const EXTRACT_COMMAND: &str = "extract-job";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSignal {
    Command(String),
    ButtonClick,
}

pub enum DispatchOutcome {
    Dispatched(Receipt),
    /// A previous extraction has not finished; the signal was dropped.
    Busy,
    /// The signal does not start an extraction.
    Ignored,
}

/// Resolves once the page context finished handling the extraction,
/// which includes the background save.
pub struct Receipt {
    tab_id: TabId,
    done: oneshot::Receiver<Result<(), MessagingError>>,
}

impl Receipt {
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub async fn completed(self) -> Result<(), MessagingError> {
        match self.done.await {
            Ok(outcome) => outcome,
            Err(_) => Err(MessagingError::ContextClosed(format!("tab-{}", self.tab_id))),
        }
    }
}

pub struct TriggerDispatcher {
    tabs: Arc<TabRegistry>,
    background: ContextHandle,
    in_flight: Arc<AtomicBool>,
}

impl TriggerDispatcher {
    pub fn new(tabs: Arc<TabRegistry>, background: ContextHandle) -> Self {
        Self {
            tabs,
            background,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start an extraction on the active tab and return without waiting for it.
    pub fn dispatch(&self, signal: TriggerSignal) -> Result<DispatchOutcome, DispatchError> {
        match &signal {
            TriggerSignal::Command(name) if name != EXTRACT_COMMAND => {
                debug!("Ignoring command '{}'", name);
                return Ok(DispatchOutcome::Ignored);
            }
            TriggerSignal::Command(_) => {
                info!("Keyboard shortcut triggered: Extracting job details.")
            }
            TriggerSignal::ButtonClick => info!("Extract button clicked: Extracting job details."),
        }

        let Some(tab) = self.tabs.active() else {
            error!("No active tab found.");
            return Err(DispatchError::NoActiveTab);
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Extraction already in progress, ignoring trigger");
            return Ok(DispatchOutcome::Busy);
        }

        if content_script::inject(&tab, &self.background) {
            debug!("Injected content script into tab {}", tab.id);
        }

        let delivery = match tab.context.request(Message::ExtractJobDetails) {
            Ok(delivery) => delivery,
            Err(e) => {
                self.in_flight.store(false, Ordering::Release);
                error!("Failed to reach tab {}: {}", tab.id, e);
                return Err(e.into());
            }
        };

        let in_flight = Arc::clone(&self.in_flight);
        let (done_tx, done) = oneshot::channel();
        let tab_id = tab.id;
        let action = delivery.action();
        tokio::spawn(async move {
            let outcome = delivery.wait().await;
            if let Err(e) = &outcome {
                error!("'{}' on tab {} failed: {}", action, tab_id, e);
            }
            in_flight.store(false, Ordering::Release);
            let _ = done_tx.send(outcome);
        });

        Ok(DispatchOutcome::Dispatched(Receipt { tab_id, done }))
    }
}
