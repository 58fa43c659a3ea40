// src/messaging/context.rs
//! Single-threaded execution contexts. Each context drains its own queue and
//! runs one handler to completion before taking the next message.

use super::message::{Message, MessageKind};
use crate::error::MessagingError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, message: Message) -> anyhow::Result<()>;
}

type HandlerTable = Arc<RwLock<HashMap<MessageKind, Arc<dyn MessageHandler>>>>;
type Ack = oneshot::Sender<Result<(), MessagingError>>;

struct Envelope {
    message: Message,
    ack: Option<Ack>,
}

/// Cloneable address of a running context.
#[derive(Clone)]
pub struct ContextHandle {
    name: Arc<str>,
    handlers: HandlerTable,
    sender: mpsc::UnboundedSender<Envelope>,
}

impl ContextHandle {
    /// Start a context on the current tokio runtime. It stops once every
    /// handle is dropped.
    pub fn spawn(name: impl Into<String>) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        let handlers: HandlerTable = Arc::new(RwLock::new(HashMap::new()));
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(run(Arc::clone(&name), Arc::clone(&handlers), receiver));

        Self {
            name,
            handlers,
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a listener for `kind`. An existing listener is kept and `false`
    /// is returned.
    pub fn register(&self, kind: MessageKind, handler: Arc<dyn MessageHandler>) -> bool {
        self.register_with(kind, || handler)
    }

    /// Like [`register`](Self::register), building the handler only when the
    /// slot is free.
    pub fn register_with<F>(&self, kind: MessageKind, make: F) -> bool
    where
        F: FnOnce() -> Arc<dyn MessageHandler>,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        if handlers.contains_key(&kind) {
            return false;
        }
        handlers.insert(kind, make());
        debug!("Registered '{}' listener in context '{}'", kind.action(), self.name);
        true
    }

    pub fn is_registered(&self, kind: MessageKind) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&kind)
    }

    /// Fire and forget.
    pub fn post(&self, message: Message) -> Result<(), MessagingError> {
        self.enqueue(message, None)
    }

    /// Post and get a [`Delivery`] that resolves once the handler finished.
    pub fn request(&self, message: Message) -> Result<Delivery, MessagingError> {
        let action = message.kind().action();
        let (ack, receiver) = oneshot::channel();
        self.enqueue(message, Some(ack))?;
        Ok(Delivery {
            context: Arc::clone(&self.name),
            action,
            receiver,
        })
    }

    fn enqueue(&self, message: Message, ack: Option<Ack>) -> Result<(), MessagingError> {
        self.sender
            .send(Envelope { message, ack })
            .map_err(|_| MessagingError::ContextClosed(self.name.to_string()))
    }
}

/// Pending acknowledgment of one request.
pub struct Delivery {
    context: Arc<str>,
    action: &'static str,
    receiver: oneshot::Receiver<Result<(), MessagingError>>,
}

impl Delivery {
    pub fn action(&self) -> &'static str {
        self.action
    }

    pub async fn wait(self) -> Result<(), MessagingError> {
        match self.receiver.await {
            Ok(outcome) => outcome,
            Err(_) => Err(MessagingError::ContextClosed(self.context.to_string())),
        }
    }
}

async fn run(
    name: Arc<str>,
    handlers: HandlerTable,
    mut receiver: mpsc::UnboundedReceiver<Envelope>,
) {
    debug!("Context '{}' started", name);

    while let Some(Envelope { message, ack }) = receiver.recv().await {
        let kind = message.kind();
        let handler = handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&kind)
            .cloned();

        let outcome = match handler {
            Some(handler) => {
                if let Err(e) = handler.handle(message).await {
                    error!(
                        "Listener for '{}' in context '{}' failed: {:#}",
                        kind.action(),
                        name,
                        e
                    );
                }
                Ok(())
            }
            None => {
                warn!("No listener for '{}' in context '{}'", kind.action(), name);
                Err(MessagingError::NoListener {
                    context: name.to_string(),
                    action: kind.action(),
                })
            }
        };

        if let Some(ack) = ack {
            let _ = ack.send(outcome);
        }
    }

    debug!("Context '{}' closed", name);
}
