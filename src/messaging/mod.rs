// src/messaging/mod.rs
pub mod context;
pub mod message;

pub use context::{ContextHandle, Delivery, MessageHandler};
pub use message::{Message, MessageKind};
