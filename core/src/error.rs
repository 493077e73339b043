//! Error types for the core library

use thiserror::Error;

use crate::channel::ChannelKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Task table error: {0}")]
    Table(String),

    #[error("{kind} error: {message}")]
    Channel { kind: ChannelKind, message: String },

    #[error("{0} has no address, it was not provisioned")]
    NotProvisioned(ChannelKind),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn channel(kind: ChannelKind, message: impl Into<String>) -> Self {
        Self::Channel {
            kind,
            message: message.into(),
        }
    }
}
