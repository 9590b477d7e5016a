//! Error kinds for each boundary of the job.
//!
//! Fatal kinds (`ConfigError`, `SourceError`, `TransportInitError`) end the run.
//! `SendError` is recorded per message and never stops the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Missing or invalid startup configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Add it to the environment or the .env file")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// The roster file could not be turned into records
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported roster format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{} is not a readable table: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("{} has no header row", .0.display())]
    Empty(PathBuf),

    #[error("the required column '{0}' is missing")]
    MissingColumn(&'static str),
}

/// The authenticated mail session could not be established
#[derive(Debug, Error)]
pub enum TransportInitError {
    #[error("invalid sender address {address:?}: {reason}")]
    InvalidSender { address: String, reason: String },

    #[error("cannot configure relay {host}: {reason}")]
    Relay { host: String, reason: String },

    #[error("cannot connect to {host}: {reason}")]
    Connect { host: String, reason: String },
}

/// One message could not be dispatched
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("invalid recipient address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport rejected message: {0}")]
    Transport(String),
}

/// Fatal failure of a whole run
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Error reading file: {0}")]
    Source(#[from] SourceError),

    #[error("Error sending emails: {0}")]
    Transport(#[from] TransportInitError),
}
