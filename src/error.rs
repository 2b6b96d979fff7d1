//! Error types for the server.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can abort startup or shutdown.
///
/// Per-candidate bind failures during the port scan are not represented here:
/// they are recovered by moving on to the next port.
#[derive(Debug, Error)]
pub enum Error {
    /// No port in `start..end` could be bound.
    #[error("could not find available port in range {start}-{end}")]
    PortExhausted { start: u16, end: u32 },

    #[error("failed to write port record {}", path.display())]
    PortRecordWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove port record {}", path.display())]
    PortRecordRemove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory to serve does not exist or cannot be resolved.
    #[error("cannot serve {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
