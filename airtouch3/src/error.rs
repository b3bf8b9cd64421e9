//! Error types for decoding frames and talking to the controller.

use std::fmt;
use thiserror::Error;

/// Errors produced while decoding a status frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The response was not exactly one status frame long.
    #[error("invalid response length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// An AC unit reported a mode outside the known set.
    #[error("AC unit {unit} reported unknown mode {value}")]
    UnknownMode { unit: u8, value: u8 },

    /// An AC unit reported a fan speed outside the known set.
    #[error("AC unit {unit} reported unknown fan speed {value}")]
    UnknownFanSpeed { unit: u8, value: u8 },
}

/// Errors raised while exchanging bytes with the controller.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("unable to resolve {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sending command to {address} failed: {source}")]
    Send {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("receiving response from {address} failed: {source}")]
    Receive {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Which entity map a command index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Group,
    AcUnit,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Group => write!(f, "group"),
            TargetKind::AcUnit => write!(f, "AC unit"),
        }
    }
}

/// Errors returned by [`crate::Device`] operations.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The index is outside the entities known from the last refresh.
    #[error("invalid {kind} {index}: {available} known")]
    InvalidTarget {
        kind: TargetKind,
        index: u8,
        available: usize,
    },
}
