use thiserror::Error;

use crate::store::StoreError;

/// Everything that can go wrong while talking to the device or handling
/// operator input. None of these end the session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The device answered with something other than the success sentinel
    #[error("Error: {0}")]
    Protocol(String),

    #[error("{0} received")]
    UnexpectedMessage(String),

    #[error("Malformed message from device: {0}")]
    Malformed(String),

    /// Scan succeeded but carried no list for the Wifi interface
    #[error("Wifi scan returned no result")]
    TransientEmptyResult,

    #[error("Wifi scan returned no networks after {0} attempts")]
    ScanExhausted(u32),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChannelError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Operator input that needs the configuration snapshot arrived before it
    pub fn not_loaded() -> Self {
        Self::validation("Device configuration has not been loaded yet.")
    }
}
