//! Error types for probe operations

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors a probe can observe while attempting its operation.
///
/// None of these are fatal: the probe layer turns every variant into a
/// `BLOCKED:` verdict whose diagnostic is the `Display` text below.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Socket error: {0}")]
    Socket(#[from] nix::Error),

    #[error("{0}")]
    Allocation(#[from] TryReserveError),

    #[error("Thread spawn error: {0}")]
    Spawn(io::Error),

    #[error("target unavailable ({0})")]
    Environment(String),

    #[error("Unexpected fault: {0}")]
    Panic(String),
}
