//! Error types for the event record
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Structural misuse of the graph API (touching a node that the event does
//! not own) is never an error: those calls are silent no-ops. Errors here
//! cover attribute conversion, flat-data validation and configuration.

use crate::attribute::AttributeKind;
use std::io;
use thiserror::Error;

/// Result type alias for event-record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the event record
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (configuration files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Attribute string could not be parsed as the requested kind
    #[error("Cannot parse {kind} attribute from {input:?}")]
    AttributeParse {
        /// Requested attribute kind
        kind: AttributeKind,
        /// Offending input
        input: String,
    },

    /// Attribute parsed but its contextual initialization failed
    #[error("Attribute initialization failed: {0}")]
    AttributeInit(String),

    /// Attribute value has no faithful string form
    #[error("Attribute cannot be serialized: {0}")]
    AttributeFormat(String),

    /// Attribute was already parsed as a different kind
    #[error("Attribute kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Requested kind
        expected: AttributeKind,
        /// Kind stored in the table
        found: AttributeKind,
    },

    /// Unit name not recognized
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Flat event data is internally inconsistent
    #[error("Invalid event data: {0}")]
    InvalidData(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
