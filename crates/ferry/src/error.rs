//! Error types for Ferry operations.
//!
//! This module provides the main error type [`FerryError`]. Every variant
//! aborts the export in progress; none of them is retried.

use std::{io, ops::Range};

use thiserror::Error;

use ferry_core::{identifier::Id, model::ModelError};

/// The main error type for Ferry operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the offending document and the byte span of
/// the problem so front ends can point at it.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Missing or empty required configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Out-of-range or negative positional index.
    #[error("Index error: {0}")]
    Index(String),

    /// Missing link, or a virtual index the writer cannot resolve.
    #[error("Reference error: {0}")]
    Reference(String),

    /// A link resolves to an element outside the addressable kinds.
    #[error("Unindexed element: `{id}` {context} is not an actor, object, activation box or lifeline")]
    UnindexedElement { id: Id, context: String },

    /// Writer operation called out of phase order.
    #[error("Phase error: {0}")]
    Phase(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FerryError {
    /// Create a new `Parse` error with the associated document text.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
