//! Error types for configuration validation

use thiserror::Error;

/// Errors raised while normalizing a raw patch configuration.
///
/// These are fatal: the renderer produces no output when the input shape is
/// structurally invalid. Dangling connection endpoints are handled separately
/// (warn and skip) during layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The configuration has no `modules` sequence
    #[error("configuration must have a \"modules\" sequence")]
    MissingModules,

    /// A module entry has no `name`
    #[error("module at index {index} must have a \"name\" property")]
    UnnamedModule { index: usize },

    /// A connection entry is missing `from` or `to`
    #[error("connection at index {index} must have \"from\" and \"to\" properties")]
    IncompleteConnection { index: usize },
}

impl ValidationError {
    /// Create an unnamed-module error for the given position in the sequence
    pub fn unnamed_module(index: usize) -> Self {
        Self::UnnamedModule { index }
    }

    /// Create an incomplete-connection error for the given position
    pub fn incomplete_connection(index: usize) -> Self {
        Self::IncompleteConnection { index }
    }
}
