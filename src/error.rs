//! Error types for credvault.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;
use crate::parser::FormatError;

/// A field of a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Website,
    Username,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Website => "website",
            Field::Username => "username",
            Field::Password => "password",
        };
        f.write_str(name)
    }
}

/// Rejected caller input. Nothing is written when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(Field),

    #[error("{field} must not contain the field delimiter '{delimiter}'")]
    ContainsDelimiter { field: Field, delimiter: String },

    #[error("{field} would be ambiguous next to the field delimiter '{delimiter}'")]
    AmbiguousBoundary { field: Field, delimiter: String },
}

/// Main error type for vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Corrupt vault at line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: FormatError,
    },

    #[error("Corrupt vault at line {line}: {source}")]
    Codec {
        line: usize,
        #[source]
        source: CodecError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Vault already exists: {0}")]
    VaultExists(PathBuf),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl VaultError {
    /// True when the vault file itself could not be decoded or parsed.
    pub fn is_corruption(&self) -> bool {
        matches!(self, VaultError::Format { .. } | VaultError::Codec { .. })
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
