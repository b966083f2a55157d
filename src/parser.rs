//! Record format: one credential per delimited line.

use thiserror::Error;

use crate::error::ValidationError;
use crate::models::Credential;

/// Number of fields in a record line.
pub const FIELD_COUNT: usize = 3;

/// Errors raised while parsing a decoded record line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
}

/// Joins and splits record fields on a fixed delimiter.
#[derive(Debug, Clone)]
pub struct RecordFormat {
    delimiter: String,
}

impl RecordFormat {
    /// Create a format using `delimiter`, which must be non-empty.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// The field delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Join the fields of `credential` into a single line.
    ///
    /// Fails when a field is empty, contains the delimiter, or sits against
    /// the delimiter in a way that would split differently on the way back.
    pub fn serialize(&self, credential: &Credential) -> Result<String, ValidationError> {
        credential.validate()?;
        for (field, value) in credential.fields() {
            if value.contains(&self.delimiter) {
                return Err(ValidationError::ContainsDelimiter {
                    field,
                    delimiter: self.delimiter.clone(),
                });
            }
        }

        let line = credential
            .fields()
            .map(|(_, value)| value)
            .join(self.delimiter.as_str());

        // e.g. a website ending in '|' next to "||" shifts the split point
        let reparsed: Vec<&str> = line.split(self.delimiter.as_str()).collect();
        for (index, (field, value)) in credential.fields().into_iter().enumerate() {
            if reparsed.len() != FIELD_COUNT || reparsed[index] != value {
                return Err(ValidationError::AmbiguousBoundary {
                    field,
                    delimiter: self.delimiter.clone(),
                });
            }
        }

        Ok(line)
    }

    /// Split a decoded line back into a credential.
    pub fn parse(&self, line: &str) -> Result<Credential, FormatError> {
        let parts: Vec<&str> = line.split(self.delimiter.as_str()).collect();
        match parts.as_slice() {
            [website, username, password] => Ok(Credential {
                website: (*website).to_string(),
                username: (*username).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err(FormatError::FieldCount {
                expected: FIELD_COUNT,
                found: parts.len(),
            }),
        }
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DELIMITER)
    }
}
