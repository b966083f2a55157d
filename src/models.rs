//! Data models for the credential vault.

use serde::Serialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Field, ValidationError};

/// A single website/username/password record.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    pub website: String,
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Build a record, rejecting empty fields.
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let credential = Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
        };
        credential.validate()?;
        Ok(credential)
    }

    /// Check that every field is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if value.is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }

    /// Fields in storage order.
    pub fn fields(&self) -> [(Field, &str); 3] {
        [
            (Field::Website, self.website.as_str()),
            (Field::Username, self.username.as_str()),
            (Field::Password, self.password.as_str()),
        ]
    }

    /// Case-insensitive website comparison.
    pub fn matches_website(&self, query: &str) -> bool {
        self.website.to_lowercase() == query.to_lowercase()
    }

    /// Display form with the password masked.
    pub fn view(&self, mask_char: char) -> CredentialView {
        CredentialView {
            website: self.website.clone(),
            username: self.username.clone(),
            masked_password: mask(&self.password, mask_char),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("website", &self.website)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What callers outside the store get to see of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialView {
    pub website: String,
    pub username: String,
    pub masked_password: String,
}

impl fmt::Display for CredentialView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.website, self.username, self.masked_password
        )
    }
}

/// Replace every character of `password` with `mask_char`.
pub fn mask(password: &str, mask_char: char) -> String {
    std::iter::repeat(mask_char)
        .take(password.chars().count())
        .collect()
}
