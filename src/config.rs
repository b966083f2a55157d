//! Vault configuration.

use std::path::{Path, PathBuf};

use crate::error::{Result, VaultError};

/// Default vault file name.
pub const DEFAULT_VAULT_FILE: &str = "vault.txt";

/// Default field delimiter.
pub const DEFAULT_DELIMITER: &str = "||";

/// Default password mask character.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Everything a [`VaultStore`](crate::store::VaultStore) needs to know about its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Path to the vault file
    pub path: PathBuf,
    /// Separator between record fields before encoding
    pub delimiter: String,
    /// Character shown in place of each password character
    pub mask_char: char,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_VAULT_FILE),
            delimiter: DEFAULT_DELIMITER.to_string(),
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl VaultConfig {
    /// Configuration for the vault at `path` with default format settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Use a different mask character.
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Path of the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar file used for write locking.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_VAULT_FILE.into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Reject settings that would make the file ambiguous or unreadable.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(VaultError::Config("vault path is empty".to_string()));
        }
        if self.delimiter.is_empty() {
            return Err(VaultError::Config("delimiter is empty".to_string()));
        }
        if self.delimiter.contains(['\n', '\r']) {
            return Err(VaultError::Config(
                "delimiter must not contain line breaks".to_string(),
            ));
        }
        if self.mask_char.is_whitespace() || self.mask_char.is_control() {
            return Err(VaultError::Config(format!(
                "mask character {:?} is not visible",
                self.mask_char
            )));
        }
        Ok(())
    }
}
