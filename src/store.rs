//! Vault store: the on-disk file and the operations over it.
//!
//! Every operation is a complete transaction against the file. Nothing is
//! cached between calls; writes hold the sidecar lock while they run.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use zeroize::Zeroize;

use crate::codec::{CodecError, LineCodec};
use crate::config::VaultConfig;
use crate::error::{Field, Result, ValidationError, VaultError};
use crate::lock::VaultLock;
use crate::models::{Credential, CredentialView};
use crate::parser::RecordFormat;
use crate::strength::{self, StrengthTier};

/// Result of [`VaultStore::update_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// `matched` records now carry the new password.
    Updated {
        matched: usize,
        strength: StrengthTier,
    },
    /// No record has that website; the file was not touched.
    NotFound,
}

/// A decoded record together with the exact line it was read from.
struct StoredRecord {
    line: String,
    credential: Credential,
}

/// Owns one vault file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    config: VaultConfig,
    codec: LineCodec,
    format: RecordFormat,
}

impl VaultStore {
    /// Create a store for `config`.
    pub fn new(config: VaultConfig) -> Result<Self> {
        config.validate()?;
        let format = RecordFormat::new(config.delimiter.clone());
        Ok(Self {
            config,
            codec: LineCodec::new(),
            format,
        })
    }

    /// Create a store for the vault at `path` with default settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(VaultConfig::new(path.as_ref()))
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Create an empty vault file, replacing an existing one only when `force` is set.
    pub fn init(&self, force: bool) -> Result<()> {
        let _lock = VaultLock::acquire(&self.config.lock_path())?;
        if self.path().exists() && !force {
            return Err(VaultError::VaultExists(self.path().to_path_buf()));
        }
        self.rewrite(&[])?;
        tracing::info!(vault = %self.path().display(), "initialized empty vault");
        Ok(())
    }

    /// Append a new record and return the strength of its password.
    ///
    /// Duplicate websites are allowed; this never looks at existing records.
    pub fn add(&self, website: &str, username: &str, password: &str) -> Result<StrengthTier> {
        let credential = Credential::new(website, username, password)?;
        let mut line = self.format.serialize(&credential)?;
        let encoded = self.codec.encode(&line);
        line.zeroize();

        let strength = strength::rate(password);

        let _lock = VaultLock::acquire(&self.config.lock_path())?;
        self.append_line(&encoded)?;
        tracing::debug!(vault = %self.path().display(), "appended credential");
        Ok(strength)
    }

    /// All records in file order, passwords masked.
    ///
    /// A missing vault file is an empty vault. Any undecodable or malformed
    /// line fails the whole listing.
    pub fn list_all(&self) -> Result<Vec<CredentialView>> {
        let mask_char = self.config.mask_char;
        Ok(self
            .load()?
            .iter()
            .map(|record| record.credential.view(mask_char))
            .collect())
    }

    /// Records whose website equals `website_query`, ignoring case.
    pub fn search(&self, website_query: &str) -> Result<Vec<CredentialView>> {
        let mask_char = self.config.mask_char;
        Ok(self
            .load()?
            .iter()
            .filter(|record| record.credential.matches_website(website_query))
            .map(|record| record.credential.view(mask_char))
            .collect())
    }

    /// Replace the password of every record whose website equals
    /// `website_query`, ignoring case.
    ///
    /// The file is rewritten in its original order; lines that did not match
    /// are written back exactly as they were read, `\r\n` endings included.
    /// When nothing matches the file is left untouched.
    pub fn update_password(
        &self,
        website_query: &str,
        new_password: &str,
    ) -> Result<UpdateOutcome> {
        if new_password.is_empty() {
            return Err(ValidationError::EmptyField(Field::Password).into());
        }
        let strength = strength::rate(new_password);

        let _lock = VaultLock::acquire(&self.config.lock_path())?;
        let records = self.load()?;

        let mut matched = 0;
        let mut lines = Vec::with_capacity(records.len());
        for record in &records {
            if !record.credential.matches_website(website_query) {
                lines.push(record.line.clone());
                continue;
            }

            let mut updated = record.credential.clone();
            updated.password.zeroize();
            updated.password.push_str(new_password);

            let mut line = self.format.serialize(&updated)?;
            lines.push(self.codec.encode(&line));
            line.zeroize();
            matched += 1;
        }

        if matched == 0 {
            tracing::debug!(vault = %self.path().display(), "no record matched, vault untouched");
            return Ok(UpdateOutcome::NotFound);
        }

        self.rewrite(&lines)?;
        tracing::info!(
            vault = %self.path().display(),
            matched,
            total = lines.len(),
            "rewrote vault with updated passwords"
        );
        Ok(UpdateOutcome::Updated { matched, strength })
    }

    /// Read and decode every record.
    fn load(&self) -> Result<Vec<StoredRecord>> {
        let content = match fs::read(self.path()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    vault = %self.path().display(),
                    "vault file missing, treating as empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(VaultError::Storage(e)),
        };

        let mut records = Vec::new();
        if content.is_empty() {
            return Ok(records);
        }
        let body = content.strip_suffix(b"\n").unwrap_or(&content[..]);

        for (index, raw) in body.split(|&byte| byte == b'\n').enumerate() {
            let line_number = index + 1;
            // Kept with any `\r` so untouched lines are rewritten byte-for-byte.
            let line = std::str::from_utf8(raw).map_err(|e| VaultError::Codec {
                line: line_number,
                source: CodecError::from(e),
            })?;
            if line.trim().is_empty() {
                tracing::warn!(line = line_number, "skipping blank line in vault");
                continue;
            }

            let mut decoded = self.codec.decode(line).map_err(|source| VaultError::Codec {
                line: line_number,
                source,
            })?;
            let parsed = self.format.parse(&decoded);
            decoded.zeroize();
            let credential = parsed.map_err(|source| VaultError::Format {
                line: line_number,
                source,
            })?;

            records.push(StoredRecord {
                line: line.to_string(),
                credential,
            });
        }

        tracing::debug!(
            vault = %self.path().display(),
            records = records.len(),
            "loaded vault"
        );
        Ok(records)
    }

    /// Append one encoded line, creating the file if needed.
    fn append_line(&self, encoded: &str) -> Result<()> {
        let mut options = OpenOptions::new();
        options.read(true).append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(self.path())?;

        let mut record = String::with_capacity(encoded.len() + 2);
        if file.metadata()?.len() > 0 {
            // Never glue a record onto a line that lost its terminator.
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                record.push('\n');
            }
        }
        record.push_str(encoded);
        record.push('\n');

        file.write_all(record.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Atomically replace the vault with `lines` (tempfile + fsync + rename).
    fn rewrite(&self, lines: &[String]) -> Result<()> {
        let dir = match self.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = tempfile::Builder::new()
            .prefix(".credvault-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        for line in lines {
            writeln!(temp_file, "{line}")?;
        }
        // Flush and fsync so the rename, if it succeeds, points at a complete file.
        temp_file.flush()?;
        temp_file.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = temp_file.as_file().metadata()?.permissions();
            perms.set_mode(0o600);
            temp_file.as_file().set_permissions(perms)?;
        }

        temp_file
            .persist(self.path())
            .map_err(|e| VaultError::Storage(e.error))?;
        Ok(())
    }
}
