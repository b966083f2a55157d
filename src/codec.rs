//! Line codec for records at rest.
//!
//! Records are stored as standard Base64 of their UTF-8 bytes. This is
//! obfuscation, not encryption: anyone with the file can decode it.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// Errors raised while decoding a stored line.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Decoded record is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Stored line is not valid UTF-8")]
    InvalidLineUtf8(#[from] std::str::Utf8Error),
}

/// Reversible transform between a serialized record and its stored line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl LineCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Encode a plaintext record. The output never contains a line break.
    pub fn encode(&self, plaintext: &str) -> String {
        STANDARD.encode(plaintext.as_bytes())
    }

    /// Decode a stored line back into its plaintext record.
    pub fn decode(&self, encoded: &str) -> Result<String, CodecError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Ok(String::from_utf8(bytes)?)
    }
}
