//! credvault: an offline credential vault with Base64-obfuscated storage.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod interactive;
pub mod lock;
pub mod models;
pub mod operations;
pub mod parser;
pub mod store;
pub mod strength;
pub mod utils;

// Re-export commonly used types
pub use config::VaultConfig;
pub use error::{Result, VaultError};
pub use models::{Credential, CredentialView};
pub use store::{UpdateOutcome, VaultStore};
pub use strength::StrengthTier;
