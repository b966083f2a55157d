//! Command-line interface implementation.

use crate::config::{VaultConfig, DEFAULT_VAULT_FILE};
use crate::error::Result;
use crate::operations::{prompt_input, prompt_password, read_stdin_line, VaultOperations};
use crate::store::VaultStore;
use crate::utils::{self, success, warning};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroize;

/// Offline credential vault with masked listing and password strength rating.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to vault file
    #[arg(
        short = 'f',
        long,
        global = true,
        env = "VAULT_FILE",
        help = "Path to vault file (default: searches for vault.txt)"
    )]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long,
        global = true,
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty vault
    Init {
        /// Force overwrite if vault exists
        #[arg(long)]
        force: bool,
    },

    /// Add a credential
    Add {
        /// Website the credential belongs to
        website: String,

        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Read the password from the first line of stdin
        #[arg(short = 'i', long)]
        stdin: bool,
    },

    /// List all credentials with masked passwords
    #[command(alias = "ls")]
    List,

    /// Change the password of every credential for a website
    Update {
        /// Website to update (case-insensitive)
        website: String,

        /// Read the new password from the first line of stdin
        #[arg(short = 'i', long)]
        stdin: bool,
    },

    /// Show the credentials for a website
    Search {
        /// Website to look up (case-insensitive)
        website: String,
    },

    /// Rate a password without storing it
    Rate {
        /// Read the password from the first line of stdin
        #[arg(short = 'i', long)]
        stdin: bool,
    },
}

impl Cli {
    /// Get the vault file path.
    pub fn get_vault_file(&self) -> PathBuf {
        resolve_vault_file(self.file.as_ref())
    }

    /// Execute the CLI command.
    pub fn execute(&self) -> Result<()> {
        let vault_path = self.get_vault_file();
        let store = VaultStore::new(VaultConfig::new(vault_path))?;

        for warn in utils::check_file_permissions(store.path()) {
            match self.output {
                OutputFormat::Text => warning(&warn),
                OutputFormat::Json => tracing::warn!("{warn}"),
            }
        }
        let ops = VaultOperations::new(store, self.output);

        match &self.command {
            Commands::Init { force } => self.init_vault(ops.store(), *force),
            Commands::Add {
                website,
                username,
                stdin,
            } => {
                let username = match username {
                    Some(username) => username.clone(),
                    None => prompt_input("Username")?,
                };
                let mut password = read_password(*stdin, "Password")?;
                let result = ops.add(website, &username, &password);
                password.zeroize();
                result
            }
            Commands::List => ops.list(),
            Commands::Update { website, stdin } => {
                let mut password = read_password(*stdin, "New password")?;
                let result = ops.update(website, &password);
                password.zeroize();
                result.map(|_| ())
            }
            Commands::Search { website } => ops.search(website),
            Commands::Rate { stdin } => {
                let mut password = read_password(*stdin, "Password")?;
                let result = ops.rate(&password);
                password.zeroize();
                result.map(|_| ())
            }
        }
    }

    /// Initialize a new vault.
    fn init_vault(&self, store: &VaultStore, force: bool) -> Result<()> {
        store.init(force)?;
        match self.output {
            OutputFormat::Text => {
                success(&format!("Vault initialized at {}", store.path().display()))
            }
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({ "initialized": store.path().display().to_string() })
            ),
        }
        Ok(())
    }
}

/// Pick the vault file: explicit path, then a search upwards, then the default name.
pub fn resolve_vault_file(explicit: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        path.clone()
    } else if let Some(path) = utils::find_vault_file() {
        path
    } else {
        PathBuf::from(DEFAULT_VAULT_FILE)
    }
}

fn read_password(stdin: bool, prompt: &str) -> Result<String> {
    if stdin {
        read_stdin_line()
    } else {
        prompt_password(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["credvault", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.output, OutputFormat::Text);

        let cli = Cli::try_parse_from([
            "credvault",
            "-f",
            "/tmp/v.txt",
            "add",
            "example.com",
            "-u",
            "alice",
            "--stdin",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/v.txt")));
        match cli.command {
            Commands::Add {
                website,
                username,
                stdin,
            } => {
                assert_eq!(website, "example.com");
                assert_eq!(username.as_deref(), Some("alice"));
                assert!(stdin);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_output_flag() {
        let cli =
            Cli::try_parse_from(["credvault", "search", "example.com", "-o", "json"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_update_requires_website() {
        assert!(Cli::try_parse_from(["credvault", "update"]).is_err());
    }

    #[test]
    fn test_init_force_is_long_only() {
        let cli = Cli::try_parse_from(["credvault", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/somewhere/else.txt");
        assert_eq!(resolve_vault_file(Some(&explicit)), explicit);
    }
}
