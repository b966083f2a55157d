//! Shared operations between CLI and interactive modes.

use crate::cli::OutputFormat;
use crate::error::{Field, Result, VaultError};
use crate::models::CredentialView;
use crate::store::{UpdateOutcome, VaultStore};
use crate::strength::{self, StrengthReport, StrengthTier};
use crate::utils::{require_field, success, warning};
use colored::*;
use dialoguer::{Input, Password};
use zeroize::Zeroize;

/// Front-end independent vault actions: validate input, call the store, render the result.
pub struct VaultOperations {
    store: VaultStore,
    output: OutputFormat,
}

impl VaultOperations {
    /// Create an operations instance over `store`.
    pub fn new(store: VaultStore, output: OutputFormat) -> Self {
        Self { store, output }
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    /// Add a credential. Input is trimmed; blank fields are rejected before the store is called.
    pub fn add(&self, website: &str, username: &str, password: &str) -> Result<()> {
        let website = require_field(Field::Website, website)?;
        let username = require_field(Field::Username, username)?;
        let mut password = require_field(Field::Password, password)?;

        let report = strength::assess(&password);
        let stored = self.store.add(&website, &username, &password);
        password.zeroize();
        stored?;

        match self.output {
            OutputFormat::Text => {
                print_strength(&report);
                success(&format!("Credential saved for {website}"));
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "saved": true,
                "website": website,
                "strength": report,
            }))?,
        }
        Ok(())
    }

    /// Show every record with masked passwords.
    pub fn list(&self) -> Result<()> {
        let entries = self.store.list_all()?;
        match self.output {
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No credentials found.");
                } else {
                    println!("\n{}", "Saved credentials:".bold());
                    print_entries(&entries);
                }
            }
            OutputFormat::Json => print_json(&entries_json(&entries))?,
        }
        Ok(())
    }

    /// Show records for one website.
    pub fn search(&self, website: &str) -> Result<()> {
        let website = require_field(Field::Website, website)?;
        let entries = self.store.search(&website)?;
        match self.output {
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No matches found for '{website}'");
                } else {
                    println!("Found {} matches:", entries.len());
                    print_entries(&entries);
                }
            }
            OutputFormat::Json => print_json(&entries_json(&entries))?,
        }
        Ok(())
    }

    /// Set a new password on every record for `website`.
    pub fn update(&self, website: &str, new_password: &str) -> Result<UpdateOutcome> {
        let website = require_field(Field::Website, website)?;
        let mut new_password = require_field(Field::Password, new_password)?;

        let report = strength::assess(&new_password);
        let outcome = self.store.update_password(&website, &new_password);
        new_password.zeroize();
        let outcome = outcome?;

        match self.output {
            OutputFormat::Text => {
                print_strength(&report);
                match outcome {
                    UpdateOutcome::Updated { matched, .. } => success(&format!(
                        "Password updated for {matched} {} of {website}",
                        if matched == 1 { "entry" } else { "entries" }
                    )),
                    UpdateOutcome::NotFound => warning(&format!("Website not found: {website}")),
                }
            }
            OutputFormat::Json => print_json(&update_json(&website, &outcome))?,
        }
        Ok(outcome)
    }

    /// Rate a password without storing it.
    pub fn rate(&self, password: &str) -> Result<StrengthTier> {
        let mut password = require_field(Field::Password, password)?;
        let report = strength::assess(&password);
        password.zeroize();

        match self.output {
            OutputFormat::Text => print_strength(&report),
            OutputFormat::Json => print_json(&serde_json::json!(report))?,
        }
        Ok(report.tier)
    }
}

/// JSON document for a list of records.
pub fn entries_json(entries: &[CredentialView]) -> serde_json::Value {
    serde_json::json!({
        "count": entries.len(),
        "entries": entries,
    })
}

/// JSON document for an update result.
pub fn update_json(website: &str, outcome: &UpdateOutcome) -> serde_json::Value {
    match outcome {
        UpdateOutcome::Updated { matched, strength } => serde_json::json!({
            "website": website,
            "updated": matched,
            "strength": strength,
        }),
        UpdateOutcome::NotFound => serde_json::json!({
            "website": website,
            "updated": 0,
        }),
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| VaultError::Other(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_entries(entries: &[CredentialView]) {
    for entry in entries {
        println!(
            "  {} | {} | {}",
            entry.website.cyan(),
            entry.username,
            entry.masked_password
        );
    }
}

fn print_strength(report: &StrengthReport) {
    let label = report.tier.to_string();
    let label = match report.tier {
        StrengthTier::Weak => label.as_str().red(),
        StrengthTier::Medium => label.as_str().yellow(),
        StrengthTier::Strong => label.as_str().green(),
        StrengthTier::VeryStrong => label.as_str().green().bold(),
    };
    println!("Password strength: {label}");

    let hints = report.hints();
    if !hints.is_empty() {
        println!("  Consider adding: {}", hints.join(", "));
    }
}

/// Prompt for a line of text.
pub fn prompt_input(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

/// Prompt for a password twice with masked input.
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(prompt_error)
}

/// An interrupted prompt (Ctrl-C) cancels the operation; anything else is an error.
fn prompt_error(err: dialoguer::Error) -> VaultError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            VaultError::Cancelled
        }
        other => VaultError::Other(other.to_string()),
    }
}

/// Read a single line from stdin, for scripted use.
pub fn read_stdin_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
