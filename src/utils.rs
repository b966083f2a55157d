//! Utility functions for the command-line front ends.

use crate::error::{Field, Result, ValidationError};
use colored::*;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File names searched for when no vault path is given.
const VAULT_FILE_NAMES: &[&str] = &["vault.txt", ".vault.txt"];

/// Trim user input and reject it if nothing is left.
pub fn require_field(field: Field, input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field).into());
    }
    Ok(trimmed.to_string())
}

/// Find a vault file in `start` or one of its parents.
pub fn find_vault_file_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        VAULT_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Find a vault file in the current directory or parents.
pub fn find_vault_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_vault_file_from(&current_dir)
}

/// Check file permissions and return warnings.
pub fn check_file_permissions(path: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    #[cfg(unix)]
    {
        if let Ok(metadata) = std::fs::metadata(path) {
            let mode = metadata.permissions().mode();

            // Check if group or others have any permissions
            if mode & 0o077 != 0 {
                warnings.push(format!(
                    "File has insecure permissions: {:o}. Run 'chmod 600 {}' to fix.",
                    mode & 0o777,
                    path.display()
                ));
            }
        }
    }

    warnings
}

/// Print an error message and exit.
pub fn error_exit(message: &str, code: i32) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(code);
}

/// Print a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning message.
pub fn warning(message: &str) {
    println!("{} {}", "Warning:".yellow(), message);
}

/// Clear the terminal screen.
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    use std::io::{self, Write};
    let _ = io::stdout().flush();
}
