//! Interactive mode for vault operations.

use crate::cli::OutputFormat;
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::operations::{prompt_input, prompt_password, VaultOperations};
use crate::store::VaultStore;
use crate::utils::{self, warning};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use zeroize::Zeroize;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Add(Option<String>),
    List,
    Update(Option<String>),
    Search(Option<String>),
    Rate,
    Clear,
    Exit,
    Unknown(String),
}

impl ShellCommand {
    /// Parse a non-empty input line. Website arguments may contain spaces.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match name {
            "help" | "?" => ShellCommand::Help,
            "add" => ShellCommand::Add(arg),
            "list" | "ls" | "view" => ShellCommand::List,
            "update" => ShellCommand::Update(arg),
            "search" | "find" => ShellCommand::Search(arg),
            "rate" => ShellCommand::Rate,
            "clear" => ShellCommand::Clear,
            "exit" | "quit" => ShellCommand::Exit,
            other => ShellCommand::Unknown(other.to_string()),
        }
    }
}

/// Load the vault once and describe why it cannot be read, if it cannot.
fn startup_warning(store: &VaultStore) -> Option<String> {
    store
        .list_all()
        .err()
        .map(|e| format!("{e}. Reading commands will fail until it is repaired."))
}

/// Interactive vault shell.
pub struct InteractiveVault {
    ops: VaultOperations,
    editor: DefaultEditor,
}

impl InteractiveVault {
    /// Create a new interactive vault session.
    pub fn new(vault_path: PathBuf) -> Result<Self> {
        if vault_path.exists() {
            for warn in utils::check_file_permissions(&vault_path) {
                warning(&warn);
            }
        } else {
            println!(
                "{} {} will be created on the first add",
                "Note:".cyan(),
                vault_path.display()
            );
        }

        let store = VaultStore::new(VaultConfig::new(vault_path))?;
        let editor = DefaultEditor::new()
            .map_err(|_| VaultError::Other("Failed to create editor".to_string()))?;

        Ok(Self {
            ops: VaultOperations::new(store, OutputFormat::Text),
            editor,
        })
    }

    /// Run the interactive loop.
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        // Commands that never read the vault stay usable when it is corrupt
        if let Some(problem) = startup_warning(self.ops.store()) {
            warning(&problem);
        }

        loop {
            let prompt = format!("{} ", "vault>".cyan());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    match ShellCommand::parse(line) {
                        ShellCommand::Exit => break,
                        command => {
                            match self.execute_command(command) {
                                Ok(()) => {}
                                Err(VaultError::Cancelled) => println!("Cancelled"),
                                Err(e) => eprintln!("{} {}", "Error:".red(), e),
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("\nUse 'exit' to quit");
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye");
        Ok(())
    }

    /// Execute a command.
    fn execute_command(&self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Help => {
                self.show_help();
                Ok(())
            }
            ShellCommand::Add(website) => self.add_entry(website),
            ShellCommand::List => self.ops.list(),
            ShellCommand::Update(website) => self.update_entry(website),
            ShellCommand::Search(website) => {
                let website = self.website_or_prompt(website)?;
                self.ops.search(&website)
            }
            ShellCommand::Rate => {
                let mut password = prompt_password("Password to rate")?;
                let result = self.ops.rate(&password);
                password.zeroize();
                result.map(|_| ())
            }
            ShellCommand::Clear => {
                utils::clear_screen();
                Ok(())
            }
            ShellCommand::Exit => Ok(()),
            ShellCommand::Unknown(name) => {
                eprintln!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    name
                );
                Ok(())
            }
        }
    }

    /// Add a new entry.
    fn add_entry(&self, website: Option<String>) -> Result<()> {
        let website = self.website_or_prompt(website)?;
        let username = prompt_input("Username")?;
        let mut password = prompt_password("Password")?;
        let result = self.ops.add(&website, &username, &password);
        password.zeroize();
        result
    }

    /// Change the password of an existing website.
    fn update_entry(&self, website: Option<String>) -> Result<()> {
        let website = self.website_or_prompt(website)?;
        let mut password = prompt_password("New password")?;
        let result = self.ops.update(&website, &password);
        password.zeroize();
        result.map(|_| ())
    }

    fn website_or_prompt(&self, website: Option<String>) -> Result<String> {
        match website {
            Some(website) => Ok(website),
            None => prompt_input("Website"),
        }
    }

    /// Show help message.
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold());
        println!("  {}              - Show this help", "help".cyan());
        println!("  {} [website]     - Add a credential", "add".cyan());
        println!("  {}              - List credentials", "list".cyan());
        println!("  {} [website]  - Change a website's password", "update".cyan());
        println!("  {} [website]  - Show a website's credentials", "search".cyan());
        println!("  {}              - Rate a password", "rate".cyan());
        println!("  {}             - Clear screen", "clear".cyan());
        println!("  {}              - Exit interactive mode", "exit".cyan());
        println!();
        println!("{}", "Notes:".bold().cyan());
        println!("  • Passwords are always shown masked");
        println!("  • Website lookups ignore case");
        println!("  • The vault is encoded, not encrypted; keep the file private");
        println!();
    }

    /// Print welcome message.
    fn print_welcome(&self) {
        println!("{}", "🔒 Credential Vault".bold());
        println!("Vault: {}", self.ops.store().path().display());
        println!("Type 'help' for available commands\n");
    }
}
