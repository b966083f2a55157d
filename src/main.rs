//! Main entry point for credvault.

use clap::Parser;
use colored::Colorize;
use credvault::cli::{resolve_vault_file, Cli};
use credvault::interactive::InteractiveVault;
use credvault::utils::error_exit;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    init_tracing();

    let args = std::env::args().collect::<Vec<_>>();

    // No subcommand means interactive mode
    if args.len() == 1 || (args.len() == 3 && (args[1] == "-f" || args[1] == "--file")) {
        run_interactive(&args);
    } else {
        run_cli();
    }
}

/// Diagnostics go to stderr, filtered by `CREDVAULT_LOG` (default: warn).
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CREDVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run in CLI mode.
fn run_cli() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        error_exit(&e.to_string(), 1);
    }
}

/// Run in interactive mode.
fn run_interactive(args: &[String]) {
    let explicit = if args.len() == 3 {
        Some(PathBuf::from(&args[2]))
    } else {
        std::env::var_os("VAULT_FILE").map(PathBuf::from)
    };
    let vault_path = resolve_vault_file(explicit.as_ref());

    if !(atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)) {
        eprintln!(
            "{}",
            "Interactive mode needs a terminal. Run 'credvault --help' for scriptable commands."
                .yellow()
        );
        std::process::exit(1);
    }

    match InteractiveVault::new(vault_path) {
        Ok(mut vault) => {
            if let Err(e) = vault.run() {
                error_exit(&e.to_string(), 1);
            }
        }
        Err(e) => {
            error_exit(&e.to_string(), 1);
        }
    }
}
