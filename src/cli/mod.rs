// Passbook — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: add, list, show, edit, delete.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// Passbook — a single-user local credential manager.
#[derive(Parser, Debug)]
#[command(name = "passbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new account record.
    Add {
        /// Name of the account or service (e.g., "GitHub", "Email").
        #[arg(long)]
        label: String,

        /// Email address or username for the account.
        #[arg(long)]
        contact: String,

        /// The password to store.
        #[arg(long)]
        secret: String,
    },

    /// List all stored accounts (labels and contacts only, no passwords).
    List {
        /// Emit the list as JSON (passwords are never included).
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one account.
    Show {
        /// The UUID of the account to show.
        id: String,

        /// Print the stored password instead of a placeholder.
        #[arg(long)]
        reveal: bool,
    },

    /// Edit an existing account record.
    Edit {
        /// The UUID of the account to edit.
        id: String,

        /// New account/service name.
        #[arg(long)]
        label: String,

        /// New email address or username.
        #[arg(long)]
        contact: String,

        /// New password.
        #[arg(long)]
        secret: String,
    },

    /// Delete an account by ID.
    Delete {
        /// The UUID of the account to delete.
        id: String,
    },
}
