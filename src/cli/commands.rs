// Passbook — CLI Command Handlers
//
// Each function handles one CLI subcommand. This is the presentation layer:
// it collects raw text fields, maps store errors to user-facing messages,
// and re-renders a fresh listing after every successful mutation (the store
// has no incremental-update contract).

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::PassbookError;
use crate::store::{
    Account, AccountStore, Database, NewAccount, SqliteAccountStore, StoreError, ValidationError,
};

use super::Commands;

/// Default directory for Passbook data files.
fn data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("passbook")
}

/// Path to the database file.
fn db_path() -> PathBuf {
    data_dir().join("passbook.db")
}

/// Execute the parsed CLI command.
pub fn execute(command: Commands) -> Result<(), PassbookError> {
    match command {
        Commands::Add {
            label,
            contact,
            secret,
        } => cmd_add(label, contact, secret),
        Commands::List { json } => cmd_list(json),
        Commands::Show { id, reveal } => cmd_show(id, reveal),
        Commands::Edit {
            id,
            label,
            contact,
            secret,
        } => cmd_edit(id, label, contact, secret),
        Commands::Delete { id } => cmd_delete(id),
    }
}

// ─── Add ─────────────────────────────────────────────────────────────────────

fn cmd_add(label: String, contact: String, secret: String) -> Result<(), PassbookError> {
    let db = open_db()?;
    let store = SqliteAccountStore::new(&db);

    let account = store
        .create(NewAccount::new(label, contact, secret))
        .map_err(friendly)?;

    println!("✓ Account stored");
    println!("  ID:    {}", account.id);
    println!("  Label: {}", account.label);
    println!();
    render_list(&store);

    Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

fn cmd_list(json: bool) -> Result<(), PassbookError> {
    let db = open_db()?;
    let store = SqliteAccountStore::new(&db);

    if json {
        // Account serialization skips the secret field entirely.
        let accounts = fetch_list(&store);
        let out = serde_json::to_string_pretty(&accounts)
            .map_err(|e| PassbookError::Other(format!("Failed to encode listing: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    render_list(&store);
    Ok(())
}

// ─── Show ────────────────────────────────────────────────────────────────────

fn cmd_show(id_str: String, reveal: bool) -> Result<(), PassbookError> {
    let id = parse_id(&id_str)?;

    let db = open_db()?;
    let store = SqliteAccountStore::new(&db);

    let accounts = fetch_list(&store);
    match accounts.iter().find(|a| a.id == id) {
        Some(account) => {
            println!("Account details:\n");
            println!("  ID:       {}", account.id);
            println!("  Label:    {}", account.label);
            println!("  Contact:  {}", account.contact);
            if reveal {
                println!("  Password: {}", account.secret());
            } else {
                println!("  Password: ******** (use --reveal to show)");
            }
            println!(
                "  Created:  {}",
                account.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "  Updated:  {}",
                account.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => {
            println!("Account not found: {}", id);
        }
    }

    Ok(())
}

// ─── Edit ────────────────────────────────────────────────────────────────────

fn cmd_edit(
    id_str: String,
    label: String,
    contact: String,
    secret: String,
) -> Result<(), PassbookError> {
    let id = parse_id(&id_str)?;

    let db = open_db()?;
    let store = SqliteAccountStore::new(&db);

    let account = store
        .update(&id, NewAccount::new(label, contact, secret))
        .map_err(friendly)?;

    println!("✓ Account {} updated", account.id);
    println!();
    render_list(&store);

    Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

fn cmd_delete(id_str: String) -> Result<(), PassbookError> {
    let id = parse_id(&id_str)?;

    let db = open_db()?;
    let store = SqliteAccountStore::new(&db);

    store.delete(&id).map_err(friendly)?;

    println!("✓ Account {} deleted", id);
    println!();
    render_list(&store);

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Open the database, creating the data directory and file on first use.
fn open_db() -> Result<Database, PassbookError> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let db = Database::open(&db_path())?;
    Ok(db)
}

fn parse_id(id_str: &str) -> Result<Uuid, PassbookError> {
    Uuid::parse_str(id_str).map_err(|e| PassbookError::Other(format!("Invalid UUID: {}", e)))
}

/// Fetch the current snapshot. A read failure is logged and degrades to an
/// empty view rather than aborting the command.
fn fetch_list(store: &SqliteAccountStore<'_>) -> Vec<Account> {
    match store.list() {
        Ok(accounts) => accounts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read accounts");
            Vec::new()
        }
    }
}

/// Render the current listing. Labels and contacts only — never passwords.
fn render_list(store: &SqliteAccountStore<'_>) {
    let accounts = fetch_list(store);

    if accounts.is_empty() {
        println!("No accounts stored yet.");
        println!("Add one with: passbook add --label <name> --contact <email> --secret <password>");
        return;
    }

    println!("Stored accounts ({}):\n", accounts.len());
    for account in &accounts {
        println!(
            "  {} │ {:16} │ {}",
            account.id, account.label, account.contact
        );
    }
}

/// Map store errors to the messages the user sees. Validation failures get
/// the two specific messages; anything else is a generic failure notice.
fn friendly(err: StoreError) -> PassbookError {
    let message = match &err {
        StoreError::Validation(ValidationError::Incomplete) => {
            "All fields must be filled out.".to_string()
        }
        StoreError::Validation(ValidationError::InvalidEmail) => {
            "Invalid email format.".to_string()
        }
        StoreError::NotFound(_) => "Account not found.".to_string(),
        StoreError::Read(_) | StoreError::Write(_) => {
            tracing::error!(error = %err, "Storage failure");
            "Storage failure — the requested change did not happen.".to_string()
        }
    };
    PassbookError::Other(message)
}
