// Passbook — Account Store Repository
//
// Implements CRUD operations on the account database. Every mutation path
// funnels through validation before anything is written: completeness is
// checked first, then email syntax, so an input that fails both is reported
// as incomplete.

use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use super::db::Database;
use super::models::{Account, NewAccount};
use super::{StoreError, ValidationError};
use crate::validate;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over account storage. The presentation layer consumes exactly
/// these four operations and refreshes its view with a fresh `list()` after
/// every successful mutation.
pub trait AccountStore {
    /// Snapshot of every stored account. The ordering is deterministic for a
    /// given set of contents but not part of the contract.
    fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Validate and persist a new account. Returns the stored record with
    /// its generated id.
    fn create(&self, input: NewAccount) -> Result<Account, StoreError>;

    /// Replace the three textual fields of an existing account, preserving
    /// its identity. Returns the updated record.
    fn update(&self, id: &Uuid, input: NewAccount) -> Result<Account, StoreError>;

    /// Permanently remove an account. Deleting an unknown id is an error,
    /// not a silent no-op.
    fn delete(&self, id: &Uuid) -> Result<(), StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteAccountStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteAccountStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Reject the input before any mutation is attempted. Completeness
    /// first, then email syntax.
    fn validate(input: &NewAccount) -> Result<(), StoreError> {
        if !validate::is_complete(&input.label, &input.contact, &input.secret) {
            return Err(ValidationError::Incomplete.into());
        }
        if !validate::is_valid_email(&input.contact) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }

    /// Parse an account row from the database.
    fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
        let id_str: String = row.get(0)?;
        let label: String = row.get(1)?;
        let contact: String = row.get(2)?;
        let secret: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Account::new(
            id, label, contact, secret, created_at, updated_at,
        ))
    }

    /// Point lookup by id, used internally by `update`.
    fn fetch(&self, id: &Uuid) -> Result<Option<Account>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare(
                "SELECT id, label, contact, secret, created_at, updated_at
                 FROM accounts WHERE id = ?1",
            )
            .map_err(StoreError::Read)?;

        let mut rows = stmt
            .query_map(params![id.to_string()], Self::row_to_account)
            .map_err(StoreError::Read)?;

        match rows.next() {
            Some(Ok(account)) => Ok(Some(account)),
            Some(Err(e)) => Err(StoreError::Read(e)),
            None => Ok(None),
        }
    }
}

impl<'a> AccountStore for SqliteAccountStore<'a> {
    fn list(&self) -> Result<Vec<Account>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare(
                "SELECT id, label, contact, secret, created_at, updated_at
                 FROM accounts ORDER BY created_at DESC, id",
            )
            .map_err(StoreError::Read)?;

        let rows = stmt
            .query_map([], Self::row_to_account)
            .map_err(StoreError::Read)?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row.map_err(StoreError::Read)?);
        }

        Ok(accounts)
    }

    fn create(&self, input: NewAccount) -> Result<Account, StoreError> {
        Self::validate(&input)?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        // Single-row insert: either the whole record lands or none of it
        // does, so a later `list()` never sees a partial write.
        self.db
            .conn()
            .execute(
                "INSERT INTO accounts (id, label, contact, secret, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id.to_string(),
                    input.label,
                    input.contact,
                    input.secret,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .map_err(StoreError::Write)?;

        tracing::info!(account_id = %id, label = %input.label, "Account stored");

        Ok(Account::new(
            id,
            input.label,
            input.contact,
            input.secret,
            now,
            now,
        ))
    }

    fn update(&self, id: &Uuid, input: NewAccount) -> Result<Account, StoreError> {
        Self::validate(&input)?;

        let existing = self.fetch(id)?.ok_or(StoreError::NotFound(*id))?;
        let now = Utc::now();

        self.db
            .conn()
            .execute(
                "UPDATE accounts
                 SET label = ?2, contact = ?3, secret = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    id.to_string(),
                    input.label,
                    input.contact,
                    input.secret,
                    now.to_rfc3339(),
                ],
            )
            .map_err(StoreError::Write)?;

        tracing::info!(account_id = %id, "Account updated");

        Ok(Account::new(
            *id,
            input.label,
            input.contact,
            input.secret,
            existing.created_at,
            now,
        ))
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let affected = self
            .db
            .conn()
            .execute("DELETE FROM accounts WHERE id = ?1", params![id.to_string()])
            .map_err(StoreError::Write)?;

        if affected == 0 {
            return Err(StoreError::NotFound(*id));
        }

        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> (Database, Uuid) {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        let account = store
            .create(NewAccount::new("GitHub", "user@example.com", "hunter2"))
            .unwrap();
        let id = account.id;
        (db, id)
    }

    #[test]
    fn test_create_returns_record_with_v4_id() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        let account = store
            .create(NewAccount::new("Email", "user@example.com", "hunch8!"))
            .unwrap();

        assert_eq!(account.id.get_version(), Some(uuid::Version::Random));
        assert_eq!(account.label, "Email");
        assert_eq!(account.contact, "user@example.com");
        assert_eq!(account.secret(), "hunch8!");
    }

    #[test]
    fn test_create_rejects_incomplete_input() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        for input in [
            NewAccount::new("", "a@b.co", "x"),
            NewAccount::new("Email", "", "x"),
            NewAccount::new("Email", "a@b.co", ""),
        ] {
            let err = store.create(input).unwrap_err();
            assert!(matches!(
                err,
                StoreError::Validation(ValidationError::Incomplete)
            ));
        }

        // Nothing was written.
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_invalid_email() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        let err = store
            .create(NewAccount::new("Email", "not-an-email", "x"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidEmail)
        ));

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_incomplete_wins_over_invalid_email() {
        // An input that is both incomplete and syntactically invalid is
        // reported as incomplete: completeness is checked first.
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        let err = store
            .create(NewAccount::new("", "not-an-email", "x"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Incomplete)
        ));
    }

    #[test]
    fn test_created_account_appears_in_list() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, id);
        assert_eq!(accounts[0].label, "GitHub");
        assert_eq!(accounts[0].contact, "user@example.com");
        assert_eq!(accounts[0].secret(), "hunter2");
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        for i in 0..5 {
            store
                .create(NewAccount::new(
                    format!("Service {}", i),
                    "user@example.com",
                    "pw",
                ))
                .unwrap();
        }

        let accounts = store.list().unwrap();
        let mut ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5, "Every stored account must have a unique id");
    }

    #[test]
    fn test_update_replaces_fields_and_preserves_id() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        let updated = store
            .update(&id, NewAccount::new("GitLab", "other@example.org", "swordfish"))
            .unwrap();

        assert_eq!(updated.id, id, "Identity never changes on update");
        assert_eq!(updated.label, "GitLab");
        assert_eq!(updated.contact, "other@example.org");
        assert_eq!(updated.secret(), "swordfish");

        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, id);
        assert_eq!(accounts[0].label, "GitLab");
    }

    #[test]
    fn test_update_leaves_other_records_untouched() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        let other = store
            .create(NewAccount::new("Slack", "team@example.com", "xoxb"))
            .unwrap();

        store
            .update(&id, NewAccount::new("GitLab", "other@example.org", "pw2"))
            .unwrap();

        let accounts = store.list().unwrap();
        let untouched = accounts.iter().find(|a| a.id == other.id).unwrap();
        assert_eq!(untouched.label, "Slack");
        assert_eq!(untouched.contact, "team@example.com");
        assert_eq!(untouched.secret(), "xoxb");
    }

    #[test]
    fn test_update_validates_before_touching_store() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        let err = store
            .update(&id, NewAccount::new("GitLab", "", "pw"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Incomplete)
        ));

        // The stored record is unchanged.
        let accounts = store.list().unwrap();
        assert_eq!(accounts[0].label, "GitHub");
        assert_eq!(accounts[0].secret(), "hunter2");
    }

    #[test]
    fn test_update_nonexistent_returns_not_found() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        let missing = Uuid::new_v4();
        let err = store
            .update(&missing, NewAccount::new("X", "a@b.co", "pw"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    }

    #[test]
    fn test_delete_removes_account() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        store.delete(&id).unwrap();

        let accounts = store.list().unwrap();
        assert!(
            accounts.iter().all(|a| a.id != id),
            "Deleted account must not appear in list"
        );
    }

    #[test]
    fn test_delete_nonexistent_returns_not_found() {
        let (db, id) = setup_store();
        let store = SqliteAccountStore::new(&db);

        let missing = Uuid::new_v4();
        let err = store.delete(&missing).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(e) if e == missing));

        // The existing record is untouched.
        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, id);
    }

    #[test]
    fn test_list_is_idempotent() {
        let (db, _id) = setup_store();
        let store = SqliteAccountStore::new(&db);
        store
            .create(NewAccount::new("Slack", "team@example.com", "xoxb"))
            .unwrap();

        let first = store.list().unwrap();
        let second = store.list().unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.label, b.label);
            assert_eq!(a.contact, b.contact);
            assert_eq!(a.secret(), b.secret());
        }
    }

    #[test]
    fn test_full_crud_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteAccountStore::new(&db);

        // Create
        let account = store
            .create(NewAccount::new("Email", "user@example.com", "hunch8!"))
            .unwrap();
        let id = account.id;

        // Read
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);

        // Update
        let updated = store
            .update(&id, NewAccount::new("Email", "user@example.com", "new-pw"))
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, account.created_at);

        // Delete
        store.delete(&id).unwrap();
        assert!(store.list().unwrap().is_empty());

        // A second delete reports the missing id.
        assert!(matches!(
            store.delete(&id).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }
}
