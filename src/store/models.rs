// Passbook — Account data models
//
// SECURITY: the `secret` field is intentionally private. It is never
// included in Debug output, Display output, log messages, or serialized
// responses. Access goes through the explicit `secret()` getter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use zeroize::Zeroizing;

/// A stored login record. The `secret` field is private — access only via
/// `secret()` — and is zeroed in memory when the record is dropped.
#[derive(Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub label: String,
    pub contact: String,
    /// The stored password — never printed, logged, or serialized.
    #[serde(skip)]
    secret: Zeroizing<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        id: Uuid,
        label: String,
        contact: String,
        secret: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            label,
            contact,
            secret: Zeroizing::new(secret),
            created_at,
            updated_at,
        }
    }

    /// Access the raw stored password. Callers decide whether it may be
    /// shown; nothing else in the crate prints it.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Custom Debug implementation that never reveals the secret.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("contact", &self.contact)
            .field("secret", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} — {}", self.id, self.label, self.contact)
    }
}

/// Input for creating or updating an account: the three raw text fields as
/// collected from the user, unvalidated and untrimmed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub label: String,
    pub contact: String,
    pub secret: String,
}

impl NewAccount {
    pub fn new(
        label: impl Into<String>,
        contact: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            contact: contact.into(),
            secret: secret.into(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(secret: &str) -> Account {
        Account::new(
            Uuid::new_v4(),
            "GitHub".to_string(),
            "user@example.com".to_string(),
            secret.to_string(),
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_account_debug_redacts_secret() {
        let account = sample("hunter2-super-secret");

        let debug_output = format!("{:?}", account);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output must contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("hunter2-super-secret"),
            "Debug output must NEVER contain the raw secret"
        );
    }

    #[test]
    fn test_account_display_does_not_contain_secret() {
        let account = sample("hunter2-super-secret");

        let display_output = format!("{}", account);
        assert!(!display_output.contains("hunter2-super-secret"));
        assert!(display_output.contains("GitHub"), "Should show label");
        assert!(
            display_output.contains("user@example.com"),
            "Should show contact"
        );
    }

    #[test]
    fn test_account_json_has_no_secret_field() {
        let account = sample("hunter2-super-secret");

        let json = serde_json::to_string(&account).unwrap();
        assert!(
            !json.contains("secret"),
            "Serialized account must not contain any secret field"
        );
        assert!(json.contains("GitHub"));
    }

    #[test]
    fn test_secret_accessor_returns_raw_value() {
        let account = sample("my-password-123");
        assert_eq!(account.secret(), "my-password-123");
    }
}
