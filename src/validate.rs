// Passbook — Record validation
//
// Pure acceptance checks consulted by the account store before any
// create/update is committed. Both functions are total: they never fail,
// only return false. Callers check completeness first, then email syntax,
// so an incomplete-and-invalid input is reported as incomplete.

use std::sync::LazyLock;

use regex::Regex;

// Whole-string match: local-part @ domain . tld (tld at least two letters).
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// True iff all three fields are non-empty, exactly as given (no trimming —
/// the empty string is the only rejection condition).
pub fn is_complete(label: &str, contact: &str, secret: &str) -> bool {
    !label.is_empty() && !contact.is_empty() && !secret.is_empty()
}

/// True iff `contact` is syntactically a valid email address.
///
/// This is applied to every contact value, including ones that hold a plain
/// username rather than an email. Syntax only — no DNS or mailbox checks.
pub fn is_valid_email(contact: &str) -> bool {
    EMAIL_RE.is_match(contact)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
