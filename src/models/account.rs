use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    EMAIL_PATTERN, ERR_EMAIL_INVALID, ERR_EMAIL_REQUIRED, ERR_PASSWORD_REQUIRED,
    ERR_PASSWORD_TOO_SHORT, MIN_PASSWORD_LENGTH,
};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// Account record stored in the `account$` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Generated on creation, never changes
    pub id: String,
    /// Unique across all accounts
    pub email: String,
}

impl AccountRecord {
    /// Create a record with a freshly generated id
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
        }
    }

    /// Check an email address the way an `<input type="email">` would.
    ///
    /// Returns the message to show the user, or `None` when the address is acceptable.
    pub fn validate_email(email: &str) -> Option<&'static str> {
        if email.is_empty() {
            return Some(ERR_EMAIL_REQUIRED);
        }
        if !EMAIL_REGEX.is_match(email) {
            return Some(ERR_EMAIL_INVALID);
        }
        None
    }

    /// Check a candidate password against the minimum policy
    pub fn validate_password(password: &str) -> Option<&'static str> {
        if password.is_empty() {
            return Some(ERR_PASSWORD_REQUIRED);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Some(ERR_PASSWORD_TOO_SHORT);
        }
        None
    }
}

/// Authentication record stored in the `authn$` collection.
///
/// `id` is the owning [`AccountRecord`]'s id; `hash` is a PHC-format password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnRecord {
    pub id: String,
    pub hash: String,
}
