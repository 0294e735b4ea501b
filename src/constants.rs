/// Storage key holding the JSON array of every account
pub const ACCOUNTS_KEY: &str = "account$";

/// Storage key holding the JSON array of every authentication record
pub const AUTHNS_KEY: &str = "authn$";

/// Minimum accepted password length (characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Pattern used by browsers for `<input type="email">` basic validation
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// File extension used by the flat-file storage driver
pub const FILE_STORE_EXTENSION: &str = "json";

/// File name of the redb database inside the data directory
pub const REDB_FILE_NAME: &str = "taskboard.redb";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_EMAIL_REQUIRED: &str = "Email is required";

pub const ERR_EMAIL_INVALID: &str = "Please enter a valid email address.";

pub const ERR_PASSWORD_REQUIRED: &str = "Password is required.";

pub const ERR_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";

pub const ERR_BOARD_NAME_REQUIRED: &str = "Board name is required";
