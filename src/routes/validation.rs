use crate::constants::ERR_BOARD_NAME_REQUIRED;
use crate::error::AppError;
use crate::models::AccountRecord;

/// Validate the credential pair sent by the signup and login forms.
///
/// The email problem is reported first, matching the order of the form fields.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if let Some(msg) = AccountRecord::validate_email(email) {
        return Err(AppError::InvalidInput(msg.to_string()));
    }

    if let Some(msg) = AccountRecord::validate_password(password) {
        return Err(AppError::InvalidInput(msg.to_string()));
    }

    Ok(())
}

pub fn validate_board_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput(ERR_BOARD_NAME_REQUIRED.to_string()));
    }
    Ok(())
}
