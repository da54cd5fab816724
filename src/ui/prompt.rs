//! Interactive password prompt

use dialoguer::Password;

use crate::error::{Result, VcaError};

/// Ask for a password without echoing it
pub fn prompt_password() -> Result<String> {
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| VcaError::Validation(format!("Failed to read password: {}", e)))
}
