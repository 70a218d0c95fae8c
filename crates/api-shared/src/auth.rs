use simplifier_core::{StaticAuth, UserInfo};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Optional header carrying the signed-in user's e-mail for display.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing x-api-key header")]
    MissingApiKey,
    #[error("Invalid API key")]
    InvalidApiKey,
}

/// Validates the provided API key against the key configured at startup.
///
/// Returns `Ok(())` if the key is valid, or an error if invalid or missing.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: &str) -> Result<(), AuthError> {
    let provided_key = provided_key.ok_or(AuthError::MissingApiKey)?;

    if provided_key == expected_key {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}

/// Signs the caller in with the optional display e-mail if the key is valid.
///
/// # Errors
///
/// Returns the [`AuthError`] from [`validate_api_key`].
pub fn sign_in(
    provided_key: Option<&str>,
    user_email: Option<&str>,
    expected_key: &str,
) -> Result<StaticAuth, AuthError> {
    validate_api_key(provided_key, expected_key)?;
    Ok(StaticAuth::signed_in(UserInfo {
        email: user_email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_owned),
    }))
}

/// Resolves request credentials into an auth provider for the view gate.
///
/// A valid key signs the caller in; anything else is signed out.
pub fn authenticate(
    provided_key: Option<&str>,
    user_email: Option<&str>,
    expected_key: &str,
) -> StaticAuth {
    sign_in(provided_key, user_email, expected_key).unwrap_or_else(|e| {
        tracing::debug!("authentication failed: {}", e);
        StaticAuth::signed_out()
    })
}
