use std::env;

use thiserror::Error;

pub const TOKEN_ENV_VAR: &str = "TIMESHEET_API_TOKEN";

/// OAuth access token for the back-office org.
#[derive(Clone)]
pub struct Credentials {
    access_token: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("TIMESHEET_API_TOKEN is not set")]
    MissingToken,
    #[error("TIMESHEET_API_TOKEN is empty")]
    EmptyToken,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Result<Self, CredentialsError> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(CredentialsError::EmptyToken);
        }
        Ok(Self { access_token })
    }

    /// Read the token from `TIMESHEET_API_TOKEN`.
    pub fn from_env() -> Result<Self, CredentialsError> {
        let token = env::var(TOKEN_ENV_VAR).map_err(|_| CredentialsError::MissingToken)?;
        Self::new(token)
    }

    pub fn as_bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}
