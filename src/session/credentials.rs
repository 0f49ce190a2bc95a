//! Credential collection and the non-emptiness check that gates a download.
//!
//! Credentials are never transmitted or verified against anything; the only
//! rule is that both fields are non-blank after trimming.

use std::fmt;

use thiserror::Error;

use super::constants::{CODE_REQUIRED, NAME_REQUIRED};

/// Display name and access code collected before a download starts.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    display_name: String,
    access_code: String,
}

impl Credentials {
    /// Trims both fields and checks that neither is blank.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] carrying a message for every blank field.
    pub fn validate(display_name: &str, access_code: &str) -> Result<Self, CredentialError> {
        let display_name = display_name.trim();
        let access_code = access_code.trim();

        let error = CredentialError {
            name: display_name.is_empty().then_some(NAME_REQUIRED),
            code: access_code.is_empty().then_some(CODE_REQUIRED),
        };
        if error.name.is_some() || error.code.is_some() {
            return Err(error);
        }

        Ok(Self {
            display_name: display_name.to_string(),
            access_code: access_code.to_string(),
        })
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn access_code(&self) -> &str {
        &self.access_code
    }
}

// Access codes stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("display_name", &self.display_name)
            .field("access_code", &"<redacted>")
            .finish()
    }
}

/// Field-specific validation failure. Recoverable: the form is re-displayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.messages().join("; "))]
pub struct CredentialError {
    /// Message for the display-name field, if it was blank.
    pub name: Option<&'static str>,
    /// Message for the access-code field, if it was blank.
    pub code: Option<&'static str>,
}

impl CredentialError {
    /// All field messages, name first.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.name.into_iter().chain(self.code).collect()
    }
}
