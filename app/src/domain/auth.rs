//! Login form values.
//!
//! Both fields must be filled in before the form can be submitted, and the
//! session controller refuses blank input without contacting the listing
//! service. The password is wiped from memory when the credentials drop.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Why a login form cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// The username field is empty or only whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The password field is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A filled-in login form.
///
/// The username is stored trimmed. The password is stored exactly as typed,
/// surrounding whitespace included.
///
/// # Examples
/// ```
/// use home_unlock::domain::{LoginCredentials, LoginValidationError};
///
/// let creds = LoginCredentials::try_from_parts(" test ", "password").expect("filled in");
/// assert_eq!(creds.username(), "test");
/// assert_eq!(
///     LoginCredentials::try_from_parts("test", ""),
///     Err(LoginValidationError::EmptyPassword)
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Check form values without building credentials.
    pub fn validate(username: &str, password: &str) -> Result<(), LoginValidationError> {
        match (username.trim().is_empty(), password.is_empty()) {
            (true, _) => Err(LoginValidationError::EmptyUsername),
            (false, true) => Err(LoginValidationError::EmptyPassword),
            (false, false) => Ok(()),
        }
    }

    /// Build credentials from the raw form fields.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        Self::validate(username, password)?;
        Ok(Self {
            username: username.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::blank_username("", "password", LoginValidationError::EmptyUsername)]
    #[case::whitespace_username(" \t ", "password", LoginValidationError::EmptyUsername)]
    #[case::both_blank("", "", LoginValidationError::EmptyUsername)]
    #[case::blank_password("test", "", LoginValidationError::EmptyPassword)]
    fn incomplete_forms_are_refused(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(LoginCredentials::validate(username, password), Err(expected));
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn whitespace_password_is_kept_verbatim() {
        let creds = LoginCredentials::try_from_parts("  test\n", "  ").expect("filled in");
        assert_eq!(creds.username(), "test");
        assert_eq!(creds.password(), "  ");
    }

    #[rstest]
    #[case::leading_space(" test")]
    #[case::trailing_newline("test\n")]
    #[case::both_sides("\ttest  ")]
    fn username_is_trimmed(#[case] username: &str) {
        let creds = LoginCredentials::try_from_parts(username, "password").expect("filled in");
        assert_eq!(creds.username(), "test");
        assert_eq!(creds.password(), "password");
    }

    #[rstest]
    fn debug_output_omits_the_password() {
        let creds = LoginCredentials::try_from_parts("test", "hunter2").expect("filled in");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("test"));
        assert!(!rendered.contains("hunter2"));
    }
}
