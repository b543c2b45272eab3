//! Credentials model.
//!
//! Defines the login details and target data source a collector uses for its
//! whole lifetime.

use thiserror::Error;
use validator::Validate;

/// Login details for a Guacamole installation.
///
/// # Example
///
/// ```
/// use guacamole::Credentials;
///
/// let credentials = Credentials::new("https://guac.example.com/guacamole/", "admin", "secret", "mysql");
///
/// assert_eq!(credentials.endpoint, "https://guac.example.com/guacamole");
/// assert!(credentials.validate_credentials().is_ok());
/// ```
#[derive(Clone, Validate)]
pub struct Credentials {
    /// Base URL of the Guacamole web application, without a trailing slash.
    #[validate(url(message = "Endpoint must be a valid URL"))]
    pub endpoint: String,

    /// Username used to request tokens.
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    /// Password used to request tokens.
    pub password: String,

    /// Data source whose session data is queried (e.g. `mysql`, `postgresql`).
    #[validate(length(min = 1, message = "Data source cannot be empty"))]
    pub data_source: String,
}

/// Errors that can occur during credentials validation.
#[derive(Debug, Error)]
pub enum CredentialsValidationError {
    /// Validation failed with details.
    #[error("Invalid Guacamole credentials: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Credentials {
    /// Creates new credentials, trimming any trailing `/` from the endpoint.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        data_source: impl Into<String>,
    ) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            data_source: data_source.into(),
        }
    }

    /// Joins `path` onto the endpoint.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }

    /// Validates the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not a URL
    /// - The username or data source is empty
    pub fn validate_credentials(&self) -> Result<(), CredentialsValidationError> {
        self.validate()?;
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("data_source", &self.data_source)
            .finish()
    }
}
