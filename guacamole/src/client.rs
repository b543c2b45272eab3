//! HTTP client for the Guacamole REST API.
//!
//! Covers the token lifecycle (`POST`/`DELETE /api/tokens`) and authenticated
//! reads of the session data endpoints. The token is always passed as the
//! `token` query parameter, which is what Guacamole expects.

use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::{AuthError, ClientError, FetchError};
use crate::extract::Shape;
use crate::models::{AuthToken, Credentials, MetricName, TokenGrant};

/// Path of the token endpoint, relative to the Guacamole base URL.
pub const TOKEN_API: &str = "/api/tokens";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A session data resource queried on every scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `history/connections`, a list of past connections.
    ConnectionHistory,
    /// `users`, a map of username to user details.
    Users,
    /// `activeConnections`, a map of connection id to connection details.
    ActiveConnections,
}

impl Resource {
    /// Every resource, in emission order.
    pub const ALL: [Self; 3] = [
        Self::ConnectionHistory,
        Self::Users,
        Self::ActiveConnections,
    ];

    /// Short name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionHistory => "connection_history",
            Self::Users => "users",
            Self::ActiveConnections => "active_connections",
        }
    }

    /// API path for this resource under `data_source`.
    #[must_use]
    pub fn path(self, data_source: &str) -> String {
        let tail = match self {
            Self::ConnectionHistory => "history/connections",
            Self::Users => "users",
            Self::ActiveConnections => "activeConnections",
        };
        format!("/api/session/data/{data_source}/{tail}")
    }

    /// Top-level shape of the payload.
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Self::ConnectionHistory => Shape::List,
            Self::Users | Self::ActiveConnections => Shape::Map,
        }
    }

    /// Metric the resource's count is reported as.
    #[must_use]
    pub const fn metric(self) -> MetricName {
        match self {
            Self::ConnectionHistory => MetricName::ConnectionHistoryTotal,
            Self::Users => MetricName::UserCount,
            Self::ActiveConnections => MetricName::ActiveConnectionCount,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guacamole API client.
///
/// Built once at startup and shared by every collection cycle. Cloning is
/// cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct GuacamoleClient {
    http: Client,
}

impl GuacamoleClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend or resolver cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("guacamole-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http })
    }

    /// Logs in and returns the full token grant.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails or its body cannot be read
    /// - The server answers with a non-success status
    /// - The body is not JSON
    /// - The body carries an empty `authToken`
    pub async fn login(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenGrant, AuthError> {
        let response = self
            .http
            .post(format!("{endpoint}{TOKEN_API}"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }

        let body = response.bytes().await?;
        let grant: TokenGrant = serde_json::from_slice(&body)?;

        if grant.auth_token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        Ok(grant)
    }

    /// Requests a fresh auth token for `credentials`.
    ///
    /// A grant that does not list the configured data source is accepted
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`GuacamoleClient::login`].
    pub async fn acquire_token(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        let grant = self
            .login(
                &credentials.endpoint,
                &credentials.username,
                &credentials.password,
            )
            .await?;

        if !grant.grants_access_to(&credentials.data_source) {
            tracing::warn!(
                data_source = %credentials.data_source,
                available = ?grant.available_data_sources,
                "Configured data source is not available to this user"
            );
        }

        Ok(AuthToken::new(grant.auth_token))
    }

    /// Revokes `token`. Best-effort: failures are logged and swallowed.
    pub async fn release_token(&self, endpoint: &str, token: &AuthToken) {
        let Some(url) = token_url(endpoint, token) else {
            tracing::warn!("Token release skipped, endpoint is not a base URL");
            return;
        };

        let result = self.http.delete(url).send().await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::trace!("Auth token released");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Token release rejected");
            }
            Err(err) => {
                tracing::warn!(error = %err.without_url(), "Token release failed");
            }
        }
    }

    /// Issues an authenticated `GET` and returns the raw body.
    ///
    /// The status code is checked but the body is not interpreted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails or its body cannot be read
    /// - The server answers with a non-success status
    pub async fn fetch_json(&self, token: &AuthToken, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(url)
            .query(&[("token", token.expose())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// URL of `token` under the token endpoint, with the token as one
/// percent-encoded path segment.
fn token_url(endpoint: &str, token: &AuthToken) -> Option<Url> {
    let mut url = Url::parse(&format!("{endpoint}{TOKEN_API}")).ok()?;
    url.path_segments_mut().ok()?.push(token.expose());
    Some(url)
}
