//! The per-scrape collection cycle.
//!
//! Each call to [`SessionMetricsCollector::collect`] runs one full cycle:
//! authenticate, query the three session resources, hand the samples to a
//! sink, release the token. Nothing is carried over between cycles.

use crate::client::{GuacamoleClient, Resource};
use crate::error::QueryError;
use crate::extract::extract_count;
use crate::models::{AuthToken, Credentials, MetricSample, MetricSink};

/// Bridges Guacamole session data to metric samples.
#[derive(Debug, Clone)]
pub struct SessionMetricsCollector {
    client: GuacamoleClient,
    credentials: Credentials,
}

impl SessionMetricsCollector {
    /// Creates a collector that logs in with `credentials` on every cycle.
    #[must_use]
    pub fn new(client: GuacamoleClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Returns the credentials this collector logs in with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Runs one collection cycle, recording samples into `sink`.
    ///
    /// Never fails. If authentication fails only `up 0` is recorded. Otherwise
    /// `up 1` is recorded followed by one sample per resource that could be
    /// fetched and counted; failing resources are logged and left out.
    pub async fn collect<S: MetricSink + ?Sized>(&self, sink: &mut S) {
        let token = match self.client.acquire_token(&self.credentials).await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(
                    endpoint = %self.credentials.endpoint,
                    error = %err,
                    "Guacamole authentication failed"
                );
                sink.record(MetricSample::up(false));
                return;
            }
        };
        sink.record(MetricSample::up(true));

        let (history, users, active) = tokio::join!(
            self.count(&token, Resource::ConnectionHistory),
            self.count(&token, Resource::Users),
            self.count(&token, Resource::ActiveConnections),
        );

        let mut recorded = 0usize;
        for (resource, result) in [
            (Resource::ConnectionHistory, history),
            (Resource::Users, users),
            (Resource::ActiveConnections, active),
        ] {
            match result {
                Ok(count) => {
                    sink.record(MetricSample::count(resource.metric(), count));
                    recorded += 1;
                }
                Err(err) => {
                    tracing::warn!(resource = %resource, error = %err, "Could not query resource");
                }
            }
        }

        self.client
            .release_token(&self.credentials.endpoint, &token)
            .await;

        tracing::debug!(
            resources_recorded = recorded,
            resources_total = Resource::ALL.len(),
            "Collection cycle complete"
        );
    }

    /// Fetches `resource` and returns its item count.
    async fn count(&self, token: &AuthToken, resource: Resource) -> Result<usize, QueryError> {
        let url = self
            .credentials
            .api_url(&resource.path(&self.credentials.data_source));
        let body = self.client.fetch_json(token, &url).await?;
        Ok(extract_count(&body, resource.shape())?)
    }
}
