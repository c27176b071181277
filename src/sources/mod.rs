//! Network data retrieval from the recipe service, split into submodules.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::settings::Settings;
use crate::state::FetchError;

pub mod endpoints;
mod lists;
mod recipes;

pub use endpoints::Endpoints;
pub use lists::fetch_reference_list;
pub use recipes::{fetch_recipes, lookup_recipe};

/// What: Read-only JSON API the controller talks to.
///
/// Details:
/// - Implemented by [`HttpService`] for the real service; tests plug in scripted fakes.
/// - One method is enough: every endpoint is a GET returning a `{ "meals": ... }` envelope.
pub trait RemoteDataService: Send + Sync + 'static {
    /// What: GET `url` and decode the body as JSON.
    ///
    /// Output:
    /// - `Ok(Value)` for a success status with a JSON body.
    ///
    /// # Errors
    /// - `NetworkFailure` when no response is obtained
    /// - `HttpStatusFailure` for non-success statuses
    /// - `InvalidPayload` when the body is not JSON
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// `reqwest`-backed [`RemoteDataService`] with a pooled client.
#[derive(Clone, Debug)]
pub struct HttpService {
    /// Shared client; connection pooling is enabled by default.
    client: reqwest::Client,
}

impl HttpService {
    /// What: Build the HTTP client from settings.
    ///
    /// Inputs:
    /// - `settings`: Supplies connect and overall request timeouts
    ///
    /// Output:
    /// - Ready-to-use service.
    ///
    /// # Errors
    /// - Client construction failures from `reqwest` (TLS backend initialisation)
    ///
    /// Details:
    /// - No overall timeout is applied unless `request_timeout_secs` is configured.
    pub fn new(settings: &Settings) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(format!("mealscope/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RemoteDataService for HttpService {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "[Net] Request failed before a response");
            FetchError::from(e)
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "[Net] Non-success status");
            return Err(FetchError::HttpStatusFailure(status.as_u16()));
        }
        let body = resp.json::<Value>().await.map_err(|e| {
            let err = FetchError::from(e);
            warn!(url, error = %err, "[Net] Response body unreadable");
            err
        })?;
        debug!(url, status = status.as_u16(), "[Net] Response received");
        Ok(body)
    }
}
