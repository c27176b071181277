//! Test utilities for common test setup.
//!
//! This module provides a scripted [`RemoteDataService`] shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::sources::RemoteDataService;
use crate::state::FetchError;

/// What: In-memory stand-in for the recipe service.
///
/// Details:
/// - Unknown URLs answer `HttpStatusFailure(404)`.
/// - Every requested URL is recorded in order for request-count assertions.
#[derive(Debug, Default)]
pub struct FakeService {
    /// Scripted answers keyed by full URL.
    routes: Mutex<HashMap<String, Result<Value, FetchError>>>,
    /// URLs requested so far.
    requests: Mutex<Vec<String>>,
}

impl FakeService {
    /// Service with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for `url`.
    fn route(self, url: &str, outcome: Result<Value, FetchError>) -> Self {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert(url.to_string(), outcome);
        }
        self
    }

    /// Answer `url` with a JSON body.
    pub fn json(self, url: &str, body: Value) -> Self {
        self.route(url, Ok(body))
    }

    /// Answer `url` with a non-success status.
    pub fn status(self, url: &str, code: u16) -> Self {
        self.route(url, Err(FetchError::HttpStatusFailure(code)))
    }

    /// Fail `url` before a response is obtained.
    pub fn network(self, url: &str, cause: &str) -> Self {
        self.route(url, Err(FetchError::NetworkFailure(cause.to_string())))
    }

    /// Number of requests made for `url`.
    pub fn count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.iter().filter(|u| u.as_str() == url).count())
            .unwrap_or_default()
    }

    /// All requested URLs in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl RemoteDataService for FakeService {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Ok(mut reqs) = self.requests.lock() {
            reqs.push(url.to_string());
        }
        self.routes
            .lock()
            .ok()
            .and_then(|routes| routes.get(url).cloned())
            .unwrap_or(Err(FetchError::HttpStatusFailure(404)))
    }
}
