//! Shared fixtures for controller integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mealscope::{AppState, FetchError, RemoteDataService, Settings};
use serde_json::{Value, json};
use tokio::sync::watch;

/// API root used by every fixture.
pub const BASE: &str = "http://svc";

/// Settings pointing at [`BASE`] with the stock default search.
pub fn settings() -> Settings {
    Settings {
        api_base_url: BASE.to_string(),
        ..Settings::default()
    }
}

/// Full URL for `path_and_query` under [`BASE`].
pub fn url(path_and_query: &str) -> String {
    format!("{BASE}/{path_and_query}")
}

/// `{ "meals": [...] }` envelope with one recipe per `(id, name)`.
pub fn meals(items: &[(&str, &str)]) -> Value {
    let meals: Vec<Value> = items
        .iter()
        .map(|(id, name)| json!({ "idMeal": id, "strMeal": name }))
        .collect();
    json!({ "meals": meals })
}

/// `{ "meals": [...] }` envelope for a reference list keyed by `field`.
pub fn names(field: &str, items: &[&str]) -> Value {
    let meals: Vec<Value> = items.iter().map(|n| json!({ field: n })).collect();
    json!({ "meals": meals })
}

/// Scripted remote service recording every request.
#[derive(Default)]
pub struct ScriptedService {
    /// `(delay, answer)` keyed by full URL.
    routes: Mutex<HashMap<String, (Duration, Result<Value, FetchError>)>>,
    /// URLs requested so far.
    requests: Mutex<Vec<String>>,
}

impl ScriptedService {
    /// Service answering the three list endpoints with one entry each.
    pub fn with_lists() -> Self {
        Self::default()
            .json("list.php?a=list", names("strArea", &["Italian"]))
            .json("list.php?c=list", names("strCategory", &["Beef"]))
            .json("list.php?i=list", names("strIngredient", &["Chicken"]))
    }

    /// Answer `path` with `body`.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.routes
            .lock()
            .expect("lock poisoned")
            .insert(url(path), (Duration::ZERO, Ok(body)));
        self
    }

    /// Answer `path` with `body` after `delay`.
    pub fn slow_json(self, path: &str, body: Value, delay: Duration) -> Self {
        self.routes
            .lock()
            .expect("lock poisoned")
            .insert(url(path), (delay, Ok(body)));
        self
    }

    /// Answer `path` with a non-success status.
    pub fn status(self, path: &str, code: u16) -> Self {
        self.routes.lock().expect("lock poisoned").insert(
            url(path),
            (Duration::ZERO, Err(FetchError::HttpStatusFailure(code))),
        );
        self
    }

    /// Fail `path` before any response arrives.
    pub fn network(self, path: &str, cause: &str) -> Self {
        self.routes.lock().expect("lock poisoned").insert(
            url(path),
            (
                Duration::ZERO,
                Err(FetchError::NetworkFailure(cause.to_string())),
            ),
        );
        self
    }

    /// Number of requests for `path`.
    pub fn count(&self, path: &str) -> usize {
        let target = url(path);
        self.requests
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|u| **u == target)
            .count()
    }

    /// Total number of requests.
    pub fn total(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }
}

impl RemoteDataService for ScriptedService {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.requests.lock().expect("lock poisoned").push(url.to_string());
        let route = self.routes.lock().expect("lock poisoned").get(url).cloned();
        let Some((delay, answer)) = route else {
            return Err(FetchError::HttpStatusFailure(404));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer
    }
}

/// Navigator recording every path into a shared vector.
pub fn recording_navigator() -> (impl FnMut(&str) + Send + 'static, Arc<Mutex<Vec<String>>>) {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&paths);
    let nav = move |p: &str| sink.lock().expect("lock poisoned").push(p.to_string());
    (nav, paths)
}

/// Wait (bounded) until a published snapshot satisfies `pred`.
pub async fn wait_until(
    rx: &mut watch::Receiver<Arc<AppState>>,
    pred: impl FnMut(&Arc<AppState>) -> bool,
) -> Arc<AppState> {
    let seen = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("timed out waiting for snapshot")
        .expect("controller stopped");
    Arc::clone(&seen)
}
