use std::sync::Arc;

use tokio::sync::mpsc;

use crate::logic::Action;
use crate::sources::{self, RemoteDataService};

/// What: Spawn one fetch cycle for a canonical URL.
///
/// Inputs:
/// - `service`: Remote data service
/// - `generation`: Generation captured when the cycle was issued
/// - `url`: Canonical URL to fetch
/// - `completion_tx`: Channel back into the controller loop
///
/// Details:
/// - The cycle always reports back, success or failure; the reducer decides whether
///   the result is still current.
/// - No retry and no cancellation: a superseded request runs to completion and is discarded.
pub fn spawn_search_fetch<S: RemoteDataService>(
    service: Arc<S>,
    generation: u64,
    url: String,
    completion_tx: mpsc::UnboundedSender<Action>,
) {
    tokio::spawn(async move {
        tracing::debug!(generation, url = %url, "[Search] Fetch cycle started");
        let outcome = sources::fetch_recipes(service.as_ref(), &url).await;
        if let Err(e) = &outcome {
            tracing::warn!(generation, url = %url, error = %e, "[Search] Fetch cycle failed");
        }
        let _ = completion_tx.send(Action::SearchCompleted {
            generation,
            outcome,
        });
    });
}
