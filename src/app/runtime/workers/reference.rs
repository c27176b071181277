use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::reference_cache::ReferenceDataCache;
use crate::logic::Action;
use crate::sources::RemoteDataService;
use crate::store::PersistentStore;

/// What: Spawn the startup load of all reference vocabularies.
///
/// Inputs:
/// - `cache`: Reference cache (memo, store, network)
/// - `completion_tx`: Channel back into the controller loop
///
/// Details:
/// - Loaded lists arrive as `ReferenceLoaded`, failures as `ReferenceFailed`.
/// - Kinds with no entries are skipped; the reducer's slot stays as it was.
pub fn spawn_reference_loads<S, P>(
    cache: Arc<ReferenceDataCache<S, P>>,
    completion_tx: mpsc::UnboundedSender<Action>,
) where
    S: RemoteDataService,
    P: PersistentStore,
{
    tokio::spawn(async move {
        for (kind, result) in cache.load_all().await {
            let action = match result {
                Ok(Some(list)) => Action::ReferenceLoaded(list),
                Ok(None) => {
                    tracing::debug!(kind = kind.label(), "[Reference] No entries; keeping slot");
                    continue;
                }
                Err(error) => Action::ReferenceFailed { kind, error },
            };
            let _ = completion_tx.send(action);
        }
    });
}
