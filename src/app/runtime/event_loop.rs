use std::sync::Arc;

use tokio::select;
use tokio::sync::{mpsc, oneshot, watch};

use crate::app::navigator::Navigator;
use crate::app::persist::save_display_mode;
use crate::app::reference_cache::ReferenceDataCache;
use crate::logic::{Action, Effect, initial_effects, reduce};
use crate::sources::{Endpoints, RemoteDataService};
use crate::state::AppState;
use crate::store::PersistentStore;

use super::workers::{spawn_reference_loads, spawn_search_fetch};

/// What: Owner of the live snapshot and the collaborators effects run against.
///
/// Details:
/// - Only the loop task touches `state`; readers observe it through the watch channel.
/// - A snapshot is published only when a transition actually changed the state.
pub struct Runtime<S, P, N> {
    /// Current snapshot.
    state: Arc<AppState>,
    /// URL factory handed to the reducer.
    endpoints: Endpoints,
    /// Remote service used by fetch cycles.
    service: Arc<S>,
    /// Device store for the display mode.
    store: Arc<P>,
    /// Reference vocabulary loader.
    cache: Arc<ReferenceDataCache<S, P>>,
    /// Route sink.
    navigator: N,
    /// Publishes snapshots to subscribers.
    snapshot_tx: watch::Sender<Arc<AppState>>,
    /// Cloned into every spawned worker.
    completion_tx: mpsc::UnboundedSender<Action>,
}

impl<S, P, N> Runtime<S, P, N>
where
    S: RemoteDataService,
    P: PersistentStore,
    N: Navigator,
{
    /// Assemble a runtime around an already published initial snapshot.
    #[must_use]
    pub fn new(
        state: Arc<AppState>,
        endpoints: Endpoints,
        service: Arc<S>,
        store: Arc<P>,
        navigator: N,
        snapshot_tx: watch::Sender<Arc<AppState>>,
        completion_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let cache = Arc::new(ReferenceDataCache::new(
            Arc::clone(&service),
            Arc::clone(&store),
            endpoints.clone(),
        ));
        Self {
            state,
            endpoints,
            service,
            store,
            cache,
            navigator,
            snapshot_tx,
            completion_tx,
        }
    }

    /// What: Kick off the startup work.
    ///
    /// Details:
    /// - Issues the default search (generation 1) and the reference vocabulary loads.
    pub fn start(&mut self) {
        tracing::info!(
            url = %self.state.query.canonical_url,
            "[Runtime] Starting initial load"
        );
        let effects = initial_effects(&self.state);
        self.execute(effects);
        spawn_reference_loads(Arc::clone(&self.cache), self.completion_tx.clone());
    }

    /// What: Reduce one action, publish the result, then run its effects in order.
    pub fn apply(&mut self, action: Action) {
        let transition = reduce(&self.state, &self.endpoints, action);
        if transition.state != *self.state {
            self.state = Arc::new(transition.state);
            self.snapshot_tx.send_replace(Arc::clone(&self.state));
        }
        self.execute(transition.effects);
    }

    /// Run `effects` in the order the reducer returned them.
    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(path) => {
                    tracing::debug!(path = %path, "[Runtime] Navigating");
                    self.navigator.navigate(&path);
                }
                Effect::Fetch { generation, url } => spawn_search_fetch(
                    Arc::clone(&self.service),
                    generation,
                    url,
                    self.completion_tx.clone(),
                ),
                Effect::PersistDisplayMode(mode) => save_display_mode(self.store.as_ref(), mode),
            }
        }
    }

    /// What: Drive the loop until every dispatcher is dropped or shutdown is requested.
    ///
    /// Inputs:
    /// - `action_rx`: Operations from `Dispatcher` handles
    /// - `completion_rx`: Results from background workers
    /// - `shutdown_rx`: Explicit stop request
    pub async fn run(
        mut self,
        mut action_rx: mpsc::UnboundedReceiver<Action>,
        mut completion_rx: mpsc::UnboundedReceiver<Action>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        loop {
            select! {
                maybe_action = action_rx.recv() => {
                    let Some(action) = maybe_action else {
                        tracing::debug!("[Runtime] All dispatchers dropped; exiting");
                        break;
                    };
                    self.apply(action);
                }
                Some(done) = completion_rx.recv() => self.apply(done),
                _ = &mut shutdown_rx => {
                    tracing::debug!("[Runtime] Shutdown requested");
                    break;
                }
            }
        }
    }
}
