//! Controller: owns the state snapshot and routes UI operations through the reducer.
//!
//! The presentation layer holds a [`Dispatcher`] to issue operations and a
//! `watch::Receiver` to observe snapshots. All state changes happen on one task.

pub mod navigator;
pub mod persist;
pub mod reference_cache;
mod runtime;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::logic::Action;
use crate::settings::Settings;
use crate::sources::{self, Endpoints, HttpService, RemoteDataService};
use crate::state::{AppState, FetchError, Recipe};
use crate::store::{FileStore, PersistentStore};

use navigator::Navigator;
use persist::load_display_mode;
use runtime::{Channels, Runtime};

/// What: Cloneable handle that submits operations to the controller loop.
///
/// Details:
/// - Sends never block; they are silently dropped once the loop has stopped.
/// - The loop exits when every dispatcher (including the controller's own) is gone.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    /// Sender into the loop's action channel.
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    /// Queue `action`; a closed loop is logged and ignored.
    fn send(&self, action: Action) {
        if self.tx.send(action).is_err() {
            tracing::debug!("[Dispatcher] Controller stopped; dropping operation");
        }
    }

    /// Filter by area; `event` wins over `context` when non-empty.
    pub fn filter_by_area(&self, event: &str, context: &str) {
        self.send(Action::FilterByArea {
            event: event.to_string(),
            context: context.to_string(),
        });
    }

    /// Filter by ingredient name.
    pub fn filter_by_ingredient(&self, name: &str) {
        self.send(Action::FilterByIngredient(name.to_string()));
    }

    /// Search recipes whose name starts with `letter`.
    pub fn filter_by_first_letter(&self, letter: &str) {
        self.send(Action::FilterByFirstLetter(letter.to_string()));
    }

    /// Filter by category; `event` wins over `context` when non-empty.
    pub fn filter_by_category(&self, event: &str, context: &str) {
        self.send(Action::FilterByCategory {
            event: event.to_string(),
            context: context.to_string(),
        });
    }

    /// Store the search box text without fetching.
    pub fn set_free_text_term(&self, text: &str) {
        self.send(Action::SetFreeTextTerm(text.to_string()));
    }

    /// Submit `term`, or `fallback_tag` when the term is empty.
    pub fn submit_free_text_search(&self, term: &str, fallback_tag: &str) {
        self.send(Action::SubmitFreeTextSearch {
            term: term.to_string(),
            fallback_tag: fallback_tag.to_string(),
        });
    }

    /// Submit the term last stored with [`Self::set_free_text_term`], or `fallback_tag`.
    pub fn submit_search(&self, fallback_tag: &str) {
        self.send(Action::SubmitStoredSearch {
            fallback_tag: fallback_tag.to_string(),
        });
    }

    /// Clear the loading overlay; in-flight requests keep running.
    pub fn dismiss_loading(&self) {
        self.send(Action::DismissLoading);
    }

    /// Flip between light and dark mode and persist the new value.
    pub fn toggle_display_mode(&self) {
        self.send(Action::ToggleDisplayMode);
    }
}

/// What: Running controller session.
///
/// Details:
/// - Created with [`Controller::spawn`] inside a tokio runtime.
/// - Snapshots are `Arc<AppState>`; each published snapshot is immutable.
pub struct Controller<S> {
    /// Handle kept for the controller's own operations.
    dispatcher: Dispatcher,
    /// Latest published snapshot.
    snapshot_rx: watch::Receiver<Arc<AppState>>,
    /// Shared remote service, also used for detail lookups.
    service: Arc<S>,
    /// URL factory bound to the configured API root.
    endpoints: Endpoints,
    /// Explicit stop signal for the loop.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Loop task.
    task: JoinHandle<()>,
}

impl Controller<HttpService> {
    /// What: Start a session against the real service and the on-disk store.
    ///
    /// Inputs:
    /// - `settings`: Loaded settings (API root, default search, timeouts, store dir)
    /// - `navigator`: Route sink owned by the presentation layer
    ///
    /// Output:
    /// - The running controller, or the error from building the HTTP client.
    pub fn from_settings<N: Navigator>(settings: &Settings, navigator: N) -> reqwest::Result<Self> {
        let service = Arc::new(HttpService::new(settings)?);
        let store = Arc::new(FileStore::new(settings.resolved_store_dir()));
        tracing::info!(
            store = %store.dir().display(),
            api = %settings.api_base_url,
            "[Controller] Using on-disk store"
        );
        Ok(Self::spawn(settings, service, store, navigator))
    }
}

impl<S: RemoteDataService> Controller<S> {
    /// What: Build the initial state and start the controller loop.
    ///
    /// Inputs:
    /// - `settings`: API root and default search term
    /// - `service`: Remote data service
    /// - `store`: Persistent store (display mode and reference lists)
    /// - `navigator`: Route sink
    ///
    /// Output:
    /// - A controller whose first snapshot is already visible: loading raised,
    ///   display mode read from the store.
    ///
    /// Details:
    /// - Issues the default search and the three reference loads immediately.
    /// - Must be called from within a tokio runtime.
    #[must_use = "dropping the controller stops its loop"]
    pub fn spawn<P, N>(settings: &Settings, service: Arc<S>, store: Arc<P>, navigator: N) -> Self
    where
        P: PersistentStore,
        N: Navigator,
    {
        let endpoints = Endpoints::new(&settings.api_base_url);
        let mode = load_display_mode(store.as_ref());
        let initial_url = endpoints.search_by_name(&settings.default_search);
        let state = Arc::new(AppState::initial(initial_url, mode));
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::clone(&state));

        let Channels {
            action_tx,
            action_rx,
            completion_tx,
            completion_rx,
            shutdown_tx,
            shutdown_rx,
        } = Channels::new();

        let mut runtime = Runtime::new(
            state,
            endpoints.clone(),
            Arc::clone(&service),
            store,
            navigator,
            snapshot_tx,
            completion_tx,
        );
        runtime.start();
        let task = tokio::spawn(runtime.run(action_rx, completion_rx, shutdown_rx));

        Self {
            dispatcher: Dispatcher { tx: action_tx },
            snapshot_rx,
            service,
            endpoints,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// New handle for issuing operations.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.snapshot_rx.borrow())
    }

    /// Receiver notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.snapshot_rx.clone()
    }

    /// What: Fetch full details for one recipe by id.
    ///
    /// Output:
    /// - `Ok(None)` when the service knows no such recipe.
    ///
    /// Details:
    /// - Runs outside the reducer; the snapshot is not affected.
    pub async fn lookup_recipe(&self, id: &str) -> Result<Option<Recipe>, FetchError> {
        sources::lookup_recipe(self.service.as_ref(), &self.endpoints, id).await
    }

    /// What: Stop the loop and wait for it to exit.
    ///
    /// Details:
    /// - In-flight fetches finish in the background; their completions are dropped.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!(error = %e, "[Controller] Loop task ended abnormally");
        }
    }
}
