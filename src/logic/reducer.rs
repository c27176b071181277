//! Pure state transitions: `(&AppState, Action) -> Transition`.
//!
//! The reducer never performs I/O. Side effects (navigation, fetches, persisting the
//! display mode) are returned as [`Effect`]s, in the order the runtime must execute them.

use tracing::{debug, warn};

use super::query::{
    QueryTarget, area_target, category_target, first_letter_target, ingredient_target,
    search_target,
};
use crate::sources::Endpoints;
use crate::state::{AppState, DisplayMode, FetchError, Recipe, ReferenceKind, ReferenceList};

/// Input to the reducer: a UI operation or a completion reported by a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Filter by area; `event` wins over `context` when non-empty.
    FilterByArea {
        /// Value from the UI event.
        event: String,
        /// Fallback from context.
        context: String,
    },
    /// Filter by ingredient name.
    FilterByIngredient(String),
    /// Search recipes by first letter.
    FilterByFirstLetter(String),
    /// Filter by category; `event` wins over `context` when non-empty.
    FilterByCategory {
        /// Value from the UI event.
        event: String,
        /// Fallback from context.
        context: String,
    },
    /// Store the search box text without fetching.
    SetFreeTextTerm(String),
    /// Submit a free-text search; `term` wins over `fallback_tag` when non-empty.
    SubmitFreeTextSearch {
        /// Term from the form.
        term: String,
        /// Fallback (e.g. a clicked tag).
        fallback_tag: String,
    },
    /// Submit the stored free-text term, falling back to `fallback_tag` when it is empty.
    SubmitStoredSearch {
        /// Fallback (e.g. a clicked tag).
        fallback_tag: String,
    },
    /// Clear the loading overlay without touching in-flight requests.
    DismissLoading,
    /// Flip and persist the display mode.
    ToggleDisplayMode,
    /// A fetch cycle finished.
    SearchCompleted {
        /// Generation captured when the cycle was issued.
        generation: u64,
        /// Parsed recipes or the failure.
        outcome: Result<Vec<Recipe>, FetchError>,
    },
    /// A reference list became available (from store or network).
    ReferenceLoaded(ReferenceList),
    /// A reference list could not be fetched.
    ReferenceFailed {
        /// Vocabulary that failed.
        kind: ReferenceKind,
        /// Failure cause.
        error: FetchError,
    },
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Hand `path` to the navigator.
    Navigate(String),
    /// Start a fetch cycle for `url`, tagged with `generation`.
    Fetch {
        /// Generation the result must match to be applied.
        generation: u64,
        /// Canonical URL to fetch.
        url: String,
    },
    /// Write the display mode to the persistent store.
    PersistDisplayMode(DisplayMode),
}

/// New state plus the effects to execute, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Replacement snapshot.
    pub state: AppState,
    /// Effects in execution order.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// Transition that keeps `state` and requests nothing.
    fn unchanged(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// What: Effects to run for a freshly built initial state.
///
/// Output:
/// - A single fetch for the startup canonical URL at the current generation.
#[must_use]
pub fn initial_effects(state: &AppState) -> Vec<Effect> {
    vec![Effect::Fetch {
        generation: state.generation,
        url: state.query.canonical_url.clone(),
    }]
}

/// What: Apply one action to a snapshot.
///
/// Inputs:
/// - `state`: Current snapshot (left untouched)
/// - `endpoints`: URL factory for derived queries
/// - `action`: Operation or completion to apply
///
/// Output:
/// - The replacement snapshot and the effects to run.
///
/// Details:
/// - Once `state.error` is set, query operations are ignored entirely.
/// - Completions whose generation is not the current one are discarded.
#[must_use]
pub fn reduce(state: &AppState, endpoints: &Endpoints, action: Action) -> Transition {
    match action {
        Action::FilterByArea { event, context } => {
            apply_target(state, area_target(endpoints, &event, &context))
        }
        Action::FilterByIngredient(name) => apply_target(state, ingredient_target(endpoints, &name)),
        Action::FilterByFirstLetter(letter) => {
            apply_target(state, first_letter_target(endpoints, &letter))
        }
        Action::FilterByCategory { event, context } => {
            apply_target(state, category_target(endpoints, &event, &context))
        }
        Action::SubmitFreeTextSearch { term, fallback_tag } => {
            apply_target(state, search_target(endpoints, &term, &fallback_tag))
        }
        Action::SubmitStoredSearch { fallback_tag } => apply_target(
            state,
            search_target(endpoints, &state.query.free_text_term, &fallback_tag),
        ),
        Action::SetFreeTextTerm(text) => {
            if state.is_failed() {
                return Transition::unchanged(state);
            }
            let mut next = state.clone();
            next.query.free_text_term = text;
            Transition {
                state: next,
                effects: Vec::new(),
            }
        }
        Action::DismissLoading => {
            let mut next = state.clone();
            next.loading = false;
            Transition {
                state: next,
                effects: Vec::new(),
            }
        }
        Action::ToggleDisplayMode => {
            let mut next = state.clone();
            next.display_mode = state.display_mode.toggled();
            let mode = next.display_mode;
            Transition {
                state: next,
                effects: vec![Effect::PersistDisplayMode(mode)],
            }
        }
        Action::SearchCompleted {
            generation,
            outcome,
        } => apply_search_outcome(state, generation, outcome),
        Action::ReferenceLoaded(list) => {
            if list.items.is_empty() {
                return Transition::unchanged(state);
            }
            let mut next = state.clone();
            *next.reference_mut(list.kind) = list.items;
            Transition {
                state: next,
                effects: Vec::new(),
            }
        }
        Action::ReferenceFailed { kind, error } => {
            warn!(kind = kind.label(), error = %error, "[Reducer] Reference list failed");
            let mut next = state.clone();
            record_error(&mut next, error);
            next.loading = false;
            Transition {
                state: next,
                effects: Vec::new(),
            }
        }
    }
}

/// What: Apply a filter/search target: URL, then navigation, then loading.
///
/// Details:
/// - A target whose URL equals the current one navigates but starts no fetch and
///   leaves `loading` alone, since nothing would ever clear it.
fn apply_target(state: &AppState, target: QueryTarget) -> Transition {
    if state.is_failed() {
        debug!(url = %target.url, "[Reducer] Ignoring query while in failed state");
        return Transition::unchanged(state);
    }
    let mut next = state.clone();
    let url_changed = next.query.canonical_url != target.url;
    next.query.canonical_url.clone_from(&target.url);
    if let Some(tab) = target.category_tab {
        next.query.selected_category_tab = tab;
    }
    let mut effects = vec![Effect::Navigate(target.path)];
    if url_changed {
        next.generation += 1;
        next.loading = true;
        effects.push(Effect::Fetch {
            generation: next.generation,
            url: target.url,
        });
    }
    Transition {
        state: next,
        effects,
    }
}

/// What: Apply a finished fetch cycle if it is still the latest.
fn apply_search_outcome(
    state: &AppState,
    generation: u64,
    outcome: Result<Vec<Recipe>, FetchError>,
) -> Transition {
    if generation != state.generation {
        debug!(
            generation,
            current = state.generation,
            "[Reducer] Discarding stale search result"
        );
        return Transition::unchanged(state);
    }
    let mut next = state.clone();
    match outcome {
        Ok(items) => next.query.result_items = items,
        Err(e) => record_error(&mut next, e),
    }
    next.loading = false;
    Transition {
        state: next,
        effects: Vec::new(),
    }
}

/// Keep the first error of the session; later ones are only logged.
fn record_error(state: &mut AppState, error: FetchError) {
    if let Some(existing) = &state.error {
        warn!(existing = %existing, ignored = %error, "[Reducer] Error already recorded");
    } else {
        state.error = Some(error);
    }
}
