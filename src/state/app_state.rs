//! Immutable application snapshot owned by the controller loop.

use super::error::FetchError;
use super::types::{DisplayMode, Recipe, ReferenceItem, ReferenceKind};

/// Current search/filter intent and the recipes it produced.
///
/// Replaced as a whole by the reducer; consumers only ever see it inside an
/// [`AppState`] snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Text typed into the search box, kept until an explicit submit.
    pub free_text_term: String,
    /// Single derived request URL; a change here is what starts a fetch cycle.
    pub canonical_url: String,
    /// Category tab currently highlighted (empty for none).
    pub selected_category_tab: String,
    /// Recipes from the latest accepted fetch cycle.
    pub result_items: Vec<Recipe>,
}

/// Read-only view of the whole controller state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Query intent and results.
    pub query: QueryDescriptor,
    /// Blocking overlay flag: true while the latest fetch cycle is outstanding.
    pub loading: bool,
    /// First terminal failure of the session, if any.
    pub error: Option<FetchError>,
    /// Area vocabulary.
    pub areas: Vec<ReferenceItem>,
    /// Category vocabulary.
    pub categories: Vec<ReferenceItem>,
    /// Ingredient vocabulary.
    pub ingredients: Vec<ReferenceItem>,
    /// Light/dark preference.
    pub display_mode: DisplayMode,
    /// Request generation of the current canonical URL; bumped on every URL change.
    pub generation: u64,
}

impl AppState {
    /// What: Build the startup snapshot.
    ///
    /// Inputs:
    /// - `initial_url`: Default canonical URL (the startup search)
    /// - `display_mode`: Mode read from the persistent store
    ///
    /// Output:
    /// - State at generation 1 with the loading overlay raised for the startup fetch.
    #[must_use]
    pub fn initial(initial_url: String, display_mode: DisplayMode) -> Self {
        Self {
            query: QueryDescriptor {
                canonical_url: initial_url,
                ..QueryDescriptor::default()
            },
            loading: true,
            display_mode,
            generation: 1,
            ..Self::default()
        }
    }

    /// True once a terminal failure has been recorded; the presentation layer shows its failure view.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Vocabulary for `kind`.
    #[must_use]
    pub fn reference(&self, kind: ReferenceKind) -> &[ReferenceItem] {
        match kind {
            ReferenceKind::Area => &self.areas,
            ReferenceKind::Category => &self.categories,
            ReferenceKind::Ingredient => &self.ingredients,
        }
    }

    /// Mutable vocabulary slot for `kind`; only the reducer writes through this.
    pub(crate) fn reference_mut(&mut self, kind: ReferenceKind) -> &mut Vec<ReferenceItem> {
        match kind {
            ReferenceKind::Area => &mut self.areas,
            ReferenceKind::Category => &mut self.categories,
            ReferenceKind::Ingredient => &mut self.ingredients,
        }
    }
}
