//! URL builders for the recipe service endpoints.

use crate::state::ReferenceKind;
use crate::util::percent_encode;

/// Public TheMealDB v1 API root using the shared test key.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Endpoint URL factory bound to one API root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// API root without trailing slash.
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Bind to `base`; a trailing `/` is dropped.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// API root this factory builds against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `list.php?<a|c|i>=list`
    #[must_use]
    pub fn list(&self, kind: ReferenceKind) -> String {
        format!("{}/list.php?{}=list", self.base, kind.param())
    }

    /// `search.php?s=<term>`
    #[must_use]
    pub fn search_by_name(&self, term: &str) -> String {
        format!("{}/search.php?s={}", self.base, percent_encode(term))
    }

    /// `search.php?f=<letter>`
    #[must_use]
    pub fn search_by_first_letter(&self, letter: &str) -> String {
        format!("{}/search.php?f={}", self.base, percent_encode(letter))
    }

    /// `filter.php?<a|c|i>=<value>`; the filter parameter letters match the list endpoint's.
    #[must_use]
    pub fn filter(&self, kind: ReferenceKind, value: &str) -> String {
        format!(
            "{}/filter.php?{}={}",
            self.base,
            kind.param(),
            percent_encode(value)
        )
    }

    /// `lookup.php?i=<id>`
    #[must_use]
    pub fn lookup(&self, id: &str) -> String {
        format!("{}/lookup.php?i={}", self.base, percent_encode(id))
    }
}
