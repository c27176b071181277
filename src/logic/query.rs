//! Canonical query derivation: one target (URL + navigation path) per filter operation.

use crate::sources::Endpoints;
use crate::state::ReferenceKind;

/// What: Pick the value a filter operation acts on.
///
/// Inputs:
/// - `event`: Value carried by the UI event (select change, tab click, form field)
/// - `context`: Fallback from the surrounding context (route parameter, tag, default)
///
/// Output:
/// - `event` whenever it is non-empty, otherwise `context`; neither is trimmed.
///
/// Details:
/// - The event value always wins when present, whatever the context holds.
///   A whitespace-only event is still a value.
#[must_use]
pub fn resolve<'a>(event: &'a str, context: &'a str) -> &'a str {
    if event.is_empty() { context } else { event }
}

/// Result of a filter operation before it is applied to state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTarget {
    /// New canonical URL.
    pub url: String,
    /// Path handed to the navigator.
    pub path: String,
    /// New selected category tab, for category filters only.
    pub category_tab: Option<String>,
}

/// `filter.php?a=<resolved>`, navigating to `/area/<resolved>`.
#[must_use]
pub fn area_target(ep: &Endpoints, event: &str, context: &str) -> QueryTarget {
    let area = resolve(event, context);
    QueryTarget {
        url: ep.filter(ReferenceKind::Area, area),
        path: format!("/area/{area}"),
        category_tab: None,
    }
}

/// `filter.php?i=<name>`, navigating to `/ingredients/<name>`.
#[must_use]
pub fn ingredient_target(ep: &Endpoints, ingredient: &str) -> QueryTarget {
    QueryTarget {
        url: ep.filter(ReferenceKind::Ingredient, ingredient),
        path: format!("/ingredients/{ingredient}"),
        category_tab: None,
    }
}

/// `search.php?f=<letter>`, navigating to `/`.
#[must_use]
pub fn first_letter_target(ep: &Endpoints, letter: &str) -> QueryTarget {
    QueryTarget {
        url: ep.search_by_first_letter(letter),
        path: "/".to_string(),
        category_tab: None,
    }
}

/// `filter.php?c=<resolved>`, navigating to `/category/<resolved>` and selecting that tab.
#[must_use]
pub fn category_target(ep: &Endpoints, event: &str, context: &str) -> QueryTarget {
    let category = resolve(event, context);
    QueryTarget {
        url: ep.filter(ReferenceKind::Category, category),
        path: format!("/category/{category}"),
        category_tab: Some(category.to_string()),
    }
}

/// `search.php?s=<resolved>`, navigating to `/`.
#[must_use]
pub fn search_target(ep: &Endpoints, term: &str, fallback_tag: &str) -> QueryTarget {
    QueryTarget {
        url: ep.search_by_name(resolve(term, fallback_tag)),
        path: "/".to_string(),
        category_tab: None,
    }
}
