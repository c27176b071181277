use tracing::info;

use super::{Endpoints, RemoteDataService};
use crate::state::{FetchError, Recipe};

/// What: Run one search/filter request and parse its recipes.
///
/// Inputs:
/// - `service`: Remote data service
/// - `url`: Canonical query URL
///
/// Output:
/// - Recipes in service order; an empty vector when nothing matched (`meals: null`).
///
/// # Errors
/// - Propagates `FetchError` from the service unchanged.
pub async fn fetch_recipes<S: RemoteDataService>(
    service: &S,
    url: &str,
) -> Result<Vec<Recipe>, FetchError> {
    let body = service.get_json(url).await?;
    let items = Recipe::list_from_envelope(&body);
    info!(url, count = items.len(), "[Search] Fetched recipes");
    Ok(items)
}

/// What: Look up the full record of a single recipe.
///
/// Inputs:
/// - `service`: Remote data service
/// - `endpoints`: URL factory
/// - `id`: Recipe identifier (`idMeal`)
///
/// Output:
/// - `Ok(Some(recipe))` when found, `Ok(None)` for unknown ids.
///
/// # Errors
/// - Propagates `FetchError` from the service unchanged.
pub async fn lookup_recipe<S: RemoteDataService>(
    service: &S,
    endpoints: &Endpoints,
    id: &str,
) -> Result<Option<Recipe>, FetchError> {
    let body = service.get_json(&endpoints.lookup(id)).await?;
    Ok(Recipe::list_from_envelope(&body).into_iter().next())
}
