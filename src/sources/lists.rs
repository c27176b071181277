use tracing::{debug, info};

use super::{Endpoints, RemoteDataService};
use crate::state::{FetchError, ReferenceKind, ReferenceList};

/// What: Fetch one reference vocabulary from the list endpoint.
///
/// Inputs:
/// - `service`: Remote data service
/// - `endpoints`: URL factory
/// - `kind`: Vocabulary to fetch
///
/// Output:
/// - `Ok(Some(list))` when the service returned at least one usable entry.
/// - `Ok(None)` when `meals` was `null`/empty; this is not an error.
///
/// # Errors
/// - Propagates `FetchError` from the service unchanged.
pub async fn fetch_reference_list<S: RemoteDataService>(
    service: &S,
    endpoints: &Endpoints,
    kind: ReferenceKind,
) -> Result<Option<ReferenceList>, FetchError> {
    let url = endpoints.list(kind);
    let body = service.get_json(&url).await?;
    let list = ReferenceList::from_envelope(kind, &body);
    match &list {
        Some(l) => info!(kind = kind.label(), count = l.items.len(), "fetched reference list"),
        None => debug!(kind = kind.label(), "reference list endpoint returned no entries"),
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeService;

    #[tokio::test]
    /// What: A populated list response parses; a null one yields `None`.
    ///
    /// Inputs:
    /// - Fake service answering `list.php?a=list` with two areas and `list.php?c=list` with `null`.
    ///
    /// Output:
    /// - Areas parse in order; categories come back as `Ok(None)`.
    async fn lists_fetch_parses_and_tolerates_null() {
        let ep = Endpoints::new("http://svc");
        let svc = FakeService::new()
            .json(
                &ep.list(ReferenceKind::Area),
                serde_json::json!({"meals": [{"strArea": "Italian"}, {"strArea": "Thai"}]}),
            )
            .json(
                &ep.list(ReferenceKind::Category),
                serde_json::json!({"meals": null}),
            );
        let areas = fetch_reference_list(&svc, &ep, ReferenceKind::Area)
            .await
            .expect("ok")
            .expect("some");
        assert_eq!(areas.names(), vec!["Italian", "Thai"]);
        let cats = fetch_reference_list(&svc, &ep, ReferenceKind::Category)
            .await
            .expect("ok");
        assert!(cats.is_none());
    }

    #[tokio::test]
    async fn lists_fetch_propagates_status_failure() {
        let ep = Endpoints::new("http://svc");
        let svc = FakeService::new().status(&ep.list(ReferenceKind::Ingredient), 503);
        let err = fetch_reference_list(&svc, &ep, ReferenceKind::Ingredient)
            .await
            .expect_err("must fail");
        assert_eq!(err, FetchError::HttpStatusFailure(503));
    }
}
