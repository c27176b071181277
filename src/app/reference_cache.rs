//! Once-per-device cache for the area, category, and ingredient vocabularies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::sources::{self, Endpoints, RemoteDataService};
use crate::state::{FetchError, ReferenceKind, ReferenceList};
use crate::store::PersistentStore;

/// What: Memoizing loader for reference lists.
///
/// Details:
/// - Lookup order is session memo, then persistent store, then network.
/// - Lists are never refreshed once stored; their lifetime is the device store's, not a TTL.
/// - A `null`/empty network result is not cached and not an error.
pub struct ReferenceDataCache<S, P> {
    /// Remote service for cache misses.
    service: Arc<S>,
    /// Device store holding `list_a`/`list_c`/`list_i`.
    store: Arc<P>,
    /// URL factory.
    endpoints: Endpoints,
    /// Lists already resolved this session.
    memo: Mutex<HashMap<ReferenceKind, ReferenceList>>,
}

impl<S: RemoteDataService, P: PersistentStore> ReferenceDataCache<S, P> {
    /// Build a cache over `service` and `store`.
    #[must_use]
    pub fn new(service: Arc<S>, store: Arc<P>, endpoints: Endpoints) -> Self {
        Self {
            service,
            store,
            endpoints,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Session-memoized list for `kind`, if any.
    fn memoized(&self, kind: ReferenceKind) -> Option<ReferenceList> {
        self.memo.lock().ok()?.get(&kind).cloned()
    }

    /// Remember `list` for the rest of the session.
    fn memoize(&self, list: &ReferenceList) {
        if let Ok(mut memo) = self.memo.lock() {
            memo.insert(list.kind, list.clone());
        }
    }

    /// What: Read and validate the stored list for `kind`.
    ///
    /// Output:
    /// - `Some(list)` when the key exists and parses to a non-empty list.
    ///
    /// Details:
    /// - Corrupt entries are logged and treated as absent so the next fetch repairs them.
    fn from_store(&self, kind: ReferenceKind) -> Option<ReferenceList> {
        let raw = self.store.get(kind.store_key())?;
        let list = ReferenceList::from_stored(kind, &raw);
        if list.is_none() {
            warn!(
                key = kind.store_key(),
                bytes = raw.len(),
                "[Cache] Stored reference list unreadable; refetching"
            );
        }
        list
    }

    /// Write `list` to the store; failures are logged, not propagated.
    fn persist(&self, list: &ReferenceList) {
        let key = list.kind.store_key();
        match list.to_stored() {
            Ok(text) => {
                if let Err(e) = self.store.set(key, &text) {
                    warn!(key, error = %e, "[Cache] Failed to persist reference list");
                }
            }
            Err(e) => warn!(key, error = %e, "[Cache] Failed to serialize reference list"),
        }
    }

    /// What: Resolve the list for one vocabulary.
    ///
    /// Inputs:
    /// - `kind`: Vocabulary to load
    ///
    /// Output:
    /// - `Ok(Some(list))` from memo, store, or network.
    /// - `Ok(None)` when the service returned no entries; nothing is written.
    ///
    /// # Errors
    /// - `FetchError` from the list endpoint on a cache miss.
    ///
    /// Details:
    /// - Repeated calls within a session issue at most one successful network request per kind.
    pub async fn load(&self, kind: ReferenceKind) -> Result<Option<ReferenceList>, FetchError> {
        if let Some(list) = self.memoized(kind) {
            debug!(kind = kind.label(), "[Cache] Reference list served from session memo");
            return Ok(Some(list));
        }
        if let Some(list) = self.from_store(kind) {
            debug!(
                kind = kind.label(),
                count = list.items.len(),
                "[Cache] Reference list served from store"
            );
            self.memoize(&list);
            return Ok(Some(list));
        }
        let fetched =
            sources::fetch_reference_list(self.service.as_ref(), &self.endpoints, kind).await?;
        if let Some(list) = &fetched {
            self.persist(list);
            self.memoize(list);
            info!(
                kind = kind.label(),
                count = list.items.len(),
                "[Cache] Reference list fetched and stored"
            );
        }
        Ok(fetched)
    }

    /// What: Load all three vocabularies concurrently.
    ///
    /// Output:
    /// - One `(kind, result)` pair per kind, in [`ReferenceKind::ALL`] order.
    pub async fn load_all(
        &self,
    ) -> Vec<(ReferenceKind, Result<Option<ReferenceList>, FetchError>)> {
        let loads = ReferenceKind::ALL.map(|kind| async move { (kind, self.load(kind).await) });
        join_all(loads).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::FakeService;

    /// Endpoints used by the cache tests.
    fn ep() -> Endpoints {
        Endpoints::new("http://svc")
    }

    #[tokio::test]
    /// What: Loading the same kind twice hits the network once and persists the list.
    ///
    /// Inputs:
    /// - Empty store; fake service with two categories.
    ///
    /// Output:
    /// - Both calls return the same list; one request; `list_c` written in `{meals: [...]}` form.
    async fn cache_load_is_idempotent_and_persists() {
        let url = ep().list(ReferenceKind::Category);
        let svc = Arc::new(FakeService::new().json(
            &url,
            serde_json::json!({"meals": [{"strCategory": "Beef"}, {"strCategory": "Dessert"}]}),
        ));
        let store = Arc::new(MemoryStore::new());
        let cache = ReferenceDataCache::new(svc.clone(), store.clone(), ep());

        let first = cache.load(ReferenceKind::Category).await.expect("ok");
        let second = cache.load(ReferenceKind::Category).await.expect("ok");
        assert_eq!(first, second);
        assert_eq!(svc.count(&url), 1);

        let stored = store.get("list_c").expect("persisted");
        let body: serde_json::Value = serde_json::from_str(&stored).expect("json");
        assert_eq!(body["meals"][1]["strCategory"], "Dessert");
    }

    #[tokio::test]
    /// What: A stored list is used without contacting the service.
    ///
    /// Inputs:
    /// - Store seeded with `list_a`; fake service with no routes.
    ///
    /// Output:
    /// - Areas come from the store; no request is made.
    async fn cache_prefers_store() {
        let svc = Arc::new(FakeService::new());
        let store = Arc::new(MemoryStore::with_entries([(
            "list_a",
            r#"{"meals":[{"strArea":"Canadian"}]}"#,
        )]));
        let cache = ReferenceDataCache::new(svc.clone(), store, ep());
        let list = cache
            .load(ReferenceKind::Area)
            .await
            .expect("ok")
            .expect("some");
        assert_eq!(list.names(), vec!["Canadian"]);
        assert!(svc.requests().is_empty());
    }

    #[tokio::test]
    /// What: A null network result never overwrites a stored non-empty list.
    ///
    /// Inputs:
    /// - Store holds a corrupt `list_i` (forces a fetch) in one case and nothing in the other;
    ///   service answers `{"meals": null}`.
    ///
    /// Output:
    /// - `Ok(None)`; the store is left exactly as it was.
    async fn cache_null_result_does_not_write() {
        let url = ep().list(ReferenceKind::Ingredient);
        let svc = Arc::new(FakeService::new().json(&url, serde_json::json!({"meals": null})));
        let store = Arc::new(MemoryStore::with_entries([("list_i", "{broken")]));
        let cache = ReferenceDataCache::new(svc.clone(), store.clone(), ep());
        assert_eq!(cache.load(ReferenceKind::Ingredient).await, Ok(None));
        assert_eq!(store.get("list_i").as_deref(), Some("{broken"));

        let empty_store = Arc::new(MemoryStore::new());
        let cache = ReferenceDataCache::new(svc, empty_store.clone(), ep());
        assert_eq!(cache.load(ReferenceKind::Ingredient).await, Ok(None));
        assert_eq!(empty_store.get("list_i"), None);
    }

    #[tokio::test]
    /// What: A corrupt stored list is replaced by the next successful fetch.
    ///
    /// Inputs:
    /// - Store holds unparsable `list_a`; service answers with one area.
    ///
    /// Output:
    /// - The fetched list is returned and `list_a` now parses back to it.
    async fn cache_repairs_corrupt_entry() {
        let url = ep().list(ReferenceKind::Area);
        let svc = Arc::new(
            FakeService::new().json(&url, serde_json::json!({"meals": [{"strArea": "Greek"}]})),
        );
        let store = Arc::new(MemoryStore::with_entries([("list_a", "{broken")]));
        let cache = ReferenceDataCache::new(svc.clone(), store.clone(), ep());

        let list = cache
            .load(ReferenceKind::Area)
            .await
            .expect("ok")
            .expect("some");
        assert_eq!(list.names(), vec!["Greek"]);
        assert_eq!(svc.count(&url), 1);
        let raw = store.get("list_a").expect("rewritten");
        assert_eq!(
            ReferenceList::from_stored(ReferenceKind::Area, &raw),
            Some(list)
        );
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl PersistentStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        }
    }

    #[tokio::test]
    /// What: A failed store write still hands back the fetched list and memoizes it.
    ///
    /// Inputs:
    /// - Store rejecting every write; service answering one category.
    ///
    /// Output:
    /// - Both loads return the list; only one request is made.
    async fn cache_store_write_failure_is_not_fatal() {
        let url = ep().list(ReferenceKind::Category);
        let svc = Arc::new(
            FakeService::new()
                .json(&url, serde_json::json!({"meals": [{"strCategory": "Vegan"}]})),
        );
        let cache = ReferenceDataCache::new(svc.clone(), Arc::new(ReadOnlyStore), ep());

        let first = cache
            .load(ReferenceKind::Category)
            .await
            .expect("ok")
            .expect("some");
        assert_eq!(first.names(), vec!["Vegan"]);
        let second = cache.load(ReferenceKind::Category).await.expect("ok");
        assert_eq!(second, Some(first));
        assert_eq!(svc.count(&url), 1);
    }

    #[tokio::test]
    /// What: Failures surface per kind while other kinds still load.
    ///
    /// Inputs:
    /// - Areas answer 500; categories and ingredients succeed.
    ///
    /// Output:
    /// - `load_all` reports the area failure and two lists, in kind order.
    async fn cache_load_all_reports_each_kind() {
        let e = ep();
        let svc = Arc::new(
            FakeService::new()
                .status(&e.list(ReferenceKind::Area), 500)
                .json(
                    &e.list(ReferenceKind::Category),
                    serde_json::json!({"meals": [{"strCategory": "Beef"}]}),
                )
                .json(
                    &e.list(ReferenceKind::Ingredient),
                    serde_json::json!({"meals": [{"idIngredient": "1", "strIngredient": "Chicken"}]}),
                ),
        );
        let cache = ReferenceDataCache::new(svc, Arc::new(MemoryStore::new()), e);
        let results = cache.load_all().await;
        let kinds: Vec<ReferenceKind> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, ReferenceKind::ALL.to_vec());
        assert_eq!(results[0].1, Err(FetchError::HttpStatusFailure(500)));
        assert!(matches!(results[1].1, Ok(Some(_))));
        assert!(matches!(results[2].1, Ok(Some(_))));
    }
}
