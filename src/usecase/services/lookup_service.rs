use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::entities::column::LookupCandidate;
use crate::usecase::ports::lookup::{LookupClient, LookupError, LookupSource};

/// Responses of lookup sources, keyed by endpoint. Entries live until they
/// are evicted explicitly; there is no expiry.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: RefCell<HashMap<String, Vec<LookupCandidate>>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, endpoint: &str) -> Option<Vec<LookupCandidate>> {
        self.entries.borrow().get(endpoint).cloned()
    }

    pub fn insert(&self, endpoint: impl Into<String>, candidates: Vec<LookupCandidate>) {
        self.entries.borrow_mut().insert(endpoint.into(), candidates);
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.entries.borrow().contains_key(endpoint)
    }

    pub fn evict(&self, endpoint: &str) -> bool {
        self.entries.borrow_mut().remove(endpoint).is_some()
    }

    pub fn evict_all(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Loads lookup candidates through a [`LookupClient`], answering repeated
/// requests for the same source from the cache. One instance is shared by
/// every lookup control that talks to the same backend.
pub struct LookupService {
    client: Rc<dyn LookupClient>,
    cache: Rc<LookupCache>,
}

impl LookupService {
    pub fn new(client: Rc<dyn LookupClient>) -> Self {
        Self::with_cache(client, Rc::new(LookupCache::new()))
    }

    pub fn with_cache(client: Rc<dyn LookupClient>, cache: Rc<LookupCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub async fn candidates(
        &self,
        source: &LookupSource,
    ) -> Result<Vec<LookupCandidate>, LookupError> {
        if let Some(cached) = self.cache.get(&source.endpoint) {
            tracing::debug!(endpoint = %source.endpoint, "lookup cache hit");
            return Ok(cached);
        }

        let candidates = self.client.fetch(source).await?;
        self.cache.insert(source.endpoint.clone(), candidates.clone());
        tracing::debug!(
            endpoint = %source.endpoint,
            count = candidates.len(),
            "lookup candidates cached"
        );
        Ok(candidates)
    }

    pub fn evict(&self, endpoint: &str) -> bool {
        self.cache.evict(endpoint)
    }

    pub fn evict_all(&self) {
        self.cache.evict_all();
    }
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
