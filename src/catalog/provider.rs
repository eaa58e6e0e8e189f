//! Listing lookup: provider trait, in-memory fixtures, moka cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::info;
use uuid::Uuid;

use crate::error::CatalogError;

use super::listings::Listing;

/// Source of listing records. Real backends are injected by the host
/// application; the booking flow only needs point lookups.
pub trait CatalogProvider {
    fn listing(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Arc<Listing>>, CatalogError>> + Send;
}

/// Catalog backed by a fixed set of listings. Stands in for a real backend
/// in tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    listings: HashMap<Uuid, Arc<Listing>>,
}

impl InMemoryCatalog {
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: listings
                .into_iter()
                .map(|l| (l.id(), Arc::new(l)))
                .collect(),
        }
    }

    pub fn insert(&mut self, listing: Listing) {
        self.listings.insert(listing.id(), Arc::new(listing));
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    async fn listing(&self, id: Uuid) -> Result<Option<Arc<Listing>>, CatalogError> {
        Ok(self.listings.get(&id).cloned())
    }
}

/// Caching decorator over a catalog backend.
///
/// Listing records change rarely relative to how often an open booking flow
/// reads them, so a short TTL absorbs most lookups. Misses are not cached.
pub struct CachingCatalog<C> {
    inner: C,
    listings: Cache<Uuid, Arc<Listing>>,
}

impl<C: CatalogProvider> CachingCatalog<C> {
    /// 500 entries, 10 min TTL, 5 min idle.
    pub fn new(inner: C) -> Self {
        Self::with_ttl(inner, Duration::from_secs(10 * 60))
    }

    pub fn with_ttl(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            listings: Cache::builder()
                .max_capacity(500)
                .time_to_live(ttl)
                .time_to_idle(ttl / 2)
                .build(),
        }
    }

    /// Drop a cached listing, e.g. after the backend updates its rates.
    pub async fn invalidate(&self, id: Uuid) {
        self.listings.invalidate(&id).await;
        info!(listing_id = %id, "Catalog cache invalidated");
    }

    pub fn invalidate_all(&self) {
        self.listings.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.listings.entry_count()
    }
}

impl<C: CatalogProvider + Sync> CatalogProvider for CachingCatalog<C> {
    async fn listing(&self, id: Uuid) -> Result<Option<Arc<Listing>>, CatalogError> {
        if let Some(hit) = self.listings.get(&id).await {
            return Ok(Some(hit));
        }

        match self.inner.listing(id).await? {
            Some(listing) => {
                self.listings.insert(id, Arc::clone(&listing)).await;
                Ok(Some(listing))
            }
            None => Ok(None),
        }
    }
}
