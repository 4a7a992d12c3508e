//! In-memory listing store.
//!
//! Listings are kept in insertion order with a keyed index beside it. Every
//! mutation takes the write lock for its whole read-modify-write, so
//! concurrent unlocks cannot lose updates and concurrent growth cannot
//! overshoot its target.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ListingStore, ListingStoreError};
use crate::domain::{Listing, ListingId};

#[derive(Debug, Default)]
struct Entries {
    order: Vec<ListingId>,
    by_id: HashMap<ListingId, Listing>,
}

/// Process-local [`ListingStore`].
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    entries: RwLock<Entries>,
}

impl InMemoryListingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn count(&self) -> Result<usize, ListingStoreError> {
        Ok(self.entries.read().await.order.len())
    }

    async fn extend_to(
        &self,
        target_len: usize,
        candidates: Vec<Listing>,
    ) -> Result<usize, ListingStoreError> {
        let mut entries = self.entries.write().await;
        let needed = target_len.saturating_sub(entries.order.len());
        let accepted: Vec<Listing> = candidates.into_iter().take(needed).collect();

        let mut seen = HashSet::with_capacity(accepted.len());
        if let Some(duplicate) = accepted
            .iter()
            .map(Listing::id)
            .find(|id| entries.by_id.contains_key(*id) || !seen.insert(*id))
        {
            return Err(ListingStoreError::duplicate_id(duplicate.as_str()));
        }

        for listing in accepted {
            entries.order.push(listing.id().clone());
            entries.by_id.insert(listing.id().clone(), listing);
        }
        Ok(entries.order.len())
    }

    async fn slice(&self, offset: usize, limit: usize) -> Result<Vec<Listing>, ListingStoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| entries.by_id.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: &ListingId) -> Result<Option<Listing>, ListingStoreError> {
        Ok(self.entries.read().await.by_id.get(id).cloned())
    }

    async fn mark_unlocked(&self, id: &ListingId) -> Result<Option<Listing>, ListingStoreError> {
        let mut entries = self.entries.write().await;
        Ok(entries.by_id.get_mut(id).map(|listing| {
            listing.mark_unlocked();
            listing.clone()
        }))
    }
}
