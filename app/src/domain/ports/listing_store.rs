//! Port for the keyed listing store behind the simulated service.
//!
//! The store keeps listings in insertion order and serialises every
//! mutation. Adapters must guarantee that two concurrent writes to the same
//! listing cannot lose an update and that concurrent [`ListingStore::extend_to`]
//! calls never grow the store past the requested length.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing store adapters.
    pub enum ListingStoreError {
        /// Storage backend failure.
        Backend { message: String } => "listing store backend failure: {message}",
        /// A listing with this id is already stored.
        DuplicateId { id: String } => "listing {id} is already stored",
    }
}

/// Ordered, keyed listing storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Number of stored listings.
    async fn count(&self) -> Result<usize, ListingStoreError>;

    /// Append listings from `candidates` until the store holds `target_len`
    /// listings. Surplus candidates are dropped. Returns the resulting count.
    async fn extend_to(
        &self,
        target_len: usize,
        candidates: Vec<Listing>,
    ) -> Result<usize, ListingStoreError>;

    /// Listings at positions `offset..offset + limit`, clipped to the end.
    async fn slice(&self, offset: usize, limit: usize) -> Result<Vec<Listing>, ListingStoreError>;

    /// Look up one listing.
    async fn get(&self, id: &ListingId) -> Result<Option<Listing>, ListingStoreError>;

    /// Mark a listing unlocked and return the updated copy, or `None` when
    /// the id is unknown. Unlocking an unlocked listing is a no-op.
    async fn mark_unlocked(&self, id: &ListingId) -> Result<Option<Listing>, ListingStoreError>;
}
