//! In-process listing service that fabricates listings on demand.
//!
//! Listings are generated lazily: a page request grows the store until it
//! covers the requested range, anchoring new listings around the caller's
//! location when one is given. Calls sleep for a configurable latency and
//! unlocks succeed with a configurable, seeded probability.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use example_listings::{Anchor, ListingGenerator, ListingSeed};
use pagination::{Page, PageRequest, total_pages};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::time;
use tracing::debug;

use crate::domain::ports::{
    ListingService, ListingServiceError, ListingStore, ListingStoreError, UnlockOutcome,
    UnlockRejection,
};
use crate::domain::sync::lock;
use crate::domain::{Coordinates, Listing, ListingDraft, ListingId, LoginCredentials};

const DEMO_USERNAME: &str = "test";
const DEMO_PASSWORD: &str = "password";

/// Artificial delay before each call answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Delay for `authenticate`.
    pub login: Duration,
    /// Delay for `fetch_page`.
    pub page: Duration,
    /// Delay for `fetch_by_id`.
    pub detail: Duration,
    /// Delay for `unlock`.
    pub unlock: Duration,
}

impl SimulatedLatency {
    /// Answer immediately.
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            page: Duration::ZERO,
            detail: Duration::ZERO,
            unlock: Duration::ZERO,
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            page: Duration::from_millis(1000),
            detail: Duration::from_millis(500),
            unlock: Duration::from_millis(1000),
        }
    }
}

/// Tuning for [`SimulatedListingService`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSettings {
    /// Size of the simulated catalogue.
    pub total_listings: usize,
    /// Probability in `[0, 1]` that an unlock succeeds.
    pub unlock_success_ratio: f64,
    /// Seed for listing generation and unlock outcomes.
    pub seed: u64,
    /// Radius around the caller's location within which listings are placed.
    pub spread_metres: f64,
    /// Per-call delays.
    pub latency: SimulatedLatency,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            total_listings: 100,
            unlock_success_ratio: 0.8,
            seed: 0x5eed,
            spread_metres: 20.0,
            latency: SimulatedLatency::default(),
        }
    }
}

/// [`ListingService`] backed by a [`ListingStore`] and a seeded generator.
pub struct SimulatedListingService<T> {
    store: Arc<T>,
    settings: SimulatedSettings,
    generator: Mutex<ListingGenerator>,
    unlock_rng: Mutex<ChaCha8Rng>,
}

impl<T> SimulatedListingService<T> {
    /// Build a service over `store`.
    pub fn new(store: Arc<T>, settings: SimulatedSettings) -> Self {
        Self {
            store,
            generator: Mutex::new(ListingGenerator::new(settings.seed)),
            unlock_rng: Mutex::new(ChaCha8Rng::seed_from_u64(settings.seed.rotate_left(32))),
            settings,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &SimulatedSettings {
        &self.settings
    }

    fn anchor(&self, bias: Option<Coordinates>) -> Result<Option<Anchor>, ListingServiceError> {
        bias.map(|point| {
            Anchor::new(point.latitude(), point.longitude(), self.settings.spread_metres)
                .map_err(|error| ListingServiceError::invalid_request(error.to_string()))
        })
        .transpose()
    }

    fn generate(&self, count: usize, anchor: Option<&Anchor>) -> Result<Vec<Listing>, ListingServiceError> {
        let seeds = lock(&self.generator).generate_batch(count, anchor);
        seeds.into_iter().map(listing_from_seed).collect()
    }

    fn unlock_succeeds(&self) -> bool {
        let ratio = self.settings.unlock_success_ratio;
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        lock(&self.unlock_rng).random_bool(ratio)
    }
}

fn listing_from_seed(seed: ListingSeed) -> Result<Listing, ListingServiceError> {
    Listing::try_from_draft(ListingDraft {
        id: seed.id.to_string(),
        address: seed.address,
        image_url: seed.image_url,
        description: seed.description,
        latitude: seed.latitude,
        longitude: seed.longitude,
        price: seed.price,
        bedrooms: seed.bedrooms,
        bathrooms: seed.bathrooms,
        square_footage: seed.square_footage,
        is_unlocked: false,
    })
    .map_err(|error| ListingServiceError::unavailable(format!("generated listing invalid: {error}")))
}

fn map_store_error(error: ListingStoreError) -> ListingServiceError {
    ListingServiceError::unavailable(error.to_string())
}

#[async_trait]
impl<T> ListingService for SimulatedListingService<T>
where
    T: ListingStore,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, ListingServiceError> {
        time::sleep(self.settings.latency.login).await;
        Ok(credentials.username() == DEMO_USERNAME && credentials.password() == DEMO_PASSWORD)
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
        bias: Option<Coordinates>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        time::sleep(self.settings.latency.page).await;

        let total = self.settings.total_listings;
        let pages = total_pages(total, request.size());
        if request.number().get() > pages {
            debug!(page = request.number().get(), total_pages = pages, "page past the end");
            return Ok(Page::new(Vec::new(), request.number(), pages));
        }

        let end = request.end().min(total);
        let stored = self.store.count().await.map_err(map_store_error)?;
        if stored < end {
            let anchor = self.anchor(bias)?;
            let candidates = self.generate(end - stored, anchor.as_ref())?;
            let grown = self
                .store
                .extend_to(end, candidates)
                .await
                .map_err(map_store_error)?;
            debug!(stored, grown, anchored = anchor.is_some(), "generated listings");
        }

        let offset = request.offset();
        let items = self
            .store
            .slice(offset, end.saturating_sub(offset))
            .await
            .map_err(map_store_error)?;
        Ok(Page::new(items, request.number(), pages))
    }

    async fn fetch_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError> {
        time::sleep(self.settings.latency.detail).await;
        self.store.get(id).await.map_err(map_store_error)
    }

    async fn unlock(&self, id: &ListingId) -> Result<UnlockOutcome, ListingServiceError> {
        time::sleep(self.settings.latency.unlock).await;
        if !self.unlock_succeeds() {
            debug!(listing = %id, "simulated unlock declined");
            return Ok(UnlockOutcome::Rejected(UnlockRejection::Declined));
        }
        let updated = self.store.mark_unlocked(id).await.map_err(map_store_error)?;
        Ok(updated.map_or(
            UnlockOutcome::Rejected(UnlockRejection::UnknownListing),
            UnlockOutcome::Unlocked,
        ))
    }
}
