//! Shared doubles for the integration suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use home_unlock::domain::ports::{ListingService, ListingServiceError, UnlockOutcome};
use home_unlock::domain::{Coordinates, Listing, ListingDraft, ListingId, LoginCredentials, Notice};
use pagination::{Page, PageRequest};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::yield_now;

/// Listing at a fixed point in central London.
pub fn listing(id: &str) -> Listing {
    Listing::try_from_draft(ListingDraft {
        id: id.to_owned(),
        address: format!("{id} Whitehall"),
        image_url: format!("https://loremflickr.com/640/480/house?lock={id}"),
        description: "Gated test listing.".to_owned(),
        latitude: 51.5007,
        longitude: -0.1246,
        price: 350_000,
        bedrooms: 2,
        bathrooms: 1,
        square_footage: 900,
        is_unlocked: false,
    })
    .expect("fixture listing is valid")
}

/// Listing service whose calls wait for a permit.
///
/// Every call consumes one permit from a shared gate, so tests decide
/// exactly when, and in which order, calls complete. Calls are counted per
/// operation as soon as they start.
pub struct GatedListingService {
    total_pages: u32,
    gate: Arc<Semaphore>,
    auth_calls: AtomicUsize,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    unlock_calls: AtomicUsize,
}

impl GatedListingService {
    /// Service reporting `total_pages` pages with a closed gate.
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            gate: Arc::new(Semaphore::new(0)),
            auth_calls: AtomicUsize::new(0),
            page_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            unlock_calls: AtomicUsize::new(0),
        }
    }

    /// Let `count` more calls complete.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Number of `authenticate` calls started so far.
    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_page` calls started so far.
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_by_id` calls started so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Number of `unlock` calls started so far.
    pub fn unlock_calls(&self) -> usize {
        self.unlock_calls.load(Ordering::SeqCst)
    }

    async fn pass(&self, counter: &AtomicUsize) -> Result<(), ListingServiceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        self.gate
            .acquire()
            .await
            .map_err(|error| ListingServiceError::unavailable(error.to_string()))?
            .forget();
        Ok(())
    }
}

#[async_trait]
impl ListingService for GatedListingService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, ListingServiceError> {
        self.pass(&self.auth_calls).await?;
        Ok(credentials.password() == "password")
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
        _bias: Option<Coordinates>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        self.pass(&self.page_calls).await?;

        let number = request.number();
        let items = (0..request.size().get())
            .map(|index| listing(&format!("p{}-{index}", number.get())))
            .collect();
        Ok(Page::new(items, number, self.total_pages))
    }

    async fn fetch_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError> {
        self.pass(&self.detail_calls).await?;
        Ok(Some(listing(id.as_str())))
    }

    async fn unlock(&self, id: &ListingId) -> Result<UnlockOutcome, ListingServiceError> {
        self.pass(&self.unlock_calls).await?;
        let mut unlocked = listing(id.as_str());
        unlocked.mark_unlocked();
        Ok(UnlockOutcome::Unlocked(unlocked))
    }
}

/// Yield `yields` times, then let `permits` more calls complete.
///
/// Run inside `tokio::join!` next to the calls under test so each of them
/// reaches the gate before any is released.
pub async fn release_after_yields(service: &GatedListingService, yields: usize, permits: usize) {
    for _ in 0..yields {
        yield_now().await;
    }
    service.release(permits);
}

/// Drain every notice published so far.
pub fn drain(receiver: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = receiver.try_recv() {
        notices.push(notice);
    }
    notices
}
