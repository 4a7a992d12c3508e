//! Tests for the listing detail controller.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    GeolocationError, ListingServiceError, MockGeolocationProvider, MockListingService,
    MockNoticeSink, UnlockRejection,
};
use crate::domain::test_support::listing_at;
use crate::domain::{Coordinates, ErrorCode};

type TestDetail = DetailController<MockListingService, MockGeolocationProvider>;

const HOME_LAT: f64 = 51.5007;
const HOME_LNG: f64 = -0.1246;

fn home_id() -> ListingId {
    ListingId::new("home-1").expect("valid id")
}

fn at_home() -> Coordinates {
    Coordinates::new(HOME_LAT, HOME_LNG).expect("valid coordinates")
}

/// Roughly 111 metres north of the listing.
fn down_the_road() -> Coordinates {
    Coordinates::new(HOME_LAT + 0.001, HOME_LNG).expect("valid coordinates")
}

fn service_with_listing() -> MockListingService {
    let mut service = MockListingService::new();
    service
        .expect_fetch_by_id()
        .withf(|id| id.as_str() == "home-1")
        .times(1)
        .returning(|_| Ok(Some(listing_at("home-1", HOME_LAT, HOME_LNG))));
    service
}

fn located_at(position: Coordinates) -> MockGeolocationProvider {
    let mut geolocation = MockGeolocationProvider::new();
    geolocation.expect_request_permission().never();
    geolocation
        .expect_permission_status()
        .returning(|| Ok(LocationPermission::Granted));
    geolocation
        .expect_current_position()
        .returning(move || Ok(position));
    geolocation
}

fn silent_notices() -> MockNoticeSink {
    let mut notices = MockNoticeSink::new();
    notices.expect_publish().never();
    notices
}

fn notices_expecting(title: &'static str, body: &'static str) -> MockNoticeSink {
    let mut notices = MockNoticeSink::new();
    notices
        .expect_publish()
        .withf(move |notice| notice.title() == title && notice.body() == body)
        .times(1)
        .return_const(());
    notices
}

fn make_detail(
    service: MockListingService,
    geolocation: MockGeolocationProvider,
    notices: MockNoticeSink,
) -> TestDetail {
    DetailController::new(
        home_id(),
        Arc::new(service),
        Arc::new(geolocation),
        Arc::new(notices),
        DetailSettings::default(),
    )
}

#[tokio::test]
async fn loaded_listing_nearby_offers_unlock() {
    let detail = make_detail(service_with_listing(), located_at(at_home()), silent_notices());

    let outcome = detail.load_details().await;

    assert_eq!(
        outcome,
        DetailOutcome::Loaded(ProximityStatus::Nearby { distance_km: 0.0 })
    );
    let snapshot = detail.snapshot();
    assert!(snapshot.listing().is_some());
    assert!(snapshot.can_unlock());
    assert!(!snapshot.is_loading());
}

#[tokio::test]
async fn details_are_fetched_once_per_instance() {
    let detail = make_detail(service_with_listing(), located_at(at_home()), silent_notices());

    detail.load_details().await;
    assert_eq!(detail.load_details().await, DetailOutcome::AlreadyRequested);
}

#[tokio::test]
async fn missing_listing_stays_pending_without_notice() {
    let mut service = MockListingService::new();
    service.expect_fetch_by_id().times(1).returning(|_| Ok(None));
    let mut geolocation = MockGeolocationProvider::new();
    geolocation.expect_permission_status().never();

    let detail = make_detail(service, geolocation, silent_notices());

    assert_eq!(detail.load_details().await, DetailOutcome::NotFound);
    let snapshot = detail.snapshot();
    assert!(snapshot.listing().is_none());
    assert_eq!(snapshot.proximity(), ProximityStatus::Pending);
    assert!(snapshot.is_loading());
}

#[tokio::test]
async fn fetch_failure_is_logged_not_notified() {
    let mut service = MockListingService::new();
    service
        .expect_fetch_by_id()
        .times(1)
        .returning(|_| Err(ListingServiceError::unavailable("dns failure")));

    let detail = make_detail(service, MockGeolocationProvider::new(), silent_notices());

    let outcome = detail.load_details().await;
    let DetailOutcome::Failed(error) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(detail.snapshot().listing().is_none());
}

#[tokio::test]
async fn denied_permission_disables_unlock_for_the_visit() {
    let mut geolocation = MockGeolocationProvider::new();
    geolocation.expect_request_permission().never();
    geolocation
        .expect_permission_status()
        .times(1)
        .returning(|| Ok(LocationPermission::Denied));
    geolocation.expect_current_position().never();

    let mut service = service_with_listing();
    service.expect_unlock().never();

    let detail = make_detail(service, geolocation, silent_notices());
    detail.load_details().await;

    let denied = ProximityStatus::Unavailable(ProximityUnavailable::PermissionDenied);
    assert_eq!(detail.snapshot().proximity(), denied);
    assert_eq!(detail.evaluate_proximity().await, denied);
    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Skipped(UnlockSkip::NotNearby)
    );
}

#[tokio::test]
async fn distant_user_cannot_unlock() {
    let mut service = service_with_listing();
    service.expect_unlock().never();

    let detail = make_detail(service, located_at(down_the_road()), silent_notices());
    let outcome = detail.load_details().await;

    let DetailOutcome::Loaded(ProximityStatus::Distant { distance_km }) = outcome else {
        panic!("expected a distant listing, got {outcome:?}");
    };
    assert!((distance_km - 0.111).abs() < 0.001);
    assert!(!detail.snapshot().can_unlock());
    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Skipped(UnlockSkip::NotNearby)
    );
}

#[rstest]
#[case(GeolocationError::unavailable("no satellites"))]
#[case(GeolocationError::timed_out())]
#[tokio::test]
async fn position_failure_is_unavailable(#[case] failure: GeolocationError) {
    let mut geolocation = MockGeolocationProvider::new();
    geolocation
        .expect_permission_status()
        .returning(|| Ok(LocationPermission::Granted));
    geolocation
        .expect_current_position()
        .returning(move || Err(failure.clone()));

    let detail = make_detail(service_with_listing(), geolocation, silent_notices());
    detail.load_details().await;

    assert_eq!(
        detail.snapshot().proximity(),
        ProximityStatus::Unavailable(ProximityUnavailable::PositionUnavailable)
    );
}

#[tokio::test]
async fn unlock_before_load_never_calls_service() {
    let mut service = MockListingService::new();
    service.expect_unlock().never();

    let detail = make_detail(service, MockGeolocationProvider::new(), silent_notices());

    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Skipped(UnlockSkip::NoListing)
    );
}

#[tokio::test]
async fn successful_unlock_marks_listing_and_is_final() {
    let mut service = service_with_listing();
    service
        .expect_unlock()
        .withf(|id| id.as_str() == "home-1")
        .times(1)
        .returning(|_| {
            let mut listing = listing_at("home-1", HOME_LAT, HOME_LNG);
            listing.mark_unlocked();
            Ok(UnlockOutcome::Unlocked(listing))
        });

    let detail = make_detail(
        service,
        located_at(at_home()),
        notices_expecting("Success", "Home unlocked successfully!"),
    );
    detail.load_details().await;

    assert_eq!(detail.unlock().await, UnlockAttempt::Unlocked);
    let snapshot = detail.snapshot();
    assert!(snapshot.listing().is_some_and(Listing::is_unlocked));
    assert!(!snapshot.is_unlocking());
    assert!(!snapshot.can_unlock());
    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Skipped(UnlockSkip::AlreadyUnlocked)
    );
}

#[tokio::test]
async fn rejected_unlock_notifies_and_stays_locked() {
    let mut service = service_with_listing();
    service
        .expect_unlock()
        .times(1)
        .returning(|_| Ok(UnlockOutcome::Rejected(UnlockRejection::Declined)));

    let detail = make_detail(
        service,
        located_at(at_home()),
        notices_expecting("Error", "Failed to unlock the home."),
    );
    detail.load_details().await;

    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Rejected(UnlockRejection::Declined)
    );
    let snapshot = detail.snapshot();
    assert!(snapshot.listing().is_some_and(|listing| !listing.is_unlocked()));
    assert!(snapshot.can_unlock());
}

#[tokio::test]
async fn failed_unlock_notifies_with_generic_error() {
    let mut service = service_with_listing();
    service
        .expect_unlock()
        .times(1)
        .returning(|_| Err(ListingServiceError::unavailable("socket closed")));

    let detail = make_detail(
        service,
        located_at(at_home()),
        notices_expecting("Error", "An error occurred while unlocking the home."),
    );
    detail.load_details().await;

    assert!(matches!(detail.unlock().await, UnlockAttempt::Failed(_)));
    assert!(!detail.snapshot().is_unlocking());
}

#[tokio::test]
async fn teardown_stops_further_work() {
    let mut service = MockListingService::new();
    service.expect_fetch_by_id().never();
    service.expect_unlock().never();

    let detail = make_detail(service, MockGeolocationProvider::new(), silent_notices());
    detail.teardown();

    assert_eq!(detail.load_details().await, DetailOutcome::Stale);
    assert_eq!(
        detail.unlock().await,
        UnlockAttempt::Skipped(UnlockSkip::TornDown)
    );
}
