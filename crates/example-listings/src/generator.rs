//! Deterministic listing generation.
//!
//! A [`ListingGenerator`] owns a seeded RNG, so successive calls continue the
//! same reproducible stream. Two generators built from the same seed and
//! driven with the same calls produce identical listings.

use std::f64::consts::TAU;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, SecondaryAddress, StreetName};
use fake::faker::lorem::raw::Paragraph;
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::{Anchor, ListingSeed};

/// Lowest generated asking price.
const MIN_PRICE: u32 = 100_000;

/// Highest generated asking price.
const MAX_PRICE: u32 = 1_000_000;

/// Bedroom count bounds.
const BEDROOMS: (u32, u32) = (1, 5);

/// Bathroom count bounds.
const BATHROOMS: (u32, u32) = (1, 4);

/// Interior area bounds in square feet.
const SQUARE_FOOTAGE: (u32, u32) = (500, 5_000);

/// Upper bound (exclusive) of the placeholder image lock parameter.
const IMAGE_LOCK_MAX: u32 = 100_000;

/// Probability that an address includes a secondary unit.
const SECONDARY_ADDRESS_PROBABILITY: f64 = 0.5;

/// Seeded listing generator.
///
/// # Example
///
/// ```
/// use example_listings::ListingGenerator;
///
/// let first = ListingGenerator::new(42).generate_batch(5, None);
/// let second = ListingGenerator::new(42).generate_batch(5, None);
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct ListingGenerator {
    rng: ChaCha8Rng,
}

impl ListingGenerator {
    /// Create a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate one listing, optionally placed within `anchor`'s spread.
    pub fn generate(&mut self, anchor: Option<&Anchor>) -> ListingSeed {
        let id = Uuid::from_u128(self.rng.random());
        let address = self.address();
        let image_url = format!(
            "https://loremflickr.com/640/480/house?lock={}",
            self.rng.random_range(1..IMAGE_LOCK_MAX)
        );
        let description: String = Paragraph(EN, 3..6).fake_with_rng(&mut self.rng);
        let (latitude, longitude) = self.coordinates(anchor);

        ListingSeed {
            id,
            address,
            image_url,
            description,
            latitude,
            longitude,
            price: self.rng.random_range(MIN_PRICE..=MAX_PRICE),
            bedrooms: self.rng.random_range(BEDROOMS.0..=BEDROOMS.1),
            bathrooms: self.rng.random_range(BATHROOMS.0..=BATHROOMS.1),
            square_footage: self.rng.random_range(SQUARE_FOOTAGE.0..=SQUARE_FOOTAGE.1),
        }
    }

    /// Generate `count` listings sharing the same optional anchor.
    pub fn generate_batch(&mut self, count: usize, anchor: Option<&Anchor>) -> Vec<ListingSeed> {
        (0..count).map(|_| self.generate(anchor)).collect()
    }

    fn address(&mut self) -> String {
        let number: String = BuildingNumber(EN).fake_with_rng(&mut self.rng);
        let street: String = StreetName(EN).fake_with_rng(&mut self.rng);
        if self.rng.random_bool(SECONDARY_ADDRESS_PROBABILITY) {
            let unit: String = SecondaryAddress(EN).fake_with_rng(&mut self.rng);
            format!("{number} {street} {unit}")
        } else {
            format!("{number} {street}")
        }
    }

    fn coordinates(&mut self, anchor: Option<&Anchor>) -> (f64, f64) {
        match anchor {
            Some(anchor) => {
                // sqrt keeps points uniformly distributed over the disc.
                let fraction: f64 = self.rng.random();
                let distance = anchor.spread_metres() * fraction.sqrt();
                let bearing = self.rng.random_range(0.0..TAU);
                anchor.offset(distance, bearing)
            }
            None => (
                self.rng.random_range(-90.0..=90.0),
                self.rng.random_range(-180.0..=180.0),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

    fn haversine_metres(a: (f64, f64), b: (f64, f64)) -> f64 {
        let d_lat = (b.0 - a.0).to_radians();
        let d_lng = (b.1 - a.1).to_radians();
        let h = (d_lat / 2.0).sin().powi(2)
            + a.0.to_radians().cos() * b.0.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METRES * h.sqrt().asin()
    }

    #[fixture]
    fn anchor() -> Anchor {
        Anchor::new(37.7749, -122.4194, 25.0).expect("valid anchor")
    }

    #[rstest]
    fn generation_is_deterministic() {
        let first = ListingGenerator::new(9).generate_batch(20, None);
        let second = ListingGenerator::new(9).generate_batch(20, None);
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_produce_different_listings() {
        let first = ListingGenerator::new(1).generate(None);
        let second = ListingGenerator::new(2).generate(None);
        assert_ne!(first.id, second.id);
    }

    #[rstest]
    fn identifiers_are_unique_within_a_stream() {
        let listings = ListingGenerator::new(3).generate_batch(200, None);
        let ids: std::collections::HashSet<_> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), listings.len());
    }

    #[rstest]
    fn numeric_fields_stay_within_bounds() {
        for listing in ListingGenerator::new(5).generate_batch(100, None) {
            assert!((MIN_PRICE..=MAX_PRICE).contains(&listing.price));
            assert!((BEDROOMS.0..=BEDROOMS.1).contains(&listing.bedrooms));
            assert!((BATHROOMS.0..=BATHROOMS.1).contains(&listing.bathrooms));
            assert!((SQUARE_FOOTAGE.0..=SQUARE_FOOTAGE.1).contains(&listing.square_footage));
            assert!((-90.0..=90.0).contains(&listing.latitude));
            assert!((-180.0..=180.0).contains(&listing.longitude));
            assert!(!listing.description.is_empty());
            assert!(listing.image_url.starts_with("https://loremflickr.com/"));
        }
    }

    #[rstest]
    fn anchored_listings_stay_within_spread(anchor: Anchor) {
        let centre = (anchor.latitude(), anchor.longitude());
        for listing in ListingGenerator::new(11).generate_batch(100, Some(&anchor)) {
            let distance = haversine_metres(centre, (listing.latitude, listing.longitude));
            // Offsets use a slightly larger sphere than this check.
            assert!(
                distance <= anchor.spread_metres() + 0.5,
                "listing {} is {distance} m away",
                listing.id
            );
        }
    }

    #[rstest]
    fn zero_spread_places_listings_on_the_anchor() {
        let anchor = Anchor::new(-33.8688, 151.2093, 0.0).expect("valid anchor");
        let listing = ListingGenerator::new(4).generate(Some(&anchor));
        assert!((listing.latitude - anchor.latitude()).abs() < 1e-12);
        assert!((listing.longitude - anchor.longitude()).abs() < 1e-12);
    }
}
