//! Generated listing seed type.
//!
//! Independent of the application's `Listing` so that the simulated service
//! decides how (and whether) to validate generated values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated example property listing.
///
/// # Example
///
/// ```
/// use example_listings::ListingSeed;
/// use uuid::Uuid;
///
/// let listing = ListingSeed {
///     id: Uuid::nil(),
///     address: "12 Mill Lane".to_owned(),
///     image_url: "https://loremflickr.com/640/480/house?lock=1".to_owned(),
///     description: "Bright and quiet.".to_owned(),
///     latitude: 51.5,
///     longitude: -0.12,
///     price: 250_000,
///     bedrooms: 3,
///     bathrooms: 2,
///     square_footage: 1_400,
/// };
///
/// assert_eq!(listing.bedrooms, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSeed {
    /// Unique identifier, drawn from the generator's RNG.
    pub id: Uuid,
    /// Street address including an optional secondary unit.
    pub address: String,
    /// Placeholder photo URL.
    pub image_url: String,
    /// Free-text description.
    pub description: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Asking price in whole currency units.
    pub price: u32,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Interior area in square feet.
    pub square_footage: u32,
}
