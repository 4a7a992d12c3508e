//! Property listing aggregate.
//!
//! A [`Listing`] is created by the listing service the first time its page
//! is requested and afterwards only changes through the unlock mutation.
//! Listings serialise with camelCase field names and flat coordinates, the
//! shape the listing API exchanges:
//!
//! ```json
//! {
//!   "id": "9b2f...", "address": "12 Mill Lane", "imageUrl": "https://...",
//!   "description": "...", "latitude": 51.5, "longitude": -0.12,
//!   "price": 250000, "bedrooms": 3, "bathrooms": 2,
//!   "squareFootage": 1400, "isUnlocked": false
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Coordinates, CoordinatesValidationError};

/// Opaque listing identifier.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use home_unlock::domain::ListingId;
    ///
    /// let id = ListingId::new("a1b2").expect("valid id");
    /// assert_eq!(id.as_str(), "a1b2");
    /// assert!(ListingId::new(" a1b2").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ListingValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ListingValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(ListingValidationError::PaddedId);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for ListingId {
    type Error = ListingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

/// Validation errors raised when building listings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingValidationError {
    /// Identifier is blank.
    #[error("listing id must not be empty")]
    EmptyId,
    /// Identifier has leading or trailing whitespace.
    #[error("listing id must not contain surrounding whitespace")]
    PaddedId,
    /// Address is blank.
    #[error("listing address must not be empty")]
    EmptyAddress,
    /// A count or amount that must be positive was zero.
    #[error("listing {field} must be positive")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Coordinates are invalid.
    #[error("listing coordinates are invalid: {0}")]
    Coordinates(#[from] CoordinatesValidationError),
}

/// Unvalidated listing fields, as exchanged with listing services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    /// Opaque identifier.
    pub id: String,
    /// Street address.
    pub address: String,
    /// Photo URL.
    #[serde(alias = "image")]
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
    /// Whether the current user has unlocked the property.
    #[serde(default)]
    pub is_unlocked: bool,
}

/// A property listing.
///
/// ## Invariants
/// - `price`, `bedrooms`, `bathrooms` and `square_footage` are positive.
/// - `address` is non-empty.
/// - `is_unlocked` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ListingDraft", into = "ListingDraft")]
pub struct Listing {
    id: ListingId,
    address: String,
    image_url: String,
    description: String,
    coordinates: Coordinates,
    price: u32,
    bedrooms: u32,
    bathrooms: u32,
    square_footage: u32,
    is_unlocked: bool,
}

impl Listing {
    /// Validate a draft into a listing.
    ///
    /// # Examples
    /// ```
    /// use home_unlock::domain::{Listing, ListingDraft};
    ///
    /// let listing = Listing::try_from_draft(ListingDraft {
    ///     id: "home-1".to_owned(),
    ///     address: "12 Mill Lane".to_owned(),
    ///     image_url: "https://loremflickr.com/640/480/house?lock=1".to_owned(),
    ///     description: "Bright and quiet.".to_owned(),
    ///     latitude: 51.5,
    ///     longitude: -0.12,
    ///     price: 250_000,
    ///     bedrooms: 3,
    ///     bathrooms: 2,
    ///     square_footage: 1_400,
    ///     is_unlocked: false,
    /// })
    /// .expect("valid listing");
    ///
    /// assert_eq!(listing.id().as_str(), "home-1");
    /// assert!(!listing.is_unlocked());
    /// ```
    pub fn try_from_draft(draft: ListingDraft) -> Result<Self, ListingValidationError> {
        let ListingDraft {
            id,
            address,
            image_url,
            description,
            latitude,
            longitude,
            price,
            bedrooms,
            bathrooms,
            square_footage,
            is_unlocked,
        } = draft;

        let id = ListingId::new(id)?;
        if address.trim().is_empty() {
            return Err(ListingValidationError::EmptyAddress);
        }
        for (field, value) in [
            ("price", price),
            ("bedrooms", bedrooms),
            ("bathrooms", bathrooms),
            ("square_footage", square_footage),
        ] {
            if value == 0 {
                return Err(ListingValidationError::NotPositive { field });
            }
        }
        let coordinates = Coordinates::new(latitude, longitude)?;

        Ok(Self {
            id,
            address,
            image_url,
            description,
            coordinates,
            price,
            bedrooms,
            bathrooms,
            square_footage,
            is_unlocked,
        })
    }

    /// Listing identifier.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Street address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Photo URL.
    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Location of the property.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Asking price in whole currency units.
    pub fn price(&self) -> u32 {
        self.price
    }

    /// Number of bedrooms.
    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    /// Number of bathrooms.
    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    /// Interior area in square feet.
    pub fn square_footage(&self) -> u32 {
        self.square_footage
    }

    /// Whether the current user has unlocked the property.
    pub fn is_unlocked(&self) -> bool {
        self.is_unlocked
    }

    /// Mark the listing unlocked. Unlocking is one-way.
    pub fn mark_unlocked(&mut self) {
        self.is_unlocked = true;
    }
}

impl TryFrom<ListingDraft> for Listing {
    type Error = ListingValidationError;

    fn try_from(value: ListingDraft) -> Result<Self, Self::Error> {
        Self::try_from_draft(value)
    }
}

impl From<Listing> for ListingDraft {
    fn from(value: Listing) -> Self {
        Self {
            id: value.id.into(),
            address: value.address,
            image_url: value.image_url,
            description: value.description,
            latitude: value.coordinates.latitude(),
            longitude: value.coordinates.longitude(),
            price: value.price,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            square_footage: value.square_footage,
            is_unlocked: value.is_unlocked,
        }
    }
}
