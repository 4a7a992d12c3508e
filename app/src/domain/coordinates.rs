//! Geographic coordinate value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation failures for [`Coordinates`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinatesValidationError {
    /// A latitude or longitude was non-finite or outside its range.
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for CoordinatesValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "{field} is out of range or not finite: {value}")
            }
        }
    }
}

impl std::error::Error for CoordinatesValidationError {}

/// A point on the globe in degrees.
///
/// ## Invariants
/// - `latitude` is finite and within `[-90, 90]`.
/// - `longitude` is finite and within `[-180, 180]`.
///
/// Because both components are always finite, distance calculations over
/// `Coordinates` never produce `NaN`.
///
/// # Examples
/// ```
/// use home_unlock::domain::Coordinates;
///
/// let tower = Coordinates::new(48.8584, 2.2945).expect("valid point");
/// assert_eq!(tower.latitude(), 48.8584);
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 181.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesDto", into = "CoordinatesDto")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesValidationError> {
        validate_component("latitude", latitude, 90.0)?;
        validate_component("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

fn validate_component(
    field: &'static str,
    value: f64,
    bound: f64,
) -> Result<(), CoordinatesValidationError> {
    if !value.is_finite() || !(-bound..=bound).contains(&value) {
        return Err(CoordinatesValidationError::OutOfRange { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinatesDto {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinates> for CoordinatesDto {
    fn from(value: Coordinates) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<CoordinatesDto> for Coordinates {
    type Error = CoordinatesValidationError;

    fn try_from(value: CoordinatesDto) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}
