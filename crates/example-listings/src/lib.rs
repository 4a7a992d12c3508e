//! Deterministic example property listings for the simulated listing service.
//!
//! This crate fabricates believable, reproducible listing records from a
//! numeric seed. It is independent of the application's domain types so the
//! simulated service can map [`ListingSeed`] values into its own model.
//!
//! # Overview
//!
//! - Seeded `ChaCha8` generation: the same seed yields the same listings
//! - Street addresses and descriptions from `fake`
//! - Optional [`Anchor`] placing listings within a radius of a coordinate
//!
//! # Example
//!
//! ```
//! use example_listings::{Anchor, ListingGenerator};
//!
//! let mut generator = ListingGenerator::new(7);
//! let anchor = Anchor::new(51.5007, -0.1246, 20.0).expect("valid anchor");
//! let listings = generator.generate_batch(3, Some(&anchor));
//!
//! assert_eq!(listings.len(), 3);
//! assert!(listings.iter().all(|listing| !listing.address.is_empty()));
//! ```

mod anchor;
mod error;
mod generator;
mod seed;

pub use anchor::Anchor;
pub use error::GenerationError;
pub use generator::ListingGenerator;
pub use seed::ListingSeed;
