//! Application core for the home unlock mobile app.
//!
//! The presentation layer (screens, navigation, styling) lives elsewhere and
//! drives the controllers exposed here:
//!
//! - [`domain::SessionController`]: login form submission and session state
//! - [`domain::FeedController`]: paginated, incrementally loaded listing feed
//! - [`domain::DetailController`]: single listing view and proximity-gated
//!   unlock
//!
//! Controllers talk to the outside world through the ports in
//! [`domain::ports`]. The [`outbound`] module provides the simulated
//! in-memory listing service, an HTTP/JSON listing client and helper
//! adapters; [`wiring`] assembles them from [`config::AppSettings`].

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
pub mod wiring;
