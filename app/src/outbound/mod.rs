//! Outbound adapters implementing the domain ports.
//!
//! - **simulated**: in-process listing service over a listing store
//! - **store**: in-memory listing store with serialised writes
//! - **http**: reqwest client for a JSON listing API
//! - **geolocation**: fixed-answer geolocation provider
//! - **notices**: channel and tracing notice sinks
//!
//! Adapters are thin translators between domain types and their own
//! representations. They contain no screen logic.

pub mod geolocation;
pub mod http;
pub mod notices;
pub mod simulated;
pub mod store;

pub use geolocation::StaticGeolocation;
pub use http::HttpListingService;
pub use notices::{ChannelNoticeSink, TracingNoticeSink};
pub use simulated::{SimulatedLatency, SimulatedListingService, SimulatedSettings};
pub use store::InMemoryListingStore;
