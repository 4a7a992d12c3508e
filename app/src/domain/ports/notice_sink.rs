//! Port through which controllers surface user-visible notices.

use crate::domain::Notice;

/// Receives notices for display.
///
/// Publishing is fire-and-forget: a sink that cannot deliver a notice drops
/// it rather than failing the operation that raised it.
#[cfg_attr(test, mockall::automock)]
pub trait NoticeSink: Send + Sync {
    /// Hand a notice to the presentation layer.
    fn publish(&self, notice: Notice);
}
