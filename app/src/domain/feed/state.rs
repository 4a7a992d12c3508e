//! Feed phases and the transitions between them.

use pagination::{Page, PageNumber};

use crate::domain::Listing;

/// Where the feed is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    /// Nothing in flight; more pages may exist.
    #[default]
    Idle,
    /// The first page is being fetched.
    LoadingFirstPage,
    /// A follow-up page is being fetched.
    LoadingNextPage,
    /// Page 1 is being re-fetched to replace the list.
    Refreshing,
    /// The last page has been loaded.
    Exhausted,
    /// The first page failed to load.
    Error,
}

impl FeedPhase {
    /// Whether a fetch is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::LoadingFirstPage | Self::LoadingNextPage | Self::Refreshing
        )
    }
}

/// Why an operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch already owns the feed.
    InFlight,
    /// There are no more pages.
    Exhausted,
    /// No page has loaded yet, or the first load failed.
    NotStarted,
}

/// Rendering copy of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    items: Vec<Listing>,
    current_page: u32,
    total_pages: u32,
    phase: FeedPhase,
}

impl FeedSnapshot {
    /// Listings in display order.
    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    /// Highest page appended so far; `0` before the first load.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count reported by the last successful fetch.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Current phase.
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Whether any fetch is in flight, refreshes included.
    pub fn is_loading(&self) -> bool {
        self.phase.is_busy()
    }

    /// Whether pull-to-refresh is active.
    pub fn is_refreshing(&self) -> bool {
        self.phase == FeedPhase::Refreshing
    }

    /// Whether scrolling further may load more.
    pub fn has_more(&self) -> bool {
        self.phase != FeedPhase::Exhausted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RequestKind {
    Initial,
    Next,
    Refresh,
}

/// A fetch the state has agreed to, tagged with its generation.
#[derive(Debug, Clone, Copy)]
pub(super) struct Ticket {
    pub(super) kind: RequestKind,
    pub(super) page: PageNumber,
    pub(super) token: u64,
}

#[derive(Debug, Default)]
pub(super) struct FeedState {
    items: Vec<Listing>,
    current_page: u32,
    total_pages: u32,
    phase: FeedPhase,
    resume: FeedPhase,
    generation: u64,
}

impl FeedState {
    /// Claim the feed for `kind`, or explain why it cannot start.
    pub(super) fn begin(&mut self, kind: RequestKind) -> Result<Ticket, SkipReason> {
        let page = match kind {
            RequestKind::Initial => {
                match self.phase {
                    FeedPhase::Idle | FeedPhase::Error => {}
                    FeedPhase::Exhausted => return Err(SkipReason::Exhausted),
                    _ => return Err(SkipReason::InFlight),
                }
                self.resume = FeedPhase::Error;
                self.phase = FeedPhase::LoadingFirstPage;
                PageNumber::FIRST
            }
            RequestKind::Next => {
                match self.phase {
                    phase if phase.is_busy() => return Err(SkipReason::InFlight),
                    FeedPhase::Exhausted => return Err(SkipReason::Exhausted),
                    FeedPhase::Error => return Err(SkipReason::NotStarted),
                    _ if self.current_page == 0 => return Err(SkipReason::NotStarted),
                    _ => {}
                }
                let next = PageNumber::new(self.current_page)
                    .ok()
                    .and_then(PageNumber::next)
                    .ok_or(SkipReason::Exhausted)?;
                self.resume = self.phase;
                self.phase = FeedPhase::LoadingNextPage;
                next
            }
            RequestKind::Refresh => {
                self.resume = match self.phase {
                    FeedPhase::Refreshing | FeedPhase::LoadingFirstPage => {
                        return Err(SkipReason::InFlight);
                    }
                    FeedPhase::LoadingNextPage => FeedPhase::Idle,
                    other => other,
                };
                self.phase = FeedPhase::Refreshing;
                PageNumber::FIRST
            }
        };
        self.generation = self.generation.wrapping_add(1);
        Ok(Ticket {
            kind,
            page,
            token: self.generation,
        })
    }

    /// Whether `token` belongs to the latest issued request.
    pub(super) fn is_current(&self, token: u64) -> bool {
        self.generation == token
    }

    /// Apply a successful fetch; returns the number of listings received.
    pub(super) fn complete(&mut self, ticket: Ticket, page: Page<Listing>) -> usize {
        let total_pages = page.total_pages();
        let items = page.into_items();
        let received = items.len();
        match ticket.kind {
            RequestKind::Initial | RequestKind::Refresh => self.items = items,
            RequestKind::Next => self.items.extend(items),
        }
        self.current_page = ticket.page.get();
        self.total_pages = total_pages;
        self.phase = if self.current_page >= total_pages {
            FeedPhase::Exhausted
        } else {
            FeedPhase::Idle
        };
        received
    }

    /// Leave the loading phase after a failed fetch; items stay untouched.
    pub(super) fn fail(&mut self) {
        self.phase = self.resume;
    }

    pub(super) fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::test_support::page;
    use rstest::rstest;

    fn loaded(total_pages: u32) -> FeedState {
        let mut state = FeedState::default();
        let ticket = state.begin(RequestKind::Initial).expect("initial load starts");
        state.complete(ticket, page(1, 10, total_pages));
        state
    }

    #[rstest]
    fn next_page_waits_for_first_load() {
        let mut state = FeedState::default();
        assert_eq!(
            state.begin(RequestKind::Next).map(|ticket| ticket.page),
            Err(SkipReason::NotStarted)
        );
    }

    #[rstest]
    fn next_page_follows_current_page() {
        let mut state = loaded(3);
        let ticket = state.begin(RequestKind::Next).expect("next page starts");
        assert_eq!(ticket.page.get(), 2);
        assert_eq!(state.snapshot().phase(), FeedPhase::LoadingNextPage);
        assert_eq!(
            state.begin(RequestKind::Next).map(|t| t.token),
            Err(SkipReason::InFlight)
        );
    }

    #[rstest]
    #[case(1, FeedPhase::Exhausted)]
    #[case(2, FeedPhase::Idle)]
    fn single_page_feed_is_exhausted(#[case] total_pages: u32, #[case] phase: FeedPhase) {
        let state = loaded(total_pages);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase(), phase);
        assert_eq!(snapshot.has_more(), phase != FeedPhase::Exhausted);
    }

    #[rstest]
    fn refresh_preempts_next_page() {
        let mut state = loaded(3);
        let next = state.begin(RequestKind::Next).expect("next page starts");
        let refresh = state.begin(RequestKind::Refresh).expect("refresh starts");
        assert!(!state.is_current(next.token));
        assert!(state.is_current(refresh.token));

        state.fail();
        assert_eq!(state.snapshot().phase(), FeedPhase::Idle);
    }

    #[rstest]
    #[case(RequestKind::Next)]
    #[case(RequestKind::Refresh)]
    fn every_fetch_counts_as_loading(#[case] kind: RequestKind) {
        let mut state = loaded(3);
        assert!(!state.snapshot().is_loading());

        state.begin(kind).expect("fetch starts");
        let snapshot = state.snapshot();
        assert!(snapshot.is_loading());
        assert_eq!(snapshot.is_refreshing(), kind == RequestKind::Refresh);
    }

    #[rstest]
    fn refresh_is_refused_while_refreshing() {
        let mut state = loaded(3);
        state.begin(RequestKind::Refresh).expect("refresh starts");
        assert_eq!(
            state.begin(RequestKind::Refresh).map(|t| t.token),
            Err(SkipReason::InFlight)
        );
    }

    #[rstest]
    fn failed_first_load_enters_error_and_can_retry() {
        let mut state = FeedState::default();
        state.begin(RequestKind::Initial).expect("initial load starts");
        state.fail();
        assert_eq!(state.snapshot().phase(), FeedPhase::Error);
        assert!(state.begin(RequestKind::Initial).is_ok());
    }

    #[rstest]
    fn refresh_replaces_appended_pages() {
        let mut state = loaded(3);
        let next = state.begin(RequestKind::Next).expect("next page starts");
        state.complete(next, page(2, 10, 3));
        assert_eq!(state.snapshot().items().len(), 20);

        let refresh = state.begin(RequestKind::Refresh).expect("refresh starts");
        state.complete(refresh, page(1, 10, 3));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.items().len(), 10);
        assert_eq!(snapshot.current_page(), 1);
    }
}
