//! Wire DTOs for the listing HTTP API.
//!
//! Responses decode into these transport shapes first and are then validated
//! into domain listings in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{UnlockOutcome, UnlockRejection};
use crate::domain::{Listing, ListingDraft};

const UNKNOWN_LISTING_REASON: &str = "unknown_listing";

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginResponseDto {
    pub(super) authenticated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingPageDto {
    #[serde(default)]
    pub(super) listings: Vec<ListingDraft>,
    pub(super) total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct UnlockResponseDto {
    pub(super) unlocked: bool,
    #[serde(default)]
    pub(super) listing: Option<ListingDraft>,
    #[serde(default)]
    pub(super) reason: Option<String>,
}

pub(super) fn into_listing(draft: ListingDraft) -> Result<Listing, String> {
    let id = draft.id.clone();
    Listing::try_from_draft(draft).map_err(|error| format!("listing {id:?} is invalid: {error}"))
}

impl ListingPageDto {
    pub(super) fn into_listings(self) -> Result<(Vec<Listing>, u32), String> {
        let listings = self
            .listings
            .into_iter()
            .map(into_listing)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((listings, self.total_pages))
    }
}

impl UnlockResponseDto {
    pub(super) fn into_outcome(self) -> Result<UnlockOutcome, String> {
        if !self.unlocked {
            let rejection = match self.reason.as_deref() {
                Some(UNKNOWN_LISTING_REASON) => UnlockRejection::UnknownListing,
                _ => UnlockRejection::Declined,
            };
            return Ok(UnlockOutcome::Rejected(rejection));
        }
        let draft = self
            .listing
            .ok_or_else(|| "unlocked response is missing the listing".to_owned())?;
        let mut listing = into_listing(draft)?;
        listing.mark_unlocked();
        Ok(UnlockOutcome::Unlocked(listing))
    }
}
