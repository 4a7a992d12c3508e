//! Listing builders shared by controller unit tests.

use pagination::{Page, PageNumber};

use crate::domain::{Listing, ListingDraft};

pub(crate) fn listing_at(id: &str, latitude: f64, longitude: f64) -> Listing {
    Listing::try_from_draft(ListingDraft {
        id: id.to_owned(),
        address: format!("{id} Orchard Row"),
        image_url: "https://loremflickr.com/640/480/house?lock=1".to_owned(),
        description: "Bright terrace close to the park.".to_owned(),
        latitude,
        longitude,
        price: 325_000,
        bedrooms: 3,
        bathrooms: 1,
        square_footage: 1_100,
        is_unlocked: false,
    })
    .expect("fixture listing is valid")
}

pub(crate) fn listing(id: &str) -> Listing {
    listing_at(id, 51.5007, -0.1246)
}

/// Page `number` of `total_pages`, holding `count` listings with ids
/// `p{number}-{index}`.
pub(crate) fn page(number: u32, count: usize, total_pages: u32) -> Page<Listing> {
    let items = (0..count)
        .map(|index| listing(&format!("p{number}-{index}")))
        .collect();
    Page::new(
        items,
        PageNumber::new(number).expect("fixture page number is non-zero"),
        total_pages,
    )
}
