//! Reqwest-backed listing service client.
//!
//! This adapter owns transport details only: URL construction, JSON
//! encoding, HTTP status mapping and decoding into domain listings.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::debug;

use self::dto::{ListingPageDto, LoginRequestDto, LoginResponseDto, UnlockResponseDto};
use crate::domain::ports::{ListingService, ListingServiceError, UnlockOutcome, UnlockRejection};
use crate::domain::{Coordinates, Listing, ListingDraft, ListingId, LoginCredentials};

/// [`ListingService`] talking JSON over HTTP to a listing API.
#[derive(Debug, Clone)]
pub struct HttpListingService {
    client: Client,
    base: Url,
}

impl HttpListingService {
    /// Build a client for the API rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// API root.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ListingServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ListingServiceError::invalid_request(format!(
                    "base URL {} cannot carry a path",
                    self.base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn page_url(
        &self,
        request: PageRequest,
        bias: Option<Coordinates>,
    ) -> Result<Url, ListingServiceError> {
        let mut url = self.endpoint(&["listings"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.number().to_string())
                .append_pair("limit", &request.size().to_string());
            if let Some(point) = bias {
                query
                    .append_pair("lat", &point.latitude().to_string())
                    .append_pair("lng", &point.longitude().to_string());
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ListingServiceError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, ListingServiceError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = LoginRequestDto {
            username: credentials.username(),
            password: credentials.password(),
        };
        let (status, bytes) = self.send(self.client.post(url).json(&body)).await?;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            _ if status.is_success() => {
                let decoded: LoginResponseDto = decode(&bytes, "login response")?;
                Ok(decoded.authenticated)
            }
            _ => Err(map_status_error(status, &bytes)),
        }
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
        bias: Option<Coordinates>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        let url = self.page_url(request, bias)?;
        debug!(%url, "fetching listing page");
        let (status, bytes) = self.send(self.client.get(url)).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }
        let decoded: ListingPageDto = decode(&bytes, "listing page")?;
        let (listings, total_pages) = decoded
            .into_listings()
            .map_err(ListingServiceError::decode)?;
        Ok(Page::new(listings, request.number(), total_pages))
    }

    async fn fetch_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError> {
        let url = self.endpoint(&["listings", id.as_str()])?;
        let (status, bytes) = self.send(self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }
        let draft: ListingDraft = decode(&bytes, "listing")?;
        dto::into_listing(draft)
            .map(Some)
            .map_err(ListingServiceError::decode)
    }

    async fn unlock(&self, id: &ListingId) -> Result<UnlockOutcome, ListingServiceError> {
        let url = self.endpoint(&["listings", id.as_str(), "unlock"])?;
        let (status, bytes) = self.send(self.client.post(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(UnlockOutcome::Rejected(UnlockRejection::UnknownListing));
        }
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }
        let decoded: UnlockResponseDto = decode(&bytes, "unlock response")?;
        decoded.into_outcome().map_err(ListingServiceError::decode)
    }
}

fn decode<T>(body: &[u8], what: &str) -> Result<T, ListingServiceError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_slice(body)
        .map_err(|error| ListingServiceError::decode(format!("invalid {what} JSON: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ListingServiceError {
    if error.is_timeout() {
        ListingServiceError::unavailable(format!("request timed out: {error}"))
    } else {
        ListingServiceError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ListingServiceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    if status.is_client_error()
        && status != StatusCode::REQUEST_TIMEOUT
        && status != StatusCode::TOO_MANY_REQUESTS
    {
        ListingServiceError::invalid_request(message)
    } else {
        ListingServiceError::unavailable(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network helpers.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> HttpListingService {
        let base = Url::parse("https://api.example.test/v1/").expect("valid base");
        HttpListingService::new(base, Duration::from_secs(5)).expect("client builds")
    }

    #[rstest]
    fn page_url_carries_paging_and_bias(service: HttpListingService) {
        let request = PageRequest::new(3, 10).expect("valid request");
        let here = Coordinates::new(51.5, -0.125).expect("valid coordinates");

        let url = service.page_url(request, Some(here)).expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/v1/listings?page=3&limit=10&lat=51.5&lng=-0.125"
        );

        let unbiased = service.page_url(request, None).expect("url builds");
        assert_eq!(
            unbiased.as_str(),
            "https://api.example.test/v1/listings?page=3&limit=10"
        );
    }

    #[rstest]
    fn listing_ids_are_path_encoded(service: HttpListingService) {
        let url = service
            .endpoint(&["listings", "a/b c", "unlock"])
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/v1/listings/a%2Fb%20c/unlock"
        );
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, false)]
    fn statuses_map_to_port_errors(#[case] status: StatusCode, #[case] invalid: bool) {
        let error = map_status_error(status, b"{\"error\": \"nope\"}");
        assert_eq!(
            matches!(error, ListingServiceError::InvalidRequest { .. }),
            invalid
        );
        assert!(error.to_string().contains("nope"));
    }

    #[rstest]
    fn page_payload_decodes_into_listings() {
        let body = br#"{
            "listings": [{
                "id": "9f1c",
                "address": "12 Mill Lane",
                "image": "https://loremflickr.com/640/480/house?lock=4",
                "description": "Quiet cul-de-sac.",
                "latitude": 53.4808,
                "longitude": -2.2426,
                "price": 275000,
                "bedrooms": 3,
                "bathrooms": 2,
                "squareFootage": 1450,
                "isUnlocked": false
            }],
            "totalPages": 10
        }"#;

        let decoded: ListingPageDto = decode(body, "listing page").expect("decodes");
        let (listings, total_pages) = decoded.into_listings().expect("valid listings");
        assert_eq!(total_pages, 10);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].square_footage(), 1450);
    }

    #[rstest]
    fn invalid_listing_is_a_decode_error() {
        let body = br#"{"listings": [{
            "id": "", "address": "x", "imageUrl": "u", "description": "d",
            "latitude": 0.0, "longitude": 0.0, "price": 1, "bedrooms": 1,
            "bathrooms": 1, "squareFootage": 1
        }], "totalPages": 1}"#;

        let decoded: ListingPageDto = decode(body, "listing page").expect("decodes");
        assert!(decoded.into_listings().is_err());
    }

    #[rstest]
    #[case(r#"{"unlocked": false}"#, UnlockRejection::Declined)]
    #[case(r#"{"unlocked": false, "reason": "unknown_listing"}"#, UnlockRejection::UnknownListing)]
    fn refused_unlocks_map_to_rejections(#[case] body: &str, #[case] expected: UnlockRejection) {
        let decoded: UnlockResponseDto = decode(body.as_bytes(), "unlock").expect("decodes");
        assert_eq!(
            decoded.into_outcome().expect("valid outcome"),
            UnlockOutcome::Rejected(expected)
        );
    }

    #[rstest]
    fn unlocked_response_without_listing_is_rejected() {
        let decoded: UnlockResponseDto =
            decode(br#"{"unlocked": true}"#, "unlock").expect("decodes");
        assert!(decoded.into_outcome().is_err());
    }

    #[rstest]
    fn garbage_is_a_decode_error() {
        let error = decode::<LoginResponseDto>(b"<html>", "login response").expect_err("fails");
        assert!(matches!(error, ListingServiceError::Decode { .. }));
    }
}
