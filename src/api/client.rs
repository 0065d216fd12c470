// src/api/client.rs
//! HTTP client for the storefront.
//!
//! A thin wrapper around reqwest: it knows the headers the incremental-load
//! endpoint expects and how to turn transport failures into
//! [`LoadError::Network`]. Parsing lives in [`super::parser`].

use super::responses::RpcRequest;
use super::ListingSource;
use crate::constants::SESSION_HEADER;
use crate::error::{AppError, LoadError};
use crate::types::{ListingLocation, PageSize, SessionId, ValidationError};
use reqwest::{header, Client, Response};
use url::Url;

/// A reqwest client preconfigured for one storefront session.
#[derive(Clone)]
pub struct ShopHttpClient {
    client: Client,
}

impl ShopHttpClient {
    /// Creates a client, attaching the session header when a session is known.
    pub fn new(session: Option<&SessionId>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(session)?)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers(session: Option<&SessionId>) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(session) = session {
            headers.insert(SESSION_HEADER, session_header_value(session.as_str())?);
        }

        Ok(headers)
    }

    /// Downloads the full listing page a session starts from.
    pub async fn fetch_listing_page(&self, location: &ListingLocation) -> Result<String, AppError> {
        log::debug!("GET {}", location);
        let response = self.client.get(location.as_url().clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PageUnavailable {
                url: location.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Posts a JSON-RPC call to `url`.
    async fn post_rpc(&self, url: &Url, body: &RpcRequest) -> Result<Response, reqwest::Error> {
        log::debug!("POST {} (ppg={})", url, body.params.ppg);
        self.client.post(url.clone()).json(body).send().await
    }
}

#[async_trait::async_trait]
impl ListingSource for ShopHttpClient {
    async fn fetch_next(&self, url: &Url, page_size: PageSize) -> Result<String, LoadError> {
        let request = RpcRequest::lazy_load(page_size);
        let response = self
            .post_rpc(url, &request)
            .await
            .map_err(|e| network_error(url, &e))?;
        extract_response_text(url, response).await
    }
}

fn session_header_value(raw: &str) -> Result<header::HeaderValue, ValidationError> {
    header::HeaderValue::from_str(raw).map_err(|e| ValidationError::InvalidSessionId {
        reason: format!("not a valid header value: {}", e),
    })
}

/// Reads the body of a successful response.
async fn extract_response_text(url: &Url, response: Response) -> Result<String, LoadError> {
    let status = response.status();
    if !status.is_success() {
        log::warn!("{} answered HTTP {}", url, status);
        return Err(LoadError::Network {
            target: url.to_string(),
            message: format!("HTTP {}", status.as_u16()),
            status: Some(status.as_u16()),
        });
    }
    response.text().await.map_err(|e| network_error(url, &e))
}

fn network_error(url: &Url, err: &reqwest::Error) -> LoadError {
    LoadError::Network {
        target: url.to_string(),
        message: err.to_string(),
        status: err.status().map(|s| s.as_u16()),
    }
}
