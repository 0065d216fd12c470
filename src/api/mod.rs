// src/api/mod.rs
//! Storefront interaction: the ability to fetch the next page of a listing.
//!
//! Business logic depends on [`ListingSource`], never on HTTP details, so
//! the controller can be driven by the real client or by a scripted source.

pub mod client;
pub mod parser;
mod responses;

use crate::error::LoadError;
use crate::types::PageSize;
use url::Url;

/// The ability to fetch one incremental-load reply.
///
/// Implementations return the raw reply body; validating its shape is the
/// job of [`parser::parse_lazy_load_response`].
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_next(&self, url: &Url, page_size: PageSize) -> Result<String, LoadError>;
}

pub use client::ShopHttpClient;
pub use parser::{parse_lazy_load_response, FragmentPayload};
pub use responses::{LazyLoadParams, RpcRequest};
