// src/types/location.rs
//! The browsable location of a listing page.

use super::{PageNumber, ValidationError};
use crate::constants::PAGE_SEGMENT;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// An absolute HTTP(S) location of a storefront listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLocation(Url);

impl ListingLocation {
    /// Parse and validate a listing location.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(raw.trim()).map_err(|e| ValidationError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(url)
    }

    pub fn from_url(url: Url) -> Result<Self, ValidationError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }
        if url.cannot_be_a_base() {
            return Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: "URL has no path".to_string(),
            });
        }
        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.0
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Query parameters in their original order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// The page this location renders, read from a `/page/<n>` segment.
    ///
    /// Listings without a page segment are on page 1.
    pub fn current_page(&self) -> PageNumber {
        let segments = self.segments();
        page_segment_index(&segments)
            .and_then(|idx| segments[idx + 1].parse::<u32>().ok())
            .and_then(|n| PageNumber::new(n).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for ListingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ListingLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

/// Index of the `page` keyword of the first `/page/<digits>` pair.
pub(crate) fn page_segment_index(segments: &[&str]) -> Option<usize> {
    segments.windows(2).position(|pair| {
        pair[0] == PAGE_SEGMENT
            && !pair[1].is_empty()
            && pair[1].bytes().all(|b| b.is_ascii_digit())
    })
}
