// src/pagination/target.rs
//! Derives the incremental-load request target from a listing location.
//!
//! Everything here is pure: the same location and cursor always produce the
//! same target.

use super::PageCursor;
use crate::constants::{LAZY_LISTING_ROOT, LISTING_ROOT, PAGE_SEGMENT, PAGE_SIZE_PARAM};
use crate::types::{
    page_segment_index, ListingLocation, Locale, PageNumber, PageSize, ValidationError,
};
use std::fmt;
use url::{form_urlencoded, Url};

/// The request target of one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Path of the incremental-load endpoint, without locale or page segment.
    pub base_path: String,
    pub locale_prefix: Option<Locale>,
    pub page_number: PageNumber,
    /// Query pairs in order; repeated keys are kept.
    pub query_params: Vec<(String, String)>,
}

impl NavigationTarget {
    /// Full request path, e.g. `/fr/shop-lazy/page/4`.
    pub fn path(&self) -> String {
        let locale = self
            .locale_prefix
            .as_ref()
            .map(|l| format!("/{}", l))
            .unwrap_or_default();
        format!(
            "{}{}/{}/{}",
            locale, self.base_path, PAGE_SEGMENT, self.page_number
        )
    }

    /// Encoded query string, without the leading `?`.
    pub fn query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_params.iter())
            .finish()
    }

    /// Absolute URL of this target on the same origin as `location`.
    pub fn resolve(&self, location: &ListingLocation) -> Url {
        let mut url = location.as_url().clone();
        url.set_path(&self.path());
        let query = self.query();
        url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });
        url.set_fragment(None);
        url
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query();
        if query.is_empty() {
            write!(f, "{}", self.path())
        } else {
            write!(f, "{}?{}", self.path(), query)
        }
    }
}

/// A listing location decomposed into the parts a target is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRoute {
    locale: Option<Locale>,
    lazy_base_path: String,
    query: Vec<(String, String)>,
}

impl ListingRoute {
    /// Decompose a listing location.
    ///
    /// The path must contain the listing root (or its incremental-load
    /// variant); a two-letter segment directly in front of it is taken as the
    /// locale prefix.
    pub fn parse(location: &ListingLocation) -> Result<Self, ValidationError> {
        let mut segments = location.segments();

        let root_idx = segments
            .iter()
            .position(|s| *s == LISTING_ROOT || *s == LAZY_LISTING_ROOT)
            .ok_or_else(|| ValidationError::InvalidUrl {
                url: location.to_string(),
                reason: format!("path has no '/{}' listing segment", LISTING_ROOT),
            })?;

        let locale = if root_idx == 1 && Locale::is_locale_segment(segments[0]) {
            Some(Locale::new(segments.remove(0))?)
        } else {
            None
        };

        if let Some(idx) = page_segment_index(&segments) {
            segments.drain(idx..idx + 2);
        }

        if let Some(root) = segments.iter_mut().find(|s| **s == LISTING_ROOT) {
            *root = LAZY_LISTING_ROOT;
        }
        let lazy_base_path = segments.iter().fold(String::new(), |mut path, s| {
            path.push('/');
            path.push_str(s);
            path
        });

        let query = location.query_pairs();

        Ok(Self {
            locale,
            lazy_base_path,
            query,
        })
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// The target for `page`, with the page-size parameter set to `page_size`
    /// and every other query pair carried over unchanged.
    ///
    /// The first page-size pair is overwritten where it stands and any later
    /// ones are dropped; without one, it is appended.
    pub fn target_for(&self, page: PageNumber, page_size: PageSize) -> NavigationTarget {
        let page_size = page_size.to_string();
        let mut query_params = Vec::with_capacity(self.query.len() + 1);
        let mut page_size_set = false;
        for (key, value) in &self.query {
            if key != PAGE_SIZE_PARAM {
                query_params.push((key.clone(), value.clone()));
            } else if !page_size_set {
                query_params.push((key.clone(), page_size.clone()));
                page_size_set = true;
            }
        }
        if !page_size_set {
            query_params.push((PAGE_SIZE_PARAM.to_string(), page_size));
        }

        NavigationTarget {
            base_path: self.lazy_base_path.clone(),
            locale_prefix: self.locale.clone(),
            page_number: page,
            query_params,
        }
    }
}

/// Computes the target of the cursor's next page for `location`.
pub fn build_next_target(
    location: &ListingLocation,
    cursor: &PageCursor,
) -> Result<NavigationTarget, ValidationError> {
    let route = ListingRoute::parse(location)?;
    Ok(route.target_for(cursor.next_page_number(), cursor.page_size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn next_target(url: &str, page_size: u32) -> String {
        let location = ListingLocation::parse(url).unwrap();
        let cursor = PageCursor::new(location.current_page(), PageSize::new(page_size).unwrap());
        build_next_target(&location, &cursor).unwrap().to_string()
    }

    #[test]
    fn plain_listing_gets_page_segment() {
        assert_eq!(
            next_target("https://shop.example/shop", 20),
            "/shop-lazy/page/2?ppg=20"
        );
    }

    #[test]
    fn localized_listing_replaces_page_segment() {
        assert_eq!(
            next_target("https://shop.example/fr/shop/page/3", 20),
            "/fr/shop-lazy/page/4?ppg=20"
        );
    }

    #[test]
    fn localized_listing_without_page() {
        assert_eq!(
            next_target("https://shop.example/ar/shop", 12),
            "/ar/shop-lazy/page/2?ppg=12"
        );
    }

    #[test]
    fn plain_listing_with_page() {
        assert_eq!(
            next_target("https://shop.example/shop/page/5", 20),
            "/shop-lazy/page/6?ppg=20"
        );
    }

    #[test]
    fn category_listing_keeps_category() {
        assert_eq!(
            next_target("https://shop.example/shop/category/desks-3", 20),
            "/shop-lazy/category/desks-3/page/2?ppg=20"
        );
        assert_eq!(
            next_target("https://shop.example/fr/shop/category/desks-3/page/2", 20),
            "/fr/shop-lazy/category/desks-3/page/3?ppg=20"
        );
    }

    #[test]
    fn other_query_params_survive_and_page_size_is_overridden() {
        assert_eq!(
            next_target("https://shop.example/shop?search=oak&ppg=8&order=name+asc", 20),
            "/shop-lazy/page/2?search=oak&ppg=20&order=name+asc"
        );
    }

    #[test]
    fn repeated_filters_are_all_kept() {
        assert_eq!(
            next_target("https://shop.example/shop?attrib=1-2&attrib=1-3&search=oak", 20),
            "/shop-lazy/page/2?attrib=1-2&attrib=1-3&search=oak&ppg=20"
        );
    }

    #[test]
    fn duplicate_page_size_pairs_collapse_into_the_first() {
        assert_eq!(
            next_target("https://shop.example/shop?ppg=8&attrib=1-2&ppg=16&attrib=1-3", 20),
            "/shop-lazy/page/2?ppg=20&attrib=1-2&attrib=1-3"
        );
    }

    #[test]
    fn root_rewrite_is_segment_wise() {
        assert_eq!(
            next_target("https://shop.example/shop/category/shopping-bags", 20),
            "/shop-lazy/category/shopping-bags/page/2?ppg=20"
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(
            next_target("https://shop.example/shop/", 20),
            "/shop-lazy/page/2?ppg=20"
        );
    }

    #[test]
    fn non_listing_paths_are_rejected() {
        let location = ListingLocation::parse("https://shop.example/blog/page/2").unwrap();
        assert!(ListingRoute::parse(&location).is_err());
    }

    #[test]
    fn derivation_is_repeatable() {
        let location = ListingLocation::parse("https://shop.example/fr/shop?a=1").unwrap();
        let cursor = PageCursor::new(PageNumber::FIRST, PageSize::default());
        let first = build_next_target(&location, &cursor).unwrap();
        let second = build_next_target(&location, &cursor).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_keeps_origin() {
        let location =
            ListingLocation::parse("https://shop.example:8069/fr/shop/page/3#top").unwrap();
        let cursor = PageCursor::new(location.current_page(), PageSize::default());
        let target = build_next_target(&location, &cursor).unwrap();
        assert_eq!(
            target.resolve(&location).as_str(),
            "https://shop.example:8069/fr/shop-lazy/page/4?ppg=20"
        );
    }
}
