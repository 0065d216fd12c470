// src/surface/merger.rs
//! Applies a fetched fragment to the product grid.

use super::events::ObserverRegistry;
use super::grid::{ProductCard, ProductGrid};
use crate::api::FragmentPayload;
use crate::constants::PRODUCT_ITEM_SELECTOR;
use crate::error::LoadError;
use crate::types::PageSize;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(PRODUCT_ITEM_SELECTOR).expect("product item selector is valid"));

/// Extracts product items from an HTML fragment, in document order.
pub fn extract_items(fragment: &str) -> Vec<ProductCard> {
    let document = Html::parse_fragment(fragment);
    document
        .select(&ITEM_SELECTOR)
        .map(ProductCard::from_element)
        .collect()
}

/// Merges fragments into a grid and tells observers about it.
#[derive(Debug, Clone, Copy)]
pub struct ContentMerger {
    page_size: PageSize,
}

impl ContentMerger {
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }

    /// Appends the fragment's items to `grid` and returns how many were appended.
    ///
    /// A fragment without items leaves the grid untouched, notifies nobody and
    /// yields [`LoadError::Parse`]. At most one page worth of items is appended.
    pub fn apply(
        &self,
        payload: &FragmentPayload,
        grid: &mut ProductGrid,
        observers: &ObserverRegistry,
    ) -> Result<usize, LoadError> {
        let mut items = extract_items(&payload.html);

        if items.is_empty() {
            return Err(LoadError::Parse {
                reason: format!(
                    "fragment of {} bytes has no '{}' elements",
                    payload.html.len(),
                    PRODUCT_ITEM_SELECTOR
                ),
            });
        }

        if let Some(reported) = payload.reported_count {
            if reported != items.len() as u64 {
                log::debug!(
                    "Server reported {} items, fragment holds {}",
                    reported,
                    items.len()
                );
            }
        }

        if items.len() > self.page_size.as_usize() {
            log::warn!(
                "Fragment holds {} items for a page size of {}; keeping the first {}",
                items.len(),
                self.page_size,
                self.page_size
            );
            items.truncate(self.page_size.as_usize());
        }

        let appended = grid.append(items);
        observers.notify_merged(appended, grid.len());
        Ok(appended)
    }
}
