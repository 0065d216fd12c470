// src/surface/mod.rs
//! The listing page as the controller sees it.
//!
//! A [`ListingSurface`] is discovered once from the full listing document:
//! the products-page marker, the grid container and the items already in
//! it, the declared page size, and which trigger elements exist.

mod events;
mod feedback;
mod grid;
mod merger;

pub use events::{ListingObserver, ObserverRegistry, SubscriptionId};
pub use feedback::{Banner, FeedbackSnapshot, TriggerControl, UiFeedback};
pub use grid::{ProductCard, ProductGrid};
pub use merger::{extract_items, ContentMerger};

use crate::constants::{
    GRID_CONTAINER_SELECTOR, GRID_SECTION_SELECTOR, LOAD_BUTTON_SELECTOR, PAGE_SIZE_ATTRIBUTE,
    PAGE_SIZE_SOURCE_SELECTOR, PRODUCTS_PAGE_SELECTOR, PRODUCT_ITEM_SELECTOR,
    SCROLL_SENTINEL_SELECTOR,
};
use crate::types::{ListingLocation, PageSize};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use scraper::{Html, Selector};
use std::sync::Arc;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("surface selectors are valid CSS")
}

static PRODUCTS_PAGE: Lazy<Selector> = Lazy::new(|| selector(PRODUCTS_PAGE_SELECTOR));
static GRID_CONTAINER: Lazy<Selector> = Lazy::new(|| selector(GRID_CONTAINER_SELECTOR));
static GRID_SECTION: Lazy<Selector> = Lazy::new(|| selector(GRID_SECTION_SELECTOR));
static PAGE_SIZE_SOURCE: Lazy<Selector> = Lazy::new(|| selector(PAGE_SIZE_SOURCE_SELECTOR));
static LOAD_BUTTON: Lazy<Selector> = Lazy::new(|| selector(LOAD_BUTTON_SELECTOR));
static SCROLL_SENTINEL: Lazy<Selector> = Lazy::new(|| selector(SCROLL_SENTINEL_SELECTOR));
static PRODUCT_ITEM: Lazy<Selector> = Lazy::new(|| selector(PRODUCT_ITEM_SELECTOR));

/// Where a request for the next page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TriggerSource {
    /// The user pressed the "load more" control.
    Explicit,
    /// The viewport came close to the bottom of the listing.
    Scroll,
}

/// Which trigger sources the page supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerSet {
    pub explicit: bool,
    pub scroll: bool,
}

impl TriggerSet {
    pub fn all() -> Self {
        Self {
            explicit: true,
            scroll: true,
        }
    }

    pub fn accepts(&self, source: TriggerSource) -> bool {
        match source {
            TriggerSource::Explicit => self.explicit,
            TriggerSource::Scroll => self.scroll,
        }
    }
}

/// A listing page ready to have a controller attached.
#[derive(Debug, Clone)]
pub struct ListingSurface {
    pub location: ListingLocation,
    /// Page size the listing was rendered with, when it says.
    pub declared_page_size: Option<PageSize>,
    pub triggers: TriggerSet,
    pub container: Arc<Mutex<ProductGrid>>,
}

impl ListingSurface {
    /// A surface with an empty grid and both trigger sources, for callers
    /// that do not start from a rendered document.
    pub fn bare(location: ListingLocation) -> Self {
        Self {
            location,
            declared_page_size: None,
            triggers: TriggerSet::all(),
            container: Arc::new(Mutex::new(ProductGrid::new())),
        }
    }

    /// Discovers the surface of a rendered listing document.
    ///
    /// Returns `None` when the document is not a product listing or has no
    /// grid container; a controller must not be attached in that case.
    pub fn discover(location: ListingLocation, document: &str) -> Option<Self> {
        let html = Html::parse_document(document);

        if html.select(&PRODUCTS_PAGE).next().is_none() {
            log::info!("{} has no products page marker", location);
            return None;
        }

        let container = html
            .select(&GRID_CONTAINER)
            .next()
            .or_else(|| html.select(&GRID_SECTION).next());
        let Some(container) = container else {
            log::warn!("{} is a listing page without a grid container", location);
            return None;
        };

        let items: Vec<ProductCard> = container
            .select(&PRODUCT_ITEM)
            .map(ProductCard::from_element)
            .collect();

        let declared_page_size = html
            .select(&PAGE_SIZE_SOURCE)
            .next()
            .and_then(|section| section.value().attr(PAGE_SIZE_ATTRIBUTE))
            .and_then(PageSize::parse_attribute);

        let triggers = TriggerSet {
            explicit: html.select(&LOAD_BUTTON).next().is_some(),
            scroll: html.select(&SCROLL_SENTINEL).next().is_some(),
        };

        log::debug!(
            "Discovered listing at {}: {} items, ppg {:?}, triggers {:?}",
            location,
            items.len(),
            declared_page_size,
            triggers
        );

        Some(Self {
            location,
            declared_page_size,
            triggers,
            container: Arc::new(Mutex::new(ProductGrid::with_items(items))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<!DOCTYPE html>
<html><body>
<div class="o_wsale_products_page">
  <div class="o_wsale_products_grid_table_wrapper pt-3 pt-lg-0">
    <section id="o_wsale_products_grid" data-ppg="12">
      <div class="oe_product"><div class="o_wsale_products_item_title"><a href="/shop/a-1">A</a></div></div>
      <div class="oe_product"><div class="o_wsale_products_item_title"><a href="/shop/b-2">B</a></div></div>
    </section>
  </div>
  <button class="btn wt-lazy-load-button">Load more<span class="spinner-grow d-none"></span></button>
</div>
</body></html>"#;

    fn location() -> ListingLocation {
        ListingLocation::parse("https://shop.example/shop").unwrap()
    }

    #[test]
    fn discovers_items_page_size_and_triggers() {
        let surface = ListingSurface::discover(location(), LISTING).unwrap();
        assert_eq!(surface.container.lock().len(), 2);
        assert_eq!(surface.declared_page_size, PageSize::new(12).ok());
        assert_eq!(
            surface.triggers,
            TriggerSet {
                explicit: true,
                scroll: false
            }
        );
    }

    #[test]
    fn non_listing_document_yields_nothing() {
        let doc = "<html><body><div class=\"o_wsale_product_page\"></div></body></html>";
        assert!(ListingSurface::discover(location(), doc).is_none());
    }

    #[test]
    fn listing_without_container_yields_nothing() {
        let doc = "<html><body><div class=\"o_wsale_products_page\"><p>empty</p></div></body></html>";
        assert!(ListingSurface::discover(location(), doc).is_none());
    }

    #[test]
    fn falls_back_to_wrapper_section_and_default_page_size() {
        let doc = r#"<html><body><div class="o_wsale_products_page">
            <div class="o_wsale_products_grid_table_wrapper"><section>
              <div class="oe_product"></div>
            </section></div>
            <div class="wt_website_product_lazy_load_scroll d-none"></div>
        </div></body></html>"#;
        let surface = ListingSurface::discover(location(), doc).unwrap();
        assert_eq!(surface.container.lock().len(), 1);
        assert_eq!(surface.declared_page_size, None);
        assert!(surface.triggers.scroll);
        assert!(!surface.triggers.explicit);
    }
}
