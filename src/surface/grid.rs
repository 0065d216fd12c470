// src/surface/grid.rs
//! The product grid items are appended to.

use crate::constants::PRODUCT_NAME_SELECTOR;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use serde::Serialize;

static NAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(PRODUCT_NAME_SELECTOR).expect("product name selector is valid"));

/// One rendered product item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub name: Option<String>,
    pub link: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub html: String,
}

impl ProductCard {
    pub(crate) fn from_element(element: ElementRef<'_>) -> Self {
        let title = element.select(&NAME_SELECTOR).next();

        let name = title
            .map(|a| normalize_whitespace(&a.text().collect::<String>()))
            .filter(|n| !n.is_empty());
        let link = title
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        Self {
            name,
            link,
            html: element.html(),
        }
    }

    /// Drops the raw markup, keeping only the extracted fields.
    pub fn without_markup(mut self) -> Self {
        self.html.clear();
        self
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append-only, ordered sequence of product items shown on the page.
#[derive(Debug, Clone, Default)]
pub struct ProductGrid {
    items: Vec<ProductCard>,
}

impl ProductGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ProductCard>) -> Self {
        Self { items }
    }

    /// Appends items in order and returns how many were appended.
    pub fn append(&mut self, items: impl IntoIterator<Item = ProductCard>) -> usize {
        let before = self.items.len();
        self.items.extend(items);
        self.items.len() - before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ProductCard] {
        &self.items
    }
}
