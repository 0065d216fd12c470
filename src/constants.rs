// src/constants.rs
//! Domain constants that define the operational boundaries of the loader.
//!
//! Each constant is named for the storefront concept it constrains. Reading
//! them top to bottom tells you how a listing is discovered, how the next
//! page is requested, and how the controller paces itself.

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Items per page when the listing does not declare its own `data-ppg`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound accepted for a page size.
///
/// The storefront renders every item of a page into one fragment, so a
/// runaway value would turn one "load more" into a full catalogue dump.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Query parameter carrying the page size on listing routes.
pub const PAGE_SIZE_PARAM: &str = "ppg";

/// Path segment that introduces a page number (`/page/<n>`).
pub const PAGE_SEGMENT: &str = "page";

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Root segment of the normal, full-page listing route.
pub const LISTING_ROOT: &str = "shop";

/// Root segment of the incremental-load endpoint.
pub const LAZY_LISTING_ROOT: &str = "shop-lazy";

// ---------------------------------------------------------------------------
// Trigger pacing
// ---------------------------------------------------------------------------

/// Distance from the bottom of the scrollable area at which the scroll
/// trigger fires.
pub const SCROLL_PROXIMITY_THRESHOLD: u32 = 500;

/// Quiet period after the last scroll event before proximity is evaluated.
pub const SCROLL_DEBOUNCE_MS: u64 = 200;

/// How long an error banner stays visible before it dismisses itself.
pub const ERROR_BANNER_DISMISS_MS: u64 = 5000;

/// Banner text shown after a failed fetch cycle.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load more products. Please try again.";

// ---------------------------------------------------------------------------
// Listing surface selectors
// ---------------------------------------------------------------------------

/// Marker present only on product listing pages.
pub const PRODUCTS_PAGE_SELECTOR: &str = ".o_wsale_products_page";

/// Preferred container the items are appended to.
pub const GRID_CONTAINER_SELECTOR: &str = "#o_wsale_products_grid";

/// Fallback container when the grid has no id.
pub const GRID_SECTION_SELECTOR: &str = ".o_wsale_products_grid_table_wrapper section";

/// The section carrying the listing's declared page size.
pub const PAGE_SIZE_SOURCE_SELECTOR: &str = ".o_wsale_products_grid_table_wrapper > section";

/// Attribute on the grid section declaring the page size.
pub const PAGE_SIZE_ATTRIBUTE: &str = "data-ppg";

/// Explicit "load more" button.
pub const LOAD_BUTTON_SELECTOR: &str = ".wt-lazy-load-button";

/// Scroll sentinel that doubles as the scroll loading indicator.
pub const SCROLL_SENTINEL_SELECTOR: &str = ".wt_website_product_lazy_load_scroll";

/// A single product card, both on the page and inside returned fragments.
pub const PRODUCT_ITEM_SELECTOR: &str = ".oe_product";

/// Product title link inside a card.
pub const PRODUCT_NAME_SELECTOR: &str = ".o_wsale_products_item_title a, a[itemprop=\"name\"]";

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Header carrying the storefront session identifier.
pub const SESSION_HEADER: &str = "X-Odoo-Session-Id";

/// Environment variable the CLI reads the session identifier from.
pub const SESSION_ENV_VAR: &str = "SHOP_SESSION_ID";

/// JSON-RPC method name used by the incremental-load endpoint.
pub const RPC_METHOD: &str = "call";

/// Maximum characters shown when previewing unexpected response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
