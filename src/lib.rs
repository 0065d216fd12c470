// src/lib.rs
//! shop-lazyload library: incremental "load more" for storefront product listings.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `LoadError`, `ValidationError`
//! - **Configuration**: `LoaderConfig`, `ControllerSettings`
//! - **Domain types**: `ListingLocation`, `PageSize`, `PageNumber`, `Locale`, `SessionId`
//! - **Pagination**: `PageCursor`, `FetchGate`, `NavigationTarget`, `build_next_target`
//! - **Storefront API**: `ListingSource`, `ShopHttpClient`, `parse_lazy_load_response`
//! - **Listing surface**: `ListingSurface`, `ProductGrid`, `ContentMerger`, observers
//! - **Controller**: `LoadController`, `ScrollWatcher`, `Debouncer`

pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod output;
pub mod pagination;
pub mod surface;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, LoadError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, LoaderConfig};
pub use crate::controller::ControllerSettings;

// --- Domain Types ---
pub use crate::types::{ListingLocation, Locale, PageNumber, PageSize, SessionId};

// --- Pagination ---
pub use crate::pagination::{
    build_next_target, CursorStep, FetchGate, FetchPermit, ListingRoute, NavigationTarget,
    PageCursor, PaginationState,
};

// --- Storefront API ---
pub use crate::api::{
    parse_lazy_load_response, FragmentPayload, ListingSource, RpcRequest, ShopHttpClient,
};

// --- Listing Surface ---
pub use crate::surface::{
    extract_items, ContentMerger, FeedbackSnapshot, ListingObserver, ListingSurface,
    ObserverRegistry, ProductCard, ProductGrid, SubscriptionId, TriggerControl, TriggerSet,
    TriggerSource, UiFeedback,
};

// --- Controller ---
pub use crate::controller::{
    Debounced, Debouncer, LoadController, LoadState, ScrollPosition, ScrollWatcher, SkipReason,
    TriggerOutcome,
};

// --- Output ---
pub use crate::output::{deliver, render_products, DeliveryTarget, OutputFormat};
