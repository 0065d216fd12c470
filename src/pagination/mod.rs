// src/pagination/mod.rs
//! Pagination state of a listing session: where we are, whether a fetch is
//! in flight, and what to ask for next.

mod cursor;
mod gate;
mod target;

pub use cursor::{CursorStep, PageCursor};
pub use gate::{FetchGate, FetchPermit};
pub use target::{build_next_target, ListingRoute, NavigationTarget};

use crate::types::{PageNumber, PageSize};
use serde::Serialize;

/// Snapshot of a session's pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: PageNumber,
    pub page_size: PageSize,
    pub exhausted: bool,
    pub in_flight: bool,
}

impl PaginationState {
    pub fn capture(cursor: &PageCursor, gate: &FetchGate) -> Self {
        Self {
            current_page: cursor.current_page(),
            page_size: cursor.page_size(),
            exhausted: cursor.is_exhausted(),
            in_flight: gate.is_held(),
        }
    }
}
