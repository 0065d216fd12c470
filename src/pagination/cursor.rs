// src/pagination/cursor.rs
//! Page cursor for one listing session.

use crate::types::{PageNumber, PageSize};
use serde::Serialize;

/// Where a listing session stands: the last page merged, the page size it
/// was rendered with, and whether the source is drained.
///
/// # Laws
///
/// - `current_page` never decreases.
/// - Once `is_exhausted()` is true it stays true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    current: PageNumber,
    page_size: PageSize,
    exhausted: bool,
}

/// What a call to [`PageCursor::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorStep {
    /// A full page arrived; more may follow.
    Advanced { page: PageNumber },
    /// A short page arrived; the cursor moved onto it and stopped.
    AdvancedAndExhausted { page: PageNumber },
    /// Nothing arrived; the cursor stayed and stopped.
    Exhausted { page: PageNumber },
    /// The cursor was already exhausted; nothing changed.
    AlreadyExhausted,
}

impl PageCursor {
    pub fn new(start: PageNumber, page_size: PageSize) -> Self {
        Self {
            current: start,
            page_size,
            exhausted: false,
        }
    }

    pub fn current_page(&self) -> PageNumber {
        self.current
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// The page the next fetch should ask for.
    pub fn next_page_number(&self) -> PageNumber {
        self.current.next()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Record the outcome of a successful fetch that appended `appended` items.
    ///
    /// A page shorter than the page size (including an empty one) means the
    /// source is drained.
    pub fn advance(&mut self, appended: usize) -> CursorStep {
        if self.exhausted {
            return CursorStep::AlreadyExhausted;
        }

        if appended >= self.page_size.as_usize() {
            self.current = self.current.next();
            return CursorStep::Advanced { page: self.current };
        }

        self.exhausted = true;
        if appended > 0 {
            self.current = self.current.next();
            CursorStep::AdvancedAndExhausted { page: self.current }
        } else {
            CursorStep::Exhausted { page: self.current }
        }
    }
}
