// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of items the storefront renders per listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Create a page size, rejecting zero and absurdly large values.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 || value > MAX_PAGE_SIZE {
            return Err(ValidationError::OutOfBounds {
                value,
                min: 1,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self(value))
    }

    /// Parse a page size from an attribute value, as the storefront renders it.
    ///
    /// Returns `None` for anything that is not a positive integer in range.
    pub fn parse_attribute(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().and_then(|v| Self::new(v).ok())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based listing page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Create a page number; page 0 does not exist on the storefront.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::OutOfBounds {
                value,
                min: 1,
                max: u32::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The page after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two-letter language prefix of a localized route (`/fr/shop`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if Self::is_locale_segment(&code) {
            Ok(Self(code))
        } else {
            Err(ValidationError::InvalidLocale(code))
        }
    }

    /// Whether a path segment has the shape of a locale prefix.
    pub fn is_locale_segment(segment: &str) -> bool {
        static LOCALE_SEGMENT: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^[a-z]{2}$").expect("Failed to compile locale regex - this is a bug")
        });
        LOCALE_SEGMENT.is_match(segment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storefront session identifier sent with every incremental-load request.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidSessionId {
                reason: "session identifier cannot be empty".to_string(),
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ValidationError::InvalidSessionId {
                reason: "session identifier must be printable ASCII".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the full session token.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(6).collect();
        write!(f, "{}...", visible)
    }
}
