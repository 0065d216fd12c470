use thiserror::Error;

mod domain_types;
mod location;

pub use domain_types::*;
pub use location::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid locale code: {0}")]
    InvalidLocale(String),

    #[error("Invalid session identifier: {reason}")]
    InvalidSessionId { reason: String },
}
