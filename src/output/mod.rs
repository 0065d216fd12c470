// src/output/mod.rs
//! Output handling with clear separation of rendering and delivery.

mod types;
mod writer;

pub use types::{DeliveryTarget, OutputFormat};
pub use writer::{deliver, render_products};
