// src/output/types.rs
//! Type definitions for output operations.

use std::path::PathBuf;

/// How collected products are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One tab-separated `name<TAB>link` line per product.
    Lines,
    /// A JSON array of products, optionally with their markup.
    Json { markup: bool },
}

/// Where rendered output goes.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    pub fn content(&self) -> &str {
        match self {
            Self::WriteFile { content, .. } | Self::PrintToStdout { content } => content,
        }
    }
}
