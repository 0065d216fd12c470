// src/output/writer.rs
//! Renders collected products and performs the actual I/O.
//!
//! Rendering is pure; [`deliver`] is the only place output touches the
//! filesystem or stdout.

use super::types::{DeliveryTarget, OutputFormat};
use crate::error::AppError;
use crate::surface::ProductCard;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Renders products in the requested format.
pub fn render_products(items: &[ProductCard], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Lines => Ok(items
            .iter()
            .map(|item| {
                format!(
                    "{}\t{}\n",
                    item.name.as_deref().unwrap_or("-"),
                    item.link.as_deref().unwrap_or("-")
                )
            })
            .collect()),
        OutputFormat::Json { markup: true } => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Json { markup: false } => {
            let stripped: Vec<ProductCard> = items
                .iter()
                .cloned()
                .map(ProductCard::without_markup)
                .collect();
            Ok(serde_json::to_string_pretty(&stripped)?)
        }
    }
}

/// Performs a delivery and returns the number of bytes written.
pub fn deliver(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ProductCard> {
        vec![
            ProductCard {
                name: Some("Oak Desk".into()),
                link: Some("/shop/oak-desk-7".into()),
                html: "<div class=\"oe_product\"></div>".into(),
            },
            ProductCard {
                name: None,
                link: None,
                html: String::new(),
            },
        ]
    }

    #[test]
    fn renders_lines() {
        assert_eq!(
            render_products(&items(), OutputFormat::Lines).unwrap(),
            "Oak Desk\t/shop/oak-desk-7\n-\t-\n"
        );
    }

    #[test]
    fn json_without_markup_drops_html() {
        let json = render_products(&items(), OutputFormat::Json { markup: false }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Oak Desk");
        assert!(value[0].get("html").is_none());
    }

    #[test]
    fn json_with_markup_keeps_html() {
        let json = render_products(&items(), OutputFormat::Json { markup: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["html"], "<div class=\"oe_product\"></div>");
    }

    #[test]
    fn writes_file_creating_parents() {
        let dir = std::env::temp_dir().join(format!("shop_lazyload_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("out.txt");
        let written = deliver(&DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "hello".into(),
        })
        .unwrap();
        assert_eq!(written, 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        fs::remove_dir_all(dir).unwrap();
    }
}
