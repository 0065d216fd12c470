//! Shared fixtures for controller tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use shop_lazyload::{
    ControllerSettings, ListingLocation, ListingSource, ListingSurface, LoadController, LoadError,
    PageSize,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;
use url::Url;

/// A listing source that replays queued replies and records requests.
///
/// When built with [`ScriptedSource::held`], every fetch waits for
/// [`ScriptedSource::release`] before answering.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Result<String, LoadError>>>,
    requests: Mutex<Vec<String>>,
    hold: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new(replies: Vec<Result<String, LoadError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    pub fn held(replies: Vec<Result<String, LoadError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            hold: Some(Arc::new(Notify::new())),
            ..Self::default()
        })
    }

    /// Lets one held fetch answer.
    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.notify_one();
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait::async_trait]
impl ListingSource for ScriptedSource {
    async fn fetch_next(&self, url: &Url, _page_size: PageSize) -> Result<String, LoadError> {
        self.requests.lock().push(url.to_string());
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        let reply = self.replies.lock().pop_front();
        reply.unwrap_or_else(|| Err(LoadError::network(url.as_str(), "no scripted reply")))
    }
}

/// A successful reply carrying `count` product cards.
pub fn products(count: usize) -> Result<String, LoadError> {
    let cards: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="oe_product"><div class="o_wsale_products_item_title"><a href="/shop/item-{i}">Item {i}</a></div></div>"#
            )
        })
        .collect();
    Ok(serde_json::json!({
        "jsonrpc": "2.0",
        "id": null,
        "result": {
            "success": true,
            "count": count,
            "tableWrapper": format!(
                r#"<div class="o_wsale_products_grid_table_wrapper"><section id="o_wsale_products_grid">{}</section></div>"#,
                cards
            )
        }
    })
    .to_string())
}

pub fn network_failure() -> Result<String, LoadError> {
    Err(LoadError::Network {
        target: "scripted".to_string(),
        message: "connection reset".to_string(),
        status: None,
    })
}

/// A controller on `url` with both trigger sources and page size 20.
pub fn controller(url: &str, source: Arc<ScriptedSource>) -> Arc<LoadController> {
    let surface = ListingSurface::bare(ListingLocation::parse(url).expect("valid test url"));
    let settings = ControllerSettings {
        page_size: PageSize::new(20).ok(),
        ..ControllerSettings::default()
    };
    Arc::new(LoadController::new(surface, source, settings).expect("listing url"))
}
