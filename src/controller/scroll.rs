// src/controller/scroll.rs
//! Scroll-proximity trigger source.

use super::debounce::{Debounced, Debouncer};
use super::LoadController;
use crate::surface::TriggerSource;
use futures::FutureExt;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Viewport geometry at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollPosition {
    pub fn new(scroll_top: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
        }
    }

    /// Whether the bottom of the viewport is within `threshold` of the end
    /// of the document.
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.document_height - threshold
    }
}

/// Feeds debounced scroll proximity into a controller.
pub struct ScrollWatcher {
    latest: Arc<Mutex<Option<ScrollPosition>>>,
    debounced: Debounced,
}

impl ScrollWatcher {
    /// Watches scrolling for `controller`.
    ///
    /// Returns `None` when the page has no scroll sentinel.
    pub fn attach(controller: Arc<LoadController>) -> Option<Self> {
        if !controller.triggers().scroll {
            log::debug!("No scroll sentinel; scroll trigger disabled");
            return None;
        }

        let latest: Arc<Mutex<Option<ScrollPosition>>> = Arc::new(Mutex::new(None));
        let threshold = controller.settings().scroll_threshold;
        let quiet = controller.settings().scroll_debounce;

        let observed = Arc::clone(&latest);
        let debounced = Debouncer::new(quiet, move || {
            let controller = Arc::clone(&controller);
            let position = *observed.lock();
            async move {
                match position {
                    Some(position) if position.is_near_bottom(threshold) => {
                        let outcome = controller.trigger(TriggerSource::Scroll).await;
                        log::debug!("Scroll trigger: {:?}", outcome);
                    }
                    _ => {}
                }
            }
            .boxed()
        });

        Some(Self { latest, debounced })
    }

    /// Records a scroll event. Proximity is evaluated once the events stop
    /// for the debounce period, using the last recorded position.
    pub fn on_scroll(&self, position: ScrollPosition) {
        *self.latest.lock() = Some(position);
        self.debounced.call();
    }

    /// Stops a pending evaluation.
    pub fn cancel(&self) {
        self.debounced.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_threshold() {
        assert!(ScrollPosition::new(1500.0, 800.0, 2800.0).is_near_bottom(500.0));
        assert!(ScrollPosition::new(1500.0, 800.0, 2700.0).is_near_bottom(500.0));
        assert!(!ScrollPosition::new(1000.0, 800.0, 2800.0).is_near_bottom(500.0));
    }

    #[test]
    fn short_documents_are_always_near_bottom() {
        assert!(ScrollPosition::new(0.0, 900.0, 600.0).is_near_bottom(500.0));
    }
}
