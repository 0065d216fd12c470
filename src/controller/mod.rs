// src/controller/mod.rs
//! The incremental-load controller of one listing session.
//!
//! ```text
//!            trigger (gate free, not exhausted)
//!   Idle ───────────────────────────────────────▶ Loading
//!    ▲  ◀── full page ──────────────────────────────┤
//!    │  ◀── network/protocol failure (+ banner) ────┤
//!    │                                              │ short or empty page
//!    │                                              ▼
//!    └──────────── (never) ──────────────────── Exhausted
//! ```
//!
//! Both trigger sources funnel into [`LoadController::trigger`], so the gate
//! and the exhaustion check apply to either of them.

mod debounce;
mod scroll;

pub use debounce::{Debounced, Debouncer};
pub use scroll::{ScrollPosition, ScrollWatcher};

use crate::api::{parse_lazy_load_response, ListingSource};
use crate::constants::{
    ERROR_BANNER_DISMISS_MS, LOAD_FAILURE_MESSAGE, SCROLL_DEBOUNCE_MS, SCROLL_PROXIMITY_THRESHOLD,
};
use crate::error::{AppError, LoadError};
use crate::pagination::{
    CursorStep, FetchGate, ListingRoute, NavigationTarget, PageCursor, PaginationState,
};
use crate::surface::{
    ContentMerger, FeedbackSnapshot, ListingObserver, ListingSurface, ObserverRegistry,
    ProductGrid, SubscriptionId, TriggerSet, TriggerSource, UiFeedback,
};
use crate::types::{ListingLocation, PageNumber, PageSize};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Tunables of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    /// Overrides the page size the listing declares.
    pub page_size: Option<PageSize>,
    pub banner_ttl: Duration,
    pub scroll_threshold: f64,
    pub scroll_debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: None,
            banner_ttl: Duration::from_millis(ERROR_BANNER_DISMISS_MS),
            scroll_threshold: f64::from(SCROLL_PROXIMITY_THRESHOLD),
            scroll_debounce: Duration::from_millis(SCROLL_DEBOUNCE_MS),
        }
    }
}

/// Coarse state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    Idle,
    Loading,
    Exhausted,
}

/// Why a trigger did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The page has no element for this trigger source.
    SourceUnavailable,
    /// Another cycle is in flight.
    InFlight,
    /// The listing is drained.
    Exhausted,
}

/// Result of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Nothing was fetched.
    Skipped(SkipReason),
    /// A full page was merged; more may follow.
    Loaded { appended: usize, page: PageNumber },
    /// A short or empty page was merged; the listing is drained.
    Drained { appended: usize, page: PageNumber },
    /// The cycle failed; state is unchanged and a banner is up.
    Failed(LoadError),
}

impl TriggerOutcome {
    pub fn appended(&self) -> usize {
        match self {
            Self::Loaded { appended, .. } | Self::Drained { appended, .. } => *appended,
            _ => 0,
        }
    }
}

/// Drives fetch/merge cycles for one listing session.
///
/// Construct one per page load; nothing resets an exhausted controller.
pub struct LoadController {
    source: Arc<dyn ListingSource>,
    location: ListingLocation,
    route: ListingRoute,
    triggers: TriggerSet,
    settings: ControllerSettings,
    cursor: Mutex<PageCursor>,
    gate: FetchGate,
    container: Arc<Mutex<ProductGrid>>,
    merger: ContentMerger,
    observers: ObserverRegistry,
    feedback: Mutex<UiFeedback>,
}

impl LoadController {
    /// Attaches a controller to a discovered listing surface.
    pub fn new(
        surface: ListingSurface,
        source: Arc<dyn ListingSource>,
        settings: ControllerSettings,
    ) -> Result<Self, AppError> {
        let route = ListingRoute::parse(&surface.location)?;
        let page_size = settings
            .page_size
            .or(surface.declared_page_size)
            .unwrap_or_default();
        let cursor = PageCursor::new(surface.location.current_page(), page_size);

        log::debug!(
            "Controller attached to {} (page {}, ppg {}, triggers {:?})",
            surface.location,
            cursor.current_page(),
            page_size,
            surface.triggers
        );

        Ok(Self {
            source,
            location: surface.location,
            route,
            triggers: surface.triggers,
            feedback: Mutex::new(UiFeedback::new(settings.banner_ttl)),
            settings,
            cursor: Mutex::new(cursor),
            gate: FetchGate::new(),
            container: surface.container,
            merger: ContentMerger::new(page_size),
            observers: ObserverRegistry::new(),
        })
    }

    /// Discovers the surface of `document` and attaches a controller to it.
    ///
    /// Returns `Ok(None)` when the document is not a product listing.
    pub fn init(
        location: ListingLocation,
        document: &str,
        source: Arc<dyn ListingSource>,
        settings: ControllerSettings,
    ) -> Result<Option<Self>, AppError> {
        match ListingSurface::discover(location, document) {
            Some(surface) => Self::new(surface, source, settings).map(Some),
            None => Ok(None),
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn triggers(&self) -> TriggerSet {
        self.triggers
    }

    pub fn location(&self) -> &ListingLocation {
        &self.location
    }

    /// The grid this controller appends to.
    pub fn container(&self) -> Arc<Mutex<ProductGrid>> {
        Arc::clone(&self.container)
    }

    pub fn state(&self) -> PaginationState {
        PaginationState::capture(&self.cursor.lock(), &self.gate)
    }

    pub fn load_state(&self) -> LoadState {
        if self.cursor.lock().is_exhausted() {
            LoadState::Exhausted
        } else if self.gate.is_held() {
            LoadState::Loading
        } else {
            LoadState::Idle
        }
    }

    pub fn feedback(&self) -> FeedbackSnapshot {
        self.feedback.lock().snapshot(self.gate.is_held(), Instant::now())
    }

    /// Number of fetch cycles started in this session.
    pub fn cycles_started(&self) -> u64 {
        self.gate.cycles_started()
    }

    /// Target the next cycle would request.
    pub fn next_target(&self) -> NavigationTarget {
        let cursor = self.cursor.lock();
        self.route
            .target_for(cursor.next_page_number(), cursor.page_size())
    }

    pub fn subscribe(&self, observer: Arc<dyn ListingObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Requests the next page on behalf of `origin`.
    ///
    /// Never fails: dropped triggers come back as [`TriggerOutcome::Skipped`]
    /// and failed cycles as [`TriggerOutcome::Failed`].
    pub async fn trigger(&self, origin: TriggerSource) -> TriggerOutcome {
        if !self.triggers.accepts(origin) {
            log::debug!("{:?} trigger ignored: page has no such control", origin);
            return TriggerOutcome::Skipped(SkipReason::SourceUnavailable);
        }
        if self.cursor.lock().is_exhausted() {
            log::debug!("{:?} trigger ignored: listing exhausted", origin);
            return TriggerOutcome::Skipped(SkipReason::Exhausted);
        }
        let Some(permit) = self.gate.try_enter() else {
            log::debug!("{:?} trigger dropped: a fetch is in flight", origin);
            return TriggerOutcome::Skipped(SkipReason::InFlight);
        };
        // A cycle may have drained the listing between the check and the entry.
        if self.cursor.lock().is_exhausted() {
            return TriggerOutcome::Skipped(SkipReason::Exhausted);
        }

        let target = self.next_target();
        log::info!(
            "Cycle {} ({:?}): requesting {}",
            permit.cycle(),
            origin,
            target
        );

        let result = self.run_cycle(&target).await;
        let outcome = self.settle(result);

        log::debug!("Cycle {} settled: {:?}", permit.cycle(), outcome);
        drop(permit);
        outcome
    }

    /// Fetch, validate and merge. Leaves the cursor alone.
    async fn run_cycle(&self, target: &NavigationTarget) -> Result<usize, LoadError> {
        let url = target.resolve(&self.location);
        let page_size = self.cursor.lock().page_size();

        let body = self.source.fetch_next(&url, page_size).await?;
        let payload = parse_lazy_load_response(&body)?;

        let mut grid = self.container.lock();
        self.merger.apply(&payload, &mut grid, &self.observers)
    }

    /// Folds a cycle result into cursor and feedback state.
    fn settle(&self, result: Result<usize, LoadError>) -> TriggerOutcome {
        let appended = match result {
            Ok(appended) => appended,
            Err(err) if err.signals_exhaustion() => {
                log::info!("{}; treating listing as drained", err);
                0
            }
            Err(err) => {
                log::warn!("Load cycle failed: {}", err);
                self.feedback
                    .lock()
                    .show_banner(LOAD_FAILURE_MESSAGE, Instant::now());
                return TriggerOutcome::Failed(err);
            }
        };

        let step = self.cursor.lock().advance(appended);
        match step {
            CursorStep::Advanced { page } => {
                log::info!("Appended {} items (page {})", appended, page);
                TriggerOutcome::Loaded { appended, page }
            }
            CursorStep::AdvancedAndExhausted { page } | CursorStep::Exhausted { page } => {
                log::info!(
                    "Appended {} items (page {}); no further pages",
                    appended,
                    page
                );
                self.feedback.lock().hide_trigger();
                TriggerOutcome::Drained { appended, page }
            }
            CursorStep::AlreadyExhausted => TriggerOutcome::Skipped(SkipReason::Exhausted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TriggerControl;
    use std::collections::VecDeque;
    use url::Url;

    /// Replies with queued bodies, recording every requested URL.
    #[derive(Default)]
    struct Scripted {
        replies: Mutex<VecDeque<Result<String, LoadError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn with(replies: Vec<Result<String, LoadError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::default(),
            })
        }
    }

    #[async_trait::async_trait]
    impl ListingSource for Scripted {
        async fn fetch_next(&self, url: &Url, _page_size: PageSize) -> Result<String, LoadError> {
            self.requests.lock().push(url.to_string());
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(LoadError::network(url.as_str(), "script exhausted")))
        }
    }

    fn page_of(count: usize) -> Result<String, LoadError> {
        let items: String = (0..count)
            .map(|_| "<div class=\"oe_product\"></div>")
            .collect();
        Ok(serde_json::json!({
            "jsonrpc": "2.0",
            "result": { "success": true, "tableWrapper": format!("<section>{}</section>", items) }
        })
        .to_string())
    }

    fn controller(source: Arc<Scripted>, page_size: u32) -> LoadController {
        let surface =
            ListingSurface::bare(ListingLocation::parse("https://shop.example/shop").unwrap());
        let settings = ControllerSettings {
            page_size: PageSize::new(page_size).ok(),
            ..ControllerSettings::default()
        };
        LoadController::new(surface, source, settings).unwrap()
    }

    #[tokio::test]
    async fn full_page_returns_to_idle() {
        let source = Scripted::with(vec![page_of(3)]);
        let ctl = controller(source.clone(), 3);

        let outcome = ctl.trigger(TriggerSource::Explicit).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Loaded {
                appended: 3,
                page: PageNumber::new(2).unwrap()
            }
        );
        assert_eq!(ctl.load_state(), LoadState::Idle);
        assert_eq!(ctl.feedback().trigger, TriggerControl::Enabled);
        assert_eq!(
            source.requests.lock().as_slice(),
            ["https://shop.example/shop-lazy/page/2?ppg=3"]
        );
    }

    #[tokio::test]
    async fn empty_success_drains_without_advancing() {
        let source = Scripted::with(vec![page_of(0)]);
        let ctl = controller(source, 3);

        let outcome = ctl.trigger(TriggerSource::Scroll).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Drained {
                appended: 0,
                page: PageNumber::FIRST
            }
        );
        assert_eq!(ctl.load_state(), LoadState::Exhausted);
        assert_eq!(ctl.feedback().trigger, TriggerControl::Hidden);
    }

    #[tokio::test]
    async fn protocol_failure_keeps_cursor_and_shows_banner() {
        let source = Scripted::with(vec![Ok(
            r#"{"result":{"success":false,"error":"boom"}}"#.to_string()
        )]);
        let ctl = controller(source, 3);
        let before = ctl.state();

        let outcome = ctl.trigger(TriggerSource::Explicit).await;

        assert_eq!(outcome, TriggerOutcome::Failed(LoadError::protocol("boom")));
        assert_eq!(ctl.state(), before);
        assert_eq!(
            ctl.feedback().banner.as_deref(),
            Some(LOAD_FAILURE_MESSAGE)
        );
    }

    #[tokio::test]
    async fn unavailable_source_is_ignored() {
        let source = Scripted::with(vec![page_of(3)]);
        let mut surface =
            ListingSurface::bare(ListingLocation::parse("https://shop.example/shop").unwrap());
        surface.triggers = TriggerSet {
            explicit: true,
            scroll: false,
        };
        let ctl = LoadController::new(surface, source.clone(), ControllerSettings::default())
            .unwrap();

        assert_eq!(
            ctl.trigger(TriggerSource::Scroll).await,
            TriggerOutcome::Skipped(SkipReason::SourceUnavailable)
        );
        assert!(source.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn init_on_non_listing_is_a_no_op() {
        let source = Scripted::with(vec![]);
        let ctl = LoadController::init(
            ListingLocation::parse("https://shop.example/shop").unwrap(),
            "<html><body><p>cart</p></body></html>",
            source,
            ControllerSettings::default(),
        )
        .unwrap();
        assert!(ctl.is_none());
    }
}
