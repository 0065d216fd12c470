// src/surface/feedback.rs
//! User-facing feedback around fetch cycles: loading indicator, trigger
//! control and the error banner.

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// How the explicit "load more" control should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerControl {
    /// Shown and clickable.
    Enabled,
    /// Shown but inert while a cycle is in flight.
    Disabled,
    /// Gone for the rest of the session.
    Hidden,
}

/// A dismissible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub expires_at: Instant,
}

/// What the page should currently display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSnapshot {
    pub loading: bool,
    pub trigger: TriggerControl,
    pub banner: Option<String>,
}

/// Feedback state owned by one controller.
#[derive(Debug, Clone)]
pub struct UiFeedback {
    banner_ttl: Duration,
    trigger_hidden: bool,
    banner: Option<Banner>,
}

impl UiFeedback {
    pub fn new(banner_ttl: Duration) -> Self {
        Self {
            banner_ttl,
            trigger_hidden: false,
            banner: None,
        }
    }

    /// Shows `message`, replacing any banner still on screen.
    pub fn show_banner(&mut self, message: impl Into<String>, now: Instant) {
        self.banner = Some(Banner {
            message: message.into(),
            expires_at: now + self.banner_ttl,
        });
    }

    pub fn hide_trigger(&mut self) {
        self.trigger_hidden = true;
    }

    /// The banner visible at `now`, if it has not dismissed itself yet.
    pub fn active_banner(&self, now: Instant) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| now < b.expires_at)
    }

    pub fn snapshot(&self, loading: bool, now: Instant) -> FeedbackSnapshot {
        let trigger = if self.trigger_hidden {
            TriggerControl::Hidden
        } else if loading {
            TriggerControl::Disabled
        } else {
            TriggerControl::Enabled
        };
        FeedbackSnapshot {
            loading,
            trigger,
            banner: self.active_banner(now).map(|b| b.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_dismisses_itself() {
        let now = Instant::now();
        let mut ui = UiFeedback::new(Duration::from_millis(5000));
        ui.show_banner("boom", now);

        assert_eq!(
            ui.active_banner(now + Duration::from_millis(4999))
                .map(|b| b.message.as_str()),
            Some("boom")
        );
        assert!(ui.active_banner(now + Duration::from_millis(5000)).is_none());
    }

    #[test]
    fn trigger_state_follows_loading_and_exhaustion() {
        let now = Instant::now();
        let mut ui = UiFeedback::new(Duration::from_secs(5));
        assert_eq!(ui.snapshot(false, now).trigger, TriggerControl::Enabled);
        assert_eq!(ui.snapshot(true, now).trigger, TriggerControl::Disabled);

        ui.hide_trigger();
        assert_eq!(ui.snapshot(false, now).trigger, TriggerControl::Hidden);
        assert_eq!(ui.snapshot(true, now).trigger, TriggerControl::Hidden);
    }
}
