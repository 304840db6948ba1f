//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::band::{self, TemperatureBand};
use crate::share::{ShareOutcome, ShareTarget};

/// Current conditions for one location, as reported by the provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherResult {
    pub location: String,
    /// Degrees Celsius
    pub temperature: f64,
    pub description: String,
    /// Percent, 0-100
    pub humidity: u8,
    /// Meters; the provider leaves it out for some stations
    pub visibility: Option<u32>,
    /// hPa
    pub pressure: u32,
}

impl WeatherResult {
    pub fn band(&self) -> TemperatureBand {
        band::classify(self.temperature)
    }
}

/// A lookup that has been sent and not yet answered
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PendingLookup {
    pub request_id: u64,
    pub location: String,
}

/// What a blocking notice is about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeKind {
    LocationNotFound,
    RequestFailed,
    ShareFailed,
}

/// Blocking, user-dismissed message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn location_not_found() -> Self {
        Self {
            kind: NoticeKind::LocationNotFound,
            message: "Location not found!".into(),
        }
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::RequestFailed,
            message: message.into(),
        }
    }

    pub fn share_failed(reason: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::ShareFailed,
            message: reason.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::LocationNotFound => "Not found",
            NoticeKind::RequestFailed => "Lookup failed",
            NoticeKind::ShareFailed => "Share failed",
        }
    }
}

/// Open share sheet - which target is highlighted
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShareSheet {
    pub selected: usize,
}

/// Feedback pulse kinds (haptics on a phone, bell + flash here)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Feedback {
    Success,
    Error,
    Impact,
}

/// Search-bar border flash that fades out after a few ticks
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackFlash {
    pub kind: Feedback,
    pub ticks_remaining: u32,
}

/// Animation timing
pub const TICK_MS: u64 = 50;
pub const FADE_IN_MS: u64 = 1000;
pub const FADE_IN_TICKS: u32 = (FADE_IN_MS / TICK_MS) as u32;
pub const FLASH_TICKS: u32 = 8;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text in the location field, verbatim
    #[debug(section = "Input", label = "Text")]
    pub input: String,

    /// Last successful lookup. Replaced whole, never merged.
    #[debug(section = "Weather", label = "Current", debug_fmt)]
    pub current: Option<WeatherResult>,

    /// Outstanding lookup; a newer submission supersedes it
    #[debug(section = "Weather", label = "Pending", debug_fmt)]
    pub pending: Option<PendingLookup>,

    #[debug(section = "Weather", label = "Notice", debug_fmt)]
    pub notice: Option<Notice>,

    // --- Share ---
    #[debug(section = "Share", label = "Targets", debug_fmt)]
    pub share_targets: Vec<ShareTarget>,

    #[debug(section = "Share", label = "Sheet", debug_fmt)]
    pub share_sheet: Option<ShareSheet>,

    #[debug(section = "Share", label = "Last outcome", debug_fmt)]
    pub last_share: Option<ShareOutcome>,

    // --- Internals (skipped) ---
    #[debug(skip)]
    pub next_request_id: u64,

    /// Mount-time fade-in progress, 0..=FADE_IN_TICKS
    #[debug(skip)]
    pub fade_ticks: u32,

    #[debug(skip)]
    pub flash: Option<FeedbackFlash>,
}

impl AppState {
    pub fn new(share_targets: Vec<ShareTarget>) -> Self {
        Self {
            input: String::new(),
            current: None,
            pending: None,
            notice: None,
            share_targets,
            share_sheet: None,
            last_share: None,
            next_request_id: 1,
            fade_ticks: 0,
            flash: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Card opacity in `0.0..=1.0`
    pub fn fade_progress(&self) -> f32 {
        let total = FADE_IN_TICKS.max(1);
        self.fade_ticks.min(total) as f32 / total as f32
    }

    pub fn is_animating(&self) -> bool {
        self.fade_ticks < FADE_IN_TICKS || self.flash.is_some()
    }

    /// Whether a modal layer (notice or share sheet) owns input
    pub fn has_modal(&self) -> bool {
        self.notice.is_some() || self.share_sheet.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(vec![ShareTarget::Clipboard])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_progress_bounds() {
        let mut state = AppState::default();
        assert_eq!(state.fade_progress(), 0.0);
        state.fade_ticks = FADE_IN_TICKS / 2;
        assert!((state.fade_progress() - 0.5).abs() < f32::EPSILON);
        state.fade_ticks = FADE_IN_TICKS * 3;
        assert_eq!(state.fade_progress(), 1.0);
    }

    #[test]
    fn test_result_band_follows_temperature() {
        let result = WeatherResult {
            temperature: 25.0,
            ..Default::default()
        };
        assert_eq!(result.band(), TemperatureBand::Humid);
    }
}
