//! Actions - every state change goes through one of these

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::share::ShareOutcome;
use crate::state::WeatherResult;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Input category =====
    /// Location field text changed (stored verbatim)
    InputChange(String),

    // ===== Search category =====
    /// Submit the current input (triggers async task)
    SearchSubmit,

    // ===== Weather category =====
    /// Result: lookup `request_id` succeeded
    WeatherDidLoad(u64, WeatherResult),

    /// Result: provider has no such location
    WeatherDidNotFind(u64),

    /// Result: transport or response failure, with a user-facing message
    WeatherDidError(u64, String),

    // ===== Notice category =====
    /// Close the blocking notice
    NoticeDismiss,

    // ===== Share category =====
    /// Open the share sheet (only with a result on screen)
    ShareOpen,

    /// Close the share sheet without sharing
    ShareClose,

    /// Highlight a share target (by index)
    ShareSelect(usize),

    /// Share to the highlighted target
    ShareConfirm,

    /// Result: share finished
    ShareDidComplete(ShareOutcome),

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement etc.)
    Render,

    /// Animation tick
    Tick,

    /// Exit the application
    Quit,
}
