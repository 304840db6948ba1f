//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::share::{self, ShareOutcome};
use crate::state::{
    AppState, FADE_IN_TICKS, FLASH_TICKS, Feedback, FeedbackFlash, Notice, PendingLookup,
    ShareSheet,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Input actions =====
        Action::InputChange(text) => {
            if state.input == text {
                return DispatchResult::unchanged();
            }
            state.input = text;
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchSubmit => {
            let query = std::mem::take(&mut state.input);
            let location = query.trim();
            if location.is_empty() {
                flash(state, Feedback::Error);
                return DispatchResult::changed_with(Effect::Feedback(Feedback::Error));
            }

            let request_id = state.next_request_id;
            state.next_request_id += 1;
            // Supersedes any outstanding lookup; its reply will not match.
            state.pending = Some(PendingLookup {
                request_id,
                location: location.to_string(),
            });
            flash(state, Feedback::Success);

            let mut result = DispatchResult::changed_with(Effect::Feedback(Feedback::Success));
            result.effects.push(Effect::FetchWeather {
                request_id,
                location: location.to_string(),
            });
            result
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(request_id, weather) => {
            if !take_pending(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.current = Some(weather);
            DispatchResult::changed()
        }

        Action::WeatherDidNotFind(request_id) => {
            if !take_pending(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.notice = Some(Notice::location_not_found());
            DispatchResult::changed()
        }

        Action::WeatherDidError(request_id, message) => {
            if !take_pending(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.notice = Some(Notice::request_failed(message));
            DispatchResult::changed()
        }

        // ===== Notice actions =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Share actions =====
        Action::ShareOpen => {
            if state.current.is_none() || state.share_sheet.is_some() {
                return DispatchResult::unchanged();
            }
            state.share_sheet = Some(ShareSheet::default());
            flash(state, Feedback::Impact);
            DispatchResult::changed_with(Effect::Feedback(Feedback::Impact))
        }

        Action::ShareClose => {
            if state.share_sheet.take().is_none() {
                return DispatchResult::unchanged();
            }
            state.last_share = Some(ShareOutcome::Dismissed);
            DispatchResult::changed()
        }

        Action::ShareSelect(index) => match state.share_sheet.as_mut() {
            Some(sheet) if index < state.share_targets.len() && index != sheet.selected => {
                sheet.selected = index;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::ShareConfirm => {
            let Some(sheet) = state.share_sheet else {
                return DispatchResult::unchanged();
            };
            let (Some(target), Some(current)) = (
                state.share_targets.get(sheet.selected).cloned(),
                state.current.as_ref(),
            ) else {
                return DispatchResult::unchanged();
            };

            let text = share::compose_share_text(current);
            state.share_sheet = None;
            DispatchResult::changed_with(Effect::Share { target, text })
        }

        Action::ShareDidComplete(outcome) => {
            if let ShareOutcome::Failed(reason) = &outcome {
                state.notice = Some(Notice::share_failed(reason.clone()));
            }
            state.last_share = Some(outcome);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if !state.is_animating() {
                return DispatchResult::unchanged();
            }
            if state.fade_ticks < FADE_IN_TICKS {
                state.fade_ticks += 1;
            }
            if let Some(current) = state.flash.as_mut() {
                current.ticks_remaining = current.ticks_remaining.saturating_sub(1);
                if current.ticks_remaining == 0 {
                    state.flash = None;
                }
            }
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn flash(state: &mut AppState, kind: Feedback) {
    state.flash = Some(FeedbackFlash {
        kind,
        ticks_remaining: FLASH_TICKS,
    });
}

/// Clear `pending` if the reply belongs to it. Stale replies return false.
fn take_pending(state: &mut AppState, request_id: u64) -> bool {
    match &state.pending {
        Some(pending) if pending.request_id == request_id => {
            state.pending = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherResult;

    fn paris() -> WeatherResult {
        WeatherResult {
            location: "Paris".into(),
            temperature: 18.3,
            description: "few clouds".into(),
            humidity: 60,
            visibility: Some(10000),
            pressure: 1015,
        }
    }

    #[test]
    fn test_submit_empty_emits_error_feedback_only() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit);

        assert_eq!(result.effects, vec![Effect::Feedback(Feedback::Error)]);
        assert!(state.pending.is_none());
        assert!(state.current.is_none());
        assert_eq!(state.flash.map(|f| f.kind), Some(Feedback::Error));
    }

    #[test]
    fn test_submit_whitespace_counts_as_empty_and_clears() {
        let mut state = AppState {
            input: "   ".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit);

        assert_eq!(result.effects, vec![Effect::Feedback(Feedback::Error)]);
        assert_eq!(state.input, "");
    }

    #[test]
    fn test_submit_takes_input_and_fetches() {
        let mut state = AppState {
            input: " Paris ".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(result.changed);
        assert_eq!(state.input, "");
        assert_eq!(
            result.effects,
            vec![
                Effect::Feedback(Feedback::Success),
                Effect::FetchWeather {
                    request_id: 1,
                    location: "Paris".into()
                },
            ]
        );
        assert_eq!(state.pending.as_ref().map(|p| p.request_id), Some(1));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut state = AppState::default();
        state.input = "Paris".into();
        reducer(&mut state, Action::SearchSubmit);
        state.input = "Oslo".into();
        reducer(&mut state, Action::SearchSubmit);

        let result = reducer(&mut state, Action::WeatherDidLoad(1, paris()));
        assert!(!result.changed);
        assert!(state.current.is_none());
        assert_eq!(state.pending.as_ref().map(|p| p.location.as_str()), Some("Oslo"));
    }

    #[test]
    fn test_not_found_keeps_previous_result() {
        let mut state = AppState {
            current: Some(paris()),
            input: "Atlantis".into(),
            ..Default::default()
        };
        reducer(&mut state, Action::SearchSubmit);

        reducer(&mut state, Action::WeatherDidNotFind(1));

        assert_eq!(state.current, Some(paris()));
        assert_eq!(state.notice, Some(Notice::location_not_found()));
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_share_open_requires_result() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::ShareOpen).changed);
        assert!(state.share_sheet.is_none());

        state.current = Some(paris());
        let result = reducer(&mut state, Action::ShareOpen);
        assert_eq!(result.effects, vec![Effect::Feedback(Feedback::Impact)]);
        assert!(state.share_sheet.is_some());
    }

    #[test]
    fn test_share_confirm_emits_text_for_selected_target() {
        let mut state = AppState {
            current: Some(paris()),
            ..Default::default()
        };
        reducer(&mut state, Action::ShareOpen);

        let result = reducer(&mut state, Action::ShareConfirm);

        assert!(state.share_sheet.is_none());
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(
            &result.effects[0],
            Effect::Share { text, .. } if text.contains("Paris") && text.contains("18.3")
        ));
    }

    #[test]
    fn test_share_failure_raises_notice() {
        let mut state = AppState::default();

        reducer(
            &mut state,
            Action::ShareDidComplete(ShareOutcome::Failed("no terminal".into())),
        );

        assert_eq!(state.notice, Some(Notice::share_failed("no terminal")));
    }

    #[test]
    fn test_tick_runs_fade_once_then_idles() {
        let mut state = AppState::default();
        for _ in 0..FADE_IN_TICKS {
            assert!(reducer(&mut state, Action::Tick).changed);
        }
        assert_eq!(state.fade_progress(), 1.0);
        assert!(!reducer(&mut state, Action::Tick).changed);
    }
}
