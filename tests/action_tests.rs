//! Reducer and action tests using EffectStore and TestHarness

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use weather_lookup::{
    action::Action,
    components::{Component, LookupScreen, LookupScreenProps},
    effect::Effect,
    reducer::reducer,
    share::{ShareOutcome, ShareTarget},
    state::{AppState, Feedback, WeatherResult},
};

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
fn test_reducer_submit_starts_lookup() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::InputChange("  Paris ".into()));
    let result = store.dispatch(Action::SearchSubmit);

    assert!(result.changed, "State should change");
    assert_eq!(
        result.effects,
        vec![
            Effect::Feedback(Feedback::Success),
            Effect::FetchWeather {
                request_id: 1,
                location: "Paris".into(),
            },
        ]
    );
    assert!(store.state().input.is_empty(), "input cleared on submit");
    assert!(store.state().is_submitting());
}

#[test]
fn test_reducer_input_kept_verbatim() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::InputChange(" New  York ".into()));
    assert!(result.changed);
    assert_eq!(store.state().input, " New  York ");

    let again = store.dispatch(Action::InputChange(" New  York ".into()));
    assert!(!again.changed, "same text is a no-op");
}

#[test]
fn test_reducer_load_replaces_result() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::InputChange("Paris".into()));
    store.dispatch(Action::SearchSubmit);
    store.dispatch(Action::WeatherDidLoad(1, paris()));

    assert_eq!(store.state().current, Some(paris()));
    assert!(!store.state().is_submitting());
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = LookupScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("p", |state, event| {
        let props = LookupScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::InputChange("p".into()));
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = LookupScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b c", |state, event| {
        let props = LookupScreenProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad(1, paris());
    let submit = Action::SearchSubmit;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(submit.category(), Some("search"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(submit.is_search());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());
    harness.emit(Action::SearchSubmit);
    harness.emit(Action::WeatherDidNotFind(1));
    harness.emit(Action::NoticeDismiss);

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::SearchSubmit,
        Action::WeatherDidLoad(1, paris()),
        Action::ShareDidComplete(ShareOutcome::Shared),
    ];

    assert_emitted!(actions, Action::SearchSubmit);
    assert_emitted!(actions, Action::WeatherDidLoad(1, _));
    assert_emitted!(actions, Action::ShareDidComplete(ShareOutcome::Shared));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidError(_, _));
}

#[test]
fn test_share_targets_from_state() {
    let targets = vec![
        ShareTarget::Clipboard,
        ShareTarget::Command {
            program: "wl-copy".into(),
            args: Vec::new(),
        },
    ];
    let state = AppState::new(targets.clone());

    assert_eq!(state.share_targets, targets);
    assert_eq!(state.next_request_id, 1);
    assert!(state.current.is_none());
}
