//! Weather lookup TUI

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_lookup::action::Action;
use weather_lookup::api::WeatherClient;
use weather_lookup::components::{
    Component, LookupScreen, LookupScreenProps, NoticeModal, NoticeModalProps, ShareSheetProps,
    ShareSheetView,
};
use weather_lookup::config::{Config, ConfigArgs};
use weather_lookup::effect::{Effect, lookup_weather};
use weather_lookup::logging;
use weather_lookup::reducer::reducer;
use weather_lookup::share::{self, ShareTarget};
use weather_lookup::state::{AppState, TICK_MS};

/// Look up the current weather for a location
#[derive(Parser, Debug)]
#[command(name = "weather-lookup")]
#[command(about = "Current weather for a city, in the terminal")]
struct Args {
    /// Location to look up right away
    location: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum LookupComponentId {
    Screen,
    Share,
    Notice,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum LookupContext {
    Main,
    Modal,
}

fn overlay(state: &AppState) -> Option<LookupComponentId> {
    if state.notice.is_some() {
        Some(LookupComponentId::Notice)
    } else if state.share_sheet.is_some() {
        Some(LookupComponentId::Share)
    } else {
        None
    }
}

impl EventRoutingState<LookupComponentId, LookupContext> for AppState {
    fn focused(&self) -> Option<LookupComponentId> {
        overlay(self).or(Some(LookupComponentId::Screen))
    }

    fn modal(&self) -> Option<LookupComponentId> {
        overlay(self)
    }

    fn binding_context(&self, id: LookupComponentId) -> LookupContext {
        match id {
            LookupComponentId::Screen => LookupContext::Main,
            LookupComponentId::Share | LookupComponentId::Notice => LookupContext::Modal,
        }
    }

    fn default_context(&self) -> LookupContext {
        LookupContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        location,
        config: config_args,
        debug: debug_args,
    } = Args::parse();

    let config = match Config::from_args(config_args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Some(path) = &config.log_file {
        logging::init_file_logging(path)?;
    }

    let client = match WeatherClient::new(&config.api_key, &config.base_url, config.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not set up the HTTP client.");
            eprintln!("Details: {}", e);
            std::process::exit(1);
        }
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let location = location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    let init_action = location.as_ref().map(|_| Action::SearchSubmit);

    let share_targets = config.share_targets.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(share_targets);
            if let Some(location) = location {
                state.input = location;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let effects = EffectRunner {
        client,
        bell: config.bell,
    };
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        effects,
        init_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("weather-lookup exiting");
    Ok(())
}

struct LookupUi {
    screen: LookupScreen,
    share: ShareSheetView,
    notice: NoticeModal,
}

impl LookupUi {
    fn new() -> Self {
        Self {
            screen: LookupScreen::new(),
            share: ShareSheetView::new(),
            notice: NoticeModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<LookupComponentId>,
    ) {
        event_ctx.set_component_area(LookupComponentId::Screen, area);

        let props = LookupScreenProps {
            state,
            is_focused: render_ctx.is_focused() && !state.has_modal(),
        };
        self.screen.render(frame, area, props);

        match &state.share_sheet {
            Some(sheet) => {
                let sheet_area = ShareSheetView::area(&state.share_targets, area);
                event_ctx.set_component_area(LookupComponentId::Share, sheet_area);
                let props = ShareSheetProps {
                    targets: &state.share_targets,
                    selected: sheet.selected,
                    is_focused: render_ctx.is_focused() && state.notice.is_none(),
                };
                self.share.render(frame, area, props);
            }
            None => {
                event_ctx.component_areas.remove(&LookupComponentId::Share);
            }
        }

        match &state.notice {
            Some(notice) => {
                event_ctx.set_component_area(LookupComponentId::Notice, area);
                let props = NoticeModalProps {
                    notice,
                    is_focused: render_ctx.is_focused(),
                };
                self.notice.render(frame, area, props);
            }
            None => {
                event_ctx.component_areas.remove(&LookupComponentId::Notice);
            }
        }
    }

    fn handle_screen_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = LookupScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.screen.handle_event(event, props).into_iter().collect();
        respond(actions)
    }

    fn handle_share_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(sheet) = state.share_sheet else {
            return HandlerResponse::ignored();
        };
        let props = ShareSheetProps {
            targets: &state.share_targets,
            selected: sheet.selected,
            is_focused: true,
        };
        let actions: Vec<_> = self.share.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_notice_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(notice) = &state.notice else {
            return HandlerResponse::ignored();
        };
        let props = NoticeModalProps {
            notice,
            is_focused: true,
        };
        let actions: Vec<_> = self.notice.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    effects: EffectRunner,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(LookupUi::new()));
    let mut bus: EventBus<AppState, Action, LookupComponentId, LookupContext> = EventBus::new();
    let keybindings: Keybindings<LookupContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(LookupComponentId::Screen, move |event, state| {
        ui_screen
            .borrow_mut()
            .handle_screen_event(&event.kind, state)
    });

    let ui_share = Rc::clone(&ui);
    bus.register(LookupComponentId::Share, move |event, state| {
        ui_share.borrow_mut().handle_share_event(&event.kind, state)
    });

    let ui_notice = Rc::clone(&ui);
    bus.register(LookupComponentId::Notice, move |event, state| {
        ui_notice
            .borrow_mut()
            .handle_notice_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| effects.handle(effect, ctx),
        )
        .await
}

/// Runs effects: network and share work goes to tasks, feedback is immediate
struct EffectRunner {
    client: WeatherClient,
    bell: bool,
}

impl EffectRunner {
    fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FetchWeather {
                request_id,
                location,
            } => {
                let client = self.client.clone();
                // Same key: a newer lookup cancels the one in flight
                ctx.tasks().spawn("weather", async move {
                    lookup_weather(&client, request_id, &location).await
                });
            }
            Effect::Share {
                target: ShareTarget::Clipboard,
                text,
            } => {
                // Written on the loop thread, between frames
                let outcome = share::share_via_terminal(&text);
                ctx.tasks()
                    .spawn("share", async move { Action::ShareDidComplete(outcome) });
            }
            Effect::Share { target, text } => {
                ctx.tasks().spawn("share", async move {
                    Action::ShareDidComplete(share::invoke_share(&target, &text).await)
                });
            }
            Effect::Feedback(kind) => {
                tracing::debug!(?kind, "feedback");
                if self.bell {
                    let mut out = io::stdout();
                    if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
                        tracing::warn!(error = %e, "could not ring the bell");
                    }
                }
            }
        }
    }
}
