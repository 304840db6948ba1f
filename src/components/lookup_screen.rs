use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::header::APP_TITLE;
use super::{
    Component, Header, HeaderProps, ResultCard, ResultCardProps, SearchBar, SearchBarProps, theme,
};
use crate::action::Action;
use crate::state::AppState;

pub const EMPTY_HINT: &str = "Type a city and press Enter";

const SEARCH_MAX_WIDTH: u16 = 60;
const HEADER_MAX_ROWS: u16 = 7;

/// Props for LookupScreen - read-only view of state
pub struct LookupScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole single screen: title, search bar, result card, key hints
pub struct LookupScreen {
    search: SearchBar,
    card: ResultCard,
}

impl Default for LookupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupScreen {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
            card: ResultCard::default(),
        }
    }
}

/// Line under the title: what is happening right now
pub fn status_text(state: &AppState) -> Option<String> {
    if let Some(pending) = &state.pending {
        return Some(format!("Looking up {}...", pending.location));
    }
    state.last_share.as_ref().map(|outcome| outcome.status_text())
}

impl Component<Action> for LookupScreen {
    type Props<'a> = LookupScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;

        if let EventKind::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    // Esc clears a typed location before it quits
                    KeyCode::Esc if !state.input.is_empty() => {
                        return vec![Action::InputChange(String::new())];
                    }
                    KeyCode::Esc => return vec![Action::Quit],
                    KeyCode::Char('c') if ctrl => return vec![Action::Quit],
                    KeyCode::Char('s') if ctrl => {
                        return if state.current.is_some() {
                            vec![Action::ShareOpen]
                        } else {
                            Vec::new()
                        };
                    }
                    _ => {}
                }
            }
        }

        if let Some(result) = &state.current {
            let card_props = ResultCardProps {
                result,
                opacity: state.fade_progress(),
                is_focused: true,
            };
            let actions: Vec<_> = self.card.handle_event(event, card_props).into_iter().collect();
            if !actions.is_empty() {
                return actions;
            }
        }

        let search_props = SearchBarProps {
            value: &state.input,
            is_focused: true,
            flash: state.flash,
        };
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LookupScreenProps<'_>) {
        let state = props.state;
        let opacity = state.fade_progress();

        let [header_area, search_row, _, body_area, hints_area] = Layout::vertical([
            Constraint::Max(HEADER_MAX_ROWS),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = state
            .current
            .as_ref()
            .map(|r| r.location.as_str())
            .unwrap_or(APP_TITLE);
        let status = status_text(state);
        let mut header = Header;
        header.render(
            frame,
            header_area,
            HeaderProps {
                title,
                band: state.current.as_ref().map(|r| r.band()),
                status: status.as_deref(),
                opacity,
            },
        );

        let [search_area] = Layout::horizontal([Constraint::Max(SEARCH_MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(search_row);
        self.search.render(
            frame,
            search_area,
            SearchBarProps {
                value: &state.input,
                is_focused: props.is_focused,
                flash: state.flash,
            },
        );

        match &state.current {
            Some(result) => self.card.render(
                frame,
                body_area,
                ResultCardProps {
                    result,
                    opacity,
                    is_focused: props.is_focused,
                },
            ),
            None => {
                let hint = Line::styled(
                    EMPTY_HINT,
                    Style::default().fg(theme::fade(theme::TEXT_DIM, opacity)),
                )
                .centered();
                frame.render_widget(Paragraph::new(hint), body_area);
            }
        }

        let mut hints = vec![StatusBarHint::new("Enter", "search")];
        if state.current.is_some() {
            hints.push(StatusBarHint::new("Ctrl+S", "share"));
        }
        let esc = if state.input.is_empty() { "quit" } else { "clear" };
        hints.push(StatusBarHint::new("Esc", esc));

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            hints_area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PendingLookup, WeatherResult};
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn ctrl(c: char) -> EventKind {
        EventKind::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn with_result() -> AppState {
        AppState {
            current: Some(WeatherResult {
                location: "Paris".into(),
                temperature: 18.3,
                description: "few clouds".into(),
                humidity: 60,
                visibility: Some(10000),
                pressure: 1015,
            }),
            ..Default::default()
        }
    }

    fn handle(state: &AppState, event: EventKind) -> Vec<Action> {
        let mut screen = LookupScreen::new();
        screen
            .handle_event(
                &event,
                LookupScreenProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_ctrl_s_shares_only_with_result() {
        handle(&AppState::default(), ctrl('s')).assert_empty();
        handle(&with_result(), ctrl('s')).assert_first(Action::ShareOpen);
    }

    #[test]
    fn test_quit_keys() {
        handle(&AppState::default(), ctrl('c')).assert_first(Action::Quit);
        let esc = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        handle(&AppState::default(), esc).assert_first(Action::Quit);
    }

    #[test]
    fn test_typing_reaches_search_bar() {
        handle(&AppState::default(), EventKind::Key(key("p")))
            .assert_first(Action::InputChange("p".into()));
    }

    #[test]
    fn test_status_text_prefers_pending_lookup() {
        let mut state = with_result();
        state.last_share = Some(crate::share::ShareOutcome::Shared);
        assert_eq!(status_text(&state).as_deref(), Some("Shared"));

        state.pending = Some(PendingLookup {
            request_id: 3,
            location: "Oslo".into(),
        });
        assert_eq!(status_text(&state).as_deref(), Some("Looking up Oslo..."));
    }

    #[test]
    fn test_esc_clears_input_before_quitting() {
        let esc = || EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let typed = AppState {
            input: "Pari".into(),
            ..Default::default()
        };

        handle(&typed, esc()).assert_first(Action::InputChange(String::new()));
        handle(&AppState::default(), esc()).assert_first(Action::Quit);
        handle(&typed, ctrl('c')).assert_first(Action::Quit);
    }
}
