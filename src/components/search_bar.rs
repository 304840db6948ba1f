use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, clicked, theme};
use crate::action::Action;
use crate::state::{Feedback, FeedbackFlash};

pub const PLACEHOLDER: &str = "Enter a location";
const BUTTON_LABEL: &str = "search";
const BUTTON_WIDTH: u16 = 10;

/// Location field plus a clickable search button
pub struct SearchBar {
    input: TextInput,
    button_area: Rect,
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    pub flash: Option<FeedbackFlash>,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            button_area: Rect::default(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(theme::color(theme::PANEL)),
            fg: Some(theme::color(theme::TEXT)),
        },
        placeholder_style: Some(Style::default().fg(theme::color(theme::TEXT_DIM))),
        cursor_style: None,
    }
}

fn border_color(flash: Option<FeedbackFlash>) -> theme::Rgb {
    match flash.map(|f| f.kind) {
        Some(Feedback::Success) => theme::SUCCESS,
        Some(Feedback::Error) => theme::ERROR,
        Some(Feedback::Impact) => theme::IMPACT,
        None => theme::BORDER,
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if clicked(event, self.button_area) {
            return vec![Action::SearchSubmit];
        }

        if let EventKind::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Vec::new();
            }
            if key.code == KeyCode::Enter {
                return vec![Action::SearchSubmit];
            }
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: Action::InputChange,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Fill(1),              // Input
            Constraint::Length(1),            // Gap
            Constraint::Length(BUTTON_WIDTH), // Button
        ])
        .split(area);

        let border = Style::default().fg(theme::color(border_color(props.flash)));

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(theme::color(theme::PANEL)));
        let input_area = input_block.inner(chunks[0]);
        frame.render_widget(input_block, chunks[0]);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::InputChange,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, input_area, input_props);

        self.button_area = chunks[2];
        let button = Paragraph::new(
            Line::styled(
                BUTTON_LABEL,
                Style::default()
                    .fg(theme::color(theme::TEXT))
                    .add_modifier(Modifier::BOLD),
            )
            .centered(),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
        frame.render_widget(button, chunks[2]);
    }
}
