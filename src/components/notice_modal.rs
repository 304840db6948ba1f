use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::{Component, theme};
use crate::action::Action;
use crate::state::{Notice, NoticeKind};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Blocking notice; Enter or Esc dismisses it
pub struct NoticeModal {
    modal: Modal,
}

pub struct NoticeModalProps<'a> {
    pub notice: &'a Notice,
    pub is_focused: bool,
}

impl Default for NoticeModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl NoticeModal {
    pub fn new() -> Self {
        Self::default()
    }
}

fn accent(kind: NoticeKind) -> theme::Rgb {
    match kind {
        NoticeKind::LocationNotFound => theme::IMPACT,
        NoticeKind::RequestFailed | NoticeKind::ShareFailed => theme::ERROR,
    }
}

impl Component<Action> for NoticeModal {
    type Props<'a> = NoticeModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::NoticeDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let notice = props.notice;
        let modal_area = centered_rect(50, 9, area);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Hint
            ])
            .split(content_area);

            let title = Line::from(vec![
                Span::raw(format!("{} ", ERROR_ICON)),
                Span::styled(
                    notice.title(),
                    Style::default()
                        .fg(theme::color(accent(notice.kind)))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .centered();
            frame.render_widget(Paragraph::new(title), chunks[0]);

            frame.render_widget(
                Paragraph::new(Line::from(notice.message.as_str()).centered())
                    .wrap(Wrap { trim: true }),
                chunks[1],
            );

            let hint = Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme::color(theme::TEXT_DIM))),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(theme::color(theme::TEXT))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to dismiss", Style::default().fg(theme::color(theme::TEXT_DIM))),
            ])
            .centered();
            frame.render_widget(Paragraph::new(hint), chunks[2]);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(theme::color(theme::PANEL)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::NoticeDismiss,
                render_content: &mut render_content,
            },
        );
    }
}
