use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, centered_rect,
};

use super::{Component, theme};
use crate::action::Action;
use crate::share::ShareTarget;

pub const SHEET_TITLE: &str = "Share via";

/// Terminal share sheet: one row per configured target
pub struct ShareSheetView {
    list: SelectList,
    modal: Modal,
}

pub struct ShareSheetProps<'a> {
    pub targets: &'a [ShareTarget],
    pub selected: usize,
    pub is_focused: bool,
}

impl Default for ShareSheetView {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            modal: Modal::new(),
        }
    }
}

impl ShareSheetView {
    pub fn new() -> Self {
        Self::default()
    }

    fn target_items(targets: &[ShareTarget]) -> Vec<Line<'static>> {
        targets
            .iter()
            .map(|target| Line::from(target.label()))
            .collect()
    }

    /// Sheet size: title + blank + one row per target, plus padding
    pub fn area(targets: &[ShareTarget], area: Rect) -> Rect {
        let rows = targets.len() as u16 + 6;
        centered_rect(44, rows, area)
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(theme::color(theme::TEXT)),
        },
        selection: SelectionStyle::style_only(
            Style::default()
                .fg(theme::color(theme::SUN))
                .add_modifier(Modifier::BOLD),
        ),
        scrollbar: ScrollbarStyle::default(),
    }
}

fn modal_style() -> ModalStyle {
    ModalStyle {
        base: BaseStyle {
            bg: Some(theme::color(theme::PANEL)),
            padding: Padding::all(1),
            border: None,
            fg: None,
        },
        ..Default::default()
    }
}

impl Component<Action> for ShareSheetView {
    type Props<'a> = ShareSheetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Vec::new();
            }
            match key.code {
                KeyCode::Esc => return vec![Action::ShareClose],
                KeyCode::Enter => return vec![Action::ShareConfirm],
                _ => {}
            }
        }

        let items = Self::target_items(props.targets);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected,
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: false,
                wrap_navigation: true,
            },
            on_select: Action::ShareSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let ShareSheetView { list, modal } = self;
        let modal_area = Self::area(props.targets, area);
        let items = Self::target_items(props.targets);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Blank
                Constraint::Min(1),    // Targets
            ])
            .split(content_area);

            frame.render_widget(
                Paragraph::new(
                    Line::styled(
                        SHEET_TITLE,
                        Style::default()
                            .fg(theme::color(theme::TEXT))
                            .add_modifier(Modifier::BOLD),
                    )
                    .centered(),
                ),
                chunks[0],
            );

            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: false,
                    wrap_navigation: true,
                },
                on_select: Action::ShareSelect,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[2], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: modal_style(),
                behavior: ModalBehavior::default(),
                on_close: || Action::ShareClose,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn targets() -> Vec<ShareTarget> {
        vec![
            ShareTarget::Clipboard,
            ShareTarget::File("notes.txt".into()),
        ]
    }

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_esc_dismisses_and_enter_confirms() {
        let targets = targets();
        let mut sheet = ShareSheetView::new();
        let props = || ShareSheetProps {
            targets: &targets,
            selected: 0,
            is_focused: true,
        };

        let actions: Vec<_> = sheet
            .handle_event(&press(KeyCode::Esc), props())
            .into_iter()
            .collect();
        actions.assert_first(Action::ShareClose);

        let actions: Vec<_> = sheet
            .handle_event(&press(KeyCode::Enter), props())
            .into_iter()
            .collect();
        actions.assert_first(Action::ShareConfirm);
    }

    #[test]
    fn test_render_lists_targets() {
        let targets = targets();
        let mut render = RenderHarness::new(60, 20);
        let mut sheet = ShareSheetView::new();
        let output = render.render_to_string_plain(|frame| {
            sheet.render(
                frame,
                frame.area(),
                ShareSheetProps {
                    targets: &targets,
                    selected: 1,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains(SHEET_TITLE));
        assert!(output.contains("Copy to clipboard"));
        assert!(output.contains("Append to notes.txt"));
    }
}
