pub mod header;
pub mod lookup_screen;
pub mod notice_modal;
pub mod result_card;
pub mod search_bar;
pub mod share_sheet;
pub mod theme;

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tui_dispatch::EventKind;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use header::{Header, HeaderProps};
pub use lookup_screen::{LookupScreen, LookupScreenProps};
pub use notice_modal::{NoticeModal, NoticeModalProps};
pub use result_card::{ResultCard, ResultCardProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use share_sheet::{ShareSheetProps, ShareSheetView};

/// Left click (press) inside `area`
pub fn clicked(event: &EventKind, area: Rect) -> bool {
    match event {
        EventKind::Mouse(mouse) => {
            matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                && area.contains(Position::new(mouse.column, mouse.row))
        }
        _ => false,
    }
}
