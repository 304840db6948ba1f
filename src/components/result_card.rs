use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;

use super::{Component, clicked, theme};
use crate::action::Action;
use crate::sprites::{self, SPRITE_HEIGHT};
use crate::state::WeatherResult;

pub const SHARE_LABEL: &str = "Share this weather forecast";

const CARD_MAX_WIDTH: u16 = 48;
/// Location, temperature, description, humidity, visibility, pressure
const FIELD_ROWS: u16 = 6;
const BORDER_ROWS: u16 = 2;
const SHARE_ROWS: u16 = 3;

/// The result card and its share button
#[derive(Default)]
pub struct ResultCard {
    share_area: Rect,
}

pub struct ResultCardProps<'a> {
    pub result: &'a WeatherResult,
    /// Fade-in progress, 0.0..=1.0
    pub opacity: f32,
    pub is_focused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IconFit {
    Sprite,
    Emoji,
    Hidden,
}

fn icon_fit(result: &WeatherResult, height: u16) -> IconFit {
    if !result.band().has_icon() {
        return IconFit::Hidden;
    }
    let needed = BORDER_ROWS + FIELD_ROWS + 1 + SPRITE_HEIGHT + 1 + SHARE_ROWS;
    if height >= needed {
        IconFit::Sprite
    } else {
        IconFit::Emoji
    }
}

fn icon_rows(fit: IconFit) -> u16 {
    match fit {
        IconFit::Sprite => SPRITE_HEIGHT + 1,
        IconFit::Emoji => 2,
        IconFit::Hidden => 0,
    }
}

fn field_line(label: &str, value: String, opacity: f32) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().fg(theme::fade(theme::TEXT_DIM, opacity)),
        ),
        Span::styled(
            value,
            Style::default()
                .fg(theme::fade(theme::TEXT, opacity))
                .add_modifier(Modifier::BOLD),
        ),
    ])
    .centered()
}

fn visibility_text(visibility: Option<u32>) -> String {
    match visibility {
        Some(meters) => format!("{} meters", meters),
        None => "n/a".to_string(),
    }
}

/// Field rows as shown on the card
pub fn card_lines(result: &WeatherResult, opacity: f32) -> Vec<Line<'static>> {
    vec![
        field_line("Location", result.location.clone(), opacity),
        field_line("Temperature", format!("{}°C", result.temperature), opacity),
        field_line("Description", result.description.clone(), opacity),
        field_line("Humidity", format!("{}%", result.humidity), opacity),
        field_line("Visibility", visibility_text(result.visibility), opacity),
        field_line("Pressure", format!("{} hPa", result.pressure), opacity),
    ]
}

impl Component<Action> for ResultCard {
    type Props<'a> = ResultCardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if props.is_focused && clicked(event, self.share_area) {
            Some(Action::ShareOpen)
        } else {
            None
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let result = props.result;
        let opacity = props.opacity;
        let fit = icon_fit(result, area.height);
        let card_height = BORDER_ROWS + FIELD_ROWS + icon_rows(fit);

        let [column] = Layout::horizontal([Constraint::Max(CARD_MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [card_area, _, share_area] = Layout::vertical([
            Constraint::Length(card_height),
            Constraint::Length(1),
            Constraint::Length(SHARE_ROWS),
        ])
        .areas(column);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::fade(theme::BORDER, opacity)))
            .style(Style::default().bg(theme::color(theme::PANEL)));
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        let [fields_area, _, icon_area] = Layout::vertical([
            Constraint::Length(FIELD_ROWS),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new(card_lines(result, opacity)), fields_area);

        let band = result.band();
        match fit {
            IconFit::Sprite => {
                if let Some(sprite) = sprites::band_sprite(band, opacity) {
                    frame.render_widget(
                        Paragraph::new(sprite).alignment(Alignment::Center),
                        icon_area,
                    );
                }
            }
            IconFit::Emoji => {
                if let Some(emoji) = sprites::band_emoji(band) {
                    let line = Line::from(vec![
                        Span::raw(format!("{} ", emoji)),
                        Span::styled(
                            band.label(),
                            Style::default().fg(theme::fade(theme::TEXT_DIM, opacity)),
                        ),
                    ])
                    .centered();
                    frame.render_widget(Paragraph::new(line), icon_area);
                }
            }
            IconFit::Hidden => {}
        }

        self.share_area = share_area;
        let share = Paragraph::new(
            Line::styled(
                SHARE_LABEL,
                Style::default().fg(theme::fade(theme::TEXT, opacity)),
            )
            .centered(),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::fade(theme::BORDER, opacity))),
        );
        frame.render_widget(share, share_area);
    }
}
