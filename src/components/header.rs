use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use super::{Component, theme};
use crate::action::Action;
use crate::band::TemperatureBand;

pub const APP_TITLE: &str = "Weather";

/// FIGlet title tinted by the current band, plus one status line under it
pub struct Header;

pub struct HeaderProps<'a> {
    pub title: &'a str,
    pub band: Option<TemperatureBand>,
    pub status: Option<&'a str>,
    pub opacity: f32,
}

fn gradient_colors(band: Option<TemperatureBand>) -> (ArtColor, ArtColor) {
    match band {
        Some(TemperatureBand::Frost) => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        Some(TemperatureBand::Cold) => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        Some(TemperatureBand::Humid) => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        Some(TemperatureBand::Hot) => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
        Some(TemperatureBand::None) | None => (
            ArtColor::rgb(180, 180, 180), // Gray (no band)
            ArtColor::rgb(240, 240, 240),
        ),
    }
}

/// Gradient blended in from the background by `opacity`
fn title_fill(band: Option<TemperatureBand>, opacity: f32) -> Fill {
    let (start, end) = gradient_colors(band);
    let (r, g, b) = theme::BACKGROUND;
    let background = ArtColor::rgb(r, g, b);
    let t = opacity.clamp(0.0, 1.0);
    Fill::Linear(LinearGradient::horizontal(
        background.interpolate(start, t),
        background.interpolate(end, t),
    ))
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title, artbox picks the font
            Constraint::Length(1), // Status
        ])
        .split(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill(props.band, props.opacity));
        frame.render_widget(ArtBox::new(&renderer, props.title), chunks[0]);

        if let Some(status) = props.status {
            let line = Line::styled(
                status.to_string(),
                Style::default().fg(theme::fade(theme::TEXT_DIM, props.opacity)),
            )
            .centered();
            frame.render_widget(Paragraph::new(line), chunks[1]);
        }
    }
}
