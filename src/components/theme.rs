//! Palette and the fade-in blend

use ratatui::style::Color;

/// Plain RGB triple so colours can be blended before becoming `Color`s
pub type Rgb = (u8, u8, u8);

pub const BACKGROUND: Rgb = (4, 4, 4);
pub const PANEL: Rgb = (18, 18, 20);
pub const TEXT: Rgb = (240, 240, 240);
pub const TEXT_DIM: Rgb = (150, 150, 150);
pub const BORDER: Rgb = (255, 255, 255);

pub const ICE: Rgb = (150, 200, 255);
pub const SNOW: Rgb = (230, 240, 255);
pub const CLOUD: Rgb = (170, 170, 180);
pub const WATER: Rgb = (90, 160, 255);
pub const SUN: Rgb = (255, 210, 80);
pub const EMBER: Rgb = (255, 120, 60);

pub const SUCCESS: Rgb = (100, 200, 120);
pub const ERROR: Rgb = (220, 90, 90);
pub const IMPACT: Rgb = (230, 190, 90);

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// `rgb` seen at `opacity` over the app background
pub fn fade(rgb: Rgb, opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
    Color::Rgb(
        mix(BACKGROUND.0, rgb.0),
        mix(BACKGROUND.1, rgb.1),
        mix(BACKGROUND.2, rgb.2),
    )
}
