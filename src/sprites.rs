//! Band icons - small multi-layer text sprites with an emoji fallback
//!
//! Each icon is a stack of same-sized layers; spaces are transparent and the
//! last layer is drawn on top.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use crate::band::TemperatureBand;
use crate::components::theme::{self, Rgb};

/// Rows every sprite occupies
pub const SPRITE_HEIGHT: u16 = 5;

mod sprite_data {
    pub const FROST_ARMS: &str = concat!(
        "    |    \n",
        " \\  |  / \n",
        "  --+--  \n",
        " /  |  \\ \n",
        "    |    \n",
    );
    pub const FROST_TIPS: &str = concat!(
        "    *    \n",
        " *     * \n",
        "*       *\n",
        " *     * \n",
        "    *    \n",
    );

    pub const COLD_CLOUD: &str = concat!(
        "   .--.    \n",
        " .(    ).  \n",
        "(___.__)_) \n",
        "           \n",
        "           \n",
    );
    pub const COLD_WIND: &str = concat!(
        "           \n",
        "           \n",
        "           \n",
        "  ~~ ~~~~  \n",
        " ~~~~ ~~   \n",
    );

    pub const HUMID_DROP: &str = concat!(
        "    .     \n",
        "   / \\    \n",
        "  (   )   \n",
        "   `-'    \n",
        "          \n",
    );
    pub const HUMID_SPLASH: &str = concat!(
        "          \n",
        "       .  \n",
        "      (_) \n",
        "          \n",
        " ~~~~~~~~ \n",
    );

    pub const HOT_RAYS: &str = concat!(
        "  \\  |  /  \n",
        "           \n",
        "--       --\n",
        "           \n",
        "  /  |  \\  \n",
    );
    pub const HOT_CORE: &str = concat!(
        "           \n",
        "   .---.   \n",
        "  (     )  \n",
        "   `---'   \n",
        "           \n",
    );
}

struct SpriteLayer {
    content: &'static str,
    color: Rgb,
}

/// Composite layers into Text, treating spaces as transparent.
/// Colours are blended in from the card background by `opacity`.
fn composite_layers(layers: &[SpriteLayer], opacity: f32) -> Text<'static> {
    let layer_lines: Vec<Vec<&str>> = layers.iter().map(|l| l.content.lines().collect()).collect();
    let max_lines = layer_lines.iter().map(|l| l.len()).max().unwrap_or(0);

    let lines = (0..max_lines)
        .map(|row| {
            let width = layer_lines
                .iter()
                .filter_map(|lines| lines.get(row))
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            let spans: Vec<Span<'static>> = (0..width)
                .map(|col| {
                    let top = layers.iter().enumerate().rev().find_map(|(idx, layer)| {
                        layer_lines[idx]
                            .get(row)
                            .and_then(|line| line.chars().nth(col))
                            .filter(|ch| *ch != ' ')
                            .map(|ch| (ch, layer.color))
                    });
                    match top {
                        Some((ch, color)) => Span::styled(
                            ch.to_string(),
                            Style::default().fg(theme::fade(color, opacity)),
                        ),
                        None => Span::raw(" "),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}

fn layers_for(band: TemperatureBand) -> Option<[SpriteLayer; 2]> {
    use self::sprite_data::*;

    let layers = match band {
        TemperatureBand::Frost => [
            SpriteLayer { content: FROST_ARMS, color: theme::ICE },
            SpriteLayer { content: FROST_TIPS, color: theme::SNOW },
        ],
        TemperatureBand::Cold => [
            SpriteLayer { content: COLD_CLOUD, color: theme::CLOUD },
            SpriteLayer { content: COLD_WIND, color: theme::ICE },
        ],
        TemperatureBand::Humid => [
            SpriteLayer { content: HUMID_DROP, color: theme::WATER },
            SpriteLayer { content: HUMID_SPLASH, color: theme::ICE },
        ],
        TemperatureBand::Hot => [
            SpriteLayer { content: HOT_RAYS, color: theme::SUN },
            SpriteLayer { content: HOT_CORE, color: theme::EMBER },
        ],
        TemperatureBand::None => return None,
    };
    Some(layers)
}

/// Sprite for a band, `None` when the band has no icon.
pub fn band_sprite(band: TemperatureBand, opacity: f32) -> Option<Text<'static>> {
    layers_for(band).map(|layers| composite_layers(&layers, opacity))
}

/// One-cell fallback for cramped terminals
pub fn band_emoji(band: TemperatureBand) -> Option<&'static str> {
    match band {
        TemperatureBand::Frost => Some("\u{2744}\u{fe0f}"),
        TemperatureBand::Cold => Some("\u{1f32c}\u{fe0f}"),
        TemperatureBand::Humid => Some("\u{1f4a7}"),
        TemperatureBand::Hot => Some("\u{2600}\u{fe0f}"),
        TemperatureBand::None => None,
    }
}
