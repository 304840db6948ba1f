//! Temperature bands - which icon goes with a reading

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Discrete temperature range shown as a single icon on the result card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TemperatureBand {
    Frost,
    Cold,
    Humid,
    Hot,
    /// Outside every range - no icon
    None,
}

/// Ordered `(exclusive upper bound, band)` table. First match wins.
///
/// Readings arrive with two decimals, so `< 11.0` covers everything up to
/// and including 10.99, and 11.00 falls into the next band.
const BAND_TABLE: [(f64, TemperatureBand); 4] = [
    (11.0, TemperatureBand::Frost),
    (21.0, TemperatureBand::Cold),
    (31.0, TemperatureBand::Humid),
    (41.0, TemperatureBand::Hot),
];

/// Map a Celsius reading to its band. Total over every `f64`, NaN included.
pub fn classify(celsius: f64) -> TemperatureBand {
    BAND_TABLE
        .iter()
        .find(|(upper, _)| celsius < *upper)
        .map(|(_, band)| *band)
        .unwrap_or(TemperatureBand::None)
}

impl TemperatureBand {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureBand::Frost => "Frost",
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Humid => "Humid",
            TemperatureBand::Hot => "Hot",
            TemperatureBand::None => "",
        }
    }

    /// Whether the card shows an icon for this band
    pub fn has_icon(self) -> bool {
        self != TemperatureBand::None
    }
}
