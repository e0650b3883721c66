#![forbid(unsafe_code)]

use crate::report::Severity;

/// Rendering hint for a table row. The Presentation Layer decides what to
/// do with it; this crate only states which rows deserve emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowHighlight {
    LightRed,
    LightOrange,
    LightYellow,
    Plain,
}

impl RowHighlight {
    pub fn css_color(self) -> Option<&'static str> {
        match self {
            RowHighlight::LightRed => Some("#ffadad"),
            RowHighlight::LightOrange => Some("#ffd6a5"),
            RowHighlight::LightYellow => Some("#fdffb6"),
            RowHighlight::Plain => None,
        }
    }
}

impl Severity {
    pub fn highlight(self) -> RowHighlight {
        match self {
            Severity::Critical => RowHighlight::LightRed,
            Severity::High => RowHighlight::LightOrange,
            Severity::Medium => RowHighlight::LightYellow,
            Severity::Low => RowHighlight::Plain,
        }
    }

    /// RGB fill for the incident marker on the map plot.
    pub fn marker_color(self) -> [u8; 3] {
        match self {
            Severity::Critical => [255, 0, 0],
            Severity::High => [255, 140, 0],
            Severity::Medium => [255, 255, 0],
            Severity::Low => [0, 128, 0],
        }
    }
}
