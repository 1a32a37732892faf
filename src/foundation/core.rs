use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Frame outline a border conforms to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameShape {
    /// Round avatar frame.
    #[default]
    Circle,
    /// Square frame inset by the border margin.
    Square,
}

impl FrameShape {
    /// Lowercase tag used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            other => Err(format!("unknown frame shape \"{other}\" (expected circle|square)")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
