use crate::paint::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: Color,
    /// Fill for closed shapes that carry no fill color of their own.
    pub default_fill: Color,
    pub shadow: Color,
    pub debug_grid: Color,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            background: Color::WHITE,
            default_fill: Color::WHITE,
            shadow: Color::gray(150),
            debug_grid: Color::gray(170),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
