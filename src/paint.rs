use crate::error::{RenderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Channels normalized to `0..=1` as emitted by `setrgbcolor`.
    pub fn components(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #RRGGBB color, got '{value}'"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| format!("invalid hex digits in color '{value}'"))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn code(self) -> u8 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

/// Tracked for equality only; joins are not written to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    pub intervals: Vec<f32>,
    pub phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: Option<DashPattern>,
}

impl Stroke {
    pub fn solid(width: f32, cap: LineCap) -> Self {
        Self {
            width,
            cap,
            join: LineJoin::Round,
            dash: None,
        }
    }

    /// Butt-capped stroke with a single dash interval and zero phase.
    pub fn dashed(width: f32, interval: f32) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
            join: LineJoin::Round,
            dash: Some(DashPattern {
                intervals: vec![interval],
                phase: 0.0,
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(RenderError::unsupported(format!(
                "line width {} is not a finite non-negative number",
                self.width
            )));
        }
        if let Some(dash) = &self.dash {
            if dash.intervals.is_empty() {
                return Err(RenderError::unsupported("dash pattern has no intervals"));
            }
            if dash.intervals.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(RenderError::unsupported(format!(
                    "dash intervals {:?} must be finite and positive",
                    dash.intervals
                )));
            }
            if !dash.phase.is_finite() {
                return Err(RenderError::unsupported("dash phase is not finite"));
            }
        }
        Ok(())
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Square,
            join: LineJoin::Miter,
            dash: None,
        }
    }
}

pub const FONT_FAMILY: &str = "Times-Roman";

/// Font selection is size-only; the family is always [`FONT_FAMILY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub size: u32,
}

impl Font {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Diagram pixels are 3/4 of a PostScript point.
    pub fn scaled_size(&self) -> u64 {
        u64::from(self.size) * 4 / 3
    }
}
