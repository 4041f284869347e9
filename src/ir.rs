use crate::error::{RenderError, Result};
use crate::geometry::Path;
use crate::paint::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Ordinary,
    /// Pseudo-3D shape drawn in its own bottom-to-top pass.
    Storage,
    PointMarker,
    Arrowhead,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramShape {
    #[serde(default)]
    pub kind: ShapeKind,
    pub path: Path,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default)]
    pub drops_shadow: bool,
    #[serde(default)]
    pub fill_color: Option<Color>,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Color,
}

fn default_stroke_color() -> Color {
    Color::BLACK
}

impl DiagramShape {
    pub fn new(kind: ShapeKind, path: Path) -> Self {
        Self {
            kind,
            path,
            closed: false,
            dashed: false,
            drops_shadow: false,
            fill_color: None,
            stroke_color: Color::BLACK,
        }
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    pub fn drops_shadow(mut self, drops_shadow: bool) -> Self {
        self.drops_shadow = drops_shadow;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_stroke_color")]
    pub color: Color,
    pub font_size: u32,
}

/// A fully laid-out diagram in device pixels, origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub shapes: Vec<DiagramShape>,
    #[serde(default)]
    pub texts: Vec<DiagramText>,
}

impl Diagram {
    pub fn new(width: f64, height: f64, cell_width: u32, cell_height: u32) -> Self {
        Self {
            width,
            height,
            cell_width,
            cell_height,
            shapes: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn minimum_cell_dimension(&self) -> u32 {
        self.cell_width.min(self.cell_height)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width >= 0.0)
            || !(self.height.is_finite() && self.height >= 0.0)
        {
            return Err(RenderError::InvalidModel(format!(
                "diagram size {}x{} must be finite and non-negative",
                self.width, self.height
            )));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(RenderError::InvalidModel(format!(
                "cell size {}x{} must be positive",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    /// Parse a model from JSON or JSON5 text.
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let diagram: Diagram = match serde_json::from_str(input) {
            Ok(diagram) => diagram,
            Err(_) => json5::from_str(input)?,
        };
        diagram.validate()?;
        Ok(diagram)
    }
}
