pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod ir;
pub mod ordering;
pub mod paint;
pub mod path_emitter;
pub mod render;
pub mod theme;

pub use canvas::EpsCanvas;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderingOptions, load_config};
pub use document::{DocumentWriter, escape_text};
pub use error::{RenderError, Result};
pub use geometry::{AffineTransform, Path, PathSegment, Point};
pub use ir::{Diagram, DiagramShape, DiagramText, ShapeKind};
pub use ordering::{BottomToTop, DepthOrdering};
pub use paint::{Color, Font, LineCap, Stroke};
pub use render::{render_eps, render_eps_string, render_eps_with, write_output_eps};
pub use theme::Theme;
