use crate::canvas::EpsCanvas;
use crate::config::{Config, RenderingOptions};
use crate::document::DocumentWriter;
use crate::error::{RenderError, Result};
use crate::geometry::{Path, Point};
use crate::ir::{Diagram, DiagramShape, ShapeKind};
use crate::ordering::{sort_by_depth, BottomToTop, DepthOrdering};
use crate::paint::{Font, LineCap, Stroke};
use crate::theme::Theme;
use std::fs::File;
use std::io::{self, BufWriter, Write};

const SHADOW_OFFSET_DIVISOR: f32 = 3.333;

/// Render `diagram` as EPS into `sink`, ordering storage shapes bottom to top.
/// Returns the sink once the trailer has been written and flushed.
pub fn render_eps<W: Write>(diagram: &Diagram, config: &Config, sink: W) -> Result<W> {
    render_eps_with(diagram, config, &BottomToTop, sink)
}

pub fn render_eps_with<W: Write>(
    diagram: &Diagram,
    config: &Config,
    ordering: &dyn DepthOrdering,
    sink: W,
) -> Result<W> {
    diagram.validate()?;
    log::info!(
        "rendering {} shapes and {} texts on a {}x{} diagram (cell {}x{})",
        diagram.shapes.len(),
        diagram.texts.len(),
        diagram.width,
        diagram.height,
        diagram.cell_width,
        diagram.cell_height
    );
    let doc = DocumentWriter::open(
        sink,
        Point::new(0.0, -diagram.height),
        Point::new(diagram.width, 0.0),
    )?;
    DiagramComposer::new(diagram, &config.theme, config.render, EpsCanvas::new(doc))
        .compose(ordering)
}

pub fn render_eps_string(diagram: &Diagram, config: &Config) -> Result<String> {
    let bytes = render_eps(diagram, config, Vec::new())?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}

/// Render to a file. The file is created only after the model validates;
/// on failure it is left incomplete and should be discarded.
pub fn write_output_eps(
    diagram: &Diagram,
    config: &Config,
    output: &std::path::Path,
) -> Result<()> {
    diagram.validate()?;
    let file = File::create(output).map_err(|source| RenderError::SinkUnavailable {
        path: output.to_path_buf(),
        source,
    })?;
    render_eps(diagram, config, BufWriter::new(file))?;
    Ok(())
}

struct DiagramComposer<'a, W: Write> {
    diagram: &'a Diagram,
    theme: &'a Theme,
    options: RenderingOptions,
    canvas: EpsCanvas<W>,
    normal_stroke: Stroke,
    dash_stroke: Stroke,
}

impl<'a, W: Write> DiagramComposer<'a, W> {
    fn new(
        diagram: &'a Diagram,
        theme: &'a Theme,
        options: RenderingOptions,
        canvas: EpsCanvas<W>,
    ) -> Self {
        let min_cell = diagram.minimum_cell_dimension();
        let stroke_weight = (min_cell / 10) as f32;
        let dash_interval = (min_cell / 2) as f32;
        Self {
            diagram,
            theme,
            options,
            canvas,
            normal_stroke: Stroke::solid(stroke_weight, LineCap::Round),
            dash_stroke: Stroke::dashed(stroke_weight, dash_interval),
        }
    }

    fn compose(mut self, ordering: &dyn DepthOrdering) -> Result<W> {
        self.background_pass();
        if self.options.drop_shadows {
            self.shadow_pass()?;
        }
        self.storage_pass(ordering)?;
        let markers = self.ordinary_pass()?;
        self.point_marker_pass(&markers)?;
        self.text_pass()?;
        if self.options.render_debug_lines {
            self.debug_grid_pass()?;
        }
        self.canvas.finish()
    }

    fn stroke_for(&self, shape: &DiagramShape) -> Stroke {
        if shape.dashed {
            self.dash_stroke.clone()
        } else {
            self.normal_stroke.clone()
        }
    }

    fn background_pass(&mut self) {
        // device origin is top-left, EPS origin is bottom-left
        self.canvas.scale(1.0, -1.0);
        if self.options.antialias {
            log::debug!("anti-aliasing has no effect on vector output");
        }
        self.canvas.set_color(self.theme.background);
        // The page is never painted with the background color; only the
        // color state is set.
        log::debug!("background fill skipped");
        self.canvas.set_stroke(Stroke::solid(1.0, LineCap::Square));
    }

    fn shadow_pass(&mut self) -> Result<()> {
        let min_cell = self.diagram.minimum_cell_dimension();
        let offset = f64::from(min_cell as f32 / SHADOW_OFFSET_DIVISOR);
        let mut count = 0usize;
        for shape in &self.diagram.shapes {
            if matches!(shape.kind, ShapeKind::PointMarker | ShapeKind::Storage) {
                continue;
            }
            if shape.path.is_empty() || !shape.drops_shadow {
                continue;
            }
            self.canvas.set_color(self.theme.shadow);
            self.canvas.fill_path(&shape.path.translated(offset, offset))?;
            count += 1;
        }
        log::debug!("drew {count} shadows at offset {offset}");
        Ok(())
    }

    // Storage shapes always go in this separate pass, so one nested inside a
    // larger ordinary shape is painted over by that shape in the next pass.
    fn storage_pass(&mut self, ordering: &dyn DepthOrdering) -> Result<()> {
        let diagram = self.diagram;
        let mut storage: Vec<&DiagramShape> = diagram
            .shapes
            .iter()
            .filter(|shape| shape.kind == ShapeKind::Storage)
            .collect();
        sort_by_depth(&mut storage, ordering);
        log::debug!("storage pass: {} shapes", storage.len());

        self.canvas.set_stroke(self.normal_stroke.clone());
        for shape in storage {
            if !shape.dashed {
                self.canvas
                    .set_color(shape.fill_color.unwrap_or(self.theme.default_fill));
                self.canvas.fill_path(&shape.path)?;
            }
            let stroke = self.stroke_for(shape);
            self.canvas.set_stroke(stroke);
            self.canvas.set_color(shape.stroke_color);
            self.canvas.stroke_path(&shape.path)?;
        }
        Ok(())
    }

    /// Draws everything except storage shapes and point markers, returning
    /// the point markers in model order.
    fn ordinary_pass(&mut self) -> Result<Vec<&'a DiagramShape>> {
        let diagram = self.diagram;
        let mut markers = Vec::new();
        let mut count = 0usize;
        for shape in &diagram.shapes {
            match shape.kind {
                ShapeKind::PointMarker => {
                    markers.push(shape);
                    continue;
                }
                ShapeKind::Storage => continue,
                ShapeKind::Ordinary | ShapeKind::Arrowhead => {}
            }
            if shape.path.is_empty() {
                continue;
            }
            if shape.closed && !shape.dashed {
                self.canvas
                    .set_color(shape.fill_color.unwrap_or(self.theme.default_fill));
                self.canvas.fill_path(&shape.path)?;
            }
            if shape.kind != ShapeKind::Arrowhead {
                let stroke = self.stroke_for(shape);
                self.canvas.set_color(shape.stroke_color);
                self.canvas.set_stroke(stroke);
                self.canvas.stroke_path(&shape.path)?;
            }
            count += 1;
        }
        log::debug!("ordinary pass: {count} shapes");
        Ok(markers)
    }

    fn point_marker_pass(&mut self, markers: &[&DiagramShape]) -> Result<()> {
        log::debug!("point marker pass: {} markers", markers.len());
        self.canvas.set_stroke(self.normal_stroke.clone());
        for shape in markers {
            self.canvas.set_color(self.theme.default_fill);
            self.canvas.fill_path(&shape.path)?;
            self.canvas.set_color(shape.stroke_color);
            self.canvas.stroke_path(&shape.path)?;
        }
        Ok(())
    }

    fn text_pass(&mut self) -> Result<()> {
        for text in &self.diagram.texts {
            self.canvas.set_color(text.color);
            self.canvas.set_font(Font::new(text.font_size));
            self.canvas.draw_text(&text.text, text.x, text.y)?;
        }
        Ok(())
    }

    // No XOR compositing in PostScript: the grid is drawn as a thin dashed
    // gray line on top of everything instead.
    fn debug_grid_pass(&mut self) -> Result<()> {
        let width = self.diagram.width;
        let height = self.diagram.height;
        let cell_width = f64::from(self.diagram.cell_width);
        let cell_height = f64::from(self.diagram.cell_height);

        self.canvas.set_stroke(Stroke::dashed(1.0, 1.0));
        self.canvas.set_color(self.theme.debug_grid);

        let mut x = 0.0;
        while x < width {
            self.canvas
                .stroke_path(&Path::new().move_to(x, 0.0).line_to(x, height))?;
            x += cell_width;
        }
        let mut y = 0.0;
        while y < height {
            self.canvas
                .stroke_path(&Path::new().move_to(0.0, y).line_to(width, y))?;
            y += cell_height;
        }
        Ok(())
    }
}
