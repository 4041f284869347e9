use crate::document::{real, real32, DocumentWriter};
use crate::error::{RenderError, Result};
use crate::geometry::{AffineTransform, Path, Point};
use crate::paint::{Color, Font, Stroke, FONT_FAMILY};
use crate::path_emitter::emit_path;
use std::io::Write;

/// A value plus the last copy of it that reached the document.
#[derive(Debug, Clone)]
struct Tracked<T> {
    value: T,
    emitted: Option<T>,
}

impl<T: Clone + PartialEq> Tracked<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            emitted: None,
        }
    }

    fn set(&mut self, value: T) {
        self.value = value;
    }

    fn is_dirty(&self) -> bool {
        self.emitted.as_ref() != Some(&self.value)
    }

    /// Marks the current value emitted and returns it, or `None` if the
    /// document already has it.
    fn take_pending(&mut self) -> Option<T> {
        if !self.is_dirty() {
            return None;
        }
        self.emitted = Some(self.value.clone());
        Some(self.value.clone())
    }
}

/// Drawing surface that writes PostScript through a [`DocumentWriter`].
///
/// Color, stroke, and font are cached; a `setrgbcolor`, stroke, or font
/// directive is written only right before the first draw call that needs a
/// value the document does not already have. Geometry is transformed by the
/// current transform before it is written; text is not transformed, only its
/// anchor point.
pub struct EpsCanvas<W: Write> {
    doc: DocumentWriter<W>,
    transform: AffineTransform,
    saved: Vec<AffineTransform>,
    color: Tracked<Color>,
    stroke: Tracked<Stroke>,
    font: Tracked<Option<Font>>,
}

impl<W: Write> EpsCanvas<W> {
    pub fn new(doc: DocumentWriter<W>) -> Self {
        Self {
            doc,
            transform: AffineTransform::identity(),
            saved: Vec::new(),
            color: Tracked::new(Color::BLACK),
            stroke: Tracked::new(Stroke::default()),
            font: Tracked::new(None),
        }
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: AffineTransform) {
        self.transform = transform;
    }

    pub fn concatenate(&mut self, transform: &AffineTransform) {
        self.transform.concatenate(transform);
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transform.translate(tx, ty);
    }

    pub fn rotate(&mut self, theta: f64) {
        self.transform.rotate(theta);
    }

    pub fn rotate_about(&mut self, theta: f64, x: f64, y: f64) {
        self.transform.rotate_about(theta, x, y);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.scale(sx, sy);
    }

    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.transform.shear(shx, shy);
    }

    pub fn save_transform(&mut self) {
        self.saved.push(self.transform);
    }

    /// Returns false when there was nothing to restore.
    pub fn restore_transform(&mut self) -> bool {
        match self.saved.pop() {
            Some(transform) => {
                self.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn color(&self) -> Color {
        self.color.value
    }

    pub fn set_color(&mut self, color: Color) {
        self.color.set(color);
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke.value
    }

    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke.set(stroke);
    }

    pub fn font(&self) -> Option<Font> {
        self.font.value
    }

    pub fn set_font(&mut self, font: Font) {
        self.font.set(Some(font));
    }

    pub fn fill_path(&mut self, path: &Path) -> Result<()> {
        self.check_transform()?;
        self.flush_color()?;
        emit_path(&mut self.doc, &path.transformed(&self.transform))?;
        self.doc.write_line("fill")
    }

    pub fn stroke_path(&mut self, path: &Path) -> Result<()> {
        self.check_transform()?;
        self.stroke.value.validate()?;
        self.flush_color()?;
        self.flush_stroke()?;
        emit_path(&mut self.doc, &path.transformed(&self.transform))?;
        self.doc.write_line("stroke")
    }

    pub fn draw_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.check_transform()?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(RenderError::unsupported(format!("non-finite text anchor ({x}, {y})")));
        }
        if self.font.value.is_none() {
            return Err(RenderError::unsupported("text drawn before any font was set"));
        }
        self.flush_color()?;
        self.flush_font()?;
        let anchor = self.transform.apply(Point::new(x, y));
        self.doc.write_directive([real(anchor.x), real(anchor.y), "moveto".into()])?;
        self.doc.write_text(text)
    }

    /// Closes the document and returns the sink.
    pub fn finish(mut self) -> Result<W> {
        self.doc.close()
    }

    fn check_transform(&self) -> Result<()> {
        if self.transform.is_finite() {
            Ok(())
        } else {
            Err(RenderError::unsupported(format!(
                "non-finite transform {:?}",
                self.transform
            )))
        }
    }

    fn flush_color(&mut self) -> Result<()> {
        let Some(color) = self.color.take_pending() else {
            return Ok(());
        };
        let [r, g, b] = color.components();
        self.doc.write_directive([real(r), real(g), real(b), "setrgbcolor".into()])
    }

    fn flush_stroke(&mut self) -> Result<()> {
        let Some(stroke) = self.stroke.take_pending() else {
            return Ok(());
        };
        self.doc.write_directive([real32(stroke.width), "setlinewidth".into()])?;
        self.doc.write_directive([stroke.cap.code().to_string(), "setlinecap".into()])?;
        match &stroke.dash {
            Some(dash) => {
                let intervals: Vec<String> = dash.intervals.iter().map(|v| real32(*v)).collect();
                self.doc.write_line(&format!(
                    "[{}] {} setdash",
                    intervals.join(" "),
                    real32(dash.phase)
                ))
            }
            None => self.doc.write_line("[] 0 setdash"),
        }
    }

    fn flush_font(&mut self) -> Result<()> {
        let Some(Some(font)) = self.font.take_pending() else {
            return Ok(());
        };
        self.doc.write_line(&format!("/{FONT_FAMILY} findfont"))?;
        self.doc.write_directive([font.scaled_size().to_string(), "scalefont setfont".into()])
    }
}
