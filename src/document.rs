use crate::error::{RenderError, Result};
use crate::geometry::Point;
use std::io::Write;

pub const CREATOR: &str = "DiagramEps";

const PREAMBLE_TAIL: [&str; 3] = ["%%EndComments", "%%BeginProlog", "%%EndProlog"];

const TRAILER: [&str; 3] = ["showpage", "%%Trailer", "%%EOF"];

/// Shortest round-trip form of a coordinate (`100.0`, `-0.5`,
/// `0.6666666666666666`). Magnitudes from 1e16 up or below 1e-4 come out in
/// exponent form (`1e16`, `1e-7`), which PostScript reads as a real.
pub fn real(value: f64) -> String {
    format!("{value:?}")
}

pub fn real32(value: f32) -> String {
    format!("{value:?}")
}

/// Escape a string for use inside a PostScript `( )` literal.
///
/// Parentheses and backslashes get a backslash prefix. Code points above 128
/// are written as three-digit octal escapes; those that do not fit in one
/// byte fall back to `?`.
pub fn escape_text(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len() + 8);
    for ch in payload.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) > 255 => {
                log::warn!("character {c:?} has no single-byte encoding, writing '?'");
                out.push_str("\\077");
            }
            c if (c as u32) > 128 => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Line-oriented sink for an Encapsulated PostScript document.
///
/// Owns the output from `open` until `close`; every write after `close`
/// fails with [`RenderError::AlreadyClosed`].
pub struct DocumentWriter<W: Write> {
    sink: Option<W>,
}

impl<W: Write> DocumentWriter<W> {
    /// Writes the fixed preamble. `low`/`high` are the bounding box corners
    /// in output coordinates.
    pub fn open(sink: W, low: Point, high: Point) -> Result<Self> {
        let mut writer = Self { sink: Some(sink) };
        writer.write_line("%!PS-Adobe-3.0 EPSF-3.0")?;
        writer.write_line(&format!(
            "%%BoundingBox: {} {} {} {}",
            low.x as i64, low.y as i64, high.x as i64, high.y as i64
        ))?;
        writer.write_line(&format!(
            "%%HiResBoundingBox: {} {} {} {}",
            real(low.x),
            real(low.y),
            real(high.x),
            real(high.y)
        ))?;
        writer.write_line(&format!("%%Creator: {CREATOR}"))?;
        for line in PREAMBLE_TAIL {
            writer.write_line(line)?;
        }
        Ok(writer)
    }

    /// One line of space-separated tokens.
    pub fn write_directive<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut line = String::new();
        for (idx, token) in tokens.into_iter().enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            line.push_str(token.as_ref());
        }
        self.write_line(&line)
    }

    /// `(payload) show` with the payload escaped.
    pub fn write_text(&mut self, payload: &str) -> Result<()> {
        self.write_line(&format!("({}) show", escape_text(payload)))
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(RenderError::AlreadyClosed)?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Writes the trailer, flushes, and hands the sink back to the caller.
    pub fn close(&mut self) -> Result<W> {
        for line in TRAILER {
            self.write_line(line)?;
        }
        let mut sink = self.sink.take().ok_or(RenderError::AlreadyClosed)?;
        sink.flush()?;
        log::debug!("document closed");
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn open_buffer(width: f64, height: f64) -> DocumentWriter<Vec<u8>> {
        DocumentWriter::open(
            Vec::new(),
            Point::new(0.0, -height),
            Point::new(width, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(real(100.0), "100.0");
        assert_eq!(real(1e16), "1e16");
        assert_eq!(real(1e-7), "1e-7");
    }

    #[test]
    fn preamble_carries_both_bounding_boxes() {
        let mut doc = open_buffer(100.0, 50.0);
        let out = String::from_utf8(doc.close().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "%!PS-Adobe-3.0 EPSF-3.0");
        assert_eq!(lines[1], "%%BoundingBox: 0 -50 100 0");
        assert_eq!(lines[2], "%%HiResBoundingBox: 0.0 -50.0 100.0 0.0");
        assert_eq!(lines[3], "%%Creator: DiagramEps");
        assert_eq!(&lines[4..7], &["%%EndComments", "%%BeginProlog", "%%EndProlog"]);
        assert_eq!(&lines[7..], &["showpage", "%%Trailer", "%%EOF"]);
    }

    #[test]
    fn integer_bounding_box_truncates() {
        let mut doc = open_buffer(100.7, 50.9);
        let out = String::from_utf8(doc.close().unwrap()).unwrap();
        assert!(out.contains("%%BoundingBox: 0 -50 100 0\n"));
        assert!(out.contains("%%HiResBoundingBox: 0.0 -50.9 100.7 0.0\n"));
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
    }

    #[test]
    fn escapes_high_code_points_as_octal() {
        assert_eq!(escape_text("caf\u{e9}"), "caf\\351");
        assert_eq!(escape_text("\u{80}"), "\u{80}");
        assert_eq!(escape_text("\u{81}"), "\\201");
        assert_eq!(escape_text("\u{2192}"), "\\077");
        assert_eq!(escape_text("plain text\t"), "plain text\t");
    }

    #[test]
    fn directives_are_space_joined() {
        let mut doc = open_buffer(10.0, 10.0);
        doc.write_directive(["1.0", "2.0", "moveto"]).unwrap();
        doc.write_text("x(y)").unwrap();
        let out = String::from_utf8(doc.close().unwrap()).unwrap();
        assert!(out.contains("\n1.0 2.0 moveto\n(x\\(y\\)) show\nshowpage\n"));
    }

    #[test]
    fn writes_after_close_fail() {
        let mut doc = open_buffer(10.0, 10.0);
        doc.close().unwrap();
        assert!(doc.is_closed());
        assert!(matches!(
            doc.write_directive(["newpath"]),
            Err(RenderError::AlreadyClosed)
        ));
        assert!(matches!(doc.write_text("x"), Err(RenderError::AlreadyClosed)));
        assert!(matches!(doc.close(), Err(RenderError::AlreadyClosed)));
    }

    #[test]
    fn real_formats_with_fraction() {
        assert_eq!(real(100.0), "100.0");
        assert_eq!(real(-50.0), "-50.0");
        assert_eq!(real(2.0 / 3.0), "0.6666666666666666");
        assert_eq!(real32(2.4), "2.4");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_errors_surface_as_write_failures() {
        let result = DocumentWriter::open(FailingSink, Point::default(), Point::default());
        assert!(matches!(result, Err(RenderError::WriteFailure(_))));
    }
}
