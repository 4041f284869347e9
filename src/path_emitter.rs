use crate::document::{real, DocumentWriter};
use crate::error::Result;
use crate::geometry::{Path, PathSegment, Point};
use std::io::Write;

const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Exact degree elevation of the quadratic `start, control, end` to a cubic.
/// Returns the two cubic control points; the end point is unchanged.
pub fn elevate_quad(start: Point, control: Point, end: Point) -> (Point, Point) {
    let c1 = Point::new(
        start.x + TWO_THIRDS * (control.x - start.x),
        start.y + TWO_THIRDS * (control.y - start.y),
    );
    let c2 = Point::new(
        end.x + TWO_THIRDS * (control.x - end.x),
        end.y + TWO_THIRDS * (control.y - end.y),
    );
    (c1, c2)
}

/// Write `newpath` followed by the segments of an already transformed path.
/// The caller finishes the path with `fill` or `stroke`.
pub fn emit_path<W: Write>(doc: &mut DocumentWriter<W>, path: &Path) -> Result<()> {
    doc.write_line("newpath")?;

    let mut current = Point::default();
    let mut subpath_start = Point::default();
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(x, y) => {
                doc.write_directive([real(x), real(y), "moveto".into()])?;
                current = Point::new(x, y);
                subpath_start = current;
            }
            PathSegment::LineTo(x, y) => {
                doc.write_directive([real(x), real(y), "lineto".into()])?;
                current = Point::new(x, y);
            }
            PathSegment::QuadTo(cx, cy, x, y) => {
                let end = Point::new(x, y);
                let (c1, c2) = elevate_quad(current, Point::new(cx, cy), end);
                write_curve(doc, c1, c2, end)?;
                current = end;
            }
            PathSegment::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                let end = Point::new(x, y);
                write_curve(doc, Point::new(c1x, c1y), Point::new(c2x, c2y), end)?;
                current = end;
            }
            PathSegment::Close => {
                doc.write_line("closepath")?;
                current = subpath_start;
            }
        }
    }
    Ok(())
}

fn write_curve<W: Write>(
    doc: &mut DocumentWriter<W>,
    c1: Point,
    c2: Point,
    end: Point,
) -> Result<()> {
    doc.write_directive([
        real(c1.x),
        real(c1.y),
        real(c2.x),
        real(c2.y),
        real(end.x),
        real(end.y),
        "curveto".into(),
    ])
}
