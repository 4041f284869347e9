use crate::ir::DiagramShape;
use std::cmp::Ordering;

/// Total order over storage shapes deciding their draw order.
///
/// Shapes that compare `Less` are drawn first and end up underneath.
pub trait DepthOrdering {
    fn compare(&self, a: &DiagramShape, b: &DiagramShape) -> Ordering;
}

impl<F> DepthOrdering for F
where
    F: Fn(&DiagramShape, &DiagramShape) -> Ordering,
{
    fn compare(&self, a: &DiagramShape, b: &DiagramShape) -> Ordering {
        self(a, b)
    }
}

/// Lowest on the page first: shapes are ordered by the vertical centre of
/// their path bounds, descending in device space (y grows downwards).
/// Shapes without geometry sort last.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomToTop;

impl DepthOrdering for BottomToTop {
    fn compare(&self, a: &DiagramShape, b: &DiagramShape) -> Ordering {
        let center = |shape: &DiagramShape| shape.path.bounds().map(|b| b.center().y);
        match (center(a), center(b)) {
            (Some(ya), Some(yb)) => yb.total_cmp(&ya),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Stable sort, so shapes the ordering considers equal keep model order.
pub fn sort_by_depth<'a>(shapes: &mut [&'a DiagramShape], ordering: &dyn DepthOrdering) {
    shapes.sort_by(|a, b| ordering.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Path;
    use crate::ir::ShapeKind;

    fn storage_at(y: f64) -> DiagramShape {
        DiagramShape::new(
            ShapeKind::Storage,
            Path::new().move_to(0.0, y).line_to(10.0, y + 10.0),
        )
    }

    #[test]
    fn lower_shapes_come_first() {
        let top = storage_at(0.0);
        let bottom = storage_at(50.0);
        let middle = storage_at(20.0);
        let mut shapes = vec![&top, &bottom, &middle];
        sort_by_depth(&mut shapes, &BottomToTop);
        assert_eq!(shapes, vec![&bottom, &middle, &top]);
    }

    #[test]
    fn ties_keep_model_order() {
        let first = storage_at(10.0).dashed(true);
        let second = storage_at(10.0);
        let mut shapes = vec![&first, &second];
        sort_by_depth(&mut shapes, &BottomToTop);
        assert!(shapes[0].dashed);
    }

    #[test]
    fn closures_are_orderings() {
        let a = storage_at(0.0);
        let b = storage_at(50.0);
        let mut shapes = vec![&b, &a];
        let top_down = |x: &DiagramShape, y: &DiagramShape| {
            BottomToTop.compare(y, x)
        };
        sort_by_depth(&mut shapes, &top_down);
        assert_eq!(shapes, vec![&a, &b]);
    }
}
