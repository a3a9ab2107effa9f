// Midpoint smoothing for freehand strokes.
//
// Raw pointer samples become the control points of a chain of quadratic
// curves whose endpoints are the midpoints between neighbouring samples, so
// the drawn path passes through the midpoints instead of zig-zagging through
// every sample.

use crate::types::Point;

/// One piece of a smoothed path, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    QuadTo { ctrl: Point, end: Point },
    LineTo(Point),
}

/// Build the smoothed path through `points`.
///
/// Zero points give an empty path. A single point gives `MoveTo(p) LineTo(p)`,
/// a zero-length path the rasterizer draws as one round dab.
pub fn smooth_path(points: &[Point]) -> Vec<PathSegment> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(points.len() + 1);
    path.push(PathSegment::MoveTo(first));

    let mut ctrl = first;
    for &next in rest {
        path.push(PathSegment::QuadTo { ctrl, end: ctrl.midpoint(next) });
        ctrl = next;
    }

    // `ctrl` is now the last sample; finish the stroke exactly on it.
    path.push(PathSegment::LineTo(ctrl));
    path
}

/// Evaluate a quadratic Bézier at `t` in [0, 1].
pub fn quad_point(start: Point, ctrl: Point, end: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point {
        x: u * u * start.x + 2.0 * u * t * ctrl.x + t * t * end.x,
        y: u * u * start.y + 2.0 * u * t * ctrl.y + t * t * end.y,
    }
}

/// Flatten a path into polylines, one per `MoveTo`.
///
/// Quadratics are sampled roughly every `step` pixels of control-polygon length.
pub fn flatten(path: &[PathSegment], step: f32) -> Vec<Vec<Point>> {
    let step = step.max(0.25);
    let mut lines: Vec<Vec<Point>> = Vec::new();
    let mut pen: Option<Point> = None;

    for seg in path {
        match *seg {
            PathSegment::MoveTo(p) => {
                lines.push(vec![p]);
                pen = Some(p);
            }
            PathSegment::QuadTo { ctrl, end } => {
                let Some(start) = pen else { continue };
                let Some(line) = lines.last_mut() else { continue };
                let approx = start.distance(ctrl) + ctrl.distance(end);
                let steps = (approx / step).ceil().max(1.0) as usize;
                for i in 1..=steps {
                    line.push(quad_point(start, ctrl, end, i as f32 / steps as f32));
                }
                pen = Some(end);
            }
            PathSegment::LineTo(p) => {
                if pen.is_none() {
                    continue;
                }
                if let Some(line) = lines.last_mut() {
                    line.push(p);
                }
                pen = Some(p);
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn empty_input_gives_empty_path() {
        assert!(smooth_path(&[]).is_empty());
    }

    #[test]
    fn single_point_is_degenerate_without_curves() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(smooth_path(&[p]), vec![PathSegment::MoveTo(p), PathSegment::LineTo(p)]);
    }

    #[test]
    fn curves_end_on_midpoints_with_samples_as_controls() {
        let path = smooth_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        assert_eq!(
            path,
            vec![
                PathSegment::MoveTo(Point::new(0.0, 0.0)),
                PathSegment::QuadTo { ctrl: Point::new(0.0, 0.0), end: Point::new(5.0, 0.0) },
                PathSegment::QuadTo { ctrl: Point::new(10.0, 0.0), end: Point::new(10.0, 5.0) },
                PathSegment::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn second_segment_endpoint_is_not_the_raw_sample() {
        let path = smooth_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        let PathSegment::QuadTo { end, .. } = path[2] else {
            panic!("expected a quadratic, got {:?}", path[2]);
        };
        assert_eq!(end, Point::new(10.0, 5.0));
        assert_ne!(end, Point::new(10.0, 10.0));
    }

    #[test]
    fn quad_point_hits_endpoints() {
        let (a, c, b) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(quad_point(a, c, b, 0.0), a);
        assert_eq!(quad_point(a, c, b, 1.0), b);
        assert_eq!(quad_point(a, c, b, 0.5), Point::new(7.5, 2.5));
    }

    #[test]
    fn flatten_keeps_path_endpoints() {
        let path = smooth_path(&pts(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0)]));
        let lines = flatten(&path, 2.0);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(line.last(), Some(&Point::new(20.0, 20.0)));
        assert!(line.contains(&Point::new(20.0, 10.0)));
    }
}
