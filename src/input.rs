// Pointer input: the event stream the session consumes, the per-stroke point
// buffer, and the translator from polled window state to events.

use crate::types::{Point, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
    /// Pointer left the drawing surface.
    Leave,
}

/// Window coordinates to canvas-local coordinates.
pub fn to_canvas_local(window_pos: (f32, f32), origin: (usize, usize)) -> Point {
    Point::new(window_pos.0 - origin.0 as f32, window_pos.1 - origin.1 as f32)
}

/// The stroke currently under the pointer.
#[derive(Debug, Default)]
pub struct StrokeCapture {
    points: Vec<Point>,
    base: Option<Snapshot>, // raster as it was before this stroke began
    drawing: bool,
}

impl StrokeCapture {
    pub fn press(&mut self, point: Point, base: Snapshot) {
        self.points.clear();
        self.points.push(point);
        self.base = Some(base);
        self.drawing = true;
    }

    /// Append a sample. Returns true when the canvas needs a repaint.
    pub fn extend(&mut self, point: Point) -> bool {
        if !self.drawing {
            return false;
        }
        self.points.push(point);
        true
    }

    /// End the stroke. Returns true if one was in progress and must be committed.
    pub fn finish(&mut self) -> bool {
        if !self.drawing {
            return false;
        }
        self.points.clear();
        self.base = None;
        self.drawing = false;
        true
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn base(&self) -> Option<&Snapshot> {
        self.base.as_ref()
    }
}

/// Canvas rectangle inside the window, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CanvasRect {
    pub fn contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.x as f32
            && pos.1 >= self.y as f32
            && pos.0 < (self.x + self.width) as f32
            && pos.1 < (self.y + self.height) as f32
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// Edge-detects polled mouse state into `PointerEvent`s.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    tracking: bool, // a press inside the canvas is still held
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    /// Feed one frame of mouse state. `pos` is `None` when the pointer is
    /// outside the window.
    pub fn update(&mut self, pos: Option<(f32, f32)>, down: bool, rect: CanvasRect) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let inside = pos.is_some_and(|p| rect.contains(p));

        match (self.was_down, down) {
            (false, true) => {
                if let (true, Some(p)) = (inside, pos) {
                    events.push(PointerEvent::Press(to_canvas_local(p, rect.origin())));
                    self.tracking = true;
                    self.last = Some(p);
                }
            }
            (true, true) if self.tracking => {
                if let (true, Some(p)) = (inside, pos) {
                    if self.last != Some(p) {
                        events.push(PointerEvent::Move(to_canvas_local(p, rect.origin())));
                        self.last = Some(p);
                    }
                } else {
                    events.push(PointerEvent::Leave);
                    self.tracking = false;
                    self.last = None;
                }
            }
            (true, false) => {
                if self.tracking {
                    events.push(PointerEvent::Release);
                }
                self.tracking = false;
                self.last = None;
            }
            _ => {}
        }

        self.was_down = down;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: CanvasRect = CanvasRect { x: 10, y: 20, width: 100, height: 50 };

    #[test]
    fn local_coordinates_subtract_origin() {
        assert_eq!(to_canvas_local((15.0, 27.5), (10, 20)), Point::new(5.0, 7.5));
    }

    #[test]
    fn capture_ignores_moves_when_idle() {
        let mut capture = StrokeCapture::default();
        assert!(!capture.extend(Point::new(1.0, 1.0)));
        assert!(capture.points().is_empty());
        assert!(!capture.finish());
    }

    #[test]
    fn capture_collects_points_until_finish() {
        let mut capture = StrokeCapture::default();
        capture.press(Point::new(0.0, 0.0), Snapshot::blank(1, 1));
        assert!(capture.is_drawing());
        assert!(capture.extend(Point::new(1.0, 0.0)));
        assert_eq!(capture.points().len(), 2);
        assert!(capture.base().is_some());

        assert!(capture.finish());
        assert!(!capture.is_drawing());
        assert!(capture.points().is_empty());
        assert!(capture.base().is_none());
    }

    #[test]
    fn tracker_emits_press_move_release() {
        let mut tracker = PointerTracker::default();
        assert!(tracker.update(Some((20.0, 30.0)), false, RECT).is_empty());
        assert_eq!(
            tracker.update(Some((20.0, 30.0)), true, RECT),
            vec![PointerEvent::Press(Point::new(10.0, 10.0))]
        );
        // unchanged position is not re-sent
        assert!(tracker.update(Some((20.0, 30.0)), true, RECT).is_empty());
        assert_eq!(
            tracker.update(Some((25.0, 30.0)), true, RECT),
            vec![PointerEvent::Move(Point::new(15.0, 10.0))]
        );
        assert_eq!(tracker.update(Some((25.0, 30.0)), false, RECT), vec![PointerEvent::Release]);
    }

    #[test]
    fn tracker_emits_leave_once_when_dragging_out() {
        let mut tracker = PointerTracker::default();
        tracker.update(Some((20.0, 30.0)), true, RECT);
        assert_eq!(tracker.update(Some((500.0, 30.0)), true, RECT), vec![PointerEvent::Leave]);
        // coming back while still held does not resume the stroke
        assert!(tracker.update(Some((20.0, 30.0)), true, RECT).is_empty());
        assert!(tracker.update(Some((20.0, 30.0)), false, RECT).is_empty());
    }

    #[test]
    fn tracker_treats_leaving_window_as_leave() {
        let mut tracker = PointerTracker::default();
        tracker.update(Some((20.0, 30.0)), true, RECT);
        assert_eq!(tracker.update(None, true, RECT), vec![PointerEvent::Leave]);
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let mut tracker = PointerTracker::default();
        assert!(tracker.update(Some((1.0, 1.0)), true, RECT).is_empty());
        assert!(tracker.update(Some((20.0, 30.0)), true, RECT).is_empty());
        assert!(tracker.update(Some((20.0, 30.0)), false, RECT).is_empty());
    }
}
