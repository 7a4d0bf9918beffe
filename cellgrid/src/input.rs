// input.rs - Pointer drag state for painting the grid
//
// A front end feeds raw pointer events in and polls once per frame for the
// cell to paint. Only one drag is active at a time; releasing the button or
// leaving the canvas ends it.

use std::time::{Duration, Instant};

use crate::grid::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Cell under a canvas-relative pixel position, if it lies on the grid.
pub fn cell_at_pixel(pos: (f32, f32), cell_size: f32, width: usize, height: usize) -> Option<Coord> {
    let (px, py) = pos;
    if px < 0.0 || py < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let x = (px / cell_size).floor() as usize;
    let y = (py / cell_size).floor() as usize;
    (x < width && y < height).then_some((x, y))
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    button: PointerButton,
    last_pos: (f32, f32),
    last_emit: Option<Instant>,
}

/// Turns a press/move/release stream into throttled paint positions.
///
/// While a button is held the last known position is re-emitted every
/// `repeat`, even if the pointer does not move, so holding still keeps
/// pouring into the same cell.
#[derive(Debug, Clone)]
pub struct DragPainter {
    cell_size: f32,
    width: usize,
    height: usize,
    repeat: Duration,
    drag: Option<Drag>,
}

impl DragPainter {
    pub fn new(cell_size: f32, width: usize, height: usize, repeat: Duration) -> Self {
        Self { cell_size, width, height, repeat, drag: None }
    }

    /// Starts a drag, replacing any drag already in progress.
    pub fn press(&mut self, button: PointerButton, pos: (f32, f32)) {
        self.drag = Some(Drag { button, last_pos: pos, last_emit: None });
    }

    pub fn move_to(&mut self, pos: (f32, f32)) {
        if let Some(drag) = &mut self.drag {
            drag.last_pos = pos;
        }
    }

    /// Ends the active drag. Also used when the pointer leaves the canvas.
    pub fn release(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn button(&self) -> Option<PointerButton> {
        self.drag.map(|drag| drag.button)
    }

    /// The cell to paint now, at most once per `repeat` interval.
    pub fn poll(&mut self, now: Instant) -> Option<(PointerButton, Coord)> {
        let drag = self.drag.as_mut()?;
        if let Some(last) = drag.last_emit {
            if now.saturating_duration_since(last) < self.repeat {
                return None;
            }
        }
        drag.last_emit = Some(now);
        let cell = cell_at_pixel(drag.last_pos, self.cell_size, self.width, self.height)?;
        Some((drag.button, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_translation_floors_and_bounds() {
        assert_eq!(cell_at_pixel((0.0, 0.0), 10.0, 4, 4), Some((0, 0)));
        assert_eq!(cell_at_pixel((19.9, 35.0), 10.0, 4, 4), Some((1, 3)));
        assert_eq!(cell_at_pixel((40.0, 5.0), 10.0, 4, 4), None);
        assert_eq!(cell_at_pixel((-1.0, 5.0), 10.0, 4, 4), None);
    }

    #[test]
    fn no_output_without_a_drag() {
        let mut painter = DragPainter::new(10.0, 4, 4, Duration::from_millis(10));
        assert_eq!(painter.poll(Instant::now()), None);
        painter.move_to((5.0, 5.0));
        assert!(!painter.is_dragging());
    }

    #[test]
    fn repeats_while_held_and_throttles() {
        let start = Instant::now();
        let repeat = Duration::from_millis(10);
        let mut painter = DragPainter::new(10.0, 4, 4, repeat);
        painter.press(PointerButton::Primary, (15.0, 25.0));

        assert_eq!(painter.poll(start), Some((PointerButton::Primary, (1, 2))));
        assert_eq!(painter.poll(start + Duration::from_millis(5)), None);
        assert_eq!(painter.poll(start + repeat), Some((PointerButton::Primary, (1, 2))));

        painter.move_to((35.0, 5.0));
        assert_eq!(painter.poll(start + repeat * 2), Some((PointerButton::Primary, (3, 0))));
    }

    #[test]
    fn release_cancels_and_new_press_replaces() {
        let now = Instant::now();
        let mut painter = DragPainter::new(10.0, 4, 4, Duration::from_millis(10));
        painter.press(PointerButton::Primary, (5.0, 5.0));
        painter.press(PointerButton::Secondary, (25.0, 5.0));
        assert_eq!(painter.button(), Some(PointerButton::Secondary));
        assert_eq!(painter.poll(now), Some((PointerButton::Secondary, (2, 0))));

        painter.release();
        assert_eq!(painter.poll(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn off_grid_position_emits_nothing() {
        let mut painter = DragPainter::new(10.0, 4, 4, Duration::ZERO);
        painter.press(PointerButton::Primary, (100.0, 5.0));
        assert_eq!(painter.poll(Instant::now()), None);
        assert!(painter.is_dragging());
    }
}
