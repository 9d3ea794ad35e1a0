use serde::{Deserialize, Serialize};

/// A 2D coordinate in surface-local pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single active touch contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

/// Raw input sample from a pointing device or a touch screen
///
/// Both modalities normalize to the same `Point`; device-specific handling
/// stays inside this type.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Mouse / stylus sample
    Pointer { x: f32, y: f32 },
    /// Touch sample with the currently active contacts
    Touch { points: Vec<TouchPoint> },
}

impl InputEvent {
    /// Extract the sample position, if the event carries one.
    ///
    /// A touch event with zero active contacts carries no position and
    /// returns `None` (a no-input event, not an error).
    pub fn point(&self) -> Option<Point> {
        match self {
            InputEvent::Pointer { x, y } => Some(Point::new(*x, *y)),
            InputEvent::Touch { points } => {
                let first = points.first()?;
                Some(Point::new(first.x, first.y))
            }
        }
    }
}

/// Placement of the drawing surface within its host window, used to map
/// window coordinates into surface-local space.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map an event sampled in window coordinates to surface-local space.
    pub fn to_local(&self, event: &InputEvent) -> Option<Point> {
        let p = event.point()?;
        Some(Point::new(p.x - self.left, p.y - self.top))
    }
}
