use super::input::Point;

/// Fixed rendering style for freehand strokes
///
/// Strokes are rendered as circular dabs stamped along each segment, which
/// gives round caps and joins without a separate cap/join pass. The glow is
/// a wider halo stamped beneath the core.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    /// Stroke width in pixels
    pub width: f32,
    /// Stroke color (RGB)
    pub color: [u8; 3],
    /// Radius of the glow halo in pixels
    pub glow_radius: f32,
    /// Peak alpha of the glow halo, 0.0 to 1.0
    pub glow_strength: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 4.0,
            color: [0x06, 0xb6, 0xd4], // Cyan
            glow_radius: 10.0,
            glow_strength: 0.35,
        }
    }
}

/// Ephemeral state of an in-progress stroke
///
/// Created on pointer-down, updated on every move, dropped on pointer-up.
/// Each move connects `last_point` to the new sample; there is no
/// look-ahead smoothing, so curves are polylines of consecutive samples.
#[derive(Debug, Clone, Copy)]
pub struct StrokeSession {
    pub last_point: Point,
}

impl StrokeSession {
    pub fn new(anchor: Point) -> Self {
        Self { last_point: anchor }
    }

    /// Advance the session to a new sample, returning the previous anchor.
    pub fn advance(&mut self, next: Point) -> Point {
        std::mem::replace(&mut self.last_point, next)
    }
}
