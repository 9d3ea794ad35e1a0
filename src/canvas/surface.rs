use anyhow::{Context, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use super::input::Point;
use super::stroke::{StrokeSession, StrokeStyle};

/// Spacing between stamped dabs along a segment, in pixels
const DAB_SPACING: f32 = 0.5;

/// Freehand drawing surface over an RGBA raster buffer
///
/// The surface exclusively owns its bitmap and stroke session. Drawing is
/// synchronous; input events are applied strictly in arrival order. While
/// the shared suppression flag is set (a transcription request is in
/// flight), `begin_stroke` and `extend_stroke` are no-ops and any
/// in-progress stroke is abandoned.
pub struct DrawingSurface {
    buffer: RgbaImage,
    session: Option<StrokeSession>,
    style: StrokeStyle,
    suppressed: Arc<AtomicBool>,
}

impl DrawingSurface {
    /// Create a surface with the default stroke style.
    ///
    /// `suppressed` is shared with the coordinating layer, which sets it
    /// for the duration of a transcription request.
    pub fn new(width: u32, height: u32, suppressed: Arc<AtomicBool>) -> Self {
        Self::with_style(width, height, StrokeStyle::default(), suppressed)
    }

    pub fn with_style(
        width: u32,
        height: u32,
        style: StrokeStyle,
        suppressed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            buffer: RgbaImage::new(width, height),
            session: None,
            style,
            suppressed,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }

    /// Start a stroke session anchored at `point`.
    ///
    /// No-op while input is suppressed. Returns whether a session started.
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        if self.is_suppressed() {
            return false;
        }
        self.session = Some(StrokeSession::new(point));
        true
    }

    /// Connect the session's last point to `point` with a rendered segment.
    ///
    /// No-op when no session is active or input is suppressed. Returns
    /// whether a segment was drawn.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if self.is_suppressed() {
            // A request started mid-stroke; the session is abandoned and
            // must not resume after processing ends.
            self.session = None;
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let from = session.advance(point);
        self.draw_segment(from, point);
        true
    }

    /// End the stroke session. Idempotent.
    pub fn end_stroke(&mut self) {
        self.session = None;
    }

    /// Reallocate the backing buffer to new pixel dimensions.
    ///
    /// Destructive: prior drawn content is lost, matching the backing-store
    /// behavior of a resized canvas. Any active stroke ends.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!(
            "Resizing surface {}x{} -> {}x{}",
            self.buffer.width(),
            self.buffer.height(),
            width,
            height
        );
        self.buffer = RgbaImage::new(width, height);
        self.session = None;
    }

    /// Reset the bitmap to fully transparent and end any active stroke.
    pub fn clear(&mut self) {
        for px in self.buffer.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
        self.session = None;
    }

    /// Take an owned copy of the current bitmap. Never mutates the surface.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            image: self.buffer.clone(),
        }
    }

    /// Render one straight segment by stamping dabs along it: a wide soft
    /// halo first, then the solid core on top.
    fn draw_segment(&mut self, from: Point, to: Point) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len / DAB_SPACING).ceil().max(1.0) as u32;

        let glow_radius = self.style.glow_radius;
        let glow_strength = self.style.glow_strength;
        let core_radius = self.style.width / 2.0;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let cx = from.x + dx * t;
            let cy = from.y + dy * t;
            self.stamp_dab(cx, cy, glow_radius, glow_strength, false);
            self.stamp_dab(cx, cy, core_radius, 1.0, true);
        }
    }

    /// Stamp one circular dab centered at (cx, cy).
    ///
    /// Core dabs are solid with a half-pixel soft edge; halo dabs fall off
    /// quadratically to the rim. Alpha combines with a per-pixel max so
    /// overlapping dabs never darken, which is what makes repeated stamping
    /// read as one continuous round-capped stroke.
    fn stamp_dab(&mut self, cx: f32, cy: f32, radius: f32, strength: f32, solid: bool) {
        let (w, h) = (self.buffer.width() as i64, self.buffer.height() as i64);
        let x0 = ((cx - radius).floor() as i64).max(0);
        let x1 = ((cx + radius).ceil() as i64).min(w - 1);
        let y0 = ((cy - radius).floor() as i64).max(0);
        let y1 = ((cy + radius).ceil() as i64).min(h - 1);
        if x1 < x0 || y1 < y0 {
            return;
        }

        let [r, g, b] = self.style.color;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > radius {
                    continue;
                }
                let coverage = if solid {
                    // Solid disc with a half-pixel antialiased rim
                    ((radius - dist) * 2.0).clamp(0.0, 1.0)
                } else {
                    let fall = 1.0 - dist / radius;
                    fall * fall
                };
                let alpha = (coverage * strength * 255.0).round() as u8;
                if alpha == 0 {
                    continue;
                }
                let px = self.buffer.get_pixel_mut(x as u32, y as u32);
                if alpha > px.0[3] {
                    *px = Rgba([r, g, b, alpha]);
                }
            }
        }
    }
}

/// Read-only encoded copy of the surface bitmap at a moment in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    image: RgbaImage,
}

impl Snapshot {
    /// Wrap an existing RGBA image (file input, tests).
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|px| px.0[3] == 0)
    }

    /// Encode the snapshot as a lossless PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let encoder = PngEncoder::new(Cursor::new(&mut bytes));
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                ExtendedColorType::Rgba8,
            )
            .context("Failed to encode snapshot as PNG")?;
        Ok(bytes)
    }
}
