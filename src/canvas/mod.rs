//! Freehand drawing surface
//!
//! This module provides the raster drawing surface:
//! - Pointer/touch input normalization to a single `Point` type
//! - Stroke sessions (begin/extend/end) rendered as connected segments
//! - Non-mutating PNG snapshots of the current drawing
//! - Destructive resize and clear

pub mod input;
pub mod stroke;
pub mod surface;

pub use input::{InputEvent, Point, SurfaceRect, TouchPoint};
pub use stroke::{StrokeSession, StrokeStyle};
pub use surface::{DrawingSurface, Snapshot};
