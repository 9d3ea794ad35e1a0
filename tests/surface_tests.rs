// Unit tests for the drawing surface
//
// These tests verify stroke capture, snapshotting, resize, clear, and the
// input-suppression behavior.

use neonscribe::canvas::{DrawingSurface, InputEvent, Point, Snapshot, SurfaceRect, TouchPoint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn surface(width: u32, height: u32) -> (DrawingSurface, Arc<AtomicBool>) {
    let suppressed = Arc::new(AtomicBool::new(false));
    let surface = DrawingSurface::new(width, height, Arc::clone(&suppressed));
    (surface, suppressed)
}

fn alpha_at(snapshot: &Snapshot, x: u32, y: u32) -> u8 {
    snapshot.image().get_pixel(x, y).0[3]
}

#[test]
fn test_segments_connect_consecutive_samples() {
    let (mut surface, _) = surface(64, 64);

    surface.begin_stroke(Point::new(10.0, 10.0));
    surface.extend_stroke(Point::new(30.0, 10.0));
    surface.extend_stroke(Point::new(30.0, 30.0));
    surface.end_stroke();

    let snap = surface.snapshot();

    // Every pixel along both segments is covered (no gaps)
    for x in 10..=30 {
        assert!(alpha_at(&snap, x, 10) > 0, "gap at ({}, 10)", x);
    }
    for y in 10..=30 {
        assert!(alpha_at(&snap, 30, y) > 0, "gap at (30, {})", y);
    }

    // No extra segments: the corner opposite the stroke stays empty
    assert_eq!(alpha_at(&snap, 5, 55), 0);
    assert_eq!(alpha_at(&snap, 55, 55), 0);
}

#[test]
fn test_extend_without_begin_is_noop() {
    let (mut surface, _) = surface(32, 32);

    let drew = surface.extend_stroke(Point::new(16.0, 16.0));

    assert!(!drew);
    assert!(surface.snapshot().is_blank());
}

#[test]
fn test_end_stroke_is_idempotent() {
    let (mut surface, _) = surface(32, 32);

    surface.end_stroke();
    surface.end_stroke();

    surface.begin_stroke(Point::new(4.0, 4.0));
    surface.end_stroke();
    surface.end_stroke();

    // The stroke ended; a further extend draws nothing
    assert!(!surface.extend_stroke(Point::new(20.0, 20.0)));
}

#[test]
fn test_clear_matches_fresh_surface() {
    let (mut surface, _) = surface(48, 48);
    let (fresh, _) = self::surface(48, 48);

    surface.begin_stroke(Point::new(5.0, 5.0));
    surface.extend_stroke(Point::new(40.0, 40.0));
    surface.end_stroke();
    assert!(!surface.snapshot().is_blank());

    surface.clear();

    let cleared = surface.snapshot();
    assert!(cleared.is_blank());
    assert_eq!(cleared.image().as_raw(), fresh.snapshot().image().as_raw());
}

#[test]
fn test_clear_ends_active_stroke() {
    let (mut surface, _) = surface(32, 32);

    surface.begin_stroke(Point::new(8.0, 8.0));
    surface.clear();

    assert!(!surface.extend_stroke(Point::new(24.0, 24.0)));
    assert!(surface.snapshot().is_blank());
}

#[test]
fn test_resize_yields_empty_snapshot_at_new_dimensions() {
    let (mut surface, _) = surface(40, 40);

    surface.begin_stroke(Point::new(10.0, 10.0));
    surface.extend_stroke(Point::new(30.0, 30.0));
    surface.end_stroke();

    surface.resize(100, 50);

    let snap = surface.snapshot();
    assert_eq!(snap.width(), 100);
    assert_eq!(snap.height(), 50);
    assert!(snap.is_blank(), "resize is destructive; content is dropped");
}

#[test]
fn test_snapshot_does_not_mutate_surface() {
    let (mut surface, _) = surface(32, 32);

    surface.begin_stroke(Point::new(6.0, 6.0));
    surface.extend_stroke(Point::new(26.0, 6.0));
    surface.end_stroke();

    let first = surface.snapshot();
    first.to_png().unwrap();
    let second = surface.snapshot();

    assert_eq!(first.image().as_raw(), second.image().as_raw());
}

#[test]
fn test_suppressed_input_is_ignored() {
    let (mut surface, suppressed) = surface(32, 32);
    suppressed.store(true, Ordering::SeqCst);

    assert!(!surface.begin_stroke(Point::new(8.0, 8.0)));
    assert!(!surface.extend_stroke(Point::new(24.0, 24.0)));
    assert!(surface.snapshot().is_blank());
}

#[test]
fn test_suppression_abandons_live_stroke() {
    let (mut surface, suppressed) = surface(32, 32);

    surface.begin_stroke(Point::new(4.0, 4.0));
    assert!(surface.extend_stroke(Point::new(8.0, 8.0)));

    suppressed.store(true, Ordering::SeqCst);
    assert!(!surface.extend_stroke(Point::new(16.0, 16.0)));

    // The session does not silently resume once suppression lifts
    suppressed.store(false, Ordering::SeqCst);
    assert!(!surface.extend_stroke(Point::new(24.0, 24.0)));
}

#[test]
fn test_touch_event_with_no_points_is_ignored() {
    let event = InputEvent::Touch { points: vec![] };
    assert!(event.point().is_none());

    let event = InputEvent::Touch {
        points: vec![TouchPoint { x: 12.0, y: 7.0 }],
    };
    let point = event.point().unwrap();
    assert_eq!(point.x, 12.0);
    assert_eq!(point.y, 7.0);
}

#[test]
fn test_pointer_and_touch_normalize_to_local_space() {
    let rect = SurfaceRect::new(100.0, 50.0, 640.0, 480.0);

    let pointer = InputEvent::Pointer { x: 160.0, y: 90.0 };
    let p = rect.to_local(&pointer).unwrap();
    assert_eq!((p.x, p.y), (60.0, 40.0));

    let touch = InputEvent::Touch {
        points: vec![TouchPoint { x: 110.0, y: 55.0 }],
    };
    let t = rect.to_local(&touch).unwrap();
    assert_eq!((t.x, t.y), (10.0, 5.0));

    assert!(rect.to_local(&InputEvent::Touch { points: vec![] }).is_none());
}

#[test]
fn test_snapshot_png_round_trips_through_disk() {
    let (mut surface, _) = surface(40, 30);
    surface.begin_stroke(Point::new(5.0, 15.0));
    surface.extend_stroke(Point::new(35.0, 15.0));
    surface.end_stroke();

    let png = surface.snapshot().to_png().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");
    std::fs::write(&path, &png).unwrap();

    let loaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(loaded.width(), 40);
    assert_eq!(loaded.height(), 30);
    assert_eq!(loaded.as_raw(), surface.snapshot().image().as_raw());
}
