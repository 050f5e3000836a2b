// Host-side tests for cursor normalization, velocity and press tracking.

use aether_core::*;
use glam::Vec2;

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

#[test]
fn viewport_corners_map_to_ndc() {
    let tl = normalize_pointer(0.0, 0.0, vp());
    assert_eq!(tl, Vec2::new(-1.0, 1.0));
    let br = normalize_pointer(800.0, 600.0, vp());
    assert_eq!(br, Vec2::new(1.0, -1.0));
    let c = normalize_pointer(400.0, 300.0, vp());
    assert!(c.length() < 1e-6);
}

#[test]
fn off_screen_pointer_is_not_clamped() {
    let p = normalize_pointer(1200.0, -300.0, vp());
    assert!((p.x - 2.0).abs() < 1e-6);
    assert!((p.y - 2.0).abs() < 1e-6);
}

#[test]
fn degenerate_viewport_stays_finite() {
    let p = normalize_pointer(10.0, 10.0, Viewport::new(0.0, 0.0));
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn velocity_is_delta_between_move_events() {
    let mut t = CursorTracker::new();
    t.pointer_move(400.0, 300.0, vp());
    let s = t.pointer_move(600.0, 150.0, vp());
    assert!((s.position.x - 0.5).abs() < 1e-6);
    assert!((s.position.y - 0.5).abs() < 1e-6);
    assert!((s.velocity.x - 0.5).abs() < 1e-6);
    assert!((s.velocity.y - 0.5).abs() < 1e-6);
    assert_eq!(t.velocity(), s.velocity);

    // Repeating the same position yields zero velocity
    let s2 = t.pointer_move(600.0, 150.0, vp());
    assert_eq!(s2.velocity, Vec2::ZERO);
}

#[test]
fn first_move_is_measured_from_background_centre() {
    let mut t = CursorTracker::new();
    let s = t.pointer_move(400.0, 300.0, vp());
    assert!((s.velocity.x + 0.5).abs() < 1e-6);
    assert!((s.velocity.y + 0.5).abs() < 1e-6);
}

#[test]
fn press_and_release_toggle_state() {
    let mut t = CursorTracker::new();
    assert!(!t.state().pressed);
    t.pointer_down();
    assert!(t.state().pressed);
    t.pointer_move(100.0, 100.0, vp());
    assert!(t.state().pressed, "moving must not release");
    t.pointer_up();
    assert!(!t.state().pressed);
}

#[test]
fn world_position_scales_ndc_onto_z_plane() {
    let c = CursorState {
        x: 0.5,
        y: -1.0,
        pressed: false,
    };
    let w = c.world_position();
    assert_eq!(w.to_array(), [25.0, -50.0, 0.0]);
}

#[test]
fn fluid_uniforms_receive_raw_ndc_and_velocity() {
    let mut fluid = FluidUniforms::default();
    assert_eq!(fluid.mouse, [0.5, 0.5]);
    let mut t = CursorTracker::new();
    let s = t.pointer_move(0.0, 600.0, vp());
    fluid.on_pointer_move(&s);
    assert_eq!(fluid.mouse, [-1.0, -1.0]);
    assert!((fluid.mouse_velocity[0] + 1.5).abs() < 1e-6);
    assert!((fluid.mouse_velocity[1] + 1.5).abs() < 1e-6);

    fluid.set_time(12.5);
    assert_eq!(fluid.time, 12.5);
    fluid.set_pressed(true);
    assert!(fluid.pressed);
}
