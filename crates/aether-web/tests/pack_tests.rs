// Host-side tests for the GPU packing helpers.
// The web crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod pack {
    include!("../src/pack.rs");
}

use aether_core::{Atmosphere, Camera, FluidUniforms, OrbVisual};
use glam::{Quat, Vec3};
use pack::*;

#[test]
fn packed_layouts_match_wgsl_blocks() {
    // mat4 + vec2 + vec2 + 4 scalars
    assert_eq!(std::mem::size_of::<FluidPacked>(), 96);
    // mat4 + nine vec4
    assert_eq!(std::mem::size_of::<ScenePacked>(), 208);
    assert_eq!(std::mem::size_of::<OrbInstance>(), 48);
    assert_eq!(std::mem::size_of::<aether_core::ParticleInstance>(), 32);
}

#[test]
fn fluid_pack_carries_cursor_and_plane() {
    let mut fluid = FluidUniforms::default();
    fluid.set_time(3.5);
    fluid.set_pressed(true);
    let p = pack_fluid(&fluid, &Camera::scene(1.0));
    assert_eq!(p.mouse, [0.5, 0.5]);
    assert_eq!(p.time, 3.5);
    assert_eq!(p.pressed, 1.0);
    assert_eq!(p.plane_half, 100.0);
    assert_eq!(p.plane_z, -10.0);
}

#[test]
fn scene_pack_flags_environment() {
    let cam = Camera::scene(1.5);
    let atmo = Atmosphere::default();
    let without = pack_scene(&cam, &atmo, false);
    let with = pack_scene(&cam, &atmo, true);
    assert_eq!(without.fog[3], 0.0);
    assert_eq!(with.fog[3], 1.0);
    assert_eq!(with.fog[0..3], [50.0, 200.0, 3.0]);
    assert_eq!(with.camera_pos, [0.0, 0.0, 50.0, 1.0]);
    assert_eq!(with.material[0], 0.3);
}

#[test]
fn orb_pack_keeps_radius_rotation_and_opacity() {
    let rotation = Quat::from_rotation_y(0.7);
    let orb = OrbVisual {
        position: Vec3::new(1.0, -2.0, 3.0),
        rotation,
        radius: 2.5,
        color: [0.9, 0.95, 1.0],
    };
    let inst = pack_orb(&orb);
    assert_eq!(inst.center_radius, [1.0, -2.0, 3.0, 2.5]);
    assert_eq!(inst.rotation, rotation.to_array());
    assert_eq!(inst.color, [0.9, 0.95, 1.0, 0.3]);
}

#[test]
fn uv_sphere_is_closed_unit_mesh() {
    let (vertices, indices) = uv_sphere(32, 32);
    assert_eq!(vertices.len(), 33 * 33);
    assert_eq!(indices.len(), 32 * 32 * 6);
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    for v in &vertices {
        let len = Vec3::from(*v).length();
        assert!((len - 1.0).abs() < 1e-5);
    }
}

#[test]
fn uv_sphere_faces_point_outwards() {
    let (vertices, indices) = uv_sphere(16, 12);
    let mut checked = 0;
    for tri in indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize]));
        let n = (b - a).cross(c - a);
        // Pole triangles collapse to zero area
        if n.length() < 1e-6 {
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        assert!(n.dot(centroid) > 0.0);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn particle_quad_spans_unit_square() {
    let min = PARTICLE_CORNERS.iter().fold(f32::MAX, |m, c| m.min(c[0]).min(c[1]));
    let max = PARTICLE_CORNERS.iter().fold(f32::MIN, |m, c| m.max(c[0]).max(c[1]));
    assert_eq!((min, max), (-0.5, 0.5));
}
