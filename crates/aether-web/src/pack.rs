// GPU-side layouts of the scene and CPU-built meshes.
// Kept free of web and wgpu types so host tests can include it.

use aether_core::{
    Atmosphere, Camera, FluidUniforms, OrbVisual, FLUID_PLANE_SIZE, FLUID_PLANE_Z, ORB_EMISSIVE,
    ORB_ENV_INTENSITY, ORB_OPACITY,
};
use std::f32::consts::{PI, TAU};

/// Matches `FluidUniforms` in fluid.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FluidPacked {
    pub view_proj: [[f32; 4]; 4],
    pub mouse: [f32; 2],
    pub mouse_velocity: [f32; 2],
    pub time: f32,
    pub pressed: f32,
    pub plane_half: f32,
    pub plane_z: f32,
}

/// Matches `SceneUniforms` shared by orbs.wgsl and particles.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScenePacked {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub ambient: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog: [f32; 4],
    pub material: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OrbInstance {
    pub center_radius: [f32; 4],
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

#[inline]
fn rgb1(c: [f32; 3], w: f32) -> [f32; 4] {
    [c[0], c[1], c[2], w]
}

pub fn pack_fluid(fluid: &FluidUniforms, camera: &Camera) -> FluidPacked {
    FluidPacked {
        view_proj: camera.view_projection().to_cols_array_2d(),
        mouse: fluid.mouse,
        mouse_velocity: fluid.mouse_velocity,
        time: fluid.time,
        pressed: if fluid.pressed { 1.0 } else { 0.0 },
        plane_half: FLUID_PLANE_SIZE * 0.5,
        plane_z: FLUID_PLANE_Z,
    }
}

pub fn pack_scene(camera: &Camera, atmosphere: &Atmosphere, env_present: bool) -> ScenePacked {
    let (right, up) = camera.billboard_axes();
    ScenePacked {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_pos: camera.eye.extend(1.0).to_array(),
        camera_right: right.extend(0.0).to_array(),
        camera_up: up.extend(0.0).to_array(),
        sun_dir: atmosphere.sun_direction.extend(0.0).to_array(),
        sun_color: rgb1(atmosphere.sun_color, 1.0),
        ambient: rgb1(atmosphere.ambient, 1.0),
        fog_color: rgb1(atmosphere.fog_color, 1.0),
        fog: [
            atmosphere.fog_near,
            atmosphere.fog_far,
            ORB_ENV_INTENSITY,
            if env_present { 1.0 } else { 0.0 },
        ],
        material: [ORB_OPACITY, ORB_EMISSIVE, 0.0, 0.0],
    }
}

pub fn pack_orb(orb: &OrbVisual) -> OrbInstance {
    OrbInstance {
        center_radius: orb.position.extend(orb.radius).to_array(),
        rotation: orb.rotation.to_array(),
        color: rgb1(orb.color, ORB_OPACITY),
    }
}

/// Unit UV sphere: positions double as normals. Triangles wind
/// counter-clockwise seen from outside.
pub fn uv_sphere(segments: u32, rings: u32) -> (Vec<[f32; 3]>, Vec<u16>) {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for r in 0..=rings {
        let theta = r as f32 / rings as f32 * PI;
        let (st, ct) = theta.sin_cos();
        for s in 0..=segments {
            let phi = s as f32 / segments as f32 * TAU;
            let (sp, cp) = phi.sin_cos();
            vertices.push([st * cp, ct, st * sp]);
        }
    }
    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = (r * stride + s) as u16;
            let b = ((r + 1) * stride + s) as u16;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    (vertices, indices)
}

/// Two triangles spanning a unit quad centred on the origin.
pub const PARTICLE_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];
