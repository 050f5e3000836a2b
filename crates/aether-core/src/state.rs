//! Visual-side state types shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The renderer turns them into
//! uniform blocks; the simulation never reads them.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The fixed scene camera, looking down -Z at the origin.
    pub fn scene(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Follow a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up axes, for camera-facing sprites.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

/// Fog and lights of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Atmosphere {
    pub clear_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient: [f32; 3],
    pub sun_color: [f32; 3],
    /// Direction *towards* the light.
    pub sun_direction: Vec3,
}

impl Default for Atmosphere {
    fn default() -> Self {
        let scale = |c: [f32; 3], k: f32| [c[0] * k, c[1] * k, c[2] * k];
        Self {
            clear_color: CLEAR_COLOR,
            fog_color: FOG_COLOR,
            fog_near: FOG_NEAR,
            fog_far: FOG_FAR,
            ambient: scale(AMBIENT_COLOR, AMBIENT_INTENSITY),
            sun_color: scale(SUN_COLOR, SUN_INTENSITY),
            sun_direction: Vec3::from(SUN_POSITION).normalize(),
        }
    }
}

impl Atmosphere {
    /// Linear fog visibility in `[0, 1]`, 1 meaning no fog.
    pub fn fog_visibility(&self, distance: f32) -> f32 {
        ((self.fog_far - distance) / (self.fog_far - self.fog_near)).clamp(0.0, 1.0)
    }
}
