//! Ambient particle cloud.
//!
//! Particles are integrated by hand rather than through the physics engine:
//! a cursor impulse is added straight to velocity, a negligible jitter keeps
//! the cloud alive, velocity is halved every frame and positions wrap around
//! a fixed box. Storage is structure-of-arrays so the update is a tight loop
//! over dense slices.

use crate::config::ParticleForceParams;
use crate::constants::{TWINKLE_FLOOR, TWINKLE_RATE};
use crate::cursor::CursorState;
use glam::Vec3;
use rand::prelude::*;

/// Initial state of a single particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    /// Phase in radians, `None` for the vast majority that never twinkle.
    pub twinkle: Option<f32>,
}

/// GPU instance layout: xyz + size, rgb + opacity.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position_size: [f32; 4],
    pub color: [f32; 4],
}

/// Velocity change caused by the cursor, before jitter and damping.
#[inline]
pub fn cursor_impulse(position: Vec3, cursor: &CursorState, params: &ParticleForceParams) -> Vec3 {
    let offset = position - cursor.world_position();
    let dist = offset.length();
    let radius = if cursor.pressed {
        params.radius_pressed
    } else {
        params.radius_idle
    };
    if dist >= radius {
        return Vec3::ZERO;
    }
    let dir = offset.normalize_or_zero();
    let magnitude = if cursor.pressed {
        -params.pull
    } else {
        params.push
    };
    dir * magnitude * (1.0 - dist / radius)
}

/// Wrap one coordinate to the opposite face once it leaves `[-bound, bound]`.
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}

#[inline]
pub fn wrap_position(p: Vec3, bounds: [f32; 3]) -> Vec3 {
    Vec3::new(
        wrap_axis(p.x, bounds[0]),
        wrap_axis(p.y, bounds[1]),
        wrap_axis(p.z, bounds[2]),
    )
}

/// Brightness multiplier in `[TWINKLE_FLOOR, 1]`.
#[inline]
pub fn twinkle_factor(time_sec: f64, phase: f32) -> f32 {
    let s = (time_sec * TWINKLE_RATE + phase as f64).sin() * 0.5 + 0.5;
    (TWINKLE_FLOOR + (1.0 - TWINKLE_FLOOR) * s).clamp(TWINKLE_FLOOR, 1.0) as f32
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    sizes: Vec<f32>,
    twinkle: Vec<Option<f32>>,
    base_colors: Vec<[f32; 3]>,
    base_opacity: Vec<f32>,
    colors: Vec<[f32; 3]>,
    opacity: Vec<f32>,
    params: ParticleForceParams,
    rng: StdRng,
}

impl ParticleField {
    pub fn from_seeds(
        seeds: impl IntoIterator<Item = ParticleSeed>,
        params: ParticleForceParams,
        rng: StdRng,
    ) -> Self {
        let seeds = seeds.into_iter();
        let cap = seeds.size_hint().0;
        let mut field = Self {
            positions: Vec::with_capacity(cap),
            velocities: Vec::with_capacity(cap),
            sizes: Vec::with_capacity(cap),
            twinkle: Vec::with_capacity(cap),
            base_colors: Vec::with_capacity(cap),
            base_opacity: Vec::with_capacity(cap),
            colors: Vec::with_capacity(cap),
            opacity: Vec::with_capacity(cap),
            params,
            rng,
        };
        for s in seeds {
            field.positions.push(s.position);
            field.velocities.push(s.velocity);
            field.sizes.push(s.size);
            field.twinkle.push(s.twinkle);
            field.base_colors.push(s.color);
            field.base_opacity.push(s.opacity);
            field.colors.push(s.color);
            field.opacity.push(s.opacity);
        }
        field
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn twinkle_phases(&self) -> &[Option<f32>] {
        &self.twinkle
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn opacity(&self) -> &[f32] {
        &self.opacity
    }

    pub fn base_colors(&self) -> &[[f32; 3]] {
        &self.base_colors
    }

    pub fn base_opacity(&self) -> &[f32] {
        &self.base_opacity
    }

    /// Overwrite one particle's kinematic state.
    pub fn set_state(&mut self, index: usize, position: Vec3, velocity: Vec3) {
        if let (Some(p), Some(v)) = (
            self.positions.get_mut(index),
            self.velocities.get_mut(index),
        ) {
            *p = position;
            *v = velocity;
        }
    }

    /// One frame of cursor impulse, jitter, damping, integration, wrap and twinkle.
    pub fn update(&mut self, cursor: &CursorState, time_sec: f64) {
        let params = &self.params;
        let [jx, jy, jz] = params.jitter;
        for i in 0..self.positions.len() {
            let mut v = self.velocities[i] + cursor_impulse(self.positions[i], cursor, params);
            v += Vec3::new(
                (self.rng.gen::<f32>() - 0.5) * jx,
                (self.rng.gen::<f32>() - 0.5) * jy,
                (self.rng.gen::<f32>() - 0.5) * jz,
            );
            v *= params.damping;
            self.velocities[i] = v;
            self.positions[i] = wrap_position(self.positions[i] + v, params.bounds);

            match self.twinkle[i] {
                Some(phase) => {
                    let f = twinkle_factor(time_sec, phase);
                    let [r, g, b] = self.base_colors[i];
                    self.colors[i] = [r * f, g * f, b * f];
                    self.opacity[i] = self.base_opacity[i] * f;
                }
                None => {
                    self.colors[i] = self.base_colors[i];
                    self.opacity[i] = self.base_opacity[i];
                }
            }
        }
    }

    /// Pack display state for the GPU, reusing `out`'s allocation.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(&self.sizes)
                .zip(self.colors.iter().zip(&self.opacity))
                .map(|((p, s), (c, a))| ParticleInstance {
                    position_size: [p.x, p.y, p.z, *s],
                    color: [c[0], c[1], c[2], *a],
                }),
        );
    }
}
