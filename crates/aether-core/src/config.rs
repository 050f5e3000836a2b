//! Runtime configuration for a scene.
//!
//! Every field defaults to the matching value in [`crate::constants`]. A
//! small URL-query style parser lets the web page (`?particles=2000`) and the
//! native driver override the population without rebuilding.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown scene option `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}

/// Cursor force applied to orbs through the physics engine.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbForceParams {
    pub influence_radius: f32,
    pub pull: f32,
    pub push: f32,
}

impl Default for OrbForceParams {
    fn default() -> Self {
        Self {
            influence_radius: ORB_INFLUENCE_RADIUS,
            pull: ORB_PULL_FORCE,
            push: ORB_PUSH_FORCE,
        }
    }
}

/// Cursor impulse and integration settings for the particle cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleForceParams {
    pub radius_idle: f32,
    pub radius_pressed: f32,
    pub pull: f32,
    pub push: f32,
    pub jitter: [f32; 3],
    pub damping: f32,
    pub bounds: [f32; 3],
}

impl Default for ParticleForceParams {
    fn default() -> Self {
        Self {
            radius_idle: PARTICLE_RADIUS_IDLE,
            radius_pressed: PARTICLE_RADIUS_PRESSED,
            pull: PARTICLE_PULL_IMPULSE,
            push: PARTICLE_PUSH_IMPULSE,
            jitter: PARTICLE_JITTER,
            damping: PARTICLE_DAMPING,
            bounds: PARTICLE_BOUNDS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    pub dt: f32,
    pub gravity: [f32; 3],
    pub solver_iterations: usize,
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            dt: PHYSICS_DT,
            gravity: [0.0, 0.0, 0.0],
            solver_iterations: SOLVER_ITERATIONS,
            friction: CONTACT_FRICTION,
            restitution: CONTACT_RESTITUTION,
            linear_damping: BODY_LINEAR_DAMPING,
            angular_damping: BODY_ANGULAR_DAMPING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub orb_count: usize,
    pub particle_count: usize,
    /// `None` seeds the population from entropy.
    pub seed: Option<u64>,
    pub orb_force: OrbForceParams,
    pub particle_force: ParticleForceParams,
    pub physics: PhysicsParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            orb_count: ORB_COUNT,
            particle_count: PARTICLE_COUNT,
            seed: None,
            orb_force: OrbForceParams::default(),
            particle_force: ParticleForceParams::default(),
            physics: PhysicsParams::default(),
        }
    }
}

impl SceneParams {
    /// Parse `key=value` pairs separated by `&`, starting from the defaults.
    ///
    /// Accepts an optional leading `?` so `location.search` can be passed as-is.
    /// Recognised keys: `orbs`, `particles`, `seed`.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "orbs" => params.orb_count = value.parse().map_err(|_| invalid())?,
                "particles" => params.particle_count = value.parse().map_err(|_| invalid())?,
                "seed" => params.seed = Some(value.parse().map_err(|_| invalid())?),
                other => return Err(ConfigError::UnknownKey(other.to_string())),
            }
        }
        if params.particle_count == 0 {
            return Err(ConfigError::Zero("particles"));
        }
        Ok(params)
    }
}
