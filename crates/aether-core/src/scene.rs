//! Population seeding and load-gated construction.
//!
//! Orbs and particles are only built once the environment map has arrived.
//! [`populate_when_loaded`] expresses that as a future with a single
//! continuation: on success the continuation builds the population, on
//! failure it never runs and the scene keeps its background only.

use crate::config::SceneParams;
use crate::constants::*;
use crate::orbs::{OrbField, OrbVisual};
use crate::particles::{ParticleField, ParticleSeed};
use crate::physics::{PhysicsWorld, SphereBody};
use glam::{Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;
use std::future::Future;

pub struct Population<H> {
    pub orbs: OrbField<H>,
    pub particles: ParticleField,
}

/// Symmetric uniform sample in `[-extent/2, extent/2)` per axis.
#[inline]
fn centered(rng: &mut StdRng, extent: [f32; 3]) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * extent[0],
        (rng.gen::<f32>() - 0.5) * extent[1],
        (rng.gen::<f32>() - 0.5) * extent[2],
    )
}

pub fn seed_orb(rng: &mut StdRng) -> (SphereBody, [f32; 3]) {
    let radius = rng.gen::<f32>() * ORB_RADIUS_SPAN + ORB_RADIUS_MIN;
    let color = *ORB_PALETTE.choose(rng).unwrap_or(&ORB_PALETTE[0]);
    let body = SphereBody {
        radius,
        mass: radius * ORB_MASS_PER_RADIUS,
        position: centered(rng, ORB_SPAWN_EXTENT),
        velocity: centered(rng, ORB_SPAWN_SPEED),
    };
    (body, color)
}

pub fn seed_particle(rng: &mut StdRng, bounds: [f32; 3]) -> ParticleSeed {
    let position = centered(rng, [bounds[0] * 2.0, bounds[1] * 2.0, bounds[2] * 2.0]);
    // Dimmer and smaller away from the z = 0 plane
    let depth = 1.0 - position.z.abs() / PARTICLE_DEPTH_FALLOFF;
    let intensity = (rng.gen::<f32>() * 0.8 + 0.2) * depth.max(PARTICLE_MIN_DEPTH_BRIGHTNESS);
    let size = (rng.gen::<f32>() * PARTICLE_MAX_SIZE + 0.00001) * depth.max(PARTICLE_MIN_DEPTH_SIZE);
    let velocity = centered(rng, PARTICLE_SPAWN_DRIFT);
    let twinkle = rng
        .gen_bool(TWINKLE_PROBABILITY)
        .then(|| rng.gen::<f32>() * TAU);
    ParticleSeed {
        position,
        velocity,
        size,
        color: [intensity * 0.9, intensity, intensity * 1.1],
        opacity: (intensity + 0.1).min(1.0),
        twinkle,
    }
}

/// Add `params.orb_count` sphere bodies to `world` and seed the particle cloud.
pub fn build_population<W: PhysicsWorld>(
    world: &mut W,
    params: &SceneParams,
) -> Population<W::Handle> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut orbs = OrbField::new(params.orb_force.clone());
    for _ in 0..params.orb_count {
        let (body, color) = seed_orb(&mut rng);
        let handle = world.add_sphere(&body);
        orbs.push(
            handle,
            OrbVisual {
                position: body.position,
                rotation: Quat::IDENTITY,
                radius: body.radius,
                color,
            },
        );
    }

    let bounds = params.particle_force.bounds;
    let seeds = (0..params.particle_count)
        .map(|_| seed_particle(&mut rng, bounds))
        .collect::<Vec<_>>();
    let jitter_rng = StdRng::seed_from_u64(rng.gen());
    let particles = ParticleField::from_seeds(seeds, params.particle_force.clone(), jitter_rng);

    let twinkling = particles.twinkle_phases().iter().flatten().count();
    log::info!(
        "[scene] populated orbs={} particles={} twinkling={}",
        orbs.len(),
        particles.len(),
        twinkling
    );
    Population { orbs, particles }
}

/// Await `load`, then run `construct` with its output.
///
/// `construct` runs at most once and only on success; a rejected load is
/// returned untouched and a pending one simply never reaches it.
pub async fn populate_when_loaded<F, T, E, C, R>(load: F, construct: C) -> Result<(T, R), E>
where
    F: Future<Output = Result<T, E>>,
    C: FnOnce(&T) -> R,
{
    let resource = load.await?;
    let built = construct(&resource);
    Ok((resource, built))
}
