//! Rigid-body physics boundary.
//!
//! Orbs only need a handful of capabilities from a physics engine, captured
//! by [`PhysicsWorld`]. [`RapierWorld`] is the production implementation.
//! External forces follow the "accumulate, then the next step consumes them"
//! contract: a force applied between two steps acts during exactly one step.

use crate::config::PhysicsParams;
use glam::{Quat, Vec3};
use rapier3d::prelude::*;

/// Description of a dynamic sphere body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereBody {
    pub radius: f32,
    pub mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

pub trait PhysicsWorld {
    type Handle: Copy + std::fmt::Debug;

    fn add_sphere(&mut self, body: &SphereBody) -> Self::Handle;
    /// Advance by `dt` seconds, consuming any forces applied since the last step.
    fn step(&mut self, dt: f32);
    fn apply_force(&mut self, handle: Self::Handle, force: Vec3);
    fn transform(&self, handle: Self::Handle) -> Option<BodyTransform>;
    fn velocity(&self, handle: Self::Handle) -> Option<Vec3>;
    fn body_count(&self) -> usize;
}

pub struct RapierWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    friction: f32,
    restitution: f32,
    linear_damping: f32,
    angular_damping: f32,
}

impl RapierWorld {
    pub fn new(params: &PhysicsParams) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = params.dt;
        integration_parameters.max_velocity_iterations = params.solver_iterations;
        let [gx, gy, gz] = params.gravity;
        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![gx, gy, gz],
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            friction: params.friction,
            restitution: params.restitution,
            linear_damping: params.linear_damping,
            angular_damping: params.angular_damping,
        }
    }
}

impl PhysicsWorld for RapierWorld {
    type Handle = RigidBodyHandle;

    fn add_sphere(&mut self, body: &SphereBody) -> RigidBodyHandle {
        let p = body.position;
        let v = body.velocity;
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![p.x, p.y, p.z])
            .linvel(vector![v.x, v.y, v.z])
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(rigid_body);
        let collider = ColliderBuilder::ball(body.radius)
            .mass(body.mass)
            .friction(self.friction)
            .restitution(self.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        // Rapier keeps user forces until reset; one step consumes them here
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        match self.bodies.get_mut(handle) {
            Some(rb) => rb.add_force(vector![force.x, force.y, force.z], true),
            None => log::warn!("[physics] force on unknown body {:?}", handle),
        }
    }

    fn transform(&self, handle: RigidBodyHandle) -> Option<BodyTransform> {
        let rb = self.bodies.get(handle)?;
        let t = rb.translation();
        let q = rb.rotation();
        Some(BodyTransform {
            position: Vec3::new(t.x, t.y, t.z),
            rotation: Quat::from_xyzw(q.i, q.j, q.k, q.w),
        })
    }

    fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        let v = self.bodies.get(handle)?.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
