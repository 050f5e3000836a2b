// Host-side tests for the frame loop: ordering, load gating and population invariants.

use aether_core::*;
use glam::{Quat, Vec3};
use std::future::{pending, ready};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Step,
    Force(usize, Vec3),
    Render { orbs: usize, time: f32 },
}

/// Physics stand-in that records every call and keeps bodies where they were created.
#[derive(Default)]
struct RecordingWorld {
    bodies: Vec<SphereBody>,
    calls: Vec<Call>,
}

impl PhysicsWorld for RecordingWorld {
    type Handle = usize;

    fn add_sphere(&mut self, body: &SphereBody) -> usize {
        self.bodies.push(*body);
        self.bodies.len() - 1
    }

    fn step(&mut self, _dt: f32) {
        self.calls.push(Call::Step);
    }

    fn apply_force(&mut self, handle: usize, force: Vec3) {
        self.calls.push(Call::Force(handle, force));
    }

    fn transform(&self, handle: usize) -> Option<BodyTransform> {
        self.bodies.get(handle).map(|b| BodyTransform {
            position: b.position,
            rotation: Quat::IDENTITY,
        })
    }

    fn velocity(&self, handle: usize) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| b.velocity)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Call>,
}

impl FrameSink for RecordingSink {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()> {
        self.frames.push(Call::Render {
            orbs: view.orbs.len(),
            time: view.time,
        });
        Ok(())
    }
}

fn small_params(seed: u64) -> SceneParams {
    SceneParams {
        orb_count: 6,
        particle_count: 300,
        seed: Some(seed),
        ..SceneParams::default()
    }
}

#[test]
fn unpopulated_scene_still_advances_background_and_renders() {
    let mut sim = Simulation::new(small_params(1), RecordingWorld::default());
    let mut sink = RecordingSink::default();
    sim.tick(1.25, &mut sink).unwrap();
    sim.tick(1.5, &mut sink).unwrap();
    assert!(!sim.is_populated());
    assert_eq!(sim.fluid().time, 1.5);
    assert_eq!(
        sink.frames,
        vec![
            Call::Render { orbs: 0, time: 1.25 },
            Call::Render { orbs: 0, time: 1.5 }
        ]
    );
    assert_eq!(sim.world().body_count(), 0);
    assert_eq!(sim.frames(), 2);
}

#[test]
fn forces_are_applied_after_the_step_of_the_same_tick() {
    let params = SceneParams {
        orb_count: 30,
        ..small_params(3)
    };
    let mut sim = Simulation::new(params, RecordingWorld::default());
    sim.populate();
    // Cursor in the middle of the spawn box, pressed: plenty of orbs in range
    sim.pointer_move(400.0, 300.0, Viewport::new(800.0, 600.0));
    sim.pointer_down();
    sim.tick(0.0, &mut ()).unwrap();
    sim.tick(1.0 / 60.0, &mut ()).unwrap();

    let calls = &sim.world().calls;
    let steps: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Call::Step)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0], 0, "the first thing a tick does to physics is step it");
    let forces_tick1 = steps[1] - steps[0] - 1;
    assert!(forces_tick1 > 0, "some orb should be within reach");
    assert_eq!(calls.len() - steps[1] - 1, forces_tick1);
    for c in calls {
        if let Call::Force(h, f) = c {
            let orb = sim.orbs()[*h];
            let expected = orb_cursor_force(orb.position, &sim.cursor().state(), &OrbForceParams::default());
            assert!((*f - expected).length() < 1e-4);
            assert!(f.dot(orb.position) < 0.0, "pressed cursor at origin pulls inwards");
        }
    }
}

#[test]
fn orb_visuals_follow_physics_transforms() {
    let mut sim = Simulation::new(small_params(5), RapierWorld::new(&PhysicsParams::default()));
    sim.populate();
    let before: Vec<Vec3> = sim.orbs().iter().map(|o| o.position).collect();
    for i in 0..30 {
        sim.tick(i as f64 / 60.0, &mut ()).unwrap();
    }
    for (visual, handle) in sim.orbs().iter().zip(sim.orb_handles()) {
        let t = sim.world().transform(*handle).unwrap();
        assert_eq!(visual.position, t.position);
        assert_eq!(visual.rotation, t.rotation);
    }
    let moved = sim
        .orbs()
        .iter()
        .zip(&before)
        .filter(|(o, b)| (o.position - **b).length() > 1e-3)
        .count();
    assert!(moved > 0, "initial velocities should move the orbs");
}

#[test]
fn population_is_built_only_on_successful_load() {
    let mut sim = Simulation::new(small_params(7), RecordingWorld::default());
    let out = pollster::block_on(populate_when_loaded(ready(Ok::<_, String>("env")), |_| sim.populate()));
    assert_eq!(out, Ok(("env", true)));
    assert!(sim.is_populated());
    assert_eq!(sim.orbs().len(), 6);
    assert_eq!(sim.particles().map(|p| p.len()), Some(300));

    let mut failed = Simulation::new(small_params(7), RecordingWorld::default());
    let mut ran = false;
    let out = pollster::block_on(populate_when_loaded(
        ready(Err::<&str, _>("404".to_string())),
        |_| {
            ran = true;
            failed.populate()
        },
    ));
    assert_eq!(out, Err("404".to_string()));
    assert!(!ran);
    assert!(!failed.is_populated());
    failed.tick(0.5, &mut ()).unwrap();
    assert!(failed.orbs().is_empty() && failed.particles().is_none());
}

#[test]
fn pending_load_never_reaches_the_continuation() {
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn noop_raw() -> RawWaker {
        fn clone(_: *const ()) -> RawWaker {
            noop_raw()
        }
        fn noop(_: *const ()) {}
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let mut ran = false;
    {
        let fut = populate_when_loaded(pending::<Result<(), ()>>(), |_| ran = true);
        let mut fut = pin!(fut);
        let waker = unsafe { Waker::from_raw(noop_raw()) };
        let mut cx = Context::from_waker(&waker);
        for _ in 0..5 {
            assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
        }
    }
    assert!(!ran);
}

#[test]
fn populate_twice_does_not_duplicate() {
    let mut sim = Simulation::new(small_params(11), RecordingWorld::default());
    assert!(sim.populate());
    assert!(!sim.populate());
    assert_eq!(sim.world().body_count(), 6);
    assert_eq!(sim.orbs().len(), 6);
}

#[test]
fn default_population_has_twenty_orbs_and_fifty_thousand_particles() {
    let params = SceneParams {
        seed: Some(2024),
        ..SceneParams::default()
    };
    let mut sim = Simulation::new(params, RapierWorld::new(&PhysicsParams::default()));
    sim.populate();
    for i in 0..3 {
        sim.tick(i as f64 / 60.0, &mut ()).unwrap();
    }
    assert_eq!(sim.orbs().len(), ORB_COUNT);
    assert_eq!(sim.world().body_count(), 20);
    assert_eq!(sim.particles().unwrap().len(), PARTICLE_COUNT);
}

#[test]
fn counts_stay_constant_over_ten_thousand_frames() {
    let params = SceneParams {
        orb_count: 20,
        particle_count: 200,
        seed: Some(77),
        ..SceneParams::default()
    };
    let mut sim = Simulation::new(params, RapierWorld::new(&PhysicsParams::default()));
    sim.populate();
    let vp = Viewport::new(1000.0, 1000.0);
    for frame in 0..10_000u32 {
        if frame % 240 == 0 {
            sim.pointer_down();
        } else if frame % 240 == 120 {
            sim.pointer_up();
        }
        let a = frame as f32 * 0.01;
        sim.pointer_move(500.0 + 300.0 * a.cos(), 500.0 + 300.0 * a.sin(), vp);
        sim.tick(frame as f64 / 60.0, &mut ()).unwrap();
    }
    assert_eq!(sim.frames(), 10_000);
    assert_eq!(sim.orbs().len(), 20);
    assert_eq!(sim.orb_handles().len(), 20);
    assert_eq!(sim.world().body_count(), 20);
    let particles = sim.particles().unwrap();
    assert_eq!(particles.len(), 200);
    assert_eq!(particles.velocities().len(), 200);
    assert_eq!(particles.colors().len(), 200);
    for o in sim.orbs() {
        assert!(o.position.is_finite());
    }
}

#[test]
fn seeded_population_is_deterministic() {
    let build = || {
        let mut sim = Simulation::new(small_params(42), RecordingWorld::default());
        sim.populate();
        let orbs: Vec<_> = sim.orbs().to_vec();
        let first = sim.particles().unwrap().positions()[..10].to_vec();
        (orbs, first)
    };
    assert_eq!(build(), build());
}

#[test]
fn seeds_respect_documented_ranges() {
    use rand::prelude::*;
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let (body, color) = seed_orb(&mut rng);
        assert!(body.radius >= 1.0 && body.radius < 3.0);
        assert!((body.mass - body.radius * 2.0).abs() < 1e-6);
        assert!(body.position.x.abs() <= 40.0 && body.position.y.abs() <= 40.0);
        assert!(body.position.z.abs() <= 10.0);
        assert!(body.velocity.x.abs() <= 1.0 && body.velocity.z.abs() <= 0.5);
        assert!(ORB_PALETTE.contains(&color));
    }
    for _ in 0..5_000 {
        let p = seed_particle(&mut rng, PARTICLE_BOUNDS);
        assert!(p.position.x.abs() <= 200.0 && p.position.z.abs() <= 150.0);
        assert!(p.opacity > 0.0 && p.opacity <= 1.0);
        assert!(p.size > 0.0 && p.size <= 0.9 + 1e-4);
        assert!(p.color[2] >= p.color[1] && p.color[1] >= p.color[0]);
        if let Some(phase) = p.twinkle {
            assert!((0.0..std::f32::consts::TAU).contains(&phase));
        }
    }
}
