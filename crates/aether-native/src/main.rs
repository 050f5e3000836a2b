use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use aether_core::{
    decode_hdr, populate_when_loaded, EnvironmentMap, FrameSink, RapierWorld, SceneParams,
    SceneView, Simulation, Viewport, PHYSICS_DT,
};
use anyhow::Context;
use glam::Vec2;

const DEFAULT_FRAMES: u32 = 600;
const REPORT_EVERY: u32 = 120;
const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

/// Frame sink that summarizes the scene instead of drawing it.
#[derive(Default)]
struct StatsSink {
    mean_particle_speed: f32,
    mean_orb_distance: f32,
    frames: u32,
}

impl FrameSink for StatsSink {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()> {
        self.frames += 1;
        self.mean_orb_distance = if view.orbs.is_empty() {
            0.0
        } else {
            view.orbs.iter().map(|o| o.position.length()).sum::<f32>() / view.orbs.len() as f32
        };
        self.mean_particle_speed = match view.particles {
            Some(p) if !p.is_empty() => {
                p.velocities().iter().map(|v| v.length()).sum::<f32>() / p.len() as f32
            }
            _ => 0.0,
        };
        Ok(())
    }
}

/// Synthetic cursor: orbits the screen centre, pressed every other second.
fn cursor_at(t: f32) -> (Vec2, bool) {
    let angle = t * 0.25 * TAU;
    let centre = Vec2::new(VIEWPORT.width, VIEWPORT.height) * 0.5;
    let radius = Vec2::new(VIEWPORT.width * 0.3, VIEWPORT.height * 0.3);
    let p = centre + radius * Vec2::new(angle.cos(), angle.sin());
    (p, (t as u32) % 2 == 1)
}

async fn load_environment(path: Option<String>) -> anyhow::Result<Option<EnvironmentMap>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path))?;
    Ok(Some(decode_hdr(&bytes)?))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // aether-native [frames] [query] [environment.hdr]
    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(s) => s.parse::<u32>().with_context(|| format!("invalid frame count {:?}", s))?,
        None => DEFAULT_FRAMES,
    };
    let params = SceneParams::from_query(&args.next().unwrap_or_default())?;
    let env_path = args.next();
    let (orb_count, particle_count) = (params.orb_count, params.particle_count);

    let world = RapierWorld::new(&params.physics);
    let mut sim = Simulation::new(params, world);

    match pollster::block_on(populate_when_loaded(load_environment(env_path), |_| {
        sim.populate()
    })) {
        Ok((Some(env), _)) => log::info!("[env] environment {}x{}", env.width, env.height),
        Ok((None, _)) => log::info!("[env] no environment given; populated without one"),
        Err(e) => log::warn!("[env] environment load failed; running background only: {:#}", e),
    }

    let mut sink = StatsSink::default();
    let mut busy = Duration::ZERO;
    let mut worst = Duration::ZERO;
    for frame in 0..frames {
        let t = frame as f32 * PHYSICS_DT;
        let (p, pressed) = cursor_at(t);
        sim.pointer_move(p.x, p.y, VIEWPORT);
        if pressed != sim.cursor().state().pressed {
            if pressed {
                sim.pointer_down();
            } else {
                sim.pointer_up();
            }
        }

        let started = Instant::now();
        sim.tick(t as f64, &mut sink)?;
        let spent = started.elapsed();
        busy += spent;
        worst = worst.max(spent);

        if (frame + 1) % REPORT_EVERY == 0 {
            log::info!(
                "[scene] frame={} pressed={} particle_speed={:.4} orb_distance={:.2}",
                frame + 1,
                pressed,
                sink.mean_particle_speed,
                sink.mean_orb_distance
            );
        }
    }

    let mean_ms = if frames > 0 {
        busy.as_secs_f64() * 1000.0 / frames as f64
    } else {
        0.0
    };
    log::info!(
        "[scene] {} frames, mean {:.3} ms, worst {:.3} ms",
        sink.frames,
        mean_ms,
        worst.as_secs_f64() * 1000.0
    );

    if sim.is_populated() {
        let particles = sim.particles().map(|p| p.len()).unwrap_or(0);
        anyhow::ensure!(
            sim.orbs().len() == orb_count && particles == particle_count,
            "population changed: orbs {} -> {}, particles {} -> {}",
            orb_count,
            sim.orbs().len(),
            particle_count,
            particles
        );
        log::info!("[scene] counts stable: orbs={} particles={}", orb_count, particles);
    }
    Ok(())
}
