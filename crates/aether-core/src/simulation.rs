use crate::config::SceneParams;
use crate::cursor::{CursorState, CursorTracker, Viewport};
use crate::fluid::FluidUniforms;
use crate::orbs::OrbVisual;
use crate::particles::ParticleField;
use crate::physics::PhysicsWorld;
use crate::scene::{build_population, Population};

/// Everything a renderer needs to draw one frame.
pub struct SceneView<'a> {
    pub time: f32,
    pub fluid: &'a FluidUniforms,
    pub cursor: CursorState,
    pub orbs: &'a [OrbVisual],
    pub particles: Option<&'a ParticleField>,
}

/// Rendering boundary: consumes a frame once the simulation has advanced.
pub trait FrameSink {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()>;
}

/// Discards frames; used when no GPU is available.
impl FrameSink for () {
    fn render(&mut self, _view: &SceneView<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// The whole interactive scene: cursor, background uniforms, physics world
/// and, once loaded, the orb and particle populations.
pub struct Simulation<W: PhysicsWorld> {
    params: SceneParams,
    world: W,
    cursor: CursorTracker,
    fluid: FluidUniforms,
    population: Option<Population<W::Handle>>,
    frames: u64,
}

impl<W: PhysicsWorld> Simulation<W> {
    pub fn new(params: SceneParams, world: W) -> Self {
        Self {
            params,
            world,
            cursor: CursorTracker::new(),
            fluid: FluidUniforms::default(),
            population: None,
            frames: 0,
        }
    }

    /// Build orbs and particles. Returns `false` (and builds nothing) if the
    /// scene is already populated.
    pub fn populate(&mut self) -> bool {
        if self.population.is_some() {
            log::warn!("[scene] populate called twice; keeping existing population");
            return false;
        }
        self.population = Some(build_population(&mut self.world, &self.params));
        true
    }

    pub fn is_populated(&self) -> bool {
        self.population.is_some()
    }

    pub fn pointer_move(&mut self, px: f32, py: f32, viewport: Viewport) {
        let sample = self.cursor.pointer_move(px, py, viewport);
        self.fluid.on_pointer_move(&sample);
    }

    pub fn pointer_down(&mut self) {
        self.cursor.pointer_down();
        self.fluid.set_pressed(true);
        log::debug!("[pointer] press");
    }

    pub fn pointer_up(&mut self) {
        self.cursor.pointer_up();
        self.fluid.set_pressed(false);
        log::debug!("[pointer] release");
    }

    /// Advance one display frame and hand the result to `sink`.
    ///
    /// Order: background time, physics step, orb sync, orb cursor forces,
    /// particle update, render. Orb forces are applied after the step, so
    /// they are integrated by the following tick.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, time_sec: f64, sink: &mut S) -> anyhow::Result<()> {
        self.fluid.set_time(time_sec);
        self.world.step(self.params.physics.dt);

        let cursor = self.cursor.state();
        if let Some(pop) = &mut self.population {
            pop.orbs.sync_from(&self.world);
            pop.orbs.apply_cursor_forces(&mut self.world, &cursor);
            pop.particles.update(&cursor, time_sec);
        }
        self.frames += 1;

        sink.render(&self.view())
    }

    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            time: self.fluid.time,
            fluid: &self.fluid,
            cursor: self.cursor.state(),
            orbs: self.orbs(),
            particles: self.particles(),
        }
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn cursor(&self) -> &CursorTracker {
        &self.cursor
    }

    pub fn fluid(&self) -> &FluidUniforms {
        &self.fluid
    }

    pub fn orbs(&self) -> &[OrbVisual] {
        self.population
            .as_ref()
            .map(|p| p.orbs.visuals())
            .unwrap_or(&[])
    }

    pub fn orb_handles(&self) -> &[W::Handle] {
        self.population
            .as_ref()
            .map(|p| p.orbs.handles())
            .unwrap_or(&[])
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.population.as_ref().map(|p| &p.particles)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
