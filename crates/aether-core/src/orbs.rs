use crate::config::OrbForceParams;
use crate::cursor::CursorState;
use crate::physics::PhysicsWorld;
use glam::{Quat, Vec3};

/// Render-side state of one orb, synced from its physics body every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbVisual {
    pub position: Vec3,
    pub rotation: Quat,
    pub radius: f32,
    pub color: [f32; 3],
}

/// Cursor force on a body at `position`; zero outside the influence radius.
#[inline]
pub fn orb_cursor_force(position: Vec3, cursor: &CursorState, params: &OrbForceParams) -> Vec3 {
    let offset = position - cursor.world_position();
    let dist = offset.length();
    if dist >= params.influence_radius {
        return Vec3::ZERO;
    }
    let dir = offset.normalize_or_zero();
    let strength = 1.0 - dist / params.influence_radius;
    let scale = if cursor.pressed {
        -params.pull
    } else {
        params.push
    };
    dir * scale * strength
}

/// Orb population as parallel arrays: physics handles and their visuals.
#[derive(Clone, Debug)]
pub struct OrbField<H> {
    handles: Vec<H>,
    visuals: Vec<OrbVisual>,
    params: OrbForceParams,
}

impl<H: Copy + std::fmt::Debug> OrbField<H> {
    pub fn new(params: OrbForceParams) -> Self {
        Self {
            handles: Vec::new(),
            visuals: Vec::new(),
            params,
        }
    }

    pub(crate) fn push(&mut self, handle: H, visual: OrbVisual) {
        self.handles.push(handle);
        self.visuals.push(visual);
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn visuals(&self) -> &[OrbVisual] {
        &self.visuals
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    /// Copy body transforms onto the visuals.
    pub fn sync_from<W: PhysicsWorld<Handle = H>>(&mut self, world: &W) {
        for (visual, handle) in self.visuals.iter_mut().zip(&self.handles) {
            if let Some(t) = world.transform(*handle) {
                visual.position = t.position;
                visual.rotation = t.rotation;
            }
        }
    }

    /// Queue cursor forces for the next physics step.
    ///
    /// Distances are measured from the visuals, i.e. the positions synced
    /// after the most recent step.
    pub fn apply_cursor_forces<W: PhysicsWorld<Handle = H>>(
        &self,
        world: &mut W,
        cursor: &CursorState,
    ) {
        for (visual, handle) in self.visuals.iter().zip(&self.handles) {
            let force = orb_cursor_force(visual.position, cursor, &self.params);
            if force != Vec3::ZERO {
                world.apply_force(*handle, force);
            }
        }
    }
}
