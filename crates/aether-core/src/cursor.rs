use crate::constants::{CURSOR_WORLD_SCALE, FLUID_CURSOR_INIT};
use glam::{Vec2, Vec3};

/// Host viewport size in the same units as the pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Cursor position in normalized device coordinates plus press state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

impl CursorState {
    /// World-space cursor on the z = 0 plane.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.x * CURSOR_WORLD_SCALE, self.y * CURSOR_WORLD_SCALE, 0.0)
    }
}

/// Result of one pointer-move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorSample {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[inline]
pub fn normalize_pointer(px: f32, py: f32, viewport: Viewport) -> Vec2 {
    // Only degenerate viewports are guarded; off-screen pointers pass through unclamped
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    Vec2::new((px / w) * 2.0 - 1.0, -(py / h) * 2.0 + 1.0)
}

#[derive(Clone, Debug)]
pub struct CursorTracker {
    state: CursorState,
    prev: Vec2,
    velocity: Vec2,
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTracker {
    pub fn new() -> Self {
        Self {
            state: CursorState::default(),
            prev: Vec2::from(FLUID_CURSOR_INIT),
            velocity: Vec2::ZERO,
        }
    }

    /// Velocity is measured per event, against the previous event's position.
    pub fn pointer_move(&mut self, px: f32, py: f32, viewport: Viewport) -> CursorSample {
        let position = normalize_pointer(px, py, viewport);
        self.velocity = position - self.prev;
        self.prev = position;
        self.state.x = position.x;
        self.state.y = position.y;
        CursorSample {
            position,
            velocity: self.velocity,
        }
    }

    pub fn pointer_down(&mut self) {
        self.state.pressed = true;
    }

    pub fn pointer_up(&mut self) {
        self.state.pressed = false;
    }

    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}
