use crate::constants::FLUID_CURSOR_INIT;
use crate::cursor::CursorSample;

/// Inputs of the fluid background shader.
///
/// `mouse` receives raw normalized device coordinates (-1..1) even though the
/// shader compares it against 0..1 plane UVs and it starts at the plane
/// centre. The two spaces are deliberately left un-unified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidUniforms {
    pub time: f32,
    pub mouse: [f32; 2],
    pub mouse_velocity: [f32; 2],
    pub pressed: bool,
}

impl Default for FluidUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            mouse: FLUID_CURSOR_INIT,
            mouse_velocity: [0.0, 0.0],
            pressed: false,
        }
    }
}

impl FluidUniforms {
    #[inline]
    pub fn set_time(&mut self, elapsed_sec: f64) {
        self.time = elapsed_sec as f32;
    }

    #[inline]
    pub fn on_pointer_move(&mut self, sample: &CursorSample) {
        self.mouse_velocity = sample.velocity.to_array();
        self.mouse = sample.position.to_array();
    }

    #[inline]
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}
