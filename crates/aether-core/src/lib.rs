pub mod config;
pub mod constants;
pub mod cursor;
pub mod environment;
pub mod fluid;
pub mod orbs;
pub mod particles;
pub mod physics;
pub mod scene;
pub mod simulation;
pub mod state;

pub use config::*;
pub use constants::*;
pub use cursor::*;
pub use environment::*;
pub use fluid::*;
pub use orbs::*;
pub use particles::*;
pub use physics::*;
pub use scene::*;
pub use simulation::*;
pub use state::*;

// Shaders bundled as string constants
pub static FLUID_WGSL: &str = include_str!("../shaders/fluid.wgsl");
pub static ORBS_WGSL: &str = include_str!("../shaders/orbs.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
