// Shared simulation and scene tuning constants used by the web and native frontends.

// Population
pub const ORB_COUNT: usize = 20;
pub const PARTICLE_COUNT: usize = 50_000;

// Cursor: normalized device coordinates are scaled by this to reach world space
pub const CURSOR_WORLD_SCALE: f32 = 50.0;
// Initial cursor uniform of the fluid background (and the first velocity reference)
pub const FLUID_CURSOR_INIT: [f32; 2] = [0.5, 0.5];

// Orb cursor forces (newtons, handed to the physics engine)
pub const ORB_INFLUENCE_RADIUS: f32 = 60.0;
pub const ORB_PULL_FORCE: f32 = 200.0;
pub const ORB_PUSH_FORCE: f32 = 80.0;

// Particle cursor impulses (added straight to velocity, no mass term)
pub const PARTICLE_RADIUS_IDLE: f32 = 60.0;
pub const PARTICLE_RADIUS_PRESSED: f32 = 85.0;
pub const PARTICLE_PULL_IMPULSE: f32 = 5.5;
pub const PARTICLE_PUSH_IMPULSE: f32 = 4.5;
pub const PARTICLE_JITTER: [f32; 3] = [5e-9, 5e-9, 1e-9];
pub const PARTICLE_DAMPING: f32 = 0.50; // velocity multiplier per frame
pub const PARTICLE_BOUNDS: [f32; 3] = [200.0, 200.0, 150.0];

// Twinkle
pub const TWINKLE_PROBABILITY: f64 = 0.001;
pub const TWINKLE_RATE: f64 = 5.0; // radians per second
pub const TWINKLE_FLOOR: f64 = 0.99995;

// Physics world
pub const PHYSICS_DT: f32 = 1.0 / 60.0;
pub const SOLVER_ITERATIONS: usize = 10;
pub const CONTACT_FRICTION: f32 = 0.1;
pub const CONTACT_RESTITUTION: f32 = 0.7;
pub const BODY_LINEAR_DAMPING: f32 = 0.1;
pub const BODY_ANGULAR_DAMPING: f32 = 0.1;

// Orb seeding
pub const ORB_RADIUS_MIN: f32 = 1.0;
pub const ORB_RADIUS_SPAN: f32 = 2.0;
pub const ORB_MASS_PER_RADIUS: f32 = 2.0;
pub const ORB_SPAWN_EXTENT: [f32; 3] = [80.0, 80.0, 20.0]; // full width of the spawn box
pub const ORB_SPAWN_SPEED: [f32; 3] = [2.0, 2.0, 1.0]; // full width of the initial velocity box
pub const ORB_OPACITY: f32 = 0.3;
pub const ORB_EMISSIVE: f32 = 0.8;
pub const ORB_ENV_INTENSITY: f32 = 3.0;

// Glass palette: white, light blue, lavender, mint, dusty rose
pub const ORB_PALETTE: [[f32; 3]; 5] = [
    [1.0, 1.0, 1.0],
    [0.902, 0.953, 1.0],
    [1.0, 0.941, 0.961],
    [0.941, 1.0, 0.957],
    [1.0, 0.961, 0.933],
];

// Particle seeding
pub const PARTICLE_SPAWN_DRIFT: [f32; 3] = [0.002, 0.002, 0.0005];
pub const PARTICLE_DEPTH_FALLOFF: f32 = 150.0;
pub const PARTICLE_MIN_DEPTH_BRIGHTNESS: f32 = 0.002;
pub const PARTICLE_MIN_DEPTH_SIZE: f32 = 0.008;
pub const PARTICLE_MAX_SIZE: f32 = 0.9;

// Camera
pub const CAMERA_Z: f32 = 50.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Atmosphere and lights
pub const CLEAR_COLOR: [f32; 3] = [0.039, 0.039, 0.039];
pub const FOG_COLOR: [f32; 3] = [0.039, 0.039, 0.039];
pub const FOG_NEAR: f32 = 50.0;
pub const FOG_FAR: f32 = 200.0;
pub const AMBIENT_COLOR: [f32; 3] = [0.502, 0.502, 0.502];
pub const AMBIENT_INTENSITY: f32 = 2.0;
pub const SUN_COLOR: [f32; 3] = [0.753, 0.878, 1.0];
pub const SUN_INTENSITY: f32 = 0.8;
pub const SUN_POSITION: [f32; 3] = [50.0, 70.0, 50.0];

// Fluid background plane
pub const FLUID_PLANE_SIZE: f32 = 200.0;
pub const FLUID_PLANE_Z: f32 = -10.0;

// Environment map tone mapping
pub const ENV_EXPOSURE: f32 = 1.0;
