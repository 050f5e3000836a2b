// Browser glue and renderer tuning constants

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const CANVAS_FALLBACK_ID: &str = "canvas";
pub const CURSOR_INDICATOR_ID: &str = "cursorIndicator";
pub const PULLING_CLASS: &str = "pulling";

// Equirectangular environment used for orb reflections
pub const ENV_URL: &str =
    "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/venice_sunset_1k.hdr";

// Orb mesh tessellation
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_RINGS: u32 = 32;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
