use aether_core::Viewport;
use glam::Vec2;
use web_sys as web;

/// The pointer in window CSS pixels. The cursor is normalized against the
/// whole window, not the canvas rect.
#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn window_viewport(window: &web::Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}
