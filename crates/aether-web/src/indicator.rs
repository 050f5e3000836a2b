use crate::constants::{CURSOR_INDICATOR_ID, PULLING_CLASS};
use wasm_bindgen::JsCast;
use web_sys as web;

fn element(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(CURSOR_INDICATOR_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Place the indicator at the pointer, in CSS pixels.
#[inline]
pub fn move_to(document: &web::Document, x: f32, y: f32) {
    if let Some(el) = element(document) {
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", x));
        let _ = style.set_property("top", &format!("{}px", y));
    }
}

#[inline]
pub fn set_pulling(document: &web::Document, pulling: bool) {
    if let Some(el) = element(document) {
        let _ = el.class_list().toggle_with_force(PULLING_CLASS, pulling);
    }
}
