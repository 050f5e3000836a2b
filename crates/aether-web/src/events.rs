use crate::indicator;
use crate::input;
use aether_core::{RapierWorld, Simulation};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub document: web::Document,
    pub sim: Rc<RefCell<Simulation<RapierWorld>>>,
}

/// Pointer listeners on the window: move, press, release. Each feeds the
/// simulation and mirrors the state on the cursor indicator.
pub fn wire_input_handlers(w: InputWiring) {
    let Some(window) = web::window() else {
        log::warn!("[pointer] no window; input disabled");
        return;
    };

    // pointermove
    {
        let sim = w.sim.clone();
        let document = w.document.clone();
        let window_m = window.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let p = input::pointer_client_px(&ev);
            let viewport = input::window_viewport(&window_m);
            sim.borrow_mut().pointer_move(p.x, p.y, viewport);
            indicator::move_to(&document, p.x, p.y);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerdown
    {
        let sim = w.sim.clone();
        let document = w.document.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            sim.borrow_mut().pointer_down();
            indicator::set_pulling(&document, true);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup
    {
        let sim = w.sim.clone();
        let document = w.document.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            sim.borrow_mut().pointer_up();
            indicator::set_pulling(&document, false);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
