use crate::render;
use aether_core::{EnvironmentMap, RapierWorld, Simulation};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sim: Rc<RefCell<Simulation<RapierWorld>>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    /// Filled by the loader; taken and uploaded by the next frame.
    pub pending_environment: Rc<RefCell<Option<EnvironmentMap>>>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // Seconds since start keep the shader clock within f32 precision
        let elapsed = self.started.elapsed().as_secs_f64();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Some(env) = self.pending_environment.borrow_mut().take() {
                g.set_environment(&env);
            }
        }

        let mut sim = self.sim.borrow_mut();
        let result = match &mut self.gpu {
            Some(g) => sim.tick(elapsed, g),
            None => sim.tick(elapsed, &mut ()),
        };
        if let Err(e) = result {
            log::error!("[render] frame error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
