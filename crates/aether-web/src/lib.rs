#![cfg(target_arch = "wasm32")]
use aether_core::{populate_when_loaded, RapierWorld, SceneParams, Simulation};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod indicator;
mod input;
mod loader;
mod pack;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("aether-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(constants::CANVAS_ID)
        .or_else(|| document.get_element_by_id(constants::CANVAS_FALLBACK_ID))
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

fn scene_params(window: &web::Window) -> SceneParams {
    let search = window.location().search().unwrap_or_default();
    match SceneParams::from_query(&search) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[scene] ignoring query {:?}: {}", search, e);
            SceneParams::default()
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = find_canvas(&document)?;

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    dom::wire_canvas_resize(canvas.clone());

    let params = scene_params(&window);
    let world = RapierWorld::new(&params.physics);
    let sim = Rc::new(RefCell::new(Simulation::new(params, world)));

    events::wire_input_handlers(events::InputWiring {
        document: document.clone(),
        sim: sim.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let pending_environment = Rc::new(RefCell::new(None));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sim: sim.clone(),
        canvas,
        gpu,
        pending_environment: pending_environment.clone(),
        started: Instant::now(),
    }));
    // The background animates while the environment is still loading
    frame::start_loop(frame_ctx);

    spawn_local(async move {
        let load = loader::fetch_environment(constants::ENV_URL);
        match populate_when_loaded(load, |_| sim.borrow_mut().populate()).await {
            Ok((env, _)) => {
                *pending_environment.borrow_mut() = Some(env);
            }
            Err(e) => log::warn!("[env] environment load failed; orbs and particles stay unbuilt: {:?}", e),
        }
    });
    Ok(())
}
