#![cfg(target_arch = "wasm32")]
use scene_core::{Clock, HouseConfig, RenderLoop, SceneKind, SceneSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod fullscreen;
mod input;
mod overlay;
mod panel;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let kind = canvas
        .get_attribute(constants::SCENE_ATTR)
        .and_then(|name| SceneKind::from_name(&name))
        .unwrap_or(SceneKind::House);
    let config = read_house_config(&canvas);
    log::info!("[init] scene {:?}", kind);

    let session = SceneSession::new(kind, &config, dom::surface_metrics(&canvas))?;
    dom::apply_surface_size(&canvas, session.viewport().surface_size());
    let session = Rc::new(RefCell::new(session));

    events::wire_all(&events::EventWiring {
        window: window.clone(),
        document: document.clone(),
        canvas: canvas.clone(),
        session: session.clone(),
    });

    let mut stats = None;
    if kind == SceneKind::House {
        stats = overlay::StatsOverlay::new(&document)
            .map_err(|e| log::warn!("[init] stats overlay unavailable: {:?}", e))
            .ok();
        bind_panel(&document, &session)?;
    }

    let letter = session.borrow_mut().begin_logo_letter();
    if let Some(load) = letter {
        assets::spawn_logo_letter_load(Rc::downgrade(&session), load);
    }

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        render_loop: RenderLoop::new(Clock::start()),
        gpu,
        stats,
        canvas,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

fn read_house_config(canvas: &web::HtmlCanvasElement) -> HouseConfig {
    match canvas.get_attribute(constants::CONFIG_ATTR) {
        Some(json) => HouseConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("[init] ignoring {}: {}", constants::CONFIG_ATTR, e);
            HouseConfig::default()
        }),
        None => HouseConfig::default(),
    }
}

fn bind_panel(document: &web::Document, session: &Rc<RefCell<SceneSession>>) -> anyhow::Result<()> {
    let weak = Rc::downgrade(session);
    let sink: panel::ControlSink = Rc::new(move |handle, input| {
        let Some(s) = weak.upgrade() else {
            return;
        };
        if let Err(e) = s.borrow_mut().apply_control(handle, input) {
            log::warn!("[panel] {:?}", e);
        }
    });
    let mut dom_panel = panel::DomPanel::new(document, sink)?;
    session.borrow_mut().bind_controls(&mut dom_panel)?;
    Ok(())
}
