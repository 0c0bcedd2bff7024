use crate::dom;
use crate::fullscreen::DomFullscreen;
use crate::input::{self, PointerDrag};
use scene_core::{FullscreenHost, FullscreenOutcome, SceneSession};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct EventWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<SceneSession>>,
}

pub fn wire_all(w: &EventWiring) {
    wire_resize(w);
    wire_fullscreen(w);
    wire_orbit_input(w);
}

fn sync_surface(canvas: &web::HtmlCanvasElement, session: &RefCell<SceneSession>) {
    let size = session
        .borrow_mut()
        .on_resize(dom::surface_metrics(canvas));
    dom::apply_surface_size(canvas, size);
}

fn wire_resize(w: &EventWiring) {
    let canvas = w.canvas.clone();
    let session = w.session.clone();
    dom::add_listener(w.window.as_ref(), "resize", move |_: web::Event| {
        sync_surface(&canvas, &session);
    });
}

fn wire_fullscreen(w: &EventWiring) {
    {
        let host = DomFullscreen {
            document: w.document.clone(),
            canvas: w.canvas.clone(),
        };
        let session = w.session.clone();
        dom::add_listener(w.window.as_ref(), "dblclick", move |_: web::MouseEvent| {
            match session.borrow().toggle_fullscreen(&host) {
                FullscreenOutcome::Requested { api, target } => {
                    log::debug!("[fullscreen] {:?} via {:?}", target, api)
                }
                FullscreenOutcome::Unsupported => log::info!("[fullscreen] not supported"),
            }
        });
    }
    for event in ["fullscreenchange", "webkitfullscreenchange"] {
        let host = DomFullscreen {
            document: w.document.clone(),
            canvas: w.canvas.clone(),
        };
        let session = w.session.clone();
        let canvas = w.canvas.clone();
        dom::add_listener(w.document.as_ref(), event, move |_: web::Event| {
            session
                .borrow_mut()
                .on_fullscreen_change(host.is_fullscreen());
            sync_surface(&canvas, &session);
        });
    }
}

fn wire_orbit_input(w: &EventWiring) {
    let drag = Rc::new(RefCell::new(PointerDrag::default()));
    let target: &web::EventTarget = w.canvas.as_ref();

    {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        dom::add_listener(target, "pointerdown", move |ev: web::PointerEvent| {
            let modifier = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
            let Some(mode) = input::drag_mode_for_button(ev.button(), modifier) else {
                return;
            };
            let at = input::pointer_css(&ev, &canvas);
            if drag.borrow_mut().begin(ev.pointer_id(), mode, at) {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
            }
        });
    }
    {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        let session = w.session.clone();
        dom::add_listener(target, "pointermove", move |ev: web::PointerEvent| {
            let at = input::pointer_css(&ev, &canvas);
            let Some((mode, delta)) = drag.borrow_mut().move_to(ev.pointer_id(), at) else {
                return;
            };
            let h = canvas.client_height() as f32;
            let mut s = session.borrow_mut();
            match mode {
                input::DragMode::Rotate => s.orbit_rotate(delta.x, delta.y, h),
                input::DragMode::Pan => s.orbit_pan(delta.x, delta.y, h),
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        dom::add_listener(target, event, move |ev: web::PointerEvent| {
            if drag.borrow_mut().end(ev.pointer_id()) {
                let _ = canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
    {
        let session = w.session.clone();
        dom::add_listener(target, "wheel", move |ev: web::WheelEvent| {
            ev.prevent_default();
            let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
            session.borrow_mut().orbit_dolly(dy);
        });
    }
    dom::add_listener(target, "contextmenu", |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}
