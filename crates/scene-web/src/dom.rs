use scene_core::{SurfaceMetrics, SurfaceSize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Attach a typed listener for the lifetime of the page.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] cannot listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// CSS size of the canvas and the device pixel ratio.
pub fn surface_metrics(canvas: &web::HtmlCanvasElement) -> SurfaceMetrics {
    let device_pixel_ratio = web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .unwrap_or(1.0);
    SurfaceMetrics {
        css_width: canvas.client_width() as f32,
        css_height: canvas.client_height() as f32,
        device_pixel_ratio,
    }
}

/// Resize the canvas backing store; the renderer follows on its next frame.
pub fn apply_surface_size(canvas: &web::HtmlCanvasElement, size: SurfaceSize) {
    if canvas.width() != size.width {
        canvas.set_width(size.width);
    }
    if canvas.height() != size.height {
        canvas.set_height(size.height);
    }
}

pub fn append_to_body(document: &web::Document, el: &web::Element) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    body.append_child(el).map_err(js_err)?;
    Ok(())
}
