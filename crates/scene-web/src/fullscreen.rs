//! Fullscreen host backed by the DOM, probing the standard API first and
//! the `webkit`-prefixed one second.

use scene_core::{FullscreenApi, FullscreenHost};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct DomFullscreen {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
}

impl FullscreenHost for DomFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
            || js_sys::Reflect::get(&self.document, &JsValue::from_str("webkitFullscreenElement"))
                .map(|v| !v.is_null() && !v.is_undefined())
                .unwrap_or(false)
    }

    fn request(&self, api: FullscreenApi) -> bool {
        let method = match api {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
        };
        call_if_present(self.canvas.as_ref(), method)
    }

    fn exit(&self, api: FullscreenApi) -> bool {
        let method = match api {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
        };
        call_if_present(self.document.as_ref(), method)
    }
}

// Invoke `target[method]()` if it is a function. A returned promise is
// awaited only to keep rejections out of the console as uncaught errors.
fn call_if_present(target: &JsValue, method: &str) -> bool {
    let f = match js_sys::Reflect::get(target, &JsValue::from_str(method)) {
        Ok(f) if f.is_function() => f.unchecked_into::<js_sys::Function>(),
        _ => return false,
    };
    match f.call0(target) {
        Ok(ret) => {
            if let Ok(promise) = ret.dyn_into::<js_sys::Promise>() {
                let method = method.to_string();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("[fullscreen] {} rejected: {:?}", method, e);
                    }
                });
            }
            true
        }
        Err(e) => {
            log::debug!("[fullscreen] {} threw: {:?}", method, e);
            false
        }
    }
}
