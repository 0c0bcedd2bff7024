use crate::dom;
use scene_core::{text_mesh, Font, LogoLetterLoad, MeshData, SceneSession};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetch the typeface, extrude the logo letter and hand it to the session
/// if it is still alive and the ticket was not cancelled in the meantime.
pub fn spawn_logo_letter_load(session: Weak<RefCell<SceneSession>>, load: LogoLetterLoad) {
    spawn_local(async move {
        let LogoLetterLoad {
            ticket,
            url,
            text,
            options,
        } = load;
        let mesh = match fetch_text(&url).await.and_then(|json| {
            let font = Font::from_json(&json)?;
            let mesh: MeshData = text_mesh(&font, text, &options)?;
            Ok(mesh)
        }) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::warn!("[assets] logo letter unavailable ({}): {:?}", url, e);
                return;
            }
        };
        if ticket.is_cancelled() {
            log::debug!("[assets] load of {} cancelled", url);
            return;
        }
        match session.upgrade() {
            Some(s) => {
                if s.borrow_mut().complete_logo_letter(&ticket, mesh) {
                    log::info!("[assets] logo letter inserted");
                }
            }
            None => log::debug!("[assets] session gone before {} resolved", url),
        }
    });
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(dom::js_err)?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("fetch did not yield a Response"))?;
    if !resp.ok() {
        anyhow::bail!("GET {} returned {}", url, resp.status());
    }
    let body = JsFuture::from(resp.text().map_err(dom::js_err)?)
        .await
        .map_err(dom::js_err)?;
    body.as_string()
        .ok_or_else(|| anyhow::anyhow!("response body is not text"))
}
