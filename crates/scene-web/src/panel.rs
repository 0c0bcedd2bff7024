//! DOM control panel: collapsible folders of range sliders and color
//! swatches. Edits are forwarded to a sink with the widget's handle.

use crate::constants::{PANEL_ID, PANEL_LABEL_STYLE, PANEL_ROW_STYLE, PANEL_STYLE};
use crate::dom;
use scene_core::{Color, ControlHandle, ControlInput, ControlPanel, FolderId, Widget};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type ControlSink = Rc<dyn Fn(ControlHandle, ControlInput)>;

pub struct DomPanel {
    document: web::Document,
    root: web::Element,
    folders: Vec<web::Element>,
    sink: ControlSink,
}

impl DomPanel {
    pub fn new(document: &web::Document, sink: ControlSink) -> anyhow::Result<Self> {
        let root = document.create_element("div").map_err(dom::js_err)?;
        root.set_id(PANEL_ID);
        root.set_attribute("style", PANEL_STYLE)
            .map_err(dom::js_err)?;
        dom::append_to_body(document, &root)?;
        Ok(Self {
            document: document.clone(),
            root,
            folders: Vec::new(),
            sink,
        })
    }

    fn create_folder(&self, name: &str, open: bool) -> anyhow::Result<web::Element> {
        let details = self.document.create_element("details").map_err(dom::js_err)?;
        if open {
            details.set_attribute("open", "").map_err(dom::js_err)?;
        }
        let summary = self.document.create_element("summary").map_err(dom::js_err)?;
        summary.set_text_content(Some(name));
        details.append_child(&summary).map_err(dom::js_err)?;
        self.root.append_child(&details).map_err(dom::js_err)?;
        Ok(details)
    }

    fn create_widget(
        &self,
        folder: Option<FolderId>,
        label: &str,
        widget: Widget,
        handle: ControlHandle,
    ) -> anyhow::Result<()> {
        let parent = folder
            .and_then(|f| self.folders.get(f.0))
            .unwrap_or(&self.root);

        let row = self.document.create_element("div").map_err(dom::js_err)?;
        row.set_attribute("style", PANEL_ROW_STYLE).map_err(dom::js_err)?;
        let caption = self.document.create_element("span").map_err(dom::js_err)?;
        caption.set_attribute("style", PANEL_LABEL_STYLE).map_err(dom::js_err)?;
        caption.set_text_content(Some(label));
        row.append_child(&caption).map_err(dom::js_err)?;

        let input: web::HtmlInputElement = self
            .document
            .create_element("input")
            .map_err(dom::js_err)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("input element has unexpected type"))?;
        row.append_child(&input).map_err(dom::js_err)?;

        let sink = self.sink.clone();
        match widget {
            Widget::Slider { initial, bounds } => {
                let readout = self.document.create_element("span").map_err(dom::js_err)?;
                readout.set_text_content(Some(&format_number(initial)));
                match bounds {
                    Some(b) => {
                        input.set_type("range");
                        input.set_min(&b.min.to_string());
                        input.set_max(&b.max.to_string());
                        input.set_step(&b.step.to_string());
                    }
                    None => {
                        input.set_type("number");
                        input.set_step("any");
                    }
                }
                input.set_value(&initial.to_string());
                row.append_child(&readout).map_err(dom::js_err)?;

                let source = input.clone();
                dom::add_listener(input.as_ref(), "input", move |_: web::Event| {
                    match source.value().parse::<f32>() {
                        Ok(v) => {
                            readout.set_text_content(Some(&format_number(v)));
                            sink(handle, ControlInput::Number(v));
                        }
                        Err(_) => log::debug!("[panel] ignoring non-numeric input"),
                    }
                });
            }
            Widget::ColorSwatch { initial } => {
                input.set_type("color");
                input.set_value(&initial.to_css());
                let source = input.clone();
                dom::add_listener(input.as_ref(), "input", move |_: web::Event| {
                    if let Some(c) = Color::parse_css(&source.value()) {
                        sink(handle, ControlInput::Color(c));
                    }
                });
            }
        }
        parent.append_child(&row).map_err(dom::js_err)?;
        Ok(())
    }
}

impl ControlPanel for DomPanel {
    fn add_folder(&mut self, name: &str, open: bool) -> FolderId {
        let el = self.create_folder(name, open).unwrap_or_else(|e| {
            log::warn!("[panel] folder {} falls back to root: {:?}", name, e);
            self.root.clone()
        });
        self.folders.push(el);
        FolderId(self.folders.len() - 1)
    }

    fn add_widget(
        &mut self,
        folder: Option<FolderId>,
        label: &str,
        widget: Widget,
        handle: ControlHandle,
    ) {
        if let Err(e) = self.create_widget(folder, label, widget, handle) {
            log::warn!("[panel] widget {} not created: {:?}", label, e);
        }
    }
}

fn format_number(v: f32) -> String {
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
