use crate::constants::{STATS_ID, STATS_STYLE};
use crate::dom;
use scene_core::{FpsSample, FrameStats, StatsSink};
use web_sys as web;

/// Frame-rate readout pinned to the top-left corner.
pub struct StatsOverlay {
    el: web::Element,
    stats: FrameStats,
}

impl StatsOverlay {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let el = match document.get_element_by_id(STATS_ID) {
            Some(el) => el,
            None => {
                let el = document.create_element("div").map_err(dom::js_err)?;
                el.set_id(STATS_ID);
                el.set_attribute("style", STATS_STYLE).map_err(dom::js_err)?;
                dom::append_to_body(document, &el)?;
                el
            }
        };
        el.set_text_content(Some("-- FPS"));
        Ok(Self {
            el,
            stats: FrameStats::new(),
        })
    }
}

impl StatsSink for StatsOverlay {
    fn update(&mut self, now_secs: f32) {
        if let Some(sample) = self.stats.record(now_secs) {
            self.el.set_text_content(Some(&format_sample(&sample)));
        }
    }
}

fn format_sample(s: &FpsSample) -> String {
    format!("{:.0} FPS ({:.0}-{:.0})", s.fps, s.min, s.max)
}
