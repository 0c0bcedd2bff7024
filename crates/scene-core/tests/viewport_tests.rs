// Viewport: resize, pixel-ratio cap, fullscreen probing.

use scene_core::*;
use std::cell::{Cell, RefCell};

fn metrics(w: f32, h: f32, dpr: f32) -> SurfaceMetrics {
    SurfaceMetrics {
        css_width: w,
        css_height: h,
        device_pixel_ratio: dpr,
    }
}

fn viewport(m: SurfaceMetrics) -> Viewport {
    Viewport::new(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0), m)
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(clamp_pixel_ratio(1.0), 1.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
}

#[test]
fn resize_sets_aspect_and_surface() {
    let mut vp = viewport(metrics(100.0, 100.0, 1.0));
    let size = vp.on_resize(metrics(800.0, 600.0, 3.0));
    assert_eq!(vp.camera().aspect, 800.0 / 600.0);
    assert_eq!(vp.pixel_ratio(), 2.0);
    assert_eq!(
        size,
        SurfaceSize {
            width: 1600,
            height: 1200
        }
    );
    assert_eq!(vp.surface_size(), size);
}

#[test]
fn resize_is_idempotent() {
    let mut vp = viewport(metrics(640.0, 480.0, 1.25));
    let first = vp.on_resize(metrics(1024.0, 768.0, 1.25));
    let proj = vp.camera().projection_matrix();
    let second = vp.on_resize(metrics(1024.0, 768.0, 1.25));
    assert_eq!(first, second);
    assert_eq!(vp.camera().projection_matrix(), proj);
}

#[test]
fn zero_height_keeps_previous_aspect() {
    let mut vp = viewport(metrics(400.0, 200.0, 1.0));
    let size = vp.on_resize(metrics(400.0, 0.0, 1.0));
    assert_eq!(vp.camera().aspect, 2.0);
    assert_eq!(size.height, 1);
    assert!(vp.camera().projection_matrix().is_finite());
}

struct FakeHost {
    fullscreen: bool,
    standard: bool,
    webkit: bool,
    calls: RefCell<Vec<(&'static str, FullscreenApi)>>,
    queries: Cell<u32>,
}

impl FakeHost {
    fn new(fullscreen: bool, standard: bool, webkit: bool) -> Self {
        Self {
            fullscreen,
            standard,
            webkit,
            calls: RefCell::new(Vec::new()),
            queries: Cell::new(0),
        }
    }

    fn has(&self, api: FullscreenApi) -> bool {
        match api {
            FullscreenApi::Standard => self.standard,
            FullscreenApi::Webkit => self.webkit,
        }
    }
}

impl FullscreenHost for FakeHost {
    fn is_fullscreen(&self) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.fullscreen
    }

    fn request(&self, api: FullscreenApi) -> bool {
        self.calls.borrow_mut().push(("request", api));
        self.has(api)
    }

    fn exit(&self, api: FullscreenApi) -> bool {
        self.calls.borrow_mut().push(("exit", api));
        self.has(api)
    }
}

#[test]
fn toggle_enters_with_standard_api_first() {
    let vp = viewport(metrics(100.0, 100.0, 1.0));
    let host = FakeHost::new(false, true, true);
    let outcome = vp.toggle_fullscreen(&host);
    assert_eq!(
        outcome,
        FullscreenOutcome::Requested {
            api: FullscreenApi::Standard,
            target: FullscreenState::Fullscreen
        }
    );
    assert_eq!(
        *host.calls.borrow(),
        vec![("request", FullscreenApi::Standard)]
    );
    assert_eq!(host.queries.get(), 1);
}

#[test]
fn toggle_falls_back_to_prefixed_exit() {
    let vp = viewport(metrics(100.0, 100.0, 1.0));
    let host = FakeHost::new(true, false, true);
    let outcome = vp.toggle_fullscreen(&host);
    assert_eq!(
        outcome,
        FullscreenOutcome::Requested {
            api: FullscreenApi::Webkit,
            target: FullscreenState::Windowed
        }
    );
    assert_eq!(
        *host.calls.borrow(),
        vec![
            ("exit", FullscreenApi::Standard),
            ("exit", FullscreenApi::Webkit)
        ]
    );
}

#[test]
fn toggle_without_any_api_is_a_no_op() {
    let mut vp = viewport(metrics(100.0, 100.0, 1.0));
    let host = FakeHost::new(false, false, false);
    assert_eq!(vp.toggle_fullscreen(&host), FullscreenOutcome::Unsupported);
    assert_eq!(vp.fullscreen(), FullscreenState::Windowed);

    vp.on_fullscreen_change(true);
    assert_eq!(vp.fullscreen(), FullscreenState::Fullscreen);
    vp.on_fullscreen_change(false);
    assert_eq!(vp.fullscreen(), FullscreenState::Windowed);
}
