//! Viewport controller: surface size, pixel ratio, camera aspect and the
//! windowed/fullscreen state machine.

use crate::camera::PerspectiveCamera;
use crate::constants::PIXEL_RATIO_MAX;

/// Host-reported size of the drawable element in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    pub css_width: f32,
    pub css_height: f32,
    pub device_pixel_ratio: f32,
}

/// Backing-store size the render surface should be configured with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FullscreenState {
    #[default]
    Windowed,
    Fullscreen,
}

/// Fullscreen API flavours, probed in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
}

impl FullscreenApi {
    pub const PROBE_ORDER: [FullscreenApi; 2] = [FullscreenApi::Standard, FullscreenApi::Webkit];
}

/// Host display capable of entering and leaving fullscreen.
///
/// `request`/`exit` return `false` when the given API flavour is absent.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request(&self, api: FullscreenApi) -> bool;
    fn exit(&self, api: FullscreenApi) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenOutcome {
    /// A transition towards `target` was requested through `api`.
    Requested {
        api: FullscreenApi,
        target: FullscreenState,
    },
    /// Neither API flavour is available; nothing happened.
    Unsupported,
}

#[derive(Debug)]
pub struct Viewport {
    camera: PerspectiveCamera,
    metrics: SurfaceMetrics,
    pixel_ratio: f32,
    surface: SurfaceSize,
    fullscreen: FullscreenState,
}

/// Effective pixel ratio for a host device pixel ratio.
#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(PIXEL_RATIO_MAX)
    } else {
        1.0
    }
}

impl Viewport {
    pub fn new(camera: PerspectiveCamera, metrics: SurfaceMetrics) -> Self {
        let mut viewport = Self {
            camera,
            metrics,
            pixel_ratio: 1.0,
            surface: SurfaceSize::default(),
            fullscreen: FullscreenState::Windowed,
        };
        viewport.on_resize(metrics);
        viewport
    }

    /// Recompute aspect, recommit the projection and size the surface.
    ///
    /// A zero-height element keeps the previous aspect so the projection
    /// never degenerates.
    pub fn on_resize(&mut self, metrics: SurfaceMetrics) -> SurfaceSize {
        self.metrics = metrics;
        if metrics.css_width > 0.0 && metrics.css_height > 0.0 {
            self.camera.aspect = metrics.css_width / metrics.css_height;
            self.camera.update_projection_matrix();
        }
        self.pixel_ratio = clamp_pixel_ratio(metrics.device_pixel_ratio);
        self.surface = SurfaceSize {
            width: ((metrics.css_width.max(0.0) * self.pixel_ratio).floor() as u32).max(1),
            height: ((metrics.css_height.max(0.0) * self.pixel_ratio).floor() as u32).max(1),
        };
        log::debug!(
            "[viewport] {}x{} css @{} -> {}x{} px",
            metrics.css_width,
            metrics.css_height,
            self.pixel_ratio,
            self.surface.width,
            self.surface.height
        );
        self.surface
    }

    /// Ask the host to flip between windowed and fullscreen.
    ///
    /// The current state is read from the host, then the standard API is
    /// tried before the vendor-prefixed one. With neither present this is a
    /// no-op.
    pub fn toggle_fullscreen(&self, host: &dyn FullscreenHost) -> FullscreenOutcome {
        let entering = !host.is_fullscreen();
        for api in FullscreenApi::PROBE_ORDER {
            let accepted = if entering {
                host.request(api)
            } else {
                host.exit(api)
            };
            if accepted {
                let target = if entering {
                    FullscreenState::Fullscreen
                } else {
                    FullscreenState::Windowed
                };
                return FullscreenOutcome::Requested { api, target };
            }
        }
        log::debug!("[viewport] fullscreen API unavailable");
        FullscreenOutcome::Unsupported
    }

    /// Record the state reported by the host's fullscreen-change event.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.fullscreen = if is_fullscreen {
            FullscreenState::Fullscreen
        } else {
            FullscreenState::Windowed
        };
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    #[inline]
    pub fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    #[inline]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface
    }

    #[inline]
    pub fn fullscreen(&self) -> FullscreenState {
        self.fullscreen
    }
}
