//! `SceneSession`: everything one rendered scene owns.
//!
//! A session is built once by an entry point and holds the scene graph,
//! parameters, control bindings, viewport and orbit state. There is no
//! process-wide state, so independent sessions can coexist.

use crate::camera::PerspectiveCamera;
use crate::composer::{
    add_logo_letter, compose_cube, compose_house, register_camera_params, Animation, Composition,
    LogicalObject,
};
use crate::config::HouseConfig;
use crate::constants::*;
use crate::controls::{Bounds, ControlBindings, ControlHandle, ControlInput, ControlPanel};
use crate::error::ParamError;
use crate::geometry::MeshData;
use crate::orbit::OrbitControls;
use crate::params::{ParamId, ParamValue, ParameterStore, SceneTargets};
use crate::scene::SceneGraph;
use crate::text::TextOptions;
use crate::viewport::{FullscreenHost, FullscreenOutcome, SurfaceMetrics, SurfaceSize, Viewport};
use glam::Vec3;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Cube,
    House,
}

impl SceneKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cube" => Some(SceneKind::Cube),
            "house" => Some(SceneKind::House),
            _ => None,
        }
    }
}

/// Cancellable handle for an in-flight asset load.
#[derive(Clone, Debug)]
pub struct AssetTicket {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl AssetTicket {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

/// What the host needs to fetch and build the logo letter.
#[derive(Clone, Debug)]
pub struct LogoLetterLoad {
    pub ticket: AssetTicket,
    pub url: String,
    pub text: &'static str,
    pub options: TextOptions,
}

pub struct SceneSession {
    kind: SceneKind,
    scene: SceneGraph,
    viewport: Viewport,
    orbit: OrbitControls,
    params: ParameterStore,
    bindings: ControlBindings,
    objects: Vec<LogicalObject>,
    animations: Vec<Animation>,
    camera_params: Option<[ParamId; 3]>,
    font_url: Option<String>,
    pending_letter: Option<AssetTicket>,
    next_ticket: u64,
    controls_bound: bool,
}

impl SceneSession {
    /// Spinning cube with an axes helper.
    pub fn cube(metrics: SurfaceMetrics) -> Self {
        let mut camera = PerspectiveCamera::new(
            CUBE_CAMERA_FOV_DEG,
            1.0,
            CUBE_CAMERA_NEAR,
            CUBE_CAMERA_FAR,
        );
        camera.position = Vec3::from(CUBE_CAMERA_EYE);
        let mut scene = SceneGraph::new();
        let composition = compose_cube(&mut scene);
        Self::assemble(SceneKind::Cube, scene, camera, metrics, composition)
    }

    /// House scene wired to its parameters. The logo letter is added later
    /// through [`SceneSession::begin_logo_letter`].
    pub fn house(config: &HouseConfig, metrics: SurfaceMetrics) -> Result<Self, ParamError> {
        let mut camera = PerspectiveCamera::new(
            HOUSE_CAMERA_FOV_DEG,
            1.0,
            HOUSE_CAMERA_NEAR,
            HOUSE_CAMERA_FAR,
        );
        let mut scene = SceneGraph::new();
        let mut params = ParameterStore::new();
        let (composition, camera_params) = {
            let mut targets = SceneTargets {
                scene: &mut scene,
                camera: &mut camera,
            };
            let composition = compose_house(config, &mut params, &mut targets)?;
            let camera_params = register_camera_params(
                &mut params,
                &mut targets,
                Vec3::from(config.camera_position),
            )?;
            (composition, camera_params)
        };
        let mut session = Self::assemble(SceneKind::House, scene, camera, metrics, composition);
        session.params = params;
        session.camera_params = Some(camera_params);
        session.font_url = config
            .load_logo_letter
            .then(|| config.font_url.clone());
        Ok(session)
    }

    pub fn new(
        kind: SceneKind,
        config: &HouseConfig,
        metrics: SurfaceMetrics,
    ) -> Result<Self, ParamError> {
        match kind {
            SceneKind::Cube => Ok(Self::cube(metrics)),
            SceneKind::House => Self::house(config, metrics),
        }
    }

    fn assemble(
        kind: SceneKind,
        scene: SceneGraph,
        mut camera: PerspectiveCamera,
        metrics: SurfaceMetrics,
        composition: Composition,
    ) -> Self {
        camera.look_at(Vec3::ZERO);
        let mut orbit = OrbitControls::new(Vec3::ZERO);
        orbit.enable_damping = true;
        log::info!(
            "[session] {:?} scene with {} meshes",
            kind,
            scene.mesh_count()
        );
        Self {
            kind,
            scene,
            viewport: Viewport::new(camera, metrics),
            orbit,
            params: ParameterStore::new(),
            bindings: ControlBindings::new(),
            objects: composition.objects,
            animations: composition.animations,
            camera_params: None,
            font_url: None,
            pending_letter: None,
            next_ticket: 0,
            controls_bound: false,
        }
    }

    // ---------------- Parameters ----------------

    pub fn param_id(&self, object: &str, name: &str) -> Option<ParamId> {
        self.params.id(object, name)
    }

    pub fn param(&self, object: &str, name: &str) -> Option<ParamValue> {
        self.params.id(object, name).and_then(|id| self.params.get(id))
    }

    pub fn set_param(&mut self, id: ParamId, value: ParamValue) -> Result<(), ParamError> {
        let mut targets = SceneTargets {
            scene: &mut self.scene,
            camera: self.viewport.camera_mut(),
        };
        self.params.set(id, value, &mut targets)
    }

    #[inline]
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    // ---------------- Control panel ----------------

    /// Register this scene's widgets on `panel`. Only the first call binds.
    pub fn bind_controls(&mut self, panel: &mut dyn ControlPanel) -> Result<(), ParamError> {
        if self.controls_bound {
            log::warn!("[controls] already bound; ignoring");
            return Ok(());
        }
        self.controls_bound = true;
        if self.kind != SceneKind::House {
            return Ok(());
        }

        let camera_bounds = Bounds::new(CAMERA_SLIDER_MIN, CAMERA_SLIDER_MAX, CAMERA_SLIDER_STEP);
        let roof_bounds = Bounds::new(ROOF_SLIDER_MIN, ROOF_SLIDER_MAX, ROOF_SLIDER_STEP);

        let camera_folder = panel.add_folder("camera", false);
        let house_folder = panel.add_folder("house", true);

        if let Some(ids) = self.camera_params {
            let labels = ["position x axis", "position y axis", "position z axis"];
            for (id, label) in ids.into_iter().zip(labels) {
                self.bindings.bind(
                    panel,
                    &self.params,
                    id,
                    Some(camera_folder),
                    label,
                    Some(camera_bounds),
                )?;
            }
        }

        let house_rows: [(&str, &str, &str, Option<Bounds>); 4] = [
            ("wall", "color", "wallColor", None),
            ("roof", "color", "roofColor", None),
            ("roof", "roof1PositionX", "roof1PositionX", Some(roof_bounds)),
            ("roof", "roofPositionY", "roofPositionY", Some(roof_bounds)),
        ];
        for (object, name, label, bounds) in house_rows {
            if let Some(id) = self.params.id(object, name) {
                self.bindings
                    .bind(panel, &self.params, id, Some(house_folder), label, bounds)?;
            }
        }

        if let Some(id) = self.params.id("ground", "color") {
            self.bindings
                .bind(panel, &self.params, id, None, "groundColor", None)?;
        }
        log::info!("[controls] {} widgets bound", self.bindings.len());
        Ok(())
    }

    /// Apply widget input: clamp per the binding, then set the parameter.
    pub fn apply_control(
        &mut self,
        handle: ControlHandle,
        input: ControlInput,
    ) -> Result<(), ParamError> {
        let (id, value) = self.bindings.resolve(&self.params, handle, input)?;
        self.set_param(id, value)
    }

    // ---------------- Viewport ----------------

    pub fn on_resize(&mut self, metrics: SurfaceMetrics) -> SurfaceSize {
        self.viewport.on_resize(metrics)
    }

    pub fn toggle_fullscreen(&self, host: &dyn FullscreenHost) -> FullscreenOutcome {
        self.viewport.toggle_fullscreen(host)
    }

    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.viewport.on_fullscreen_change(is_fullscreen);
    }

    // ---------------- Orbit input ----------------

    pub fn orbit_rotate(&mut self, dx: f32, dy: f32, element_height: f32) {
        self.orbit.rotate_by_pixels(dx, dy, element_height);
        self.update_orbit_undamped();
    }

    pub fn orbit_pan(&mut self, dx: f32, dy: f32, element_height: f32) {
        self.orbit
            .pan_by_pixels(dx, dy, element_height, self.viewport.camera());
        self.update_orbit_undamped();
    }

    pub fn orbit_dolly(&mut self, delta_y: f32) {
        self.orbit.dolly_by_wheel(delta_y);
        self.update_orbit_undamped();
    }

    // Without damping, input lands immediately instead of on the next frame.
    fn update_orbit_undamped(&mut self) {
        if !self.orbit.enable_damping && self.orbit.update(self.viewport.camera_mut()) {
            self.sync_camera_params();
        }
    }

    /// One damped orbit step (render loop stage 1).
    pub fn step_orbit(&mut self) {
        if self.orbit.enable_damping && self.orbit.update(self.viewport.camera_mut()) {
            self.sync_camera_params();
        }
    }

    // Keep `camera.x/y/z` equal to the eye after the orbit moved it.
    fn sync_camera_params(&mut self) {
        let Some(ids) = self.camera_params else {
            return;
        };
        let eye = self.viewport.camera().position.to_array();
        for (id, v) in ids.into_iter().zip(eye) {
            if let Err(e) = self.set_param(id, ParamValue::Number(v)) {
                log::warn!("[session] camera parameter out of sync: {}", e);
            }
        }
    }

    /// Time-driven animations (render loop stage 2).
    pub fn animate(&mut self, elapsed: f32) {
        for animation in &self.animations {
            animation.apply(&mut self.scene, elapsed);
        }
    }

    #[inline]
    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    #[inline]
    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    // ---------------- Logo letter ----------------

    /// Start the asynchronous logo-letter load, at most once per session.
    pub fn begin_logo_letter(&mut self) -> Option<LogoLetterLoad> {
        let url = self.font_url.take()?;
        let ticket = AssetTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.pending_letter = Some(ticket.clone());
        Some(LogoLetterLoad {
            ticket,
            url,
            text: LOGO_LETTER_TEXT,
            options: TextOptions {
                size: LOGO_LETTER_SIZE,
                depth: LOGO_LETTER_DEPTH,
                curve_segments: LOGO_LETTER_CURVE_SEGMENTS,
            },
        })
    }

    /// Insert the loaded letter if `ticket` is still the live request.
    pub fn complete_logo_letter(&mut self, ticket: &AssetTicket, data: MeshData) -> bool {
        let live = matches!(&self.pending_letter, Some(p) if p.id == ticket.id)
            && !ticket.is_cancelled();
        if !live {
            log::debug!("[session] dropping stale asset completion {}", ticket.id);
            return false;
        }
        self.pending_letter = None;
        let object = add_logo_letter(&mut self.scene, data);
        self.objects.push(object);
        log::info!("[session] logo letter inserted");
        true
    }

    #[inline]
    pub fn has_pending_asset(&self) -> bool {
        self.pending_letter.is_some()
    }

    /// Cancel outstanding loads so late completions are ignored.
    pub fn teardown(&mut self) {
        if let Some(ticket) = self.pending_letter.take() {
            ticket.cancel();
        }
    }

    // ---------------- Accessors ----------------

    #[inline]
    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    #[inline]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        self.viewport.camera()
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn object(&self, name: &str) -> Option<&LogicalObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    #[inline]
    pub fn objects(&self) -> &[LogicalObject] {
        &self.objects
    }
}

impl Drop for SceneSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
