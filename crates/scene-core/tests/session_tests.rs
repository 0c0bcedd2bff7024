// Scene sessions: composition, panel wiring, asset tickets, resize.

use glam::Vec3;
use scene_core::*;

#[derive(Default)]
struct RecordingPanel {
    folders: Vec<(String, bool)>,
    widgets: Vec<(Option<FolderId>, String, Widget, ControlHandle)>,
}

impl RecordingPanel {
    fn handle(&self, label: &str) -> ControlHandle {
        self.widgets
            .iter()
            .find(|w| w.1 == label)
            .map(|w| w.3)
            .unwrap_or_else(|| panic!("no widget {label}"))
    }
}

impl ControlPanel for RecordingPanel {
    fn add_folder(&mut self, name: &str, open: bool) -> FolderId {
        self.folders.push((name.to_string(), open));
        FolderId(self.folders.len() - 1)
    }

    fn add_widget(
        &mut self,
        folder: Option<FolderId>,
        label: &str,
        widget: Widget,
        handle: ControlHandle,
    ) {
        self.widgets
            .push((folder, label.to_string(), widget, handle));
    }
}

fn metrics(w: f32, h: f32, dpr: f32) -> SurfaceMetrics {
    SurfaceMetrics {
        css_width: w,
        css_height: h,
        device_pixel_ratio: dpr,
    }
}

fn house() -> SceneSession {
    SceneSession::house(&HouseConfig::default(), metrics(800.0, 600.0, 1.0)).unwrap()
}

fn mesh_id(s: &SceneSession, name: &str) -> MeshId {
    s.scene().mesh_by_name(name).unwrap().0
}

fn position(s: &SceneSession, name: &str) -> Vec3 {
    s.scene().mesh_by_name(name).unwrap().1.transform.position
}

fn color(s: &SceneSession, name: &str) -> Color {
    s.scene().mesh_color(mesh_id(s, name)).unwrap()
}

fn letter_data() -> MeshData {
    MeshData::triangles(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![0, 1, 2],
    )
}

#[test]
fn scene_kind_names() {
    assert_eq!(SceneKind::from_name("cube"), Some(SceneKind::Cube));
    assert_eq!(SceneKind::from_name(" House "), Some(SceneKind::House));
    assert_eq!(SceneKind::from_name("barn"), None);
}

#[test]
fn house_starts_from_defaults() {
    let s = house();
    for name in ["wall", "wallTop1", "wallTop2", "ground", "roof1", "roof2", "logoRing"] {
        assert!(s.scene().mesh_by_name(name).is_some(), "missing {name}");
    }
    assert!(s.scene().mesh_by_name("logoLetter").is_none());
    assert_eq!(position(&s, "roof1").x, ROOF1_POSITION_X);
    assert_eq!(position(&s, "roof2").x, -ROOF1_POSITION_X);
    assert_eq!(position(&s, "roof1").y, ROOF_POSITION_Y);
    assert_eq!(position(&s, "roof2").y, ROOF_POSITION_Y);
    assert_eq!(color(&s, "ground"), Color::from_hex(GROUND_COLOR));
    assert_eq!(s.camera().position, Vec3::from(HOUSE_CAMERA_EYE));
    assert_eq!(
        s.param("roof", "color"),
        Some(ParamValue::Color(Color::from_hex(ROOF_COLOR)))
    );
    let wall = s.object("wall").unwrap();
    assert_eq!(wall.meshes.len(), 3);
}

#[test]
fn wall_color_recolors_body_and_both_gables() {
    let mut s = house();
    let id = s.param_id("wall", "color").unwrap();
    let blue = Color::from_hex(0x0000ff);
    s.set_param(id, ParamValue::Color(blue)).unwrap();
    assert_eq!(color(&s, "wall"), blue);
    assert_eq!(color(&s, "wallTop1"), blue);
    assert_eq!(color(&s, "wallTop2"), blue);
    assert_eq!(color(&s, "roof1"), Color::from_hex(ROOF_COLOR));
}

#[test]
fn panel_layout_matches_folders() {
    let mut s = house();
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();

    assert_eq!(
        panel.folders,
        vec![("camera".to_string(), false), ("house".to_string(), true)]
    );
    let labels: Vec<(Option<usize>, &str)> = panel
        .widgets
        .iter()
        .map(|w| (w.0.map(|f| f.0), w.1.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (Some(0), "position x axis"),
            (Some(0), "position y axis"),
            (Some(0), "position z axis"),
            (Some(1), "wallColor"),
            (Some(1), "roofColor"),
            (Some(1), "roof1PositionX"),
            (Some(1), "roofPositionY"),
            (None, "groundColor"),
        ]
    );
    assert_eq!(
        panel.widgets[5].2,
        Widget::Slider {
            initial: ROOF1_POSITION_X,
            bounds: Some(Bounds::new(-2.0, 2.0, 0.01))
        }
    );

    s.bind_controls(&mut panel).unwrap();
    assert_eq!(panel.widgets.len(), 8);
}

#[test]
fn roof_panels_stay_mirrored_across_the_slider_range() {
    let mut s = house();
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();
    let handle = panel.handle("roof1PositionX");
    for i in 0..=40 {
        let v = (i * 10 - 200) as f32 / 100.0;
        s.apply_control(handle, ControlInput::Number(v)).unwrap();
        let x1 = position(&s, "roof1").x;
        let x2 = position(&s, "roof2").x;
        assert_eq!(x2, -x1, "mirror broken at {v}");
        assert_eq!(x1, v);
    }
    s.apply_control(handle, ControlInput::Number(9.0)).unwrap();
    assert_eq!(position(&s, "roof1").x, 2.0);
}

#[test]
fn camera_slider_snaps_to_whole_units() {
    let mut s = house();
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();
    s.apply_control(panel.handle("position x axis"), ControlInput::Number(3.4))
        .unwrap();
    assert_eq!(s.camera().position.x, 3.0);
    assert_eq!(s.param("camera", "x"), Some(ParamValue::Number(3.0)));
}

#[test]
fn color_widget_rejects_numbers() {
    let mut s = house();
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();
    let err = s
        .apply_control(panel.handle("groundColor"), ControlInput::Number(1.0))
        .unwrap_err();
    assert!(matches!(err, ParamError::KindMismatch { .. }));
    assert_eq!(color(&s, "ground"), Color::from_hex(GROUND_COLOR));
}

#[test]
fn logo_letter_is_absent_until_load_completes() {
    let mut s = house();
    let load = s.begin_logo_letter().unwrap();
    assert_eq!(load.url, FONT_URL);
    assert_eq!(load.text, "A");
    assert!(s.has_pending_asset());
    assert!(s.begin_logo_letter().is_none());
    assert!(s.scene().mesh_by_name("logoLetter").is_none());

    let meshes = s.scene().mesh_count();
    assert!(s.complete_logo_letter(&load.ticket, letter_data()));
    assert_eq!(s.scene().mesh_count(), meshes + 1);
    assert!(!s.has_pending_asset());
    assert_eq!(
        color(&s, "logoLetter"),
        Color::from_hex(LOGO_LETTER_COLOR)
    );

    assert!(!s.complete_logo_letter(&load.ticket, letter_data()));
    assert_eq!(s.scene().mesh_count(), meshes + 1);
}

#[test]
fn cancelled_load_is_ignored() {
    let mut s = house();
    let load = s.begin_logo_letter().unwrap();
    s.teardown();
    assert!(load.ticket.is_cancelled());
    assert!(!s.complete_logo_letter(&load.ticket, letter_data()));
    assert!(s.scene().mesh_by_name("logoLetter").is_none());
}

#[test]
fn dropping_the_session_cancels_its_ticket() {
    let ticket = {
        let mut s = house();
        s.begin_logo_letter().unwrap().ticket
    };
    assert!(ticket.is_cancelled());
}

#[test]
fn config_can_skip_the_letter() {
    let config = HouseConfig::from_json(r#"{"loadLogoLetter": false, "roofColor": 16711680}"#)
        .unwrap();
    let mut s = SceneSession::house(&config, metrics(10.0, 10.0, 1.0)).unwrap();
    assert!(s.begin_logo_letter().is_none());
    assert_eq!(color(&s, "roof2"), Color::from_hex(0xff0000));
    assert_eq!(color(&s, "wall"), Color::from_hex(WALL_COLOR));
}

#[test]
fn cube_session_spins_and_has_no_controls() {
    let mut s = SceneSession::new(
        SceneKind::Cube,
        &HouseConfig::default(),
        metrics(640.0, 480.0, 1.0),
    )
    .unwrap();
    assert!(s.params().is_empty());
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();
    assert!(panel.widgets.is_empty() && panel.folders.is_empty());
    assert!(s.begin_logo_letter().is_none());

    s.animate(1.5);
    let rot = s.scene().mesh_by_name("cube").unwrap().1.transform.rotation;
    assert_eq!((rot.x, rot.y, rot.z), (1.5, 1.5, 0.0));
    assert_eq!(s.camera().position, Vec3::from(CUBE_CAMERA_EYE));
    assert_eq!(s.camera().fovy_degrees, CUBE_CAMERA_FOV_DEG);
}

#[test]
fn sessions_do_not_share_state() {
    let mut a = house();
    let b = house();
    let id = a.param_id("ground", "color").unwrap();
    a.set_param(id, ParamValue::Color(Color::BLACK)).unwrap();
    assert_eq!(color(&a, "ground"), Color::BLACK);
    assert_eq!(color(&b, "ground"), Color::from_hex(GROUND_COLOR));
}

#[test]
fn edit_then_resize_keeps_edits_and_exact_aspect() {
    let mut s = house();
    let mut panel = RecordingPanel::default();
    s.bind_controls(&mut panel).unwrap();
    s.apply_control(panel.handle("roof1PositionX"), ControlInput::Number(0.8))
        .unwrap();

    let size = s.on_resize(metrics(1280.0, 720.0, 2.5));
    assert_eq!(s.camera().aspect, 1280.0 / 720.0);
    assert_eq!(s.viewport().pixel_ratio(), 2.0);
    assert_eq!(
        size,
        SurfaceSize {
            width: 2560,
            height: 1440
        }
    );
    assert_eq!(color(&s, "wallTop1"), Color::from_hex(WALL_COLOR));
    assert_eq!(color(&s, "wallTop2"), Color::from_hex(WALL_COLOR));
    assert_eq!(position(&s, "roof1").x, 0.8);
    assert_eq!(position(&s, "roof2").x, -0.8);

    s.apply_control(panel.handle("roof1PositionX"), ControlInput::Number(-0.48))
        .unwrap();
    assert_eq!(position(&s, "roof1").x, -0.48);
    assert_eq!(position(&s, "roof2").x, 0.48);
    assert_eq!(
        s.param("roof", "roof1PositionX"),
        Some(ParamValue::Number(-0.48))
    );
}

#[test]
fn undamped_orbit_input_lands_immediately() {
    let mut s = house();
    s.orbit_mut().enable_damping = false;
    let before = s.camera().position;
    s.orbit_rotate(50.0, 0.0, 600.0);
    assert_ne!(s.camera().position, before);
    assert!((s.camera().position.length() - before.length()).abs() < 1e-4);
}

#[test]
fn orbiting_keeps_camera_params_on_the_eye() {
    let mut s = house();
    s.orbit_rotate(120.0, -40.0, 600.0);
    s.orbit_dolly(-100.0);
    for _ in 0..10 {
        s.step_orbit();
    }
    let eye = s.camera().position;
    assert_eq!(s.param("camera", "x"), Some(ParamValue::Number(eye.x)));
    assert_eq!(s.param("camera", "y"), Some(ParamValue::Number(eye.y)));
    assert_eq!(s.param("camera", "z"), Some(ParamValue::Number(eye.z)));

    s.orbit_mut().enable_damping = false;
    s.orbit_pan(30.0, 10.0, 600.0);
    let eye = s.camera().position;
    assert_eq!(s.param("camera", "x"), Some(ParamValue::Number(eye.x)));
    assert_eq!(s.param("camera", "z"), Some(ParamValue::Number(eye.z)));
}
