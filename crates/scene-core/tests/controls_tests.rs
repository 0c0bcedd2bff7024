// Control bindings: widget seeding, clamping and input resolution.

use scene_core::*;

#[derive(Default)]
struct RecordingPanel {
    folders: Vec<(String, bool)>,
    widgets: Vec<(Option<FolderId>, String, Widget, ControlHandle)>,
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

fn store_with_number(initial: f32) -> (ParameterStore, ParamId) {
    let mut scene = SceneGraph::new();
    let mut cam = PerspectiveCamera::new(45.0, 1.0, 0.1, 10.0);
    let mut store = ParameterStore::new();
    let id = store
        .register(
            "camera",
            "x",
            ParamValue::Number(initial),
            ParamTarget::CameraPosition(Axis::X),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    (store, id)
}

#[test]
fn bounds_clamp_and_snap() {
    let b = Bounds::new(-5.0, 5.0, 1.0);
    assert_eq!(b.apply(7.3), 5.0);
    assert_eq!(b.apply(-9.0), -5.0);
    assert_eq!(b.apply(2.4), 2.0);
    assert_eq!(b.apply(2.6), 3.0);

    let fine = Bounds::new(-2.0, 2.0, 0.01);
    assert_eq!(fine.apply(0.804), 0.8);
    assert_eq!(fine.apply(0.806), 0.81);
    assert_eq!(fine.apply(3.0), 2.0);

    let free = Bounds::new(0.0, 1.0, 0.0);
    assert_eq!(free.apply(0.123), 0.123);
}

#[test]
fn bounds_keep_values_already_on_the_grid() {
    let fine = Bounds::new(-2.0, 2.0, 0.01);
    assert_eq!(fine.apply(0.8), 0.8);
    assert_eq!(fine.apply(-0.48), -0.48);
    for i in 0..=400 {
        let v = (i - 200) as f32 / 100.0;
        assert_eq!(fine.apply(v).to_bits(), v.to_bits(), "{} was moved", v);
    }
}

#[test]
fn bind_seeds_slider_with_current_value() {
    let (store, id) = store_with_number(-2.0);
    let mut panel = RecordingPanel::default();
    let mut bindings = ControlBindings::new();
    let folder = panel.add_folder("camera", false);
    let bounds = Bounds::new(-5.0, 5.0, 1.0);
    let handle = bindings
        .bind(&mut panel, &store, id, Some(folder), "position x axis", Some(bounds))
        .unwrap();

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.param_for(handle), Some(id));
    let (f, label, widget, h) = &panel.widgets[0];
    assert_eq!(*f, Some(folder));
    assert_eq!(label, "position x axis");
    assert_eq!(
        *widget,
        Widget::Slider {
            initial: -2.0,
            bounds: Some(bounds)
        }
    );
    assert_eq!(*h, handle);
}

#[test]
fn resolve_clamps_numeric_input() {
    let (store, id) = store_with_number(0.0);
    let mut panel = RecordingPanel::default();
    let mut bindings = ControlBindings::new();
    let handle = bindings
        .bind(&mut panel, &store, id, None, "x", Some(Bounds::new(-5.0, 5.0, 1.0)))
        .unwrap();
    let (param, value) = bindings
        .resolve(&store, handle, ControlInput::Number(12.0))
        .unwrap();
    assert_eq!(param, id);
    assert_eq!(value, ParamValue::Number(5.0));
}

#[test]
fn resolve_rejects_wrong_input_kind_and_unknown_handle() {
    let (store, id) = store_with_number(0.0);
    let mut panel = RecordingPanel::default();
    let mut bindings = ControlBindings::new();
    let handle = bindings
        .bind(&mut panel, &store, id, None, "x", None)
        .unwrap();

    let err = bindings
        .resolve(&store, handle, ControlInput::Color(Color::BLACK))
        .unwrap_err();
    assert!(matches!(
        err,
        ParamError::KindMismatch {
            expected: ParamKind::Number,
            ..
        }
    ));

    let mut other = ControlBindings::new();
    let mut other_panel = RecordingPanel::default();
    other.bind(&mut other_panel, &store, id, None, "a", None).unwrap();
    let second = other.bind(&mut other_panel, &store, id, None, "b", None).unwrap();
    assert_eq!(
        bindings
            .resolve(&store, second, ControlInput::Number(1.0))
            .unwrap_err(),
        ParamError::UnknownControl(1)
    );
}
