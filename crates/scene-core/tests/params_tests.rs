// Parameter store: registration, synchronous propagation, kind checks.

use glam::Vec3;
use scene_core::*;
use smallvec::smallvec;

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)
}

#[test]
fn register_pushes_initial_value_into_target() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let material = scene.add_material(Color::WHITE);
    let mut store = ParameterStore::new();
    let mut targets = SceneTargets {
        scene: &mut scene,
        camera: &mut cam,
    };
    let id = store
        .register(
            "wall",
            "color",
            ParamValue::Color(Color::from_hex(0x123456)),
            ParamTarget::MaterialColor(material),
            &mut targets,
        )
        .unwrap();
    assert_eq!(store.id("wall", "color"), Some(id));
    assert_eq!(
        scene.material(material).unwrap().color,
        Color::from_hex(0x123456)
    );
}

#[test]
fn set_color_reaches_every_mesh_sharing_the_material() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let material = scene.add_material(Color::WHITE);
    let g = scene.add_geometry(Geometry::Plane {
        width: 1.0,
        height: 1.0,
    });
    let a = scene.add_mesh("a", g, material, Transform::default());
    let b = scene.add_mesh("b", g, material, Transform::default());
    let mut store = ParameterStore::new();
    let id = store
        .register(
            "obj",
            "color",
            ParamValue::Color(Color::WHITE),
            ParamTarget::MaterialColor(material),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();

    let red = Color::from_hex(0xff0000);
    store
        .set(
            id,
            ParamValue::Color(red),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    assert_eq!(scene.mesh_color(a), Some(red));
    assert_eq!(scene.mesh_color(b), Some(red));
    assert_eq!(store.get(id), Some(ParamValue::Color(red)));
}

#[test]
fn signed_position_targets_mirror_each_other() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let material = scene.add_material(Color::WHITE);
    let g = scene.add_geometry(Geometry::Plane {
        width: 1.0,
        height: 1.0,
    });
    let left = scene.add_mesh("left", g, material, Transform::default());
    let right = scene.add_mesh("right", g, material, Transform::default());
    let mut store = ParameterStore::new();
    let id = store
        .register(
            "pair",
            "x",
            ParamValue::Number(0.25),
            ParamTarget::MeshPosition {
                axis: Axis::X,
                meshes: smallvec![(left, 1.0), (right, -1.0)],
            },
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    assert_eq!(scene.mesh(left).unwrap().transform.position.x, 0.25);
    assert_eq!(scene.mesh(right).unwrap().transform.position.x, -0.25);

    store
        .set(
            id,
            ParamValue::Number(-1.5),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    assert_eq!(scene.mesh(left).unwrap().transform.position.x, -1.5);
    assert_eq!(scene.mesh(right).unwrap().transform.position.x, 1.5);
}

#[test]
fn camera_axis_target_moves_the_eye() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let mut store = ParameterStore::new();
    let id = store
        .register(
            "camera",
            "y",
            ParamValue::Number(3.0),
            ParamTarget::CameraPosition(Axis::Y),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    assert_eq!(cam.position, Vec3::new(0.0, 3.0, 0.0));
    store
        .set(
            id,
            ParamValue::Number(-2.0),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    assert_eq!(cam.position.y, -2.0);
}

#[test]
fn kind_mismatch_is_rejected_and_value_kept() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let material = scene.add_material(Color::WHITE);
    let mut store = ParameterStore::new();

    let bad = store.register(
        "wall",
        "color",
        ParamValue::Number(1.0),
        ParamTarget::MaterialColor(material),
        &mut SceneTargets {
            scene: &mut scene,
            camera: &mut cam,
        },
    );
    assert!(matches!(bad, Err(ParamError::KindMismatch { .. })));
    assert!(store.is_empty());

    let id = store
        .register(
            "wall",
            "color",
            ParamValue::Color(Color::WHITE),
            ParamTarget::MaterialColor(material),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    let err = store
        .set(
            id,
            ParamValue::Number(0.5),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        ParamError::KindMismatch {
            name: "color".to_string(),
            expected: ParamKind::Color
        }
    );
    assert_eq!(store.get(id), Some(ParamValue::Color(Color::WHITE)));
}

#[test]
fn setting_unknown_id_fails() {
    let mut scene = SceneGraph::new();
    let mut cam = camera();
    let mut store = ParameterStore::new();
    let mut other = ParameterStore::new();
    let id = other
        .register(
            "camera",
            "x",
            ParamValue::Number(0.0),
            ParamTarget::CameraPosition(Axis::X),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap();
    let err = store
        .set(
            id,
            ParamValue::Number(1.0),
            &mut SceneTargets {
                scene: &mut scene,
                camera: &mut cam,
            },
        )
        .unwrap_err();
    assert_eq!(err, ParamError::UnknownParameter(0));
}
