//! Scene composer: builds the fixed cube and house scenes.
//!
//! Objects whose parts must recolor together are built against one
//! material id. Every mutable attribute the control panel can reach is
//! registered as a parameter while the scene is assembled.

use crate::color::Color;
use crate::config::HouseConfig;
use crate::constants::*;
use crate::error::ParamError;
use crate::geometry::{Geometry, MeshData};
use crate::params::{Axis, ParamId, ParamTarget, ParamValue, ParameterStore, SceneTargets};
use crate::scene::{MaterialId, MeshId, SceneGraph, Transform};
use glam::Vec3;
use smallvec::{smallvec, SmallVec};
use std::f32::consts::PI;

/// Named group of meshes sharing one material, plus its parameters.
#[derive(Clone, Debug)]
pub struct LogicalObject {
    pub name: &'static str,
    pub meshes: SmallVec<[MeshId; 3]>,
    pub material: MaterialId,
    pub params: SmallVec<[ParamId; 3]>,
}

/// Time-driven mesh animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animation {
    /// Sets X and Y rotation to the elapsed seconds.
    Spin { mesh: MeshId },
}

impl Animation {
    pub fn apply(&self, scene: &mut SceneGraph, elapsed: f32) {
        match *self {
            Animation::Spin { mesh } => {
                if let Some(m) = scene.mesh_mut(mesh) {
                    m.transform.rotation.x = elapsed;
                    m.transform.rotation.y = elapsed;
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Composition {
    pub objects: Vec<LogicalObject>,
    pub animations: Vec<Animation>,
}

fn at(position: Vec3) -> Transform {
    Transform {
        position,
        ..Transform::default()
    }
}

fn posed(position: Vec3, rotation: Vec3) -> Transform {
    Transform {
        position,
        rotation,
        ..Transform::default()
    }
}

/// Axes helper and a spinning white cube.
pub fn compose_cube(scene: &mut SceneGraph) -> Composition {
    let axes_geometry = scene.add_geometry(Geometry::Axes {
        size: AXES_HELPER_SIZE,
    });
    let axes_material = scene.add_material(Color::WHITE);
    let axes = scene.add_mesh("axes", axes_geometry, axes_material, Transform::default());

    let cube_geometry = scene.add_geometry(Geometry::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    });
    let cube_material = scene.add_material(Color::from_hex(CUBE_COLOR));
    let cube = scene.add_mesh("cube", cube_geometry, cube_material, Transform::default());

    Composition {
        objects: vec![
            LogicalObject {
                name: "axes",
                meshes: smallvec![axes],
                material: axes_material,
                params: SmallVec::new(),
            },
            LogicalObject {
                name: "cube",
                meshes: smallvec![cube],
                material: cube_material,
                params: SmallVec::new(),
            },
        ],
        animations: vec![Animation::Spin { mesh: cube }],
    }
}

/// Camera eye sliders. Returns ids for x, y and z.
pub fn register_camera_params(
    store: &mut ParameterStore,
    targets: &mut SceneTargets<'_>,
    eye: Vec3,
) -> Result<[ParamId; 3], ParamError> {
    Ok([
        store.register(
            "camera",
            "x",
            ParamValue::Number(eye.x),
            ParamTarget::CameraPosition(Axis::X),
            targets,
        )?,
        store.register(
            "camera",
            "y",
            ParamValue::Number(eye.y),
            ParamTarget::CameraPosition(Axis::Y),
            targets,
        )?,
        store.register(
            "camera",
            "z",
            ParamValue::Number(eye.z),
            ParamTarget::CameraPosition(Axis::Z),
            targets,
        )?,
    ])
}

/// Wall with gables, ground, roof pair and logo ring.
pub fn compose_house(
    config: &HouseConfig,
    store: &mut ParameterStore,
    targets: &mut SceneTargets<'_>,
) -> Result<Composition, ParamError> {
    let mut objects = Vec::new();

    // Wall body and both gables share one material.
    let wall_material = targets.scene.add_material(config.wall_color);
    let wall_body_geometry = targets.scene.add_geometry(Geometry::Box {
        width: WALL_WIDTH,
        height: WALL_HEIGHT,
        depth: WALL_DEPTH,
    });
    let wall_body = targets.scene.add_mesh(
        "wall",
        wall_body_geometry,
        wall_material,
        at(Vec3::new(0.0, WALL_HEIGHT / 2.0, 0.0)),
    );
    let gable_geometry = targets.scene.add_geometry(Geometry::Triangle([
        Vec3::new(-WALL_WIDTH / 2.0, 0.0, 0.0),
        Vec3::new(WALL_WIDTH / 2.0, 0.0, 0.0),
        Vec3::new(0.0, gable_height(WALL_WIDTH), 0.0),
    ]));
    let wall_top1 = targets.scene.add_mesh(
        "wallTop1",
        gable_geometry,
        wall_material,
        at(Vec3::new(0.0, WALL_HEIGHT, WALL_DEPTH / 2.0)),
    );
    let wall_top2 = targets.scene.add_mesh(
        "wallTop2",
        gable_geometry,
        wall_material,
        posed(
            Vec3::new(0.0, WALL_HEIGHT, -WALL_DEPTH / 2.0),
            Vec3::new(0.0, PI, 0.0),
        ),
    );
    let wall_color = store.register(
        "wall",
        "color",
        ParamValue::Color(config.wall_color),
        ParamTarget::MaterialColor(wall_material),
        targets,
    )?;
    objects.push(LogicalObject {
        name: "wall",
        meshes: smallvec![wall_body, wall_top1, wall_top2],
        material: wall_material,
        params: smallvec![wall_color],
    });

    // Ground
    let ground_material = targets.scene.add_material(config.ground_color);
    let ground_geometry = targets.scene.add_geometry(Geometry::Plane {
        width: GROUND_SIZE,
        height: GROUND_SIZE,
    });
    let ground = targets.scene.add_mesh(
        "ground",
        ground_geometry,
        ground_material,
        posed(Vec3::ZERO, Vec3::new(-PI * 0.5, 0.0, 0.0)),
    );
    let ground_color = store.register(
        "ground",
        "color",
        ParamValue::Color(config.ground_color),
        ParamTarget::MaterialColor(ground_material),
        targets,
    )?;
    objects.push(LogicalObject {
        name: "ground",
        meshes: smallvec![ground],
        material: ground_material,
        params: smallvec![ground_color],
    });

    // Roof: two mirrored panels on one material.
    let roof_material = targets.scene.add_material(config.roof_color);
    let roof_geometry = targets.scene.add_geometry(Geometry::Box {
        width: roof_width(WALL_WIDTH),
        height: ROOF_HEIGHT,
        depth: ROOF_DEPTH,
    });
    let roof1 = targets.scene.add_mesh(
        "roof1",
        roof_geometry,
        roof_material,
        posed(Vec3::ZERO, Vec3::new(-PI * 0.5, -PI / 6.0, 0.0)),
    );
    let roof2 = targets.scene.add_mesh(
        "roof2",
        roof_geometry,
        roof_material,
        posed(Vec3::ZERO, Vec3::new(-PI * 0.5, PI / 6.0, 0.0)),
    );
    let roof_color = store.register(
        "roof",
        "color",
        ParamValue::Color(config.roof_color),
        ParamTarget::MaterialColor(roof_material),
        targets,
    )?;
    let roof1_x = store.register(
        "roof",
        "roof1PositionX",
        ParamValue::Number(config.roof1_position_x),
        ParamTarget::MeshPosition {
            axis: Axis::X,
            meshes: smallvec![(roof1, 1.0), (roof2, -1.0)],
        },
        targets,
    )?;
    let roof_y = store.register(
        "roof",
        "roofPositionY",
        ParamValue::Number(config.roof_position_y),
        ParamTarget::MeshPosition {
            axis: Axis::Y,
            meshes: smallvec![(roof1, 1.0), (roof2, 1.0)],
        },
        targets,
    )?;
    objects.push(LogicalObject {
        name: "roof",
        meshes: smallvec![roof1, roof2],
        material: roof_material,
        params: smallvec![roof_color, roof1_x, roof_y],
    });

    // Logo ring on the front face.
    let ring_material = targets
        .scene
        .add_material(Color::from_hex(LOGO_RING_COLOR));
    let ring_geometry = targets.scene.add_geometry(Geometry::Ring {
        inner_radius: LOGO_RING_INNER,
        outer_radius: LOGO_RING_OUTER,
        segments: LOGO_RING_SEGMENTS,
    });
    let ring = targets.scene.add_mesh(
        "logoRing",
        ring_geometry,
        ring_material,
        at(Vec3::new(
            0.0,
            LOGO_RING_Y,
            WALL_DEPTH / 2.0 + LOGO_RING_Z_NUDGE,
        )),
    );
    objects.push(LogicalObject {
        name: "logoRing",
        meshes: smallvec![ring],
        material: ring_material,
        params: SmallVec::new(),
    });

    Ok(Composition {
        objects,
        animations: Vec::new(),
    })
}

/// Insert the extruded logo letter once its font has loaded.
pub fn add_logo_letter(scene: &mut SceneGraph, data: MeshData) -> LogicalObject {
    let material = scene.add_material(Color::from_hex(LOGO_LETTER_COLOR));
    let geometry = scene.add_geometry(Geometry::Mesh(data));
    let mesh = scene.add_mesh("logoLetter", geometry, material, Transform::default());
    LogicalObject {
        name: "logoLetter",
        meshes: smallvec![mesh],
        material,
        params: SmallVec::new(),
    }
}
