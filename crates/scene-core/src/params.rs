//! Reactive parameter store.
//!
//! A [`Parameter`] owns a backing value and a [`ParamTarget`] describing the
//! live graphics attributes it drives. [`ParameterStore::set`] stores the
//! value and writes every bound attribute before returning, so a read of
//! the attribute right after `set` always matches the backing value.

use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::error::ParamError;
use crate::scene::{MaterialId, MeshId, SceneGraph};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(Color),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    Color,
}

impl ParamValue {
    #[inline]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Color(_) => ParamKind::Color,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match *self {
            ParamValue::Number(v) => Some(v),
            ParamValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            ParamValue::Color(c) => Some(c),
            ParamValue::Number(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    fn write(self, v: &mut glam::Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// Graphics attributes a parameter pushes its value into.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamTarget {
    /// Color of one material (and therefore every mesh sharing it).
    MaterialColor(MaterialId),
    /// One position axis on several meshes; each mesh gets `value * sign`.
    MeshPosition {
        axis: Axis,
        meshes: SmallVec<[(MeshId, f32); 2]>,
    },
    /// One axis of the camera eye.
    CameraPosition(Axis),
}

impl ParamTarget {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamTarget::MaterialColor(_) => ParamKind::Color,
            ParamTarget::MeshPosition { .. } | ParamTarget::CameraPosition(_) => ParamKind::Number,
        }
    }
}

/// Mutable state a parameter write may touch.
pub struct SceneTargets<'a> {
    pub scene: &'a mut SceneGraph,
    pub camera: &'a mut PerspectiveCamera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamId(usize);

impl ParamId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub object: String,
    pub name: String,
    value: ParamValue,
    target: ParamTarget,
}

impl Parameter {
    #[inline]
    pub fn get(&self) -> ParamValue {
        self.value
    }

    #[inline]
    pub fn kind(&self) -> ParamKind {
        self.value.kind()
    }

    #[inline]
    pub fn target(&self) -> &ParamTarget {
        &self.target
    }

    fn write(&mut self, value: ParamValue, targets: &mut SceneTargets<'_>) -> Result<(), ParamError> {
        if value.kind() != self.kind() {
            return Err(ParamError::KindMismatch {
                name: self.name.clone(),
                expected: self.kind(),
            });
        }
        self.value = value;
        match (&self.target, value) {
            (ParamTarget::MaterialColor(id), ParamValue::Color(color)) => {
                if let Some(material) = targets.scene.material_mut(*id) {
                    material.color = color;
                }
            }
            (ParamTarget::MeshPosition { axis, meshes }, ParamValue::Number(v)) => {
                for (id, sign) in meshes {
                    if let Some(mesh) = targets.scene.mesh_mut(*id) {
                        axis.write(&mut mesh.transform.position, v * sign);
                    }
                }
            }
            (ParamTarget::CameraPosition(axis), ParamValue::Number(v)) => {
                axis.write(&mut targets.camera.position, v);
            }
            // Kinds were checked against the target at registration.
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ParameterStore {
    params: Vec<Parameter>,
    by_name: FnvHashMap<(String, String), ParamId>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter and immediately push `initial` into its target.
    ///
    /// Returns `KindMismatch` if `initial` does not fit the target kind.
    pub fn register(
        &mut self,
        object: &str,
        name: &str,
        initial: ParamValue,
        target: ParamTarget,
        targets: &mut SceneTargets<'_>,
    ) -> Result<ParamId, ParamError> {
        if initial.kind() != target.kind() {
            return Err(ParamError::KindMismatch {
                name: name.to_string(),
                expected: target.kind(),
            });
        }
        let mut param = Parameter {
            object: object.to_string(),
            name: name.to_string(),
            value: initial,
            target,
        };
        param.write(initial, targets)?;
        let id = ParamId(self.params.len());
        self.params.push(param);
        self.by_name
            .insert((object.to_string(), name.to_string()), id);
        Ok(id)
    }

    pub fn id(&self, object: &str, name: &str) -> Option<ParamId> {
        self.by_name
            .get(&(object.to_string(), name.to_string()))
            .copied()
    }

    #[inline]
    pub fn param(&self, id: ParamId) -> Option<&Parameter> {
        self.params.get(id.0)
    }

    pub fn get(&self, id: ParamId) -> Option<ParamValue> {
        self.param(id).map(Parameter::get)
    }

    /// Store `value` and propagate it to every bound attribute.
    pub fn set(
        &mut self,
        id: ParamId,
        value: ParamValue,
        targets: &mut SceneTargets<'_>,
    ) -> Result<(), ParamError> {
        let param = self
            .params
            .get_mut(id.0)
            .ok_or(ParamError::UnknownParameter(id.0))?;
        let result = param.write(value, targets);
        if result.is_ok() {
            log::debug!("[params] {}.{} = {:?}", param.object, param.name, value);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &Parameter)> {
        self.params.iter().enumerate().map(|(i, p)| (ParamId(i), p))
    }
}
