//! Scene graph: geometry, material and mesh tables addressed by typed ids.
//!
//! Meshes refer to their material by id, so several meshes built against
//! the same [`MaterialId`] observe one color edit together. Every mutable
//! access bumps [`SceneGraph::revision`], which the renderer compares
//! against its last upload to decide when per-mesh uniforms are stale.

use crate::color::Color;
use crate::geometry::Geometry;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Unlit material: the mesh is drawn with a flat color.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
}

/// Position, XYZ Euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub name: String,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub transform: Transform,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
    meshes: Vec<Mesh>,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        self.revision += 1;
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_material(&mut self, color: Color) -> MaterialId {
        self.materials.push(Material { color });
        self.revision += 1;
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        geometry: GeometryId,
        material: MaterialId,
        transform: Transform,
    ) -> MeshId {
        self.meshes.push(Mesh {
            name: name.into(),
            geometry,
            material,
            transform,
        });
        self.revision += 1;
        MeshId(self.meshes.len() - 1)
    }

    #[inline]
    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    #[inline]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        let material = self.materials.get_mut(id.0)?;
        self.revision += 1;
        Some(material)
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        let mesh = self.meshes.get_mut(id.0)?;
        self.revision += 1;
        Some(mesh)
    }

    pub fn mesh_by_name(&self, name: &str) -> Option<(MeshId, &Mesh)> {
        self.meshes
            .iter()
            .enumerate()
            .find(|(_, m)| m.name == name)
            .map(|(i, m)| (MeshId(i), m))
    }

    /// Effective color of a mesh, resolved through its material.
    pub fn mesh_color(&self, id: MeshId) -> Option<Color> {
        let mesh = self.mesh(id)?;
        self.material(mesh.material).map(|m| m.color)
    }

    #[inline]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    #[inline]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    #[inline]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Monotonic counter bumped on every structural or attribute change.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
