//! Geometry descriptions and their triangulated vertex data.
//!
//! A [`Geometry`] is the declarative shape a mesh was built from; the
//! renderer turns it into [`MeshData`] once per geometry id and uploads it.

use glam::Vec3;
use std::borrow::Cow;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Indexed vertex data with per-vertex colors (multiplied by the material).
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    /// Uncolored triangle list; every vertex color is white.
    pub fn triangles(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let colors = vec![[1.0; 3]; positions.len()];
        Self {
            positions,
            colors,
            indices,
            topology: Topology::Triangles,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centered on the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Rectangle in the XY plane centered on the origin.
    Plane { width: f32, height: f32 },
    /// Single triangle from explicit vertices.
    Triangle([Vec3; 3]),
    /// Flat annulus in the XY plane.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
    /// Red/green/blue line segments along +X/+Y/+Z.
    Axes { size: f32 },
    /// Pre-built vertex data (text, imported shapes).
    Mesh(MeshData),
}

impl Geometry {
    pub fn mesh_data(&self) -> Cow<'_, MeshData> {
        match self {
            Geometry::Box {
                width,
                height,
                depth,
            } => Cow::Owned(box_mesh(*width, *height, *depth)),
            Geometry::Plane { width, height } => Cow::Owned(plane_mesh(*width, *height)),
            Geometry::Triangle(v) => Cow::Owned(MeshData::triangles(
                v.iter().map(|p| p.to_array()).collect(),
                vec![0, 1, 2],
            )),
            Geometry::Ring {
                inner_radius,
                outer_radius,
                segments,
            } => Cow::Owned(ring_mesh(*inner_radius, *outer_radius, *segments)),
            Geometry::Axes { size } => Cow::Owned(axes_mesh(*size)),
            Geometry::Mesh(data) => Cow::Borrowed(data),
        }
    }
}

fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let positions = vec![
        [-x, -y, z],
        [x, -y, z],
        [x, y, z],
        [-x, y, z],
        [-x, -y, -z],
        [x, -y, -z],
        [x, y, -z],
        [-x, y, -z],
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, 0, 2, 3, // front
        5, 4, 7, 5, 7, 6, // back
        4, 0, 3, 4, 3, 7, // left
        1, 5, 6, 1, 6, 2, // right
        3, 2, 6, 3, 6, 7, // top
        4, 5, 1, 4, 1, 0, // bottom
    ];
    MeshData::triangles(positions, indices)
}

fn plane_mesh(width: f32, height: f32) -> MeshData {
    let (x, y) = (width / 2.0, height / 2.0);
    MeshData::triangles(
        vec![[-x, -y, 0.0], [x, -y, 0.0], [x, y, 0.0], [-x, y, 0.0]],
        vec![0, 1, 2, 0, 2, 3],
    )
}

fn ring_mesh(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
    for s in 0..=segments {
        let theta = s as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        positions.push([inner * cos, inner * sin, 0.0]);
        positions.push([outer * cos, outer * sin, 0.0]);
    }
    let mut indices = Vec::with_capacity(6 * segments as usize);
    for s in 0..segments {
        let i0 = 2 * s;
        let (o0, i1, o1) = (i0 + 1, i0 + 2, i0 + 3);
        indices.extend_from_slice(&[i0, o0, o1, i0, o1, i1]);
    }
    MeshData::triangles(positions, indices)
}

fn axes_mesh(size: f32) -> MeshData {
    let positions = vec![
        [0.0, 0.0, 0.0],
        [size, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, size, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, size],
    ];
    let colors = vec![
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ];
    MeshData {
        positions,
        colors,
        indices: (0..6).collect(),
        topology: Topology::Lines,
    }
}
