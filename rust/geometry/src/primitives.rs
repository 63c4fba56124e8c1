// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive mesh generation: rectangular prisms and horizontal planes
//!
//! Every face is emitted as its own 4-vertex quad so normals stay flat and
//! each face gets its own `[0, 1]` texture square. Texture tiling is applied
//! afterwards with [`scale_uvs_to_tiles`].

use crate::mesh::Mesh;
use nalgebra::{Point2, Point3, Vector3};

/// Which way a horizontal plane faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Normal +Y (floors)
    Up,
    /// Normal -Y (ceilings)
    Down,
}

/// One quad of a primitive: outward normal plus the in-plane U and V axes.
/// `u × v == normal` so triangles wind counter-clockwise seen from outside.
struct Face {
    normal: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
}

/// The six quads of an axis-aligned box
fn box_faces() -> [Face; 6] {
    let face = |normal: Vector3<f64>, u: Vector3<f64>, v: Vector3<f64>| Face { normal, u, v };
    [
        face(Vector3::x(), -Vector3::z(), Vector3::y()),
        face(-Vector3::x(), Vector3::z(), Vector3::y()),
        face(Vector3::y(), Vector3::x(), -Vector3::z()),
        face(-Vector3::y(), Vector3::x(), Vector3::z()),
        face(Vector3::z(), Vector3::x(), Vector3::y()),
        face(-Vector3::z(), -Vector3::x(), Vector3::y()),
    ]
}

/// Half-extent of a box along a (signed) unit axis
#[inline]
fn extent_along(axis: &Vector3<f64>, half: &Vector3<f64>) -> f64 {
    axis.x.abs() * half.x + axis.y.abs() * half.y + axis.z.abs() * half.z
}

/// Append one quad to the mesh
///
/// Vertices are laid out as a 2x2 grid (top-left, top-right, bottom-left,
/// bottom-right) with `v = 1` on the top row.
fn push_face(mesh: &mut Mesh, face: &Face, half: &Vector3<f64>) {
    let hn = extent_along(&face.normal, half);
    let hu = extent_along(&face.u, half);
    let hv = extent_along(&face.v, half);
    let base = mesh.vertex_count() as u32;

    for iy in 0..2 {
        for ix in 0..2 {
            let du = if ix == 0 { -hu } else { hu };
            let dv = if iy == 0 { hv } else { -hv };
            let position = Point3::from(face.normal * hn + face.u * du + face.v * dv);
            let uv = Point2::new(ix as f64, (1 - iy) as f64);
            mesh.add_vertex(position, face.normal, uv);
        }
    }

    mesh.add_triangle(base, base + 2, base + 1);
    mesh.add_triangle(base + 2, base + 3, base + 1);
}

/// Axis-aligned rectangular prism centred on the origin
///
/// `width` runs along X, `height` along Y, `depth` along Z.
/// Produces 24 vertices and 12 triangles.
pub fn box_mesh(width: f64, height: f64, depth: f64) -> Mesh {
    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    let mut mesh = Mesh::with_capacity(24, 36);
    for face in &box_faces() {
        push_face(&mut mesh, face, &half);
    }
    mesh
}

/// Horizontal quad in the XZ plane centred on the origin
///
/// `width` runs along X, `depth` along Z.
pub fn plane_mesh(width: f64, depth: f64, facing: Facing) -> Mesh {
    let face = match facing {
        Facing::Up => Face {
            normal: Vector3::y(),
            u: Vector3::x(),
            v: -Vector3::z(),
        },
        Facing::Down => Face {
            normal: -Vector3::y(),
            u: Vector3::x(),
            v: Vector3::z(),
        },
    };
    let half = Vector3::new(width / 2.0, 0.0, depth / 2.0);
    let mut mesh = Mesh::with_capacity(4, 6);
    push_face(&mut mesh, &face, &half);
    mesh
}

/// Vertical quad in the XY plane centred on the origin, facing +Z
pub fn vertical_quad_mesh(width: f64, height: f64) -> Mesh {
    let face = Face {
        normal: Vector3::z(),
        u: Vector3::x(),
        v: Vector3::y(),
    };
    let half = Vector3::new(width / 2.0, height / 2.0, 0.0);
    let mut mesh = Mesh::with_capacity(4, 6);
    push_face(&mut mesh, &face, &half);
    mesh
}

/// Tile texture coordinates so one texture repeat covers `texture_scale`
/// world units: `u *= width / S`, `v *= height / S`.
///
/// Every wall region and the floor share this contract, which keeps the
/// texel density constant across differently sized pieces.
#[inline]
pub fn scale_uvs_to_tiles(mesh: &mut Mesh, width: f64, height: f64, texture_scale: f64) {
    mesh.scale_uvs(width / texture_scale, height / texture_scale);
}
