/*

    Emit the .mesh text of one billboard LOD.

    A billboard mesh is a single double sided quad made of
    two triangles. Vertices are not shared between the two
    triangles (flat shading), so the 4 corners are written
    out as 6 vertices.

    The low and high LOD differ only in `offset`, which
    pushes the plane off its pivot and sets the thickness
    of the mesh bounds.

    @date: Oct, 2026
*/

use std::fmt::Write;

use crate::prelude::*;

pub const MESH_VERSION: &str = "Version 165 32";
pub const VERTEX_DECLARATION: &str = "N209731BE";
pub const BOUNDS_SCALE: Float = 1.1;

// Triangle list over the vertex layout of `quad_vertices`
pub const QUAD_INDICES: [usize; 6] = [0, 2, 4, 5, 3, 1];

const NORMAL: [Float; 3] = [0.0, -1.0, 0.0];
const COLOR: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vector3,
    pub normal: [Float; 3],
    pub color: [u8; 4],
    pub uv: [Float; 2],
}

impl MeshVertex {
    fn corner(x: Float, y: Float, z: Float, uv: [Float; 2]) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            normal: NORMAL,
            color: COLOR,
            uv,
        }
    }

    // "x y z / nx ny nz / r g b a / u v"
    fn to_line(&self) -> String {
        let p = self.position;
        let [nx, ny, nz] = self.normal;
        let [r, g, b, a] = self.color;
        let [u, v] = self.uv;
        format!(
            "{} {} {} / {:.7} {:.7} {:.7} / {} {} {} {} / {:.7} {:.7}",
            p.x, p.y, p.z, nx, ny, nz, r, g, b, a, u, v
        )
    }
}

/// The 6 vertices of a `width` x `height` quad lying in the xz plane
/// at y = -offset. Bottom left and top right appear twice, once
/// for each triangle.
pub fn quad_vertices(width: Float, height: Float, offset: Float) -> [MeshVertex; 6] {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let y = -offset;

    let bottom_left = MeshVertex::corner(-hw, y, -hh, [0.0, 0.0]);
    let bottom_right = MeshVertex::corner(hw, y, -hh, [1.0, 0.0]);
    let top_left = MeshVertex::corner(-hw, y, hh, [0.0, 1.0]);
    let top_right = MeshVertex::corner(hw, y, hh, [1.0, 1.0]);

    [bottom_left, bottom_left, bottom_right, top_left, top_right, top_right]
}

pub fn generate_mesh(width: Float, height: Float, offset: Float) -> String {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let vertices = quad_vertices(width, height, offset);

    let indices = QUAD_INDICES.map(|i| i.to_string()).join(" ");
    let mut vertex_lines = String::new();
    for v in vertices.iter() {
        // Writing into a String cannot fail
        let _ = writeln!(vertex_lines, "\t\t\t\t{}", v.to_line());
    }

    format!(
"{MESH_VERSION}
{{
\tLocked false
\tSkinned false
\tBoneCount 0
\tMask 255
\tBounds
\t{{
\t\tAabb
\t\t{{
\t\t\tMin {min_x} {min_y} {min_z}
\t\t\tMax {max_x} {max_y} {max_z}
\t\t}}
\t}}
\tGeometries
\t{{
\t\tGeometry
\t\t{{
\t\t\tShaderIndex 0
\t\t\tFlags -
\t\t\tVertexDeclaration {VERTEX_DECLARATION}
\t\t\tIndices {index_count}
\t\t\t{{
\t\t\t\t{indices}
\t\t\t}}
\t\t\tVertices {vertex_count}
\t\t\t{{
{vertex_lines}\t\t\t}}
\t\t}}
\t}}
}}
",
        min_x = -hw * BOUNDS_SCALE,
        min_y = -offset,
        min_z = -hh * BOUNDS_SCALE,
        max_x = hw * BOUNDS_SCALE,
        max_y = offset,
        max_z = hh * BOUNDS_SCALE,
        index_count = QUAD_INDICES.len(),
        vertex_count = vertices.len(),
    )
}
