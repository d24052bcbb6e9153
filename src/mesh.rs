//! Cubie and axis-line geometry.
//!
//! - [`Vertex`] is the vertex format shared by every pipeline in [`CubePass`](crate::cube_pass::CubePass)
//! - [`Mesh`] is GPU-resident geometry with vertex and index buffers
//!
//! Geometry is built on the CPU by [`cubie_geometry`] and [`axes_geometry`] and
//! uploaded once at startup.
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | color     | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |

use crate::gpu::GpuContext;

/// Half the edge length of one cubie.
pub const CUBIE_HALF_EXTENT: f32 = 0.5;

/// Length of each drawn axis line.
pub const AXIS_LENGTH: f32 = 10.0;

/// Sticker colors, in the order the faces are emitted by [`cubie_geometry`].
pub const FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0], // front (+Z), red
    [1.0, 0.5, 0.0], // back (-Z), orange
    [1.0, 1.0, 1.0], // top (+Y), white
    [1.0, 1.0, 0.0], // bottom (-Y), yellow
    [0.0, 0.0, 1.0], // right (+X), blue
    [0.0, 1.0, 0.0], // left (-X), green
];

const AXIS_COLORS: [[f32; 3]; 3] = [
    [1.0, 0.0, 1.0], // X, magenta
    [0.0, 1.0, 1.0], // Y, cyan
    [1.0, 1.0, 1.0], // Z, white
];

/// A vertex with position, flat color and texture coordinates.
///
/// `#[repr(C)]` and [`bytemuck::Pod`] make a slice of vertices directly uploadable.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// The wgpu vertex buffer layout for this vertex type (32 bytes per vertex).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}

/// Vertices and triangle indices of one cubie centered at the origin.
///
/// Each face has its own four vertices so it can carry its own color and the full
/// `[0, 1]` UV range. Winding is counter-clockwise seen from outside.
pub fn cubie_geometry() -> (Vec<Vertex>, Vec<u32>) {
    let h = CUBIE_HALF_EXTENT;
    // Corners of each face, counter-clockwise seen from outside, starting bottom-left.
    let faces: [[[f32; 3]; 4]; 6] = [
        [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (corners, color) in faces.iter().zip(FACE_COLORS) {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            vertices.push(Vertex::new(*corner, color, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// Three colored lines from the origin along +X, +Y and +Z, as a line list.
pub fn axes_geometry() -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(6);
    for (i, color) in AXIS_COLORS.into_iter().enumerate() {
        let mut end = [0.0; 3];
        end[i] = AXIS_LENGTH;
        vertices.push(Vertex::new([0.0; 3], color, [0.0, 0.0]));
        vertices.push(Vertex::new(end, color, [0.0, 0.0]));
    }
    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

/// GPU-resident geometry with vertex and index buffers.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload vertex and index data to new GPU buffers.
    pub fn new(gpu: &GpuContext, label: &str, vertices: &[Vertex], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// One cubie with its six colored faces.
    pub fn cubie(gpu: &GpuContext) -> Self {
        let (vertices, indices) = cubie_geometry();
        Self::new(gpu, "Cubie", &vertices, &indices)
    }

    /// The X, Y and Z axis lines.
    pub fn axes(gpu: &GpuContext) -> Self {
        let (vertices, indices) = axes_geometry();
        Self::new(gpu, "Axes", &vertices, &indices)
    }

    pub(crate) fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn face_normal(vertices: &[Vertex], face: usize) -> Vec3 {
        let p = |i: usize| Vec3::from(vertices[face * 4 + i].position);
        (p(1) - p(0)).cross(p(2) - p(0)).normalize()
    }

    #[test]
    fn cubie_has_four_vertices_per_face() {
        let (vertices, indices) = cubie_geometry();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn faces_wind_outward_with_their_colors() {
        let (vertices, _) = cubie_geometry();
        let outward = [Vec3::Z, -Vec3::Z, Vec3::Y, -Vec3::Y, Vec3::X, -Vec3::X];
        for (face, normal) in outward.into_iter().enumerate() {
            assert!(face_normal(&vertices, face).abs_diff_eq(normal, 1e-6));
            for corner in 0..4 {
                let vertex = vertices[face * 4 + corner];
                assert_eq!(vertex.color, FACE_COLORS[face]);
                assert_eq!(Vec3::from(vertex.position).dot(normal), CUBIE_HALF_EXTENT);
            }
        }
    }

    #[test]
    fn axes_run_along_each_unit_direction() {
        let (vertices, indices) = axes_geometry();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(vertices[1].position, [AXIS_LENGTH, 0.0, 0.0]);
        assert_eq!(vertices[3].position, [0.0, AXIS_LENGTH, 0.0]);
        assert_eq!(vertices[5].position, [0.0, 0.0, AXIS_LENGTH]);
    }
}
