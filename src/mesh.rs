//! 3D mesh primitives and spatial transforms for GPU rendering.
//!
//! - [`Vertex3d`]: the vertex format used by all meshes (position, normal, UV)
//! - [`Mesh`]: GPU-resident geometry with vertex and index buffers
//! - [`Transform`]: position, rotation, and scale for placing meshes
//!
//! The primitives here are the ones the solar system needs: UV spheres for
//! bodies, an inward-facing sphere for the star-field sky, and a flat
//! annulus for planetary rings.

use crate::gpu::GpuContext;
use glam::{Mat4, Vec3};

/// A vertex for 3D mesh rendering with position, normal, and texture
/// coordinates.
///
/// `#[repr(C)]` plus the bytemuck derives give a predictable 32-byte layout
/// for GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// The 3D position of this vertex in model space.
    pub position: [f32; 3],
    /// The surface normal vector (should be normalized for correct lighting).
    pub normal: [f32; 3],
    /// Texture coordinates, typically in the range [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
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

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// GPU-resident 3D mesh geometry with vertex and index buffers.
///
/// Meshes are immutable after creation. All primitives use counter-clockwise
/// winding for front faces.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Creates a mesh from raw vertex and index data.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Creates a UV sphere of the given radius, centered at the origin.
    ///
    /// `segments` divides the equator, `rings` divides pole to pole. UVs use
    /// an equirectangular projection, which is what planet texture maps
    /// expect.
    pub fn sphere(gpu: &GpuContext, radius: f32, segments: u32, rings: u32) -> Self {
        let (vertices, indices) = sphere_geometry(radius, segments, rings, false);
        Self::new(gpu, &vertices, &indices)
    }

    /// Creates a sphere with inward-facing triangles and normals.
    ///
    /// Used for the star-field sky: the camera sits inside it, so the faces
    /// must wind toward the interior to survive back-face culling.
    pub fn sky_sphere(gpu: &GpuContext, radius: f32, segments: u32, rings: u32) -> Self {
        let (vertices, indices) = sphere_geometry(radius, segments, rings, true);
        Self::new(gpu, &vertices, &indices)
    }

    /// Creates a flat annulus in the XZ plane, visible from both sides.
    ///
    /// Both faces are emitted as separate triangle sets so the ring renders
    /// under back-face culling whichever side the camera is on.
    pub fn ring(gpu: &GpuContext, inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        let mut vertices = Vec::with_capacity(((segments + 1) * 2) as usize);
        let mut indices = Vec::with_capacity((segments * 12) as usize);

        for seg in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            let u = seg as f32 / segments as f32;

            vertices.push(Vertex3d::new(
                [inner_radius * cos, 0.0, inner_radius * sin],
                [0.0, 1.0, 0.0],
                [u, 0.0],
            ));
            vertices.push(Vertex3d::new(
                [outer_radius * cos, 0.0, outer_radius * sin],
                [0.0, 1.0, 0.0],
                [u, 1.0],
            ));
        }

        for seg in 0..segments {
            let inner = seg * 2;
            let outer = inner + 1;
            let next_inner = inner + 2;
            let next_outer = inner + 3;

            // Top face
            indices.extend_from_slice(&[inner, outer, next_inner]);
            indices.extend_from_slice(&[next_inner, outer, next_outer]);
            // Bottom face, reversed winding
            indices.extend_from_slice(&[inner, next_inner, outer]);
            indices.extend_from_slice(&[next_inner, next_outer, outer]);
        }

        Self::new(gpu, &vertices, &indices)
    }
}

fn sphere_geometry(
    radius: f32,
    segments: u32,
    rings: u32,
    inward: bool,
) -> (Vec<Vertex3d>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            let position = [x * radius, y * radius, z * radius];
            let normal = if inward { [-x, -y, -z] } else { [x, y, z] };
            let uv = [seg as f32 / segments as f32, ring as f32 / rings as f32];

            vertices.push(Vertex3d::new(position, normal, uv));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            if inward {
                indices.extend_from_slice(&[current, current + 1, next]);
                indices.extend_from_slice(&[current + 1, next + 1, next]);
            } else {
                indices.extend_from_slice(&[current, next, current + 1]);
                indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }
    }

    (vertices, indices)
}

/// A 3D transformation: position, rotation, and scale.
///
/// Converted to a matrix in SRT order (scale, rotate, translate).
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: glam::Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: glam::Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: glam::Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_geometry_lies_on_radius() {
        let (vertices, indices) = sphere_geometry(30.0, 16, 8, false);
        assert_eq!(vertices.len(), 17 * 9);
        assert_eq!(indices.len(), 16 * 8 * 6);

        for v in &vertices {
            let p = Vec3::from(v.position);
            assert!((p.length() - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn inward_sphere_normals_point_at_center() {
        let (vertices, _) = sphere_geometry(2000.0, 8, 4, true);
        for v in &vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            // A vertex away from the poles should have its normal opposing
            // its position direction.
            if p.length() > 1.0 {
                assert!(n.dot(p.normalize()) < 0.0 + 1e-4);
            }
        }
    }

    #[test]
    fn transform_matrix_applies_srt_order() {
        let transform = Transform::new()
            .position(Vec3::new(150.0, 0.0, 0.0))
            .uniform_scale(2.0);

        let moved = transform.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((moved - Vec3::new(152.0, 0.0, 0.0)).length() < 1e-4);
    }
}
