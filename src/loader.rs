//! Geometry loading for 3D model files.
//!
//! The rocket's hull comes from an STL file. Parsing happens on a spawned
//! thread so startup never blocks on disk; the main loop polls the
//! [`ModelLoad`] handle once per frame and attaches the mesh when the result
//! arrives. A failed load means the rocket simply never appears; the only
//! diagnostic is a logged warning.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::Vec3;

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};

/// Errors that can occur when loading geometry.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("STL parse error: {0}")]
    Parse(String),
    #[error("model load thread exited without a result")]
    Disconnected,
}

/// Raw geometry data before GPU upload.
///
/// Intermediate representation so the model can be recentered and rescaled
/// before the final mesh is created.
#[derive(Clone, Debug)]
pub struct RawGeometry {
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Size of the bounding box.
    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    /// Translate all vertices by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
    }

    /// Scale all vertices uniformly around the origin.
    pub fn scale(&mut self, factor: f32) {
        for v in &mut self.vertices {
            v.position[0] *= factor;
            v.position[1] *= factor;
            v.position[2] *= factor;
        }
    }

    /// Move the bounding-box center to the origin.
    pub fn recenter(&mut self) {
        let center = self.center();
        self.translate(-center);
    }

    /// Scale the geometry to fit within a cube of the given edge length.
    pub fn fit_to(&mut self, edge: f32) {
        let size = self.size();
        let max_dim = size.x.max(size.y).max(size.z);
        if max_dim > 0.0 {
            self.scale(edge / max_dim);
        }
    }

    /// Upload to the GPU as a [`Mesh`].
    pub fn upload(&self, gpu: &GpuContext) -> Mesh {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }
}

/// Parse an STL file (binary or ASCII) into raw geometry.
pub fn load_stl(path: &Path) -> Result<RawGeometry, GeometryError> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    let stl = stl_io::read_stl(&mut reader).map_err(|e| GeometryError::Parse(e.to_string()))?;

    let mut vertices = Vec::with_capacity(stl.faces.len() * 3);
    let mut indices = Vec::with_capacity(stl.faces.len() * 3);

    // stl_io returns an IndexedMesh with a vertex list and indexed triangles
    for (i, face) in stl.faces.iter().enumerate() {
        let normal: [f32; 3] = face.normal.into();

        for &vertex_idx in &face.vertices {
            let vertex = &stl.vertices[vertex_idx];
            let position: [f32; 3] = (*vertex).into();
            // STL has no UVs
            vertices.push(Vertex3d::new(position, normal, [0.0, 0.0]));
        }

        let base = (i * 3) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Ok(RawGeometry::new(vertices, indices))
}

/// Handle to a model load running on its own thread.
///
/// Poll once per frame; the first `Some` result is final and the handle
/// should be dropped afterwards.
pub struct ModelLoad {
    receiver: Receiver<Result<RawGeometry, GeometryError>>,
}

impl ModelLoad {
    /// Start loading the file on a background thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            // The receiver may have been dropped; nothing to do then.
            let _ = sender.send(load_stl(&path));
        });

        Self { receiver }
    }

    /// Check whether the load has finished without blocking.
    pub fn poll(&self) -> Option<Result<RawGeometry, GeometryError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GeometryError::Disconnected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn triangle() -> RawGeometry {
        let vertices = vec![
            Vertex3d::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex3d::new([2.0, 4.0, 6.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex3d::new([-2.0, -4.0, -6.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        ];
        RawGeometry::new(vertices, vec![0, 1, 2])
    }

    #[test]
    fn bounds_and_center() {
        let geom = triangle();
        let (min, max) = geom.bounds();
        assert_eq!(min, Vec3::new(-2.0, -4.0, -6.0));
        assert_eq!(max, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(geom.center(), Vec3::ZERO);
    }

    #[test]
    fn recenter_moves_bounding_box_to_origin() {
        let mut geom = triangle();
        geom.translate(Vec3::new(10.0, 0.0, 0.0));
        geom.recenter();
        assert!(geom.center().length() < 1e-4);
    }

    #[test]
    fn fit_to_scales_largest_dimension() {
        let mut geom = triangle();
        geom.fit_to(1.0);
        let size = geom.size();
        assert!((size.z - 1.0).abs() < 1e-5);
        assert!(size.x <= 1.0 + 1e-5 && size.y <= 1.0 + 1e-5);
    }

    #[test]
    fn missing_file_reports_error_through_poll() {
        let load = ModelLoad::spawn("does/not/exist.stl");

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match load.poll() {
                Some(result) => {
                    assert!(result.is_err());
                    break;
                }
                None => {
                    assert!(Instant::now() < deadline, "load never completed");
                    thread::sleep(Duration::from_millis(5));
                }
            }
        }
    }
}
