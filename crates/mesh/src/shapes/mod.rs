//! Parametric solids. Each generator returns [`SubMeshData`] centered on
//! the origin; the `MeshBuffer::add_*` helpers append it directly.

mod cube;
mod cylinder;
mod quad;
mod sphere;

pub use cube::cube;
pub use cylinder::cylinder;
pub use quad::quad;
pub use sphere::{SphereParams, sphere};

use glam::{Mat4, Vec2, Vec3};

use crate::MeshError;
use crate::buffer::MeshBuffer;

impl MeshBuffer {
    /// 24 vertices, 12 faces. `size` must be positive on every axis.
    pub fn add_box(&mut self, size: Vec3) -> Result<usize, MeshError> {
        self.add_submesh(cube(size))
    }

    pub fn add_sphere(&mut self, params: &SphereParams) -> Result<usize, MeshError> {
        self.add_submesh(sphere(params)?)
    }

    pub fn add_cylinder(&mut self, size: Vec3, segments: u32) -> Result<usize, MeshError> {
        self.add_submesh(cylinder(size, segments)?)
    }

    pub fn add_quad(&mut self, size: Vec2, transform: &Mat4) -> Result<usize, MeshError> {
        self.add_submesh(quad(size, transform))
    }
}

