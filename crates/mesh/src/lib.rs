//! Procedural mesh construction.
//!
//! A [`MeshBuffer`] accumulates submeshes that share one flat vertex and
//! index buffer. Shape generators in [`shapes`] and the binary STL reader in
//! [`stl`] produce [`SubMeshData`] that is appended to a buffer, transformed,
//! and finally uploaded through a [`BufferUploader`].
//!
//! # Invariants
//! - Every present attribute array has exactly one entry per position.
//! - Every face index is below the vertex count and no face is degenerate.
//! - Any mutation after finalize drops the buffer back to
//!   [`MeshState::Building`]; a new finalize is required before drawing.

pub mod buffer;
pub mod shapes;
pub mod stl;
pub mod upload;

pub use buffer::{Colors, DrawRange, MeshBuffer, MeshState, SubMesh, SubMeshData, TexCoords};
pub use shapes::SphereParams;
pub use stl::{StlError, load_stl, parse_stl, read_stl};
pub use upload::{
    AttributeIndex, AttributeStream, BufferHandle, BufferUploader, MemoryUploader, UploadRecord,
};

/// Errors from building or finalizing a mesh buffer.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("invalid submesh: {0}")]
    InvalidInput(String),
    #[error("submesh layout mismatch: {0}")]
    LayoutMismatch(String),
    #[error("face {face} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh has no vertices")]
    EmptyMesh,
    #[error("GPU upload returned an invalid buffer")]
    Upload,
}
