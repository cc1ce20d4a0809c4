//! Binary STL import.
//!
//! Layout: an 80-byte header, a little-endian `u32` triangle count, then one
//! 50-byte record per triangle (normal, three vertices, 2 attribute bytes).
//! Identical positions are welded into one vertex whose normal is the
//! normalized sum of the normals of every triangle that used it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use glam::Vec3;
use savagecube_common::Face;

use crate::MeshError;
use crate::buffer::{MeshBuffer, SubMeshData};

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StlError {
    #[error("cannot load STL: {0}")]
    Io(#[from] io::Error),
    #[error("STL truncated: {0}")]
    Truncated(&'static str),
    #[error("STL contains no usable triangles")]
    Empty,
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Position compared by value: `-0.0 == 0.0`, ordered lexicographically.
#[derive(Debug, Clone, Copy)]
struct WeldKey([f32; 3]);

impl WeldKey {
    fn new(p: Vec3) -> Self {
        // adding +0.0 turns -0.0 into +0.0
        Self((p + Vec3::ZERO).to_array())
    }
}

impl PartialEq for WeldKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeldKey {}

impl PartialOrd for WeldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn read_exact_or(reader: &mut impl Read, buf: &mut [u8], what: &'static str) -> Result<(), StlError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => StlError::Truncated(what),
        _ => StlError::Io(e),
    })
}

fn vec3_at(bytes: &[u8], offset: usize) -> Vec3 {
    let f = |i: usize| {
        let at = offset + i * 4;
        f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    Vec3::new(f(0), f(1), f(2))
}

/// Parse and weld, without any normalization.
pub fn parse_stl(mut reader: impl Read) -> Result<SubMeshData, StlError> {
    let mut header = [0u8; HEADER_LEN];
    read_exact_or(&mut reader, &mut header, "header")?;
    let mut count = [0u8; 4];
    read_exact_or(&mut reader, &mut count, "triangle count")?;
    let count = u32::from_le_bytes(count);
    if count == 0 {
        return Err(StlError::Empty);
    }

    let mut welded: BTreeMap<WeldKey, Vec<u32>> = BTreeMap::new();
    let mut face_normals = Vec::new();
    let mut record = [0u8; RECORD_LEN];
    for t in 0..count {
        read_exact_or(&mut reader, &mut record, "triangle records")?;
        let corners = [vec3_at(&record, 12), vec3_at(&record, 24), vec3_at(&record, 36)];
        let mut normal = vec3_at(&record, 0);
        if normal == Vec3::ZERO || !normal.is_finite() {
            let [a, b, c] = corners;
            normal = (b - a).cross(c - a).normalize_or_zero();
        }
        face_normals.push(normal);
        for (k, corner) in corners.into_iter().enumerate() {
            welded.entry(WeldKey::new(corner)).or_default().push(t * 3 + k as u32);
        }
    }

    let mut faces = vec![Face::default(); face_normals.len()];
    let mut positions = Vec::with_capacity(welded.len());
    let mut normals = Vec::with_capacity(welded.len());
    for (vertex, (key, refs)) in welded.into_iter().enumerate() {
        let mut smooth = Vec3::ZERO;
        for id in refs {
            let face = (id / 3) as usize;
            faces[face].0[(id % 3) as usize] = vertex as u32;
            smooth += face_normals[face];
        }
        positions.push(Vec3::from(key.0));
        normals.push(smooth.normalize_or_zero());
    }

    if let Some(t) = faces.iter().position(Face::is_degenerate) {
        return Err(StlError::Mesh(MeshError::InvalidInput(format!(
            "STL triangle {t} collapses to a degenerate face after welding"
        ))));
    }
    tracing::debug!(
        triangles = count,
        vertices = positions.len(),
        "STL welded"
    );
    Ok(SubMeshData::new(positions, faces).with_normals(normals))
}

/// Read an STL stream into a mesh scaled into a unit box (aspect ratio
/// kept) and centered on the origin.
pub fn read_stl(reader: impl Read) -> Result<MeshBuffer, StlError> {
    let data = parse_stl(reader)?;
    let mut mesh = MeshBuffer::new();
    mesh.add_submesh(data)?;
    mesh.normalize(true);
    mesh.center_to_origin(Vec3::ZERO);
    Ok(mesh)
}

pub fn load_stl(path: impl AsRef<Path>) -> Result<MeshBuffer, StlError> {
    let path = path.as_ref();
    let result = File::open(path)
        .map_err(StlError::from)
        .and_then(|file| read_stl(BufReader::new(file)));
    if let Err(e) = &result {
        tracing::warn!(path = %path.display(), error = %e, "STL load failed");
    }
    result
}
