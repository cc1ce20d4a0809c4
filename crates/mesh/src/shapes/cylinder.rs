use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use savagecube_common::Face;

use crate::MeshError;
use crate::buffer::{SubMeshData, TexCoords};

/// Points on a circle built by repeatedly rotating the previous point.
fn ring(radius: f32, segments: u32) -> Vec<Vec2> {
    let theta = TAU / segments as f32;
    let (s, c) = theta.sin_cos();
    let mut point = Vec2::new(radius, 0.0);
    (0..segments)
        .map(|_| {
            let current = point;
            point = Vec2::new(c * point.x - s * point.y, s * point.x + c * point.y);
            current
        })
        .collect()
}

/// Closed cylinder along z: a base ring at `-size.z / 2` and a top ring at
/// `+size.z / 2`, both fanned from their first vertex.
///
/// Yields `2 * segments` vertices and `4 * segments - 4` faces. No normals:
/// the rings are shared between caps and wall.
pub fn cylinder(size: Vec3, segments: u32) -> Result<SubMeshData, MeshError> {
    if segments < 3 {
        return Err(MeshError::InvalidInput(format!(
            "cylinder needs at least 3 segments, got {segments}"
        )));
    }
    let n = segments;
    let circle = ring(0.5, n);
    let half = size.z * 0.5;

    let mut positions = Vec::with_capacity(2 * n as usize);
    let mut texcoords = Vec::with_capacity(2 * n as usize);
    for z in [-half, half] {
        for p in &circle {
            positions.push(Vec3::new(p.x * size.x, p.y * size.y, z));
            texcoords.push(*p + Vec2::splat(0.5));
        }
    }

    let mut faces = Vec::with_capacity(4 * n as usize - 4);
    for i in 1..n - 1 {
        faces.push(Face::new(i, 0, i + 1));
        faces.push(Face::new(n, n + i, n + i + 1));
    }
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(Face::new(i, j, n + i));
        faces.push(Face::new(n + i, j, n + j));
    }

    Ok(SubMeshData::new(positions, faces).with_texcoords(TexCoords::Uv(texcoords)))
}
