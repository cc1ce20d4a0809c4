use glam::{Vec2, Vec3};
use savagecube_common::Face;

use crate::buffer::{SubMeshData, TexCoords};

const CORNERS: [[f32; 3]; 24] = [
    // front
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    // back
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    // top
    [-0.5, 0.5, -0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    // bottom
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5],
    // right
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
    // left
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
];

const FACE_NORMALS: [Vec3; 6] = [Vec3::Z, Vec3::NEG_Z, Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::NEG_X];

const UVS: [[f32; 2]; 24] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Box with one flat-shaded quad per side, counter-clockwise seen from
/// outside.
pub fn cube(size: Vec3) -> SubMeshData {
    let positions = CORNERS.iter().map(|&c| Vec3::from(c) * size).collect();
    let normals = FACE_NORMALS
        .iter()
        .flat_map(|&n| std::iter::repeat_n(n, 4))
        .collect();
    let texcoords = UVS.iter().map(|&uv| Vec2::from(uv)).collect();
    let faces = (0..6u32)
        .flat_map(|side| {
            let b = side * 4;
            [Face::new(b, b + 1, b + 2), Face::new(b, b + 2, b + 3)]
        })
        .collect();
    SubMeshData::new(positions, faces)
        .with_normals(normals)
        .with_texcoords(TexCoords::Uv(texcoords))
}
