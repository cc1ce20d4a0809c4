use glam::{Mat4, Vec2, Vec3};
use savagecube_common::Face;

use crate::buffer::{SubMeshData, TexCoords};

/// Unit quad in the xy plane scaled by `size`, then moved by `transform`.
pub fn quad(size: Vec2, transform: &Mat4) -> SubMeshData {
    let corners = [
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(-0.5, 0.5),
    ];
    let mut positions: Vec<Vec3> = corners.iter().map(|c| (*c * size).extend(0.0)).collect();
    let mut normal = Vec3::Z;
    if *transform != Mat4::IDENTITY {
        for p in &mut positions {
            *p = transform.transform_point3(*p);
        }
        let moved = transform.transform_vector3(normal);
        normal = moved.try_normalize().unwrap_or(moved);
    }
    let texcoords = vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];

    SubMeshData::new(positions, vec![Face::new(0, 1, 2), Face::new(0, 2, 3)])
        .with_normals(vec![normal; 4])
        .with_texcoords(TexCoords::Uv(texcoords))
}
