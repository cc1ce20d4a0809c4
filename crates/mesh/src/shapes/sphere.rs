use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use savagecube_common::Face;
use serde::{Deserialize, Serialize};

use crate::MeshError;
use crate::buffer::{SubMeshData, TexCoords};

/// UV-sphere parameters. Bounds are in degrees: latitude from the north
/// pole (0) to the south pole (180), longitude around the z axis (0..360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    pub radius: f32,
    /// Per-axis stretch applied after normals are computed, so normals
    /// are only exact for `(1, 1, 1)`.
    pub scale_axis: Vec3,
    pub sectors: u32,
    pub stacks: u32,
    pub latitude: Vec2,
    pub longitude: Vec2,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            scale_axis: Vec3::ONE,
            sectors: 36,
            stacks: 18,
            latitude: Vec2::new(0.0, 180.0),
            longitude: Vec2::new(0.0, 360.0),
        }
    }
}

impl SphereParams {
    pub fn new(radius: f32, sectors: u32, stacks: u32) -> Self {
        Self {
            radius,
            sectors,
            stacks,
            ..Self::default()
        }
    }

    /// Step-index range covered by `bounds`: start truncated, end rounded.
    fn index_range(bounds: Vec2, step: f32, count: u32) -> (u32, u32) {
        let start = (bounds.x.to_radians() / step) as i64;
        let end = (bounds.y.to_radians() / step).round() as i64;
        let clamp = |v: i64| v.clamp(0, i64::from(count)) as u32;
        (clamp(start), clamp(end))
    }
}

/// Partial or full UV sphere with smooth normals and `(j / sectors,
/// i / stacks)` texture coordinates.
pub fn sphere(params: &SphereParams) -> Result<SubMeshData, MeshError> {
    let SphereParams {
        radius,
        scale_axis,
        sectors,
        stacks,
        latitude,
        longitude,
    } = *params;
    if radius.is_nan() || radius <= 0.0 || sectors == 0 || stacks == 0 {
        return Err(MeshError::InvalidInput(format!(
            "sphere radius {radius} with {sectors} sectors and {stacks} stacks"
        )));
    }

    let sector_step = 2.0 * PI / sectors as f32;
    let stack_step = PI / stacks as f32;
    let (i_start, i_end) = SphereParams::index_range(latitude, stack_step, stacks);
    let (j_start, j_end) = SphereParams::index_range(longitude, sector_step, sectors);
    if i_start >= i_end || j_start >= j_end {
        return Err(MeshError::InvalidInput(format!(
            "empty sphere patch: latitude {latitude} longitude {longitude}"
        )));
    }

    let rows = i_end - i_start;
    let cols = j_end - j_start;
    let capacity = (u64::from(rows) + 1)
        .checked_mul(u64::from(cols) + 1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            MeshError::InvalidInput(format!(
                "sphere with {sectors} sectors and {stacks} stacks exceeds u32 indices"
            ))
        })? as usize;
    let mut positions = Vec::with_capacity(capacity);
    let mut normals = Vec::with_capacity(capacity);
    let mut texcoords = Vec::with_capacity(capacity);
    let inv_radius = 1.0 / radius;

    for i in i_start..=i_end {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();
        for j in j_start..=j_end {
            let sector_angle = j as f32 * sector_step;
            let p = Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z);
            positions.push(p * scale_axis);
            normals.push(p * inv_radius);
            texcoords.push(Vec2::new(
                j as f32 / sectors as f32,
                i as f32 / stacks as f32,
            ));
        }
    }

    // k1--k1+1
    // |  / |
    // k2--k2+1
    let mut faces = Vec::with_capacity(2 * rows as usize * cols as usize);
    for r in 0..rows {
        let stack = i_start + r;
        for c in 0..cols {
            let k1 = r * (cols + 1) + c;
            let k2 = k1 + cols + 1;
            // the pole rows collapse one triangle of each quad
            if stack != 0 {
                faces.push(Face::new(k1, k2, k1 + 1));
            }
            if stack + 1 != stacks {
                faces.push(Face::new(k1 + 1, k2, k2 + 1));
            }
        }
    }

    Ok(SubMeshData::new(positions, faces)
        .with_normals(normals)
        .with_texcoords(TexCoords::Uv(texcoords)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MeshBuffer;

    #[test]
    fn full_sphere_topology() {
        let data = sphere(&SphereParams::new(1.0, 8, 4)).unwrap();
        assert_eq!(data.vertex_count(), 45);
        assert_eq!(data.face_count(), 2 * 4 * 8 - 2 * 8);
        for f in &data.faces {
            assert!(f.max_index() < 45);
            assert!(!f.is_degenerate(), "{f:?}");
        }
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(data).unwrap();
    }

    #[test]
    fn poles_and_normals() {
        let data = sphere(&SphereParams::new(2.0, 8, 4)).unwrap();
        assert!((data.positions[0] - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
        assert!((data.positions[44] - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        for n in data.normals.as_ref().unwrap() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn scale_axis_leaves_normals_unscaled() {
        let params = SphereParams {
            scale_axis: Vec3::new(2.0, 1.0, 1.0),
            ..SphereParams::new(1.0, 4, 2)
        };
        let data = sphere(&params).unwrap();
        // equator, sector 0
        let idx = 5;
        assert!((data.positions[idx] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((data.normals.as_ref().unwrap()[idx] - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn northern_hemisphere() {
        let params = SphereParams {
            latitude: Vec2::new(0.0, 90.0),
            ..SphereParams::new(1.0, 8, 4)
        };
        let data = sphere(&params).unwrap();
        // rows 0..=2
        assert_eq!(data.vertex_count(), 3 * 9);
        // pole row loses one triangle per quad, the equator row is not a pole
        assert_eq!(data.face_count(), 8 + 16);
        assert!(data.positions.iter().all(|p| p.z >= -1e-6));
    }

    #[test]
    fn texcoords_span_unit_square() {
        let data = sphere(&SphereParams::new(1.0, 6, 3)).unwrap();
        let TexCoords::Uv(uv) = data.texcoords.as_ref().unwrap() else {
            panic!("expected 2d coordinates");
        };
        assert_eq!(uv[0], Vec2::ZERO);
        assert_eq!(*uv.last().unwrap(), Vec2::ONE);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(sphere(&SphereParams::new(0.0, 8, 4)).is_err());
        assert!(sphere(&SphereParams::new(1.0, 0, 4)).is_err());
        let empty = SphereParams {
            longitude: Vec2::new(10.0, 10.0),
            ..SphereParams::new(1.0, 8, 4)
        };
        assert!(sphere(&empty).is_err());
    }

    #[test]
    fn huge_counts_are_rejected_not_overflowed() {
        let huge = SphereParams::new(1.0, u32::MAX, u32::MAX);
        assert!(matches!(sphere(&huge), Err(MeshError::InvalidInput(_))));
        // 65536 x 65536 vertices no longer fit u32 indices
        let wide = SphereParams::new(1.0, 65_535, 65_535);
        assert!(matches!(sphere(&wide), Err(MeshError::InvalidInput(_))));
    }
}
