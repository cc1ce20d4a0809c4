//! Shared vertex/index buffer partitioned into submeshes.

use std::cell::Cell;
use std::ops::Range;

use glam::{Mat4, Vec2, Vec3, Vec4};
use savagecube_common::{BoundingBox, Face};
use serde::{Deserialize, Serialize};

use crate::MeshError;
use crate::upload::{AttributeIndex, AttributeStream, BufferHandle, BufferUploader};

/// Per-vertex texture coordinates, 2 or 3 components.
#[derive(Debug, Clone, PartialEq)]
pub enum TexCoords {
    Uv(Vec<Vec2>),
    Uvw(Vec<Vec3>),
}

impl TexCoords {
    pub fn len(&self) -> usize {
        match self {
            Self::Uv(v) => v.len(),
            Self::Uvw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn components(&self) -> u8 {
        match self {
            Self::Uv(_) => 2,
            Self::Uvw(_) => 3,
        }
    }

    fn append(&mut self, other: Self) {
        match (self, other) {
            (Self::Uv(dst), Self::Uv(src)) => dst.extend(src),
            (Self::Uvw(dst), Self::Uvw(src)) => dst.extend(src),
            _ => unreachable!("texture coordinate layout is checked before append"),
        }
    }

    fn flatten(&self) -> Vec<f32> {
        match self {
            Self::Uv(v) => v.iter().flat_map(|c| c.to_array()).collect(),
            Self::Uvw(v) => v.iter().flat_map(|c| c.to_array()).collect(),
        }
    }
}

/// Per-vertex colors, RGB or RGBA.
#[derive(Debug, Clone, PartialEq)]
pub enum Colors {
    Rgb(Vec<Vec3>),
    Rgba(Vec<Vec4>),
}

impl Colors {
    pub fn len(&self) -> usize {
        match self {
            Self::Rgb(v) => v.len(),
            Self::Rgba(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn components(&self) -> u8 {
        match self {
            Self::Rgb(_) => 3,
            Self::Rgba(_) => 4,
        }
    }

    fn append(&mut self, other: Self) {
        match (self, other) {
            (Self::Rgb(dst), Self::Rgb(src)) => dst.extend(src),
            (Self::Rgba(dst), Self::Rgba(src)) => dst.extend(src),
            _ => unreachable!("color layout is checked before append"),
        }
    }

    fn flatten(&self) -> Vec<f32> {
        match self {
            Self::Rgb(v) => v.iter().flat_map(|c| c.to_array()).collect(),
            Self::Rgba(v) => v.iter().flat_map(|c| c.to_array()).collect(),
        }
    }
}

/// Geometry for one submesh, with faces indexing its own vertices from 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubMeshData {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub normals: Option<Vec<Vec3>>,
    pub texcoords: Option<TexCoords>,
    pub colors: Option<Colors>,
    pub material: u32,
}

impl SubMeshData {
    pub fn new(positions: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            positions,
            faces,
            ..Self::default()
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_texcoords(mut self, texcoords: TexCoords) -> Self {
        self.texcoords = Some(texcoords);
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_material(mut self, material: u32) -> Self {
        self.material = material;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn validate(&self) -> Result<(), MeshError> {
        let n = self.positions.len();
        if n == 0 || self.faces.is_empty() {
            return Err(MeshError::InvalidInput(format!(
                "{n} vertices and {} faces",
                self.faces.len()
            )));
        }
        let lengths = [
            ("normals", self.normals.as_ref().map(Vec::len)),
            ("texcoords", self.texcoords.as_ref().map(TexCoords::len)),
            ("colors", self.colors.as_ref().map(Colors::len)),
        ];
        for (name, len) in lengths {
            if let Some(len) = len
                && len != n
            {
                return Err(MeshError::InvalidInput(format!(
                    "{len} {name} for {n} positions"
                )));
            }
        }
        for (i, face) in self.faces.iter().enumerate() {
            let index = face.max_index();
            if index as usize >= n {
                return Err(MeshError::IndexOutOfRange {
                    face: i,
                    index,
                    vertex_count: n,
                });
            }
            if face.is_degenerate() {
                return Err(MeshError::InvalidInput(format!(
                    "face {i} {:?} is degenerate",
                    face.0
                )));
            }
        }
        Ok(())
    }
}

/// A contiguous drawing range of the shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubMesh {
    pub vertex_offset: usize,
    pub vertex_count: usize,
    pub face_offset: usize,
    pub face_count: usize,
    pub material: u32,
}

impl SubMesh {
    pub fn vertex_range(&self) -> Range<usize> {
        self.vertex_offset..self.vertex_offset + self.vertex_count
    }
}

/// Element range for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub material: u32,
    pub first_index: usize,
    pub index_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshState {
    Empty,
    Building,
    Finalized,
}

/// CPU-side mesh built additively from submeshes.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    texcoords: Option<TexCoords>,
    colors: Option<Colors>,
    faces: Vec<Face>,
    submeshes: Vec<SubMesh>,
    bounding_box: Cell<Option<BoundingBox>>,
    handle: Option<BufferHandle>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MeshState {
        if self.positions.is_empty() {
            MeshState::Empty
        } else if self.handle.is_some() {
            MeshState::Finalized
        } else {
            MeshState::Building
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.state() == MeshState::Finalized
    }

    /// Handle of the last successful upload, while still valid.
    pub fn handle(&self) -> Option<BufferHandle> {
        self.handle
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn texcoords(&self) -> Option<&TexCoords> {
        self.texcoords.as_ref()
    }

    pub fn colors(&self) -> Option<&Colors> {
        self.colors.as_ref()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append a submesh, rebasing its faces onto the current vertex count.
    ///
    /// The first submesh fixes which attributes the buffer carries and their
    /// formats; later submeshes must match. On error the buffer is untouched.
    pub fn add_submesh(&mut self, data: SubMeshData) -> Result<usize, MeshError> {
        if let Err(e) = data.validate().and_then(|()| self.check_layout(&data)) {
            tracing::warn!(error = %e, "submesh rejected");
            return Err(e);
        }
        self.invalidate();

        let vertex_offset = self.positions.len();
        let face_offset = self.faces.len();
        let submesh = SubMesh {
            vertex_offset,
            vertex_count: data.positions.len(),
            face_offset,
            face_count: data.faces.len(),
            material: data.material,
        };

        // vertex counts are far below u32::MAX for any drawable mesh
        let base = vertex_offset as u32;
        self.faces.extend(data.faces.iter().map(|f| f.rebased(base)));
        self.positions.extend(data.positions);
        if let Some(normals) = data.normals {
            self.normals.get_or_insert_with(Vec::new).extend(normals);
        }
        if let Some(texcoords) = data.texcoords {
            match &mut self.texcoords {
                Some(existing) => existing.append(texcoords),
                None => self.texcoords = Some(texcoords),
            }
        }
        if let Some(colors) = data.colors {
            match &mut self.colors {
                Some(existing) => existing.append(colors),
                None => self.colors = Some(colors),
            }
        }
        self.submeshes.push(submesh);
        tracing::trace!(id = self.submeshes.len() - 1, ?submesh, "submesh added");
        Ok(self.submeshes.len() - 1)
    }

    fn check_layout(&self, data: &SubMeshData) -> Result<(), MeshError> {
        if self.submeshes.is_empty() {
            return Ok(());
        }
        if self.normals.is_some() != data.normals.is_some() {
            return Err(MeshError::LayoutMismatch("normals".into()));
        }
        let tex = |t: Option<&TexCoords>| t.map(TexCoords::components);
        if tex(self.texcoords.as_ref()) != tex(data.texcoords.as_ref()) {
            return Err(MeshError::LayoutMismatch(format!(
                "texture coordinates {:?} vs {:?}",
                tex(self.texcoords.as_ref()),
                tex(data.texcoords.as_ref())
            )));
        }
        let col = |c: Option<&Colors>| c.map(Colors::components);
        if col(self.colors.as_ref()) != col(data.colors.as_ref()) {
            return Err(MeshError::LayoutMismatch(format!(
                "colors {:?} vs {:?}",
                col(self.colors.as_ref()),
                col(data.colors.as_ref())
            )));
        }
        Ok(())
    }

    /// Drop back to `Empty`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn invalidate(&mut self) {
        if self.handle.take().is_some() {
            tracing::debug!("mesh invalidated, finalize required");
        }
        self.bounding_box.set(None);
    }

    /// Vertex range of one submesh, or of the whole buffer.
    ///
    /// # Panics
    /// On an empty buffer or an unknown submesh id.
    fn vertex_range(&self, submesh: Option<usize>) -> Range<usize> {
        assert!(!self.positions.is_empty(), "mesh is empty (no vertices)");
        match submesh {
            Some(id) => {
                assert!(
                    id < self.submeshes.len(),
                    "submesh {id} out of range ({} submeshes)",
                    self.submeshes.len()
                );
                self.submeshes[id].vertex_range()
            }
            None => 0..self.positions.len(),
        }
    }

    /// Multiply positions component-wise. A zero or unit scale leaves the
    /// geometry untouched but still invalidates.
    pub fn scale(&mut self, scale: Vec3, submesh: Option<usize>) {
        let range = self.vertex_range(submesh);
        self.invalidate();
        if scale == Vec3::ZERO || scale == Vec3::ONE {
            return;
        }
        for p in &mut self.positions[range] {
            *p *= scale;
        }
    }

    pub fn translate(&mut self, offset: Vec3, submesh: Option<usize>) {
        let range = self.vertex_range(submesh);
        self.invalidate();
        for p in &mut self.positions[range] {
            *p += offset;
        }
    }

    /// Apply an affine matrix to positions and normals.
    pub fn transform(&mut self, matrix: &Mat4, submesh: Option<usize>) {
        let range = self.vertex_range(submesh);
        self.invalidate();
        for p in &mut self.positions[range.clone()] {
            *p = matrix.transform_point3(*p);
        }
        if let Some(normals) = &mut self.normals {
            for n in &mut normals[range] {
                let moved = matrix.transform_vector3(*n);
                *n = moved.try_normalize().unwrap_or(moved);
            }
        }
    }

    /// Move the bounding box center to `offset`.
    pub fn center_to_origin(&mut self, offset: Vec3) {
        let bb = self.require_bounding_box();
        self.invalidate();
        let shift = bb.position - offset;
        if shift != Vec3::ZERO {
            for p in &mut self.positions {
                *p -= shift;
            }
        }
    }

    /// Scale into a unit box. Flat axes keep scale 1. With `keep_ratio` the
    /// smallest axis factor is applied to all three axes.
    pub fn normalize(&mut self, keep_ratio: bool) {
        let size = self.require_bounding_box().size;
        let factor = |s: f32| if s != 0.0 { 1.0 / s } else { 1.0 };
        let mut scale = Vec3::new(factor(size.x), factor(size.y), factor(size.z));
        if keep_ratio {
            scale = Vec3::splat(scale.min_element());
        }
        self.scale(scale, None);
    }

    /// Axis-aligned bounds of all positions, cached until the next mutation.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if let Some(bb) = self.bounding_box.get() {
            return Some(bb);
        }
        let bb = BoundingBox::from_points(&self.positions)?;
        self.bounding_box.set(Some(bb));
        Some(bb)
    }

    fn require_bounding_box(&self) -> BoundingBox {
        match self.bounding_box() {
            Some(bb) => bb,
            None => panic!("mesh is empty (no vertices)"),
        }
    }

    /// Pack the buffer and upload it once. Finalizing a finalized buffer
    /// returns the existing handle without uploading.
    pub fn finalize<U>(&mut self, uploader: &mut U) -> Result<BufferHandle, MeshError>
    where
        U: BufferUploader + ?Sized,
    {
        if let Some(handle) = self.handle {
            tracing::warn!(handle = handle.0, "mesh is already finalized");
            return Ok(handle);
        }
        if self.positions.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        let bb = self.bounding_box();

        let mut streams = vec![AttributeStream::new(
            AttributeIndex::Position,
            3,
            self.positions.iter().flat_map(|p| p.to_array()).collect(),
        )];
        if let Some(normals) = &self.normals {
            streams.push(AttributeStream::new(
                AttributeIndex::Normal,
                3,
                normals.iter().flat_map(|n| n.to_array()).collect(),
            ));
        }
        if let Some(texcoords) = &self.texcoords {
            streams.push(AttributeStream::new(
                AttributeIndex::Coord0,
                texcoords.components(),
                texcoords.flatten(),
            ));
        }
        if let Some(colors) = &self.colors {
            streams.push(AttributeStream::new(
                AttributeIndex::Color,
                colors.components(),
                colors.flatten(),
            ));
        }
        let elements: Vec<u32> = self.faces.iter().flat_map(|f| f.0).collect();

        let handle = uploader.upload(&streams, &elements);
        if !handle.is_valid() {
            tracing::warn!("buffer upload failed");
            return Err(MeshError::Upload);
        }
        tracing::debug!(
            handle = handle.0,
            vertices = self.positions.len(),
            faces = self.faces.len(),
            submeshes = self.submeshes.len(),
            ?bb,
            "mesh finalized"
        );
        self.handle = Some(handle);
        Ok(handle)
    }

    /// One element range per submesh, in submesh order.
    ///
    /// # Panics
    /// If the buffer is not finalized.
    pub fn draw_ranges(&self) -> Vec<DrawRange> {
        assert!(self.is_finalized(), "mesh is not finalized, can't draw it");
        self.submeshes
            .iter()
            .map(|s| DrawRange {
                material: s.material,
                first_index: s.face_offset * 3,
                index_count: s.face_count * 3,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::MemoryUploader;

    fn triangle() -> SubMeshData {
        SubMeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Face::new(0, 1, 2)],
        )
    }

    fn quad_data() -> SubMeshData {
        SubMeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 4.0, 0.0),
                Vec3::new(0.0, 4.0, 0.0),
            ],
            vec![Face::new(0, 1, 2), Face::new(0, 2, 3)],
        )
    }

    #[test]
    fn submeshes_are_rebased() {
        let mut mesh = MeshBuffer::new();
        assert_eq!(mesh.state(), MeshState::Empty);
        assert_eq!(mesh.add_submesh(triangle()).unwrap(), 0);
        assert_eq!(mesh.add_submesh(quad_data().with_material(7)).unwrap(), 1);
        assert_eq!(mesh.state(), MeshState::Building);
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.faces()[1], Face::new(3, 4, 5));
        assert_eq!(mesh.faces()[2], Face::new(3, 5, 6));
        let sub = mesh.submeshes()[1];
        assert_eq!((sub.vertex_offset, sub.vertex_count), (3, 4));
        assert_eq!((sub.face_offset, sub.face_count), (1, 2));
        assert_eq!(sub.material, 7);
    }

    #[test]
    fn invalid_input_leaves_buffer_untouched() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle()).unwrap();

        let empty = SubMeshData::new(vec![], vec![]);
        assert!(matches!(mesh.add_submesh(empty), Err(MeshError::InvalidInput(_))));

        let out_of_range = SubMeshData::new(vec![Vec3::ZERO; 3], vec![Face::new(0, 1, 3)]);
        assert!(matches!(
            mesh.add_submesh(out_of_range),
            Err(MeshError::IndexOutOfRange { index: 3, .. })
        ));

        let degenerate = SubMeshData::new(vec![Vec3::ZERO; 3], vec![Face::new(0, 1, 1)]);
        assert!(matches!(mesh.add_submesh(degenerate), Err(MeshError::InvalidInput(_))));

        let short_normals = triangle().with_normals(vec![Vec3::Z]);
        assert!(matches!(mesh.add_submesh(short_normals), Err(MeshError::InvalidInput(_))));

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.submeshes().len(), 1);
    }

    #[test]
    fn layout_is_fixed_by_first_submesh() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle().with_texcoords(TexCoords::Uv(vec![Vec2::ZERO; 3])))
            .unwrap();

        let uvw = triangle().with_texcoords(TexCoords::Uvw(vec![Vec3::ZERO; 3]));
        assert!(matches!(mesh.add_submesh(uvw), Err(MeshError::LayoutMismatch(_))));

        assert!(matches!(mesh.add_submesh(triangle()), Err(MeshError::LayoutMismatch(_))));

        let extra = triangle()
            .with_texcoords(TexCoords::Uv(vec![Vec2::ZERO; 3]))
            .with_colors(Colors::Rgba(vec![Vec4::ONE; 3]));
        assert!(matches!(mesh.add_submesh(extra), Err(MeshError::LayoutMismatch(_))));

        mesh.add_submesh(triangle().with_texcoords(TexCoords::Uv(vec![Vec2::ONE; 3])))
            .unwrap();
        assert_eq!(mesh.texcoords().map(TexCoords::len), Some(6));
    }

    #[test]
    fn finalize_uploads_once() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(
            quad_data()
                .with_normals(vec![Vec3::Z; 4])
                .with_colors(Colors::Rgb(vec![Vec3::ONE; 4])),
        )
        .unwrap();
        let mut up = MemoryUploader::new();
        let handle = mesh.finalize(&mut up).unwrap();
        assert_eq!(mesh.state(), MeshState::Finalized);
        assert_eq!(mesh.handle(), Some(handle));

        let again = mesh.finalize(&mut up).unwrap();
        assert_eq!(again, handle);
        assert_eq!(up.upload_count(), 1);

        let record = &up.records()[0];
        assert_eq!(record.element_count, 6);
        assert_eq!(
            record.attributes,
            vec![
                (AttributeIndex::Position, 3, 4),
                (AttributeIndex::Normal, 3, 4),
                (AttributeIndex::Color, 3, 4),
            ]
        );
    }

    #[test]
    fn finalize_failures() {
        let mut mesh = MeshBuffer::new();
        assert!(matches!(
            mesh.finalize(&mut MemoryUploader::new()),
            Err(MeshError::EmptyMesh)
        ));

        mesh.add_submesh(triangle()).unwrap();
        assert!(matches!(
            mesh.finalize(&mut MemoryUploader::failing()),
            Err(MeshError::Upload)
        ));
        assert_eq!(mesh.state(), MeshState::Building);
    }

    #[test]
    fn transforms_invalidate_and_refinalize() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(quad_data()).unwrap();
        let mut up = MemoryUploader::new();

        let ops: [fn(&mut MeshBuffer); 4] = [
            |m| m.scale(Vec3::splat(2.0), None),
            |m| m.translate(Vec3::X, None),
            |m| m.normalize(true),
            |m| m.center_to_origin(Vec3::ZERO),
        ];
        for op in ops {
            mesh.finalize(&mut up).unwrap();
            assert!(mesh.is_finalized());
            op(&mut mesh);
            assert_eq!(mesh.state(), MeshState::Building);
        }
        mesh.finalize(&mut up).unwrap();
        assert!(mesh.is_finalized());
        assert_eq!(up.upload_count(), 5);
    }

    #[test]
    fn scale_restricted_to_submesh() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle()).unwrap();
        mesh.add_submesh(quad_data()).unwrap();
        mesh.scale(Vec3::splat(3.0), Some(0));
        assert_eq!(mesh.positions()[1], Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(mesh.positions()[4], Vec3::new(2.0, 0.0, 0.0));

        mesh.translate(Vec3::Z, Some(1));
        assert_eq!(mesh.positions()[0], Vec3::ZERO);
        assert_eq!(mesh.positions()[3], Vec3::Z);
    }

    #[test]
    fn zero_scale_is_skipped() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(quad_data()).unwrap();
        mesh.scale(Vec3::ZERO, None);
        assert_eq!(mesh.positions()[2], Vec3::new(2.0, 4.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "submesh 3 out of range")]
    fn unknown_submesh_panics() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle()).unwrap();
        mesh.translate(Vec3::X, Some(3));
    }

    #[test]
    fn bounding_box_is_recomputed_after_mutation() {
        let mut mesh = MeshBuffer::new();
        assert!(mesh.bounding_box().is_none());
        mesh.add_submesh(quad_data()).unwrap();
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.size, Vec3::new(2.0, 4.0, 0.0));
        assert_eq!(bb.position, Vec3::new(1.0, 2.0, 0.0));

        mesh.translate(Vec3::new(1.0, 1.0, 1.0), None);
        assert_eq!(mesh.bounding_box().unwrap().position, Vec3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn center_and_normalize() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(quad_data()).unwrap();
        mesh.normalize(true);
        let bb = mesh.bounding_box().unwrap();
        // flat z axis keeps factor 1, min of (1/2, 1/4, 1)
        assert_eq!(bb.size, Vec3::new(0.5, 1.0, 0.0));

        mesh.center_to_origin(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(mesh.bounding_box().unwrap().position, Vec3::new(0.0, 0.0, 5.0));

        mesh.normalize(false);
        assert_eq!(mesh.bounding_box().unwrap().size, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn matrix_transform_moves_normals() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle().with_normals(vec![Vec3::Z; 3])).unwrap();
        let m = Mat4::from_translation(Vec3::X) * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        mesh.transform(&m, None);
        let n = mesh.normals().unwrap()[0];
        assert!((n - Vec3::Y).length() < 1e-6);
        assert!((mesh.positions()[0] - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn draw_ranges_per_submesh() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle().with_material(1)).unwrap();
        mesh.add_submesh(quad_data().with_material(2)).unwrap();
        mesh.finalize(&mut MemoryUploader::new()).unwrap();
        assert_eq!(
            mesh.draw_ranges(),
            vec![
                DrawRange {
                    material: 1,
                    first_index: 0,
                    index_count: 3
                },
                DrawRange {
                    material: 2,
                    first_index: 3,
                    index_count: 6
                },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "not finalized")]
    fn drawing_unfinalized_panics() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle()).unwrap();
        mesh.draw_ranges();
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut mesh = MeshBuffer::new();
        mesh.add_submesh(triangle().with_normals(vec![Vec3::Z; 3])).unwrap();
        mesh.clear();
        assert_eq!(mesh.state(), MeshState::Empty);
        // a new first submesh may pick a different layout
        mesh.add_submesh(triangle()).unwrap();
        assert!(mesh.normals().is_none());
    }
}
