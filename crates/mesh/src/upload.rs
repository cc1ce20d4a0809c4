//! Boundary between CPU-side mesh data and whatever owns the GPU.

use serde::{Deserialize, Serialize};

/// Shader attribute slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum AttributeIndex {
    Position = 0,
    Normal = 1,
    Coord0 = 2,
    Color = 3,
}

impl AttributeIndex {
    pub const fn location(self) -> u32 {
        self as u32
    }
}

/// One tightly packed vertex attribute array.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStream {
    pub index: AttributeIndex,
    /// Floats per vertex: 2, 3 or 4.
    pub components: u8,
    pub data: Vec<f32>,
}

impl AttributeStream {
    pub fn new(index: AttributeIndex, components: u8, data: Vec<f32>) -> Self {
        debug_assert!(matches!(components, 2..=4));
        debug_assert_eq!(data.len() % usize::from(components), 0);
        Self {
            index,
            components,
            data,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / usize::from(self.components)
    }

    /// Raw bytes as handed to the graphics API.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Opaque identifier of an uploaded buffer. Zero means the upload failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BufferHandle(pub u32);

impl BufferHandle {
    pub const INVALID: Self = Self(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// GPU buffer upload capability.
///
/// Called exactly once per successful mesh finalize, on the thread that owns
/// the graphics context.
pub trait BufferUploader {
    fn upload(&mut self, attributes: &[AttributeStream], elements: &[u32]) -> BufferHandle;
}

/// What a [`MemoryUploader`] saw for one upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub handle: BufferHandle,
    pub attributes: Vec<(AttributeIndex, u8, usize)>,
    pub element_count: usize,
    pub byte_len: usize,
}

/// Uploader that keeps nothing but a record of each call. Used headless and
/// in tests.
#[derive(Debug, Default)]
pub struct MemoryUploader {
    records: Vec<UploadRecord>,
    fail: bool,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// An uploader whose every upload returns [`BufferHandle::INVALID`].
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn upload_count(&self) -> usize {
        self.records.len()
    }
}

impl BufferUploader for MemoryUploader {
    fn upload(&mut self, attributes: &[AttributeStream], elements: &[u32]) -> BufferHandle {
        if self.fail {
            return BufferHandle::INVALID;
        }
        let handle = BufferHandle(self.records.len() as u32 + 1);
        let byte_len = attributes.iter().map(|a| a.as_bytes().len()).sum::<usize>()
            + bytemuck::cast_slice::<u32, u8>(elements).len();
        self.records.push(UploadRecord {
            handle,
            attributes: attributes
                .iter()
                .map(|a| (a.index, a.components, a.vertex_count()))
                .collect(),
            element_count: elements.len(),
            byte_len,
        });
        tracing::debug!(handle = handle.0, byte_len, "buffer uploaded");
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_bytes_and_count() {
        let s = AttributeStream::new(AttributeIndex::Coord0, 2, vec![0.0, 1.0, 0.5, 0.5]);
        assert_eq!(s.vertex_count(), 2);
        assert_eq!(s.as_bytes().len(), 16);
        assert_eq!(AttributeIndex::Color.location(), 3);
    }

    #[test]
    fn memory_uploader_hands_out_handles() {
        let mut up = MemoryUploader::new();
        let pos = AttributeStream::new(AttributeIndex::Position, 3, vec![0.0; 9]);
        let h1 = up.upload(std::slice::from_ref(&pos), &[0, 1, 2]);
        let h2 = up.upload(&[pos], &[0, 1, 2]);
        assert!(h1.is_valid());
        assert_ne!(h1, h2);
        assert_eq!(up.upload_count(), 2);
        assert_eq!(up.records()[0].byte_len, 36 + 12);
    }

    #[test]
    fn failing_uploader() {
        let mut up = MemoryUploader::failing();
        assert!(!up.upload(&[], &[]).is_valid());
        assert_eq!(up.upload_count(), 0);
    }
}
