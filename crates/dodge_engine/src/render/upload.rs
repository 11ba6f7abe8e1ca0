//! Upload-visible buffer storage
//!
//! CPU-side stand-in for a persistently mapped upload heap. The renderer
//! proper consumes the raw bytes; the simulation only ever writes through
//! [`UploadBuffer::copy_data`]. Constant-buffer elements are padded to the
//! 256-byte boundary hardware constant buffers require.

use std::marker::PhantomData;

use bytemuck::Pod;

/// Round `size` up to the next multiple of 256
pub fn align_constant_buffer_size(size: usize) -> usize {
    (size + 255) & !255
}

/// Typed upload buffer holding `element_count` copies of `T`
///
/// Mirrors a mapped GPU upload resource: writes go straight through, every
/// element every frame, with no diffing or caching.
pub struct UploadBuffer<T> {
    storage: Vec<u8>,
    element_size: usize,
    element_count: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> UploadBuffer<T> {
    /// Create a buffer for `element_count` elements.
    ///
    /// `is_constant_buffer` selects the 256-byte element padding required
    /// for constant-buffer views.
    pub fn new(element_count: usize, is_constant_buffer: bool) -> Self {
        let raw_size = std::mem::size_of::<T>();
        let element_size = if is_constant_buffer {
            align_constant_buffer_size(raw_size)
        } else {
            raw_size
        };

        Self {
            storage: vec![0u8; element_size * element_count],
            element_size,
            element_count,
            _marker: PhantomData,
        }
    }

    /// Write one element into the buffer.
    ///
    /// Out-of-range indices are rejected rather than written past the end.
    pub fn copy_data(&mut self, index: usize, data: &T) {
        debug_assert!(index < self.element_count, "upload index out of range");
        if index >= self.element_count {
            return;
        }

        let offset = index * self.element_size;
        let bytes = bytemuck::bytes_of(data);
        self.storage[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Read one element back out of the buffer
    pub fn read(&self, index: usize) -> Option<T> {
        if index >= self.element_count {
            return None;
        }
        let offset = index * self.element_size;
        let size = std::mem::size_of::<T>();
        Some(bytemuck::pod_read_unaligned(
            &self.storage[offset..offset + size],
        ))
    }

    /// Raw bytes of one element, padding included
    pub fn element_bytes(&self, index: usize) -> &[u8] {
        let offset = index * self.element_size;
        &self.storage[offset..offset + self.element_size]
    }

    /// Size of one (padded) element in bytes
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of elements in the buffer
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// The whole mapped region
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }
}

impl<T> std::fmt::Debug for UploadBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadBuffer")
            .field("element_size", &self.element_size)
            .field("element_count", &self.element_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_buffer_alignment() {
        assert_eq!(align_constant_buffer_size(1), 256);
        assert_eq!(align_constant_buffer_size(64), 256);
        assert_eq!(align_constant_buffer_size(256), 256);
        assert_eq!(align_constant_buffer_size(257), 512);
    }

    #[test]
    fn test_copy_data_roundtrip() {
        let mut buffer = UploadBuffer::<[f32; 4]>::new(2, true);
        buffer.copy_data(1, &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(buffer.read(1), Some([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(buffer.read(0), Some([0.0; 4]));
        assert_eq!(buffer.element_size(), 256);
        assert_eq!(buffer.as_bytes().len(), 512);
    }

    #[test]
    fn test_out_of_range_write_is_rejected() {
        let mut buffer = UploadBuffer::<u32>::new(1, false);
        buffer.copy_data(0, &7);
        assert_eq!(buffer.read(1), None);
        assert_eq!(buffer.read(0), Some(7));
    }
}
