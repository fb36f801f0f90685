//! Growable per-instance vertex buffers.
//!
//! Capacity doubles when a write exceeds it. Buffers never shrink.

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 256;

/// A vertex buffer of `T` instances that grows on demand.
pub struct InstanceBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: usize,
    count: usize,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> InstanceBuffer<T> {
    /// Buffer with room for `capacity` instances.
    pub fn with_capacity(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let capacity = (capacity * std::mem::size_of::<T>()).max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity),
            capacity,
            count: 0,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = if needed > self.capacity {
            let new_capacity = (needed * 2).max(self.capacity + MIN_CAPACITY);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer = Self::allocate(device, &self.label, new_capacity);
            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// Slice covering the written instances.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        let end = (self.count * std::mem::size_of::<T>()) as u64;
        self.buffer.slice(..end.max(1))
    }

    /// Number of instances written.
    pub fn count(&self) -> u32 {
        self.count as u32
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
