use std::marker::PhantomData;

fn type_label<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Typed wrapper around a uniform buffer holding one `Content` value
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", type_label::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Create buffer with initial data
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", type_label::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });

        buffer
            .slice(..)
            .get_mapped_range_mut()
            .clone_from_slice(bytemuck::bytes_of(initial_content));
        buffer.unmap();

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: bytemuck::bytes_of(initial_content).to_vec(),
        }
    }

    /// Update buffer content, skipping the write when nothing changed
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Capacity an array buffer grows to so that it holds `needed` elements.
///
/// Grows to the next power of two, never below `minimum`.
pub fn grown_capacity(current: usize, needed: usize, minimum: usize) -> usize {
    if needed <= current {
        return current;
    }
    needed.next_power_of_two().max(minimum)
}

/// Growable per-instance vertex buffer
pub struct ArrayBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    capacity: usize,
    len: usize,
}

impl<Content: bytemuck::Pod> ArrayBuffer<Content> {
    pub const MIN_CAPACITY: usize = 64;

    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let capacity = capacity.max(Self::MIN_CAPACITY);
        let buffer = Self::allocate(device, capacity);
        ArrayBuffer {
            buffer,
            content_type: PhantomData,
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("ArrayBuffer<{}>", type_label::<Content>())),
            size: (capacity * std::mem::size_of::<Content>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replaces the contents, reallocating when `data` does not fit.
    pub fn update_data(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[Content]) {
        let capacity = grown_capacity(self.capacity, data.len(), Self::MIN_CAPACITY);
        if capacity != self.capacity {
            log::debug!(
                "Growing {} from {} to {} elements",
                type_label::<Content>(),
                self.capacity,
                capacity
            );
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len();
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
