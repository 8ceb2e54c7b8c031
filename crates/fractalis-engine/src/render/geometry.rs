use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Normalized device coordinates.
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two counter-clockwise triangles covering `[-1, 1] x [-1, 1]`.
pub const FULL_SURFACE: [QuadVertex; 6] = [
    QuadVertex::new(-1.0, -1.0),
    QuadVertex::new(1.0, -1.0),
    QuadVertex::new(-1.0, 1.0),
    QuadVertex::new(-1.0, 1.0),
    QuadVertex::new(1.0, -1.0),
    QuadVertex::new(1.0, 1.0),
];

pub const FULL_SURFACE_VERTEX_COUNT: u32 = FULL_SURFACE.len() as u32;
