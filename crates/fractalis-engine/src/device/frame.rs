/// Represents a single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// Hand it back to `Gpu::submit` as soon as the draw is recorded.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
