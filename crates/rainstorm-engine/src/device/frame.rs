/// Represents a single acquired frame.
///
/// Short-lived: it lives from the clear step to the swap step of one loop
/// iteration. Holding the surface texture prevents acquisition of the next
/// frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
