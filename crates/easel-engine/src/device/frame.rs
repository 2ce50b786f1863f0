/// One acquired surface texture plus its encoder.
///
/// Dropping the surface texture after submission presents it, so a frame must
/// be submitted before the next one is acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
