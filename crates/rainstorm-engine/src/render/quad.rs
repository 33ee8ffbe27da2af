use wgpu::util::DeviceExt;

use crate::framebuffer::Framebuffer;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{create_pipeline, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
use super::program::Program;

/// Textured-quad presentation.
///
/// The framebuffer is uploaded whole into a texture of the same size once per
/// frame and drawn as two triangles covering the viewport. Sampling is
/// nearest-neighbour so pixels stay crisp when the drawable area is larger
/// than the framebuffer.
pub struct TexturedQuad {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    texture: wgpu::Texture,
    texture_size: wgpu::Extent3d,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    warned_size_mismatch: bool,
}

impl TexturedQuad {
    /// Creates the texture, sampler, quad geometry and pipeline.
    pub fn new(ctx: &RenderCtx<'_>, program: &Program, width: u32, height: u32) -> Self {
        let shader = program.create_module(ctx.device);

        // Bytes are stored as authored; an sRGB texture on an sRGB surface
        // decodes then re-encodes, leaving them unchanged on screen.
        let texture_format = if ctx.surface_format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture_size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("rainstorm framebuffer texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("rainstorm framebuffer sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("rainstorm quad bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rainstorm quad bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = create_pipeline(
            ctx.device,
            "rainstorm quad pipeline",
            &shader,
            &bind_group_layout,
            QuadVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            ctx.surface_format,
        );

        let quad_vbo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("rainstorm quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let quad_ibo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("rainstorm quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "textured quad ready: {}x{} {:?}",
            texture_size.width,
            texture_size.height,
            texture_format
        );

        Self {
            pipeline,
            bind_group,
            texture,
            texture_size,
            quad_vbo,
            quad_ibo,
            warned_size_mismatch: false,
        }
    }

    /// Copies the whole framebuffer into the texture.
    ///
    /// Returns `false` (and uploads nothing) when the framebuffer does not
    /// match the texture dimensions.
    pub fn upload(&mut self, queue: &wgpu::Queue, framebuffer: &Framebuffer) -> bool {
        let size = self.texture_size;
        if framebuffer.width() != size.width || framebuffer.height() != size.height {
            if !self.warned_size_mismatch {
                log::warn!(
                    "framebuffer {}x{} does not match texture {}x{}; upload skipped",
                    framebuffer.width(),
                    framebuffer.height(),
                    size.width,
                    size.height
                );
                self.warned_size_mismatch = true;
            }
            return false;
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            framebuffer.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(framebuffer.stride()),
                rows_per_image: Some(size.height),
            },
            size,
        );
        true
    }

    /// Draws the quad over the whole target.
    pub fn draw(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.load_pass("rainstorm quad pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Frees GPU memory now rather than at drop.
    pub fn release(self) {
        self.texture.destroy();
        self.quad_vbo.destroy();
        self.quad_ibo.destroy();
        log::debug!("textured quad released");
    }
}
