use wgpu::util::DeviceExt;

use crate::coords::Coord;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    create_pipeline, viewport_ubo_min_binding_size, PointVertex, ViewportUniform,
};
use super::program::Program;

/// Immediate-point presentation.
///
/// No CPU pixel store: every plotted pixel becomes its own one-vertex buffer
/// and point-primitive draw. Cost grows with the number of plotted pixels,
/// so this is only suitable for sparse drawing.
pub struct ImmediatePoints {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,

    srgb_target: bool,

    /// Points drawn since the last [`reset_count`](Self::reset_count).
    drawn: u64,
}

impl ImmediatePoints {
    pub fn new(ctx: &RenderCtx<'_>, program: &Program) -> Self {
        let shader = program.create_module(ctx.device);

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("rainstorm point bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: viewport_ubo_min_binding_size(),
                        },
                        count: None,
                    }],
                });

        let uniform = ViewportUniform {
            viewport: [ctx.viewport.width, ctx.viewport.height],
            _pad: [0.0; 2],
        };
        let viewport_ubo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("rainstorm point viewport ubo"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rainstorm point bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let pipeline = create_pipeline(
            ctx.device,
            "rainstorm point pipeline",
            &shader,
            &bind_group_layout,
            PointVertex::layout(),
            wgpu::PrimitiveTopology::PointList,
            ctx.surface_format,
        );

        log::debug!(
            "immediate points ready: viewport {}x{}",
            ctx.viewport.width,
            ctx.viewport.height
        );

        Self {
            pipeline,
            bind_group,
            viewport_ubo,
            srgb_target: ctx.surface_format.is_srgb(),
            drawn: 0,
        }
    }

    /// Records one point draw at the center of pixel `coord`.
    ///
    /// The vertex buffer is dropped once the pass is recorded; wgpu keeps it
    /// alive until the submission that uses it completes.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        target: &mut RenderTarget<'_>,
        coord: Coord,
        color: Color,
    ) {
        let vertex = point_vertex(coord, color, self.srgb_target);
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("rainstorm point vbo"),
            contents: bytemuck::bytes_of(&vertex),
            usage: wgpu::BufferUsages::VERTEX,
        });

        {
            let mut rpass = target.load_pass("rainstorm point pass");
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..1, 0..1);
        }

        drop(vbo);
        self.drawn += 1;
    }

    /// Returns and clears the per-frame draw count.
    pub fn reset_count(&mut self) -> u64 {
        std::mem::take(&mut self.drawn)
    }

    /// Frees GPU memory now rather than at drop.
    pub fn release(self) {
        self.viewport_ubo.destroy();
        log::debug!("immediate points released");
    }
}

fn point_vertex(coord: Coord, color: Color, srgb_target: bool) -> PointVertex {
    PointVertex {
        pos: [coord.x as f32 + 0.5, coord.y as f32 + 0.5],
        color: color.to_f32(srgb_target),
    }
}
