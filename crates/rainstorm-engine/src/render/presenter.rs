use crate::coords::{Coord, Viewport};
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::draw::Canvas;
use crate::error::EngineResult;
use crate::framebuffer::Framebuffer;
use crate::paint::Color;

use super::points::ImmediatePoints;
use super::program::{Program, ProgramSource, POINT_WGSL, QUAD_WGSL};
use super::quad::TexturedQuad;
use super::{RenderCtx, RenderTarget};

/// How plotted pixels reach the display.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PresentStrategy {
    /// Draw into a CPU framebuffer, upload it once per frame, draw one quad.
    #[default]
    TexturedQuad,
    /// One point-primitive draw per plotted pixel; no framebuffer.
    ImmediatePoints,
}

impl PresentStrategy {
    /// Whether the strategy draws through a CPU framebuffer.
    pub fn uses_framebuffer(self) -> bool {
        matches!(self, PresentStrategy::TexturedQuad)
    }
}

/// Display side of the frame cycle.
///
/// Called by the loop in a fixed order every frame:
/// [`begin_frame`](Self::begin_frame), then drawing, then
/// [`present`](Self::present), then [`swap`](Self::swap). As a [`Canvas`] it
/// receives plots directly in [`PresentStrategy::ImmediatePoints`] mode.
pub trait Presenter: Canvas {
    fn strategy(&self) -> PresentStrategy;

    /// Acquires the next frame and clears it to black.
    ///
    /// An `Err` means no frame is available this iteration; `Fatal` also
    /// asks the loop to stop.
    fn begin_frame(&mut self) -> Result<(), SurfaceErrorAction>;

    /// Moves the frame's content to the display target. `framebuffer` is
    /// `Some` in textured-quad mode.
    fn present(&mut self, framebuffer: Option<&Framebuffer>);

    /// Submits and shows the frame. May block on vertical sync.
    fn swap(&mut self);

    /// Frees every GPU resource. Idempotent.
    fn release(&mut self);
}

enum Strategy {
    Quad(TexturedQuad),
    Points(ImmediatePoints),
}

/// wgpu-backed presenter.
pub struct GpuPresenter {
    kind: PresentStrategy,
    width: u32,
    height: u32,

    /// Field order is drop order: pipelines and the in-flight frame go
    /// before the device that created them.
    strategy: Option<Strategy>,
    frame: Option<GpuFrame>,
    gpu: Option<Gpu>,

    warned_no_frame: bool,
}

impl GpuPresenter {
    /// Compiles the strategy's program and creates its GPU resources.
    ///
    /// `width`/`height` is the client drawing resolution; the result is
    /// stretched over whatever the surface size is.
    pub fn new(
        gpu: Gpu,
        kind: PresentStrategy,
        source: &ProgramSource,
        width: u32,
        height: u32,
    ) -> EngineResult<Self> {
        let viewport = Viewport::from_pixels(width, height);
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);

        let strategy = match kind {
            PresentStrategy::TexturedQuad => {
                let program = Program::compile("rainstorm quad program", source, QUAD_WGSL)?;
                Strategy::Quad(TexturedQuad::new(&ctx, &program, width, height))
            }
            PresentStrategy::ImmediatePoints => {
                let program = Program::compile("rainstorm point program", source, POINT_WGSL)?;
                Strategy::Points(ImmediatePoints::new(&ctx, &program))
            }
        };

        log::info!("presenter ready: {kind:?} at {width}x{height}");

        Ok(Self {
            kind,
            width,
            height,
            strategy: Some(strategy),
            frame: None,
            gpu: Some(gpu),
            warned_no_frame: false,
        })
    }

    fn srgb_target(&self) -> bool {
        self.gpu
            .as_ref()
            .is_some_and(|gpu| gpu.surface_format().is_srgb())
    }

    fn clear_frame(&mut self, color: Color) {
        let [r, g, b, a] = color.to_f32(self.srgb_target());
        let Some(frame) = self.frame.as_mut() else { return };
        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        let _pass = target.clear_pass(
            "rainstorm clear pass",
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        );
    }
}

impl Canvas for GpuPresenter {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn plot(&mut self, coord: Coord, color: Color) -> bool {
        if !coord.within(self.width, self.height) {
            return false;
        }

        let Self {
            strategy,
            frame,
            gpu,
            warned_no_frame,
            ..
        } = self;

        let (Some(Strategy::Points(points)), Some(gpu)) = (strategy.as_mut(), gpu.as_ref()) else {
            return false;
        };
        let Some(frame) = frame.as_mut() else {
            if !*warned_no_frame {
                log::debug!("point plotted without an acquired frame; dropped");
                *warned_no_frame = true;
            }
            return false;
        };

        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        points.draw(gpu.device(), &mut target, coord, color);
        true
    }

    /// Clears the current frame to `color` in one pass.
    fn fill(&mut self, color: Color) {
        self.clear_frame(color);
    }
}

impl Presenter for GpuPresenter {
    fn strategy(&self) -> PresentStrategy {
        self.kind
    }

    fn begin_frame(&mut self) -> Result<(), SurfaceErrorAction> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Err(SurfaceErrorAction::Fatal);
        };

        match gpu.begin_frame() {
            Ok(frame) => {
                self.frame = Some(frame);
                self.clear_frame(Color::BLACK);
                Ok(())
            }
            Err(err) => Err(gpu.handle_surface_error(err)),
        }
    }

    fn present(&mut self, framebuffer: Option<&Framebuffer>) {
        let (Some(gpu), Some(frame), Some(strategy)) =
            (self.gpu.as_ref(), self.frame.as_mut(), self.strategy.as_mut())
        else {
            return;
        };

        match strategy {
            Strategy::Quad(quad) => {
                let Some(fb) = framebuffer else { return };
                if quad.upload(gpu.queue(), fb) {
                    let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                    quad.draw(&mut target);
                }
            }
            Strategy::Points(points) => {
                log::trace!("frame carried {} point draws", points.reset_count());
            }
        }
    }

    fn swap(&mut self) {
        let (Some(gpu), Some(frame)) = (self.gpu.as_ref(), self.frame.take()) else {
            return;
        };
        gpu.submit(frame);
    }

    fn release(&mut self) {
        // An unsubmitted frame is discarded without presenting.
        self.frame = None;

        match self.strategy.take() {
            Some(Strategy::Quad(quad)) => quad.release(),
            Some(Strategy::Points(points)) => points.release(),
            None => {}
        }

        if self.gpu.take().is_some() {
            log::info!("graphics context destroyed");
        }
    }
}

impl Drop for GpuPresenter {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textured_quad_is_the_default() {
        assert_eq!(PresentStrategy::default(), PresentStrategy::TexturedQuad);
        assert!(PresentStrategy::TexturedQuad.uses_framebuffer());
        assert!(!PresentStrategy::ImmediatePoints.uses_framebuffer());
    }
}
