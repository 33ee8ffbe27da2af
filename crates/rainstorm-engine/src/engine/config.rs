use std::time::Duration;

use crate::device::GpuInit;
use crate::error::{EngineError, EngineResult};
use crate::render::{PresentStrategy, ProgramSource};
use crate::window::WindowConfig;

/// Width and height in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window (and framebuffer) size in physical pixels.
    pub screen: Dimensions,

    /// Client drawing resolution, reported to callbacks. Presentation is a
    /// fixed copy of the screen-sized framebuffer.
    pub inner: Dimensions,

    /// Base window title; the FPS suffix is appended at runtime.
    pub title: String,

    pub strategy: PresentStrategy,
    pub vsync: bool,

    /// Presentation program. `Builtin` picks the one matching `strategy`.
    pub shader: ProgramSource,

    /// Overrides the GPU parameters derived from `vsync`.
    pub gpu: Option<GpuInit>,

    /// Bounds applied to each frame's delta time, `(min, max)`.
    pub dt_clamp: Option<(Duration, Duration)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen: Dimensions::new(800, 600),
            inner: Dimensions::new(800, 600),
            title: "rainstorm".to_string(),
            strategy: PresentStrategy::TexturedQuad,
            vsync: true,
            shader: ProgramSource::Builtin,
            gpu: None,
            dt_clamp: None,
        }
    }
}

impl EngineConfig {
    /// Same screen and inner size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::default().with_screen(width, height).with_inner(width, height)
    }

    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen = Dimensions::new(width, height);
        self
    }

    pub fn with_inner(mut self, width: u32, height: u32) -> Self {
        self.inner = Dimensions::new(width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_strategy(mut self, strategy: PresentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_shader(mut self, shader: ProgramSource) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_gpu(mut self, gpu: GpuInit) -> Self {
        self.gpu = Some(gpu);
        self
    }

    /// Clamps the delta time reported to callbacks, e.g. so a stall does not
    /// become one huge step.
    pub fn with_dt_clamp(mut self, min: Duration, max: Duration) -> Self {
        self.dt_clamp = Some((min, max));
        self
    }

    /// Rejects zero dimensions and inverted delta-time bounds.
    pub fn validate(&self) -> EngineResult<()> {
        if self.screen.is_empty() {
            return Err(EngineError::InvalidConfig(format!(
                "screen size {}x{} must be non-zero",
                self.screen.width, self.screen.height
            )));
        }
        if self.inner.is_empty() {
            return Err(EngineError::InvalidConfig(format!(
                "inner size {}x{} must be non-zero",
                self.inner.width, self.inner.height
            )));
        }
        if let Some((min, max)) = self.dt_clamp {
            if min > max {
                return Err(EngineError::InvalidConfig(format!(
                    "delta time clamp {min:?}..{max:?} is inverted"
                )));
            }
        }
        Ok(())
    }

    pub fn gpu_init(&self) -> GpuInit {
        self.gpu
            .clone()
            .unwrap_or_else(|| GpuInit::with_vsync(self.vsync))
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            size: winit::dpi::PhysicalSize::new(self.screen.width, self.screen.height),
            ..WindowConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_baseline() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.screen, Dimensions::new(800, 600));
        assert_eq!(cfg.inner, Dimensions::new(800, 600));
        assert_eq!(cfg.strategy, PresentStrategy::TexturedQuad);
        assert!(cfg.vsync);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let cfg = EngineConfig::new(0, 600);
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));

        let cfg = EngineConfig::new(800, 600).with_inner(800, 0);
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_dt_clamp_is_rejected() {
        let cfg = EngineConfig::default()
            .with_dt_clamp(Duration::from_millis(50), Duration::from_millis(10));
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));

        let cfg = EngineConfig::default().with_dt_clamp(Duration::ZERO, Duration::from_millis(100));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn vsync_selects_present_mode() {
        let on = EngineConfig::default().gpu_init();
        assert_eq!(on.present_mode, wgpu::PresentMode::Fifo);

        let off = EngineConfig::default().with_vsync(false).gpu_init();
        assert_eq!(off.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn window_config_carries_title_and_size() {
        let w = EngineConfig::new(320, 200).with_title("demo").window_config();
        assert_eq!(w.title, "demo");
        assert_eq!((w.size.width, w.size.height), (320, 200));
    }
}
