//! Frame loop and lifecycle.
//!
//! [`Engine`] owns the window provider, the presenter and the framebuffer,
//! and drives one [`App`] through
//! `Constructed -> Running (<-> Stopping) -> Destroyed`.
//!
//! Every frame runs the same steps in the same order:
//! 1. tick the clock; update the FPS title once per elapsed second
//! 2. check for a close request
//! 3. drain pending input
//! 4. acquire the frame and clear it to black
//! 5. `App::on_update`
//! 6. present the framebuffer (or the recorded points)
//! 7. swap
//!
//! A stop request (close, `Exit`, fatal surface error) lets the current frame
//! finish, then asks `App::on_destroy`, which may veto.

mod config;
mod state;


pub use config::{Dimensions, EngineConfig};
pub use state::{EngineState, LoopController};

use crate::core::{App, AppControl, Command, FrameCtx, RuntimeCtx};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::draw::Canvas;
use crate::error::{EngineError, EngineResult};
use crate::framebuffer::Framebuffer;
use crate::input::InputState;
use crate::render::{GpuPresenter, Presenter};
use crate::time::{fps_title, FpsCounter, FrameClock, FrameTime};
use crate::window::{Platform, WinitPlatform};

/// Engine instance. One per window.
pub struct Engine<P: Platform = WinitPlatform, R: Presenter = GpuPresenter> {
    config: EngineConfig,
    controller: LoopController,

    presenter: R,
    /// `Some` in textured-quad mode.
    framebuffer: Option<Framebuffer>,
    /// Declared last: the window outlives everything drawn into it.
    platform: P,

    clock: FrameClock,
    fps: FpsCounter,
    input: InputState,
    title: String,

    frames: u64,
    warned_fatal: bool,
    torn_down: bool,
}

impl Engine<WinitPlatform, GpuPresenter> {
    /// Opens the window, creates the graphics context, compiles the
    /// presentation program and allocates the framebuffer.
    ///
    /// Any failure is returned and everything acquired so far is released.
    pub fn construct(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;

        let (platform, window) = WinitPlatform::open(config.window_config())?;

        let gpu = pollster::block_on(Gpu::new(window, config.gpu_init()))
            .map_err(EngineError::Context)?;

        let presenter = GpuPresenter::new(
            gpu,
            config.strategy,
            &config.shader,
            config.screen.width,
            config.screen.height,
        )?;

        Self::from_parts(config, platform, presenter)
    }
}

/// Constructs an engine and runs `app` to completion.
pub fn run<A: App + ?Sized>(config: EngineConfig, app: &mut A) -> EngineResult<()> {
    let mut engine = Engine::construct(config)?;
    engine.init(app)
}

impl<P: Platform, R: Presenter> Engine<P, R> {
    /// Assembles an engine from an already opened provider and presenter.
    pub fn from_parts(config: EngineConfig, platform: P, presenter: R) -> EngineResult<Self> {
        config.validate()?;

        if presenter.strategy() != config.strategy {
            log::warn!(
                "presenter strategy {:?} overrides configured {:?}",
                presenter.strategy(),
                config.strategy
            );
        }

        let framebuffer = if presenter.strategy().uses_framebuffer() {
            Some(Framebuffer::allocate(
                config.screen.width,
                config.screen.height,
            )?)
        } else {
            None
        };

        let now = platform.now();
        let clock = match config.dt_clamp {
            Some((min, max)) => FrameClock::with_clamps(now, min, max),
            None => FrameClock::starting_at(now),
        };
        let mut controller = LoopController::default();
        controller.transition(EngineState::Constructed)?;

        log::info!(
            "engine constructed: screen {}x{}, inner {}x{}, {:?}",
            config.screen.width,
            config.screen.height,
            config.inner.width,
            config.inner.height,
            presenter.strategy()
        );

        Ok(Self {
            title: config.title.clone(),
            config,
            controller,
            presenter,
            framebuffer,
            platform,
            clock,
            fps: FpsCounter::starting_at(now),
            input: InputState::default(),
            frames: 0,
            warned_fatal: false,
            torn_down: false,
        })
    }

    /// Runs `app` until it confirms shutdown, then tears the engine down.
    ///
    /// Returns an error only for lifecycle misuse (calling `init` twice);
    /// callback results are stop or resume requests.
    pub fn init<A: App + ?Sized>(&mut self, app: &mut A) -> EngineResult<()> {
        self.controller.transition(EngineState::Running)?;

        let now = self.platform.now();
        self.clock.reset(now);
        self.fps.reset(now);
        log::info!("loop start");

        let created = self.dispatch(FrameTime { dt: 0.0, now, frame_index: 0 }, |ctx| {
            app.on_create(ctx)
        });
        if created.is_exit() {
            log::info!("on_create requested exit; skipping the loop");
            self.controller.transition(EngineState::Stopping)?;
            self.controller.transition(EngineState::Destroyed)?;
            self.teardown();
            return Ok(());
        }

        loop {
            match self.controller.state() {
                EngineState::Running => self.frame(app)?,
                EngineState::Stopping => {
                    let time = FrameTime {
                        dt: 0.0,
                        now: self.platform.now(),
                        frame_index: self.frames,
                    };
                    if self.dispatch(time, |ctx| app.on_destroy(ctx)).is_exit() {
                        self.controller.transition(EngineState::Destroyed)?;
                    } else {
                        log::info!("shutdown vetoed; resuming");
                        self.controller.transition(EngineState::Running)?;
                    }
                }
                _ => break,
            }
        }

        log::info!("loop end after {} frames", self.frames);
        self.teardown();
        Ok(())
    }

    /// One iteration of the frame cycle.
    fn frame<A: App + ?Sized>(&mut self, app: &mut A) -> EngineResult<()> {
        let now = self.platform.now();
        let time = self.clock.tick_at(now);
        self.frames += 1;

        if let Some(fps) = self.fps.record(now, time.dt) {
            self.platform.set_title(&fps_title(&self.title, fps));
        }

        if self.platform.take_close_request() {
            log::info!("close requested");
            self.request_stop()?;
        }

        self.input.begin_frame();
        self.platform.poll_events(&mut self.input);

        match self.presenter.begin_frame() {
            Ok(()) => {}
            Err(SurfaceErrorAction::Fatal) => {
                if !self.warned_fatal {
                    log::error!("presentation surface lost; stopping");
                    self.warned_fatal = true;
                }
                self.request_stop()?;
            }
            Err(_) => {}
        }

        if self.dispatch(time, |ctx| app.on_update(ctx)).is_exit() {
            self.request_stop()?;
        }

        self.presenter.present(self.framebuffer.as_ref());
        self.presenter.swap();
        Ok(())
    }

    fn request_stop(&mut self) -> EngineResult<()> {
        if self.controller.is_running() {
            self.controller.transition(EngineState::Stopping)?;
        }
        Ok(())
    }

    /// Runs one callback against the active canvas and applies the commands
    /// it buffered.
    fn dispatch<F>(&mut self, time: FrameTime, callback: F) -> AppControl
    where
        F: FnOnce(&mut FrameCtx<'_>) -> AppControl,
    {
        let mut runtime = RuntimeCtx::default();

        let mut control = {
            let canvas: &mut dyn Canvas = match self.framebuffer.as_mut() {
                Some(fb) => fb,
                None => &mut self.presenter,
            };
            let mut ctx = FrameCtx::new(
                canvas,
                &self.input,
                &mut runtime,
                time,
                self.config.screen,
                self.config.inner,
            );
            callback(&mut ctx)
        };

        for cmd in runtime.drain() {
            match cmd {
                Command::SetTitle(title) => {
                    self.platform.set_title(&title);
                    self.title = title;
                }
                Command::Exit => control = AppControl::Exit,
            }
        }

        control
    }

    /// Releases GPU resources, then the framebuffer, then the window.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.presenter.release();
        if self.framebuffer.take().is_some() {
            log::debug!("framebuffer released");
        }
        self.platform.shutdown();
        log::info!("engine destroyed");
    }

    pub fn state(&self) -> EngineState {
        self.controller.state()
    }

    /// Lifecycle states entered so far.
    pub fn transitions(&self) -> &[EngineState] {
        self.controller.history()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current base title (without the FPS suffix).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// `None` in immediate-point mode and after teardown.
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }
}

impl<P: Platform, R: Presenter> Drop for Engine<P, R> {
    fn drop(&mut self) {
        if self.controller.state() == EngineState::Constructed {
            // Never run; record the shortcut for completeness.
            let _ = self.controller.transition(EngineState::Destroyed);
        }
        self.teardown();
    }
}
