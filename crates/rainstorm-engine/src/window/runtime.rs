use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::error::{EngineError, EngineResult};
use crate::input::platform::translate_window_event;
use crate::input::{InputEvent, InputState};

use super::Platform;

/// Pumps allowed while waiting for the platform to hand out the window.
const CREATE_PUMP_LIMIT: usize = 100;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "rainstorm".to_string(),
            size: PhysicalSize::new(800, 600),
            resizable: false,
        }
    }
}

/// `winit` provider.
///
/// Instead of handing control to `run_app`, the event loop is pumped without
/// waiting once per frame, so the engine keeps ownership of the loop.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: Handler,
}

impl WinitPlatform {
    /// Opens the window and returns it alongside the provider.
    pub fn open(config: WindowConfig) -> EngineResult<(Self, Arc<Window>)> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut platform = Self {
            event_loop,
            handler: Handler::new(config),
        };

        for _ in 0..CREATE_PUMP_LIMIT {
            let status = platform.pump();

            if let Some(err) = platform.handler.create_error.take() {
                return Err(EngineError::Window(err));
            }
            if let Some(window) = platform.handler.window.clone() {
                log::info!(
                    "window constructed: \"{}\" {}x{}",
                    platform.handler.config.title,
                    window.inner_size().width,
                    window.inner_size().height
                );
                return Ok((platform, window));
            }
            if matches!(status, PumpStatus::Exit(_)) {
                break;
            }
        }

        Err(EngineError::WindowUnavailable)
    }

    fn pump(&mut self) -> PumpStatus {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            if !self.handler.exited {
                log::debug!("event loop exited with code {code}");
                self.handler.exited = true;
                self.handler.close_requested = true;
            }
        }
        status
    }
}

impl Platform for WinitPlatform {
    fn poll_events(&mut self, input: &mut InputState) {
        if self.handler.exited {
            return;
        }
        self.pump();
        for ev in self.handler.events.drain(..) {
            input.apply_event(&ev);
        }
    }

    fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.handler.close_requested)
    }

    fn set_title(&mut self, title: &str) {
        if let Some(w) = self.handler.window.as_ref() {
            w.set_title(title);
        }
    }

    fn shutdown(&mut self) {
        self.handler.events.clear();
        if self.handler.window.take().is_some() {
            log::info!("window destroyed");
        }
    }
}

struct Handler {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    create_error: Option<winit::error::OsError>,

    /// Input translated since the last drain.
    events: Vec<InputEvent>,
    close_requested: bool,
    exited: bool,
}

impl Handler {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            create_error: None,
            events: Vec::new(),
            close_requested: false,
            exited: false,
        }
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.create_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if !ours {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close_requested = true;
            }
            // The presenter follows the window size when it acquires a frame.
            WindowEvent::Resized(size) => {
                log::debug!("window resized to {}x{}", size.width, size.height);
            }
            _ => {
                if let Some(ev) = translate_window_event(&event) {
                    self.events.push(ev);
                }
            }
        }
    }
}
