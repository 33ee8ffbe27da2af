use crate::coords::Coord;
use crate::draw::Canvas;
use crate::engine::Dimensions;
use crate::input::InputState;
use crate::paint::Color;
use crate::time::FrameTime;

/// Engine commands requested from inside a callback.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Replaces the base window title. The FPS suffix is kept.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    /// Requests shutdown, as if the callback had returned `Exit`.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    SetTitle(String),
    Exit,
}

/// Per-callback context.
///
/// Drawing goes to the framebuffer in textured-quad mode and straight to the
/// presenter in immediate-point mode; callers see the same API either way.
pub struct FrameCtx<'a> {
    canvas: &'a mut dyn Canvas,
    input: &'a InputState,
    runtime: &'a mut RuntimeCtx,

    pub time: FrameTime,
    pub screen: Dimensions,
    pub inner: Dimensions,
}

impl<'a> FrameCtx<'a> {
    pub(crate) fn new(
        canvas: &'a mut dyn Canvas,
        input: &'a InputState,
        runtime: &'a mut RuntimeCtx,
        time: FrameTime,
        screen: Dimensions,
        inner: Dimensions,
    ) -> Self {
        Self {
            canvas,
            input,
            runtime,
            time,
            screen,
            inner,
        }
    }

    /// Plots one pixel. Out-of-range pixels are clipped.
    #[inline]
    pub fn draw_point(&mut self, coord: Coord, color: Color) {
        self.canvas.draw_point(coord, color);
    }

    /// Plots every pixel on the segment between `from` and `to`, inclusive.
    #[inline]
    pub fn draw_line(&mut self, from: Coord, to: Coord, color: Color) {
        self.canvas.draw_line(from, to, color);
    }

    #[inline]
    pub fn fill(&mut self, color: Color) {
        self.canvas.fill(color);
    }

    /// The active drawing target.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    #[inline]
    pub fn screen_width(&self) -> u32 {
        self.screen.width
    }

    #[inline]
    pub fn screen_height(&self) -> u32 {
        self.screen.height
    }

    #[inline]
    pub fn inner_width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn inner_height(&self) -> u32 {
        self.inner.height
    }

    /// Pointer position in physical pixels, if it is over the window.
    #[inline]
    pub fn pointer(&self) -> Option<(i32, i32)> {
        self.input.pointer
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Seconds since the previous frame started.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.time.dt
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.runtime.set_title(title);
    }

    pub fn exit(&mut self) {
        self.runtime.exit();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::time::FrameClock;

    #[test]
    fn commands_are_buffered_in_order() {
        let mut fb = Framebuffer::allocate(4, 4).unwrap();
        let input = InputState::default();
        let mut runtime = RuntimeCtx::default();
        let time = FrameClock::starting_at(Instant::now()).tick();
        let dims = Dimensions::new(4, 4);

        let mut ctx = FrameCtx::new(&mut fb, &input, &mut runtime, time, dims, dims);
        ctx.set_title("hello");
        ctx.exit();
        ctx.draw_point(Coord::new(1, 1), Color::WHITE);

        let cmds: Vec<_> = runtime.drain().collect();
        assert_eq!(cmds, vec![Command::SetTitle("hello".into()), Command::Exit]);
        assert_eq!(fb.read(Coord::new(1, 1)), Some(Color::WHITE));
    }
}
