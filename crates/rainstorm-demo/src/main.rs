use rainstorm_engine::input::Key;
use rainstorm_engine::logging::{init_logging, LoggingConfig};
use rainstorm_engine::{
    App, AppControl, Color, Coord, EngineConfig, FrameCtx, PresentStrategy,
};

/// Full-screen color field, redrawn every frame into the framebuffer.
struct Plasma {
    t: f64,
}

impl App for Plasma {
    fn on_create(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        log::info!(
            "plasma: {}x{} (esc to quit)",
            ctx.screen_width(),
            ctx.screen_height()
        );
        AppControl::Continue
    }

    fn on_update(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.input().key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.t += ctx.dt();
        let (w, h) = (ctx.screen_width(), ctx.screen_height());

        for y in 0..h {
            for x in 0..w {
                let u = x as f64 / w as f64;
                let v = y as f64 / h as f64;
                let r = ((u * 6.0 + self.t).sin() * 0.5 + 0.5) * 255.0;
                let g = ((v * 5.0 - self.t * 0.7).sin() * 0.5 + 0.5) * 255.0;
                let b = (((u + v) * 4.0 + self.t * 1.3).cos() * 0.5 + 0.5) * 255.0;
                ctx.draw_point(Coord::new(x, y), Color::rgb(r as u8, g as u8, b as u8));
            }
        }

        AppControl::Continue
    }
}

/// Sparse lines from the window edges to the pointer, one point draw per pixel.
struct LineFan {
    spokes: u32,
    asked_once: bool,
}

impl App for LineFan {
    fn on_update(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.input().key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let (w, h) = (ctx.screen_width(), ctx.screen_height());
        let Some((px, py)) = ctx.pointer() else {
            ctx.draw_line(Coord::new(0, 0), Coord::new(w - 1, h - 1), Color::WHITE);
            ctx.draw_line(Coord::new(w - 1, 0), Coord::new(0, h - 1), Color::WHITE);
            return AppControl::Continue;
        };
        let target = Coord::new(px.clamp(0, w as i32 - 1) as u32, py.clamp(0, h as i32 - 1) as u32);

        for i in 0..self.spokes {
            let x = i * (w - 1) / self.spokes.max(1);
            let shade = (64 + 191 * i / self.spokes.max(1)) as u8;
            ctx.draw_line(Coord::new(x, 0), target, Color::rgb(shade, 96, 255 - shade));
            ctx.draw_line(Coord::new(x, h - 1), target, Color::rgb(255 - shade, shade, 96));
        }

        AppControl::Continue
    }

    /// The first close request is refused once to show the veto.
    fn on_destroy(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if !self.asked_once {
            self.asked_once = true;
            log::info!("close again to quit");
            ctx.set_title("rainstorm - close again to quit");
            return AppControl::Continue;
        }
        AppControl::Exit
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let points = std::env::args().skip(1).any(|a| a == "points");

    if points {
        let config = EngineConfig::new(640, 480)
            .with_title("rainstorm points")
            .with_strategy(PresentStrategy::ImmediatePoints);
        let mut app = LineFan {
            spokes: 24,
            asked_once: false,
        };
        rainstorm_engine::run(config, &mut app)?;
    } else {
        let config = EngineConfig::new(800, 600).with_title("rainstorm plasma");
        let mut app = Plasma { t: 0.0 };
        rainstorm_engine::run(config, &mut app)?;
    }

    Ok(())
}
