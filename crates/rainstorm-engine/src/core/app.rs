use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

impl AppControl {
    #[inline]
    pub fn is_exit(self) -> bool {
        self == AppControl::Exit
    }
}

impl From<bool> for AppControl {
    /// `true` continues, `false` exits.
    fn from(ok: bool) -> Self {
        if ok {
            AppControl::Continue
        } else {
            AppControl::Exit
        }
    }
}

/// Application contract.
///
/// Exactly one application is driven per engine instance.
pub trait App {
    /// Called once before the first frame. `Exit` aborts startup: no frame
    /// runs and [`on_destroy`](Self::on_destroy) is not called.
    fn on_create(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called once per frame between clearing and presenting. `Exit`
    /// requests shutdown after the current frame completes.
    fn on_update(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called when shutdown is requested. `Exit` confirms; `Continue`
    /// vetoes and the loop resumes.
    fn on_destroy(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_maps_to_control() {
        assert_eq!(AppControl::from(true), AppControl::Continue);
        assert_eq!(AppControl::from(false), AppControl::Exit);
        assert!(AppControl::Exit.is_exit());
    }
}
