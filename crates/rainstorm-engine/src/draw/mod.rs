//! Drawing API exposed to applications.
//!
//! Every drawing call ends in [`Canvas::plot`]; lines are rasterized on the
//! CPU and plotted pixel by pixel. Out-of-range pixels are clipped.

mod line;

pub use line::Line;

use crate::coords::Coord;
use crate::paint::Color;

/// Pixel-addressable drawing target.
///
/// Implemented by the CPU [`Framebuffer`](crate::framebuffer::Framebuffer)
/// and by the immediate-point presenter.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Plots one pixel. Returns `false` when the pixel was clipped or dropped.
    fn plot(&mut self, coord: Coord, color: Color) -> bool;

    /// Overwrites the whole canvas with `color`.
    fn fill(&mut self, color: Color);

    fn draw_point(&mut self, coord: Coord, color: Color) {
        self.plot(coord, color);
    }

    /// Plots the pixels of the line that fall on the canvas.
    fn draw_line(&mut self, from: Coord, to: Coord, color: Color) {
        for p in Line::clipped(from, to, self.width(), self.height()) {
            self.draw_point(p, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn draw_line_plots_green_run() {
        let mut fb = Framebuffer::allocate(8, 2).unwrap();
        let green = Color::rgba(0, 255, 0, 255);
        fb.draw_line(Coord::new(0, 0), Coord::new(4, 0), green);

        for x in 0..=4 {
            assert_eq!(fb.read(Coord::new(x, 0)), Some(green));
        }
        assert_eq!(fb.read(Coord::new(5, 0)), Some(Color::TRANSPARENT));

        let lit = fb.as_bytes().chunks_exact(4).filter(|px| px[3] != 0).count();
        assert_eq!(lit, 5);
    }

    #[test]
    fn degenerate_line_plots_single_pixel() {
        let mut fb = Framebuffer::allocate(4, 4).unwrap();
        fb.draw_line(Coord::new(2, 1), Coord::new(2, 1), Color::WHITE);
        let lit: Vec<_> = fb
            .as_bytes()
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| px[3] != 0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lit, vec![4 + 2]);
    }

    #[test]
    fn line_leaving_the_canvas_is_clipped() {
        let mut fb = Framebuffer::allocate(4, 4).unwrap();
        fb.draw_line(Coord::new(0, 0), Coord::new(10, 0), Color::WHITE);
        for x in 0..4 {
            assert_eq!(fb.read(Coord::new(x, 0)), Some(Color::WHITE));
        }
        assert_eq!(fb.len(), 64);
    }

    #[test]
    fn swapped_endpoints_produce_identical_buffers() {
        let mut a = Framebuffer::allocate(32, 32).unwrap();
        let mut b = Framebuffer::allocate(32, 32).unwrap();
        a.draw_line(Coord::new(3, 29), Coord::new(27, 4), Color::RED);
        b.draw_line(Coord::new(27, 4), Coord::new(3, 29), Color::RED);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn far_endpoint_only_touches_the_visible_part() {
        let mut fb = Framebuffer::allocate(4, 4).unwrap();
        fb.draw_line(Coord::new(0, 0), Coord::new(u32::MAX, 1), Color::WHITE);
        for x in 0..4 {
            assert_eq!(fb.read(Coord::new(x, 0)), Some(Color::WHITE));
        }
        let lit = fb.as_bytes().chunks_exact(4).filter(|px| px[3] != 0).count();
        assert_eq!(lit, 4);
    }
}
