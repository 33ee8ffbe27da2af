//! CPU-resident pixel grid the client draws into.
//!
//! Layout: row-major, 4 bytes per pixel (`R, G, B, A`), no row padding. The
//! byte length is fixed at allocation and equals `4 * width * height` for the
//! lifetime of the buffer.

use crate::coords::Coord;
use crate::draw::Canvas;
use crate::error::{EngineError, EngineResult};
use crate::paint::Color;

/// Bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Bytes per row, fixed at allocation.
    stride: u32,
    pixels: Vec<u8>,

    warned_clip: bool,
}

impl Framebuffer {
    /// Allocates a zero-initialized `width x height` buffer.
    ///
    /// Fails when the row stride or the total byte length does not fit.
    pub fn allocate(width: u32, height: u32) -> EngineResult<Self> {
        let stride = width
            .checked_mul(BYTES_PER_PIXEL as u32)
            .ok_or(EngineError::Allocation { bytes: usize::MAX })?;
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(EngineError::Allocation { bytes: usize::MAX })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| EngineError::Allocation { bytes })?;
        pixels.resize(bytes, 0);

        log::debug!("framebuffer allocated: {width}x{height} ({bytes} bytes)");

        Ok(Self {
            width,
            height,
            stride,
            pixels,
            warned_clip: false,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte length of the pixel storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Byte offset of `coord`, or `None` when it lies outside the buffer.
    #[inline]
    pub fn offset(&self, coord: Coord) -> Option<usize> {
        if !coord.within(self.width, self.height) {
            return None;
        }
        Some(
            coord.y as usize * self.width as usize * BYTES_PER_PIXEL
                + coord.x as usize * BYTES_PER_PIXEL,
        )
    }

    /// Stores `color` at `coord`. Out-of-range positions are clipped.
    ///
    /// Returns `false` when the write was clipped.
    pub fn write(&mut self, coord: Coord, color: Color) -> bool {
        let Some(at) = self.offset(coord) else {
            if !self.warned_clip {
                log::debug!(
                    "framebuffer: write at ({}, {}) clipped to {}x{}; further clips are silent",
                    coord.x,
                    coord.y,
                    self.width,
                    self.height
                );
                self.warned_clip = true;
            }
            return false;
        };
        self.pixels[at..at + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
        true
    }

    /// Like [`write`](Self::write) but reports out-of-range positions.
    pub fn try_write(&mut self, coord: Coord, color: Color) -> EngineResult<()> {
        let at = self.offset(coord).ok_or(EngineError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[at..at + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
        Ok(())
    }

    /// Reads the color stored at `coord`.
    pub fn read(&self, coord: Coord) -> Option<Color> {
        let at = self.offset(coord)?;
        let px = &self.pixels[at..at + BYTES_PER_PIXEL];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Immutable view of the whole buffer, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Canvas for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn plot(&mut self, coord: Coord, color: Color) -> bool {
        self.write(coord, color)
    }

    fn fill(&mut self, color: Color) {
        Framebuffer::fill(self, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_zeroed_and_sized() {
        let fb = Framebuffer::allocate(800, 600).unwrap();
        assert_eq!(fb.len(), 4 * 800 * 600);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.stride(), 4 * 800);
    }

    #[test]
    fn stride_overflow_is_an_allocation_error() {
        // Zero rows keep the byte length at zero; only the stride overflows.
        let err = Framebuffer::allocate(1 << 30, 0);
        assert!(matches!(err, Err(EngineError::Allocation { .. })));

        let fb = Framebuffer::allocate(u32::MAX / 4, 0).unwrap();
        assert_eq!(fb.stride(), (u32::MAX / 4) * 4);
    }

    #[test]
    fn write_lands_at_row_major_offset() {
        let mut fb = Framebuffer::allocate(800, 600).unwrap();
        assert!(fb.write(Coord::new(10, 20), Color::rgba(255, 0, 0, 255)));

        let at = 20 * 800 * 4 + 10 * 4;
        assert_eq!(at, 64040);
        assert_eq!(&fb.as_bytes()[at..at + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut fb = Framebuffer::allocate(7, 5).unwrap();
        let c = Color::rgba(12, 34, 56, 78);
        for y in 0..5 {
            for x in 0..7 {
                fb.write(Coord::new(x, y), c);
                assert_eq!(fb.read(Coord::new(x, y)), Some(c));
            }
        }
    }

    #[test]
    fn out_of_range_write_is_clipped() {
        let mut fb = Framebuffer::allocate(4, 4).unwrap();
        let before = fb.clone();

        assert!(!fb.write(Coord::new(4, 0), Color::WHITE));
        assert!(!fb.write(Coord::new(0, 4), Color::WHITE));
        assert!(!fb.write(Coord::new(u32::MAX, u32::MAX), Color::WHITE));

        assert_eq!(fb.as_bytes(), before.as_bytes());
        assert_eq!(fb.len(), 64);
    }

    #[test]
    fn try_write_reports_bounds() {
        let mut fb = Framebuffer::allocate(4, 3).unwrap();
        let err = fb.try_write(Coord::new(4, 1), Color::WHITE).unwrap_err();
        match err {
            EngineError::OutOfBounds { x, y, width, height } => {
                assert_eq!((x, y, width, height), (4, 1, 4, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fb.try_write(Coord::new(3, 2), Color::WHITE).is_ok());
    }

    #[test]
    fn read_out_of_range_is_none() {
        let fb = Framebuffer::allocate(2, 2).unwrap();
        assert_eq!(fb.read(Coord::new(2, 0)), None);
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut fb = Framebuffer::allocate(3, 2).unwrap();
        fb.write(Coord::new(1, 1), Color::RED);
        fb.fill(Color::BLUE);
        assert!(fb.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
    }

    #[test]
    fn oversized_allocation_fails_cleanly() {
        let err = Framebuffer::allocate(u32::MAX, u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(err, Err(EngineError::Allocation { .. })));
        #[cfg(not(target_pointer_width = "64"))]
        assert!(err.is_err());
    }
}
