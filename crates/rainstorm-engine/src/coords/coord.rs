/// Pixel-space position.
///
/// Origin is the top-left pixel; +X right, +Y down. Valid positions for a
/// `width x height` target are `[0, width) x [0, height)`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns `true` when the position lies inside a `width x height` grid.
    #[inline]
    pub const fn within(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_is_half_open() {
        assert!(Coord::new(0, 0).within(4, 3));
        assert!(Coord::new(3, 2).within(4, 3));
        assert!(!Coord::new(4, 2).within(4, 3));
        assert!(!Coord::new(3, 3).within(4, 3));
    }

    #[test]
    fn zero_sized_grid_contains_nothing() {
        assert!(!Coord::new(0, 0).within(0, 0));
    }
}
