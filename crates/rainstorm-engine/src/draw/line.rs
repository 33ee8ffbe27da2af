use crate::coords::Coord;

/// Integer line rasterizer.
///
/// Yields every pixel between two endpoints, both inclusive, one per step
/// along the major axis. The minor coordinate of step `i` out of `n` is
/// `round(i * k / n)` (halves round up), so each pixel is computed directly
/// and a clipped line only visits the steps that land inside the target.
///
/// Endpoints are put in a canonical order first, so `Line::new(a, b)` and
/// `Line::new(b, a)` produce the same pixels in every octant.
#[derive(Debug, Clone)]
pub struct Line {
    x_major: bool,
    major: i64,
    major_step: i64,
    minor: i64,
    minor_step: i64,
    /// Steps along the major axis.
    n: i128,
    /// Total advance along the minor axis.
    k: i128,
    next: i128,
    last: i128,
}

impl Line {
    pub fn new(a: Coord, b: Coord) -> Self {
        let (from, to) = if b < a { (b, a) } else { (a, b) };

        let (x0, y0) = (from.x as i64, from.y as i64);
        let dx = to.x as i64 - x0;
        let dy = to.y as i64 - y0;
        let x_major = dx.abs() >= dy.abs();

        let (major, minor, d_major, d_minor) = if x_major {
            (x0, y0, dx, dy)
        } else {
            (y0, x0, dy, dx)
        };
        let n = d_major.unsigned_abs() as i128;

        Self {
            x_major,
            major,
            major_step: step_sign(d_major),
            minor,
            minor_step: step_sign(d_minor),
            n,
            k: d_minor.unsigned_abs() as i128,
            next: 0,
            last: n,
        }
    }

    /// The part of the line from `a` to `b` inside `[0, width) x [0, height)`.
    ///
    /// Yields exactly the pixels of `Line::new(a, b)` that fall inside, in the
    /// same order, without stepping through the ones outside.
    pub fn clipped(a: Coord, b: Coord, width: u32, height: u32) -> Self {
        let mut line = Self::new(a, b);
        if width == 0 || height == 0 {
            line.last = -1;
            return line;
        }

        let (major_size, minor_size) = if line.x_major {
            (width, height)
        } else {
            (height, width)
        };

        let (first, last) = axis_range(line.major, line.major_step, major_size);
        let (lo_off, hi_off) = axis_range(line.minor, line.minor_step, minor_size);
        let lo_off = lo_off.max(0);
        let hi_off = hi_off.min(line.k);
        if lo_off > hi_off {
            line.last = -1;
            return line;
        }

        // Steps whose minor offset lies in [lo_off, hi_off]; the offset never
        // decreases along the line.
        let (from_off, to_off) = if line.k == 0 {
            (0, line.n)
        } else {
            let (n2, k2) = (2 * line.n, 2 * line.k);
            (
                ceil_div(n2 * lo_off - line.n, k2),
                ceil_div(n2 * (hi_off + 1) - line.n, k2) - 1,
            )
        };

        line.next = first.max(from_off).max(0);
        line.last = last.min(to_off).min(line.n);
        line
    }

    fn offset(&self, i: i128) -> i128 {
        if self.n == 0 {
            0
        } else {
            (2 * i * self.k + self.n) / (2 * self.n)
        }
    }

    fn remaining(&self) -> usize {
        usize::try_from((self.last - self.next + 1).max(0)).unwrap_or(usize::MAX)
    }
}

fn step_sign(delta: i64) -> i64 {
    if delta < 0 { -1 } else { 1 }
}

/// Values of `t` for which `start + step * t` lies in `[0, size)`.
fn axis_range(start: i64, step: i64, size: u32) -> (i128, i128) {
    let start = start as i128;
    let max = size as i128 - 1;
    if step > 0 {
        (-start, max - start)
    } else {
        (start - max, start)
    }
}

/// `ceil(a / b)` for `b > 0`.
fn ceil_div(a: i128, b: i128) -> i128 {
    let q = a.div_euclid(b);
    if a.rem_euclid(b) == 0 { q } else { q + 1 }
}

impl Iterator for Line {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.next > self.last {
            return None;
        }
        let i = self.next;
        self.next += 1;

        // Both coordinates stay between the two u32 endpoints.
        let major = self.major + self.major_step * i as i64;
        let minor = self.minor + self.minor_step * self.offset(i) as i64;
        let (x, y) = if self.x_major {
            (major, minor)
        } else {
            (minor, major)
        };

        Some(Coord::new(x as u32, y as u32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn c(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    fn pixels(a: Coord, b: Coord) -> Vec<Coord> {
        Line::new(a, b).collect()
    }

    #[test]
    fn identical_endpoints_yield_one_pixel() {
        assert_eq!(pixels(c(3, 9), c(3, 9)), vec![c(3, 9)]);
    }

    #[test]
    fn horizontal_line() {
        assert_eq!(
            pixels(c(0, 0), c(4, 0)),
            vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0), c(4, 0)]
        );
    }

    #[test]
    fn vertical_line_reversed() {
        let set: BTreeSet<_> = pixels(c(2, 6), c(2, 3)).into_iter().collect();
        let expected: BTreeSet<_> = (3..=6).map(|y| c(2, y)).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn diagonal_line() {
        assert_eq!(pixels(c(0, 0), c(3, 3)), vec![c(0, 0), c(1, 1), c(2, 2), c(3, 3)]);
    }

    #[test]
    fn shallow_line_rounds_halves_up() {
        assert_eq!(
            pixels(c(0, 0), c(4, 1)),
            vec![c(0, 0), c(1, 0), c(2, 1), c(3, 1), c(4, 1)]
        );
    }

    #[test]
    fn swapping_endpoints_gives_same_pixels() {
        let center = c(10, 10);
        for x in 0..=20 {
            for y in 0..=20 {
                let p = c(x, y);
                let fwd: BTreeSet<_> = Line::new(center, p).collect();
                let rev: BTreeSet<_> = Line::new(p, center).collect();
                assert_eq!(fwd, rev, "asymmetric line {center:?} -> {p:?}");
            }
        }
    }

    #[test]
    fn every_octant_is_connected_and_hits_both_ends() {
        let center = c(50, 50);
        let targets = [
            c(90, 60), c(60, 90), c(40, 90), c(10, 60),
            c(10, 40), c(40, 10), c(60, 10), c(90, 40),
        ];
        for t in targets {
            let line: Vec<_> = Line::new(center, t).collect();
            let dx = (t.x as i64 - center.x as i64).abs();
            let dy = (t.y as i64 - center.y as i64).abs();

            assert_eq!(line.len() as i64, dx.max(dy) + 1);
            assert!(line.contains(&center));
            assert!(line.contains(&t));

            for w in line.windows(2) {
                let step_x = (w[0].x as i64 - w[1].x as i64).abs();
                let step_y = (w[0].y as i64 - w[1].y as i64).abs();
                assert!(step_x <= 1 && step_y <= 1 && step_x + step_y > 0);
            }
        }
    }

    #[test]
    fn size_hint_is_exact() {
        let line = Line::new(c(0, 0), c(7, 3));
        assert_eq!(line.len(), 8);
        assert_eq!(line.count(), 8);

        let clipped = Line::clipped(c(0, 0), c(7, 3), 4, 4);
        assert_eq!(clipped.len(), 4);
        assert_eq!(clipped.count(), 4);
    }

    #[test]
    fn far_endpoints_do_not_overflow() {
        let line = Line::new(c(u32::MAX, 0), c(u32::MAX - 2, 1));
        let got: Vec<_> = line.collect();
        assert_eq!(got.len(), 3);
        assert!(got.contains(&c(u32::MAX, 0)));
    }

    #[test]
    fn clipping_matches_filtering_the_full_line() {
        let (w, h) = (6, 5);
        for ax in 0..12 {
            for ay in 0..9 {
                for (bx, by) in [(0, 0), (11, 2), (3, 8), (9, 7), (5, 4), (1, 6)] {
                    let (a, b) = (c(ax, ay), c(bx, by));
                    let full: Vec<_> = Line::new(a, b).filter(|p| p.within(w, h)).collect();
                    let clipped: Vec<_> = Line::clipped(a, b, w, h).collect();
                    assert_eq!(clipped, full, "{a:?} -> {b:?}");
                }
            }
        }
    }

    #[test]
    fn far_end_is_clipped_without_walking_to_it() {
        let got: Vec<_> = Line::clipped(c(0, 0), c(400_000_000, 1), 4, 4).collect();
        assert_eq!(got, vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)]);

        let line = Line::clipped(c(u32::MAX, u32::MAX), c(0, 0), 3, 3);
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn far_start_is_clipped_from_the_far_side() {
        let got: BTreeSet<_> = Line::clipped(c(0, 4_000_000_000), c(3, 0), 4, 4).collect();
        let expected: BTreeSet<_> = (0..4).map(|y| c(3, y)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn clipped_lines_ignore_endpoint_order() {
        let far = c(3_000_000_000, 7);
        let fwd: Vec<_> = Line::clipped(c(2, 1), far, 16, 16).collect();
        let rev: Vec<_> = Line::clipped(far, c(2, 1), 16, 16).collect();
        assert_eq!(fwd, rev);
        assert_eq!(fwd.first(), Some(&c(2, 1)));
        assert_eq!(fwd.len(), 14);
    }

    #[test]
    fn lines_outside_or_on_empty_targets_are_empty() {
        assert_eq!(Line::clipped(c(10, 10), c(20, 12), 5, 5).count(), 0);
        assert_eq!(Line::clipped(c(0, 0), c(3, 3), 0, 4).count(), 0);
        assert_eq!(Line::clipped(c(0, 9), c(4, 9), 8, 8).count(), 0);
    }
}
