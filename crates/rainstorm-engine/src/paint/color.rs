/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
///
/// Byte order matches the framebuffer layout: `[r, g, b, a]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_bytes([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Normalized `[0, 1]` channels, straight alpha.
    ///
    /// With `srgb_target` the color channels are decoded to linear so that an
    /// sRGB render target re-encodes them to the original byte values.
    pub fn to_f32(self, srgb_target: bool) -> [f32; 4] {
        let unorm = |v: u8| v as f32 / 255.0;
        let channel = |v: u8| {
            if srgb_target {
                srgb_to_linear(unorm(v))
            } else {
                unorm(v)
            }
        };
        [channel(self.r), channel(self.g), channel(self.b), unorm(self.a)]
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Color {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_black() {
        assert_eq!(Color::default(), Color::rgba(0, 0, 0, 255));
    }

    #[test]
    fn bytes_are_rgba_ordered() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Color::from([1, 2, 3, 4]), c);
    }

    #[test]
    fn unorm_conversion_keeps_extremes() {
        assert_eq!(Color::WHITE.to_f32(false), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::TRANSPARENT.to_f32(true), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn srgb_decode_darkens_midtones() {
        let [r, _, _, a] = Color::rgb(128, 0, 0).to_f32(true);
        assert!(r < 128.0 / 255.0);
        assert!(r > 0.2 && r < 0.23);
        assert_eq!(a, 1.0);
    }
}
