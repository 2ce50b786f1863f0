use super::rgba::Rgba8;

/// Linear premultiplied RGBA color, as uploaded to the GPU.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgba8> for Color {
    fn from(c: Rgba8) -> Self {
        Color::from_srgb_u8(c.r, c.g, c.b, c.a)
    }
}

/// sRGB transfer function, decoding to linear light.
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

    fn approx(a: Color, b: [f32; 4]) -> bool {
        a.to_array().iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn endpoints_survive_decoding() {
        assert!(approx(Color::from(Rgba8::gray(0)), [0.0, 0.0, 0.0, 1.0]));
        assert!(approx(Color::from(Rgba8::gray(255)), [1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn mid_gray_is_darker_in_linear_space() {
        let c = Color::from(Rgba8::gray(128));
        assert!(c.r > 0.2 && c.r < 0.23, "r = {}", c.r);
    }

    #[test]
    fn alpha_is_premultiplied() {
        let c = Color::from(Rgba8::rgba(255, 255, 255, 0));
        assert_eq!(c, Color::transparent());
    }
}
