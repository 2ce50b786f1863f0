/// Straight-alpha 8-bit sRGB color as written by sketches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::gray(0);
    pub const WHITE: Rgba8 = Rgba8::gray(255);
    pub const TRANSPARENT: Rgba8 = Rgba8::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgba(v, v, v, 255)
    }

    #[inline]
    pub const fn gray_alpha(v: u8, a: u8) -> Self {
        Self::rgba(v, v, v, a)
    }

    /// Copy of `self` with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Zero alpha: drawing passes using this color are skipped.
    #[inline]
    pub const fn is_invisible(self) -> bool {
        self.a == 0
    }
}

impl From<u8> for Rgba8 {
    fn from(v: u8) -> Self {
        Rgba8::gray(v)
    }
}

impl From<(u8, u8)> for Rgba8 {
    fn from((v, a): (u8, u8)) -> Self {
        Rgba8::gray_alpha(v, a)
    }
}

impl From<(u8, u8, u8)> for Rgba8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba8::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba8 {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Rgba8::rgba(r, g, b, a)
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba8::rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_conversions() {
        assert_eq!(Rgba8::from(200), Rgba8::rgba(200, 200, 200, 255));
        assert_eq!(Rgba8::from((90, 10)), Rgba8::rgba(90, 90, 90, 10));
        assert_eq!(Rgba8::from((1, 2, 3)), Rgba8::rgba(1, 2, 3, 255));
        assert_eq!(Rgba8::from((1, 2, 3, 4)), Rgba8::rgba(1, 2, 3, 4));
        assert_eq!(Rgba8::from([5, 6, 7, 0]), Rgba8::rgba(5, 6, 7, 0));
    }

    #[test]
    fn zero_alpha_is_invisible() {
        assert!(Rgba8::TRANSPARENT.is_invisible());
        assert!(Rgba8::WHITE.with_alpha(0).is_invisible());
        assert!(!Rgba8::BLACK.is_invisible());
    }
}
