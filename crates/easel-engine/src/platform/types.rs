use crate::paint::{Pass, Rgba8};
use crate::transform::Transform;

/// Capability of the window's graphics context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum WindowMode {
    /// Flat drawing; rotation about x/y and depth are unavailable.
    #[default]
    TwoD,
    /// Perspective camera with depth testing.
    ThreeD,
}

impl WindowMode {
    #[inline]
    pub fn is_3d(self) -> bool {
        self == WindowMode::ThreeD
    }
}

/// Window creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub mode: WindowMode,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32, mode: WindowMode) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            mode,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("easel", 1280, 720, WindowMode::TwoD)
    }
}

/// What the platform actually opened.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowInfo {
    /// Drawable width in logical pixels.
    pub width: u32,
    /// Drawable height in logical pixels.
    pub height: u32,
    pub mode: WindowMode,
}

/// Primitive geometry in local (pre-transform) coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centered on the local origin.
    Box { w: f32, h: f32, d: f32 },
    /// Rectangle in the z = 0 plane with its top-left corner at `(x, y)`.
    Rect { x: f32, y: f32, w: f32, h: f32 },
}

/// One pass of one primitive, fully resolved against the current draw state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub pass: Pass,
    pub shape: Shape,
    pub transform: Transform,
    pub color: Rgba8,
}
