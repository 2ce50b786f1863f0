/// What the renderer should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the frame is dropped and the next one may render.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory. The window can no longer be drawn to.
    Fatal,
}
