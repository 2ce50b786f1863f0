use crate::time::DEFAULT_TARGET_FPS;

/// Loop configuration applied before setup runs.
///
/// Both values can still be changed from setup or update through `Ctx`.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Frame cap while vsync is off.
    pub target_fps: u32,

    /// Requested display synchronization. Applied once a window exists.
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            vsync: false,
        }
    }
}
