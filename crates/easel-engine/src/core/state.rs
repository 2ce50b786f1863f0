use super::once::OnceFlag;

/// Lifecycle of a single run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    NotStarted,
    Setup,
    Running,
    ShuttingDown,
    Stopped,
}

/// Value returned by the run entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    /// The loop ran and shut down normally.
    Normal,
    /// The platform subsystem failed to initialize; no frame ran.
    InitFailed,
    /// Another run is already active on this thread.
    AlreadyRunning,
}

impl ExitStatus {
    /// Process-style status code.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Normal => 0,
            ExitStatus::InitFailed => -1,
            ExitStatus::AlreadyRunning => -2,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Normal
    }
}

/// Run flag plus the one-time guards of a run.
#[derive(Debug, Default)]
pub struct RunState {
    pub(crate) running: bool,
    pub(crate) initialized: OnceFlag,
    pub(crate) window_created: OnceFlag,
    pub(crate) torn_down: OnceFlag,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.is_done()
    }

    pub fn has_window(&self) -> bool {
        self.window_created.is_done()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.is_done()
    }
}
