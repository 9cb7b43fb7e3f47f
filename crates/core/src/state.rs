use std::fmt;

/// One point of a chart curve.
///
/// `index` is the zero-based tick number, not wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: u64,
    /// Percentage; readings outside `[0, 100]` are stored as-is.
    pub value: f64,
}

impl Sample {
    pub fn new(index: u64, value: f64) -> Self {
        Self { index, value }
    }
}

/// Lifecycle of a CPU monitor.
///
/// `Created → Starting → Running → Disposed`; `Disposed` is terminal and may
/// also be reached directly from `Created` or `Starting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    #[default]
    Created,
    /// The OS counter is being acquired off the caller's context.
    Starting,
    /// The repeating sampler is active.
    Running,
    Disposed,
}

impl MonitorState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Disposed
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created  => "created",
            Self::Starting => "starting",
            Self::Running  => "running",
            Self::Disposed => "disposed",
        };
        f.write_str(name)
    }
}
