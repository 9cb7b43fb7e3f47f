use thiserror::Error;

/// Top-level error type used across the entire widget.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("CPU counter unavailable: {0}")]
    CounterUnavailable(String),

    #[error("start cancelled before the CPU counter was ready")]
    StartCancelled,

    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("chart error: {0}")]
    Chart(String),

    #[error("UI queue closed")]
    QueueClosed,
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
