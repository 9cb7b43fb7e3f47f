use monitor_core::{MonitorError, Result};
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tokio::sync::watch;
use tracing::debug;

/// A source of system-wide CPU utilisation.
pub trait CpuCounter: Send + 'static {
    /// Percentage of CPU time busy across all cores since the previous read.
    ///
    /// The OS may report 0 or a transient value above 100; callers keep it as-is.
    fn next_value(&mut self) -> f64;
}

/// [`CpuCounter`] backed by `sysinfo`.
pub struct SysinfoCounter {
    sys: System,
}

impl SysinfoCounter {
    /// Create and prime the counter.
    ///
    /// Blocks for [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] so the first
    /// [`CpuCounter::next_value`] already reports a real delta.
    pub fn new() -> Result<Self> {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        if sys.cpus().is_empty() {
            return Err(MonitorError::CounterUnavailable(
                "the OS reports no CPUs".into(),
            ));
        }

        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();
        debug!("CPU counter ready ({} logical CPUs)", sys.cpus().len());

        Ok(Self { sys })
    }
}

impl CpuCounter for SysinfoCounter {
    fn next_value(&mut self) -> f64 {
        self.sys.refresh_cpu_usage();
        f64::from(self.sys.global_cpu_usage())
    }
}

/// Run a blocking counter `factory` on the blocking pool.
///
/// Resolves to [`MonitorError::StartCancelled`] as soon as `shutdown` flips to
/// `true` (or its sender is dropped), without waiting for the factory.
pub async fn acquire<C, F>(factory: F, mut shutdown: watch::Receiver<bool>) -> Result<C>
where
    C: CpuCounter,
    F: FnOnce() -> Result<C> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(factory);

    tokio::select! {
        joined = task => match joined {
            Ok(counter) => counter,
            Err(e) => Err(MonitorError::CounterUnavailable(format!("acquisition task failed: {e}"))),
        },
        _ = shutdown.wait_for(|stop| *stop) => Err(MonitorError::StartCancelled),
    }
}
