//! Lifecycle of the CPU sampler.
//!
//! A [`CpuMonitor`] acquires the OS counter off the caller's context, posts the
//! initial chart and first reading onto the UI queue, then hands the counter to
//! a repeating sampler.  [`CpuMonitor::shutdown`] is the single, idempotent way
//! out: it cancels a pending acquisition and the schedule together.

use monitor_core::{Message, MonitorError, MonitorState, Result};
use monitor_system::{acquire, spawn_sampler, CpuCounter, SamplerHandle, SAMPLE_PERIOD};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Receiving end of the UI queue; drain it into a
/// [`CpuViewModel`](crate::CpuViewModel) on the UI context.
pub type UiQueue = mpsc::UnboundedReceiver<Message>;

#[derive(Debug)]
pub struct CpuMonitor {
    period:   Duration,
    state:    watch::Sender<MonitorState>,
    shutdown: watch::Sender<bool>,
    schedule: Mutex<Option<SamplerHandle>>,
    queue:    mpsc::UnboundedSender<Message>,
}

impl CpuMonitor {
    /// Create an idle monitor and the UI queue it will post to.
    pub fn new() -> (Self, UiQueue) {
        let (queue, rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(MonitorState::Created);
        let (shutdown, _) = watch::channel(false);

        let monitor = Self {
            period: SAMPLE_PERIOD,
            state,
            shutdown,
            schedule: Mutex::new(None),
            queue,
        };
        (monitor, rx)
    }

    /// Override the sampling period (default: one second).
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn state(&self) -> MonitorState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    /// Acquire the counter with `factory` and begin sampling.
    ///
    /// Only valid from `Created`.  If acquisition fails or is cancelled the
    /// monitor ends up `Disposed` and the error is returned.
    pub async fn start<C, F>(&self, factory: F) -> Result<()>
    where
        C: CpuCounter,
        F: FnOnce() -> Result<C> + Send + 'static,
    {
        let claimed = self.state.send_if_modified(|state| {
            if *state == MonitorState::Created {
                *state = MonitorState::Starting;
                true
            } else {
                false
            }
        });
        if !claimed {
            return Err(MonitorError::Lifecycle(format!(
                "cannot start a monitor that is {}",
                self.state()
            )));
        }

        debug!("acquiring CPU counter");
        let mut counter = match acquire(factory, self.shutdown.subscribe()).await {
            Ok(counter) => counter,
            Err(e) => {
                self.shutdown();
                return Err(e);
            }
        };

        let first = counter.next_value();
        if self.queue.send(Message::CreatePlot).is_err()
            || self.queue.send(Message::Sample(first)).is_err()
        {
            self.shutdown();
            return Err(MonitorError::QueueClosed);
        }

        let handle = spawn_sampler(
            counter,
            self.period,
            self.queue.clone(),
            self.shutdown.subscribe(),
        );
        *self.lock_schedule() = Some(handle);

        let running = self.state.send_if_modified(|state| {
            if *state == MonitorState::Starting {
                *state = MonitorState::Running;
                true
            } else {
                false
            }
        });
        if !running {
            // Shut down between acquisition and scheduling.
            if let Some(handle) = self.lock_schedule().take() {
                handle.stop();
            }
            return Err(MonitorError::StartCancelled);
        }

        info!("CPU sampling every {:?}", self.period);
        Ok(())
    }

    /// Force one sample now.  Returns `false` unless the monitor is running.
    pub fn tick_now(&self) -> bool {
        if self.state() != MonitorState::Running {
            return false;
        }
        self.lock_schedule().as_ref().is_some_and(SamplerHandle::fire)
    }

    /// Cancel acquisition and sampling and tell the UI queue consumer to stop.
    ///
    /// Safe to call any number of times.
    pub fn shutdown(&self) {
        let previous = self.state.send_replace(MonitorState::Disposed);
        if previous.is_terminal() {
            return;
        }

        self.shutdown.send_replace(true);
        if let Some(handle) = self.lock_schedule().take() {
            handle.stop();
        }
        if self.queue.send(Message::Shutdown).is_err() {
            warn!("UI queue already closed at shutdown");
        }
        info!("CPU monitor shut down (was {previous})");
    }

    fn lock_schedule(&self) -> MutexGuard<'_, Option<SamplerHandle>> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CpuMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::CpuViewModel;
    use monitor_config::Settings;
    use std::sync::Arc;
    use tokio::sync::mpsc::error::TryRecvError;

    struct Scripted {
        values: Vec<f64>,
        next: usize,
    }

    impl CpuCounter for Scripted {
        fn next_value(&mut self) -> f64 {
            let i = self.next.min(self.values.len() - 1);
            self.next += 1;
            self.values[i]
        }
    }

    fn scripted(values: &[f64]) -> impl FnOnce() -> Result<Scripted> + Send + 'static {
        let values = values.to_vec();
        move || Ok(Scripted { values, next: 0 })
    }

    fn drain(queue: &mut UiQueue, vm: &mut CpuViewModel) {
        while let Ok(message) = queue.try_recv() {
            vm.handle(message);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_posts_plot_then_immediate_sample() {
        let (monitor, mut queue) = CpuMonitor::new();
        assert_eq!(monitor.state(), MonitorState::Created);

        monitor.start(scripted(&[10.0, 20.0])).await.unwrap();

        assert_eq!(monitor.state(), MonitorState::Running);
        assert_eq!(queue.try_recv().unwrap(), Message::CreatePlot);
        assert_eq!(queue.try_recv().unwrap(), Message::Sample(10.0));
        assert_eq!(queue.recv().await, Some(Message::Sample(20.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_window_of_three() {
        let (monitor, mut queue) = CpuMonitor::new();
        let mut vm = CpuViewModel::new(Settings { time_line: 3, ..Settings::default() });

        monitor.start(scripted(&[10.0, 20.0, 30.0, 40.0])).await.unwrap();
        // CreatePlot + four samples.
        for _ in 0..5 {
            let message = queue.recv().await.unwrap();
            vm.handle(message);
        }

        let points: Vec<(u64, f64)> = vm
            .plot()
            .unwrap()
            .series
            .points()
            .iter()
            .map(|s| (s.index, s.value))
            .collect();
        assert_eq!(points, vec![(1, 20.0), (2, 30.0), (3, 40.0)]);
        assert_eq!(vm.usage_text(), "CPU 40.00%");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_schedule_and_forced_ticks() {
        let (monitor, mut queue) = CpuMonitor::new();
        let mut vm = CpuViewModel::new(Settings::default());

        monitor.start(scripted(&[7.0])).await.unwrap();
        drain(&mut queue, &mut vm);
        assert_eq!(vm.plot().unwrap().series.len(), 1);

        monitor.shutdown();
        assert_eq!(monitor.state(), MonitorState::Disposed);
        assert!(!monitor.tick_now());

        drain(&mut queue, &mut vm);
        assert!(vm.is_disposed());

        tokio::time::sleep(SAMPLE_PERIOD * 5).await;
        assert!(matches!(queue.try_recv(), Err(TryRecvError::Empty)));

        vm.handle(Message::Sample(99.0));
        assert_eq!(vm.plot().unwrap().series.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_now_samples_between_periods() {
        let (monitor, mut queue) = CpuMonitor::new();
        monitor.start(scripted(&[1.0, 2.0])).await.unwrap();
        let _ = queue.try_recv();
        let _ = queue.try_recv();

        let fired_at = tokio::time::Instant::now();
        assert!(monitor.tick_now());
        assert_eq!(queue.recv().await, Some(Message::Sample(2.0)));
        assert!(fired_at.elapsed() < SAMPLE_PERIOD);
    }

    #[tokio::test]
    async fn failed_acquisition_disposes() {
        let (monitor, mut queue) = CpuMonitor::new();
        let result = monitor
            .start(|| -> Result<Scripted> {
                Err(MonitorError::CounterUnavailable("no counters".into()))
            })
            .await;

        assert!(matches!(result, Err(MonitorError::CounterUnavailable(_))));
        assert_eq!(monitor.state(), MonitorState::Disposed);
        assert_eq!(queue.try_recv().unwrap(), Message::Shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_rejected() {
        let (monitor, _queue) = CpuMonitor::new();
        monitor.start(scripted(&[1.0])).await.unwrap();
        let again = monitor.start(scripted(&[1.0])).await;
        assert!(matches!(again, Err(MonitorError::Lifecycle(_))));
        assert_eq!(monitor.state(), MonitorState::Running);
    }

    #[tokio::test]
    async fn start_after_shutdown_is_rejected() {
        let (monitor, _queue) = CpuMonitor::new();
        monitor.shutdown();
        let result = monitor.start(scripted(&[1.0])).await;
        assert!(matches!(result, Err(MonitorError::Lifecycle(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_idempotent() {
        let (monitor, mut queue) = CpuMonitor::new();
        monitor.start(scripted(&[1.0])).await.unwrap();
        monitor.shutdown();
        monitor.shutdown();

        let shutdowns = std::iter::from_fn(|| queue.try_recv().ok())
            .filter(|m| *m == Message::Shutdown)
            .count();
        assert_eq!(shutdowns, 1);
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_acquisition() {
        let (monitor, _queue) = CpuMonitor::new();
        let monitor = Arc::new(monitor);
        let mut state = monitor.watch_state();

        let starting = {
            let monitor = Arc::clone(&monitor);
            tokio::spawn(async move {
                monitor
                    .start(|| {
                        std::thread::sleep(Duration::from_millis(300));
                        Ok(Scripted { values: vec![1.0], next: 0 })
                    })
                    .await
            })
        };

        state
            .wait_for(|s| *s == MonitorState::Starting)
            .await
            .unwrap();
        monitor.shutdown();

        let result = starting.await.unwrap();
        assert!(matches!(result, Err(MonitorError::StartCancelled)));
        assert_eq!(monitor.state(), MonitorState::Disposed);
    }
}
