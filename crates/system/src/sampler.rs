use crate::counter::CpuCounter;
use monitor_core::Message;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Sampling cadence of the widget.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running sampler task.
///
/// Dropping the handle does not stop the task; call [`SamplerHandle::stop`]
/// or flip the shutdown signal the sampler was spawned with.
#[derive(Debug)]
pub struct SamplerHandle {
    task: JoinHandle<()>,
    fire: mpsc::Sender<()>,
}

impl SamplerHandle {
    /// Force one extra sample outside the regular cadence.
    ///
    /// Returns `false` if the sampler has stopped or a forced sample is
    /// already pending.
    pub fn fire(&self) -> bool {
        !self.task.is_finished() && self.fire.try_send(()).is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the schedule. The counter is released when the task unwinds.
    pub fn stop(self) {
        self.task.abort();
    }
}

/// Spawn a Tokio task that reads `counter` every `period` and posts
/// [`Message::Sample`]s onto the UI `queue`.
///
/// The first sample is taken one `period` after spawning.  The task stops when
/// `shutdown` becomes `true`, when the handle is stopped, or when the queue's
/// receiver is dropped.
pub fn spawn_sampler<C: CpuCounter>(
    mut counter: C,
    period: Duration,
    queue: mpsc::UnboundedSender<Message>,
    mut shutdown: watch::Receiver<bool>,
) -> SamplerHandle {
    let (fire, mut forced) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => break,
                _ = ticker.tick() => {}
                Some(()) = forced.recv() => {}
            }

            let value = counter.next_value();
            trace!(value, "cpu sample");

            if queue.send(Message::Sample(value)).is_err() {
                debug!("UI queue closed; stopping sampler");
                break;
            }
        }

        debug!("sampler stopped; releasing CPU counter");
    });

    SamplerHandle { task, fire }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script, then repeats its last value.
    struct Scripted {
        values: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        fn new(values: &[f64]) -> Self {
            Self { values: values.to_vec(), next: 0 }
        }
    }

    impl CpuCounter for Scripted {
        fn next_value(&mut self) -> f64 {
            let i = self.next.min(self.values.len() - 1);
            self.next += 1;
            self.values[i]
        }
    }

    #[tokio::test(start_paused = true)]
    async fn samples_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_stop, shutdown) = watch::channel(false);
        let started = Instant::now();
        let _handle = spawn_sampler(Scripted::new(&[10.0, 20.0, 30.0]), SAMPLE_PERIOD, tx, shutdown);

        for (n, expected) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            assert_eq!(rx.recv().await, Some(Message::Sample(expected)));
            assert_eq!(started.elapsed().as_secs(), n as u64 + 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_signal_stops_the_schedule() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (stop, shutdown) = watch::channel(false);
        let handle = spawn_sampler(Scripted::new(&[5.0]), SAMPLE_PERIOD, tx, shutdown);

        assert_eq!(rx.recv().await, Some(Message::Sample(5.0)));
        stop.send_replace(true);

        // The task drops its queue sender on exit.
        assert_eq!(rx.recv().await, None);
        assert!(handle.is_finished());
        assert!(!handle.fire());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_aborts_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_stop, shutdown) = watch::channel(false);
        let handle = spawn_sampler(Scripted::new(&[5.0]), SAMPLE_PERIOD, tx, shutdown);

        handle.stop();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn fire_forces_an_immediate_sample() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_stop, shutdown) = watch::channel(false);
        let started = Instant::now();
        let handle = spawn_sampler(Scripted::new(&[42.0]), SAMPLE_PERIOD, tx, shutdown);

        assert!(handle.fire());
        assert_eq!(rx.recv().await, Some(Message::Sample(42.0)));
        assert!(started.elapsed() < SAMPLE_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_queue_ends_the_task() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (_stop, shutdown) = watch::channel(false);
        let handle = spawn_sampler(Scripted::new(&[1.0]), SAMPLE_PERIOD, tx, shutdown);
        drop(rx);

        time::sleep(SAMPLE_PERIOD * 2).await;
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }
}
