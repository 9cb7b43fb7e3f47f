//! UI-side state of the CPU widget.
//!
//! [`CpuViewModel`] is the single consumer of the UI queue.  It owns the chart
//! model and the usage label; nothing else mutates them, so no locking is
//! needed.  Bindings observe it through [`CpuViewModel::subscribe`].

use crate::plot::PlotModel;
use monitor_config::Settings;
use monitor_core::{Message, MonitorError, PropertyChanged, Result};
use monitor_theme::parse_accent;
use tokio::sync::broadcast;
use tracing::{debug, error, trace};

/// Literal prefix of the usage label.
pub const USAGE_PREFIX: &str = "CPU";

const EVENT_CAPACITY: usize = 16;

/// Format a usage reading for display, e.g. `37.5` → `"CPU 37.50%"`.
pub fn format_usage(value: f64) -> String {
    format!("{USAGE_PREFIX} {value:.2}%")
}

#[derive(Debug)]
pub struct CpuViewModel {
    settings:    Settings,
    plot:        Option<PlotModel>,
    usage_text:  String,
    /// x index of the next sample.
    next_index:  u64,
    disposed:    bool,
    events:      broadcast::Sender<PropertyChanged>,
}

impl CpuViewModel {
    pub fn new(settings: Settings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            settings,
            plot: None,
            usage_text: "0".to_string(),
            next_index: 0,
            disposed: false,
            events,
        }
    }

    /// Register for property-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<PropertyChanged> {
        self.events.subscribe()
    }

    /// Apply one message from the UI queue.
    ///
    /// Tick failures are logged and swallowed; the next sample is processed
    /// normally.
    pub fn handle(&mut self, message: Message) {
        match message {
            Message::CreatePlot => self.create_plot(),
            Message::Sample(value) => {
                if let Err(e) = self.apply_sample(value) {
                    error!("CPU chart update failed: {e}");
                }
            }
            Message::Shutdown => self.dispose(),
        }
    }

    /// Replace the chart with an empty one: hidden auto-ranged x axis, hidden
    /// `[0, 100]` y axis, one area series in the configured colour.
    pub fn create_plot(&mut self) {
        if self.disposed {
            return;
        }
        let color = parse_accent(&self.settings.graphic_color);
        self.plot = Some(PlotModel::new(color));
        emit(&self.events, PropertyChanged::PlotModel);
    }

    /// The tick handler: append one reading and keep the window bounded.
    ///
    /// A no-op once disposed or before the chart exists.
    pub fn apply_sample(&mut self, value: f64) -> Result<()> {
        if self.disposed {
            trace!("sample after dispose ignored");
            return Ok(());
        }
        let Some(plot) = self.plot.as_mut() else {
            return Ok(());
        };

        self.usage_text = format_usage(value);
        emit(&self.events, PropertyChanged::UsageText);

        let appended = match self.next_index.checked_add(1) {
            Some(next) => {
                plot.series.push(self.next_index, value);
                self.next_index = next;
                Ok(())
            }
            None => Err(MonitorError::Chart("x index overflow".into())),
        };

        // Eviction and redraw run even when the append failed.
        if plot.series.len() > self.settings.time_line {
            plot.series.evict_oldest();
        }
        let aligned = plot.series.check_aligned();

        let revision = plot.invalidate();
        emit(&self.events, PropertyChanged::Redraw(revision));

        appended.and(aligned)
    }

    /// Swap in new settings at runtime.
    ///
    /// A shrunken window drops every excess point in this one batch, before
    /// the redraw signal.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        if self.disposed {
            self.settings = settings;
            return Ok(());
        }

        if let Some(plot) = self.plot.as_mut() {
            plot.series.color = parse_accent(&settings.graphic_color);
            let evicted = plot.series.evict_beyond(settings.time_line);
            if evicted > 0 {
                debug!(evicted, "window shrunk to {}", settings.time_line);
            }
            let revision = plot.invalidate();
            emit(&self.events, PropertyChanged::Redraw(revision));
        }
        self.settings = settings;
        Ok(())
    }

    /// Stop accepting samples.  The last chart stays readable.
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!("CPU view-model disposed after {} samples", self.next_index);
        }
        self.disposed = true;
    }

    pub fn plot(&self) -> Option<&PlotModel> {
        self.plot.as_ref()
    }

    pub fn usage_text(&self) -> &str {
        &self.usage_text
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

// No subscribers is the normal headless case.
fn emit(events: &broadcast::Sender<PropertyChanged>, change: PropertyChanged) {
    let _ = events.send(change);
}
