/// Messages posted onto the UI queue.
///
/// The queue has exactly one consumer (the view-model living on the UI
/// context), so every chart mutation is serialized through it.
///
/// Sources:
/// - `CpuMonitor::start`  → `CreatePlot`, first `Sample`
/// - Sampler task         → `Sample` once per period
/// - `CpuMonitor::shutdown` → `Shutdown`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Build the empty chart model (axes + area series).
    CreatePlot,
    /// Raw counter reading, in percent. Not clamped.
    Sample(f64),
    /// The monitor was shut down; the consumer must stop mutating the chart.
    Shutdown,
}

/// Change notifications broadcast by the view-model to UI bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyChanged {
    /// The chart model was (re)created.
    PlotModel,
    /// The formatted usage label changed.
    UsageText,
    /// The chart contents changed; carries the new plot revision.
    Redraw(u64),
}
