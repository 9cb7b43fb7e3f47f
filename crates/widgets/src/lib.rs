pub mod cpu;
pub mod graph;
pub mod monitor;
pub mod plot;
pub mod plugin;
pub mod series;
pub mod view_model;

pub use cpu::CpuWidget;
pub use graph::AreaGraph;
pub use monitor::{CpuMonitor, UiQueue};
pub use plot::PlotModel;
pub use plugin::{plugin, WIDGET_NAME};
pub use series::AreaSeries;
pub use view_model::{format_usage, CpuViewModel};
