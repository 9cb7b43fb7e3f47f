use crate::cpu::CpuWidget;
use monitor_config::{Settings, SETTINGS_FILE};
use monitor_core::WidgetPlugin;

/// Display name advertised to the host.
pub const WIDGET_NAME: &str = "CPU Monitor";

/// Capability record the host uses to discover and build the CPU widget.
pub fn plugin() -> WidgetPlugin<Settings, CpuWidget> {
    WidgetPlugin {
        name:             WIDGET_NAME,
        settings_file:    Some(SETTINGS_FILE),
        default_settings: Settings::default,
        make_widget:      CpuWidget::new,
    }
}
