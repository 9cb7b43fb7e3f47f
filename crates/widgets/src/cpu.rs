use crate::graph::AreaGraph;
use crate::view_model::CpuViewModel;
use iced::{
    widget::{canvas, column, container, text},
    Element, Length,
};
use monitor_config::Settings;
use monitor_core::{Message, Result};
use monitor_theme::Theme;

/// Root widget: live area graph of CPU usage with a `CPU 12.34%` label.
///
/// Feed it UI-queue messages through [`CpuWidget::handle`].
#[derive(Debug)]
pub struct CpuWidget {
    model: CpuViewModel,
    theme: Theme,
}

impl CpuWidget {
    pub fn new(settings: Settings) -> Self {
        Self {
            theme: Theme::from_settings(&settings),
            model: CpuViewModel::new(settings),
        }
    }

    pub fn model(&self) -> &CpuViewModel {
        &self.model
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn handle(&mut self, message: Message) {
        self.model.handle(message);
    }

    /// Re-apply settings reloaded from disk.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        self.theme = Theme::from_settings(&settings);
        self.model.apply_settings(settings)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let label = text(self.model.usage_text())
            .size(self.theme.font_size)
            .color(self.theme.foreground.to_iced());

        match self.model.plot() {
            Some(plot) => column![
                canvas(AreaGraph::new(plot))
                    .width(Length::Fill)
                    .height(Length::Fill),
                label,
            ]
            .spacing(4)
            .into(),
            None => container(label)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        }
    }
}
