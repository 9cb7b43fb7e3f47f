//! Wayland desktop-layer host for the CPU widget.
//!
//! Owns the Iced application loop, which is the single UI context every chart
//! mutation is funnelled into, and wires together the background tasks:
//! - CPU sampler (counter acquisition + 1 Hz schedule)
//! - Settings file watcher (live reload on change)

use futures::channel::mpsc::Sender;
use iced::{widget::container, Element, Length, Subscription, Task};
use iced_layershell::{
    build_pattern::application,
    reexport::{Anchor, Layer},
    settings::{LayerShellSettings, Settings},
    to_layer_message,
};
use monitor_config::{default_path, load as load_settings, path_for, ConfigWatcher};
use monitor_core::Message as WidgetMessage;
use monitor_system::SysinfoCounter;
use monitor_widget::{plugin, CpuMonitor, CpuWidget};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Surface size in logical pixels.
const WIDGET_WIDTH: u32 = 260;
const WIDGET_HEIGHT: u32 = 120;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the desktop widget.  Never returns under normal operation.
pub fn run() -> iced_layershell::Result {
    application(Host::new, Host::namespace, Host::update, Host::view)
        .subscription(Host::subscription)
        .style(Host::style)
        .settings(Settings {
            layer_settings: LayerShellSettings {
                size: Some((WIDGET_WIDTH, WIDGET_HEIGHT)),
                exclusive_zone: 0,
                anchor: Anchor::Top | Anchor::Right,
                layer: Layer::Bottom,
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level application messages.
///
/// `#[to_layer_message]` injects layer-shell control variants (AnchorChange,
/// SizeChange, etc.).  Those are handled by the backend in 0.15 and never
/// reach `update()`.
#[to_layer_message]
#[derive(Debug, Clone)]
pub enum Message {
    /// A message taken off the widget's UI queue.
    Widget(WidgetMessage),
    /// Settings file changed on disk.
    SettingsReloaded,
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Host {
    widget:        CpuWidget,
    settings_path: PathBuf,
}

impl Host {
    fn new() -> (Self, Task<Message>) {
        let plugin = plugin();
        let settings_path = settings_path();
        let settings = load_settings(&settings_path).unwrap_or_else(|e| {
            warn!("{e}; using {} defaults", plugin.name());
            plugin.defaults()
        });

        info!("Hosting '{}' (window {} samples)", plugin.name(), settings.time_line);

        let host = Self {
            widget: plugin.instantiate(settings),
            settings_path,
        };
        (host, Task::none())
    }

    fn namespace() -> String {
        String::from("cpu-monitor")
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Widget(msg) => self.widget.handle(msg),
            Message::SettingsReloaded => match load_settings(&self.settings_path) {
                Ok(settings) => match self.widget.apply_settings(settings) {
                    Ok(()) => info!("Settings reloaded"),
                    Err(e) => warn!("Rejected reloaded settings: {e}"),
                },
                Err(e) => warn!("Settings reload failed: {e}"),
            },
            // Layer-shell injected variants handled by backend in iced-layershell 0.15.
            _ => {}
        }
        Task::none()
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        container(self.widget.view().map(Message::Widget))
            .padding(8)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            Subscription::run(sampler_stream),
            Subscription::run(settings_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        let theme = self.widget.theme();
        iced::theme::Style {
            background_color: theme.background.to_iced(),
            text_color: theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function acts as both the stream builder AND the unique identity
// key for `Subscription::run(fn_ptr)`.

/// Starts the CPU monitor and forwards its UI queue into `update()`.
///
/// The monitor lives inside this future; dropping the subscription drops the
/// monitor, which shuts the sampler down.
fn sampler_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(16, |mut sender: Sender<Message>| async move {
        let (monitor, mut queue) = CpuMonitor::new();

        match monitor.start(SysinfoCounter::new).await {
            Ok(()) => {
                while let Some(msg) = queue.recv().await {
                    if let Err(e) = sender.try_send(Message::Widget(msg)) {
                        warn!("Dropped CPU update: {e}");
                    }
                }
            }
            Err(e) => error!("CPU monitor failed to start: {e}"),
        }

        // Widget keeps its last frame; stall rather than crash.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Watches the settings file for writes and sends `SettingsReloaded`.
fn settings_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(settings_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::SettingsReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Settings path advertised by the plugin record.
fn settings_path() -> PathBuf {
    plugin()
        .settings_file()
        .map(path_for)
        .unwrap_or_else(default_path)
}
