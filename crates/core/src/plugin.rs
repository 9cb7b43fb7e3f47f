/// Capability record a widget hands to its host.
///
/// A plain data-and-factory record: the host reads the name and settings file,
/// asks for defaults when no settings exist yet, and builds the root widget.
/// `S` is the widget's settings type, `W` its root displayable widget.
#[derive(Debug, Clone, Copy)]
pub struct WidgetPlugin<S, W> {
    /// Display name shown by the host.
    pub name: &'static str,
    /// Settings file name relative to the host's config directory, if any.
    pub settings_file: Option<&'static str>,
    pub default_settings: fn() -> S,
    pub make_widget: fn(S) -> W,
}

impl<S, W> WidgetPlugin<S, W> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn settings_file(&self) -> Option<&'static str> {
        self.settings_file
    }

    pub fn defaults(&self) -> S {
        (self.default_settings)()
    }

    /// Build the root widget with the given settings.
    pub fn instantiate(&self, settings: S) -> W {
        (self.make_widget)(settings)
    }

    pub fn instantiate_default(&self) -> W {
        self.instantiate(self.defaults())
    }
}
