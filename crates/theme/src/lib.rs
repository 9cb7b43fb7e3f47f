pub mod colors;

pub use colors::Color;

use monitor_config::Settings;

/// Opacity of the area under the usage curve.
pub const FILL_ALPHA: f32 = 0.35;

/// Compiled theme derived from [`Settings`].
///
/// Calling [`Theme::from_settings`] is infallible: an invalid `GraphicColor`
/// falls back to the default blue.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Colour of the usage curve; [`fill_of`] derives the area colour from it.
    pub accent:     Color,
    pub foreground: Color,
    pub background: Color,
    pub font_size:  f32,
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            accent:     parse_accent(&settings.graphic_color),
            foreground: Color::WHITE,
            background: Color::DARK.with_alpha(0.6),
            font_size:  13.0,
        }
    }

}

/// Translucent version of a curve colour used for the area beneath it.
#[inline]
pub fn fill_of(accent: Color) -> Color {
    accent.with_alpha(FILL_ALPHA)
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Parse the graphic colour, logging and falling back on bad input.
pub fn parse_accent(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        tracing::warn!("Invalid GraphicColor '{hex}'; using default");
        Color::BLUE
    })
}
