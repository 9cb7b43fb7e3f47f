/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLUE:  Self = Self { r: 0x34 as f32 / 255.0, g: 0x7a as f32 / 255.0, b: 0xeb as f32 / 255.0, a: 1.0 };
    pub const DARK:  Self = Self { r: 0x1e as f32 / 255.0, g: 0x1e as f32 / 255.0, b: 0x2e as f32 / 255.0, a: 1.0 };
    pub const WHITE: Self = Self { r: 0xcd as f32 / 255.0, g: 0xd6 as f32 / 255.0, b: 0xf4 as f32 / 255.0, a: 1.0 };

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb() {
        let c = Color::from_hex("#347aeb").unwrap();
        assert!((c.r - 0x34 as f32 / 255.0).abs() < f32::EPSILON);
        assert!((c.b - 0xeb as f32 / 255.0).abs() < f32::EPSILON);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn named_constants_match_their_hex() {
        assert_eq!(Color::from_hex("#347aeb"), Some(Color::BLUE));
        assert_eq!(Color::from_hex("#1e1e2e"), Some(Color::DARK));
        assert_eq!(Color::from_hex("#cdd6f4"), Some(Color::WHITE));
    }

    #[test]
    fn parses_rgba() {
        let c = Color::from_hex("ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!(Color::from_hex("blue").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::BLUE.with_alpha(3.0).a, 1.0);
        assert_eq!(Color::BLUE.with_alpha(-1.0).a, 0.0);
    }
}
