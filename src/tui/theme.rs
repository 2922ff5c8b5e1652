// Shell color themes
//
// Chrome-only styling: views emit modifier-styled text (bold/dim) and the
// shell applies theme colors per panel. Two built-in palettes; unknown
// names fall back to dark.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    /// Focus highlights and the header band.
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(24, 26, 32),
            foreground: Color::Rgb(216, 222, 233),
            accent: Color::Rgb(235, 173, 94),
            muted: Color::Rgb(110, 118, 129),
            border: Color::Rgb(68, 76, 90),
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(246, 246, 242),
            foreground: Color::Rgb(40, 44, 52),
            accent: Color::Rgb(176, 104, 16),
            muted: Color::Rgb(140, 144, 152),
            border: Color::Rgb(190, 192, 198),
            border_type: BorderType::Plain,
        }
    }

    /// Look up a configured theme name.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_dark() {
        assert_eq!(Theme::by_name("mauve").name, "dark");
        assert_eq!(Theme::by_name("light").name, "light");
    }
}
