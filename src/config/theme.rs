//! Theme configuration options for dirview
//!
//! Defines the `[theme]` table of dirview.toml. Every element of the screen
//! has a [ColorPair]; colors left unset fall back to the internal defaults.
//! Text attributes (bold, italic) are fixed per element.

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// path = { fg = "200" }
/// selection = { bg = "#5f005f" }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    path: ColorPair,
    header: ColorPair,
    active_header: ColorPair,
    selection: ColorPair,
    status: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            path: ColorPair {
                fg: Color::Indexed(200),
                ..ColorPair::default()
            },
            header: ColorPair {
                fg: Color::Indexed(198),
                ..ColorPair::default()
            },
            active_header: ColorPair {
                bg: Color::Indexed(198),
                ..ColorPair::default()
            },
            selection: ColorPair {
                bg: Color::Indexed(212),
                ..ColorPair::default()
            },
            status: ColorPair {
                fg: Color::Yellow,
                ..ColorPair::default()
            },
        }
    }
}

impl Theme {
    /// Internal default theme, used as fallback for colors set to Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    /// Current path on the first line.
    pub fn path_style(&self) -> Style {
        self.path
            .style_or(&Theme::internal_defaults().path)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        self.header
            .style_or(&Theme::internal_defaults().header)
            .add_modifier(Modifier::ITALIC)
    }

    /// Header cell of the column that responds to left/right.
    pub fn active_header_style(&self) -> Style {
        self.active_header
            .style_or(&Theme::internal_defaults().active_header)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    /// Row under the cursor.
    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        self.status.style_or(&Theme::internal_defaults().status)
    }
}

/// Foreground and background color of one screen element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

/// Both colors Reset
impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    #[inline]
    pub fn fg(&self) -> Color {
        self.fg
    }

    #[inline]
    pub fn bg(&self) -> Color {
        self.bg
    }

    /// Replaces Reset colors with those of `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts to a Style, taking Reset colors from `fallback`.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_match_classic_scheme() {
        let theme = Theme::default();
        assert_eq!(
            theme.path_style(),
            Style::default()
                .fg(Color::Indexed(200))
                .bg(Color::Reset)
                .add_modifier(Modifier::BOLD)
        );
        assert_eq!(theme.header_style().fg, Some(Color::Indexed(198)));
        assert!(theme.header_style().add_modifier.contains(Modifier::ITALIC));
        assert_eq!(theme.active_header_style().bg, Some(Color::Indexed(198)));
        assert!(
            theme
                .active_header_style()
                .add_modifier
                .contains(Modifier::BOLD | Modifier::ITALIC)
        );
        assert_eq!(theme.selection_style().bg, Some(Color::Indexed(212)));
    }

    #[test]
    fn partial_override_keeps_other_colors() -> Result<(), Box<dyn std::error::Error>> {
        let theme: Theme = toml::from_str(
            r##"
            selection = { bg = "#102030" }
            path = { bg = "blue" }
            "##,
        )?;
        assert_eq!(theme.selection_style().bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert_eq!(theme.path_style().fg, Some(Color::Indexed(200)));
        assert_eq!(theme.path_style().bg, Some(Color::Blue));
        assert_eq!(theme.header_style().fg, Some(Color::Indexed(198)));
        Ok(())
    }
}
