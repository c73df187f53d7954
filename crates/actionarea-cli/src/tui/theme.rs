//! Colours for the dashboard.
//!
//! Two palettes ship: `dark` (the default) and `light`. Bars take their
//! colour from the tint of the unit on top, falling back to the accent.

use actionarea_core::content::Tint;
use ratatui::style::Color;

/// Palette used by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Bar colour of untinted units and focus highlights.
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    /// Region frame.
    pub border: Color,
    /// Region frame while it holds the focused unit.
    pub border_focused: Color,
    /// Fill behind an elevated action bar.
    pub elevated: Color,
    /// Fill behind the help popup.
    pub backdrop: Color,

    pub text: Color,
    pub subtle: Color,
    /// Disabled actions and hints.
    pub faint: Color,
}

impl Theme {
    pub const DARK: Self = Self {
        accent: Color::Rgb(95, 175, 215),
        success: Color::Rgb(135, 190, 110),
        warning: Color::Rgb(230, 185, 90),
        danger: Color::Rgb(225, 95, 95),
        info: Color::Rgb(130, 150, 230),
        border: Color::Rgb(70, 74, 82),
        border_focused: Color::Rgb(95, 175, 215),
        elevated: Color::Rgb(38, 44, 58),
        backdrop: Color::Rgb(20, 22, 26),
        text: Color::Rgb(220, 222, 226),
        subtle: Color::Rgb(160, 164, 172),
        faint: Color::Rgb(100, 104, 112),
    };

    pub const LIGHT: Self = Self {
        accent: Color::Rgb(30, 100, 170),
        success: Color::Rgb(40, 130, 60),
        warning: Color::Rgb(170, 110, 0),
        danger: Color::Rgb(180, 40, 40),
        info: Color::Rgb(70, 80, 190),
        border: Color::Rgb(190, 192, 198),
        border_focused: Color::Rgb(30, 100, 170),
        elevated: Color::Rgb(226, 232, 244),
        backdrop: Color::Rgb(248, 248, 250),
        text: Color::Rgb(30, 32, 36),
        subtle: Color::Rgb(85, 88, 96),
        faint: Color::Rgb(150, 152, 160),
    };

    /// Look up a palette by its config name. Unknown names get `dark`.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::LIGHT
        } else {
            Self::DARK
        }
    }

    /// Bar colour for a unit tinted with `tint`.
    pub fn tint(&self, tint: Option<Tint>) -> Color {
        match tint {
            None | Some(Tint::Accent) => self.accent,
            Some(Tint::Success) => self.success,
            Some(Tint::Warning) => self.warning,
            Some(Tint::Danger) => self.danger,
            Some(Tint::Info) => self.info,
            Some(Tint::Rgb(r, g, b)) => Color::Rgb(r, g, b),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}
