//! Field styling
//!
//! [`Styling`] maps the current [`FieldState`] and floating flag to the
//! fonts and colors of the placeholder label, underline and status label.
//! [`StandardAppearance`] is the stock implementation built from a handful
//! of colors and two fonts.

use std::fmt::Debug;

use floatlabel_core::{Color, Font};

use crate::state::FieldState;

/// Colors applied to the field in one visual state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub placeholder_color: Color,
    pub floating_placeholder_color: Color,
    pub underline_color: Color,
}

impl Style {
    pub fn new(placeholder_color: Color, floating_placeholder_color: Color, underline_color: Color) -> Self {
        Self {
            placeholder_color,
            floating_placeholder_color,
            underline_color,
        }
    }

    /// Every element in one color
    pub fn uniform(color: Color) -> Self {
        Self::new(color, color, color)
    }

    /// Label color for the given placeholder position
    pub fn label_color(&self, is_floating: bool) -> Color {
        if is_floating {
            self.floating_placeholder_color
        } else {
            self.placeholder_color
        }
    }
}

/// Font and color lookup for a field
pub trait Styling: Debug + Send + Sync {
    /// Placeholder label font in the floating or resting position
    fn label_font(&self, is_floating: bool) -> Font;

    /// Placeholder label color
    fn label_color(&self, state: &FieldState, is_floating: bool) -> Color;

    /// Status label font
    fn status_font(&self) -> Font;

    /// Status label color
    fn status_color(&self, state: &FieldState) -> Color;

    fn underline_color(&self, state: &FieldState) -> Color;

    /// Style applied by plain errors
    fn error_style(&self) -> Style;

    /// Status label color for plain errors
    fn error_status_color(&self) -> Color {
        self.error_style().underline_color
    }
}

/// Stock appearance built from state colors and two fonts
///
/// The floating font doubles as the status font unless one is set with
/// [`StandardAppearance::with_status_font`]. Without a floating inactive
/// color, the inactive color is used for the floating label too.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardAppearance {
    pub active_color: Color,
    pub inactive_color: Color,
    pub disabled_color: Color,
    pub underline_color: Color,
    pub error_color: Color,
    pub font: Font,
    pub floating_font: Font,
    pub status_font: Option<Font>,
    pub floating_inactive_color: Option<Color>,
}

impl StandardAppearance {
    pub fn new(
        active_color: Color,
        inactive_color: Color,
        disabled_color: Color,
        underline_color: Color,
        font: Font,
        floating_font: Font,
    ) -> Self {
        Self {
            active_color,
            inactive_color,
            disabled_color,
            underline_color,
            error_color: Color::from_hex(0xFF3B30),
            font,
            floating_font,
            status_font: None,
            floating_inactive_color: None,
        }
    }

    /// The appearance used by the demo field
    pub fn showcase() -> Self {
        Self::new(
            Color::from_hex(0x00B9FF),
            Color::from_hex(0xA8AAAC),
            Color::from_hex(0xD3D5D8),
            Color::from_hex(0xE2E6E8),
            Font::system(18.0),
            Font::system(14.0),
        )
        .with_floating_inactive_color(Color::from_hex(0x6F8691))
    }

    pub fn with_error_color(mut self, color: Color) -> Self {
        self.error_color = color;
        self
    }

    pub fn with_status_font(mut self, font: Font) -> Self {
        self.status_font = Some(font);
        self
    }

    pub fn with_floating_inactive_color(mut self, color: Color) -> Self {
        self.floating_inactive_color = Some(color);
        self
    }

    pub fn active_style(&self) -> Style {
        Style::uniform(self.active_color)
    }

    pub fn inactive_style(&self) -> Style {
        Style::new(
            self.inactive_color,
            self.floating_inactive_color.unwrap_or(self.inactive_color),
            self.underline_color,
        )
    }

    pub fn disabled_style(&self) -> Style {
        Style::new(self.disabled_color, self.disabled_color, self.underline_color)
    }

    /// Style in effect for `state`
    pub fn style_for(&self, state: &FieldState) -> Style {
        match state {
            FieldState::Inactive { enabled: true } => self.inactive_style(),
            FieldState::Inactive { enabled: false } => self.disabled_style(),
            FieldState::Active => self.active_style(),
            FieldState::Emphasized(emphasis) => emphasis.style,
        }
    }
}

impl Default for StandardAppearance {
    fn default() -> Self {
        Self::showcase()
    }
}

impl Styling for StandardAppearance {
    fn label_font(&self, is_floating: bool) -> Font {
        if is_floating {
            self.floating_font.clone()
        } else {
            self.font.clone()
        }
    }

    fn label_color(&self, state: &FieldState, is_floating: bool) -> Color {
        self.style_for(state).label_color(is_floating)
    }

    fn status_font(&self) -> Font {
        self.status_font
            .clone()
            .unwrap_or_else(|| self.floating_font.clone())
    }

    fn status_color(&self, state: &FieldState) -> Color {
        match state {
            FieldState::Emphasized(emphasis) => emphasis.status_color,
            FieldState::Inactive { enabled: false } => self.disabled_color,
            // Bottom text reads like the resting floating label
            _ => self.floating_inactive_color.unwrap_or(self.inactive_color),
        }
    }

    fn underline_color(&self, state: &FieldState) -> Color {
        self.style_for(state).underline_color
    }

    fn error_style(&self) -> Style {
        Style::uniform(self.error_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Emphasis;

    #[test]
    fn test_floating_inactive_fallback() {
        let appearance = StandardAppearance::new(
            Color::BLACK,
            Color::GRAY,
            Color::WHITE,
            Color::GRAY,
            Font::system(18.0),
            Font::system(14.0),
        );
        let state = FieldState::Inactive { enabled: true };
        assert_eq!(appearance.label_color(&state, true), Color::GRAY);

        let appearance = appearance.with_floating_inactive_color(Color::RED);
        assert_eq!(appearance.label_color(&state, true), Color::RED);
        assert_eq!(appearance.label_color(&state, false), Color::GRAY);
    }

    #[test]
    fn test_state_colors() {
        let appearance = StandardAppearance::showcase();
        assert_eq!(
            appearance.underline_color(&FieldState::Active),
            Color::from_hex(0x00B9FF)
        );
        assert_eq!(
            appearance.label_color(&FieldState::Inactive { enabled: false }, false),
            Color::from_hex(0xD3D5D8)
        );
        assert_eq!(
            appearance.underline_color(&FieldState::Inactive { enabled: false }),
            Color::from_hex(0xE2E6E8)
        );
    }

    #[test]
    fn test_emphasis_overrides_colors() {
        let appearance = StandardAppearance::showcase();
        let state = FieldState::Emphasized(Emphasis::with_color(Some("Saved".into()), Color::RED));
        assert_eq!(appearance.label_color(&state, true), Color::RED);
        assert_eq!(appearance.underline_color(&state), Color::RED);
        assert_eq!(appearance.status_color(&state), Color::RED);
    }

    #[test]
    fn test_status_font_defaults_to_floating_font() {
        let appearance = StandardAppearance::showcase();
        assert_eq!(appearance.status_font(), Font::system(14.0));
        let appearance = appearance.with_status_font(Font::system(12.0));
        assert_eq!(appearance.status_font(), Font::system(12.0));
    }
}
