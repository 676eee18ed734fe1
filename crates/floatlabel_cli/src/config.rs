//! floatlabel configuration file handling
//!
//! `floatlabel.toml` describes one field: its behaviour, geometry and
//! appearance. Every key is optional and falls back to the showcase field.
//!
//! ```toml
//! [field]
//! behaviour = "float"
//! status-visibility = "while-floating"
//! width = 320
//!
//! [geometry]
//! floating-line-height = 20
//!
//! [appearance]
//! active-color = "#00B9FF"
//! ```

use anyhow::{Context, Result};
use floatlabel_core::{Color, EstimatedTextMeasurer, Font};
use floatlabel_widgets::{
    FieldConfig, PlaceholderBehaviour, PlaceholderGeometry, StandardAppearance, StatusVisibility,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "floatlabel.toml";

/// Contents of `floatlabel.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FloatlabelConfig {
    #[serde(default)]
    pub field: FieldSection,
    #[serde(default)]
    pub geometry: GeometrySection,
    #[serde(default)]
    pub appearance: AppearanceSection,
    #[serde(default)]
    pub measurer: MeasurerSection,
}

// =============================================================================
// [field]
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BehaviourSetting {
    #[default]
    Float,
    Disappear,
}

impl From<BehaviourSetting> for PlaceholderBehaviour {
    fn from(setting: BehaviourSetting) -> Self {
        match setting {
            BehaviourSetting::Float => PlaceholderBehaviour::Float,
            BehaviourSetting::Disappear => PlaceholderBehaviour::Disappear,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusVisibilitySetting {
    #[default]
    AlwaysVisible,
    WhileFloating,
    OnlyWhenEmphasized,
}

impl From<StatusVisibilitySetting> for StatusVisibility {
    fn from(setting: StatusVisibilitySetting) -> Self {
        match setting {
            StatusVisibilitySetting::AlwaysVisible => StatusVisibility::AlwaysVisible,
            StatusVisibilitySetting::WhileFloating => StatusVisibility::WhileFloating,
            StatusVisibilitySetting::OnlyWhenEmphasized => StatusVisibility::OnlyWhenEmphasized,
        }
    }
}

/// Field behaviour and the size it is laid out at
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FieldSection {
    #[serde(default)]
    pub behaviour: BehaviourSetting,
    #[serde(default)]
    pub status_visibility: StatusVisibilitySetting,
    #[serde(default = "default_true")]
    pub clear_on_type: bool,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub bottom_text: Option<String>,
}

impl Default for FieldSection {
    fn default() -> Self {
        Self {
            behaviour: BehaviourSetting::default(),
            status_visibility: StatusVisibilitySetting::default(),
            clear_on_type: true,
            width: default_width(),
            placeholder: None,
            bottom_text: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> f32 {
    320.0
}

// =============================================================================
// [geometry]
// =============================================================================

/// Offsets of the vertical stack
///
/// With `auto-line-heights` the row heights follow the font metrics and the
/// two line height keys are ignored.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeometrySection {
    #[serde(default)]
    pub auto_line_heights: bool,
    #[serde(default = "default_underline_height")]
    pub underline_height: f32,
    #[serde(default = "default_top_offset")]
    pub top_to_floating_label_offset: f32,
    #[serde(default = "default_floating_line_height")]
    pub floating_line_height: f32,
    #[serde(default = "default_floating_gap")]
    pub floating_to_non_floating_offset: f32,
    #[serde(default = "default_non_floating_line_height")]
    pub non_floating_line_height: f32,
    #[serde(default = "default_underline_gap")]
    pub non_floating_to_underline_offset: f32,
    #[serde(default = "default_status_gap")]
    pub underline_to_status_offset: f32,
    #[serde(default = "default_accessory_gap")]
    pub accessory_to_text_offset: f32,
}

impl Default for GeometrySection {
    fn default() -> Self {
        let showcase = PlaceholderGeometry::showcase();
        Self {
            auto_line_heights: false,
            underline_height: showcase.underline_height,
            top_to_floating_label_offset: showcase.top_to_floating_label_offset,
            floating_line_height: default_floating_line_height(),
            floating_to_non_floating_offset: showcase.floating_to_non_floating_offset,
            non_floating_line_height: default_non_floating_line_height(),
            non_floating_to_underline_offset: showcase.non_floating_to_underline_offset,
            underline_to_status_offset: showcase.underline_to_status_offset,
            accessory_to_text_offset: showcase.accessory_to_text_offset,
        }
    }
}

fn default_underline_height() -> f32 {
    PlaceholderGeometry::showcase().underline_height
}

fn default_top_offset() -> f32 {
    PlaceholderGeometry::showcase().top_to_floating_label_offset
}

fn default_floating_line_height() -> f32 {
    PlaceholderGeometry::showcase()
        .floating_line_height
        .unwrap_or(18.0)
}

fn default_non_floating_line_height() -> f32 {
    PlaceholderGeometry::showcase()
        .non_floating_line_height
        .unwrap_or(22.0)
}

fn default_floating_gap() -> f32 {
    PlaceholderGeometry::showcase().floating_to_non_floating_offset
}

fn default_underline_gap() -> f32 {
    PlaceholderGeometry::showcase().non_floating_to_underline_offset
}

fn default_status_gap() -> f32 {
    PlaceholderGeometry::showcase().underline_to_status_offset
}

fn default_accessory_gap() -> f32 {
    PlaceholderGeometry::showcase().accessory_to_text_offset
}

impl GeometrySection {
    pub fn to_geometry(&self) -> PlaceholderGeometry {
        let line_height = |height: f32| (!self.auto_line_heights).then_some(height);
        PlaceholderGeometry {
            underline_height: self.underline_height,
            top_to_floating_label_offset: self.top_to_floating_label_offset,
            floating_line_height: line_height(self.floating_line_height),
            floating_to_non_floating_offset: self.floating_to_non_floating_offset,
            non_floating_line_height: line_height(self.non_floating_line_height),
            non_floating_to_underline_offset: self.non_floating_to_underline_offset,
            underline_to_status_offset: self.underline_to_status_offset,
            accessory_to_text_offset: self.accessory_to_text_offset,
        }
    }
}

// =============================================================================
// [appearance]
// =============================================================================

/// Colors as `#RRGGBB` (or `#RRGGBBAA`) strings and font sizes in pixels
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppearanceSection {
    #[serde(default = "default_active_color")]
    pub active_color: String,
    #[serde(default = "default_inactive_color")]
    pub inactive_color: String,
    #[serde(default = "default_disabled_color")]
    pub disabled_color: String,
    #[serde(default = "default_underline_color")]
    pub underline_color: String,
    #[serde(default = "default_error_color")]
    pub error_color: String,
    #[serde(default = "default_floating_inactive_color")]
    pub floating_inactive_color: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_floating_font_size")]
    pub floating_font_size: f32,
    #[serde(default)]
    pub status_font_size: Option<f32>,
}

impl Default for AppearanceSection {
    fn default() -> Self {
        Self {
            active_color: default_active_color(),
            inactive_color: default_inactive_color(),
            disabled_color: default_disabled_color(),
            underline_color: default_underline_color(),
            error_color: default_error_color(),
            floating_inactive_color: default_floating_inactive_color(),
            font_family: None,
            font_size: default_font_size(),
            floating_font_size: default_floating_font_size(),
            status_font_size: None,
        }
    }
}

fn default_active_color() -> String {
    "#00B9FF".to_string()
}

fn default_inactive_color() -> String {
    "#A8AAAC".to_string()
}

fn default_disabled_color() -> String {
    "#D3D5D8".to_string()
}

fn default_underline_color() -> String {
    "#E2E6E8".to_string()
}

fn default_error_color() -> String {
    "#FF3B30".to_string()
}

fn default_floating_inactive_color() -> Option<String> {
    Some("#6F8691".to_string())
}

fn default_font_size() -> f32 {
    18.0
}

fn default_floating_font_size() -> f32 {
    14.0
}

impl AppearanceSection {
    fn font(&self, size: f32) -> Font {
        match &self.font_family {
            Some(family) => Font::new(family.clone(), size),
            None => Font::system(size),
        }
    }

    pub fn to_appearance(&self) -> Result<StandardAppearance> {
        let mut appearance = StandardAppearance::new(
            parse_color("active-color", &self.active_color)?,
            parse_color("inactive-color", &self.inactive_color)?,
            parse_color("disabled-color", &self.disabled_color)?,
            parse_color("underline-color", &self.underline_color)?,
            self.font(self.font_size),
            self.font(self.floating_font_size),
        )
        .with_error_color(parse_color("error-color", &self.error_color)?);

        if let Some(color) = &self.floating_inactive_color {
            appearance =
                appearance.with_floating_inactive_color(parse_color("floating-inactive-color", color)?);
        }
        if let Some(size) = self.status_font_size {
            appearance = appearance.with_status_font(self.font(size));
        }
        Ok(appearance)
    }
}

/// Parse a `#RRGGBB` color, naming the key on failure
pub fn parse_color(key: &str, value: &str) -> Result<Color> {
    Color::parse_hex(value)
        .with_context(|| format!("Invalid color for `{}`: '{}' (expected #RRGGBB)", key, value))
}

// =============================================================================
// [measurer]
// =============================================================================

/// Character-advance text measurer used for headless layout
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeasurerSection {
    #[serde(default = "default_advance")]
    pub advance: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

impl Default for MeasurerSection {
    fn default() -> Self {
        Self {
            advance: default_advance(),
            line_height: default_line_height(),
        }
    }
}

fn default_advance() -> f32 {
    EstimatedTextMeasurer::default().advance
}

fn default_line_height() -> f32 {
    EstimatedTextMeasurer::default().line_height
}

// =============================================================================
// Loading
// =============================================================================

impl FloatlabelConfig {
    /// Load `path`, or `floatlabel.toml` from the working directory, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Field construction parameters
    pub fn field_config(&self) -> Result<FieldConfig> {
        Ok(FieldConfig::new()
            .behaviour(self.field.behaviour.into())
            .status_visibility(self.field.status_visibility.into())
            .clear_on_type(self.field.clear_on_type)
            .geometry(self.geometry.to_geometry())
            .appearance(self.appearance.to_appearance()?))
    }

    pub fn measurer(&self) -> EstimatedTextMeasurer {
        EstimatedTextMeasurer::new(self.measurer.advance, self.measurer.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_showcase() {
        let config = FloatlabelConfig::parse("").unwrap();
        assert_eq!(config.geometry.to_geometry(), PlaceholderGeometry::showcase());
        assert_eq!(
            config.appearance.to_appearance().unwrap(),
            StandardAppearance::showcase()
        );
        assert_eq!(config.field.width, 320.0);
        assert!(config.field.clear_on_type);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = FloatlabelConfig::parse(
            r##"
            [field]
            behaviour = "disappear"
            status-visibility = "only-when-emphasized"
            clear-on-type = false

            [geometry]
            top-to-floating-label-offset = 12
            non-floating-line-height = 30

            [appearance]
            active-color = "#112233"
            status-font-size = 12
            "##,
        )
        .unwrap();

        assert_eq!(config.field.behaviour, BehaviourSetting::Disappear);
        assert_eq!(
            config.field.status_visibility,
            StatusVisibilitySetting::OnlyWhenEmphasized
        );
        assert!(!config.field.clear_on_type);

        let geometry = config.geometry.to_geometry();
        assert_eq!(geometry.top_to_floating_label_offset, 12.0);
        assert_eq!(geometry.non_floating_line_height, Some(30.0));
        assert_eq!(geometry.floating_line_height, Some(18.0));
        assert_eq!(geometry.underline_height, 1.0);

        let appearance = config.appearance.to_appearance().unwrap();
        assert_eq!(appearance.active_color, Color::from_hex(0x112233));
        assert_eq!(appearance.status_font, Some(Font::system(12.0)));
        assert_eq!(
            appearance.floating_inactive_color,
            Some(Color::from_hex(0x6F8691))
        );
    }

    #[test]
    fn test_auto_line_heights_follow_fonts() {
        let config = FloatlabelConfig::parse(
            r#"
            [geometry]
            auto-line-heights = true
            floating-line-height = 40
            "#,
        )
        .unwrap();
        let geometry = config.geometry.to_geometry();
        assert_eq!(geometry.floating_line_height, None);
        assert_eq!(geometry.non_floating_line_height, None);
    }

    #[test]
    fn test_invalid_color_names_key() {
        let config = FloatlabelConfig::parse(
            r#"
            [appearance]
            error-color = "crimson"
            "#,
        )
        .unwrap();
        let err = config.appearance.to_appearance().unwrap_err();
        assert!(err.to_string().contains("error-color"), "{err}");
    }

    #[test]
    fn test_unknown_behaviour_rejected() {
        let result = FloatlabelConfig::parse(
            r#"
            [field]
            behaviour = "sink"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let config = FloatlabelConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = FloatlabelConfig::parse(&text).unwrap();
        assert_eq!(parsed.geometry.to_geometry(), config.geometry.to_geometry());
    }
}
