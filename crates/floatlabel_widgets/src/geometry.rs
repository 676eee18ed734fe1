//! Placeholder geometry
//!
//! Named offsets and line heights defining the field's vertical stack:
//!
//! ```text
//! top_to_floating_label_offset
//! ┌ floating row ───────────────┐  floating_line_height
//! floating_to_non_floating_offset
//! ┌ input row ──────────────────┐  non_floating_line_height
//! non_floating_to_underline_offset
//! ━━ underline ━━━━━━━━━━━━━━━━━━  underline_height
//! underline_to_status_offset
//! ┌ status label ───────────────┐  (only when status text is shown)
//! ```

use crate::error::{FieldError, Result};

/// Immutable geometry of a floating placeholder field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderGeometry {
    pub underline_height: f32,
    pub top_to_floating_label_offset: f32,
    /// Fixed line height of the floating and status labels (font metrics when `None`)
    pub floating_line_height: Option<f32>,
    pub floating_to_non_floating_offset: f32,
    /// Fixed line height of the input row (font metrics when `None`)
    pub non_floating_line_height: Option<f32>,
    pub non_floating_to_underline_offset: f32,
    pub underline_to_status_offset: f32,
    /// Horizontal gap between an accessory view and the text
    pub accessory_to_text_offset: f32,
}

impl PlaceholderGeometry {
    /// Geometry with every offset zero and font-derived line heights
    pub fn new() -> Self {
        Self {
            underline_height: 0.0,
            top_to_floating_label_offset: 0.0,
            floating_line_height: None,
            floating_to_non_floating_offset: 0.0,
            non_floating_line_height: None,
            non_floating_to_underline_offset: 0.0,
            underline_to_status_offset: 0.0,
            accessory_to_text_offset: 0.0,
        }
    }

    /// The geometry used by the demo field
    pub fn showcase() -> Self {
        Self {
            underline_height: 1.0,
            top_to_floating_label_offset: 8.0,
            floating_line_height: Some(18.0),
            floating_to_non_floating_offset: 4.0,
            non_floating_line_height: Some(22.0),
            non_floating_to_underline_offset: 12.0,
            underline_to_status_offset: 8.0,
            accessory_to_text_offset: 8.0,
        }
    }

    pub fn underline_height(mut self, value: f32) -> Self {
        self.underline_height = value;
        self
    }

    pub fn top_to_floating_label_offset(mut self, value: f32) -> Self {
        self.top_to_floating_label_offset = value;
        self
    }

    pub fn floating_line_height(mut self, value: Option<f32>) -> Self {
        self.floating_line_height = value;
        self
    }

    pub fn floating_to_non_floating_offset(mut self, value: f32) -> Self {
        self.floating_to_non_floating_offset = value;
        self
    }

    pub fn non_floating_line_height(mut self, value: Option<f32>) -> Self {
        self.non_floating_line_height = value;
        self
    }

    pub fn non_floating_to_underline_offset(mut self, value: f32) -> Self {
        self.non_floating_to_underline_offset = value;
        self
    }

    pub fn underline_to_status_offset(mut self, value: f32) -> Self {
        self.underline_to_status_offset = value;
        self
    }

    pub fn accessory_to_text_offset(mut self, value: f32) -> Self {
        self.accessory_to_text_offset = value;
        self
    }

    /// Reject values that would produce negative or undefined rectangles
    pub fn validate(&self) -> Result<()> {
        let offsets = [
            ("underline_height", self.underline_height),
            ("top_to_floating_label_offset", self.top_to_floating_label_offset),
            (
                "floating_to_non_floating_offset",
                self.floating_to_non_floating_offset,
            ),
            (
                "non_floating_to_underline_offset",
                self.non_floating_to_underline_offset,
            ),
            ("underline_to_status_offset", self.underline_to_status_offset),
            ("accessory_to_text_offset", self.accessory_to_text_offset),
        ];
        for (name, value) in offsets {
            if !value.is_finite() {
                return Err(FieldError::NonFinite { name, value });
            }
            if value < 0.0 {
                return Err(FieldError::NegativeOffset { name, value });
            }
        }

        let line_heights = [
            ("floating_line_height", self.floating_line_height),
            ("non_floating_line_height", self.non_floating_line_height),
        ];
        for (name, value) in line_heights {
            let Some(value) = value else { continue };
            if !value.is_finite() {
                return Err(FieldError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(FieldError::InvalidLineHeight { name, value });
            }
        }

        Ok(())
    }
}

impl Default for PlaceholderGeometry {
    fn default() -> Self {
        Self::showcase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_is_valid() {
        assert_eq!(PlaceholderGeometry::showcase().validate(), Ok(()));
        assert_eq!(PlaceholderGeometry::new().validate(), Ok(()));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let geometry = PlaceholderGeometry::showcase().underline_to_status_offset(-2.0);
        assert_eq!(
            geometry.validate(),
            Err(FieldError::NegativeOffset {
                name: "underline_to_status_offset",
                value: -2.0
            })
        );
    }

    #[test]
    fn test_bad_line_heights_rejected() {
        let zero = PlaceholderGeometry::new().floating_line_height(Some(0.0));
        assert!(matches!(
            zero.validate(),
            Err(FieldError::InvalidLineHeight {
                name: "floating_line_height",
                ..
            })
        ));

        let nan = PlaceholderGeometry::new().non_floating_line_height(Some(f32::NAN));
        assert!(matches!(
            nan.validate(),
            Err(FieldError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_infinite_offset_rejected() {
        let geometry = PlaceholderGeometry::new().top_to_floating_label_offset(f32::INFINITY);
        assert!(matches!(
            geometry.validate(),
            Err(FieldError::NonFinite {
                name: "top_to_floating_label_offset",
                ..
            })
        ));
    }
}
