//! Fonts and text measurement
//!
//! The layout engine never shapes text itself. It asks a [`TextMeasurer`]
//! for natural sizes and line heights, so hosts can plug in their real font
//! stack while tests use the deterministic [`EstimatedTextMeasurer`].

/// A font description
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font family name (None for the platform default)
    pub family: Option<String>,
    /// Font size in pixels
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
        }
    }

    /// The platform default family at the given size
    pub fn system(size: f32) -> Self {
        Self { family: None, size }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(17.0)
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in pixels (widest line when wrapped)
    pub width: f32,
    /// Height in pixels (line height times number of lines)
    pub height: f32,
    /// Number of lines (0 for empty text)
    pub line_count: u32,
}

/// Trait for measuring text dimensions
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` set in `font`
    ///
    /// `max_width` of `None` means an unbounded single line; `Some(w)` wraps
    /// at `w` pixels.
    fn measure(&self, text: &str, font: &Font, max_width: Option<f32>) -> TextMetrics;

    /// Natural (unrounded) line height of `font`
    fn line_height(&self, font: &Font) -> f32;
}

/// A text measurer that uses per-character estimates
///
/// Every character advances `advance * font.size` pixels and every line is
/// `line_height * font.size` tall. Good enough for headless layout and fully
/// deterministic for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasurer {
    /// Horizontal advance per character, as a fraction of the font size
    pub advance: f32,
    /// Line height multiplier
    pub line_height: f32,
}

impl EstimatedTextMeasurer {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        // ~0.55 * font_size per character is conservative for proportional fonts
        Self::new(0.55, 1.2)
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font: &Font, max_width: Option<f32>) -> TextMetrics {
        let char_count = text.chars().count();
        if char_count == 0 {
            return TextMetrics::default();
        }

        let total_width = char_count as f32 * font.size * self.advance;
        let (width, line_count) = match max_width {
            Some(max_width) if max_width > 0.0 && total_width > max_width => {
                let lines = (total_width / max_width).ceil() as u32;
                (max_width, lines.max(1))
            }
            _ => (total_width, 1),
        };

        TextMetrics {
            width,
            height: self.line_height(font) * line_count as f32,
            line_count,
        }
    }

    fn line_height(&self, font: &Font) -> f32 {
        font.size * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_measurement() {
        let measurer = EstimatedTextMeasurer::new(0.5, 1.0);
        let metrics = measurer.measure("Company Name", &Font::system(20.0), None);
        assert_eq!(metrics.width, 120.0);
        assert_eq!(metrics.height, 20.0);
        assert_eq!(metrics.line_count, 1);
    }

    #[test]
    fn test_wraps_at_max_width() {
        let measurer = EstimatedTextMeasurer::new(0.5, 1.0);
        let metrics = measurer.measure("abcdefghij", &Font::system(10.0), Some(20.0));
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.width, 20.0);
        assert_eq!(metrics.height, 30.0);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let metrics = EstimatedTextMeasurer::default().measure("", &Font::system(14.0), None);
        assert_eq!(metrics, TextMetrics::default());
    }
}
