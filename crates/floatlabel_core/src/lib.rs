//! floatlabel Core
//!
//! Foundational primitives shared by the floatlabel crates:
//!
//! - **Geometry**: points, sizes, rectangles and affine transforms
//! - **Color**: RGBA colors with hex parsing
//! - **Text**: font descriptions and the `TextMeasurer` seam
//! - **Events**: platform adapter events fed into field controllers
//!
//! # Example
//!
//! ```rust
//! use floatlabel_core::{EstimatedTextMeasurer, Font, TextMeasurer};
//!
//! let measurer = EstimatedTextMeasurer::new(0.5, 1.0);
//! let metrics = measurer.measure("Company", &Font::system(20.0), None);
//! assert_eq!(metrics.width, 70.0);
//! assert_eq!(measurer.line_height(&Font::system(20.0)), 20.0);
//! ```

pub mod color;
pub mod events;
pub mod geometry;
pub mod text;

pub use color::Color;
pub use events::FieldEvent;
pub use geometry::{Affine2D, Point, Rect, Size};
pub use text::{EstimatedTextMeasurer, Font, TextMeasurer, TextMetrics};
