//! floatlabel Widgets
//!
//! A text field whose placeholder floats above the input when the field is
//! focused or filled, with an underline and a status label for errors and
//! helper text.
//!
//! # Architecture
//!
//! 1. **Geometry**: [`PlaceholderGeometry`] names every offset of the fixed
//!    vertical stack (floating row, input row, underline, status label).
//!
//! 2. **Styling**: [`Styling`] maps the [`FieldState`] and floating flag to
//!    fonts and colors; [`StandardAppearance`] is the stock implementation.
//!
//! 3. **State machine**: [`FieldState`] moves between inactive, active and
//!    emphasized on focus, enabled and emphasis events.
//!
//! 4. **Layout**: [`PlaceholderView`] computes frames and fakes the label's
//!    font-size change with a scale transform.
//!
//! 5. **Controller**: [`TextField`] ties them together behind a
//!    platform-agnostic [`FieldHost`] and `FieldEvent` interface.
//!
//! Nothing animates on its own: animated calls register transitions that
//! advance when the host calls [`TextField::tick`].

pub mod error;
pub mod geometry;
pub mod host;
pub mod placeholder;
pub mod state;
pub mod styling;
pub mod text_field;

#[cfg(test)]
mod tests;

pub use error::{FieldError, Result};
pub use geometry::PlaceholderGeometry;
pub use host::{DetachedHost, FieldHost};
pub use placeholder::{
    floating_transition, LabelPresentation, PlaceholderSnapshot, PlaceholderView,
    StatusPresentation,
};
pub use state::{Emphasis, EmphasisKind, FieldState, FocusContext, StateEvent, StatusVisibility};
pub use styling::{StandardAppearance, Style, Styling};
pub use text_field::{
    status_resize_transition, FieldConfig, FieldSnapshot, PlaceholderBehaviour, TextField,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::geometry::PlaceholderGeometry;
    pub use crate::host::{DetachedHost, FieldHost};
    pub use crate::state::{Emphasis, FieldState, StatusVisibility};
    pub use crate::styling::{StandardAppearance, Style, Styling};
    pub use crate::text_field::{FieldConfig, PlaceholderBehaviour, TextField};
}
