//! Platform adapter events
//!
//! Native text widgets report lifecycle changes (focus moved, the user
//! edited the text, the widget was resized, it was enabled/disabled). A thin
//! platform adapter translates those into [`FieldEvent`]s and feeds them to
//! the field controller, keeping the controller free of platform types.

use crate::geometry::Rect;

/// A lifecycle event coming from the host text widget
#[derive(Clone, Debug, PartialEq)]
pub enum FieldEvent {
    /// The host widget gained (`true`) or lost (`false`) input focus
    FocusChanged(bool),
    /// The user edited the text; carries the full new text
    TextChanged(String),
    /// The host widget was laid out with new bounds
    BoundsChanged(Rect),
    /// The host widget was enabled or disabled
    EnabledChanged(bool),
}

impl FieldEvent {
    /// Short name used in logs and scripts
    pub fn name(&self) -> &'static str {
        match self {
            FieldEvent::FocusChanged(true) => "focus",
            FieldEvent::FocusChanged(false) => "blur",
            FieldEvent::TextChanged(_) => "text",
            FieldEvent::BoundsChanged(_) => "bounds",
            FieldEvent::EnabledChanged(_) => "enabled",
        }
    }
}
