//! Field state machine
//!
//! Visual state of a field, independent of whether the placeholder floats:
//!
//! ```text
//!                FocusGained
//!  Inactive{e} ──────────────► Active
//!      ▲  ◄────────────────────  │
//!      │        FocusLost        │
//!      │                         │ Emphasize (from any state)
//!      └──── ClearEmphasis ◄── Emphasized(Emphasis)
//!           (Active if focused)
//! ```
//!
//! Emphasis overrides focus: focus and enabled changes leave an emphasized
//! state alone. Clearing falls back to the state implied by the *current*
//! focus and enabled flags, never to the state before the emphasis.

use floatlabel_core::Color;

use crate::styling::{Style, Styling};

/// What kind of emphasis is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmphasisKind {
    /// A plain error built from the appearance's error style
    Error,
    /// Caller-supplied style and color
    Custom,
}

/// Status overlay with an optional message and its own colors
#[derive(Clone, Debug, PartialEq)]
pub struct Emphasis {
    /// May be absent while still applying the emphasis colors
    pub message: Option<String>,
    pub style: Style,
    pub status_color: Color,
    pub kind: EmphasisKind,
}

impl Emphasis {
    /// Custom emphasis
    pub fn new(message: Option<String>, style: Style, status_color: Color) -> Self {
        Self {
            message,
            style,
            status_color,
            kind: EmphasisKind::Custom,
        }
    }

    /// Custom emphasis painting every element in `color`
    pub fn with_color(message: Option<String>, color: Color) -> Self {
        Self::new(message, Style::uniform(color), color)
    }

    /// Plain error styled by `styling`
    pub fn error(message: Option<String>, styling: &dyn Styling) -> Self {
        Self {
            message,
            style: styling.error_style(),
            status_color: styling.error_status_color(),
            kind: EmphasisKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == EmphasisKind::Error
    }
}

/// Visual state of a field
#[derive(Clone, Debug, PartialEq)]
pub enum FieldState {
    Inactive { enabled: bool },
    Active,
    Emphasized(Emphasis),
}

impl Default for FieldState {
    fn default() -> Self {
        FieldState::Inactive { enabled: true }
    }
}

/// Focus and enabled flags the state machine is evaluated against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusContext {
    pub focused: bool,
    pub enabled: bool,
}

impl FocusContext {
    pub fn new(focused: bool, enabled: bool) -> Self {
        Self { focused, enabled }
    }

    /// The non-emphasized state these flags imply
    pub fn fallback_state(&self) -> FieldState {
        if self.focused {
            FieldState::Active
        } else {
            FieldState::Inactive {
                enabled: self.enabled,
            }
        }
    }
}

/// Inputs to the state machine
#[derive(Clone, Debug, PartialEq)]
pub enum StateEvent {
    FocusGained,
    FocusLost,
    EnabledChanged(bool),
    Emphasize(Emphasis),
    ClearEmphasis,
}

impl FieldState {
    pub fn is_emphasized(&self) -> bool {
        matches!(self, FieldState::Emphasized(_))
    }

    pub fn emphasis(&self) -> Option<&Emphasis> {
        match self {
            FieldState::Emphasized(emphasis) => Some(emphasis),
            _ => None,
        }
    }

    /// Emphasis message, if any
    pub fn message(&self) -> Option<&str> {
        self.emphasis().and_then(|e| e.message.as_deref())
    }

    /// Compute the state after `event`
    ///
    /// `context` holds the flags *after* the event took effect. Returns
    /// `None` when the resulting state equals the current one.
    pub fn next(&self, event: &StateEvent, context: FocusContext) -> Option<FieldState> {
        let next = match event {
            StateEvent::Emphasize(emphasis) => FieldState::Emphasized(emphasis.clone()),
            StateEvent::ClearEmphasis if self.is_emphasized() => context.fallback_state(),
            StateEvent::ClearEmphasis => return None,
            _ if self.is_emphasized() => return None,
            StateEvent::FocusGained => FieldState::Active,
            StateEvent::FocusLost => FieldState::Inactive {
                enabled: context.enabled,
            },
            StateEvent::EnabledChanged(_) if context.focused => return None,
            StateEvent::EnabledChanged(enabled) => FieldState::Inactive { enabled: *enabled },
        };

        (next != *self).then_some(next)
    }
}

/// When the status label shows its text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusVisibility {
    /// Whenever there is text to show
    #[default]
    AlwaysVisible,
    /// Only while the placeholder is put away, or while emphasized
    WhileFloating,
    /// Only while emphasized
    OnlyWhenEmphasized,
}

impl StatusVisibility {
    /// Whether status text is shown
    ///
    /// `content_present` is true while the field is focused or holds text.
    pub fn shows(&self, content_present: bool, emphasized: bool) -> bool {
        match self {
            StatusVisibility::AlwaysVisible => true,
            StatusVisibility::WhileFloating => content_present || emphasized,
            StatusVisibility::OnlyWhenEmphasized => emphasized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfocused() -> FocusContext {
        FocusContext::new(false, true)
    }

    fn focused() -> FocusContext {
        FocusContext::new(true, true)
    }

    fn error(message: &str) -> Emphasis {
        Emphasis {
            message: Some(message.to_string()),
            style: Style::uniform(Color::RED),
            status_color: Color::RED,
            kind: EmphasisKind::Error,
        }
    }

    #[test]
    fn test_focus_round_trip() {
        let start = FieldState::Inactive { enabled: true };
        let active = start.next(&StateEvent::FocusGained, focused()).unwrap();
        assert_eq!(active, FieldState::Active);
        let back = active.next(&StateEvent::FocusLost, unfocused()).unwrap();
        assert_eq!(back, start);
    }

    #[test]
    fn test_emphasis_takes_precedence() {
        let emphasized = FieldState::Active
            .next(&StateEvent::Emphasize(error("X")), focused())
            .unwrap();
        assert_eq!(emphasized, FieldState::Emphasized(error("X")));

        assert_eq!(emphasized.next(&StateEvent::FocusLost, unfocused()), None);
        assert_eq!(
            emphasized.next(&StateEvent::EnabledChanged(false), FocusContext::new(false, false)),
            None
        );

        let cleared = emphasized
            .next(&StateEvent::ClearEmphasis, FocusContext::new(false, false))
            .unwrap();
        assert_eq!(cleared, FieldState::Inactive { enabled: false });
    }

    #[test]
    fn test_clear_falls_back_to_active_when_focused() {
        let emphasized = FieldState::Emphasized(error("X"));
        assert_eq!(
            emphasized.next(&StateEvent::ClearEmphasis, focused()),
            Some(FieldState::Active)
        );
    }

    #[test]
    fn test_redundant_transitions_are_none() {
        assert_eq!(FieldState::Active.next(&StateEvent::FocusGained, focused()), None);
        assert_eq!(
            FieldState::Active.next(&StateEvent::ClearEmphasis, focused()),
            None
        );
        let emphasized = FieldState::Emphasized(error("X"));
        assert_eq!(
            emphasized.next(&StateEvent::Emphasize(error("X")), focused()),
            None
        );
        assert!(emphasized
            .next(&StateEvent::Emphasize(error("Y")), focused())
            .is_some());
    }

    #[test]
    fn test_enabled_change_only_while_unfocused() {
        let inactive = FieldState::Inactive { enabled: true };
        assert_eq!(
            inactive.next(&StateEvent::EnabledChanged(false), FocusContext::new(false, false)),
            Some(FieldState::Inactive { enabled: false })
        );
        assert_eq!(
            FieldState::Active.next(&StateEvent::EnabledChanged(false), FocusContext::new(true, false)),
            None
        );
    }

    #[test]
    fn test_status_visibility() {
        assert!(StatusVisibility::AlwaysVisible.shows(false, false));
        assert!(!StatusVisibility::WhileFloating.shows(false, false));
        assert!(StatusVisibility::WhileFloating.shows(true, false));
        assert!(StatusVisibility::WhileFloating.shows(false, true));
        assert!(!StatusVisibility::OnlyWhenEmphasized.shows(true, false));
        assert!(StatusVisibility::OnlyWhenEmphasized.shows(false, true));
    }
}
