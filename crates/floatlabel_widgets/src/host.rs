//! Host integration
//!
//! The field never talks to a windowing system. Whatever embeds it (a
//! native widget wrapper, a test, the CLI) implements [`FieldHost`] to
//! grant focus and to react to intrinsic size changes.

use floatlabel_animation::Transition;
use floatlabel_core::Size;

/// Services the embedding environment provides to a field
pub trait FieldHost {
    /// Whether the field is on screen; animations only run when attached
    fn is_attached(&self) -> bool {
        true
    }

    /// Ask to make the field the focused input. Returns false if refused.
    fn request_focus(&mut self) -> bool {
        true
    }

    /// Ask to drop focus. Returns false if refused.
    fn release_focus(&mut self) -> bool {
        true
    }

    /// The field's intrinsic size changed
    fn invalidate_intrinsic_size(&mut self, _size: Size) {}

    /// Lay out ancestor containers, animated with `transition` when given
    fn layout_ancestors(&mut self, _transition: Option<Transition>) {}
}

/// A host for fields that are not on screen
///
/// Grants focus but reports itself detached, so every animated call takes
/// its synchronous path.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedHost;

impl FieldHost for DetachedHost {
    fn is_attached(&self) -> bool {
        false
    }
}
