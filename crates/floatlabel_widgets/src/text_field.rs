//! Floating placeholder text field
//!
//! [`TextField`] is the controller a platform adapter talks to. It owns a
//! [`PlaceholderView`], tracks focus, enabled flag and text, drives the
//! [`FieldState`] machine and reserves room in the text rect for the
//! floating label and accessory views.
//!
//! Text editing itself stays with the host widget: the adapter forwards
//! [`FieldEvent`]s and asks for [`TextField::text_rect`] to position the
//! native editor.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use floatlabel_core::{EstimatedTextMeasurer, FieldEvent, Rect};
//! use floatlabel_widgets::prelude::*;
//!
//! let mut host = DetachedHost;
//! let mut field = TextField::new(FieldConfig::default(), Arc::new(EstimatedTextMeasurer::default()))
//!     .unwrap();
//! field.set_placeholder(Some("Email".into()));
//! field.handle_event(FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, 320.0, 80.0)), false, &mut host);
//!
//! assert!(field.focus(false, &mut host));
//! assert_eq!(field.state(), &FieldState::Active);
//! assert!(field.snapshot().placeholder.is_floating);
//! ```

use std::sync::Arc;
use std::time::Duration;

use floatlabel_animation::{AnimationId, Animator, Transition};
use floatlabel_core::{Color, FieldEvent, Rect, Size, TextMeasurer};

use crate::error::Result;
use crate::geometry::PlaceholderGeometry;
use crate::host::FieldHost;
use crate::placeholder::{PlaceholderSnapshot, PlaceholderView};
use crate::state::{Emphasis, FieldState, FocusContext, StateEvent, StatusVisibility};
use crate::styling::{StandardAppearance, Styling};

/// Duration of the status label resize, in seconds
pub const STATUS_RESIZE_DURATION: f32 = 0.25;

/// Timing of status label show/hide/resize
pub fn status_resize_transition() -> Transition {
    Transition::ease_in_out(STATUS_RESIZE_DURATION)
}

/// What happens to the placeholder once the field is focused or filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderBehaviour {
    /// Shrink and move above the input row
    #[default]
    Float,
    /// Hide outright
    Disappear,
}

/// Construction parameters of a [`TextField`]
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub behaviour: PlaceholderBehaviour,
    pub geometry: PlaceholderGeometry,
    pub appearance: Arc<dyn Styling>,
    pub status_visibility: StatusVisibility,
    /// Clear emphasis whenever the text changes
    pub clear_on_type: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            behaviour: PlaceholderBehaviour::Float,
            geometry: PlaceholderGeometry::showcase(),
            appearance: Arc::new(StandardAppearance::showcase()),
            status_visibility: StatusVisibility::AlwaysVisible,
            clear_on_type: true,
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn behaviour(mut self, behaviour: PlaceholderBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn geometry(mut self, geometry: PlaceholderGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn appearance(mut self, appearance: impl Styling + 'static) -> Self {
        self.appearance = Arc::new(appearance);
        self
    }

    pub fn status_visibility(mut self, visibility: StatusVisibility) -> Self {
        self.status_visibility = visibility;
        self
    }

    pub fn clear_on_type(mut self, clear: bool) -> Self {
        self.clear_on_type = clear;
        self
    }
}

/// Render model of the whole field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    pub placeholder: PlaceholderSnapshot,
    pub state: FieldState,
    pub text: String,
    pub text_rect: Rect,
    pub text_rect_frozen: bool,
    pub left_accessory: Option<Rect>,
    pub right_accessory: Option<Rect>,
    pub intrinsic_size: Size,
}

/// Text field controller with a floating placeholder
pub struct TextField {
    behaviour: PlaceholderBehaviour,
    clear_on_type: bool,
    view: PlaceholderView,

    /// Placeholder as set by the caller; the view may display none of it
    placeholder: Option<String>,
    text: String,
    enabled: bool,
    focused: bool,
    bounds: Rect,
    left_accessory: Option<Size>,
    right_accessory: Option<Size>,

    frozen_text_rect: Option<Rect>,
    animator: Animator,
    status_animation: Option<AnimationId>,
    published_size: Size,
}

impl TextField {
    /// Create a field, rejecting malformed geometry
    pub fn new(config: FieldConfig, measurer: Arc<dyn TextMeasurer>) -> Result<Self> {
        config.geometry.validate()?;

        let view = PlaceholderView::new(
            config.geometry,
            config.appearance,
            measurer,
            config.status_visibility,
        );
        let published_size = view.intrinsic_size();
        tracing::debug!(
            "TextField: created ({:?}, {:?})",
            config.behaviour,
            config.status_visibility
        );

        Ok(Self {
            behaviour: config.behaviour,
            clear_on_type: config.clear_on_type,
            view,
            placeholder: None,
            text: String::new(),
            enabled: true,
            focused: false,
            bounds: Rect::ZERO,
            left_accessory: None,
            right_accessory: None,
            frozen_text_rect: None,
            animator: Animator::new(),
            status_animation: None,
            published_size,
        })
    }

    pub fn behaviour(&self) -> PlaceholderBehaviour {
        self.behaviour
    }

    pub fn placeholder_view(&self) -> &PlaceholderView {
        &self.view
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        if self.placeholder == placeholder {
            return;
        }
        self.placeholder = placeholder;
        self.update_placeholder_text();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text programmatically (never animated)
    pub fn set_text(&mut self, text: impl Into<String>, host: &mut dyn FieldHost) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.update_text_dependencies(false, host);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.apply_state_event(StateEvent::EnabledChanged(enabled));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn state(&self) -> &FieldState {
        self.view.state()
    }

    pub fn left_accessory(&self) -> Option<Size> {
        self.left_accessory
    }

    pub fn set_left_accessory(&mut self, size: Option<Size>, host: &mut dyn FieldHost) {
        if self.left_accessory == size {
            return;
        }
        self.left_accessory = size;
        self.layout_subviews(host);
    }

    pub fn right_accessory(&self) -> Option<Size> {
        self.right_accessory
    }

    pub fn set_right_accessory(&mut self, size: Option<Size>, host: &mut dyn FieldHost) {
        if self.right_accessory == size {
            return;
        }
        self.right_accessory = size;
        self.layout_subviews(host);
    }

    /// Helper text shown below the underline when nothing is emphasized
    pub fn bottom_text(&self) -> Option<&str> {
        self.view.bottom_text()
    }

    pub fn set_bottom_text(&mut self, text: Option<String>, animated: bool, host: &mut dyn FieldHost) {
        if self.view.bottom_text() == text.as_deref() {
            return;
        }
        self.change_status(animated, host, |view| {
            view.set_bottom_text(text);
        });
    }

    /// Text the status label currently shows
    pub fn status_text(&self) -> Option<&str> {
        self.view.status_text()
    }

    /// Message of the current emphasis
    pub fn inline_message(&self) -> Option<&str> {
        self.view.state().message()
    }

    // =========================================================================
    // Emphasis
    // =========================================================================

    /// Emphasize the field, overriding the focus-driven state
    pub fn set_emphasis(&mut self, emphasis: Emphasis, animated: bool, host: &mut dyn FieldHost) {
        self.transition_status(StateEvent::Emphasize(emphasis), animated, host);
    }

    /// Drop any emphasis; does nothing when none is applied
    pub fn clear_emphasis(&mut self, animated: bool, host: &mut dyn FieldHost) {
        self.transition_status(StateEvent::ClearEmphasis, animated, host);
    }

    /// Emphasize with every element painted in `color`
    pub fn emphasize(
        &mut self,
        message: Option<String>,
        color: Color,
        animated: bool,
        host: &mut dyn FieldHost,
    ) {
        self.set_emphasis(Emphasis::with_color(message, color), animated, host);
    }

    /// Emphasize with the appearance's error style
    pub fn show_error(&mut self, message: Option<String>, animated: bool, host: &mut dyn FieldHost) {
        let emphasis = Emphasis::error(message, self.view.styling().as_ref());
        self.set_emphasis(emphasis, animated, host);
    }

    /// Clear a plain error; custom emphasis is left alone
    pub fn hide_error(&mut self, animated: bool, host: &mut dyn FieldHost) {
        if self.view.state().emphasis().is_some_and(Emphasis::is_error) {
            self.clear_emphasis(animated, host);
        }
    }

    fn transition_status(&mut self, event: StateEvent, animated: bool, host: &mut dyn FieldHost) {
        let Some(next) = self.view.state().next(&event, self.focus_context()) else {
            return;
        };
        self.change_status(animated, host, |view| {
            view.set_state(next);
        });
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Ask the host for focus. Returns whether it was granted.
    pub fn focus(&mut self, animated: bool, host: &mut dyn FieldHost) -> bool {
        let granted = host.request_focus();
        self.layout_subviews(host);
        if granted {
            self.set_focused(true, animated, host);
        }
        granted
    }

    /// Ask the host to drop focus. Returns whether it did.
    pub fn unfocus(&mut self, animated: bool, host: &mut dyn FieldHost) -> bool {
        let released = host.release_focus();
        self.layout_subviews(host);
        if released {
            self.set_focused(false, animated, host);
        }
        released
    }

    fn set_focused(&mut self, focused: bool, animated: bool, host: &mut dyn FieldHost) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        tracing::debug!("TextField: focused={}", focused);

        let event = if focused {
            StateEvent::FocusGained
        } else {
            StateEvent::FocusLost
        };
        self.apply_state_event(event);
        self.update_placeholder_position(animated, host);
    }

    fn focus_context(&self) -> FocusContext {
        FocusContext::new(self.focused, self.enabled)
    }

    fn apply_state_event(&mut self, event: StateEvent) -> bool {
        match self.view.state().next(&event, self.focus_context()) {
            Some(state) => self.view.set_state(state),
            None => false,
        }
    }

    // =========================================================================
    // Platform adapter
    // =========================================================================

    /// Feed a lifecycle event from the host widget
    ///
    /// Focus events report a change that already happened natively, so the
    /// host is not asked for focus again.
    pub fn handle_event(&mut self, event: FieldEvent, animated: bool, host: &mut dyn FieldHost) {
        tracing::trace!("TextField: {} event", event.name());
        match event {
            FieldEvent::FocusChanged(focused) => {
                self.layout_subviews(host);
                self.set_focused(focused, animated, host);
            }
            FieldEvent::TextChanged(text) => {
                if self.text != text {
                    self.text = text;
                    self.update_text_dependencies(animated, host);
                }
            }
            FieldEvent::BoundsChanged(bounds) => {
                self.bounds = bounds;
                self.layout_subviews(host);
            }
            FieldEvent::EnabledChanged(enabled) => self.set_enabled(enabled),
        }
    }

    /// Advance running animations by `dt`
    pub fn tick(&mut self, dt: Duration, host: &mut dyn FieldHost) {
        self.view.tick(dt);
        let finished = self.animator.tick(dt);
        if let Some(id) = self.status_animation {
            if finished.contains(&id) {
                self.status_animation = None;
                self.finish_status_resize(host);
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.view.is_animating() || self.status_animation.is_some()
    }

    // =========================================================================
    // Placeholder position
    // =========================================================================

    fn should_put_away_placeholder(&self) -> bool {
        self.focused || !self.text.is_empty()
    }

    fn update_text_dependencies(&mut self, animated: bool, host: &mut dyn FieldHost) {
        self.update_placeholder_position(animated, host);
        if self.clear_on_type {
            self.clear_emphasis(animated, host);
        }
    }

    fn update_placeholder_position(&mut self, animated: bool, host: &mut dyn FieldHost) {
        let put_away = self.should_put_away_placeholder();

        // Status visibility may hinge on it, which resizes the field
        if self.view.status_text_with(put_away) != self.view.status_text() {
            self.change_status(animated, host, |view| {
                view.set_content_present(put_away);
            });
        } else {
            self.view.set_content_present(put_away);
        }

        match self.behaviour {
            PlaceholderBehaviour::Float => {
                let animated = animated && host.is_attached();
                self.view.set_floating(put_away, animated);
            }
            PlaceholderBehaviour::Disappear => self.update_placeholder_text(),
        }
    }

    fn update_placeholder_text(&mut self) {
        let shown = match self.behaviour {
            PlaceholderBehaviour::Float => self.placeholder.clone(),
            PlaceholderBehaviour::Disappear if self.should_put_away_placeholder() => None,
            PlaceholderBehaviour::Disappear => self.placeholder.clone(),
        };
        self.view.set_placeholder(shown);
    }

    // =========================================================================
    // Status resize
    // =========================================================================

    /// Run a change that may resize the status label
    ///
    /// The text rect is frozen for the duration of the resize so the native
    /// editor does not move while ancestors animate to the new size. A resize
    /// still in flight is snapped to its end first.
    fn change_status<F>(&mut self, animated: bool, host: &mut dyn FieldHost, change: F)
    where
        F: FnOnce(&mut PlaceholderView),
    {
        let animated = animated && host.is_attached();
        self.snap_status_animation(host);

        self.frozen_text_rect = Some(self.text_rect());
        change(&mut self.view);
        self.publish_intrinsic_size(host);

        if animated {
            let transition = status_resize_transition();
            host.layout_ancestors(Some(transition));
            self.status_animation = Some(self.animator.start(transition));
        } else {
            self.finish_status_resize(host);
        }
    }

    fn snap_status_animation(&mut self, host: &mut dyn FieldHost) {
        if let Some(id) = self.status_animation.take() {
            self.animator.cancel(id);
            tracing::debug!("TextField: snapped status resize");
            self.finish_status_resize(host);
        }
    }

    fn finish_status_resize(&mut self, host: &mut dyn FieldHost) {
        self.frozen_text_rect = None;
        self.layout_subviews(host);
    }

    pub fn is_text_rect_frozen(&self) -> bool {
        self.frozen_text_rect.is_some()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn layout_subviews(&mut self, host: &mut dyn FieldHost) {
        self.view.set_bounds(self.bounds.size);
        let width = self.text_rect().width();
        self.view.set_preferred_max_layout_width(Some(width));
        self.view.layout();
        self.publish_intrinsic_size(host);
    }

    fn publish_intrinsic_size(&mut self, host: &mut dyn FieldHost) {
        let size = self.view.intrinsic_size();
        if size != self.published_size {
            tracing::debug!(
                "TextField: intrinsic size {:?} -> {:?}",
                self.published_size,
                size
            );
            self.published_size = size;
            host.invalidate_intrinsic_size(size);
        }
    }

    pub fn intrinsic_size(&self) -> Size {
        self.view.intrinsic_size()
    }

    pub fn size_that_fits(&self, size: Size) -> Size {
        self.view.size_that_fits(size)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    // =========================================================================
    // Geometry queries
    // =========================================================================

    /// Rect of the editable text: the input row down to the bounds bottom,
    /// minus room for accessories. Returned verbatim while frozen.
    pub fn text_rect(&self) -> Rect {
        if let Some(frozen) = self.frozen_text_rect {
            return frozen;
        }

        let y = self.view.input_area_rect().y();
        let mut rect = Rect::new(
            0.0,
            y,
            self.bounds.width(),
            (self.bounds.height() - y).max(0.0),
        );
        let gap = self.view.geometry().accessory_to_text_offset;
        if let Some(left) = self.left_accessory {
            let shift = left.width + gap;
            rect.origin.x = shift;
            rect.size.width -= shift;
        }
        if let Some(right) = self.right_accessory {
            rect.size.width -= right.width + gap;
        }
        rect.size.width = rect.size.width.max(0.0);
        rect
    }

    pub fn placeholder_rect(&self) -> Rect {
        self.text_rect()
    }

    pub fn editing_rect(&self) -> Rect {
        self.text_rect()
    }

    pub fn left_accessory_rect(&self) -> Rect {
        self.view
            .left_accessory_rect(self.left_accessory.unwrap_or(Size::ZERO))
    }

    pub fn right_accessory_rect(&self) -> Rect {
        self.view
            .right_accessory_rect(self.right_accessory.unwrap_or(Size::ZERO))
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            placeholder: self.view.snapshot(),
            state: self.view.state().clone(),
            text: self.text.clone(),
            text_rect: self.text_rect(),
            text_rect_frozen: self.is_text_rect_frozen(),
            left_accessory: self.left_accessory.map(|_| self.left_accessory_rect()),
            right_accessory: self.right_accessory.map(|_| self.right_accessory_rect()),
            intrinsic_size: self.intrinsic_size(),
        }
    }
}
