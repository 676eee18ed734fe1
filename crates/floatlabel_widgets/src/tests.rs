//! Text field scenarios
//!
//! Every field here uses `EstimatedTextMeasurer::new(0.5, 1.0)`: a character
//! is half the font size wide and a line is exactly the font size tall, so
//! expected frames are whole numbers.

use std::sync::Arc;
use std::time::Duration;

use floatlabel_animation::Transition;
use floatlabel_core::{Color, EstimatedTextMeasurer, FieldEvent, Font, Rect, Size};

use crate::error::FieldError;
use crate::prelude::*;
use crate::state::EmphasisKind;
use crate::text_field::status_resize_transition;

#[derive(Default)]
struct RecordingHost {
    detached: bool,
    refuse_focus: bool,
    invalidations: Vec<Size>,
    ancestor_layouts: Vec<Option<Transition>>,
}

impl FieldHost for RecordingHost {
    fn is_attached(&self) -> bool {
        !self.detached
    }

    fn request_focus(&mut self) -> bool {
        !self.refuse_focus
    }

    fn invalidate_intrinsic_size(&mut self, size: Size) {
        self.invalidations.push(size);
    }

    fn layout_ancestors(&mut self, transition: Option<Transition>) {
        self.ancestor_layouts.push(transition);
    }
}

fn appearance() -> StandardAppearance {
    StandardAppearance::new(
        Color::BLACK,
        Color::GRAY,
        Color::WHITE,
        Color::GRAY,
        Font::system(22.0),
        Font::system(18.0),
    )
    .with_status_font(Font::system(20.0))
}

/// top 8, floating 18, gap 4, input 22, gap 12, underline 1 = 65
fn geometry() -> PlaceholderGeometry {
    PlaceholderGeometry::new()
        .top_to_floating_label_offset(8.0)
        .floating_to_non_floating_offset(4.0)
        .non_floating_to_underline_offset(12.0)
        .underline_height(1.0)
        .underline_to_status_offset(8.0)
        .accessory_to_text_offset(8.0)
}

fn config() -> FieldConfig {
    FieldConfig::new().geometry(geometry()).appearance(appearance())
}

fn field_with(config: FieldConfig, width: f32) -> (TextField, RecordingHost) {
    let mut host = RecordingHost::default();
    let mut field = TextField::new(config, Arc::new(EstimatedTextMeasurer::new(0.5, 1.0))).unwrap();
    field.set_placeholder(Some("Company".into()));
    field.handle_event(
        FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, width, 65.0)),
        false,
        &mut host,
    );
    (field, host)
}

fn field() -> (TextField, RecordingHost) {
    field_with(config(), 300.0)
}

// =============================================================================
// Intrinsic size
// =============================================================================

#[test]
fn test_intrinsic_height_without_status() {
    let (field, host) = field();
    assert_eq!(field.intrinsic_size(), Size::new(300.0, 65.0));
    assert_eq!(host.invalidations.last(), Some(&Size::new(300.0, 65.0)));
}

#[test]
fn test_intrinsic_height_with_status() {
    let (mut field, mut host) = field();
    field.show_error(Some("Required".into()), false, &mut host);
    assert_eq!(field.status_text(), Some("Required"));
    assert_eq!(field.intrinsic_size().height, 93.0);
    assert_eq!(host.invalidations.last(), Some(&Size::new(300.0, 93.0)));

    field.hide_error(false, &mut host);
    assert_eq!(field.intrinsic_size().height, 65.0);
    assert_eq!(host.invalidations.last(), Some(&Size::new(300.0, 65.0)));
}

#[test]
fn test_status_frame_below_underline() {
    let (mut field, mut host) = field();
    field.show_error(Some("Required".into()), false, &mut host);
    let snapshot = field.snapshot();
    assert_eq!(snapshot.placeholder.underline_frame, Rect::new(0.0, 64.0, 300.0, 1.0));
    let status = snapshot.placeholder.status.unwrap();
    assert_eq!(status.frame, Rect::new(0.0, 73.0, 300.0, 20.0));
    assert_eq!(status.text, "Required");
}

#[test]
fn test_malformed_geometry_rejected() {
    let config = config().geometry(geometry().non_floating_to_underline_offset(-1.0));
    let result = TextField::new(config, Arc::new(EstimatedTextMeasurer::default()));
    assert!(matches!(
        result.err(),
        Some(FieldError::NegativeOffset {
            name: "non_floating_to_underline_offset",
            ..
        })
    ));
}

// =============================================================================
// Floating
// =============================================================================

#[test]
fn test_focus_floats_placeholder_with_animation() {
    let (mut field, mut host) = field();
    assert!(field.focus(true, &mut host));
    let snapshot = field.snapshot();
    assert!(snapshot.placeholder.is_floating);
    assert!(snapshot.placeholder.is_animating);

    field.tick(Duration::from_millis(400), &mut host);
    assert!(!field.is_animating());
    assert_eq!(
        field.snapshot().placeholder.label.frame,
        Rect::new(0.0, 8.0, 63.0, 18.0)
    );
}

#[test]
fn test_floating_transition_is_idempotent() {
    let (mut field, mut host) = field();
    field.focus(true, &mut host);
    let first = field.snapshot().placeholder;

    // Still floating: neither a repeated focus nor typing starts another animation
    field.handle_event(FieldEvent::FocusChanged(true), true, &mut host);
    field.handle_event(FieldEvent::TextChanged("Acme".into()), true, &mut host);
    assert_eq!(field.snapshot().placeholder, first);

    field.tick(Duration::from_millis(400), &mut host);
    let (mut reference, mut reference_host) = field_with(config(), 300.0);
    reference.focus(false, &mut reference_host);
    assert_eq!(
        field.snapshot().placeholder,
        reference.snapshot().placeholder
    );
}

#[test]
fn test_label_width_clamped_to_field() {
    let appearance = StandardAppearance::new(
        Color::BLACK,
        Color::GRAY,
        Color::GRAY,
        Color::GRAY,
        Font::system(20.0),
        Font::system(16.0),
    );
    let (mut field, _host) = field_with(config().appearance(appearance), 150.0);
    field.set_placeholder(Some("a".repeat(20)));

    assert_eq!(field.snapshot().placeholder.label.frame.width(), 150.0);
    assert_eq!(field.placeholder_view().label_reference_size().width, 200.0);
}

#[test]
fn test_disappear_hides_placeholder() {
    let (mut field, mut host) = field_with(
        config().behaviour(PlaceholderBehaviour::Disappear),
        300.0,
    );
    assert_eq!(field.placeholder_view().placeholder(), Some("Company"));

    field.focus(true, &mut host);
    assert_eq!(field.placeholder_view().placeholder(), None);
    assert!(!field.placeholder_view().is_floating());
    assert!(!field.is_animating());
    assert_eq!(field.placeholder(), Some("Company"));

    field.unfocus(true, &mut host);
    assert_eq!(field.placeholder_view().placeholder(), Some("Company"));

    field.set_text("Acme", &mut host);
    assert_eq!(field.placeholder_view().placeholder(), None);
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn test_focus_round_trip() {
    let (mut field, mut host) = field();
    assert_eq!(field.state(), &FieldState::Inactive { enabled: true });
    assert!(field.focus(false, &mut host));
    assert_eq!(field.state(), &FieldState::Active);
    assert!(field.unfocus(false, &mut host));
    assert_eq!(field.state(), &FieldState::Inactive { enabled: true });
    assert!(!field.snapshot().placeholder.is_floating);
}

#[test]
fn test_refused_focus_changes_nothing() {
    let (mut field, mut host) = field();
    host.refuse_focus = true;
    assert!(!field.focus(true, &mut host));
    assert!(!field.is_focused());
    assert_eq!(field.state(), &FieldState::Inactive { enabled: true });
    assert!(!field.placeholder_view().is_floating());
}

#[test]
fn test_error_takes_precedence_over_focus() {
    let (mut field, mut host) = field();
    field.focus(false, &mut host);
    field.show_error(Some("X".into()), false, &mut host);

    let emphasis = field.state().emphasis().unwrap();
    assert_eq!(emphasis.kind, EmphasisKind::Error);
    assert_eq!(field.inline_message(), Some("X"));

    field.unfocus(false, &mut host);
    assert!(field.state().is_emphasized());

    field.clear_emphasis(false, &mut host);
    assert_eq!(field.state(), &FieldState::Inactive { enabled: true });
    assert_eq!(field.inline_message(), None);
}

#[test]
fn test_clear_falls_back_to_current_flags() {
    let (mut field, mut host) = field();
    field.show_error(Some("X".into()), false, &mut host);
    field.handle_event(FieldEvent::EnabledChanged(false), false, &mut host);
    assert!(field.state().is_emphasized());

    field.clear_emphasis(false, &mut host);
    assert_eq!(field.state(), &FieldState::Inactive { enabled: false });
}

#[test]
fn test_enabled_change_restyles_label() {
    let (mut field, mut host) = field();
    field.handle_event(FieldEvent::EnabledChanged(false), false, &mut host);
    assert_eq!(field.state(), &FieldState::Inactive { enabled: false });
    assert_eq!(field.snapshot().placeholder.label.color, Color::WHITE);
}

#[test]
fn test_clear_on_type() {
    let (mut field, mut host) = field();
    field.show_error(Some("X".into()), false, &mut host);
    field.handle_event(FieldEvent::TextChanged("a".into()), false, &mut host);

    assert_eq!(field.state(), &FieldState::Inactive { enabled: true });
    assert_eq!(field.status_text(), None);
    assert!(field.placeholder_view().is_floating());
    assert_eq!(field.intrinsic_size().height, 65.0);
}

#[test]
fn test_typing_keeps_error_without_clear_on_type() {
    let (mut field, mut host) = field_with(config().clear_on_type(false), 300.0);
    field.show_error(Some("X".into()), false, &mut host);
    field.handle_event(FieldEvent::TextChanged("a".into()), false, &mut host);
    assert_eq!(field.inline_message(), Some("X"));
}

#[test]
fn test_hide_error_keeps_custom_emphasis() {
    let (mut field, mut host) = field();
    field.emphasize(Some("Saved".into()), Color::RED, false, &mut host);
    field.hide_error(false, &mut host);
    assert_eq!(field.inline_message(), Some("Saved"));

    field.show_error(Some("Taken".into()), false, &mut host);
    field.hide_error(false, &mut host);
    assert!(!field.state().is_emphasized());
}

#[test]
fn test_emphasis_without_message_only_recolors() {
    let (mut field, mut host) = field();
    field.show_error(None, false, &mut host);
    assert!(field.state().is_emphasized());
    assert_eq!(field.status_text(), None);
    assert_eq!(field.intrinsic_size().height, 65.0);
    assert_eq!(
        field.snapshot().placeholder.underline_color,
        appearance().error_color
    );
}

// =============================================================================
// Text rect
// =============================================================================

#[test]
fn test_text_rect_below_floating_row() {
    let (field, _host) = field();
    assert_eq!(field.text_rect(), Rect::new(0.0, 30.0, 300.0, 35.0));
    assert_eq!(field.editing_rect(), field.text_rect());
    assert_eq!(field.placeholder_rect(), field.text_rect());
}

#[test]
fn test_accessories_reserve_space() {
    let (mut field, mut host) = field();
    field.set_left_accessory(Some(Size::new(40.0, 20.0)), &mut host);
    let rect = field.text_rect();
    assert_eq!(rect.x(), 48.0);
    assert_eq!(rect.width(), 252.0);
    assert_eq!(field.left_accessory_rect(), Rect::new(0.0, 31.0, 40.0, 20.0));

    field.set_right_accessory(Some(Size::new(30.0, 20.0)), &mut host);
    let rect = field.text_rect();
    assert_eq!(rect.x(), 48.0);
    assert_eq!(rect.width(), 214.0);
    assert_eq!(field.right_accessory_rect(), Rect::new(270.0, 31.0, 30.0, 20.0));
}

#[test]
fn test_accessories_wider_than_bounds_collapse_text_rect() {
    // Not laid out yet: zero bounds
    let mut host = RecordingHost::default();
    let mut field = TextField::new(config(), Arc::new(EstimatedTextMeasurer::new(0.5, 1.0))).unwrap();
    field.set_placeholder(Some("Company".into()));
    field.set_left_accessory(Some(Size::new(40.0, 20.0)), &mut host);

    let rect = field.text_rect();
    assert_eq!(rect.x(), 48.0);
    assert_eq!(rect.width(), 0.0);
    assert_eq!(field.snapshot().placeholder.label.frame.width(), 0.0);
    assert_eq!(field.intrinsic_size().width, 0.0);

    // Narrower than both accessories and their gaps
    field.set_right_accessory(Some(Size::new(40.0, 20.0)), &mut host);
    field.handle_event(
        FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, 60.0, 65.0)),
        false,
        &mut host,
    );
    assert_eq!(field.text_rect().width(), 0.0);
    assert!(field.snapshot().placeholder.label.frame.width() >= 0.0);
    assert!(host.invalidations.iter().all(|size| size.width >= 0.0));
}

#[test]
fn test_text_rect_frozen_during_status_animation() {
    let (mut field, mut host) = field();
    let before = field.text_rect();

    field.show_error(Some("Required".into()), true, &mut host);
    assert!(field.is_text_rect_frozen());
    assert_eq!(host.ancestor_layouts, vec![Some(status_resize_transition())]);

    // The host grows the field while the resize animates
    field.handle_event(
        FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, 300.0, 93.0)),
        false,
        &mut host,
    );
    assert_eq!(field.text_rect(), before);

    field.tick(Duration::from_millis(250), &mut host);
    assert!(!field.is_text_rect_frozen());
    assert_eq!(field.text_rect(), Rect::new(0.0, 30.0, 300.0, 63.0));
}

#[test]
fn test_overlapping_status_animations_snap_first() {
    let (mut field, mut host) = field();
    field.show_error(Some("X".into()), true, &mut host);
    field.tick(Duration::from_millis(100), &mut host);
    field.handle_event(
        FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, 300.0, 93.0)),
        false,
        &mut host,
    );
    assert_eq!(field.text_rect().height(), 35.0);

    field.show_error(Some("Y".into()), true, &mut host);
    assert_eq!(host.ancestor_layouts.len(), 2);
    // Snapping released the first freeze; the second captured the new bounds
    assert!(field.is_text_rect_frozen());
    assert_eq!(field.text_rect().height(), 63.0);

    field.tick(Duration::from_millis(200), &mut host);
    assert!(field.is_text_rect_frozen());
    field.tick(Duration::from_millis(50), &mut host);
    assert!(!field.is_text_rect_frozen());
}

#[test]
fn test_equal_emphasis_is_noop() {
    let (mut field, mut host) = field();
    field.show_error(Some("X".into()), true, &mut host);
    field.tick(Duration::from_millis(250), &mut host);

    field.show_error(Some("X".into()), true, &mut host);
    assert_eq!(host.ancestor_layouts.len(), 1);
    assert!(!field.is_text_rect_frozen());
}

#[test]
fn test_detached_host_never_animates() {
    let (mut field, mut host) = field();
    host.detached = true;

    field.focus(true, &mut host);
    assert!(!field.is_animating());
    assert!(field.placeholder_view().is_floating());

    field.show_error(Some("X".into()), true, &mut host);
    assert!(!field.is_text_rect_frozen());
    assert!(host.ancestor_layouts.is_empty());
}

// =============================================================================
// Status visibility
// =============================================================================

#[test]
fn test_bottom_text_while_floating() {
    let (mut field, mut host) = field_with(
        config().status_visibility(StatusVisibility::WhileFloating),
        300.0,
    );
    field.set_bottom_text(Some("Helper".into()), false, &mut host);
    assert_eq!(field.status_text(), None);
    assert_eq!(field.intrinsic_size().height, 65.0);

    field.focus(false, &mut host);
    assert_eq!(field.status_text(), Some("Helper"));
    assert_eq!(field.intrinsic_size().height, 93.0);

    field.unfocus(false, &mut host);
    assert_eq!(field.status_text(), None);

    field.set_text("Acme", &mut host);
    assert_eq!(field.status_text(), Some("Helper"));
}

#[test]
fn test_bottom_text_reveal_animates_resize() {
    let (mut field, mut host) = field_with(
        config().status_visibility(StatusVisibility::WhileFloating),
        300.0,
    );
    field.set_bottom_text(Some("Helper".into()), false, &mut host);
    field.focus(true, &mut host);
    assert!(field.is_text_rect_frozen());
    assert_eq!(host.ancestor_layouts, vec![Some(status_resize_transition())]);
}

#[test]
fn test_status_only_when_emphasized() {
    let (mut field, mut host) = field_with(
        config().status_visibility(StatusVisibility::OnlyWhenEmphasized),
        300.0,
    );
    field.set_bottom_text(Some("Helper".into()), false, &mut host);
    field.focus(false, &mut host);
    assert_eq!(field.status_text(), None);

    field.emphasize(Some("Saved".into()), Color::RED, false, &mut host);
    assert_eq!(field.status_text(), Some("Saved"));
    let status = field.snapshot().placeholder.status.unwrap();
    assert_eq!(status.color, Color::RED);
}
