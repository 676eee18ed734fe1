//! Placeholder view: layout and floating-label animation
//!
//! The view owns every frame of the composite field below the text itself:
//! the placeholder label, the underline and the status label. Frames are
//! pure functions of the geometry, the current fonts and the bounds.
//!
//! # Floating animation
//!
//! Fonts cannot be interpolated, so the label is never animated through
//! intermediate font sizes. Instead the new font and frame are committed
//! immediately, and a scale transform makes the label look like the old one:
//!
//! 1. Measure the unclamped label size in the old position.
//! 2. Flip the floating flag, switch font and color, commit the new frame.
//! 3. Measure the unclamped size under the new font; scale by old/new.
//! 4. Shift the center so the scaled label stays left-aligned and sits at
//!    the old row's vertical midpoint.
//! 5. Spring the transform back to identity and the center to the new
//!    frame's center.
//!
//! Layout passes leave the label alone while this runs.

use std::sync::Arc;
use std::time::Duration;

use floatlabel_animation::{Animator, AnimationId, Interpolate, Transition};
use floatlabel_core::{Affine2D, Color, Font, Point, Rect, Size, TextMeasurer};

use crate::geometry::PlaceholderGeometry;
use crate::state::{FieldState, StatusVisibility};
use crate::styling::Styling;

/// Duration of the floating transition, in seconds
pub const FLOATING_DURATION: f32 = 0.4;
/// Damping ratio of the floating spring
pub const FLOATING_DAMPING_RATIO: f32 = 0.9;
/// Initial velocity of the floating spring
pub const FLOATING_INITIAL_VELOCITY: f32 = 0.7;

/// Timing of the floating transition
pub fn floating_transition() -> Transition {
    Transition::spring(
        FLOATING_DURATION,
        FLOATING_DAMPING_RATIO,
        FLOATING_INITIAL_VELOCITY,
    )
}

/// How the placeholder label should be drawn right now
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPresentation {
    pub text: Option<String>,
    pub font: Font,
    pub color: Color,
    /// Committed layout frame
    pub frame: Rect,
    /// Transform applied around `center`
    pub transform: Affine2D,
    pub center: Point,
}

impl LabelPresentation {
    /// Frame the label visually occupies once the transform is applied
    pub fn visual_frame(&self) -> Rect {
        self.transform
            .apply_around_center(self.center, self.frame.size)
    }
}

/// How the status label should be drawn right now
#[derive(Clone, Debug, PartialEq)]
pub struct StatusPresentation {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub frame: Rect,
}

/// Render model of the placeholder view
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderSnapshot {
    pub label: LabelPresentation,
    pub underline_frame: Rect,
    pub underline_color: Color,
    /// `None` while no status text is shown
    pub status: Option<StatusPresentation>,
    pub is_floating: bool,
    pub is_animating: bool,
}

#[derive(Clone, Copy, Debug)]
struct FloatingAnimation {
    id: AnimationId,
    from_transform: Affine2D,
    from_center: Point,
    to_center: Point,
}

/// Layout engine for the placeholder label, underline and status label
pub struct PlaceholderView {
    geometry: PlaceholderGeometry,
    styling: Arc<dyn Styling>,
    measurer: Arc<dyn TextMeasurer>,
    status_visibility: StatusVisibility,

    placeholder: Option<String>,
    bottom_text: Option<String>,
    state: FieldState,
    floating: bool,
    content_present: bool,
    preferred_max_layout_width: Option<f32>,
    bounds: Size,

    label: LabelPresentation,
    underline_frame: Rect,
    status_frame: Rect,

    animator: Animator,
    floating_animation: Option<FloatingAnimation>,
}

impl PlaceholderView {
    /// Create a view
    ///
    /// Configured line heights below the natural line height of their font
    /// are raised to it.
    pub fn new(
        geometry: PlaceholderGeometry,
        styling: Arc<dyn Styling>,
        measurer: Arc<dyn TextMeasurer>,
        status_visibility: StatusVisibility,
    ) -> Self {
        let mut geometry = geometry;
        geometry.floating_line_height = raise_to_natural(
            "floating_line_height",
            geometry.floating_line_height,
            measurer.line_height(&styling.label_font(true)),
        );
        geometry.non_floating_line_height = raise_to_natural(
            "non_floating_line_height",
            geometry.non_floating_line_height,
            measurer.line_height(&styling.label_font(false)),
        );

        let state = FieldState::default();
        let label = LabelPresentation {
            text: None,
            font: styling.label_font(false),
            color: styling.label_color(&state, false),
            frame: Rect::ZERO,
            transform: Affine2D::IDENTITY,
            center: Point::ZERO,
        };

        let mut view = Self {
            geometry,
            styling,
            measurer,
            status_visibility,
            placeholder: None,
            bottom_text: None,
            state,
            floating: false,
            content_present: false,
            preferred_max_layout_width: None,
            bounds: Size::ZERO,
            label,
            underline_frame: Rect::ZERO,
            status_frame: Rect::ZERO,
            animator: Animator::new(),
            floating_animation: None,
        };
        view.layout();
        view
    }

    /// Effective geometry (line heights already raised to their fonts)
    pub fn geometry(&self) -> &PlaceholderGeometry {
        &self.geometry
    }

    pub fn styling(&self) -> &Arc<dyn Styling> {
        &self.styling
    }

    pub fn status_visibility(&self) -> StatusVisibility {
        self.status_visibility
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Displayed placeholder text
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        if self.placeholder == placeholder {
            return;
        }
        self.placeholder = placeholder;
        self.update_label();
        self.layout();
    }

    pub fn bottom_text(&self) -> Option<&str> {
        self.bottom_text.as_deref()
    }

    /// Returns true if the text changed
    pub fn set_bottom_text(&mut self, text: Option<String>) -> bool {
        if self.bottom_text == text {
            return false;
        }
        self.bottom_text = text;
        self.layout();
        true
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Apply a new visual state. Returns false for an equal state.
    pub fn set_state(&mut self, state: FieldState) -> bool {
        if self.state == state {
            return false;
        }
        tracing::debug!("PlaceholderView: state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.update_label();
        self.layout();
        true
    }

    /// Whether the field is focused or holds text (drives `WhileFloating`)
    pub fn set_content_present(&mut self, present: bool) -> bool {
        if self.content_present == present {
            return false;
        }
        self.content_present = present;
        self.layout();
        true
    }

    pub fn preferred_max_layout_width(&self) -> Option<f32> {
        self.preferred_max_layout_width
    }

    /// Width the committed label frame is clamped to
    pub fn set_preferred_max_layout_width(&mut self, width: Option<f32>) {
        let unchanged = match (self.preferred_max_layout_width, width) {
            (None, None) => true,
            (Some(old), Some(new)) => (old - new).abs() <= f32::EPSILON,
            _ => false,
        };
        if unchanged {
            return;
        }
        self.preferred_max_layout_width = width;
        self.layout();
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Size) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.layout();
    }

    /// Status text currently shown: the emphasis message, else the bottom text
    pub fn status_text(&self) -> Option<&str> {
        self.status_text_with(self.content_present)
    }

    /// Status text that would show with the given content-present flag
    pub(crate) fn status_text_with(&self, content_present: bool) -> Option<&str> {
        let text = self
            .state
            .message()
            .or(self.bottom_text.as_deref())
            .filter(|text| !text.is_empty())?;
        self.status_visibility
            .shows(content_present, self.state.is_emphasized())
            .then_some(text)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Height of the floating (`true`) or input (`false`) row
    pub fn row_height(&self, is_floating: bool) -> f32 {
        let configured = if is_floating {
            self.geometry.floating_line_height
        } else {
            self.geometry.non_floating_line_height
        };
        configured.unwrap_or_else(|| {
            self.measurer
                .line_height(&self.styling.label_font(is_floating))
                .ceil()
        })
    }

    /// Input row, full bounds width
    pub fn input_area_rect(&self) -> Rect {
        let y = self.geometry.top_to_floating_label_offset
            + self.row_height(true)
            + self.geometry.floating_to_non_floating_offset;
        Rect::new(0.0, y, self.bounds.width, self.row_height(false))
    }

    /// Left accessory of `size`, centered on the input row
    pub fn left_accessory_rect(&self, size: Size) -> Rect {
        Rect::new(0.0, self.accessory_min_y(size), size.width, size.height)
    }

    /// Right accessory of `size`, centered on the input row
    pub fn right_accessory_rect(&self, size: Size) -> Rect {
        Rect::new(
            self.bounds.width - size.width,
            self.accessory_min_y(size),
            size.width,
            size.height,
        )
    }

    fn accessory_min_y(&self, size: Size) -> f32 {
        let input = self.input_area_rect();
        input.y() + input.height() / 2.0 - size.height / 2.0
    }

    /// Unclamped label size in the current position, the animation reference
    pub fn label_reference_size(&self) -> Size {
        self.label_frame(true).size
    }

    fn label_frame(&self, ignore_max_layout_width: bool) -> Rect {
        let width = match &self.placeholder {
            Some(text) => {
                let font = self.styling.label_font(self.floating);
                let natural = self.measurer.measure(text, &font, None).width.ceil();
                match self.preferred_max_layout_width {
                    Some(max) if !ignore_max_layout_width => natural.min(max),
                    _ => natural,
                }
            }
            None => 0.0,
        };

        let y = if self.floating {
            self.geometry.top_to_floating_label_offset
        } else {
            self.input_area_rect().y()
        };
        Rect::new(0.0, y, width, self.row_height(self.floating))
    }

    fn compute_underline_frame(&self) -> Rect {
        let y = self.input_area_rect().max_y() + self.geometry.non_floating_to_underline_offset;
        Rect::new(0.0, y, self.bounds.width, self.geometry.underline_height)
    }

    fn compute_status_frame(&self) -> Rect {
        let y = self.compute_underline_frame().max_y() + self.geometry.underline_to_status_offset;
        let size = self.status_size(self.bounds.width);
        Rect::new(0.0, y, size.width, size.height)
    }

    /// Status label size at `bounding_width`, zero while nothing is shown
    fn status_size(&self, bounding_width: f32) -> Size {
        let Some(text) = self.status_text() else {
            return Size::ZERO;
        };

        let font = self.styling.status_font();
        let max_width = (bounding_width.is_finite() && bounding_width > 0.0).then_some(bounding_width);
        let measured = self.measurer.measure(text, &font, max_width);

        let natural = self.measurer.line_height(&font);
        let height = match self.geometry.floating_line_height {
            // Snap to whole lines, never shorter than a line of the status font
            Some(line_height) if natural > 0.0 => {
                let line_height = line_height.max(natural.ceil());
                ((measured.height / natural).round() * line_height).ceil()
            }
            _ => measured.height.ceil(),
        };

        let width = max_width.unwrap_or_else(|| measured.width.ceil());
        Size::new(width, height)
    }

    /// Size of the whole stack at `size.width`
    pub fn size_that_fits(&self, size: Size) -> Size {
        let geometry = &self.geometry;
        let mut height = geometry.top_to_floating_label_offset
            + self.row_height(true)
            + geometry.floating_to_non_floating_offset
            + self.row_height(false)
            + geometry.non_floating_to_underline_offset
            + geometry.underline_height;
        if self.status_text().is_some() {
            height += geometry.underline_to_status_offset + self.status_size(size.width).height;
        }
        Size::new(size.width, height)
    }

    /// Size at the preferred layout width (the bounds width when unset)
    pub fn intrinsic_size(&self) -> Size {
        let width = self
            .preferred_max_layout_width
            .unwrap_or(self.bounds.width);
        self.size_that_fits(Size::new(width, f32::INFINITY))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Recompute every frame. The label is skipped while it animates.
    pub fn layout(&mut self) {
        if self.floating_animation.is_none() {
            let frame = self.label_frame(false);
            self.label.frame = frame;
            self.label.center = frame.center();
            self.label.transform = Affine2D::IDENTITY;
        }
        self.layout_decorations();
    }

    fn layout_decorations(&mut self) {
        self.underline_frame = self.compute_underline_frame();
        self.status_frame = self.compute_status_frame();
        tracing::trace!(
            "PlaceholderView: layout label={:?} underline={:?} status={:?}",
            self.label.frame,
            self.underline_frame,
            self.status_frame
        );
    }

    fn update_label(&mut self) {
        self.label.font = self.styling.label_font(self.floating);
        self.label.color = self.styling.label_color(&self.state, self.floating);
        self.label.text = self.placeholder.clone();
    }

    // =========================================================================
    // Floating
    // =========================================================================

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn is_animating(&self) -> bool {
        self.floating_animation.is_some()
    }

    /// Move the placeholder to the floating or resting position
    ///
    /// Setting the current value does nothing. A transition still in flight
    /// is snapped to its end before the new one starts.
    pub fn set_floating(&mut self, floating: bool, animated: bool) {
        if self.floating == floating {
            return;
        }
        self.snap_floating_animation();

        let old_size = self.label_frame(true).size;
        let old_frame = self.label.frame;

        self.floating = floating;
        self.update_label();

        if !animated {
            self.layout();
            tracing::debug!("PlaceholderView: floating={} (unanimated)", floating);
            return;
        }

        let new_frame = self.label_frame(false);
        self.label.frame = new_frame;
        let new_size = self.label_frame(true).size;

        let x_scale = scale_factor(old_size.width, new_size.width);
        let y_scale = scale_factor(old_size.height, new_size.height);
        let transform = Affine2D::scale(x_scale, y_scale);
        // Scaling is center-anchored; shift right so the left edge stays put
        let center = Point::new(
            new_frame.mid_x() + new_frame.width() * (x_scale - 1.0) / 2.0,
            old_frame.mid_y(),
        );
        self.label.transform = transform;
        self.label.center = center;

        let id = self.animator.start(floating_transition());
        self.floating_animation = Some(FloatingAnimation {
            id,
            from_transform: transform,
            from_center: center,
            to_center: new_frame.center(),
        });
        self.layout_decorations();
        tracing::debug!(
            "PlaceholderView: floating={} animating scale=({}, {})",
            floating,
            x_scale,
            y_scale
        );
    }

    fn snap_floating_animation(&mut self) {
        if let Some(animation) = self.floating_animation.take() {
            self.animator.cancel(animation.id);
            tracing::debug!("PlaceholderView: snapped floating animation");
            self.layout();
        }
    }

    /// Advance the floating animation. Returns true when it completed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let finished = self.animator.tick(dt);
        match self.floating_animation {
            Some(animation) if finished.contains(&animation.id) => {
                self.floating_animation = None;
                self.layout();
                tracing::debug!("PlaceholderView: floating animation finished");
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Label as it should be drawn at the current animation progress
    pub fn label(&self) -> LabelPresentation {
        let mut label = self.label.clone();
        if let Some(animation) = &self.floating_animation {
            if let Some(progress) = self.animator.progress(animation.id) {
                label.transform = animation
                    .from_transform
                    .lerp(&Affine2D::IDENTITY, progress);
                label.center = animation.from_center.lerp(&animation.to_center, progress);
            }
        }
        label
    }

    pub fn underline_frame(&self) -> Rect {
        self.underline_frame
    }

    pub fn status_frame(&self) -> Rect {
        self.status_frame
    }

    pub fn snapshot(&self) -> PlaceholderSnapshot {
        let status = self.status_text().map(|text| StatusPresentation {
            text: text.to_string(),
            font: self.styling.status_font(),
            color: self.styling.status_color(&self.state),
            frame: self.status_frame,
        });
        PlaceholderSnapshot {
            label: self.label(),
            underline_frame: self.underline_frame,
            underline_color: self.styling.underline_color(&self.state),
            status,
            is_floating: self.floating,
            is_animating: self.is_animating(),
        }
    }
}

fn scale_factor(old: f32, new: f32) -> f32 {
    if old > 0.0 && new > 0.0 {
        old / new
    } else {
        1.0
    }
}

fn raise_to_natural(name: &str, configured: Option<f32>, natural: f32) -> Option<f32> {
    configured.map(|value| {
        let natural = natural.ceil();
        if value < natural {
            tracing::warn!(
                "{} {} is below the font's natural line height, using {}",
                name,
                value,
                natural
            );
            natural
        } else {
            value
        }
    })
}
