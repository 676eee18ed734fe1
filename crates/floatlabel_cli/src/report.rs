//! Plain-text rendering of field snapshots

use floatlabel_core::{Color, Rect, Size};
use floatlabel_widgets::{FieldSnapshot, FieldState};
use std::fmt::Write;

fn rect(r: &Rect) -> String {
    format!("({}, {}, {}x{})", r.x(), r.y(), r.width(), r.height())
}

fn size(s: &Size) -> String {
    format!("{}x{}", s.width, s.height)
}

fn color(c: &Color) -> String {
    c.to_hex_string()
}

pub fn state_name(state: &FieldState) -> String {
    match state {
        FieldState::Inactive { enabled: true } => "inactive".to_string(),
        FieldState::Inactive { enabled: false } => "disabled".to_string(),
        FieldState::Active => "active".to_string(),
        FieldState::Emphasized(emphasis) if emphasis.is_error() => "error".to_string(),
        FieldState::Emphasized(_) => "emphasized".to_string(),
    }
}

/// Multi-line description of everything a renderer would draw
pub fn describe(snapshot: &FieldSnapshot) -> String {
    let mut out = String::new();
    let placeholder = &snapshot.placeholder;
    let label = &placeholder.label;

    // Writing to a String cannot fail
    let _ = writeln!(out, "state:      {}", state_name(&snapshot.state));
    let _ = writeln!(out, "text:       {:?}", snapshot.text);
    let _ = writeln!(
        out,
        "label:      {:?} frame={} visual={} font={} color={}{}{}",
        label.text.as_deref().unwrap_or(""),
        rect(&label.frame),
        rect(&label.visual_frame()),
        label.font.size,
        color(&label.color),
        if placeholder.is_floating { " floating" } else { "" },
        if placeholder.is_animating { " animating" } else { "" },
    );
    let _ = writeln!(
        out,
        "underline:  frame={} color={}",
        rect(&placeholder.underline_frame),
        color(&placeholder.underline_color)
    );
    match &placeholder.status {
        Some(status) => {
            let _ = writeln!(
                out,
                "status:     {:?} frame={} font={} color={}",
                status.text,
                rect(&status.frame),
                status.font.size,
                color(&status.color)
            );
        }
        None => {
            let _ = writeln!(out, "status:     -");
        }
    }
    let _ = writeln!(
        out,
        "text rect:  {}{}",
        rect(&snapshot.text_rect),
        if snapshot.text_rect_frozen { " frozen" } else { "" }
    );
    if let Some(left) = &snapshot.left_accessory {
        let _ = writeln!(out, "left:       {}", rect(left));
    }
    if let Some(right) = &snapshot.right_accessory {
        let _ = writeln!(out, "right:      {}", rect(right));
    }
    let _ = write!(out, "intrinsic:  {}", size(&snapshot.intrinsic_size));
    out
}
