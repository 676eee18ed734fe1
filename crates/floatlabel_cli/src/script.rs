//! Event script replay
//!
//! A script is a TOML file with a list of steps fed to a headless field:
//!
//! ```toml
//! placeholder = "Email"
//!
//! [[step]]
//! action = "focus"
//! animated = true
//!
//! [[step]]
//! action = "tick"
//! ms = 400
//!
//! [[step]]
//! action = "error"
//! message = "Required"
//! ```
//!
//! After every step the field is resized to its intrinsic height, the way
//! a stack container would, and its snapshot is printed.

use crate::config::{parse_color, FloatlabelConfig};
use crate::report;
use anyhow::{Context, Result};
use floatlabel_animation::Transition;
use floatlabel_core::{FieldEvent, Rect, Size};
use floatlabel_widgets::{FieldHost, TextField};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Script {
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Overrides `[field] width` from the config
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Request focus through the host
    Focus {
        #[serde(default)]
        animated: bool,
    },
    /// Release focus through the host
    Blur {
        #[serde(default)]
        animated: bool,
    },
    /// Simulate the user editing the text
    Type {
        text: String,
        #[serde(default)]
        animated: bool,
    },
    /// Set the text programmatically
    SetText { text: String },
    Enable { enabled: bool },
    Placeholder { text: Option<String> },
    BottomText {
        text: Option<String>,
        #[serde(default)]
        animated: bool,
    },
    Error {
        message: Option<String>,
        #[serde(default)]
        animated: bool,
    },
    HideError {
        #[serde(default)]
        animated: bool,
    },
    Emphasize {
        message: Option<String>,
        color: String,
        #[serde(default)]
        animated: bool,
    },
    Clear {
        #[serde(default)]
        animated: bool,
    },
    LeftAccessory { width: f32, height: f32 },
    RightAccessory { width: f32, height: f32 },
    RemoveAccessories,
    Resize { width: f32 },
    Tick { ms: u64 },
    /// Tick until every animation has finished
    Settle {
        #[serde(default = "default_frame_ms")]
        frame_ms: u64,
    },
}

fn default_frame_ms() -> u64 {
    16
}

/// Upper bound on frames for `settle`
const MAX_SETTLE_FRAMES: u32 = 10_000;

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Focus { .. } => "focus",
            Step::Blur { .. } => "blur",
            Step::Type { .. } => "type",
            Step::SetText { .. } => "set-text",
            Step::Enable { .. } => "enable",
            Step::Placeholder { .. } => "placeholder",
            Step::BottomText { .. } => "bottom-text",
            Step::Error { .. } => "error",
            Step::HideError { .. } => "hide-error",
            Step::Emphasize { .. } => "emphasize",
            Step::Clear { .. } => "clear",
            Step::LeftAccessory { .. } => "left-accessory",
            Step::RightAccessory { .. } => "right-accessory",
            Step::RemoveAccessories => "remove-accessories",
            Step::Resize { .. } => "resize",
            Step::Tick { .. } => "tick",
            Step::Settle { .. } => "settle",
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Host
// =============================================================================

/// Host that logs every request and remembers the last published size
#[derive(Debug, Default)]
pub struct ConsoleHost {
    pub detached: bool,
    pub refuse_focus: bool,
    pub pending_size: Option<Size>,
    pub ancestor_layouts: u32,
}

impl ConsoleHost {
    pub fn attached() -> Self {
        Self::default()
    }

    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }
}

impl FieldHost for ConsoleHost {
    fn is_attached(&self) -> bool {
        !self.detached
    }

    fn request_focus(&mut self) -> bool {
        tracing::debug!("host: focus requested (granted: {})", !self.refuse_focus);
        !self.refuse_focus
    }

    fn invalidate_intrinsic_size(&mut self, size: Size) {
        tracing::info!("host: intrinsic size {}x{}", size.width, size.height);
        self.pending_size = Some(size);
    }

    fn layout_ancestors(&mut self, transition: Option<Transition>) {
        self.ancestor_layouts += 1;
        match transition {
            Some(transition) => tracing::info!(
                "host: animated ancestor layout over {:?}",
                transition.duration
            ),
            None => tracing::info!("host: ancestor layout"),
        }
    }
}

/// Resize the field to the height it last asked for
pub fn fit_height(field: &mut TextField, host: &mut ConsoleHost) {
    if let Some(size) = host.pending_size.take() {
        let bounds = field.bounds();
        if bounds.height() != size.height {
            let resized = Rect::new(bounds.x(), bounds.y(), bounds.width(), size.height);
            field.handle_event(FieldEvent::BoundsChanged(resized), false, host);
        }
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Replays a script, writing a snapshot after each step to `out`
pub struct ScriptRunner {
    field: TextField,
    host: ConsoleHost,
}

impl ScriptRunner {
    pub fn new(config: &FloatlabelConfig, script: &Script) -> Result<Self> {
        let field_config = config.field_config()?;
        let mut field = TextField::new(field_config, Arc::new(config.measurer()))
            .context("Invalid field configuration")?;
        let mut host = ConsoleHost::attached();

        let placeholder = script
            .placeholder
            .clone()
            .or_else(|| config.field.placeholder.clone());
        field.set_placeholder(placeholder);
        field.set_bottom_text(config.field.bottom_text.clone(), false, &mut host);

        let width = script.width.unwrap_or(config.field.width);
        let height = field.size_that_fits(Size::new(width, 0.0)).height;
        field.handle_event(
            FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, width, height)),
            false,
            &mut host,
        );
        fit_height(&mut field, &mut host);

        Ok(Self { field, host })
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn run(&mut self, steps: &[Step], out: &mut impl Write) -> Result<()> {
        writeln!(out, "== initial")?;
        writeln!(out, "{}", report::describe(&self.field.snapshot()))?;

        for (index, step) in steps.iter().enumerate() {
            tracing::debug!("step {}: {}", index + 1, step.name());
            self.apply(step)
                .with_context(|| format!("Step {} ({}) failed", index + 1, step.name()))?;
            fit_height(&mut self.field, &mut self.host);

            writeln!(out, "\n== step {}: {}", index + 1, step.name())?;
            writeln!(out, "{}", report::describe(&self.field.snapshot()))?;
        }
        Ok(())
    }

    pub fn apply(&mut self, step: &Step) -> Result<()> {
        let field = &mut self.field;
        let host = &mut self.host;

        match step {
            Step::Focus { animated } => {
                if !field.focus(*animated, host) {
                    tracing::warn!("focus was refused");
                }
            }
            Step::Blur { animated } => {
                if !field.unfocus(*animated, host) {
                    tracing::warn!("blur was refused");
                }
            }
            Step::Type { text, animated } => {
                field.handle_event(FieldEvent::TextChanged(text.clone()), *animated, host);
            }
            Step::SetText { text } => field.set_text(text.clone(), host),
            Step::Enable { enabled } => {
                field.handle_event(FieldEvent::EnabledChanged(*enabled), false, host);
            }
            Step::Placeholder { text } => field.set_placeholder(text.clone()),
            Step::BottomText { text, animated } => {
                field.set_bottom_text(text.clone(), *animated, host);
            }
            Step::Error { message, animated } => {
                field.show_error(message.clone(), *animated, host);
            }
            Step::HideError { animated } => field.hide_error(*animated, host),
            Step::Emphasize {
                message,
                color,
                animated,
            } => {
                let color = parse_color("color", color)?;
                field.emphasize(message.clone(), color, *animated, host);
            }
            Step::Clear { animated } => field.clear_emphasis(*animated, host),
            Step::LeftAccessory { width, height } => {
                field.set_left_accessory(Some(Size::new(*width, *height)), host);
            }
            Step::RightAccessory { width, height } => {
                field.set_right_accessory(Some(Size::new(*width, *height)), host);
            }
            Step::RemoveAccessories => {
                field.set_left_accessory(None, host);
                field.set_right_accessory(None, host);
            }
            Step::Resize { width } => {
                let bounds = field.bounds();
                let height = field.size_that_fits(Size::new(*width, 0.0)).height;
                let resized = Rect::new(bounds.x(), bounds.y(), *width, height);
                field.handle_event(FieldEvent::BoundsChanged(resized), false, host);
            }
            Step::Tick { ms } => field.tick(Duration::from_millis(*ms), host),
            Step::Settle { frame_ms } => {
                let frame = Duration::from_millis((*frame_ms).max(1));
                let mut frames = 0;
                while field.is_animating() {
                    if frames == MAX_SETTLE_FRAMES {
                        anyhow::bail!("animations did not settle after {} frames", frames);
                    }
                    field.tick(frame, host);
                    frames += 1;
                }
                tracing::debug!("settled after {} frames", frames);
            }
        }
        Ok(())
    }
}
