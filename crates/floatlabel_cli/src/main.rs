//! floatlabel CLI
//!
//! Validate field configurations, print headless layouts and replay
//! event scripts against a floating-placeholder text field.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floatlabel_core::{FieldEvent, Rect, Size};
use floatlabel_widgets::TextField;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod report;
mod script;

use config::{FloatlabelConfig, DEFAULT_CONFIG_FILE};
use script::{fit_height, ConsoleHost, Script, ScriptRunner};

#[derive(Parser)]
#[command(name = "floatlabel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Floating-placeholder text field layout tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a field configuration
    Check {
        /// Config file (defaults to ./floatlabel.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a config file with every default spelled out
    Init {
        /// Output path
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the resting layout of a field
    Layout {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Field width (overrides the config)
        #[arg(short, long)]
        width: Option<f32>,

        /// Placeholder text (overrides the config)
        #[arg(short, long)]
        placeholder: Option<String>,

        /// Field text
        #[arg(short, long)]
        text: Option<String>,

        /// Show an error with this message
        #[arg(short, long)]
        error: Option<String>,

        /// Lay out as focused
        #[arg(short, long)]
        focused: bool,

        /// Lay out as disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Replay an event script and print a snapshot after every step
    Simulate {
        /// Script file
        script: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { config } => cmd_check(config.as_deref()),

        Commands::Init { output, force } => cmd_init(&output, force),

        Commands::Layout {
            config,
            width,
            placeholder,
            text,
            error,
            focused,
            disabled,
        } => cmd_layout(
            config.as_deref(),
            LayoutOptions {
                width,
                placeholder,
                text,
                error,
                focused,
                disabled,
            },
        ),

        Commands::Simulate { script, config } => cmd_simulate(&script, config.as_deref()),
    }
}

fn cmd_check(path: Option<&Path>) -> Result<()> {
    let config = FloatlabelConfig::load(path)?;
    let field_config = config.field_config()?;
    let field = TextField::new(field_config, Arc::new(config.measurer()))
        .context("Invalid field configuration")?;

    let geometry = field.placeholder_view().geometry();
    info!("Configuration OK");
    info!("  behaviour:         {:?}", field.behaviour());
    info!(
        "  status visibility: {:?}",
        field.placeholder_view().status_visibility()
    );
    info!(
        "  line heights:      floating {:?}, input {:?}",
        geometry.floating_line_height, geometry.non_floating_line_height
    );
    info!(
        "  resting height:    {}",
        field.size_that_fits(Size::new(config.field.width, 0.0)).height
    );
    Ok(())
}

fn cmd_init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    let content = FloatlabelConfig::default().to_toml()?;
    fs::write(output, content).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

struct LayoutOptions {
    width: Option<f32>,
    placeholder: Option<String>,
    text: Option<String>,
    error: Option<String>,
    focused: bool,
    disabled: bool,
}

fn cmd_layout(path: Option<&Path>, options: LayoutOptions) -> Result<()> {
    let config = FloatlabelConfig::load(path)?;
    let mut field = TextField::new(config.field_config()?, Arc::new(config.measurer()))
        .context("Invalid field configuration")?;

    // Off screen: every change applies without animating
    let mut host = ConsoleHost::detached();

    let width = options.width.unwrap_or(config.field.width);
    if !width.is_finite() || width <= 0.0 {
        anyhow::bail!("Width must be a positive number, got {}", width);
    }

    field.set_placeholder(options.placeholder.or_else(|| config.field.placeholder.clone()));
    field.set_bottom_text(config.field.bottom_text.clone(), false, &mut host);
    field.handle_event(
        FieldEvent::BoundsChanged(Rect::new(0.0, 0.0, width, 0.0)),
        false,
        &mut host,
    );

    if let Some(text) = options.text {
        field.set_text(text, &mut host);
    }
    if options.disabled {
        field.set_enabled(false);
    }
    if options.focused && !field.focus(false, &mut host) {
        anyhow::bail!("Field refused focus");
    }
    if let Some(message) = options.error {
        field.show_error(Some(message), false, &mut host);
    }
    fit_height(&mut field, &mut host);

    println!("{}", report::describe(&field.snapshot()));
    Ok(())
}

fn cmd_simulate(script_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = FloatlabelConfig::load(config_path)?;
    let script = Script::load(script_path)?;

    info!(
        "Replaying {} ({} steps)",
        script_path.display(),
        script.steps.len()
    );

    let mut runner = ScriptRunner::new(&config, &script)?;
    let stdout = io::stdout();
    runner.run(&script.steps, &mut stdout.lock())?;
    Ok(())
}
