//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::prelude::*;

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SWI_DASHBOARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate
    #[arg(long, default_value = "0.1", env = "SWI_DASHBOARD_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Web(WebOpts),
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::", env = "SWI_DASHBOARD_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8080", env = "SWI_DASHBOARD_PORT")]
    pub port: u16,

    /// Path to the serialized regression model (`.json`, `.pkl` or `.pickle`)
    #[arg(short, long = "model", default_value = "model.json", env = "SWI_DASHBOARD_MODEL")]
    pub model_path: PathBuf,

    /// Load the model at startup and exit if it cannot be loaded
    #[arg(long, env = "SWI_DASHBOARD_PRELOAD")]
    pub preload: bool,

    /// Path to the optional problem sketch shown above the form
    #[arg(long = "image", default_value = "sketch.png", env = "SWI_DASHBOARD_IMAGE")]
    pub image_path: PathBuf,

    #[command(flatten)]
    pub presentation: PresentationOpts,

    /// Inactive sessions forget the entered values after this period
    #[arg(
        long,
        default_value = "1d",
        value_parser = humantime::parse_duration,
        env = "SWI_DASHBOARD_SESSION_TTL",
    )]
    pub session_ttl: StdDuration,
}

/// Cosmetic options of the parameter form.
#[derive(Args, Copy, Clone)]
pub struct PresentationOpts {
    /// Number of decimal digits in the input fields
    #[arg(long, default_value = "4", value_parser = parsers::precision, env = "SWI_DASHBOARD_PRECISION")]
    pub precision: usize,

    /// Arrangement of the input fields
    #[arg(long, value_enum, default_value = "two-column", env = "SWI_DASHBOARD_LAYOUT")]
    pub layout: Layout,

    /// Reset the form fields after each submission
    #[arg(long, env = "SWI_DASHBOARD_CLEAR_ON_SUBMIT")]
    pub clear_on_submit: bool,
}

impl Default for PresentationOpts {
    fn default() -> Self {
        Self {
            precision: 4,
            layout: Layout::TwoColumn,
            clear_on_submit: false,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    Single,
    TwoColumn,
}
