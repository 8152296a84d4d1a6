//! Command-line argument definitions for the Trestle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between rendering one definition and
//! linting many; configuration and logging flags are shared.

use clap::{Parser, Subcommand};

use trestle::InputFormat;

/// Command-line arguments for the Trestle railroad diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Log at debug level, and report passing files when linting
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a definition to SVG
    Render(RenderArgs),
    /// Check that definitions decode into valid diagrams
    Lint(LintArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Definition file; read from standard input when omitted
    pub input: Option<String>,

    /// Path to the output SVG file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Definition format (json, yaml, javascript); inferred from the input
    /// extension, json otherwise
    #[arg(short = 'i', long = "input-type")]
    pub input_format: Option<InputFormat>,

    /// Embed the stylesheet and namespace declarations
    #[arg(long, overrides_with = "no_standalone")]
    pub standalone: bool,

    /// Write bare markup for embedding in a styled page
    #[arg(long, overrides_with = "standalone")]
    pub no_standalone: bool,

    /// Annotate every node with its measured extents
    #[arg(long, overrides_with = "no_debug")]
    pub debug: bool,

    #[arg(long, overrides_with = "debug", hide = true)]
    pub no_debug: bool,
}

impl RenderArgs {
    /// The `--standalone`/`--no-standalone` override, if either was given.
    pub fn standalone_override(&self) -> Option<bool> {
        flag(self.standalone, self.no_standalone)
    }

    /// The `--debug`/`--no-debug` override, if either was given.
    pub fn debug_override(&self) -> Option<bool> {
        flag(self.debug, self.no_debug)
    }
}

#[derive(clap::Args, Debug)]
pub struct LintArgs {
    /// Definition files, or directories searched for .json, .yaml and .yml
    /// files; standard input when omitted
    pub paths: Vec<String>,

    /// Definition format for every input; inferred per file otherwise
    #[arg(short = 'i', long = "input-type")]
    pub input_format: Option<InputFormat>,
}

fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
