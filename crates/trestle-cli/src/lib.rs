//! Trestle CLI library
//!
//! This module contains the core CLI logic for the Trestle railroad diagram
//! tool: rendering one definition to SVG, and linting many.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, LintArgs, RenderArgs};

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use trestle::{DiagramBuilder, InputFormat, TrestleError, config::AppConfig};

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Linting finished and this many inputs failed.
    LintFailures(usize),
}

/// Run the Trestle CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrestleError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Definition errors while rendering
pub fn run(args: &Args) -> Result<Outcome, TrestleError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Render(render_args) => {
            render(render_args, app_config)?;
            Ok(Outcome::Success)
        }
        Command::Lint(lint_args) => {
            let stdout = io::stdout();
            let failures = lint(lint_args, app_config, args.verbose, &mut stdout.lock())?;
            if failures == 0 {
                Ok(Outcome::Success)
            } else {
                Ok(Outcome::LintFailures(failures))
            }
        }
    }
}

/// Render one definition to SVG.
///
/// # Errors
///
/// Returns `TrestleError` for I/O errors and definitions that do not decode.
pub fn render(args: &RenderArgs, mut app_config: AppConfig) -> Result<(), TrestleError> {
    info!(
        input_path = args.input.as_deref().unwrap_or("-"),
        output_path = args.output.as_deref().unwrap_or("-");
        "Processing definition"
    );

    if let Some(standalone) = args.standalone_override() {
        app_config.output_mut().set_standalone(standalone);
    }
    if let Some(debug) = args.debug_override() {
        app_config.style_mut().set_debug_annotations(debug);
    }

    let (source, format) = match &args.input {
        Some(path) => {
            let path = Path::new(path);
            let format = resolve_format(args.input_format, path);
            (fs::read_to_string(path)?, format)
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            (source, args.input_format.unwrap_or_default())
        }
    };

    let builder = DiagramBuilder::new(app_config);
    let svg = builder.render(&source, format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, svg)?;
            info!(output_file = path; "SVG exported successfully");
        }
        None => io::stdout().write_all(svg.as_bytes())?,
    }
    Ok(())
}

/// Check every input and report per input to `out`.
///
/// Failures are always reported as `name: message`; passing inputs are
/// reported as `name: OK` when `verbose` is set.
///
/// # Errors
///
/// Returns `TrestleError` only when inputs cannot be listed or `out` cannot
/// be written; unreadable or invalid inputs count as failures.
///
/// # Returns
///
/// The number of failed inputs.
pub fn lint(
    args: &LintArgs,
    app_config: AppConfig,
    verbose: bool,
    out: &mut impl Write,
) -> Result<usize, TrestleError> {
    let builder = DiagramBuilder::new(app_config);

    if args.paths.is_empty() {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        let format = args.input_format.unwrap_or_default();
        let passed = report(out, "<stdin>", builder.parse(&source, format), verbose)?;
        return Ok(usize::from(!passed));
    }

    let inputs = collect_inputs(&args.paths)?;
    info!(inputs = inputs.len(); "Linting definitions");

    let mut failures = 0;
    for path in &inputs {
        let name = path.display().to_string();
        let format = resolve_format(args.input_format, path);
        let result = fs::read_to_string(path)
            .map_err(TrestleError::from)
            .and_then(|source| builder.parse(&source, format));
        if !report(out, &name, result, verbose)? {
            failures += 1;
        }
    }

    debug!(inputs = inputs.len(), failures; "Lint finished");
    Ok(failures)
}

fn report<T>(
    out: &mut impl Write,
    name: &str,
    result: Result<T, TrestleError>,
    verbose: bool,
) -> Result<bool, TrestleError> {
    match result {
        Ok(_) => {
            if verbose {
                writeln!(out, "{name}: OK")?;
            }
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "{name}: {err}")?;
            Ok(false)
        }
    }
}

fn resolve_format(explicit: Option<InputFormat>, path: &Path) -> InputFormat {
    explicit
        .or_else(|| InputFormat::from_extension(path))
        .unwrap_or_default()
}

/// Expands directories into the definition files directly inside them.
fn collect_inputs(paths: &[String]) -> Result<Vec<PathBuf>, TrestleError> {
    let mut inputs = Vec::new();
    for path in paths.iter().map(PathBuf::from) {
        if !path.is_dir() {
            inputs.push(path);
            continue;
        }
        let mut found: Vec<PathBuf> = fs::read_dir(&path)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|entry| {
                entry.is_file()
                    && matches!(
                        InputFormat::from_extension(entry),
                        Some(InputFormat::Json | InputFormat::Yaml)
                    )
            })
            .collect();
        if found.is_empty() {
            warn!(path = path.display().to_string(); "No definitions found in directory");
        }
        found.sort();
        inputs.extend(found);
    }
    Ok(inputs)
}
