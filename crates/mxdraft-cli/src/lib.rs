//! CLI logic for the mxdraft diagram generator.
//!
//! Each subcommand builds one sample document and writes it next to the
//! working directory, unless `--output` says otherwise.

pub mod error_adapter;
pub mod samples;

mod args;
mod config;

pub use args::{Args, Command, DiagramArgs, NotesArgs};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use mxdraft::{
    Document, DocumentWriter, MxdraftError,
    figures::{self, PageLocator, PopplerLocator, PopplerRenderer, TextPageLocator},
};

/// Run the mxdraft CLI application
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns `MxdraftError` for:
/// - Configuration loading errors
/// - Document construction errors
/// - Validation errors in strict mode
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, MxdraftError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::State(diagram) => generate(
            app_config,
            diagram,
            samples::STATE_OUTPUT,
            samples::state::build,
        ),
        Command::Activity(diagram) => generate(
            app_config,
            diagram,
            samples::ACTIVITY_OUTPUT,
            samples::activity::build,
        ),
        Command::Notes(notes) => write_notes(notes),
    }
}

fn generate(
    app_config: mxdraft::config::AppConfig,
    args: &DiagramArgs,
    default_output: &str,
    build: fn(&mut Document) -> Result<(), MxdraftError>,
) -> Result<PathBuf, MxdraftError> {
    let output = args.output.as_deref().unwrap_or(default_output);
    info!(output_path = output, strict = args.strict; "Generating diagram");

    let app_config = if args.strict {
        app_config.with_strict(true)
    } else {
        app_config
    };
    let writer = DocumentWriter::new(app_config);

    let mut document = writer.new_document();
    build(&mut document)?;

    writer.save(&document, output)
}

fn write_notes(args: &NotesArgs) -> Result<PathBuf, MxdraftError> {
    let output = Path::new(args.output.as_deref().unwrap_or(samples::NOTES_OUTPUT));
    info!(output_path:? = output, pdf = args.pdf; "Generating notes");

    let locator: Box<dyn PageLocator> = match &args.pdf_text {
        Some(path) => Box::new(TextPageLocator::from_form_feed(&fs::read_to_string(path)?)),
        None => Box::new(PopplerLocator::new()),
    };

    let images = figures::collect_figures(
        Path::new(&args.pdf),
        &samples::notes::patterns(),
        locator.as_ref(),
        &PopplerRenderer::new(),
        Path::new(&args.figures_dir),
    );
    let markdown = samples::notes::template().render(&images);

    fs::write(output, markdown)?;
    info!(output_path:? = output; "Notes written");

    Ok(output.to_path_buf())
}
