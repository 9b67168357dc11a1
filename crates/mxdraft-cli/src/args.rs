//! Command-line argument definitions for the mxdraft CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each subcommand generates one document; global arguments
//! control configuration file selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the mxdraft diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Document to generate
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Documents the CLI knows how to generate
#[derive(Subcommand, Debug)]
pub enum Command {
    /// ATM state machine with composite states
    State(DiagramArgs),

    /// ATM activity diagrams, one page per notation topic
    Activity(DiagramArgs),

    /// Markdown notes on the UML process, illustrated from a PDF
    Notes(NotesArgs),
}

/// Arguments shared by the diagram subcommands
#[derive(clap::Args, Debug)]
pub struct DiagramArgs {
    /// Path to the output draw.io file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Validate the document and refuse to write it on errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments of the notes subcommand
#[derive(clap::Args, Debug)]
pub struct NotesArgs {
    /// Path to the output markdown file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Source PDF the figures come from
    #[arg(long, default_value = "uml2-apprentissage-pratique-124-134.pdf")]
    pub pdf: String,

    /// Text extracted from the PDF, pages separated by form feeds
    #[arg(long)]
    pub pdf_text: Option<String>,

    /// Directory for rendered figure images
    #[arg(long, default_value = "figures")]
    pub figures_dir: String,
}
