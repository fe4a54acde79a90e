//! CLI argument definitions for the confmap binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// INI: `[section]` headers and `key = value` lines
    Ini,
    /// JSON: an object of sections, each an object of options
    Json,
}

impl From<FormatArg> for confmap::Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ini => confmap::Format::Ini,
            FormatArg::Json => confmap::Format::Json,
        }
    }
}

/// Convert and inspect sectioned configuration files
#[derive(Parser, Debug)]
#[command(name = "confmap")]
#[command(about = "confmap: convert and inspect sectioned configuration files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a configuration file in one format and write it in another
    Convert(ConvertArgs),
    /// List the sections and options of a configuration file
    Inspect(InspectArgs),
}

/// Arguments for the convert command
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// File to read
    pub input: PathBuf,

    /// Input format (inferred from the input extension when omitted)
    #[arg(long, env = "CONFMAP_FORMAT")]
    pub from: Option<FormatArg>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(long)]
    pub to: Option<FormatArg>,

    /// File to write (standard output when omitted)
    #[arg(short, long, env = "CONFMAP_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// File to read
    pub input: PathBuf,

    /// Input format (inferred from the input extension when omitted)
    #[arg(long, env = "CONFMAP_FORMAT")]
    pub from: Option<FormatArg>,

    /// Print machine-readable JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
