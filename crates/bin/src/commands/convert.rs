//! Convert command - reads a configuration file and writes it in another format.

use std::io::Write;

use confmap::ConfigAdapter;
use confmap::facade::{read_tree, write_tree};
use tracing::info;

use super::resolve_format;
use crate::cli::ConvertArgs;

/// Run the convert command
pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let from = resolve_format(args.from, &args.input)?;
    let to = match (&args.output, args.to) {
        (_, Some(to)) => to.into(),
        (Some(output), None) => resolve_format(None, output)?,
        // Writing to stdout without --to keeps the input format
        (None, None) => from,
    };

    let root = read_tree(from.adapter().as_ref(), &args.input)?;
    info!(
        input = %args.input.display(),
        %from,
        %to,
        sections = root.len(),
        "Converting configuration"
    );

    match &args.output {
        Some(output) => write_tree(to.adapter().as_ref(), &root, output)?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            to.adapter().write(&root, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
