//! Subcommand implementations.

use std::path::Path;

use confmap::Format;

use crate::cli::FormatArg;

pub mod convert;
pub mod inspect;

/// Picks the explicit format if given, else infers it from the file extension.
pub fn resolve_format(
    explicit: Option<FormatArg>,
    path: &Path,
) -> Result<Format, Box<dyn std::error::Error>> {
    match explicit {
        Some(arg) => Ok(arg.into()),
        None => Format::from_path(path).ok_or_else(|| {
            format!(
                "cannot infer the format of '{}'; pass --from or --to",
                path.display()
            )
            .into()
        }),
    }
}
