//! Inspect command - lists the sections and options of a configuration file.

use confmap::{Root, facade::read_tree};

use super::resolve_format;
use crate::cli::InspectArgs;
use crate::output::{OutputFormat, print_table};

/// Run the inspect command
pub fn run(args: &InspectArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let from = resolve_format(args.from, &args.input)?;
    let root = read_tree(from.adapter().as_ref(), &args.input)?;

    match format {
        OutputFormat::Human => {
            println!("File:      {}", args.input.display());
            println!("Format:    {from}");
            println!("Sections:  {}", root.len());
            println!("Options:   {}", root.option_count());
            println!();
            print_table(&["SECTION", "OPTION", "KIND", "VALUE"], &rows(&root));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "file": args.input.display().to_string(),
                "format": from.name(),
                "sections": root.sections(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// One row per option; sections without options get a single placeholder row.
fn rows(root: &Root) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(root.option_count());
    for section in root {
        let label = if section.name().is_empty() {
            "(default)".to_string()
        } else {
            section.name().to_string()
        };
        if section.is_empty() {
            rows.push(vec![label, "-".to_string(), "-".to_string(), String::new()]);
            continue;
        }
        for option in section {
            rows.push(vec![
                label.clone(),
                option.name().to_string(),
                option.value().kind().to_string(),
                option.value().to_string(),
            ]);
        }
    }
    rows
}
