//! Ferry CLI library
//!
//! This module contains the core CLI logic for the Ferry sequence diagram
//! exporter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{fs, io};

use log::info;

use ferry::{
    Exporter, FerryError, config::AppConfig, input::SequenceReader, model::SequenceDiagram,
};

/// Run the Ferry CLI application
///
/// Loads the diagram and the configuration, applies the command-line
/// overrides and exports the diagram.
///
/// # Errors
///
/// Returns `FerryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Diagram parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), FerryError> {
    info!(input_path = args.input; "Processing diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let source = fs::read_to_string(&args.input)?;
    let diagram = parse_diagram(&source)?;

    let reader = SequenceReader::new(&diagram);
    let mut exporter = Exporter::from_config(&app_config)?;

    if args.transcript {
        let mut stdout = io::stdout().lock();
        exporter.export_file(&reader, Some(&mut stdout))?;
    } else {
        exporter.export_file(&reader, None)?;
    }

    info!(input_path = args.input; "Diagram exported successfully");

    Ok(())
}

/// Parses a TOML sequence diagram.
///
/// # Errors
///
/// Returns [`FerryError::Parse`] with the location of the problem when the
/// document is not valid TOML, does not match the diagram layout, or
/// describes an inconsistent diagram.
pub fn parse_diagram(source: &str) -> Result<SequenceDiagram, FerryError> {
    toml::from_str(source)
        .map_err(|err| FerryError::new_parse_error(err.message(), err.span(), source))
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let output = config.output_mut();
    if let Some(directory) = &args.directory {
        output.set_directory(directory);
    }
    if let Some(name) = &args.name {
        output.set_name(name);
    }
    if args.overwrite {
        output.set_overwrite(true);
    }
}
