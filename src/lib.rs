//! eztemplate makes substitutions in text files.
//! It reads one or more templates, fills in name-value pairs with a pluggable
//! template engine and writes the results to standard output or to files,
//! optionally naming every output file after its input.

/// Command-line interface module for the eztemplate application
pub mod cli;

/// Run configuration built from the command line
pub mod config;

/// Common constants
pub mod constants;

/// Template engines and the static engine registry
/// - string.Template: `$name` placeholders (default)
/// - format: `{name}` fields
/// - jinja: MiniJinja templates
pub mod engine;

/// Error types and handling for the eztemplate application
pub mod error;

/// Argument group building from `NAME=VALUE` tokens
pub mod groups;

/// Logger initialization
pub mod logger;

/// Name-value mappings handed to templates
pub mod mapping;

/// Path attributes of inputs and outputs
pub mod metadata;

/// Work item planning in constant and variable output mode
pub mod planner;

/// Rendering and committing work items
pub mod processor;

/// Input sources and output targets
pub mod source;

use config::Config;
use engine::EngineRegistry;
use error::Result;
use planner::plan;
use processor::Processor;

/// Plans and processes one invocation against the standard streams.
///
/// # Errors
/// * Any configuration, substitution or I/O error; outputs committed before
///   the failing work item are kept
pub fn run(config: &Config, registry: &EngineRegistry) -> Result<()> {
    let engine = registry.get(&config.engine)?;
    let work = plan(&config.mode, &config.inputs, &config.groups, engine)?;

    let mut processor = Processor::new(engine, config.tolerant, config.delete_empty);
    processor.run(work)
}
