//! Run configuration for one eztemplate invocation.
//! Normalizes the parsed command line: picks the output mode, decides which
//! trailing arguments are input files and which are name-value pairs, and
//! builds the argument groups.

use log::debug;

use crate::cli::Cli;
use crate::constants::GROUP_SEPARATOR;
use crate::engine::EngineRegistry;
use crate::error::{Error, Result};
use crate::groups::{build_groups, ArgumentGroup};
use crate::planner::OutputMode;
use crate::source::{InputSource, OutputTarget};

/// Everything needed to plan and process one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub engine: String,
    pub tolerant: bool,
    pub delete_empty: bool,
    pub mode: OutputMode,
    pub inputs: Vec<InputSource>,
    pub groups: Vec<ArgumentGroup>,
}

/// Picks the output mode from the declared outputs.
fn output_mode(outputs: Vec<OutputTarget>, vary: bool) -> Result<OutputMode> {
    if !vary {
        return Ok(if outputs.is_empty() {
            OutputMode::Constant(vec![OutputTarget::Standard])
        } else {
            OutputMode::Constant(outputs)
        });
    }

    match outputs.as_slice() {
        [OutputTarget::Path(template)] => {
            let template = template.to_string_lossy().into_owned();
            Ok(OutputMode::Variable(template))
        }
        [OutputTarget::Standard] => {
            let message = "--vary requires an output file template";
            Err(Error::ConfigError(message.to_string()))
        }
        _ => {
            let message = "need exactly one output file template";
            Err(Error::ConfigError(message.to_string()))
        }
    }
}

/// Splits trailing arguments into input files and leftover tokens.
///
/// With `--arg`/`--next` given, every trailing argument is an input file.
/// Otherwise the inputs run up to the first `--` or `NAME=VALUE` token, and
/// only a single input is taken unless `take_all` is set.
fn split_inputs(
    remainder: Vec<String>,
    has_pairs: bool,
    take_all: bool,
) -> (Vec<String>, Vec<String>) {
    if has_pairs {
        let mut files = remainder;
        if let Some(separator) = files.iter().position(|token| token == GROUP_SEPARATOR) {
            files.remove(separator);
        }
        return (files, Vec::new());
    }

    let leading_separator = remainder.first().is_some_and(|t| t == GROUP_SEPARATOR);
    let first = usize::from(leading_separator);
    let last = if take_all {
        remainder.len()
    } else {
        (first + 1).min(remainder.len())
    };
    let split = remainder[first..last]
        .iter()
        .position(|token| token == GROUP_SEPARATOR || token.contains('='))
        .map(|offset| first + offset)
        .unwrap_or(last);

    let mut rest = remainder;
    let leftover = rest.split_off(split);
    let files = rest.split_off(first);
    (files, leftover)
}

impl Config {
    /// Builds the run configuration from the command line.
    ///
    /// # Errors
    /// * `Error::UnknownEngine` if the engine is not in the registry
    /// * `Error::ConfigError` for an invalid output setup or leftover arguments
    pub fn from_cli(cli: Cli, registry: &EngineRegistry) -> Result<Self> {
        let Cli { args, outputs, inputs, pairs } = cli;

        if !registry.contains(&args.engine) {
            return Err(Error::UnknownEngine(args.engine));
        }

        let mode = output_mode(outputs, args.vary)?;

        let mut remainder = args.remainder;
        let inputs = if inputs.is_empty() {
            let (files, leftover) = split_inputs(remainder, !pairs.is_empty(), args.vary);
            remainder = leftover;
            if files.is_empty() {
                vec![InputSource::Standard]
            } else {
                files.iter().map(InputSource::from_arg).collect()
            }
        } else {
            inputs
        };

        let groups = if pairs.is_empty() {
            let groups = build_groups(remainder.as_slice(), None);
            remainder.clear();
            groups
        } else {
            build_groups(remainder.as_slice(), Some(pairs.as_slice()))
        };

        if !remainder.is_empty() {
            return Err(Error::ConfigError(format!(
                "extraneous arguments left over: {}",
                remainder.join(" ")
            )));
        }

        debug!(
            "{} input(s), {} argument group(s), {:?}",
            inputs.len(),
            groups.len(),
            mode
        );

        Ok(Self {
            engine: args.engine,
            tolerant: args.tolerant,
            delete_empty: args.delete_empty,
            mode,
            inputs,
            groups,
        })
    }
}
