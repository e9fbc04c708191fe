//! Command-line interface implementation for eztemplate.
//! Provides argument parsing using clap and recovers the relative order of
//! repeatable options, which matters for outputs, inputs and argument groups.

use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

use crate::constants::{DEFAULT_ENGINE, GROUP_SEPARATOR, STDIO_MARKER};
use crate::source::{InputSource, OutputTarget};

/// Command-line arguments structure for eztemplate.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Make substitutions in text files.",
    long_about = None
)]
pub struct Args {
    /// Templating engine ("help" lists the available engines)
    #[arg(
        short,
        long,
        value_name = "ENGINE",
        default_value = DEFAULT_ENGINE,
        help_heading = "Engine"
    )]
    pub engine: String,

    /// Don't fail on missing names
    #[arg(short, long, help_heading = "Engine")]
    pub tolerant: bool,

    /// Use standard output
    #[arg(
        short = 's',
        long = "stdout",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = STDIO_MARKER,
        action = ArgAction::Append,
        help_heading = "Output"
    )]
    pub stdout: Vec<String>,

    /// Output file
    #[arg(
        short,
        long,
        value_name = "FILE",
        action = ArgAction::Append,
        help_heading = "Output"
    )]
    pub outfile: Vec<String>,

    /// Vary output file name according to template
    #[arg(long, help_heading = "Output")]
    pub vary: bool,

    /// Delete file if output is empty
    #[arg(short, long, help_heading = "Output")]
    pub delete_empty: bool,

    /// Use standard input
    #[arg(
        long = "stdin",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = STDIO_MARKER,
        action = ArgAction::Append,
        help_heading = "Input"
    )]
    pub stdin: Vec<String>,

    /// Any number of input files
    #[arg(
        short,
        long,
        value_name = "FILE",
        action = ArgAction::Append,
        help_heading = "Input"
    )]
    pub infile: Vec<String>,

    /// Any number of name-value pairs
    #[arg(
        short,
        long,
        value_name = "NAME=VALUE",
        action = ArgAction::Append,
        help_heading = "Name-value pairs"
    )]
    pub arg: Vec<String>,

    /// Begin next argument group
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = GROUP_SEPARATOR,
        action = ArgAction::Append,
        help_heading = "Name-value pairs"
    )]
    pub next: Vec<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Possible input files and name-value pair groups if not already
    /// specified through options
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub remainder: Vec<String>,
}

/// Parsed command line with repeatable options put back in command-line order.
#[derive(Debug)]
pub struct Cli {
    pub args: Args,
    /// `--stdout` and `--outfile` occurrences
    pub outputs: Vec<OutputTarget>,
    /// `--stdin` and `--infile` occurrences
    pub inputs: Vec<InputSource>,
    /// `--arg` values with a separator for every `--next`
    pub pairs: Vec<String>,
}

/// Values of several options merged by their position on the command line.
fn ordered_values<'m>(
    matches: &'m ArgMatches,
    ids: &[&'static str],
) -> Vec<(&'static str, &'m String)> {
    let mut values = Vec::new();
    for id in ids {
        let indices = matches.indices_of(id);
        let raw = matches.get_many::<String>(id);
        if let (Some(indices), Some(raw)) = (indices, raw) {
            values.extend(indices.zip(raw).map(|(index, value)| (index, *id, value)));
        }
    }
    values.sort_by_key(|(index, _, _)| *index);
    values.into_iter().map(|(_, id, value)| (id, value)).collect()
}

impl Cli {
    /// Builds a Cli from clap matches.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let args = Args::from_arg_matches(matches)?;

        let outputs = ordered_values(matches, &["stdout", "outfile"])
            .into_iter()
            .map(|(id, value)| match id {
                "stdout" => OutputTarget::Standard,
                _ => OutputTarget::from_arg(value),
            })
            .collect();

        let inputs = ordered_values(matches, &["stdin", "infile"])
            .into_iter()
            .map(|(id, value)| match id {
                "stdin" => InputSource::Standard,
                _ => InputSource::from_arg(value),
            })
            .collect();

        let pairs = ordered_values(matches, &["arg", "next"])
            .into_iter()
            .map(|(id, value)| match id {
                "next" => GROUP_SEPARATOR.to_string(),
                _ => value.clone(),
            })
            .collect();

        Ok(Self { args, outputs, inputs, pairs })
    }

    /// Parses the given command line.
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Args::command().try_get_matches_from(itr)?;
        Self::from_matches(&matches)
    }
}

/// Parses the process' command line.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Cli {
    match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    }
}
