//! Output materialization.
//! Consumes work items, compiles every input template once, renders it with
//! the argument group plus the output path variables and commits the result.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::constants::STDIO_MARKER;
use crate::engine::{Engine, Template};
use crate::error::{Error, Result};
use crate::groups::to_mapping;
use crate::metadata::{absolute_path, PathMetadata};
use crate::planner::WorkItem;
use crate::source::{InputSource, OutputTarget};

/// What happened to one work item's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Result went to standard output
    Printed,
    /// Result replaced the file's content
    Written(PathBuf),
    /// Result was empty and the file was removed
    Deleted(PathBuf),
    /// Nothing to print, or nothing to delete
    Skipped,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Printed => write!(f, "printed to standard output"),
            Outcome::Written(path) => write!(f, "written: '{}'", path.display()),
            Outcome::Deleted(path) => write!(f, "deleted: '{}'", path.display()),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Renders and commits work items.
///
/// Owns the compiled-template cache, the output metadata cache and the set
/// of files already written during this invocation.
pub struct Processor<'a> {
    engine: &'a dyn Engine,
    tolerant: bool,
    delete_empty: bool,
    stdin: Box<dyn Read + 'a>,
    stdout: Box<dyn Write + 'a>,
    templates: HashMap<InputSource, Box<dyn Template>>,
    metadata: HashMap<OutputTarget, PathMetadata>,
    written: HashSet<PathBuf>,
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| Error::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }
    fs::write(path, content).map_err(write_error)
}

/// Removes a file, returning whether it existed.
fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::RemoveError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads and compiles the template of one input source.
fn load_template(
    engine: &dyn Engine,
    tolerant: bool,
    stdin: &mut dyn Read,
    input: &InputSource,
) -> Result<Box<dyn Template>> {
    let (text, base_dir) = match input {
        InputSource::Standard => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .map_err(|source| Error::ReadError {
                    path: PathBuf::from(STDIO_MARKER),
                    source,
                })?;
            (buffer, None)
        }
        InputSource::Path(path) => (read_file(path)?, path.parent()),
    };

    let template = engine.compile(&text, tolerant, base_dir)?;
    debug!(
        "Compiled template from {} with engine '{}'",
        input,
        engine.name()
    );
    Ok(template)
}

impl<'a> Processor<'a> {
    /// Creates a processor bound to the process' standard streams.
    pub fn new(engine: &'a dyn Engine, tolerant: bool, delete_empty: bool) -> Self {
        Self::with_streams(
            engine,
            tolerant,
            delete_empty,
            Box::new(io::stdin()),
            Box::new(io::stdout()),
        )
    }

    /// Creates a processor reading and writing the given streams in place of
    /// standard input and output.
    pub fn with_streams(
        engine: &'a dyn Engine,
        tolerant: bool,
        delete_empty: bool,
        stdin: Box<dyn Read + 'a>,
        stdout: Box<dyn Write + 'a>,
    ) -> Self {
        Self {
            engine,
            tolerant,
            delete_empty,
            stdin,
            stdout,
            templates: HashMap::new(),
            metadata: HashMap::new(),
            written: HashSet::new(),
        }
    }

    /// Number of compiled templates held in the cache.
    pub fn cached_templates(&self) -> usize {
        self.templates.len()
    }

    /// Processes a single work item.
    ///
    /// # Arguments
    /// * `item` - Output, input and argument group to combine
    ///
    /// # Returns
    /// * `Result<Outcome>` - What was done with the rendered result
    ///
    /// # Errors
    /// * `Error::ReadError` if the input cannot be read
    /// * `Error::MissingName` if a name is missing and tolerant mode is off
    /// * `Error::DuplicateOutput` if the output file was already committed
    /// * `Error::WriteError`/`Error::RemoveError` on output failures
    pub fn process(&mut self, item: &WorkItem<'_>) -> Result<Outcome> {
        let template = match self.templates.entry(item.input.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(load_template(
                self.engine,
                self.tolerant,
                &mut self.stdin,
                item.input,
            )?),
        };

        let metadata = self
            .metadata
            .entry(item.output.clone())
            .or_insert_with(|| PathMetadata::resolve(item.output.path()));

        let mut mapping = to_mapping(item.group);
        mapping.extend(metadata.output_variables());

        let result = template.apply(&mapping)?;
        self.commit(&item.output, &result)
    }

    fn commit(&mut self, output: &OutputTarget, result: &str) -> Result<Outcome> {
        match output {
            OutputTarget::Standard => {
                if result.is_empty() {
                    return Ok(Outcome::Skipped);
                }
                self.stdout.write_all(result.as_bytes())?;
                self.stdout.flush()?;
                Ok(Outcome::Printed)
            }
            OutputTarget::Path(path) => {
                self.claim(path)?;
                if result.is_empty() && self.delete_empty {
                    if remove_file(path)? {
                        Ok(Outcome::Deleted(path.clone()))
                    } else {
                        Ok(Outcome::Skipped)
                    }
                } else {
                    write_file(path, result)?;
                    Ok(Outcome::Written(path.clone()))
                }
            }
        }
    }

    /// Records a file as committed, deleted or not, for the rest of the run.
    fn claim(&mut self, path: &Path) -> Result<()> {
        let key = absolute_path(path).unwrap_or_else(|| path.to_path_buf());
        if !self.written.insert(key) {
            return Err(Error::DuplicateOutput {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Pulls work items from a plan one at a time and processes them.
    ///
    /// Stops at the first error; outputs committed before it stay on disk.
    pub fn run<'p, I>(&mut self, plan: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<WorkItem<'p>>>,
    {
        for item in plan {
            let item = item?;
            let outcome = self.process(&item)?;
            debug!("{} <- {}: {}", item.output, item.input, outcome);
        }
        Ok(())
    }
}
