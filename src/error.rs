//! Error handling for the eztemplate application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for eztemplate operations.
///
/// Configuration errors, substitution errors and I/O errors are all fatal.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// An input template could not be read.
    #[error("Failed to read '{}': {source}.", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write '{}': {source}.", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An empty output file could not be removed.
    #[error("Failed to remove '{}': {source}.", path.display())]
    RemoveError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid combination of outputs, inputs and argument groups.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The requested engine is not part of the registry.
    #[error("Engine '{0}' is not available.")]
    UnknownEngine(String),

    /// Two work items resolved to the same output file.
    #[error("Trying to write twice to the same file '{}'.", path.display())]
    DuplicateOutput { path: PathBuf },

    /// A template referenced a name that is not in the mapping.
    #[error("Missing name in template: {name}.")]
    MissingName { name: String },

    /// The template text could not be compiled.
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors raised by MiniJinja while compiling or rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
