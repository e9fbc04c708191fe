//! Input sources and output targets.
//! Standard streams are explicit variants and are only turned into real
//! handles by the processor.

use std::path::{Path, PathBuf};

use crate::constants::STDIO_MARKER;

/// Where a template is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Standard input
    Standard,
    /// Template file on disk
    Path(PathBuf),
}

/// Where a rendered result goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputTarget {
    /// Standard output
    Standard,
    /// Output file on disk
    Path(PathBuf),
}

impl InputSource {
    /// Creates an InputSource from a command-line value, `-` meaning stdin.
    pub fn from_arg<S: AsRef<str>>(arg: S) -> Self {
        let arg = arg.as_ref();
        if arg == STDIO_MARKER {
            Self::Standard
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Standard => None,
            Self::Path(path) => Some(path),
        }
    }
}

impl OutputTarget {
    /// Creates an OutputTarget from a command-line value, `-` meaning stdout.
    pub fn from_arg<S: AsRef<str>>(arg: S) -> Self {
        let arg = arg.as_ref();
        if arg == STDIO_MARKER {
            Self::Standard
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Standard => None,
            Self::Path(path) => Some(path),
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Standard => write!(f, "standard input"),
            InputSource::Path(path) => write!(f, "'{}'", path.display()),
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Standard => write!(f, "standard output"),
            OutputTarget::Path(path) => write!(f, "'{}'", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        assert_eq!(format!("{}", InputSource::Standard), "standard input");
        assert_eq!(
            format!("{}", OutputTarget::Path(PathBuf::from("out/a.txt"))),
            "'out/a.txt'"
        );
    }

    #[test]
    fn test_dash_is_standard_stream() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Standard);
        assert_eq!(OutputTarget::from_arg("-"), OutputTarget::Standard);
        assert_eq!(
            OutputTarget::from_arg("a"),
            OutputTarget::Path(PathBuf::from("a"))
        );
        assert_eq!(
            InputSource::Path(PathBuf::from("t")).path(),
            Some(Path::new("t"))
        );
    }
}
