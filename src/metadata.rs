//! Path metadata resolution.
//! Derives the named path attributes that templates can reference for
//! inputs and outputs. Standard streams never touch the filesystem.

use log::debug;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{is_separator, Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::constants::{OUTPUT_PREFIX, STDIO_MARKER};
use crate::mapping::{Mapping, Value};

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Read-only attributes of an input or output path.
///
/// Every derived field is `None` for standard streams. For concrete paths only
/// the `real*` fields can be `None`, when the path cannot be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMetadata {
    pub path: String,
    pub abspath: Option<String>,
    pub dirname: Option<String>,
    pub basename: Option<String>,
    pub stem: Option<String>,
    pub ext: Option<String>,
    pub realpath: Option<String>,
    pub realdrive: Option<String>,
    pub realdir: Option<String>,
    pub realbase: Option<String>,
    pub realstem: Option<String>,
    pub realext: Option<String>,
}

impl PathMetadata {
    /// Metadata of stdin/stdout: `-` and nothing else.
    pub fn standard() -> Self {
        Self {
            path: STDIO_MARKER.to_string(),
            ..Default::default()
        }
    }

    /// Resolves the metadata of a path, or of a standard stream for `None`.
    pub fn resolve(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::standard();
        };

        let raw = path.to_string_lossy().into_owned();
        let (dirname, basename) = split_path(&raw);
        let (stem, ext) = split_ext(&basename);

        let mut metadata = Self {
            abspath: absolute_path(path).map(|p| p.to_string_lossy().into_owned()),
            dirname: Some(dirname),
            basename: Some(basename),
            stem: Some(stem),
            ext: Some(ext),
            path: raw,
            ..Default::default()
        };

        match real_path(path) {
            Some(real) => {
                let (drive, tail) = split_drive(&real);
                let (realdir, realbase) = split_path(&tail);
                let (realstem, realext) = split_ext(&realbase);
                metadata.realpath = Some(real.to_string_lossy().into_owned());
                metadata.realdrive = Some(drive);
                metadata.realdir = Some(realdir);
                metadata.realbase = Some(realbase);
                metadata.realstem = Some(realstem);
                metadata.realext = Some(realext);
            }
            None => debug!("Cannot resolve real path of '{}'", path.display()),
        }

        metadata
    }

    /// Every maximal digit run in the basename, in order.
    pub fn numbers(&self) -> Vec<String> {
        let Some(basename) = self.basename.as_deref() else {
            return Vec::new();
        };
        DIGIT_RUN
            .find_iter(basename)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// The last digit run in the basename.
    pub fn index(&self) -> Option<String> {
        self.numbers().pop()
    }

    /// Variables exposed to content templates, prefixed with `ez_`.
    ///
    /// A concrete path without a directory part reports `.` as its directory.
    pub fn output_variables(&self) -> Mapping {
        let dirname = match (&self.basename, &self.dirname) {
            (Some(_), Some(dirname)) if dirname.is_empty() => Some(".".to_string()),
            _ => self.dirname.clone(),
        };

        [
            ("path", Some(self.path.clone())),
            ("abspath", self.abspath.clone()),
            ("dirname", dirname),
            ("basename", self.basename.clone()),
            ("stem", self.stem.clone()),
            ("ext", self.ext.clone()),
            ("realpath", self.realpath.clone()),
            ("realdrive", self.realdrive.clone()),
            ("realdir", self.realdir.clone()),
            ("realbase", self.realbase.clone()),
            ("realstem", self.realstem.clone()),
            ("realext", self.realext.clone()),
        ]
        .into_iter()
        .map(|(name, value)| {
            let name = format!("{OUTPUT_PREFIX}{name}");
            (name, Value::from(value))
        })
        .collect()
    }

    /// Variables exposed to output file name templates.
    pub fn naming_variables(&self) -> Mapping {
        let mut mapping: Mapping = [
            ("path", Some(self.path.clone())),
            ("dirname", self.dirname.clone()),
            ("basename", self.basename.clone()),
            ("stem", self.stem.clone()),
            ("ext", self.ext.clone()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect();

        if self.basename.is_some() {
            mapping.insert("number".to_string(), Value::List(self.numbers()));
        } else {
            mapping.insert("number".to_string(), Value::Unset);
        }
        mapping.insert("i".to_string(), Value::from(self.index()));

        mapping
    }
}

/// Splits a path string into directory and basename at the last separator.
///
/// Trailing separators are kept on the directory side only when the
/// directory consists of nothing but separators.
pub fn split_path(path: &str) -> (String, String) {
    let split = path.rfind(is_separator).map(|i| i + 1).unwrap_or(0);
    let (head, tail) = path.split_at(split);

    let head = if !head.is_empty() && !head.chars().all(is_separator) {
        head.trim_end_matches(is_separator)
    } else {
        head
    };

    (head.to_string(), tail.to_string())
}

/// Splits a basename into stem and extension at its last dot.
///
/// Leading dots never start an extension, so `stem + ext == basename`.
pub fn split_ext(basename: &str) -> (String, String) {
    if let Some(dot) = basename.rfind('.') {
        if basename[..dot].chars().any(|c| c != '.') {
            let (stem, ext) = basename.split_at(dot);
            return (stem.to_string(), ext.to_string());
        }
    }
    (basename.to_string(), String::new())
}

/// Lexically normalized absolute form of a path.
pub fn absolute_path(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().ok()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Some(normalized)
}

/// Symlink-resolved path; for missing files the parent directory is resolved.
fn real_path(path: &Path) -> Option<PathBuf> {
    if let Ok(real) = fs::canonicalize(path) {
        return Some(real);
    }

    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|parent| parent.join(name))
}

fn split_drive(path: &Path) -> (String, String) {
    let mut components = path.components();
    match components.next() {
        Some(Component::Prefix(prefix)) => (
            prefix.as_os_str().to_string_lossy().into_owned(),
            components.as_path().to_string_lossy().into_owned(),
        ),
        _ => (String::new(), path.to_string_lossy().into_owned()),
    }
}
