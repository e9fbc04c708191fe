//! Template engines and their registry.
//! Every backend is reached through the same two operations: `compile` once
//! per template text, `apply` once per mapping.

use indexmap::IndexMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mapping::Mapping;

pub mod format;
pub mod jinja;
mod segments;
pub mod string_template;

pub use format::FormatEngine;
pub use jinja::JinjaEngine;
pub use string_template::StringTemplateEngine;

/// A substitution backend.
pub trait Engine {
    /// Handle used to select the engine on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown by `--engine help`.
    fn description(&self) -> &'static str;

    /// Compiles template text.
    ///
    /// # Arguments
    /// * `text` - Raw template text
    /// * `tolerant` - Substitute a placeholder for unknown names instead of failing
    /// * `base_dir` - Directory the template was read from, if any
    ///
    /// # Returns
    /// * `Result<Box<dyn Template>>` - Compiled template, reusable for any mapping
    fn compile(
        &self,
        text: &str,
        tolerant: bool,
        base_dir: Option<&Path>,
    ) -> Result<Box<dyn Template>>;
}

/// A compiled template.
pub trait Template {
    /// Renders the template against a mapping.
    ///
    /// # Errors
    /// * `Error::MissingName` if a referenced name is absent and the template
    ///   was not compiled in tolerant mode
    fn apply(&self, mapping: &Mapping) -> Result<String>;
}

/// Static registry of the compiled-in engines.
pub struct EngineRegistry {
    engines: IndexMap<&'static str, Box<dyn Engine>>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            engines: IndexMap::new(),
        }
    }

    /// Registry with every built-in engine.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StringTemplateEngine));
        registry.register(Box::new(FormatEngine));
        registry.register(Box::new(JinjaEngine::new()));
        registry
    }

    /// Adds an engine, replacing any engine with the same name.
    pub fn register(&mut self, engine: Box<dyn Engine>) {
        self.engines.insert(engine.name(), engine);
    }

    /// Looks an engine up by name.
    ///
    /// # Errors
    /// * `Error::UnknownEngine` if no engine has that name
    pub fn get(&self, name: &str) -> Result<&dyn Engine> {
        self.engines
            .get(name)
            .map(|engine| &**engine)
            .ok_or_else(|| Error::UnknownEngine(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Human readable listing of the available engines, sorted by name.
    pub fn describe(&self) -> String {
        let width = self
            .engines
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0);
        let mut names: Vec<&&str> = self.engines.keys().collect();
        names.sort();

        let mut listing = String::from("Available templating engines:\n");
        for name in names {
            let description = self.engines[*name].description();
            listing.push_str(&format!("  {name:<width$}  -  {description}\n"));
        }
        listing
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        EngineRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_engines() {
        let registry = EngineRegistry::builtin();
        for name in ["string.Template", "format", "jinja"] {
            assert!(registry.contains(name));
            assert_eq!(registry.get(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_unknown_engine() {
        let registry = EngineRegistry::builtin();
        match registry.get("<NONEXISTENT_ENGINE>") {
            Err(Error::UnknownEngine(name)) => assert_eq!(name, "<NONEXISTENT_ENGINE>"),
            _ => panic!("Expected UnknownEngine error"),
        }
    }

    #[test]
    fn test_describe_is_sorted() {
        let listing = EngineRegistry::builtin().describe();
        let format = listing.find("format").unwrap();
        let jinja = listing.find("jinja").unwrap();
        let string = listing.find("string.Template").unwrap();
        assert!(listing.starts_with("Available templating engines:"));
        assert!(format < jinja && jinja < string);
    }
}
