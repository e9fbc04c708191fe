//! MiniJinja template engine.
//! Compiles each template into its own environment so that includes resolve
//! relative to the directory the template was read from.
use minijinja::{escape_formatter, path_loader, Environment, ErrorKind, UndefinedBehavior};
use std::path::Path;

use super::{Engine, Template};
use crate::constants::PLACEHOLDER;
use crate::error::{Error, Result};
use crate::mapping::{to_context, Mapping};

const TEMPLATE_NAME: &str = "template";

/// MiniJinja-based template engine.
pub struct JinjaEngine {
    /// Base environment every compiled template starts from
    env: Environment<'static>,
}

/// Template compiled into a dedicated environment.
struct JinjaTemplate {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Creates a new JinjaEngine instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        JinjaEngine::new()
    }
}

/// Undefined values become `MissingName`, everything else stays a MiniJinja error.
fn map_error(err: minijinja::Error) -> Error {
    match err.kind() {
        ErrorKind::UndefinedError => Error::MissingName {
            name: err.to_string(),
        },
        _ => Error::MinijinjaError(err),
    }
}

impl Engine for JinjaEngine {
    fn name(&self) -> &'static str {
        "jinja"
    }

    fn description(&self) -> &'static str {
        "MiniJinja templates, {{ name }} expressions and {% %} statements"
    }

    /// Compiles a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template has syntax errors
    fn compile(
        &self,
        text: &str,
        tolerant: bool,
        base_dir: Option<&Path>,
    ) -> Result<Box<dyn Template>> {
        let mut env = self.env.clone();

        if tolerant {
            env.set_undefined_behavior(UndefinedBehavior::Chainable);
            env.set_formatter(|out, state, value| {
                if value.is_undefined() {
                    out.write_str(PLACEHOLDER).map_err(|_| {
                        minijinja::Error::new(ErrorKind::WriteFailure, "cannot write placeholder")
                    })
                } else {
                    escape_formatter(out, state, value)
                }
            });
        } else {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }

        let base_dir = match base_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        env.set_loader(path_loader(base_dir));

        env.add_template_owned(TEMPLATE_NAME, text.to_string())
            .map_err(map_error)?;

        Ok(Box::new(JinjaTemplate { env }))
    }
}

impl Template for JinjaTemplate {
    fn apply(&self, mapping: &Mapping) -> Result<String> {
        let tmpl = self.env.get_template(TEMPLATE_NAME).map_err(map_error)?;
        tmpl.render(to_context(mapping)).map_err(map_error)
    }
}
