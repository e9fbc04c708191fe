//! `$name` placeholder engine.
//! Supports `$name`, `${name}` and `$$` for a literal dollar sign.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::segments::{position, push_literal, Segment, SegmentTemplate};
use super::{Engine, Template};
use crate::error::{Error, Result};
use crate::mapping::Mapping;

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))",
    )
    .unwrap()
});

/// Dollar-sign placeholder engine, the default.
pub struct StringTemplateEngine;

struct StringTemplate {
    inner: SegmentTemplate,
}

/// Splits template text into segments.
///
/// A `$` that starts no valid placeholder is an error unless `tolerant`,
/// in which case it is kept literally.
fn parse(text: &str, tolerant: bool) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_literal(&mut segments, &text[last..whole.start()]);
        last = whole.end();

        if caps.name("escaped").is_some() {
            push_literal(&mut segments, "$");
        } else if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
            segments.push(Segment::Name(name.as_str().to_string()));
        } else if tolerant {
            push_literal(&mut segments, whole.as_str());
        } else {
            let (line, column) = position(text, whole.start());
            return Err(Error::TemplateError(format!(
                "invalid placeholder in string: line {line}, col {column}"
            )));
        }
    }
    push_literal(&mut segments, &text[last..]);

    Ok(segments)
}

impl Engine for StringTemplateEngine {
    fn name(&self) -> &'static str {
        "string.Template"
    }

    fn description(&self) -> &'static str {
        "$name and ${name} placeholders, $$ for a dollar sign"
    }

    fn compile(
        &self,
        text: &str,
        tolerant: bool,
        _base_dir: Option<&Path>,
    ) -> Result<Box<dyn Template>> {
        let segments = parse(text, tolerant)?;
        Ok(Box::new(StringTemplate {
            inner: SegmentTemplate::new(segments, tolerant),
        }))
    }
}

impl Template for StringTemplate {
    fn apply(&self, mapping: &Mapping) -> Result<String> {
        self.inner.render(mapping)
    }
}
