//! `{name}` placeholder engine with doubled braces as escapes.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::segments::{position, push_literal, Segment, SegmentTemplate};
use super::{Engine, Template};
use crate::error::{Error, Result};
use crate::mapping::Mapping;

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<open>\{\{)|(?P<close>\}\})|\{(?P<name>[_A-Za-z][_A-Za-z0-9]*)\}|[{}]")
        .unwrap()
});

pub struct FormatEngine;

struct FormatTemplate {
    inner: SegmentTemplate,
}

fn parse(text: &str, tolerant: bool) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in FIELD_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_literal(&mut segments, &text[last..whole.start()]);
        last = whole.end();

        if caps.name("open").is_some() {
            push_literal(&mut segments, "{");
        } else if caps.name("close").is_some() {
            push_literal(&mut segments, "}");
        } else if let Some(name) = caps.name("name") {
            segments.push(Segment::Name(name.as_str().to_string()));
        } else if tolerant {
            push_literal(&mut segments, whole.as_str());
        } else {
            let (line, column) = position(text, whole.start());
            return Err(Error::TemplateError(format!(
                "single '{}' in format string: line {line}, col {column}",
                whole.as_str()
            )));
        }
    }
    push_literal(&mut segments, &text[last..]);

    Ok(segments)
}

impl Engine for FormatEngine {
    fn name(&self) -> &'static str {
        "format"
    }

    fn description(&self) -> &'static str {
        "{name} fields, {{ and }} for literal braces"
    }

    fn compile(
        &self,
        text: &str,
        tolerant: bool,
        _base_dir: Option<&Path>,
    ) -> Result<Box<dyn Template>> {
        let segments = parse(text, tolerant)?;
        Ok(Box::new(FormatTemplate {
            inner: SegmentTemplate::new(segments, tolerant),
        }))
    }
}

impl Template for FormatTemplate {
    fn apply(&self, mapping: &Mapping) -> Result<String> {
        self.inner.render(mapping)
    }
}
