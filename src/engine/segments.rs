use crate::constants::PLACEHOLDER;
use crate::error::{Error, Result};
use crate::mapping::Mapping;

/// A piece of a placeholder template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Name(String),
}

/// Placeholder template compiled into literal and name segments.
#[derive(Debug)]
pub(crate) struct SegmentTemplate {
    pub(crate) segments: Vec<Segment>,
    pub(crate) tolerant: bool,
}

impl SegmentTemplate {
    pub(crate) fn new(segments: Vec<Segment>, tolerant: bool) -> Self {
        Self { segments, tolerant }
    }

    pub(crate) fn render(&self, mapping: &Mapping) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name(name) => match mapping.get(name) {
                    Some(value) => out.push_str(&value.to_text()),
                    None if self.tolerant => out.push_str(PLACEHOLDER),
                    None => return Err(Error::MissingName { name: name.clone() }),
                },
            }
        }
        Ok(out)
    }
}

/// Appends literal text, merging it into a preceding literal.
pub(crate) fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

/// One-based line and column of a byte offset, for error messages.
pub(crate) fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = offset - before.rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
    (line, column)
}
