//! Combination planning.
//! Produces the ordered, lazy stream of (output, input, argument group) work
//! items, either for a fixed set of outputs or for an output file name
//! computed per input from a template.

use log::debug;
use std::path::PathBuf;

use crate::engine::{Engine, Template};
use crate::error::{Error, Result};
use crate::groups::{to_mapping, ArgumentGroup};
use crate::metadata::PathMetadata;
use crate::source::{InputSource, OutputTarget};

/// How output targets are determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Fixed, pre-declared output targets
    Constant(Vec<OutputTarget>),
    /// Output file name template rendered once per input and group
    Variable(String),
}

/// One unit of substitution-and-write work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem<'a> {
    pub output: OutputTarget,
    pub input: &'a InputSource,
    pub group: &'a ArgumentGroup,
}

/// Constant mode: every output gets the single input and group.
pub struct ConstantPlan<'a> {
    outputs: std::slice::Iter<'a, OutputTarget>,
    input: &'a InputSource,
    group: &'a ArgumentGroup,
}

/// Variable mode: inputs outer, groups inner.
pub struct VariablePlan<'a> {
    template: Box<dyn Template>,
    inputs: &'a [InputSource],
    groups: &'a [ArgumentGroup],
    input_index: usize,
    group_index: usize,
    metadata: Option<PathMetadata>,
    failed: bool,
}

/// Lazy work item stream of either mode.
pub enum Plan<'a> {
    Constant(ConstantPlan<'a>),
    Variable(VariablePlan<'a>),
}

/// Plans the work of one invocation.
///
/// # Arguments
/// * `mode` - Constant outputs or an output file name template
/// * `inputs` - Input sources in declaration order
/// * `groups` - Argument groups in declaration order
/// * `engine` - Engine used to render output file names in variable mode
///
/// # Returns
/// * `Result<Plan>` - Iterator of work items, produced on demand
///
/// # Errors
/// * `Error::ConfigError` if constant mode gets more than one input or group
/// * Any compile error of the output file name template
pub fn plan<'a>(
    mode: &'a OutputMode,
    inputs: &'a [InputSource],
    groups: &'a [ArgumentGroup],
    engine: &dyn Engine,
) -> Result<Plan<'a>> {
    match mode {
        OutputMode::Constant(outputs) => {
            let (input, group) = match (inputs, groups) {
                ([input], [group]) => (input, group),
                _ => {
                    return Err(Error::ConfigError(format!(
                        "constant outputs need exactly one input and one argument group, \
                         got {} inputs and {} groups; use --vary to fan out",
                        inputs.len(),
                        groups.len()
                    )))
                }
            };
            Ok(Plan::Constant(ConstantPlan {
                outputs: outputs.iter(),
                input,
                group,
            }))
        }
        OutputMode::Variable(name_template) => {
            // Output names are always rendered strictly.
            let template = engine.compile(name_template, false, None)?;
            Ok(Plan::Variable(VariablePlan {
                template,
                inputs,
                groups,
                input_index: 0,
                group_index: 0,
                metadata: None,
                failed: false,
            }))
        }
    }
}

impl<'a> Iterator for ConstantPlan<'a> {
    type Item = Result<WorkItem<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let output = self.outputs.next()?;
        Some(Ok(WorkItem {
            output: output.clone(),
            input: self.input,
            group: self.group,
        }))
    }
}

/// Renders the output file name of one input and group.
fn render_name(
    template: &dyn Template,
    metadata: &PathMetadata,
    group: &ArgumentGroup,
) -> Result<PathBuf> {
    let mut mapping = to_mapping(group);
    mapping.extend(metadata.naming_variables());

    let name = template.apply(&mapping)?;
    if name.is_empty() {
        return Err(Error::ConfigError(format!(
            "output file name template rendered an empty name for input '{}'",
            metadata.path
        )));
    }
    Ok(PathBuf::from(name))
}

impl<'a> Iterator for VariablePlan<'a> {
    type Item = Result<WorkItem<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let inputs = self.inputs;
        let groups = self.groups;
        loop {
            let input = inputs.get(self.input_index)?;
            if self.group_index >= groups.len() {
                self.input_index += 1;
                self.group_index = 0;
                self.metadata = None;
                continue;
            }

            let group = &groups[self.group_index];
            self.group_index += 1;

            let metadata = self
                .metadata
                .get_or_insert_with(|| PathMetadata::resolve(input.path()));
            let rendered = render_name(self.template.as_ref(), metadata, group);

            return Some(match rendered {
                Ok(path) => {
                    debug!("Computed output '{}' for input {}", path.display(), input);
                    Ok(WorkItem {
                        output: OutputTarget::Path(path),
                        input,
                        group,
                    })
                }
                Err(err) => {
                    self.failed = true;
                    Err(err)
                }
            });
        }
    }
}

impl<'a> Iterator for Plan<'a> {
    type Item = Result<WorkItem<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Plan::Constant(plan) => plan.next(),
            Plan::Variable(plan) => plan.next(),
        }
    }
}
