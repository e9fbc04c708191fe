use eztemplate::engine::{FormatEngine, StringTemplateEngine};
use eztemplate::error::Error;
use eztemplate::groups::{fold_groups, ArgumentGroup};
use eztemplate::planner::{plan, OutputMode, Plan, WorkItem};
use eztemplate::source::{InputSource, OutputTarget};
use std::path::PathBuf;

fn inputs(paths: &[&str]) -> Vec<InputSource> {
    paths
        .iter()
        .map(|p| InputSource::Path(PathBuf::from(p)))
        .collect()
}

fn outputs(items: &[WorkItem<'_>]) -> Vec<OutputTarget> {
    items.iter().map(|item| item.output.clone()).collect()
}

fn collect(work: Plan<'_>) -> Vec<WorkItem<'_>> {
    work.collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_constant_mode_yields_one_item_per_output() {
    let engine = StringTemplateEngine;
    let file = OutputTarget::Path(PathBuf::from("a.txt"));
    let mode = OutputMode::Constant(vec![OutputTarget::Standard, file.clone()]);
    let sources = inputs(&["tpl"]);
    let groups = vec![ArgumentGroup::new()];

    let items = collect(plan(&mode, &sources, &groups, &engine).unwrap());

    assert_eq!(outputs(&items), vec![OutputTarget::Standard, file]);
    for item in &items {
        assert_eq!(item.input, &sources[0]);
        assert_eq!(item.group, &groups[0]);
    }
}

#[test]
fn test_constant_mode_rejects_fan_out() {
    let engine = StringTemplateEngine;
    let mode = OutputMode::Constant(vec![OutputTarget::Standard]);
    let one_group = vec![ArgumentGroup::new()];
    let two_groups = fold_groups(["a=1", "--", "a=2"]);

    let many_inputs = inputs(&["t1", "t2"]);
    let result = plan(&mode, &many_inputs, &one_group, &engine);
    assert!(matches!(result, Err(Error::ConfigError(_))));

    let one_input = inputs(&["t1"]);
    let result = plan(&mode, &one_input, &two_groups, &engine);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_variable_mode_names_outputs_per_input() {
    let mode = OutputMode::Variable("{stem}-out{i}{ext}".to_string());
    let sources = inputs(&["a1.txt", "a2.txt"]);
    let groups = vec![ArgumentGroup::new()];

    let items = collect(plan(&mode, &sources, &groups, &FormatEngine).unwrap());

    assert_eq!(
        outputs(&items),
        vec![
            OutputTarget::Path(PathBuf::from("a1-out1.txt")),
            OutputTarget::Path(PathBuf::from("a2-out2.txt")),
        ]
    );
}

#[test]
fn test_variable_mode_loops_inputs_outer_groups_inner() {
    let engine = StringTemplateEngine;
    let name = "${dirname}/${lang}-${basename}";
    let mode = OutputMode::Variable(name.to_string());
    let sources = inputs(&["x/one.md", "y/two.md"]);
    let groups = fold_groups(["lang=de", "--", "lang=en"]);

    let items = collect(plan(&mode, &sources, &groups, &engine).unwrap());

    let expected: Vec<_> = ["x/de-one.md", "x/en-one.md", "y/de-two.md", "y/en-two.md"]
        .iter()
        .map(|p| OutputTarget::Path(PathBuf::from(p)))
        .collect();
    assert_eq!(outputs(&items), expected);
    assert_eq!(items[1].input, &sources[0]);
    assert_eq!(items[1].group, &groups[1]);
}

#[test]
fn test_variable_mode_missing_name_is_fatal() {
    let engine = StringTemplateEngine;
    let mode = OutputMode::Variable("${stem}-${missing}".to_string());
    let sources = inputs(&["a.txt", "b.txt"]);
    let groups = vec![ArgumentGroup::new()];

    let mut work = plan(&mode, &sources, &groups, &engine).unwrap();
    assert!(matches!(work.next(), Some(Err(Error::MissingName { .. }))));
    assert!(work.next().is_none());
}

#[test]
fn test_variable_mode_stdin_has_no_stem() {
    let engine = StringTemplateEngine;
    let mode = OutputMode::Variable("${stem}.out".to_string());
    let sources = vec![InputSource::Standard];
    let groups = vec![ArgumentGroup::new()];

    // stem is present but valueless for standard input
    let items = collect(plan(&mode, &sources, &groups, &engine).unwrap());
    let expected = OutputTarget::Path(PathBuf::from(".out"));
    assert_eq!(outputs(&items), vec![expected]);
}

#[test]
fn test_variable_mode_empty_name() {
    let engine = StringTemplateEngine;
    let mode = OutputMode::Variable("${name}".to_string());
    let sources = inputs(&["a.txt"]);
    let groups = fold_groups(["name="]);

    let mut work = plan(&mode, &sources, &groups, &engine).unwrap();
    assert!(matches!(work.next(), Some(Err(Error::ConfigError(_)))));
}

#[test]
fn test_plan_is_lazy() {
    let engine = StringTemplateEngine;
    let mode = OutputMode::Variable("${stem}-${missing}".to_string());
    let sources = inputs(&["a.txt"]);
    let groups = vec![ArgumentGroup::new()];

    // Nothing is rendered until the first item is pulled.
    assert!(plan(&mode, &sources, &groups, &engine).is_ok());
}
