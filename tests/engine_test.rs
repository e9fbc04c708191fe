use eztemplate::constants::PLACEHOLDER;
use eztemplate::engine::{
    Engine, EngineRegistry, FormatEngine, JinjaEngine, StringTemplateEngine, Template,
};
use eztemplate::error::Error;
use eztemplate::mapping::{Mapping, Value};
use std::fs;
use tempfile::TempDir;

const MENU: &str = "Heute gibt es\n$essen mit\n${beilage}.\n";

fn mapping(pairs: &[(&str, &str)]) -> Mapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

fn menu() -> Mapping {
    mapping(&[
        ("random", "value"),
        ("essen", "Szegediner Gulasch"),
        ("beilage", "Kartoffeln"),
    ])
}

fn compile(engine: &dyn Engine, text: &str, tolerant: bool) -> Box<dyn Template> {
    engine.compile(text, tolerant, None).unwrap()
}

#[test]
fn test_string_template_identifiers() {
    let template = compile(&StringTemplateEngine, MENU, false);

    let result = template.apply(&menu()).unwrap();
    assert_eq!(
        result,
        "Heute gibt es\nSzegediner Gulasch mit\nKartoffeln.\n"
    );
}

#[test]
fn test_string_template_escape() {
    let text = "Costs $$5 for ${essen}";
    let template = compile(&StringTemplateEngine, text, false);
    let result = template.apply(&menu()).unwrap();
    assert_eq!(result, "Costs $5 for Szegediner Gulasch");
}

#[test]
fn test_string_template_strict_missing_identifier() {
    let template = compile(&StringTemplateEngine, MENU, false);

    match template.apply(&mapping(&[("random", "value")])) {
        Err(Error::MissingName { name }) => assert_eq!(name, "essen"),
        _ => panic!("Expected MissingName error"),
    }
}

#[test]
fn test_string_template_tolerant_missing_identifier() {
    let template = compile(&StringTemplateEngine, MENU, true);

    let result = template.apply(&mapping(&[("random", "value")])).unwrap();
    let expected = format!("Heute gibt es\n{PLACEHOLDER} mit\n{PLACEHOLDER}.\n");
    assert_eq!(result, expected);
}

#[test]
fn test_string_template_unset_and_list_values() {
    let template = compile(&StringTemplateEngine, "[$flag] [$number]", false);
    let numbers = vec!["1".to_string(), "22".to_string()];
    let mut values = Mapping::new();
    values.insert("flag".to_string(), Value::Unset);
    values.insert("number".to_string(), Value::List(numbers));
    assert_eq!(template.apply(&values).unwrap(), "[] [1 22]");
}

#[test]
fn test_string_template_invalid_placeholder() {
    let strict = StringTemplateEngine.compile("price: $5", false, None);
    assert!(matches!(strict, Err(Error::TemplateError(_))));

    let template = compile(&StringTemplateEngine, "price: $5", true);
    assert_eq!(template.apply(&Mapping::new()).unwrap(), "price: $5");
}

#[test]
fn test_format_fields_and_escapes() {
    let template = compile(&FormatEngine, "{{{essen}}} mit {beilage}", false);
    let result = template.apply(&menu()).unwrap();
    assert_eq!(result, "{Szegediner Gulasch} mit Kartoffeln");

    let stray = FormatEngine.compile("a } b", false, None);
    assert!(matches!(stray, Err(Error::TemplateError(_))));
}

#[test]
fn test_format_strict_and_tolerant() {
    let strict = compile(&FormatEngine, "{stem}-out{i}", false);
    let tolerant = compile(&FormatEngine, "{stem}-out{i}", true);
    let values = mapping(&[("stem", "a")]);

    let result = strict.apply(&values);
    assert!(matches!(result, Err(Error::MissingName { .. })));
    let expected = format!("a-out{PLACEHOLDER}");
    assert_eq!(tolerant.apply(&values).unwrap(), expected);
}

#[test]
fn test_jinja_expressions() {
    let engine = JinjaEngine::new();
    let template = compile(&engine, "Hello {{ name }}!\n", false);
    let result = template.apply(&mapping(&[("name", "test")])).unwrap();
    assert_eq!(result, "Hello test!\n");
}

#[test]
fn test_jinja_conditional() {
    let engine = JinjaEngine::new();
    let text = "{% if value|int < 10 %}less than ten{% else %}greater or equal{% endif %}";
    let template = compile(&engine, text, false);
    let result = template.apply(&mapping(&[("value", "4")])).unwrap();
    assert_eq!(result, "less than ten");
}

#[test]
fn test_jinja_strict_missing_identifier() {
    let engine = JinjaEngine::new();
    let template = compile(&engine, "{{ essen }} mit {{ beilage }}", false);
    let result = template.apply(&mapping(&[("random", "value")]));
    assert!(matches!(result, Err(Error::MissingName { .. })));
}

#[test]
fn test_jinja_tolerant_missing_identifier() {
    let engine = JinjaEngine::new();
    let template = compile(&engine, "{{ essen }} mit {{ beilage }}.", true);
    let result = template.apply(&mapping(&[("random", "value")])).unwrap();
    assert_eq!(result, format!("{PLACEHOLDER} mit {PLACEHOLDER}."));
}

#[test]
fn test_jinja_unset_value_is_defined() {
    let engine = JinjaEngine::new();
    let text = "{% if flag is defined %}set{% else %}unset{% endif %}";
    let template = compile(&engine, text, false);
    let mut values = Mapping::new();
    values.insert("flag".to_string(), Value::Unset);
    assert_eq!(template.apply(&values).unwrap(), "set");
    assert_eq!(template.apply(&Mapping::new()).unwrap(), "unset");
}

#[test]
fn test_jinja_include_relative_to_base_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("header.txt"), "# {{ title }}\n").unwrap();

    let engine = JinjaEngine::new();
    let text = "{% include 'header.txt' %}body\n";
    let template = engine.compile(text, false, Some(temp_dir.path())).unwrap();
    let result = template.apply(&mapping(&[("title", "Menu")])).unwrap();
    assert_eq!(result, "# Menu\nbody\n");
}

#[test]
fn test_jinja_syntax_error() {
    let engine = JinjaEngine::new();
    let result = engine.compile("{% if %}", false, None);
    assert!(matches!(result, Err(Error::MinijinjaError(_))));
}

#[test]
fn test_every_registered_engine_fills_its_own_syntax() {
    let registry = EngineRegistry::builtin();
    let cases = [
        ("string.Template", "Hello, ${name}!"),
        ("format", "Hello, {name}!"),
        ("jinja", "Hello, {{ name }}!"),
    ];
    for (name, text) in cases {
        let template = compile(registry.get(name).unwrap(), text, false);
        let result = template.apply(&mapping(&[("name", "World")])).unwrap();
        assert_eq!(result, "Hello, World!");
    }
}
