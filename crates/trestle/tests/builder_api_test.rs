//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works and is usable.

use float_cmp::assert_approx_eq;

use trestle::{
    DeserializationError, DiagramBuilder, InputFormat, TrestleError,
    config::{AppConfig, OutputConfig, StyleConfig},
};

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_simple_definition() {
    let source = r#"{"type": "Diagram", "items": ["a"]}"#;

    let builder = DiagramBuilder::default();
    let result = builder.parse(source, InputFormat::Json);
    assert!(
        result.is_ok(),
        "Should parse valid definition: {:?}",
        result.err()
    );
}

#[test]
fn test_single_terminal_width() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .parse(r#"["a"]"#, InputFormat::Json)
        .expect("Failed to parse definition");

    // start, terminal with its two connector runs, end
    let terminal_width = 8.5 + 20.0;
    assert_approx_eq!(
        f64,
        diagram.metrics().width(),
        20.0 + (terminal_width + 20.0) + 20.0
    );
}

#[test]
fn test_render_standalone() {
    let source = "type: ComplexDiagram\nitems:\n  - type: Start\n    kind: complex\n    label: rule\n  - x\n";

    let builder = DiagramBuilder::default();
    let diagram = builder
        .parse(source, InputFormat::Yaml)
        .expect("Failed to parse definition");
    let svg = builder.render_svg(&diagram);

    assert!(svg.starts_with("<svg"), "Output should start with an svg tag");
    assert!(svg.ends_with("</svg>\n"), "Output should be complete SVG");
    assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("<style>"));
    assert!(svg.contains(">rule</text>"));
}

#[test]
fn test_render_embedded_with_custom_style() {
    let mut config = AppConfig::new(
        StyleConfig::default()
            .with_root_css_class("grammar")
            .with_odd_pixel_stroke(false),
        OutputConfig::default(),
    );
    config.output_mut().set_standalone(false);

    let builder = DiagramBuilder::new(config);
    let svg = builder
        .render(r#"["a"]"#, InputFormat::Json)
        .expect("Failed to render");

    assert!(svg.starts_with("<svg class=\"grammar\""));
    assert!(!svg.contains("<style>"));
    assert!(!svg.contains("translate(.5 .5)"));
}

#[test]
fn test_custom_stylesheet() {
    let config = AppConfig::new(
        StyleConfig::default(),
        OutputConfig::default().with_stylesheet("path { stroke: red; }"),
    );
    let svg = DiagramBuilder::new(config)
        .render(r#"["a"]"#, InputFormat::Json)
        .expect("Failed to render");
    assert!(svg.contains("<style>path { stroke: red; }</style>"));
}

#[test]
fn test_parse_invalid_definition_returns_error() {
    let builder = DiagramBuilder::default();

    let result = builder.parse("{\"type\": ", InputFormat::Json);
    assert!(matches!(
        result,
        Err(TrestleError::Deserialize {
            err: DeserializationError::Syntax { .. },
            ..
        })
    ));

    let result = builder.parse(
        r#"{"type": "Choice", "normal": 3, "items": ["a"]}"#,
        InputFormat::Json,
    );
    let Err(TrestleError::Deserialize { err, src }) = result else {
        panic!("expected a deserialization error");
    };
    assert_eq!(err.path(), Some("$"));
    assert!(src.contains("Choice"));
}

#[test]
fn test_javascript_input_rejected() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("Diagram(Terminal('a'))", InputFormat::JavaScript);
    assert!(result.is_err(), "JavaScript definitions are not supported");
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let svg1 = builder
        .render(r#"["a"]"#, InputFormat::Json)
        .expect("Failed to render first diagram");
    let svg2 = builder
        .render("- b\n- c\n", InputFormat::Yaml)
        .expect("Failed to render second diagram");

    assert!(svg1.contains(">a</text>"), "First SVG should be valid");
    assert!(svg2.contains(">c</text>"), "Second SVG should be valid");
}

#[test]
fn test_railroad_matches_parsed() {
    let builder = DiagramBuilder::default();
    let rr = builder.railroad();
    let built = rr.diagram([rr.terminal("a"), rr.non_terminal("b")]);
    let parsed = builder
        .parse(r#"["a", {"type": "NonTerminal", "text": "b"}]"#, InputFormat::Json)
        .expect("Failed to parse");
    assert_eq!(built.items(), parsed.items());
}
