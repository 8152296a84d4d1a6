//! Property tests for node metrics.
//!
//! These exercise whole node trees built through [`Railroad`] rather than
//! individual constructors.

use float_cmp::approx_eq;
use proptest::prelude::*;

use trestle_core::{
    Child, Layout, Node, Railroad, StyleConfig, draw::Element, geometry::Point, node::ChoiceKind,
};

// ===================
// Strategies
// ===================

fn rr() -> Railroad {
    Railroad::default()
}

/// Leaves that always ask for connector space.
fn spaced_leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|text| rr().terminal(text)),
        "[a-z]{1,8}".prop_map(|text| rr().non_terminal(text)),
        block_strategy(),
    ]
}

fn block_strategy() -> impl Strategy<Value = Node> {
    (1.0f64..80.0, 0.0f64..40.0, 0.0f64..40.0, 0.0f64..40.0)
        .prop_map(|(width, up, height, down)| rr().block_with(width, up, height, down))
}

fn leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        spaced_leaf_strategy(),
        "[a-z ]{0,8}".prop_map(|text| rr().comment(text)),
        Just(rr().skip()),
    ]
}

fn node_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        let items = prop::collection::vec(inner.clone(), 1..4);
        prop_oneof![
            items.clone().prop_map(|items| rr().sequence(items).unwrap()),
            items.clone().prop_map(|items| rr().stack(items).unwrap()),
            items
                .clone()
                .prop_map(|items| rr().optional_sequence(items).unwrap()),
            items
                .clone()
                .prop_map(|items| rr().horizontal_choice(items).unwrap()),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| rr().alternating_sequence([a, b]).unwrap()),
            (items.clone(), any::<prop::sample::Index>()).prop_map(|(items, normal)| {
                let normal = normal.index(items.len());
                rr().choice(normal, items).unwrap()
            }),
            (items, any::<prop::sample::Index>(), any::<bool>()).prop_map(
                |(items, normal, all)| {
                    let normal = normal.index(items.len());
                    let kind = if all { ChoiceKind::All } else { ChoiceKind::Any };
                    rr().multiple_choice(normal, kind, items).unwrap()
                }
            ),
            (inner.clone(), prop::option::of(inner.clone()))
                .prop_map(|(item, repeat)| rr().one_or_more(item, repeat.map(Child::from))),
            (inner.clone(), prop::option::of("[a-z]{1,6}"))
                .prop_map(|(item, label)| rr().group(item, label.as_deref())),
            (inner, any::<bool>()).prop_map(|(item, skip)| rr().optional(item, skip).unwrap()),
        ]
    })
}

// ===================
// Property Test Functions
// ===================

/// Every metric of every node in the tree is finite and non-negative.
fn check_metrics_non_negative(node: &Node) -> Result<(), TestCaseError> {
    let mut failures = Vec::new();
    node.walk(&mut |n| {
        let m = n.metrics();
        let values = [m.width(), m.up(), m.down(), m.height()];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            failures.push(format!("{} {m:?}", n.type_name()));
        }
    });
    prop_assert!(failures.is_empty(), "negative metrics: {failures:?}");
    Ok(())
}

/// Formatting the same tree twice yields identical markup.
fn check_format_deterministic(node: &Node) -> Result<(), TestCaseError> {
    let style = StyleConfig::default();
    let width = node.metrics().width();
    let first = node.format(Point::new(0.0, 0.0), width, &style).to_markup();
    let second = node.format(Point::new(0.0, 0.0), width, &style).to_markup();
    prop_assert_eq!(first, second);
    Ok(())
}

fn assert_same_metrics(a: &Node, b: &Node) -> Result<(), TestCaseError> {
    let (ma, mb) = (a.metrics(), b.metrics());
    for (name, x, y) in [
        ("width", ma.width(), mb.width()),
        ("up", ma.up(), mb.up()),
        ("down", ma.down(), mb.down()),
        ("height", ma.height(), mb.height()),
    ] {
        prop_assert!(
            approx_eq!(f64, x, y, epsilon = 1e-9),
            "{name} differs: {x} vs {y}"
        );
    }
    Ok(())
}

/// Nesting a run of spaced items in its own sequence does not change the
/// outer sequence's metrics.
fn check_sequence_flattening(
    a: Vec<Node>,
    b: Vec<Node>,
    c: Vec<Node>,
) -> Result<(), TestCaseError> {
    let flat = rr()
        .sequence(a.iter().chain(&b).chain(&c).cloned())
        .unwrap();

    let head = rr().sequence(a.iter().chain(&b).cloned()).unwrap();
    let left = rr()
        .sequence(std::iter::once(head).chain(c.iter().cloned()))
        .unwrap();

    let tail = rr().sequence(b.iter().chain(&c).cloned()).unwrap();
    let right = rr()
        .sequence(a.iter().cloned().chain(std::iter::once(tail)))
        .unwrap();

    assert_same_metrics(&flat, &left)?;
    assert_same_metrics(&flat, &right)?;
    Ok(())
}

fn collect_rect_spans(element: &Element, spans: &mut Vec<(f64, f64)>) {
    if element.tag() == "rect" {
        let top = element.attr("y").and_then(|v| v.parse::<f64>().ok());
        let height = element.attr("height").and_then(|v| v.parse::<f64>().ok());
        if let (Some(top), Some(height)) = (top, height) {
            spans.push((top, top + height));
        }
    }
    for child in element.children() {
        collect_rect_spans(child, spans);
    }
}

fn rect_spans(root: &Element) -> Vec<(f64, f64)> {
    let mut spans = Vec::new();
    collect_rect_spans(root, &mut spans);
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    spans
}

/// Adjacent choice lanes are at least the vertical separation apart, and
/// every lane stays inside the choice's own extent.
fn check_choice_lane_separation(items: Vec<Node>, normal: usize) -> Result<(), TestCaseError> {
    let style = StyleConfig::default();
    let vs = style.min_vertical_separation();
    let node = rr().choice(normal, items).unwrap();
    let m = node.metrics();
    let element = node.format(Point::new(0.0, 0.0), m.width(), &style);

    let spans = rect_spans(&element);
    for pair in spans.windows(2) {
        let gap = pair[1].0 - pair[0].1;
        prop_assert!(gap >= vs - 1e-9, "lanes {pair:?} only {gap} apart");
    }
    for (top, bottom) in &spans {
        prop_assert!(*top >= -m.up() - 1e-9, "lane top {top} above {}", -m.up());
        prop_assert!(
            *bottom <= m.height() + m.down() + 1e-9,
            "lane bottom {bottom} below {}",
            m.height() + m.down()
        );
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn metrics_are_non_negative(node in node_strategy()) {
        check_metrics_non_negative(&node)?;
    }

    #[test]
    fn format_is_deterministic(node in node_strategy()) {
        check_format_deterministic(&node)?;
    }

    #[test]
    fn sequence_flattening_keeps_metrics(
        a in prop::collection::vec(spaced_leaf_strategy(), 1..3),
        b in prop::collection::vec(spaced_leaf_strategy(), 1..3),
        c in prop::collection::vec(spaced_leaf_strategy(), 1..3),
    ) {
        check_sequence_flattening(a, b, c)?;
    }

    #[test]
    fn choice_lanes_do_not_overlap(
        items in prop::collection::vec(block_strategy(), 1..6),
        normal in any::<prop::sample::Index>(),
    ) {
        let normal = normal.index(items.len());
        check_choice_lane_separation(items, normal)?;
    }
}
