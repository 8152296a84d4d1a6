//! Round trips through definition text.

use float_cmp::approx_eq;
use proptest::prelude::*;

use trestle_core::{Layout, Node, Railroad};
use trestle_parser::{diagram_to_definition, parse_json, parse_yaml, to_definition};

fn rr() -> Railroad {
    Railroad::default()
}

fn leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-zA-Z_<&*]{1,10}".prop_map(|text| rr().terminal(text)),
        "[a-z ]{1,10}".prop_map(|text| rr().non_terminal(text)),
        "[a-z]{0,6}".prop_map(|text| rr().comment(text)),
        Just(rr().skip()),
        (1.0f64..100.0, 0.0f64..30.0, 0.0f64..30.0, 0.0f64..30.0)
            .prop_map(|(width, up, height, down)| rr().block_with(width, up, height, down)),
    ]
}

fn node_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(3, 24, 3, |inner| {
        let items = prop::collection::vec(inner.clone(), 1..4);
        prop_oneof![
            items.clone().prop_map(|items| rr().sequence(items).unwrap()),
            items.clone().prop_map(|items| rr().stack(items).unwrap()),
            items
                .clone()
                .prop_map(|items| rr().horizontal_choice(items).unwrap()),
            (items, any::<prop::sample::Index>()).prop_map(|(items, normal)| {
                let normal = normal.index(items.len());
                rr().choice(normal, items).unwrap()
            }),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| rr().alternating_sequence([a, b]).unwrap()),
            (inner, prop::option::of("[a-z]{1,6}"))
                .prop_map(|(item, label)| rr().group(item, label.as_deref())),
        ]
    })
}

fn check_json_text_round_trip(node: Node) -> Result<(), TestCaseError> {
    let diagram = rr().diagram([node]);
    let text = serde_json::to_string_pretty(&diagram_to_definition(&diagram))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let decoded = parse_json(&text, &rr()).map_err(|err| TestCaseError::fail(err.to_string()))?;

    let (a, b) = (diagram.metrics(), decoded.metrics());
    prop_assert!(approx_eq!(f64, a.width(), b.width(), epsilon = 1e-6));
    prop_assert!(approx_eq!(f64, a.up(), b.up(), epsilon = 1e-6));
    prop_assert!(approx_eq!(f64, a.down(), b.down(), epsilon = 1e-6));
    prop_assert!(approx_eq!(f64, a.height(), b.height(), epsilon = 1e-6));
    prop_assert_eq!(decoded.items().len(), diagram.items().len());
    Ok(())
}

proptest! {
    #[test]
    fn json_text_round_trip_keeps_metrics(node in node_strategy()) {
        check_json_text_round_trip(node)?;
    }
}

#[test]
fn test_yaml_and_json_agree_on_sample() {
    let rr = rr();
    let node = rr
        .sequence([
            rr.terminal("CREATE"),
            rr.optional("TEMPORARY", true).unwrap(),
            rr.terminal("TABLE"),
            rr.non_terminal("table-name"),
        ])
        .unwrap();
    let definition = to_definition(&node);

    let json = serde_json::to_string(&definition).unwrap();
    let yaml = serde_yaml::to_string(&definition).unwrap();

    let from_json = parse_json(&json, &rr).unwrap();
    let from_yaml = parse_yaml(&yaml, &rr).unwrap();
    assert_eq!(from_json.items(), from_yaml.items());
    assert_eq!(from_json.items()[1], node);
}
