use json_template::{parse, JsonValue, JsonValueKind};
use proptest::prelude::*;

fn assert_span_invariants(value: &JsonValue, source: &str) {
    let span = value.span;
    assert_eq!(span.end(), span.start + span.length);
    assert!(span.end() <= source.len());
    assert!(span.start_line >= 1 && span.start_col >= 1);
    assert!(span.end_line >= span.start_line);
    match &value.kind {
        JsonValueKind::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                assert_eq!(item.id, format!("{}[{}]", value.id, i));
                assert_span_invariants(item, source);
            }
        }
        JsonValueKind::Object(object) => {
            for property in object.properties() {
                assert_eq!(property.value.id, format!("{}.{}", value.id, property.name));
                assert_span_invariants(&property.value, source);
            }
        }
        _ => {}
    }
}

fn json_text() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("null".to_string()),
        any::<bool>().prop_map(|b| b.to_string()),
        any::<i32>().prop_map(|n| n.to_string()),
        "[a-z ]{0,8}".prop_map(|s| format!("\"{s}\"")),
        "[a-z]{1,4}".prop_map(|s| format!("\"{{{{ {s} }}}}\"")),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| format!("[{}]", items.join(", "))),
            prop::collection::btree_map("[a-z]{1,5}", inner, 0..4).prop_map(|members| {
                let body: Vec<String> = members
                    .into_iter()
                    .map(|(k, v)| format!("\"{k}\":\n  {v}"))
                    .collect();
                format!("{{{}}}", body.join(",\r\n"))
            }),
        ]
    })
}

proptest! {
    #[test]
    fn generated_documents_parse_with_consistent_ids_and_spans(text in json_text()) {
        let value = parse(&text).unwrap();
        prop_assert_eq!(value.id.as_str(), "$");
        prop_assert_eq!(value.span.start, 0);
        prop_assert_eq!(value.span.end(), text.len());
        assert_span_invariants(&value, &text);
    }

    #[test]
    fn integers_keep_their_value(n in any::<i64>()) {
        let text = n.to_string();
        let value = parse(&text).unwrap();
        let number = value.as_number().unwrap();
        prop_assert_eq!(number.raw.as_str(), text.as_str());
        prop_assert_eq!(number.value, n as f64);
    }

    #[test]
    fn plain_strings_round_trip(s in "[a-zA-Z0-9 .,:;!?-]{0,24}") {
        let value = parse(&format!("\"{s}\"")).unwrap();
        let template = value.as_template().unwrap();
        prop_assert!(!template.has_expressions());
        prop_assert_eq!(template.to_string(), s);
    }

    #[test]
    fn trailing_commas_are_rejected(items in prop::collection::vec(0u8..100, 1..5)) {
        let list: Vec<String> = items.iter().map(|n| n.to_string()).collect();
        let text = format!("[{},]", list.join(","));
        prop_assert!(parse(&text).is_err());
    }
}
