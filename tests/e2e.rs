use json_data_filter as jdf;
use jdf::{FilterOptions, FilterSpec, Mode};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_nested_exact_match() {
    let data = vec![json!({"a": {"b": 5}})];
    let filters = vec![FilterSpec::new("exact-match", "a.b", 5)];
    let out = jdf::filter_data(&data, &filters, FilterOptions::default()).unwrap();
    assert_eq!(out, vec![json!({"a": {"b": 5}})]);
}

#[test]
fn test_list_index_in_path() {
    let data = vec![json!({"a": [1, 2, 3]})];
    let filters = vec![FilterSpec::new("match", "a.[1]", 2)];
    let out = jdf::filter_data(&data, &filters, FilterOptions::default()).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_replace_field() {
    let data = json!([{"name": "hello world"}]);
    let filters = json!([{"type": "replace", "field": "name", "value": "world", "replace": "there"}]);
    let out = jdf::filter_value(&data, &filters, FilterOptions::default()).unwrap();
    assert_eq!(out, vec![json!({"name": "hello there"})]);
}

#[test]
fn test_compound_with_missing_field() {
    let data = vec![json!({"a": 1})];
    let filters = vec![
        FilterSpec::new("match", "a", 1),
        FilterSpec::new("match", "missing.field", 1),
    ];
    let out = jdf::filter_data(&data, &filters, FilterOptions::default()).unwrap();
    assert!(out.is_empty());

    let loose = FilterOptions::default().with_compound(false);
    assert_eq!(jdf::filter_data(&data, &filters, loose).unwrap(), data);
}

#[test]
fn test_departments_filtered_from_json() {
    let data: serde_json::Value = serde_json::from_str(
        r#"[
            {"team": [{"name": "Alice Johnson", "info": {"email": "alice.johnson@example.com"}}]},
            {"team": [{"name": "Carol Lee", "info": {"email": "carol.lee@corp.example"}}]},
            {"team": []}
        ]"#,
    )
    .unwrap();
    let filters = json!({"type": "re-search", "field": "team.[0].info.email", "value": r"@example\.com$"});

    let kept = jdf::filter_value(&data, &filters, FilterOptions::default()).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["team"][0]["name"], json!("Alice Johnson"));

    let opts = FilterOptions::default().with_mode(Mode::Exclusive);
    let dropped = jdf::filter_value(&data, &filters, opts).unwrap();
    assert_eq!(dropped.len(), 2);
    assert_eq!(dropped[1], json!({"team": []}));
}

#[test]
fn test_descriptive_kind_aliases() {
    let data = vec![json!({"s": "abc", "l": ["x"]})];
    for spec in [
        FilterSpec::new("substring-contains", "s", "b"),
        FilterSpec::new("regex-match", "s", "ab"),
        FilterSpec::new("regex-search", "s", "c$"),
        FilterSpec::new("in", "l", "x"),
    ] {
        let out = jdf::filter_data(&data, &[spec.clone()], FilterOptions::default()).unwrap();
        assert_eq!(out.len(), 1, "{spec:?}");
    }
}

#[test]
fn test_oversized_index_is_a_non_match() {
    let data = vec![json!({"a": [1, 2, 3]})];
    let filters = vec![FilterSpec::new("match", "a.[99999999999999999999999]", 1)];
    let kept = jdf::filter_data(&data, &filters, FilterOptions::default()).unwrap();
    assert!(kept.is_empty());

    let opts = FilterOptions::default().with_mode(Mode::Exclusive);
    assert_eq!(jdf::filter_data(&data, &filters, opts).unwrap(), data);
}
