use super::*;
use serde_json::json;
use std::str::FromStr;

fn user_schema() -> &'static str {
    r#"{
        "type": "record",
        "name": "User",
        "fields": [
            {"name": "name", "type": "string"},
            {"name": "age", "type": "int", "default": 0}
        ]
    }"#
}

#[test]
fn parses_simple_record() {
    let schema = Schema::from_str(user_schema()).unwrap();
    let record = schema.as_record().unwrap();
    assert_eq!(record.name.fullname(), "User");
    assert_eq!(record.fields.len(), 2);
    assert_eq!(record.fields[0].name(), "name");
    assert_eq!(record.fields[1].default().unwrap().as_i64(), Some(0));
}

#[test]
fn duplicate_field_name_rejected() {
    let bad = r#"{
        "type": "record",
        "name": "Bad",
        "fields": [
            {"name": "a", "type": "int"},
            {"name": "a", "type": "string"}
        ]
    }"#;
    let err = Schema::from_str(bad).unwrap_err();
    assert!(matches!(err, AvrowErr::DuplicateField(_)));
}

#[test]
fn invalid_default_value_is_rejected() {
    let bad = r#"{"name": "x", "type": "int", "default": "not a number"}"#;
    let json: JsonValue = serde_json::from_str(bad).unwrap();
    let field = json!({
        "type": "record",
        "name": "Holder",
        "fields": [json]
    });
    let err = Schema::from_str(&field.to_string()).unwrap_err();
    match err {
        AvrowErr::InvalidDefaultValue { field, .. } => assert_eq!(field, "x"),
        other => panic!("expected InvalidDefaultValue, got {:?}", other),
    }
}

#[test]
fn duplicate_union_branches_rejected() {
    let err = Schema::from_str(r#"["string", "string"]"#).unwrap_err();
    assert!(matches!(err, AvrowErr::DuplicateUnionBranch(_)));
}

#[test]
fn nested_union_rejected() {
    let err = Schema::from_str(r#"["null", ["int", "string"]]"#).unwrap_err();
    assert!(matches!(err, AvrowErr::NestedUnion));
}

#[test]
fn recursive_record_resolves_self_reference() {
    let linked_list = r#"{
        "type": "record",
        "name": "LongList",
        "fields": [
            {"name": "value", "type": "long"},
            {"name": "next", "type": ["null", "LongList"], "default": null}
        ]
    }"#;
    let schema = Schema::from_str(linked_list).unwrap();
    let record = schema.as_record().unwrap();
    let next = record.fields[1].schema().as_union().unwrap();
    assert!(matches!(next.branches[0], Schema::Null));
    assert!(matches!(next.branches[1], Schema::Ref(_)));
}

#[test]
fn enum_with_invalid_default_is_rejected() {
    let bad = r#"{
        "type": "enum",
        "name": "Suit",
        "symbols": ["SPADES", "HEARTS"],
        "default": "CLUBS"
    }"#;
    let err = Schema::from_str(bad).unwrap_err();
    assert!(matches!(err, AvrowErr::EnumDefaultNotInSymbols(_)));
}

#[test]
fn fixed_schema_parses_size() {
    let schema = Schema::from_str(r#"{"type": "fixed", "name": "Md5", "size": 16}"#).unwrap();
    assert_eq!(schema.as_fixed().unwrap().size, 16);
}

#[test]
fn unknown_attributes_round_trip_through_canonical_emission() {
    let with_attr = r#"{
        "type": "record",
        "name": "Annotated",
        "custom": "hi",
        "fields": [{"name": "a", "type": "int"}]
    }"#;
    let schema = Schema::from_str(with_attr).unwrap();
    let emitted = schema.to_string();
    let reparsed: JsonValue = serde_json::from_str(&emitted).unwrap();
    assert_eq!(reparsed.get("custom").unwrap(), "hi");
}

#[test]
fn namespace_omitted_when_matching_enclosing_default() {
    let schema = Schema::from_str(
        r#"{"type": "record", "name": "Inner", "namespace": "org.example", "fields": []}"#,
    )
    .unwrap();
    let mut table = SchemaTable::new();
    let emitted = canonical::emit(&schema, &mut table, Some("org.example"));
    assert!(emitted.get("namespace").is_none());
}

#[test]
fn second_occurrence_of_named_schema_emits_reference_only() {
    let schema = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Pair",
            "fields": [
                {"name": "first", "type": {"type": "fixed", "name": "Md5", "size": 16}},
                {"name": "second", "type": "Md5"}
            ]
        }"#,
    )
    .unwrap();
    let emitted = schema.to_string();
    let json: JsonValue = serde_json::from_str(&emitted).unwrap();
    let fields = json.get("fields").unwrap().as_array().unwrap();
    assert_eq!(fields[1].get("type").unwrap(), "Md5");
}
