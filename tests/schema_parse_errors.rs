use avro_core::AvrowErr;
use avro_core::Schema;
use std::str::FromStr;

#[test]
fn duplicate_union_branch_fullnames_are_rejected() {
    let err = Schema::from_str(r#"["int", "int"]"#).unwrap_err();
    assert!(matches!(err, AvrowErr::DuplicateUnionBranch(ref name) if name == "int"));
}

#[test]
fn immediately_nested_unions_are_rejected() {
    let err = Schema::from_str(r#"[["null", "string"], "int"]"#).unwrap_err();
    assert!(matches!(err, AvrowErr::NestedUnion));
}

#[test]
fn a_default_value_that_does_not_match_its_field_type_is_rejected() {
    let err = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Bad",
            "fields": [
                {"name": "count", "type": "int", "default": "not a number"}
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, AvrowErr::InvalidDefaultValue { field, .. } if field == "count"));
}

#[test]
fn an_enum_default_symbol_must_be_among_its_symbols() {
    let err = Schema::from_str(
        r#"{"type": "enum", "name": "Suit", "symbols": ["HEARTS", "SPADES"], "default": "CLUBS"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, AvrowErr::EnumDefaultNotInSymbols(ref sym) if sym == "CLUBS"));
}

#[test]
fn duplicate_field_names_within_a_record_are_rejected() {
    let err = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Dup",
            "fields": [
                {"name": "a", "type": "int"},
                {"name": "a", "type": "string"}
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, AvrowErr::DuplicateField(ref name) if name == "a"));
}

#[test]
fn a_reference_to_an_undefined_named_schema_is_rejected() {
    let err = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Orphan",
            "fields": [
                {"name": "x", "type": "DoesNotExist"}
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, AvrowErr::NamedSchemaNotYetDefined(ref name) if name == "DoesNotExist"));
}

#[test]
fn valid_schema_json_round_trips_through_parse_and_display() {
    let original = r#"{
        "type": "record",
        "name": "Point",
        "namespace": "geo",
        "fields": [
            {"name": "x", "type": "double"},
            {"name": "y", "type": "double"}
        ]
    }"#;
    let schema = Schema::from_str(original).unwrap();
    let emitted = schema.to_string();

    let reparsed = Schema::from_str(&emitted).unwrap();
    assert_eq!(schema, reparsed);
}
