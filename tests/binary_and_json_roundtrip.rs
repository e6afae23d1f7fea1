use avro_core::codec::binary::{BinaryDecoder, BinaryEncoder};
use avro_core::codec::json::{JsonDecoder, JsonEncoder};
use avro_core::datum::{GenericDatum, GenericRecord};
use avro_core::generic::{GenericReader, GenericWriter};
use avro_core::schema::table::SchemaTable;
use avro_core::Schema;
use std::str::FromStr;

fn encode_binary(datum: &GenericDatum, schema: &Schema, table: &SchemaTable) -> Vec<u8> {
    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(datum, schema, table)
        .unwrap();
    buf
}

fn decode_binary(bytes: &[u8], schema: &Schema, table: &SchemaTable) -> GenericDatum {
    GenericReader::new(BinaryDecoder::new(bytes))
        .read(schema, table)
        .unwrap()
}

fn encode_json(datum: &GenericDatum, schema: &Schema, table: &SchemaTable) -> String {
    let mut buf = Vec::new();
    GenericWriter::new(JsonEncoder::new(&mut buf))
        .write(datum, schema, table)
        .unwrap();
    String::from_utf8(buf).unwrap()
}

fn decode_json(json: &str, schema: &Schema, table: &SchemaTable) -> GenericDatum {
    GenericReader::new(JsonDecoder::new(json.as_bytes()))
        .read(schema, table)
        .unwrap()
}

#[test]
fn single_long_encodes_to_exact_zigzag_bytes() {
    let schema = Schema::from_str(r#""long""#).unwrap();
    let table = SchemaTable::build(&schema);
    let datum = GenericDatum::from(42i64);

    let bytes = encode_binary(&datum, &schema, &table);
    // zigzag(42) = 84, which fits in a single varint byte.
    assert_eq!(bytes, vec![0x54]);
    assert_eq!(decode_binary(&bytes, &schema, &table), datum);

    assert_eq!(encode_json(&datum, &schema, &table), "42");
}

#[test]
fn user_record_round_trips_through_both_encodings() {
    let schema = Schema::from_str(
        r#"{
            "type": "record",
            "name": "User",
            "namespace": "com.example",
            "fields": [
                {"name": "id", "type": "long"},
                {"name": "name", "type": "string"},
                {"name": "email", "type": ["null", "string"], "default": null},
                {"name": "tags", "type": {"type": "array", "items": "string"}}
            ]
        }"#,
    )
    .unwrap();
    let table = SchemaTable::build(&schema);

    let mut record = GenericRecord::new("com.example.User");
    record.put("id", 42i64);
    record.put("name", "Ada");
    record.put(
        "email",
        GenericDatum::Union(1, Box::new(GenericDatum::from("ada@example.com"))),
    );
    record.put("tags", vec!["admin", "staff"]);
    let datum = GenericDatum::Record(record);

    let binary = encode_binary(&datum, &schema, &table);
    assert_eq!(decode_binary(&binary, &schema, &table), datum);

    let json = encode_json(&datum, &schema, &table);
    assert_eq!(decode_json(&json, &schema, &table), datum);
}

#[test]
fn enum_array_map_and_fixed_round_trip() {
    let schema = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Mixed",
            "fields": [
                {"name": "suit", "type": {"type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS", "CLUBS", "DIAMONDS"]}},
                {"name": "scores", "type": {"type": "array", "items": "int"}},
                {"name": "totals", "type": {"type": "map", "values": "long"}},
                {"name": "checksum", "type": {"type": "fixed", "name": "Md5", "size": 4}}
            ]
        }"#,
    )
    .unwrap();
    let table = SchemaTable::build(&schema);

    let mut record = GenericRecord::new("Mixed");
    record.put("suit", GenericDatum::Enum(1));
    record.put("scores", vec![1i32, -2, 3]);
    let mut totals = indexmap::IndexMap::new();
    totals.insert("alice".to_string(), GenericDatum::from(10i64));
    totals.insert("bob".to_string(), GenericDatum::from(-5i64));
    record.put("totals", GenericDatum::Map(totals));
    record.put("checksum", GenericDatum::Fixed(vec![0xde, 0xad, 0xbe, 0xef]));
    let datum = GenericDatum::Record(record);

    let binary = encode_binary(&datum, &schema, &table);
    assert_eq!(decode_binary(&binary, &schema, &table), datum);

    let json = encode_json(&datum, &schema, &table);
    assert_eq!(decode_json(&json, &schema, &table), datum);
}

#[test]
fn empty_collections_and_record_round_trip() {
    let schema = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Empty",
            "fields": [
                {"name": "items", "type": {"type": "array", "items": "int"}},
                {"name": "attrs", "type": {"type": "map", "values": "string"}},
                {"name": "blob", "type": "bytes"},
                {"name": "label", "type": "string"}
            ]
        }"#,
    )
    .unwrap();
    let table = SchemaTable::build(&schema);

    let mut record = GenericRecord::new("Empty");
    record.put("items", GenericDatum::Array(vec![]));
    record.put("attrs", GenericDatum::Map(indexmap::IndexMap::new()));
    record.put("blob", GenericDatum::Bytes(vec![]));
    record.put("label", "");
    let datum = GenericDatum::Record(record);

    let binary = encode_binary(&datum, &schema, &table);
    // an empty array/map is just its zero-length block terminator.
    assert!(binary.len() < 10);
    assert_eq!(decode_binary(&binary, &schema, &table), datum);

    let json = encode_json(&datum, &schema, &table);
    assert_eq!(decode_json(&json, &schema, &table), datum);
}

#[test]
fn nested_union_inside_array_inside_record_round_trips() {
    let schema = Schema::from_str(
        r#"{
            "type": "record",
            "name": "Sparse",
            "fields": [
                {"name": "values", "type": {"type": "array", "items": ["null", "int"]}}
            ]
        }"#,
    )
    .unwrap();
    let table = SchemaTable::build(&schema);

    let mut record = GenericRecord::new("Sparse");
    record.put(
        "values",
        GenericDatum::Array(vec![
            GenericDatum::Union(1, Box::new(GenericDatum::Int(7))),
            GenericDatum::Union(0, Box::new(GenericDatum::Null)),
            GenericDatum::Union(1, Box::new(GenericDatum::Int(-3))),
        ]),
    );
    let datum = GenericDatum::Record(record);

    let binary = encode_binary(&datum, &schema, &table);
    assert_eq!(decode_binary(&binary, &schema, &table), datum);

    let json = encode_json(&datum, &schema, &table);
    assert_eq!(json, r#"{"values":[{"int":7},null,{"int":-3}]}"#);
    assert_eq!(decode_json(&json, &schema, &table), datum);
}

#[test]
fn non_finite_floats_round_trip_through_json_barewords() {
    let schema = Schema::from_str(r#""double""#).unwrap();
    let table = SchemaTable::build(&schema);

    let infinity = GenericDatum::from(f64::INFINITY);
    let json = encode_json(&infinity, &schema, &table);
    assert_eq!(json, "Infinity");
    assert_eq!(decode_json(&json, &schema, &table), infinity);

    let neg_infinity = GenericDatum::from(f64::NEG_INFINITY);
    let json = encode_json(&neg_infinity, &schema, &table);
    assert_eq!(json, "-Infinity");
    assert_eq!(decode_json(&json, &schema, &table), neg_infinity);

    let nan = GenericDatum::from(f64::NAN);
    let json = encode_json(&nan, &schema, &table);
    assert_eq!(json, "NaN");
    match decode_json(&json, &schema, &table) {
        GenericDatum::Double(d) => assert!(d.is_nan()),
        other => panic!("expected a double, got {:?}", other),
    }
}

#[test]
fn signed_int_and_long_extremes_round_trip() {
    let schema = Schema::from_str(
        r#"{"type": "record", "name": "Bounds", "fields": [
            {"name": "i", "type": "int"},
            {"name": "l", "type": "long"}
        ]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&schema);

    for (i, l) in [(i32::MIN, i64::MIN), (i32::MAX, i64::MAX), (0, 0)] {
        let mut record = GenericRecord::new("Bounds");
        record.put("i", i);
        record.put("l", l);
        let datum = GenericDatum::Record(record);

        let binary = encode_binary(&datum, &schema, &table);
        assert_eq!(decode_binary(&binary, &schema, &table), datum);

        let json = encode_json(&datum, &schema, &table);
        assert_eq!(decode_json(&json, &schema, &table), datum);
    }
}
