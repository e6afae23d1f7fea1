use avro_core::codec::binary::{BinaryDecoder, BinaryEncoder};
use avro_core::datum::{GenericDatum, GenericRecord};
use avro_core::generic::{GenericReader, GenericWriter};
use avro_core::schema::table::SchemaTable;
use avro_core::Schema;
use std::str::FromStr;

#[test]
fn reader_promotes_a_writer_int_field_to_long() {
    let writer_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [{"name": "n", "type": "int"}]}"#,
    )
    .unwrap();
    let reader_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [{"name": "n", "type": "long"}]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&writer_schema);

    let mut record = GenericRecord::new("R");
    record.put("n", 7i32);
    let datum = GenericDatum::Record(record);

    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table)
        .unwrap();

    let mut expected = GenericRecord::new("R");
    expected.put("n", 7i64);
    assert_eq!(decoded, GenericDatum::Record(expected));
}

#[test]
fn reader_field_absent_from_writer_falls_back_to_default() {
    let writer_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [{"name": "a", "type": "int"}]}"#,
    )
    .unwrap();
    let reader_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [
            {"name": "a", "type": "int"},
            {"name": "b", "type": "string", "default": "unset"}
        ]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&writer_schema);

    let mut record = GenericRecord::new("R");
    record.put("a", 1i32);
    let datum = GenericDatum::Record(record);

    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table)
        .unwrap();

    let mut expected = GenericRecord::new("R");
    expected.put("a", 1i32);
    expected.put("b", "unset");
    assert_eq!(decoded, GenericDatum::Record(expected));
}

#[test]
fn writer_field_absent_from_reader_is_skipped() {
    let writer_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [
            {"name": "a", "type": "int"},
            {"name": "obsolete", "type": "string"}
        ]}"#,
    )
    .unwrap();
    let reader_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [{"name": "a", "type": "int"}]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&writer_schema);

    let mut record = GenericRecord::new("R");
    record.put("a", 9i32);
    record.put("obsolete", "drop me");
    let datum = GenericDatum::Record(record);

    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table)
        .unwrap();

    let mut expected = GenericRecord::new("R");
    expected.put("a", 9i32);
    assert_eq!(decoded, GenericDatum::Record(expected));
}

#[test]
fn reader_field_with_no_default_and_no_writer_counterpart_errors() {
    let writer_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [{"name": "a", "type": "int"}]}"#,
    )
    .unwrap();
    let reader_schema = Schema::from_str(
        r#"{"type": "record", "name": "R", "fields": [
            {"name": "a", "type": "int"},
            {"name": "b", "type": "string"}
        ]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&writer_schema);

    let mut record = GenericRecord::new("R");
    record.put("a", 1i32);
    let datum = GenericDatum::Record(record);

    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let result = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table);
    assert!(result.is_err());
}

#[test]
fn enum_resolves_by_symbol_name_not_ordinal() {
    // the writer's SPADES is ordinal 1, but the reader declares its symbols
    // in a different order, so resolution must look the symbol up by name.
    let writer_schema = Schema::from_str(
        r#"{"type": "enum", "name": "Suit", "symbols": ["HEARTS", "SPADES"]}"#,
    )
    .unwrap();
    let reader_schema = Schema::from_str(
        r#"{"type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS"]}"#,
    )
    .unwrap();
    let table = SchemaTable::build(&writer_schema);

    // writer's symbols are ["HEARTS", "SPADES"], so SPADES is ordinal 1 there.
    let datum = GenericDatum::Enum(1);
    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table)
        .unwrap();
    // reader's symbols are ["SPADES", "HEARTS"], so SPADES is ordinal 0 there.
    assert_eq!(decoded, GenericDatum::Enum(0));
}

#[test]
fn array_items_resolve_with_promotion() {
    let writer_schema = Schema::from_str(r#"{"type": "array", "items": "int"}"#).unwrap();
    let reader_schema = Schema::from_str(r#"{"type": "array", "items": "long"}"#).unwrap();
    let table = SchemaTable::build(&writer_schema);

    let datum = GenericDatum::Array(vec![GenericDatum::Int(1), GenericDatum::Int(2)]);
    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &writer_schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read_with_resolution(&reader_schema, &writer_schema, &table)
        .unwrap();
    assert_eq!(
        decoded,
        GenericDatum::Array(vec![GenericDatum::Long(1), GenericDatum::Long(2)])
    );
}
