use avro_core::codec::binary::{BinaryDecoder, BinaryEncoder};
use avro_core::datum::{GenericDatum, GenericRecord};
use avro_core::generic::{GenericReader, GenericWriter};
use avro_core::schema::table::SchemaTable;
use avro_core::Schema;
use std::str::FromStr;

/// `LongList` refers to itself through its own `next` field, so the second
/// occurrence parses down to a `Schema::Ref` rather than a second inlined
/// definition. Encoding/decoding such a schema only works once the table
/// used during parsing has been reconstructed with `SchemaTable::build`;
/// an empty table has nothing to resolve the ref against.
fn long_list_schema() -> Schema {
    Schema::from_str(
        r#"{
            "type": "record",
            "name": "LongList",
            "fields": [
                {"name": "value", "type": "long"},
                {"name": "next", "type": ["null", "LongList"], "default": null}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn recursive_linked_list_round_trips_through_binary() {
    let schema = long_list_schema();
    let table = SchemaTable::build(&schema);

    let mut tail = GenericRecord::new("LongList");
    tail.put("value", 3i64);
    tail.put("next", GenericDatum::Union(0, Box::new(GenericDatum::Null)));

    let mut middle = GenericRecord::new("LongList");
    middle.put("value", 2i64);
    middle.put(
        "next",
        GenericDatum::Union(1, Box::new(GenericDatum::Record(tail))),
    );

    let mut head = GenericRecord::new("LongList");
    head.put("value", 1i64);
    head.put(
        "next",
        GenericDatum::Union(1, Box::new(GenericDatum::Record(middle))),
    );
    let datum = GenericDatum::Record(head);

    let mut buf = Vec::new();
    GenericWriter::new(BinaryEncoder::new(&mut buf))
        .write(&datum, &schema, &table)
        .unwrap();

    let decoded = GenericReader::new(BinaryDecoder::new(buf.as_slice()))
        .read(&schema, &table)
        .unwrap();
    assert_eq!(decoded, datum);
}

#[test]
fn schema_table_build_registers_the_self_referential_record() {
    let schema = long_list_schema();
    let table = SchemaTable::build(&schema);
    assert!(table.contains("LongList"));
    assert_eq!(table.len(), 1);
}

#[test]
fn an_empty_table_cannot_resolve_the_recursive_reference() {
    let schema = long_list_schema();
    let empty = SchemaTable::new();

    let mut tail = GenericRecord::new("LongList");
    tail.put("value", 1i64);
    tail.put("next", GenericDatum::Union(0, Box::new(GenericDatum::Null)));
    let datum = GenericDatum::Record(tail);

    let mut buf = Vec::new();
    let result = GenericWriter::new(BinaryEncoder::new(&mut buf)).write(&datum, &schema, &empty);
    assert!(result.is_ok());

    let mut head = GenericRecord::new("LongList");
    head.put("value", 2i64);
    head.put(
        "next",
        GenericDatum::Union(1, Box::new(GenericDatum::Record(
            {
                let mut inner = GenericRecord::new("LongList");
                inner.put("value", 1i64);
                inner.put("next", GenericDatum::Union(0, Box::new(GenericDatum::Null)));
                inner
            },
        ))),
    );
    let nested = GenericDatum::Record(head);

    let mut buf = Vec::new();
    let result =
        GenericWriter::new(BinaryEncoder::new(&mut buf)).write(&nested, &schema, &empty);
    assert!(result.is_err());
}
