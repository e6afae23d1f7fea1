//! Schema resolution: decoding data written with one schema into a datum
//! shaped by a different (but compatible) schema. This is an explicit
//! opt-in path reached only through [`crate::generic::GenericReader::read_with_resolution`];
//! [`crate::generic::GenericReader::read`] (the default) assumes reader and
//! writer schema are the same and never consults this module.

use crate::codec::Decoder;
use crate::datum::{union_branch_tag, GenericDatum, GenericRecord};
use crate::error::{AvrowErr, AvrowResult};
use crate::schema::table::SchemaTable;
use crate::schema::Schema;
use indexmap::IndexMap;

/// Decodes a value written with `writer_schema`, producing a datum shaped
/// like `reader_schema`, applying the same numeric/string promotions
/// [`GenericDatum::encode`]/[`GenericDatum::decode`] apply plus the
/// record/enum/union resolution rules from the Avro specification: fields
/// are matched by name, a writer field absent from the reader is decoded
/// and discarded, a reader field absent from the writer falls back to its
/// declared default (or fails if it has none).
pub(crate) fn decode_with_resolution<D: Decoder>(
    reader_schema: &Schema,
    writer_schema: &Schema,
    table: &SchemaTable,
    dec: &mut D,
) -> AvrowResult<GenericDatum> {
    let r = reader_schema.resolve(table)?;
    let w = writer_schema.resolve(table)?;
    match (w, r) {
        (Schema::Null, Schema::Null) => {
            dec.read_null()?;
            Ok(GenericDatum::Null)
        }
        (Schema::Boolean, Schema::Boolean) => Ok(GenericDatum::Boolean(dec.read_boolean()?)),
        (Schema::Int, Schema::Int) => Ok(GenericDatum::Int(dec.read_int()?)),
        (Schema::Int, Schema::Long) => Ok(GenericDatum::Long(dec.read_int()? as i64)),
        (Schema::Int, Schema::Float) => Ok(GenericDatum::Float(dec.read_int()? as f32)),
        (Schema::Int, Schema::Double) => Ok(GenericDatum::Double(dec.read_int()? as f64)),
        (Schema::Long, Schema::Long) => Ok(GenericDatum::Long(dec.read_long()?)),
        (Schema::Long, Schema::Float) => Ok(GenericDatum::Float(dec.read_long()? as f32)),
        (Schema::Long, Schema::Double) => Ok(GenericDatum::Double(dec.read_long()? as f64)),
        (Schema::Float, Schema::Float) => Ok(GenericDatum::Float(dec.read_float()?)),
        (Schema::Float, Schema::Double) => Ok(GenericDatum::Double(dec.read_float()? as f64)),
        (Schema::Double, Schema::Double) => Ok(GenericDatum::Double(dec.read_double()?)),
        (Schema::Bytes, Schema::Bytes) => Ok(GenericDatum::Bytes(dec.read_bytes()?)),
        (Schema::Bytes, Schema::String) => {
            let bytes = dec.read_bytes()?;
            String::from_utf8(bytes)
                .map(GenericDatum::String)
                .map_err(|_| AvrowErr::InvalidUtf8)
        }
        (Schema::String, Schema::String) => Ok(GenericDatum::String(dec.read_string()?)),
        (Schema::String, Schema::Bytes) => Ok(GenericDatum::Bytes(dec.read_string()?.into_bytes())),
        (Schema::Fixed(w_fixed), Schema::Fixed(r_fixed)) => {
            if w_fixed.name != r_fixed.name || w_fixed.size != r_fixed.size {
                return Err(AvrowErr::FixedSchemaMismatch);
            }
            Ok(GenericDatum::Fixed(dec.read_fixed(r_fixed.size)?))
        }
        (Schema::Enum(w_enum), Schema::Enum(r_enum)) => {
            if w_enum.name != r_enum.name {
                return Err(AvrowErr::EnumNameMismatch);
            }
            let idx = dec.read_enum(&w_enum.symbols)?;
            let symbol = &w_enum.symbols[idx];
            let r_idx = r_enum.symbols.iter().position(|s| s == symbol).ok_or_else(|| {
                AvrowErr::SchemaDataMismatch(format!(
                    "writer symbol `{}` not present in reader's enum",
                    symbol
                ))
            })?;
            Ok(GenericDatum::Enum(r_idx))
        }
        (Schema::Array(w_arr), Schema::Array(r_arr)) => {
            let mut items = Vec::new();
            let mut count = dec.read_array_block()?;
            while count != 0 {
                for _ in 0..count {
                    items.push(decode_with_resolution(&r_arr.items, &w_arr.items, table, dec)?);
                }
                count = dec.read_array_block()?;
            }
            dec.read_array_end()?;
            Ok(GenericDatum::Array(items))
        }
        (Schema::Map(w_map), Schema::Map(r_map)) => {
            let mut entries = IndexMap::new();
            let mut count = dec.read_map_block()?;
            while count != 0 {
                for _ in 0..count {
                    let key = dec.read_map_key()?;
                    let value = decode_with_resolution(&r_map.values, &w_map.values, table, dec)?;
                    entries.insert(key, value);
                }
                count = dec.read_map_block()?;
            }
            dec.read_map_end()?;
            Ok(GenericDatum::Map(entries))
        }
        (Schema::Record(w_rec), Schema::Record(r_rec)) => {
            if w_rec.name.fullname() != r_rec.name.fullname() {
                return Err(AvrowErr::RecordNameMismatch);
            }
            dec.read_record_start()?;
            let mut record = GenericRecord::new(r_rec.name.fullname());
            for w_field in &w_rec.fields {
                dec.read_record_field(&w_field.name)?;
                match r_rec.fields.iter().find(|f| f.name == w_field.name) {
                    Some(r_field) => {
                        let value =
                            decode_with_resolution(&r_field.schema, &w_field.schema, table, dec)?;
                        record.put(&w_field.name, value);
                    }
                    None => {
                        // writer's field has no counterpart in the reader: decode to
                        // advance the stream and discard the value.
                        GenericDatum::decode(&w_field.schema, table, dec)?;
                    }
                }
            }
            dec.read_record_end()?;
            for r_field in &r_rec.fields {
                if w_rec.fields.iter().any(|f| f.name == r_field.name) {
                    continue;
                }
                match &r_field.default {
                    Some(default) => {
                        let value = GenericDatum::from_default_json(default, &r_field.schema, table)?;
                        record.put(&r_field.name, value);
                    }
                    None => return Err(AvrowErr::FieldNotFound(r_field.name.clone())),
                }
            }
            Ok(GenericDatum::Record(record))
        }
        (Schema::Union(w_union), Schema::Union(r_union)) => {
            let branch_names: Vec<String> =
                w_union.branches.iter().map(|b| union_branch_tag(b, table)).collect();
            let idx = dec.read_union_branch(&branch_names)?;
            let writer_branch = &w_union.branches[idx];
            let r_idx = r_union
                .branches
                .iter()
                .position(|b| schema_matches(b, writer_branch))
                .ok_or(AvrowErr::UnionSchemaMismatch)?;
            let reader_branch = &r_union.branches[r_idx];
            let value = decode_with_resolution(reader_branch, writer_branch, table, dec)?;
            dec.read_union_end()?;
            Ok(GenericDatum::Union(r_idx, Box::new(value)))
        }
        // reader is a union but writer is not: the first reader branch that
        // matches the writer's schema is resolved against it.
        (non_union_writer, Schema::Union(r_union)) => {
            let r_idx = r_union
                .branches
                .iter()
                .position(|b| schema_matches(b, non_union_writer))
                .ok_or(AvrowErr::WriterNotInReader)?;
            let reader_branch = &r_union.branches[r_idx];
            let value = decode_with_resolution(reader_branch, non_union_writer, table, dec)?;
            Ok(GenericDatum::Union(r_idx, Box::new(value)))
        }
        // writer is a union but reader is not: the selected writer branch
        // must match the reader's schema.
        (Schema::Union(w_union), non_union_reader) => {
            let branch_names: Vec<String> =
                w_union.branches.iter().map(|b| union_branch_tag(b, table)).collect();
            let idx = dec.read_union_branch(&branch_names)?;
            let writer_branch = &w_union.branches[idx];
            if !schema_matches(non_union_reader, writer_branch) {
                return Err(AvrowErr::SchemaResolutionFailed(
                    format!("{:?}", non_union_reader),
                    format!("{:?}", writer_branch),
                ));
            }
            let value = decode_with_resolution(non_union_reader, writer_branch, table, dec)?;
            dec.read_union_end()?;
            Ok(value)
        }
        (writer, reader) => Err(AvrowErr::SchemaResolutionFailed(
            format!("{:?}", reader),
            format!("{:?}", writer),
        )),
    }
}

fn schema_matches(a: &Schema, b: &Schema) -> bool {
    a == b
}
