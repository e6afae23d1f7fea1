//! Re-emits a [`Schema`] as JSON, inlining a named schema's full definition
//! the first time it is reached and referencing it by name on every later
//! occurrence — the mirror image of how [`crate::schema::parser`] reads a
//! schema document in.

use crate::schema::field::Order;
use crate::schema::name::Name;
use crate::schema::table::SchemaTable;
use crate::schema::Schema;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashSet;

/// Emits `schema` as canonical JSON. `table` tracks which named schemas
/// have already been inlined during this call so later occurrences emit a
/// bare name reference instead of repeating the definition; pass a fresh
/// [`SchemaTable`] for a standalone emission.
pub(crate) fn emit(schema: &Schema, table: &mut SchemaTable, enclosing_namespace: Option<&str>) -> JsonValue {
    match schema {
        Schema::Null => JsonValue::String("null".into()),
        Schema::Boolean => JsonValue::String("boolean".into()),
        Schema::Int => JsonValue::String("int".into()),
        Schema::Long => JsonValue::String("long".into()),
        Schema::Float => JsonValue::String("float".into()),
        Schema::Double => JsonValue::String("double".into()),
        Schema::Bytes => JsonValue::String("bytes".into()),
        Schema::String => JsonValue::String("string".into()),
        Schema::Array(a) => {
            let mut obj = JsonMap::new();
            obj.insert("type".into(), JsonValue::String("array".into()));
            obj.insert("items".into(), emit(&a.items, table, enclosing_namespace));
            append_attrs(&mut obj, a.attributes.iter());
            JsonValue::Object(obj)
        }
        Schema::Map(m) => {
            let mut obj = JsonMap::new();
            obj.insert("type".into(), JsonValue::String("map".into()));
            obj.insert("values".into(), emit(&m.values, table, enclosing_namespace));
            append_attrs(&mut obj, m.attributes.iter());
            JsonValue::Object(obj)
        }
        Schema::Union(u) => JsonValue::Array(
            u.branches
                .iter()
                .map(|b| emit(b, table, enclosing_namespace))
                .collect(),
        ),
        Schema::Record(r) => {
            if table.contains(&r.name.fullname()) {
                return name_reference(&r.name, enclosing_namespace);
            }
            table.insert(r.name.fullname(), Schema::Ref(r.name.clone()));
            let child_namespace = r.name.namespace();

            let mut obj = JsonMap::new();
            obj.insert(
                "type".into(),
                JsonValue::String(if r.is_error { "error" } else { "record" }.into()),
            );
            name_header(&r.name, enclosing_namespace, &mut obj);
            if let Some(doc) = &r.doc {
                obj.insert("doc".into(), JsonValue::String(doc.clone()));
            }
            let fields = r
                .fields
                .iter()
                .map(|f| {
                    let mut fobj = JsonMap::new();
                    fobj.insert("name".into(), JsonValue::String(f.name().to_string()));
                    fobj.insert("type".into(), emit(f.schema(), table, child_namespace));
                    if let Some(doc) = f.doc() {
                        fobj.insert("doc".into(), JsonValue::String(doc.to_string()));
                    }
                    if let Some(default) = f.default() {
                        fobj.insert("default".into(), default.clone());
                    }
                    if f.order() != Order::Ascending {
                        fobj.insert(
                            "order".into(),
                            JsonValue::String(
                                match f.order() {
                                    Order::Ascending => "ascending",
                                    Order::Descending => "descending",
                                    Order::Ignore => "ignore",
                                }
                                .into(),
                            ),
                        );
                    }
                    if !f.aliases().is_empty() {
                        fobj.insert("aliases".into(), string_array(f.aliases()));
                    }
                    append_attrs(&mut fobj, f.attributes().iter());
                    JsonValue::Object(fobj)
                })
                .collect();
            obj.insert("fields".into(), JsonValue::Array(fields));
            if !r.aliases.is_empty() {
                obj.insert("aliases".into(), string_array(&r.aliases));
            }
            if let Some(lt) = &r.logical_type {
                obj.insert("logicalType".into(), JsonValue::String(lt.clone()));
            }
            append_attrs(&mut obj, r.attributes.iter());
            JsonValue::Object(obj)
        }
        Schema::Enum(e) => {
            if table.contains(&e.name.fullname()) {
                return name_reference(&e.name, enclosing_namespace);
            }
            table.insert(e.name.fullname(), Schema::Ref(e.name.clone()));

            let mut obj = JsonMap::new();
            obj.insert("type".into(), JsonValue::String("enum".into()));
            name_header(&e.name, enclosing_namespace, &mut obj);
            if let Some(doc) = &e.doc {
                obj.insert("doc".into(), JsonValue::String(doc.clone()));
            }
            obj.insert(
                "symbols".into(),
                JsonValue::Array(e.symbols.iter().cloned().map(JsonValue::String).collect()),
            );
            if let Some(default) = &e.default {
                obj.insert("default".into(), JsonValue::String(default.clone()));
            }
            if !e.aliases.is_empty() {
                obj.insert("aliases".into(), string_array(&e.aliases));
            }
            if let Some(lt) = &e.logical_type {
                obj.insert("logicalType".into(), JsonValue::String(lt.clone()));
            }
            append_attrs(&mut obj, e.attributes.iter());
            JsonValue::Object(obj)
        }
        Schema::Fixed(fx) => {
            if table.contains(&fx.name.fullname()) {
                return name_reference(&fx.name, enclosing_namespace);
            }
            table.insert(fx.name.fullname(), Schema::Ref(fx.name.clone()));

            let mut obj = JsonMap::new();
            obj.insert("type".into(), JsonValue::String("fixed".into()));
            name_header(&fx.name, enclosing_namespace, &mut obj);
            if let Some(doc) = &fx.doc {
                obj.insert("doc".into(), JsonValue::String(doc.clone()));
            }
            obj.insert("size".into(), JsonValue::Number(fx.size.into()));
            if !fx.aliases.is_empty() {
                obj.insert("aliases".into(), string_array(&fx.aliases));
            }
            if let Some(lt) = &fx.logical_type {
                obj.insert("logicalType".into(), JsonValue::String(lt.clone()));
            }
            append_attrs(&mut obj, fx.attributes.iter());
            JsonValue::Object(obj)
        }
        Schema::Ref(name) => name_reference(name, enclosing_namespace),
    }
}

fn name_header(name: &Name, enclosing_namespace: Option<&str>, obj: &mut JsonMap<String, JsonValue>) {
    obj.insert("name".into(), JsonValue::String(name.local_name().to_string()));
    if name.namespace() != enclosing_namespace {
        obj.insert(
            "namespace".into(),
            JsonValue::String(name.namespace().unwrap_or("").to_string()),
        );
    }
}

fn name_reference(name: &Name, enclosing_namespace: Option<&str>) -> JsonValue {
    if name.namespace() == enclosing_namespace {
        JsonValue::String(name.local_name().to_string())
    } else {
        JsonValue::String(name.fullname())
    }
}

fn string_array(items: &[String]) -> JsonValue {
    JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
}

fn append_attrs<'a>(obj: &mut JsonMap<String, JsonValue>, attrs: impl Iterator<Item = (&'a str, &'a JsonValue)>) {
    for (k, v) in attrs {
        obj.insert(k.to_string(), v.clone());
    }
}

/// Builds the Avro Parsing Canonical Form of `schema`: names are fully
/// qualified, only the handful of attributes that affect parsing survive
/// (`name`, `type`, `fields`, `symbols`, `items`, `values`, `size`), they
/// appear in that fixed order, and there is no insignificant whitespace.
/// This is a stricter, narrower sibling of [`emit`] — `emit` round-trips
/// everything (docs, defaults, aliases, unknown attributes) for display and
/// re-parsing; this form exists only to feed [`rabin_fingerprint`].
pub(crate) fn parsing_canonical_form(schema: &Schema) -> String {
    let mut seen = HashSet::new();
    pcf(schema, &mut seen)
}

fn pcf(schema: &Schema, seen: &mut HashSet<String>) -> String {
    match schema {
        Schema::Null => "\"null\"".to_string(),
        Schema::Boolean => "\"boolean\"".to_string(),
        Schema::Int => "\"int\"".to_string(),
        Schema::Long => "\"long\"".to_string(),
        Schema::Float => "\"float\"".to_string(),
        Schema::Double => "\"double\"".to_string(),
        Schema::Bytes => "\"bytes\"".to_string(),
        Schema::String => "\"string\"".to_string(),
        Schema::Array(a) => format!(r#"{{"type":"array","items":{}}}"#, pcf(&a.items, seen)),
        Schema::Map(m) => format!(r#"{{"type":"map","values":{}}}"#, pcf(&m.values, seen)),
        Schema::Union(u) => {
            let branches: Vec<String> = u.branches.iter().map(|b| pcf(b, seen)).collect();
            format!("[{}]", branches.join(","))
        }
        Schema::Record(r) => {
            let fullname = r.name.fullname();
            if !seen.insert(fullname.clone()) {
                return format!("\"{}\"", fullname);
            }
            let fields: Vec<String> = r
                .fields
                .iter()
                .map(|f| format!(r#"{{"name":"{}","type":{}}}"#, f.name(), pcf(f.schema(), seen)))
                .collect();
            format!(
                r#"{{"name":"{}","type":"record","fields":[{}]}}"#,
                fullname,
                fields.join(",")
            )
        }
        Schema::Enum(e) => {
            let fullname = e.name.fullname();
            if !seen.insert(fullname.clone()) {
                return format!("\"{}\"", fullname);
            }
            let symbols: Vec<String> = e.symbols.iter().map(|s| format!("\"{}\"", s)).collect();
            format!(
                r#"{{"name":"{}","type":"enum","symbols":[{}]}}"#,
                fullname,
                symbols.join(",")
            )
        }
        Schema::Fixed(fx) => {
            let fullname = fx.name.fullname();
            if !seen.insert(fullname.clone()) {
                return format!("\"{}\"", fullname);
            }
            format!(r#"{{"name":"{}","type":"fixed","size":{}}}"#, fullname, fx.size)
        }
        Schema::Ref(name) => format!("\"{}\"", name.fullname()),
    }
}

// The CRC-64-AVRO polynomial's zero-length-input fingerprint, and also the
// initial state the Rabin computation starts from.
const EMPTY: u64 = 0xc15d_213a_a4d7_a795;

fn fingerprint_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        let mut fp = i as u64;
        for _ in 0..8 {
            let mask = 0u64.wrapping_sub(fp & 1);
            fp = (fp >> 1) ^ (EMPTY & mask);
        }
        *slot = fp;
    }
    table
}

/// Computes the schema's 64-bit Rabin fingerprint (Avro's default
/// `CRC-64-AVRO` fingerprinting algorithm) over its Parsing Canonical Form.
pub(crate) fn rabin_fingerprint(schema: &Schema) -> u64 {
    let table = fingerprint_table();
    let pcf = parsing_canonical_form(schema);
    let mut fp = EMPTY;
    for byte in pcf.as_bytes() {
        let idx = ((fp ^ *byte as u64) & 0xff) as usize;
        fp = (fp >> 8) ^ table[idx];
    }
    fp
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn fingerprint_is_stable_across_calls() {
        let schema = Schema::from_str(r#""long""#).unwrap();
        assert_eq!(schema.fingerprint(), schema.fingerprint());
    }

    #[test]
    fn fingerprint_differs_between_distinct_schemas() {
        let a = Schema::from_str(r#""long""#).unwrap();
        let b = Schema::from_str(r#""int""#).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_doc_and_default_attributes() {
        let without_doc = Schema::from_str(
            r#"{"type": "record", "name": "R", "fields": [{"name": "a", "type": "int"}]}"#,
        )
        .unwrap();
        let with_doc = Schema::from_str(
            r#"{"type": "record", "name": "R", "doc": "a record", "fields": [
                {"name": "a", "type": "int", "doc": "a field", "default": 0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(without_doc.fingerprint(), with_doc.fingerprint());
    }

    #[test]
    fn fingerprint_is_sensitive_to_field_order() {
        let first = Schema::from_str(
            r#"{"type": "record", "name": "R", "fields": [
                {"name": "a", "type": "int"}, {"name": "b", "type": "int"}
            ]}"#,
        )
        .unwrap();
        let second = Schema::from_str(
            r#"{"type": "record", "name": "R", "fields": [
                {"name": "b", "type": "int"}, {"name": "a", "type": "int"}
            ]}"#,
        )
        .unwrap();
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn parsing_canonical_form_uses_fullnames_and_strips_docs() {
        let schema = Schema::from_str(
            r#"{"type": "record", "name": "Rec", "namespace": "ns", "doc": "ignored", "fields": []}"#,
        )
        .unwrap();
        assert_eq!(
            parsing_canonical_form(&schema),
            r#"{"name":"ns.Rec","type":"record","fields":[]}"#
        );
    }
}
