//! Parses Avro schema JSON into a [`Schema`] tree, and validates field
//! default values against their declared schema.
//!
//! Named schemas are registered into the [`SchemaTable`] as soon as their
//! name is known (before their children are parsed), which is what lets a
//! record field refer back to its own enclosing record: the lookup that
//! resolves such a reference finds the placeholder this module planted a
//! moment earlier. A name may only be referenced after it has been
//! registered in this way, so forward references are limited to a named
//! schema's own descendants.

use crate::error::AvrowErr;
use crate::schema::field::{Field, Order};
use crate::schema::name::{Name, Type};
use crate::schema::table::SchemaTable;
use crate::schema::{ArraySchema, EnumSchema, FixedSchema, MapSchema, RecordSchema, Schema};
use crate::util::OrderedMap;
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::str::FromStr;

const RECORD_RESERVED: &[&str] = &[
    "type",
    "name",
    "namespace",
    "doc",
    "fields",
    "aliases",
    "logicalType",
];
const FIELD_RESERVED: &[&str] = &[
    "name", "type", "doc", "default", "order", "aliases",
];
const ENUM_RESERVED: &[&str] = &[
    "type",
    "name",
    "namespace",
    "doc",
    "symbols",
    "aliases",
    "default",
    "logicalType",
];
const FIXED_RESERVED: &[&str] = &["type", "name", "namespace", "doc", "size", "aliases", "logicalType"];
const ARRAY_RESERVED: &[&str] = &["type", "items", "logicalType"];
const MAP_RESERVED: &[&str] = &["type", "values", "logicalType"];

pub(crate) fn parse(
    json: &JsonValue,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    match json {
        JsonValue::String(s) => {
            if let Some(t) = Type::primitive_from_str(s) {
                return Ok(primitive_schema(t));
            }
            resolve_named_reference(s, table, enclosing_namespace)
        }
        JsonValue::Array(branches) => {
            let branches = branches
                .iter()
                .map(|b| parse(b, table, enclosing_namespace))
                .collect::<Result<Vec<_>, _>>()?;
            Schema::new_union(branches, table)
        }
        JsonValue::Object(map) => parse_object(map, table, enclosing_namespace),
        _ => Err(AvrowErr::UnknownSchema),
    }
}

fn primitive_schema(t: Type) -> Schema {
    match t {
        Type::Null => Schema::Null,
        Type::Boolean => Schema::Boolean,
        Type::Int => Schema::Int,
        Type::Long => Schema::Long,
        Type::Float => Schema::Float,
        Type::Double => Schema::Double,
        Type::Bytes => Schema::Bytes,
        Type::String => Schema::String,
        _ => unreachable!("primitive_from_str never returns a complex type"),
    }
}

// An unqualified reference resolves first against the enclosing namespace,
// then against the null namespace, mirroring how a bare field type name is
// resolved in the Avro specification.
fn resolve_named_reference(
    s: &str,
    table: &SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    if s.contains('.') {
        if table.contains(s) {
            return Ok(Schema::Ref(Name::new(s)?));
        }
    } else {
        if let Some(ns) = enclosing_namespace {
            let qualified = format!("{}.{}", ns, s);
            if table.contains(&qualified) {
                return Ok(Schema::Ref(Name::new(&qualified)?));
            }
        }
        if table.contains(s) {
            return Ok(Schema::Ref(Name::new(s)?));
        }
    }
    Err(AvrowErr::NamedSchemaNotYetDefined(s.to_string()))
}

fn parse_object(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    let type_val = map.get("type").ok_or(AvrowErr::SchemaParseFailed)?;
    match type_val {
        JsonValue::Array(_) => parse(type_val, table, enclosing_namespace),
        JsonValue::String(s) => match s.as_str() {
            "array" => parse_array(map, table, enclosing_namespace),
            "map" => parse_map(map, table, enclosing_namespace),
            "record" => parse_record(map, table, enclosing_namespace, false),
            "error" => parse_record(map, table, enclosing_namespace, true),
            "enum" => parse_enum(map, table, enclosing_namespace),
            "fixed" => parse_fixed(map, table, enclosing_namespace),
            _ => {
                if let Some(t) = Type::primitive_from_str(s) {
                    Ok(primitive_schema(t))
                } else {
                    resolve_named_reference(s, table, enclosing_namespace)
                }
            }
        },
        _ => Err(AvrowErr::UnknownSchema),
    }
}

fn parse_array(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    let items = map.get("items").ok_or(AvrowErr::ArrayItemsMissing)?;
    let items = parse(items, table, enclosing_namespace)?;
    Ok(Schema::Array(ArraySchema {
        items: Box::new(items),
        attributes: collect_unknown_attrs(map, ARRAY_RESERVED),
    }))
}

fn parse_map(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    let values = map.get("values").ok_or(AvrowErr::MapValuesMissing)?;
    let values = parse(values, table, enclosing_namespace)?;
    Ok(Schema::Map(MapSchema {
        values: Box::new(values),
        attributes: collect_unknown_attrs(map, MAP_RESERVED),
    }))
}

fn parse_record(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
    is_error: bool,
) -> Result<Schema, AvrowErr> {
    let name = Name::from_json(map, enclosing_namespace)?;
    let fullname = name.fullname();
    if table.contains(&fullname) {
        return Err(AvrowErr::DuplicateSchema(fullname));
    }
    // Plant a placeholder so fields of this record may recursively refer
    // back to it before the real definition is known.
    table.insert(fullname.clone(), Schema::Ref(name.clone()));

    let doc = map.get("doc").and_then(JsonValue::as_str).map(String::from);
    let aliases = parse_string_list(map.get("aliases"))?;
    let fields_json = map
        .get("fields")
        .and_then(JsonValue::as_array)
        .ok_or(AvrowErr::ExpectedFieldsJsonArray)?;

    let child_namespace = name.namespace().map(String::from);
    let mut fields = Vec::with_capacity(fields_json.len());
    let mut field_index = IndexMap::with_capacity(fields_json.len());
    for (position, field_json) in fields_json.iter().enumerate() {
        let field_obj = field_json
            .as_object()
            .ok_or(AvrowErr::InvalidRecordFieldType)?;
        let field_name = field_obj
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or(AvrowErr::RecordNameNotFound)?;
        if field_index.contains_key(field_name) {
            return Err(AvrowErr::DuplicateField(field_name.to_string()));
        }
        let field_type = field_obj.get("type").ok_or(AvrowErr::RecordTypeNotFound)?;
        let field_schema = parse(field_type, table, child_namespace.as_deref())?;

        let mut field = Field::new(field_name, position, field_schema)?;
        field.doc = field_obj.get("doc").and_then(JsonValue::as_str).map(String::from);
        field.order = match field_obj.get("order") {
            None => Order::Ascending,
            Some(JsonValue::String(s)) => Order::from_str(s)?,
            Some(_) => return Err(AvrowErr::InvalidFieldOrdering),
        };
        field.aliases = parse_string_list(field_obj.get("aliases"))?;
        if let Some(default) = field_obj.get("default") {
            validate_default(default, &field.schema, table).map_err(|reason| {
                AvrowErr::InvalidDefaultValue {
                    field: field_name.to_string(),
                    reason,
                }
            })?;
            field.default = Some(default.clone());
        }
        field.attributes = collect_unknown_attrs(field_obj, FIELD_RESERVED);

        field_index.insert(field_name.to_string(), position);
        fields.push(field);
    }

    let schema = Schema::Record(RecordSchema {
        name,
        doc,
        is_error,
        fields,
        field_index,
        aliases,
        attributes: collect_unknown_attrs(map, RECORD_RESERVED),
        logical_type: map.get("logicalType").and_then(JsonValue::as_str).map(String::from),
    });
    table.insert(fullname, schema.clone());
    Ok(schema)
}

fn parse_enum(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    let name = Name::from_json(map, enclosing_namespace)?;
    let fullname = name.fullname();
    if table.contains(&fullname) {
        return Err(AvrowErr::DuplicateSchema(fullname));
    }

    let doc = map.get("doc").and_then(JsonValue::as_str).map(String::from);
    let aliases = parse_string_list(map.get("aliases"))?;
    let symbols_json = map
        .get("symbols")
        .and_then(JsonValue::as_array)
        .ok_or(AvrowErr::EnumSymbolsMissing)?;

    let mut symbols = Vec::with_capacity(symbols_json.len());
    let mut symbol_index = IndexMap::with_capacity(symbols_json.len());
    for s in symbols_json {
        let sym = s.as_str().ok_or(AvrowErr::EnumSymbolParseErr)?;
        crate::schema::name::validate_name(0, sym)?;
        if symbol_index.contains_key(sym) {
            return Err(AvrowErr::DuplicateEnumSymbol(sym.to_string()));
        }
        symbol_index.insert(sym.to_string(), symbols.len());
        symbols.push(sym.to_string());
    }

    let default = map.get("default").and_then(JsonValue::as_str).map(String::from);
    if let Some(d) = &default {
        if !symbols.iter().any(|s| s == d) {
            return Err(AvrowErr::EnumDefaultNotInSymbols(d.clone()));
        }
    }

    let schema = Schema::Enum(EnumSchema {
        name,
        doc,
        symbols,
        symbol_index,
        default,
        aliases,
        attributes: collect_unknown_attrs(map, ENUM_RESERVED),
        logical_type: map.get("logicalType").and_then(JsonValue::as_str).map(String::from),
    });
    table.insert(fullname, schema.clone());
    Ok(schema)
}

fn parse_fixed(
    map: &JsonMap<String, JsonValue>,
    table: &mut SchemaTable,
    enclosing_namespace: Option<&str>,
) -> Result<Schema, AvrowErr> {
    let name = Name::from_json(map, enclosing_namespace)?;
    let fullname = name.fullname();
    if table.contains(&fullname) {
        return Err(AvrowErr::DuplicateSchema(fullname));
    }

    let size_val = map.get("size").ok_or(AvrowErr::FixedSizeNotFound)?;
    let size = size_val.as_u64().ok_or(AvrowErr::FixedSizeNotNumber)? as usize;
    let aliases = parse_string_list(map.get("aliases"))?;

    let schema = Schema::Fixed(FixedSchema {
        name,
        doc: map.get("doc").and_then(JsonValue::as_str).map(String::from),
        size,
        aliases,
        attributes: collect_unknown_attrs(map, FIXED_RESERVED),
        logical_type: map.get("logicalType").and_then(JsonValue::as_str).map(String::from),
    });
    table.insert(fullname, schema.clone());
    Ok(schema)
}

fn parse_string_list(value: Option<&JsonValue>) -> Result<Vec<String>, AvrowErr> {
    match value {
        None => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(String::from).ok_or(AvrowErr::InvalidName))
            .collect(),
        Some(_) => Err(AvrowErr::InvalidName),
    }
}

fn collect_unknown_attrs(map: &JsonMap<String, JsonValue>, reserved: &[&str]) -> OrderedMap {
    map.iter()
        .filter(|(k, _)| !reserved.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Validates a field's declared `default` JSON value against its schema,
/// per the Avro default-value rules: the default must be plain JSON shaped
/// like the schema, not avro-json-encoded (a union default validates
/// against the union's first branch with no tag wrapping; a fixed/bytes
/// default is a string under the same latin-1 byte mapping used by the
/// avro-json bytes encoding).
pub(crate) fn validate_default(
    value: &JsonValue,
    schema: &Schema,
    table: &SchemaTable,
) -> Result<(), String> {
    let schema = schema.resolve(table).map_err(|e| e.to_string())?;
    match schema {
        Schema::Null => value.is_null().then(|| ()).ok_or_else(|| "expected null".to_string()),
        Schema::Boolean => value
            .is_boolean()
            .then(|| ())
            .ok_or_else(|| "expected boolean".to_string()),
        Schema::Int | Schema::Long => {
            if value.is_i64() || value.is_u64() {
                Ok(())
            } else {
                Err("expected an integer number".to_string())
            }
        }
        Schema::Float | Schema::Double => {
            if value.is_number() {
                Ok(())
            } else {
                Err("expected a number".to_string())
            }
        }
        Schema::Bytes | Schema::String => value
            .is_string()
            .then(|| ())
            .ok_or_else(|| "expected a string".to_string()),
        Schema::Fixed(f) => match value.as_str() {
            Some(s) if s.chars().count() == f.size && s.chars().all(|c| (c as u32) < 256) => Ok(()),
            Some(_) => Err(format!("expected a {}-byte latin-1 string", f.size)),
            None => Err("expected a string".to_string()),
        },
        Schema::Enum(e) => match value.as_str() {
            Some(s) if e.symbols.iter().any(|sym| sym == s) => Ok(()),
            Some(s) => Err(format!("`{}` is not a symbol of this enum", s)),
            None => Err("expected a string".to_string()),
        },
        Schema::Array(a) => match value.as_array() {
            Some(items) => {
                for item in items {
                    validate_default(item, &a.items, table)?;
                }
                Ok(())
            }
            None => Err("expected an array".to_string()),
        },
        Schema::Map(m) => match value.as_object() {
            Some(obj) => {
                for v in obj.values() {
                    validate_default(v, &m.values, table)?;
                }
                Ok(())
            }
            None => Err("expected an object".to_string()),
        },
        Schema::Record(r) => match value.as_object() {
            Some(obj) => {
                for field in &r.fields {
                    match obj.get(&field.name) {
                        Some(v) => validate_default(v, &field.schema, table)?,
                        None if field.default.is_some() => {}
                        None => return Err(format!("missing default value for field `{}`", field.name)),
                    }
                }
                Ok(())
            }
            None => Err("expected an object".to_string()),
        },
        Schema::Union(u) => {
            let branch = u
                .branches
                .first()
                .ok_or_else(|| "union has no branches".to_string())?;
            validate_default(value, branch, table)
        }
        Schema::Ref(_) => unreachable!("resolve() never returns a Ref"),
    }
}
