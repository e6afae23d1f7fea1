//! [`GenericDatum`]: a schema-shaped dynamic value. Unlike a specific
//! record generated from a Rust struct (out of scope for this crate), a
//! `GenericDatum` carries its own run-time shape and is validated against
//! a [`Schema`] each time it is built, encoded, or decoded.

use crate::codec::{Decoder, Encoder};
use crate::error::{AvrowErr, AvrowResult};
use crate::schema::name::Type;
use crate::schema::table::SchemaTable;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// A record value: a named, ordered set of field values. Construction does
/// not by itself check the value against a schema — that check happens
/// when the datum is encoded, or explicitly via [`Schema::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRecord {
    name: String,
    fields: IndexMap<String, GenericDatum>,
}

impl GenericRecord {
    pub fn new(name: impl Into<String>) -> Self {
        GenericRecord {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn put(&mut self, field: &str, value: impl Into<GenericDatum>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&GenericDatum> {
        self.fields.get(field)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &GenericDatum)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The value at positional index `index`, in field-declaration order.
    pub fn field_at(&self, index: usize) -> Option<&GenericDatum> {
        self.fields.get_index(index).map(|(_, v)| v)
    }

    /// The positional index of field `name`, if this record has one.
    pub fn get_field(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }
}

/// A dynamically-typed Avro value. The Avro type system's fourteen types
/// map onto thirteen variants here plus [`GenericDatum::Union`], which
/// pairs the selected branch's index with the value chosen from that
/// branch. The index is stored explicitly rather than re-derived from the
/// value's shape, since shape alone cannot always tell two branches apart
/// (e.g. a union of two same-typed records distinguished only by name, or
/// of two numeric types that both happen to promote to the same stored
/// type). An enum datum is likewise stored as its ordinal into the
/// enclosing schema's `symbols`, not as the symbol string.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericDatum {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    Fixed(Vec<u8>),
    Enum(usize),
    Array(Vec<GenericDatum>),
    Map(IndexMap<String, GenericDatum>),
    Record(GenericRecord),
    Union(usize, Box<GenericDatum>),
}

/// Bridges a concrete Rust type to/from a [`GenericDatum`], used by
/// [`GenericDatum::get_value`]/[`GenericDatum::set_value`].
pub trait DatumValue: Sized {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self>;
    fn into_datum(self) -> GenericDatum;
}

impl DatumValue for bool {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_boolean()
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Boolean(self)
    }
}
impl DatumValue for i32 {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_int()
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Int(self)
    }
}
impl DatumValue for i64 {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_long()
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Long(self)
    }
}
impl DatumValue for f32 {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_float()
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Float(self)
    }
}
impl DatumValue for f64 {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_double()
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Double(self)
    }
}
impl DatumValue for String {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_string().map(str::to_string)
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::String(self)
    }
}
impl DatumValue for Vec<u8> {
    fn from_datum(datum: &GenericDatum) -> AvrowResult<Self> {
        datum.as_bytes().map(<[u8]>::to_vec)
    }
    fn into_datum(self) -> GenericDatum {
        GenericDatum::Bytes(self)
    }
}

impl GenericDatum {
    fn type_name(&self) -> &'static str {
        match self {
            GenericDatum::Null => "null",
            GenericDatum::Boolean(_) => "boolean",
            GenericDatum::Int(_) => "int",
            GenericDatum::Long(_) => "long",
            GenericDatum::Float(_) => "float",
            GenericDatum::Double(_) => "double",
            GenericDatum::Bytes(_) => "bytes",
            GenericDatum::String(_) => "string",
            GenericDatum::Fixed(_) => "fixed",
            GenericDatum::Enum(_) => "enum",
            GenericDatum::Array(_) => "array",
            GenericDatum::Map(_) => "map",
            GenericDatum::Record(_) => "record",
            GenericDatum::Union(_, _) => "union",
        }
    }

    /// This datum's type tag, dereferencing through a selected union
    /// branch to the type actually stored.
    pub fn get_type(&self) -> Type {
        match self {
            GenericDatum::Null => Type::Null,
            GenericDatum::Boolean(_) => Type::Boolean,
            GenericDatum::Int(_) => Type::Int,
            GenericDatum::Long(_) => Type::Long,
            GenericDatum::Float(_) => Type::Float,
            GenericDatum::Double(_) => Type::Double,
            GenericDatum::Bytes(_) => Type::Bytes,
            GenericDatum::String(_) => Type::String,
            GenericDatum::Fixed(_) => Type::Fixed,
            GenericDatum::Enum(_) => Type::Enum,
            GenericDatum::Array(_) => Type::Array,
            GenericDatum::Map(_) => Type::Map,
            GenericDatum::Record(_) => Type::Record,
            GenericDatum::Union(_, inner) => inner.get_type(),
        }
    }

    /// Reads this datum as a concrete Rust type, dereferencing through a
    /// selected union branch first.
    pub fn get_value<T: DatumValue>(&self) -> AvrowResult<T> {
        match self {
            GenericDatum::Union(_, inner) => inner.get_value(),
            other => T::from_datum(other),
        }
    }

    /// Overwrites this datum in place with `value`.
    pub fn set_value<T: DatumValue>(&mut self, value: T) {
        *self = value.into_datum();
    }

    /// Number of items in an array, or entries in a map.
    pub fn length(&self) -> AvrowResult<usize> {
        match self {
            GenericDatum::Array(v) => Ok(v.len()),
            GenericDatum::Map(v) => Ok(v.len()),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    /// Re-targets this datum to union branch `index`, replacing its inner
    /// value with a zero value appropriate to that branch's schema. Used
    /// to switch an existing union datum to a different branch without
    /// separately constructing that branch's value by hand.
    pub fn set_union_index(
        &mut self,
        index: usize,
        branches: &[Schema],
        table: &SchemaTable,
    ) -> AvrowResult<()> {
        let branch = branches.get(index).ok_or(AvrowErr::UnionIndexOutOfRange(index))?;
        let value = GenericDatum::zero_value(branch, table)?;
        *self = GenericDatum::Union(index, Box::new(value));
        Ok(())
    }

    // A type-appropriate zero value for `schema`, used to populate a
    // freshly-selected union branch.
    fn zero_value(schema: &Schema, table: &SchemaTable) -> AvrowResult<GenericDatum> {
        let resolved = schema.resolve(table)?;
        Ok(match resolved {
            Schema::Null => GenericDatum::Null,
            Schema::Boolean => GenericDatum::Boolean(false),
            Schema::Int => GenericDatum::Int(0),
            Schema::Long => GenericDatum::Long(0),
            Schema::Float => GenericDatum::Float(0.0),
            Schema::Double => GenericDatum::Double(0.0),
            Schema::Bytes => GenericDatum::Bytes(Vec::new()),
            Schema::String => GenericDatum::String(String::new()),
            Schema::Fixed(f) => GenericDatum::Fixed(vec![0; f.size]),
            Schema::Enum(_) => GenericDatum::Enum(0),
            Schema::Array(_) => GenericDatum::Array(Vec::new()),
            Schema::Map(_) => GenericDatum::Map(IndexMap::new()),
            Schema::Record(r) => {
                let mut rec = GenericRecord::new(r.name.fullname());
                for field in &r.fields {
                    rec.put(&field.name, GenericDatum::zero_value(&field.schema, table)?);
                }
                GenericDatum::Record(rec)
            }
            Schema::Union(u) => {
                let first = u
                    .branches
                    .first()
                    .ok_or_else(|| AvrowErr::SchemaDataMismatch("union has no branches".into()))?;
                GenericDatum::Union(0, Box::new(GenericDatum::zero_value(first, table)?))
            }
            Schema::Ref(_) => unreachable!("resolve() never returns a Ref"),
        })
    }

    pub fn as_null(&self) -> AvrowResult<()> {
        matches!(self, GenericDatum::Null)
            .then(|| ())
            .ok_or(AvrowErr::ExpectedVariantNotFound)
    }

    pub fn as_boolean(&self) -> AvrowResult<bool> {
        match self {
            GenericDatum::Boolean(b) => Ok(*b),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_int(&self) -> AvrowResult<i32> {
        match self {
            GenericDatum::Int(v) => Ok(*v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_long(&self) -> AvrowResult<i64> {
        match self {
            GenericDatum::Long(v) => Ok(*v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_float(&self) -> AvrowResult<f32> {
        match self {
            GenericDatum::Float(v) => Ok(*v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_double(&self) -> AvrowResult<f64> {
        match self {
            GenericDatum::Double(v) => Ok(*v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_bytes(&self) -> AvrowResult<&[u8]> {
        match self {
            GenericDatum::Bytes(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_string(&self) -> AvrowResult<&str> {
        match self {
            GenericDatum::String(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_fixed(&self) -> AvrowResult<&[u8]> {
        match self {
            GenericDatum::Fixed(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_enum(&self) -> AvrowResult<usize> {
        match self {
            GenericDatum::Enum(v) => Ok(*v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_array(&self) -> AvrowResult<&[GenericDatum]> {
        match self {
            GenericDatum::Array(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_map(&self) -> AvrowResult<&IndexMap<String, GenericDatum>> {
        match self {
            GenericDatum::Map(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_record(&self) -> AvrowResult<&GenericRecord> {
        match self {
            GenericDatum::Record(v) => Ok(v),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    pub fn as_union(&self) -> AvrowResult<(usize, &GenericDatum)> {
        match self {
            GenericDatum::Union(idx, v) => Ok((*idx, v)),
            _ => Err(AvrowErr::ExpectedVariantNotFound),
        }
    }

    /// Builds a datum from a JSON value shaped like `schema`'s default
    /// value grammar (plain JSON, not avro-json: a union value is bare,
    /// and bytes/fixed are latin-1 strings). Used both to materialise a
    /// field's declared `default` and as a general JSON-to-datum bridge
    /// for callers that already have plain JSON data in hand.
    pub fn from_default_json(
        value: &JsonValue,
        schema: &Schema,
        table: &SchemaTable,
    ) -> AvrowResult<GenericDatum> {
        let resolved = schema.resolve(table)?;
        match resolved {
            Schema::Null => Ok(GenericDatum::Null),
            Schema::Boolean => value
                .as_bool()
                .map(GenericDatum::Boolean)
                .ok_or_else(|| mismatch("boolean", value)),
            Schema::Int => value
                .as_i64()
                .map(|v| GenericDatum::Int(v as i32))
                .ok_or_else(|| mismatch("int", value)),
            Schema::Long => value
                .as_i64()
                .map(GenericDatum::Long)
                .ok_or_else(|| mismatch("long", value)),
            Schema::Float => value
                .as_f64()
                .map(|v| GenericDatum::Float(v as f32))
                .ok_or_else(|| mismatch("float", value)),
            Schema::Double => value
                .as_f64()
                .map(GenericDatum::Double)
                .ok_or_else(|| mismatch("double", value)),
            Schema::Bytes => value
                .as_str()
                .ok_or_else(|| mismatch("bytes", value))
                .and_then(latin1_to_bytes)
                .map(GenericDatum::Bytes),
            Schema::String => value
                .as_str()
                .map(|s| GenericDatum::String(s.to_string()))
                .ok_or_else(|| mismatch("string", value)),
            Schema::Fixed(f) => {
                let bytes = value
                    .as_str()
                    .ok_or_else(|| mismatch("fixed", value))
                    .and_then(latin1_to_bytes)?;
                if bytes.len() != f.size {
                    return Err(AvrowErr::FixedValueLenMismatch {
                        found: bytes.len(),
                        expected: f.size,
                    });
                }
                Ok(GenericDatum::Fixed(bytes))
            }
            Schema::Enum(e) => {
                let sym = value.as_str().ok_or_else(|| mismatch("enum", value))?;
                let idx = e.symbols.iter().position(|s| s == sym).ok_or_else(|| {
                    AvrowErr::SchemaDataMismatch(format!("`{}` is not a symbol of this enum", sym))
                })?;
                Ok(GenericDatum::Enum(idx))
            }
            Schema::Array(a) => {
                let items = value.as_array().ok_or_else(|| mismatch("array", value))?;
                let items = items
                    .iter()
                    .map(|v| GenericDatum::from_default_json(v, &a.items, table))
                    .collect::<AvrowResult<Vec<_>>>()?;
                Ok(GenericDatum::Array(items))
            }
            Schema::Map(m) => {
                let obj = value.as_object().ok_or_else(|| mismatch("map", value))?;
                let mut out = IndexMap::with_capacity(obj.len());
                for (k, v) in obj {
                    out.insert(k.clone(), GenericDatum::from_default_json(v, &m.values, table)?);
                }
                Ok(GenericDatum::Map(out))
            }
            Schema::Record(r) => {
                let obj = value.as_object().ok_or_else(|| mismatch("record", value))?;
                let mut record = GenericRecord::new(r.name.fullname());
                for field in &r.fields {
                    let datum = match obj.get(&field.name) {
                        Some(v) => GenericDatum::from_default_json(v, &field.schema, table)?,
                        None => match &field.default {
                            Some(d) => GenericDatum::from_default_json(d, &field.schema, table)?,
                            None => return Err(AvrowErr::FieldNotFound(field.name.clone())),
                        },
                    };
                    record.put(&field.name, datum);
                }
                Ok(GenericDatum::Record(record))
            }
            Schema::Union(u) => {
                let branch = u
                    .branches
                    .first()
                    .ok_or_else(|| AvrowErr::SchemaDataMismatch("union has no branches".into()))?;
                Ok(GenericDatum::Union(
                    0,
                    Box::new(GenericDatum::from_default_json(value, branch, table)?),
                ))
            }
            Schema::Ref(_) => unreachable!("resolve() never returns a Ref"),
        }
    }

    /// Writes this datum through `enc`, dispatching on `schema` and
    /// applying Avro's numeric/string promotion rules (e.g. an `Int`
    /// datum against a `long`/`float`/`double` schema).
    pub fn encode<E: Encoder>(&self, schema: &Schema, table: &SchemaTable, enc: &mut E) -> AvrowResult<()> {
        let resolved = schema.resolve(table)?;
        match (self, resolved) {
            (GenericDatum::Null, Schema::Null) => enc.write_null(),
            (GenericDatum::Boolean(b), Schema::Boolean) => enc.write_boolean(*b),
            (GenericDatum::Int(i), Schema::Int) => enc.write_int(*i),
            (GenericDatum::Int(i), Schema::Long) => enc.write_long(*i as i64),
            (GenericDatum::Int(i), Schema::Float) => enc.write_float(*i as f32),
            (GenericDatum::Int(i), Schema::Double) => enc.write_double(*i as f64),
            (GenericDatum::Long(l), Schema::Long) => enc.write_long(*l),
            (GenericDatum::Long(l), Schema::Float) => enc.write_float(*l as f32),
            (GenericDatum::Long(l), Schema::Double) => enc.write_double(*l as f64),
            (GenericDatum::Float(f), Schema::Float) => enc.write_float(*f),
            (GenericDatum::Float(f), Schema::Double) => enc.write_double(*f as f64),
            (GenericDatum::Double(d), Schema::Double) => enc.write_double(*d),
            (GenericDatum::String(s), Schema::String) => enc.write_string(s),
            (GenericDatum::String(s), Schema::Bytes) => enc.write_bytes(s.as_bytes()),
            (GenericDatum::Bytes(b), Schema::Bytes) => enc.write_bytes(b),
            (GenericDatum::Bytes(b), Schema::String) => {
                enc.write_string(std::str::from_utf8(b).map_err(|_| AvrowErr::InvalidUtf8)?)
            }
            (GenericDatum::Fixed(b), Schema::Fixed(f)) => {
                if b.len() != f.size {
                    return Err(AvrowErr::FixedValueLenMismatch {
                        found: b.len(),
                        expected: f.size,
                    });
                }
                enc.write_fixed(b)
            }
            (GenericDatum::Enum(ord), Schema::Enum(e)) => {
                if *ord >= e.symbols.len() {
                    return Err(AvrowErr::EnumOrdinalOutOfRange(*ord, e.symbols.len()));
                }
                enc.write_enum(*ord, &e.symbols[*ord])
            }
            (GenericDatum::Array(items), Schema::Array(a)) => {
                enc.write_array_start()?;
                enc.set_item_count(items.len())?;
                for item in items {
                    enc.start_item()?;
                    item.encode(&a.items, table, enc)?;
                }
                enc.write_array_end()
            }
            (GenericDatum::Map(entries), Schema::Map(m)) => {
                enc.write_map_start()?;
                enc.set_item_count(entries.len())?;
                for (k, v) in entries.iter() {
                    enc.write_map_key(k)?;
                    v.encode(&m.values, table, enc)?;
                }
                enc.write_map_end()
            }
            (GenericDatum::Record(rec), Schema::Record(r)) => {
                enc.write_record_start()?;
                for field in &r.fields {
                    let value = rec
                        .fields
                        .get(&field.name)
                        .ok_or_else(|| AvrowErr::FieldNotFound(field.name.clone()))?;
                    enc.write_record_field(&field.name)?;
                    value.encode(&field.schema, table, enc)?;
                }
                enc.write_record_end()
            }
            (GenericDatum::Union(idx, inner), Schema::Union(u)) => {
                let branch = u
                    .branches
                    .get(*idx)
                    .ok_or(AvrowErr::UnionIndexOutOfRange(*idx))?;
                let branch_name = union_branch_tag(branch, table);
                enc.write_union_branch(*idx, &branch_name)?;
                inner.encode(branch, table, enc)?;
                enc.write_union_end(&branch_name)
            }
            (value, Schema::Union(u)) => {
                let (idx, branch) = resolve_union_branch(value, &u.branches, table)?;
                let branch_name = union_branch_tag(branch, table);
                enc.write_union_branch(idx, &branch_name)?;
                value.encode(branch, table, enc)?;
                enc.write_union_end(&branch_name)
            }
            _ => Err(AvrowErr::SchemaDataMismatch(format!(
                "value of type `{}` does not conform to schema type `{}`",
                self.type_name(),
                resolved.get_type(table)
            ))),
        }
    }

    /// Reads a datum shaped like `schema` through `dec`.
    pub fn decode<D: Decoder>(schema: &Schema, table: &SchemaTable, dec: &mut D) -> AvrowResult<GenericDatum> {
        let resolved = schema.resolve(table)?;
        match resolved {
            Schema::Null => {
                dec.read_null()?;
                Ok(GenericDatum::Null)
            }
            Schema::Boolean => Ok(GenericDatum::Boolean(dec.read_boolean()?)),
            Schema::Int => Ok(GenericDatum::Int(dec.read_int()?)),
            Schema::Long => Ok(GenericDatum::Long(dec.read_long()?)),
            Schema::Float => Ok(GenericDatum::Float(dec.read_float()?)),
            Schema::Double => Ok(GenericDatum::Double(dec.read_double()?)),
            Schema::Bytes => Ok(GenericDatum::Bytes(dec.read_bytes()?)),
            Schema::String => Ok(GenericDatum::String(dec.read_string()?)),
            Schema::Fixed(f) => Ok(GenericDatum::Fixed(dec.read_fixed(f.size)?)),
            Schema::Enum(e) => {
                let idx = dec.read_enum(&e.symbols)?;
                Ok(GenericDatum::Enum(idx))
            }
            Schema::Array(a) => {
                let mut items = Vec::new();
                let mut count = dec.read_array_block()?;
                while count != 0 {
                    for _ in 0..count {
                        items.push(GenericDatum::decode(&a.items, table, dec)?);
                    }
                    count = dec.read_array_block()?;
                }
                dec.read_array_end()?;
                Ok(GenericDatum::Array(items))
            }
            Schema::Map(m) => {
                let mut entries = IndexMap::new();
                let mut count = dec.read_map_block()?;
                while count != 0 {
                    for _ in 0..count {
                        let key = dec.read_map_key()?;
                        let value = GenericDatum::decode(&m.values, table, dec)?;
                        entries.insert(key, value);
                    }
                    count = dec.read_map_block()?;
                }
                dec.read_map_end()?;
                Ok(GenericDatum::Map(entries))
            }
            Schema::Record(r) => {
                dec.read_record_start()?;
                let mut record = GenericRecord::new(r.name.fullname());
                for field in &r.fields {
                    dec.read_record_field(&field.name)?;
                    let value = GenericDatum::decode(&field.schema, table, dec)?;
                    record.put(&field.name, value);
                }
                dec.read_record_end()?;
                Ok(GenericDatum::Record(record))
            }
            Schema::Union(u) => {
                let branch_names: Vec<String> =
                    u.branches.iter().map(|b| union_branch_tag(b, table)).collect();
                let idx = dec.read_union_branch(&branch_names)?;
                let value = GenericDatum::decode(&u.branches[idx], table, dec)?;
                dec.read_union_end()?;
                Ok(GenericDatum::Union(idx, Box::new(value)))
            }
            Schema::Ref(_) => unreachable!("resolve() never returns a Ref"),
        }
    }
}

fn mismatch(expected: &str, found: &JsonValue) -> AvrowErr {
    AvrowErr::SchemaDataMismatch(format!("expected a json value for `{}`, found {}", expected, found))
}

fn latin1_to_bytes(s: &str) -> AvrowResult<Vec<u8>> {
    s.chars()
        .map(|c| {
            let v = c as u32;
            if v > 0xff {
                Err(AvrowErr::InvalidUtf8)
            } else {
                Ok(v as u8)
            }
        })
        .collect()
}

// The JSON union tag (and, generalised here, the binary union branch
// "name" callers pass through the Encoder/Decoder trait) for a branch
// schema: a named schema's fullname, or the bare type tag for everything
// else.
pub(crate) fn union_branch_tag(schema: &Schema, table: &SchemaTable) -> String {
    match schema.name() {
        Some(name) => name.fullname(),
        None => schema.get_type(table).to_string(),
    }
}

fn resolve_union_branch<'a>(
    value: &GenericDatum,
    branches: &'a [Schema],
    table: &SchemaTable,
) -> AvrowResult<(usize, &'a Schema)> {
    for (idx, branch) in branches.iter().enumerate() {
        let resolved = branch.resolve(table)?;
        let matches = match (value, resolved) {
            (GenericDatum::Null, Schema::Null)
            | (GenericDatum::Boolean(_), Schema::Boolean)
            | (GenericDatum::Int(_), Schema::Int)
            | (GenericDatum::Long(_), Schema::Long)
            | (GenericDatum::Float(_), Schema::Float)
            | (GenericDatum::Double(_), Schema::Double)
            | (GenericDatum::Bytes(_), Schema::Bytes)
            | (GenericDatum::String(_), Schema::String)
            | (GenericDatum::Array(_), Schema::Array(_))
            | (GenericDatum::Map(_), Schema::Map(_)) => true,
            (GenericDatum::Fixed(v), Schema::Fixed(f)) => v.len() == f.size,
            (GenericDatum::Enum(ord), Schema::Enum(e)) => *ord < e.symbols.len(),
            (GenericDatum::Record(rec), Schema::Record(r)) => rec.name() == r.name.fullname(),
            _ => false,
        };
        if matches {
            return Ok((idx, branch));
        }
    }
    Err(AvrowErr::UnionBranchNotFound(value.type_name().to_string()))
}

impl From<()> for GenericDatum {
    fn from(_: ()) -> Self {
        GenericDatum::Null
    }
}
impl From<bool> for GenericDatum {
    fn from(v: bool) -> Self {
        GenericDatum::Boolean(v)
    }
}
impl From<i32> for GenericDatum {
    fn from(v: i32) -> Self {
        GenericDatum::Int(v)
    }
}
impl From<i64> for GenericDatum {
    fn from(v: i64) -> Self {
        GenericDatum::Long(v)
    }
}
impl From<f32> for GenericDatum {
    fn from(v: f32) -> Self {
        GenericDatum::Float(v)
    }
}
impl From<f64> for GenericDatum {
    fn from(v: f64) -> Self {
        GenericDatum::Double(v)
    }
}
impl From<String> for GenericDatum {
    fn from(v: String) -> Self {
        GenericDatum::String(v)
    }
}
impl<'a> From<&'a str> for GenericDatum {
    fn from(v: &'a str) -> Self {
        GenericDatum::String(v.to_string())
    }
}
impl From<Vec<u8>> for GenericDatum {
    fn from(v: Vec<u8>) -> Self {
        GenericDatum::Bytes(v)
    }
}
impl From<GenericRecord> for GenericDatum {
    fn from(v: GenericRecord) -> Self {
        GenericDatum::Record(v)
    }
}
impl<T: Into<GenericDatum>> From<Vec<T>> for GenericDatum {
    fn from(v: Vec<T>) -> Self {
        GenericDatum::Array(v.into_iter().map(Into::into).collect())
    }
}
