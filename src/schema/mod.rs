//! The Avro schema model: an algebraic representation of Avro schemas,
//! the attribute carrier for unknown JSON keys, and serialization back to
//! canonical JSON.
//!
//! Schemas are parsed from JSON with [`Schema::from_str`] (or
//! [`Schema::from_reader`]); once parsed, a schema is immutable and may be
//! freely shared across threads for reading.

pub mod canonical;
pub mod field;
pub mod name;
pub mod parser;
pub mod table;

#[cfg(test)]
mod tests;

use crate::error::{AvrowErr, AvrowResult};
use crate::util::OrderedMap;
use field::Field;
use indexmap::IndexMap;
use name::{Name, Type};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::str::FromStr;
use table::SchemaTable;

/// An array schema: `{"type": "array", "items": <schema>}`.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    pub(crate) items: Box<Schema>,
    pub(crate) attributes: OrderedMap,
}

/// A map schema: `{"type": "map", "values": <schema>}`. Keys are always
/// strings.
#[derive(Debug, Clone)]
pub struct MapSchema {
    pub(crate) values: Box<Schema>,
    pub(crate) attributes: OrderedMap,
}

/// A union schema: an ordered list of branch schemas. No branch may itself
/// be a union, and every named branch must have a distinct fullname.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    pub(crate) branches: Vec<Schema>,
}

/// A record schema, with fields in declared order and a name index for
/// `O(1)` field lookup.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub(crate) name: Name,
    pub(crate) doc: Option<String>,
    pub(crate) is_error: bool,
    pub(crate) fields: Vec<Field>,
    pub(crate) field_index: IndexMap<String, usize>,
    pub(crate) aliases: Vec<String>,
    pub(crate) attributes: OrderedMap,
    pub(crate) logical_type: Option<String>,
}

/// An enum schema, with an ordered symbol list and a symbol→ordinal index.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    pub(crate) name: Name,
    pub(crate) doc: Option<String>,
    pub(crate) symbols: Vec<String>,
    pub(crate) symbol_index: IndexMap<String, usize>,
    pub(crate) default: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) attributes: OrderedMap,
    pub(crate) logical_type: Option<String>,
}

/// A fixed-size byte schema.
#[derive(Debug, Clone)]
pub struct FixedSchema {
    pub(crate) name: Name,
    pub(crate) doc: Option<String>,
    pub(crate) size: usize,
    pub(crate) aliases: Vec<String>,
    pub(crate) attributes: OrderedMap,
    pub(crate) logical_type: Option<String>,
}

/// The Avro schema algebra. Primitive variants carry nothing; complex
/// variants carry their structure plus (for named schemas) an
/// insertion-ordered map of unknown JSON attributes and an optional
/// textual `logicalType`, which this crate records but does not interpret.
///
/// `Ref` is not part of the Avro type system proper: it is how this crate
/// represents a second-or-later occurrence of a named schema inside a
/// schema tree (e.g. the recursive `next` field of a linked list record)
/// without requiring the tree itself to contain cycles. A `Ref` always
/// resolves through a [`SchemaTable`] to the named schema it points at.
#[derive(Debug, Clone)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(ArraySchema),
    Map(MapSchema),
    Union(UnionSchema),
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    Ref(Name),
}

impl Schema {
    /// Parses a schema from a JSON reader (e.g. an open `.avsc` file).
    pub fn from_reader<R: Read>(mut reader: R) -> AvrowResult<Self> {
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .map_err(AvrowErr::SchemaParseErr)?;
        Self::from_str(&buf)
    }

    /// Returns this schema's type tag. For a [`Schema::Ref`], the tag is
    /// resolved through `table`.
    pub fn get_type(&self, table: &SchemaTable) -> Type {
        match self {
            Schema::Null => Type::Null,
            Schema::Boolean => Type::Boolean,
            Schema::Int => Type::Int,
            Schema::Long => Type::Long,
            Schema::Float => Type::Float,
            Schema::Double => Type::Double,
            Schema::Bytes => Type::Bytes,
            Schema::String => Type::String,
            Schema::Array(_) => Type::Array,
            Schema::Map(_) => Type::Map,
            Schema::Union(_) => Type::Union,
            Schema::Record(_) => Type::Record,
            Schema::Enum(_) => Type::Enum,
            Schema::Fixed(_) => Type::Fixed,
            Schema::Ref(name) => table
                .get(&name.fullname())
                .map(|s| s.get_type(table))
                .unwrap_or(Type::Record),
        }
    }

    /// Resolves a [`Schema::Ref`] through `table`, returning `self`
    /// unchanged for every other variant.
    pub fn resolve<'a>(&'a self, table: &'a SchemaTable) -> AvrowResult<&'a Schema> {
        match self {
            Schema::Ref(name) => table
                .get(&name.fullname())
                .ok_or_else(|| AvrowErr::NamedSchemaNotFound(name.fullname())),
            other => Ok(other),
        }
    }

    /// Computes this schema's 64-bit Rabin fingerprint over its Parsing
    /// Canonical Form, Avro's default schema fingerprinting algorithm.
    pub fn fingerprint(&self) -> u64 {
        canonical::rabin_fingerprint(self)
    }

    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            Schema::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumSchema> {
        match self {
            Schema::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_fixed(&self) -> Option<&FixedSchema> {
        match self {
            Schema::Fixed(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Schema::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapSchema> {
        match self {
            Schema::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionSchema> {
        match self {
            Schema::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Fullname for any named variant (record/enum/fixed/ref).
    pub(crate) fn name(&self) -> Option<&Name> {
        match self {
            Schema::Record(r) => Some(&r.name),
            Schema::Enum(e) => Some(&e.name),
            Schema::Fixed(f) => Some(&f.name),
            Schema::Ref(n) => Some(n),
            _ => None,
        }
    }

    /// Builds a union schema, enforcing the two construction invariants:
    /// no branch is itself a union, and named branches have distinct
    /// fullnames (unnamed branches must have distinct type tags, which
    /// falls out of the same fullname check using the primitive name as a
    /// stand-in fullname).
    pub(crate) fn new_union(branches: Vec<Schema>, table: &SchemaTable) -> AvrowResult<Schema> {
        let mut seen = Vec::with_capacity(branches.len());
        for b in &branches {
            if matches!(b, Schema::Union(_)) {
                return Err(AvrowErr::NestedUnion);
            }
            let key = union_branch_key(b, table);
            if seen.contains(&key) {
                return Err(AvrowErr::DuplicateUnionBranch(key));
            }
            seen.push(key);
        }
        Ok(Schema::Union(UnionSchema { branches }))
    }
}

// A stand-in "fullname" used to detect duplicate union branches: named
// schemas use their real fullname, primitives and unnamed complex types use
// their type tag (two `array` branches are just as duplicate as two `Foo`
// branches, per the spec's "distinct fullname" rule generalised to
// unnamed types).
fn union_branch_key(schema: &Schema, table: &SchemaTable) -> String {
    match schema.name() {
        Some(name) => name.fullname(),
        None => schema.get_type(table).to_string(),
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        use Schema::*;
        match (self, other) {
            (Null, Null)
            | (Boolean, Boolean)
            | (Int, Int)
            | (Long, Long)
            | (Float, Float)
            | (Double, Double)
            | (Bytes, Bytes)
            | (String, String) => true,
            (Array(a), Array(b)) => a.items == b.items,
            (Map(a), Map(b)) => a.values == b.values,
            (Union(a), Union(b)) => a.branches == b.branches,
            (Record(a), Record(b)) => a.name == b.name,
            (Enum(a), Enum(b)) => a.name == b.name,
            (Fixed(a), Fixed(b)) => a.name == b.name && a.size == b.size,
            (Ref(a), Ref(b)) => a == b,
            (Ref(a), Record(b)) | (Record(b), Ref(a)) => *a == b.name,
            (Ref(a), Enum(b)) | (Enum(b), Ref(a)) => *a == b.name,
            (Ref(a), Fixed(b)) | (Fixed(b), Ref(a)) => *a == b.name,
            _ => false,
        }
    }
}

impl FromStr for Schema {
    type Err = AvrowErr;

    /// Parses an avro schema from a JSON string. The returned schema owns
    /// no reference to the `SchemaTable` used during parsing; named
    /// sub-schemas are fully inlined the first time they are encountered
    /// and referenced by [`Schema::Ref`] thereafter, so a second parse of
    /// the same document starts from a clean table.
    fn from_str(schema: &str) -> Result<Self, Self::Err> {
        let json: JsonValue = serde_json::from_str(schema)?;
        let mut table = SchemaTable::new();
        parser::parse(&json, &mut table, None)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = SchemaTable::new();
        let json = canonical::emit(self, &mut table, None);
        write!(f, "{}", json)
    }
}
