//! Resolution of named-schema references gathered during a single parse (or
//! canonical re-emission) pass.

use crate::schema::Schema;
use std::collections::HashMap;

/// Maps a named schema's fullname to its definition. Built up incrementally
/// while a schema document is walked, so that a field whose type is a bare
/// name (`"type": "LongList"`) can resolve against a definition that
/// occurred earlier in the same document — including its own enclosing
/// record, which is what makes recursive schemas possible.
///
/// The "current default namespace" the parser and canonical emitter both
/// need is not stored here: both walk the schema tree recursively and carry
/// it as an ordinary `enclosing_namespace: Option<&str>` function parameter,
/// saving and restoring it across each named-schema scope via plain call
/// stack discipline rather than mutable shared state.
#[derive(Debug, Default)]
pub struct SchemaTable {
    named: HashMap<String, Schema>,
}

impl SchemaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        SchemaTable {
            named: HashMap::new(),
        }
    }

    /// Looks up a previously registered named schema by fullname.
    pub fn get(&self, fullname: &str) -> Option<&Schema> {
        self.named.get(fullname)
    }

    /// True if `fullname` has already been registered.
    pub fn contains(&self, fullname: &str) -> bool {
        self.named.contains_key(fullname)
    }

    /// Registers a named schema. Returns the previous definition, if any,
    /// so callers can detect a duplicate definition.
    pub(crate) fn insert(&mut self, fullname: String, schema: Schema) -> Option<Schema> {
        self.named.insert(fullname, schema)
    }

    /// Number of named schemas registered so far.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Rebuilds a table of every named schema reachable from `schema`, by
    /// walking its tree. [`Schema::from_str`] parses correctly on its own
    /// (named schemas are fully inlined on first occurrence, and later
    /// occurrences become [`Schema::Ref`]) but does not hand back the table
    /// it used internally to do that, since a [`Schema`] value itself
    /// carries no such state. Call this once after parsing to get a table
    /// usable with [`Schema::resolve`] and with
    /// [`crate::datum::GenericDatum::encode`]/[`crate::datum::GenericDatum::decode`].
    pub fn build(schema: &Schema) -> SchemaTable {
        let mut table = SchemaTable::new();
        collect(schema, &mut table);
        table
    }
}

fn collect(schema: &Schema, table: &mut SchemaTable) {
    match schema {
        Schema::Array(a) => collect(&a.items, table),
        Schema::Map(m) => collect(&m.values, table),
        Schema::Union(u) => {
            for branch in &u.branches {
                collect(branch, table);
            }
        }
        Schema::Record(r) => {
            let fullname = r.name.fullname();
            if table.contains(&fullname) {
                return;
            }
            table.insert(fullname, schema.clone());
            for field in &r.fields {
                collect(&field.schema, table);
            }
        }
        Schema::Enum(e) => {
            let fullname = e.name.fullname();
            if !table.contains(&fullname) {
                table.insert(fullname, schema.clone());
            }
        }
        Schema::Fixed(f) => {
            let fullname = f.name.fullname();
            if !table.contains(&fullname) {
                table.insert(fullname, schema.clone());
            }
        }
        Schema::Ref(_) | Schema::Null | Schema::Boolean | Schema::Int | Schema::Long
        | Schema::Float | Schema::Double | Schema::Bytes | Schema::String => {}
    }
}
