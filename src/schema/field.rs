//! Record field definitions.

use crate::error::AvrowErr;
use crate::schema::name::validate_name;
use crate::schema::Schema;
use crate::util::OrderedMap;
use std::str::FromStr;

/// Sort order a reader/comparator should apply to a field when comparing
/// two records of the same schema. Avro only defines this as a hint; this
/// crate does not implement record comparison itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
    Ignore,
}

impl FromStr for Order {
    type Err = AvrowErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(Order::Ascending),
            "descending" => Ok(Order::Descending),
            "ignore" => Ok(Order::Ignore),
            _ => Err(AvrowErr::UnknownFieldOrdering),
        }
    }
}

/// A single field of a [`Schema::Record`]. `position` is assigned when the
/// field is attached to its record and is unique within that record; a
/// record's field list is set at most once, so `position` never changes
/// after that.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) position: usize,
    pub(crate) schema: Schema,
    pub(crate) doc: Option<String>,
    pub(crate) default: Option<serde_json::Value>,
    pub(crate) order: Order,
    pub(crate) aliases: Vec<String>,
    pub(crate) attributes: OrderedMap,
}

impl Field {
    pub(crate) fn new(name: &str, position: usize, schema: Schema) -> Result<Self, AvrowErr> {
        validate_name(0, name)?;
        Ok(Field {
            name: name.to_string(),
            position,
            schema,
            doc: None,
            default: None,
            order: Order::Ascending,
            aliases: Vec::new(),
            attributes: OrderedMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn default(&self) -> Option<&serde_json::Value> {
        self.default.as_ref()
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn attributes(&self) -> &OrderedMap {
        &self.attributes
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.schema == other.schema
    }
}
