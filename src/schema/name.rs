//! The primitive type tag and the `fullname` machinery shared by every named
//! Avro type (record, enum, fixed).

use crate::error::AvrowErr;
use serde_json::Value as JsonValue;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The closed set of Avro type tags: eight primitives plus the six complex
/// types. Primitive names map one-to-one to their lowercase spelling in
/// schema JSON and cannot be redefined by a named schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Record,
    Enum,
    Array,
    Map,
    Union,
    Fixed,
}

impl Type {
    pub(crate) fn primitive_from_str(s: &str) -> Option<Type> {
        Some(match s {
            "null" => Type::Null,
            "boolean" => Type::Boolean,
            "int" => Type::Int,
            "long" => Type::Long,
            "float" => Type::Float,
            "double" => Type::Double,
            "bytes" => Type::Bytes,
            "string" => Type::String,
            _ => return None,
        })
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Int => "int",
            Type::Long => "long",
            Type::Float => "float",
            Type::Double => "double",
            Type::Bytes => "bytes",
            Type::String => "string",
            Type::Record => "record",
            Type::Enum => "enum",
            Type::Array => "array",
            Type::Map => "map",
            Type::Union => "union",
            Type::Fixed => "fixed",
        };
        write!(f, "{}", s)
    }
}

pub(crate) fn validate_name(idx: usize, name: &str) -> Result<(), AvrowErr> {
    if name.is_empty() {
        return Err(AvrowErr::InvalidName);
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if idx == 0 && !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(AvrowErr::InvalidName);
    }
    if !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return Err(AvrowErr::InvalidName);
    }
    Ok(())
}

// Follows the grammar: <empty> | <name>[(<dot><name>)*]
pub(crate) fn validate_namespace(s: &str) -> Result<(), AvrowErr> {
    if s.is_empty() {
        return Ok(());
    }
    for n in s.split('.') {
        validate_name(0, n).map_err(|_| AvrowErr::InvalidNamespace)?;
    }
    Ok(())
}

/// The `fullname` of a named Avro type: a (local name, namespace) pair.
/// Equality and hashing are defined over the fully-qualified form
/// `namespace.local` (or bare `local` when there is no namespace).
#[derive(Debug, Clone, Eq)]
pub struct Name {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
}

impl Name {
    /// Builds a `Name` from a possibly-qualified string, splitting at the
    /// last dot. Any further call to [`set_namespace`](Name::set_namespace)
    /// is then a no-op, since the name already carries its namespace.
    pub fn new(name: &str) -> Result<Self, AvrowErr> {
        let (namespace, local) = if let Some(idx) = name.rfind('.') {
            validate_namespace(&name[..idx])?;
            (Some(name[..idx].to_string()), &name[idx + 1..])
        } else {
            (None, name)
        };
        validate_name(0, local)?;
        Ok(Self {
            name: local.to_string(),
            namespace,
        })
    }

    pub(crate) fn from_json(
        json: &serde_json::Map<String, JsonValue>,
        enclosing_namespace: Option<&str>,
    ) -> Result<Self, AvrowErr> {
        let mut name = match json.get("name") {
            Some(JsonValue::String(s)) => Name::new(s)?,
            _ => return Err(AvrowErr::NameParseFailed),
        };

        // A dotted `name` is already a fullname and any `namespace` key is
        // ignored; otherwise prefer an explicit `namespace` key, falling
        // back to the enclosing default namespace.
        if name.namespace.is_none() {
            if let Some(JsonValue::String(ns)) = json.get("namespace") {
                name.set_namespace(ns)?;
            } else if let Some(ns) = enclosing_namespace {
                name.set_namespace(ns)?;
            }
        }

        Ok(name)
    }

    pub(crate) fn set_namespace(&mut self, namespace: &str) -> Result<(), AvrowErr> {
        validate_namespace(namespace)?;
        // empty string normalises to "no namespace"
        if namespace.is_empty() || self.namespace.is_some() {
            return Ok(());
        }
        self.namespace = Some(namespace.to_string());
        Ok(())
    }

    pub fn local_name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fullname())
    }
}

impl FromStr for Name {
    type Err = AvrowErr;
    fn from_str(s: &str) -> Result<Self, AvrowErr> {
        Name::new(s)
    }
}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fullname().hash(state);
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.fullname() == other.fullname()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_starts_with_number_is_invalid() {
        assert!(Name::new("2org").is_err());
    }

    #[test]
    fn invalid_namespace_segment() {
        let mut name = Name::new("hello").unwrap();
        assert!(name.set_namespace("23").is_err());
    }

    #[test]
    fn set_namespace_separately() {
        let mut name = Name::new("hello").unwrap();
        name.set_namespace("org.foo").unwrap();
        assert_eq!(name.fullname(), "org.foo.hello");
    }

    #[test]
    fn dotted_name_splits_at_last_dot() {
        let name = Name::new("org.apache.avro").unwrap();
        assert_eq!(name.local_name(), "avro");
        assert_eq!(name.fullname(), "org.apache.avro");
    }

    #[test]
    fn empty_namespace_normalises_to_none() {
        let mut name = Name::new("org.apache.avro").unwrap();
        name.set_namespace("").unwrap();
        assert_eq!(name.fullname(), "org.apache.avro");
    }

    #[test]
    fn multiple_dots_invalid() {
        assert!(validate_namespace("some.namespace..foo").is_err());
    }

    #[test]
    fn dotted_name_ignores_namespace_key() {
        let json_str = r##"{"name":"my.longlist","namespace":"com.some","type":"record"}"##;
        let json: JsonValue = serde_json::from_str(json_str).unwrap();
        let name = Name::from_json(json.as_object().unwrap(), None).unwrap();
        assert_eq!(name.local_name(), "longlist");
        assert_eq!(name.namespace(), Some("my"));
    }

    #[test]
    fn bare_name_uses_namespace_key() {
        let json_str = r##"{"name":"longlist","namespace":"com.some","type":"record"}"##;
        let json: JsonValue = serde_json::from_str(json_str).unwrap();
        let name = Name::from_json(json.as_object().unwrap(), None).unwrap();
        assert_eq!(name.fullname(), "com.some.longlist");
    }

    #[test]
    fn name_regular_language() {
        for ok in ["_foo", "Foo1", "a_b_2"] {
            assert!(validate_name(0, ok).is_ok(), "{}", ok);
        }
        for bad in ["1foo", "foo-bar", "foo.bar", "", "foo bar"] {
            assert!(validate_name(0, bad).is_err(), "{}", bad);
        }
    }
}
