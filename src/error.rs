#![allow(missing_docs)]

use std::fmt::Debug;
use std::io::{Error, ErrorKind};

#[inline(always)]
pub(crate) fn io_err(msg: &str) -> Error {
    Error::new(ErrorKind::Other, msg)
}

pub type AvrowResult<T> = Result<T, AvrowErr>;

/// The coarse error taxonomy callers can match on without enumerating every
/// granular variant below: a schema failed to parse, a value didn't conform
/// to the type an operation expected, or something else in the library went
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// Structural or validity failure while interpreting schema JSON.
    SchemaParse,
    /// Runtime mismatch between a datum's type and an operation.
    AvroType,
    /// Everything else the library signals.
    AvroRuntime,
}

/// Errors returned from avro-core.
#[derive(thiserror::Error, Debug)]
pub enum AvrowErr {
    // Schema parse errors
    #[error("failed to parse avro schema")]
    SchemaParseErr(#[source] std::io::Error),
    #[error("invalid schema json: {0}")]
    SchemaJson(#[from] serde_json::Error),
    #[error("unknown schema, expecting a required `type` field in schema")]
    SchemaParseFailed,
    #[error("expected record field to be a json array")]
    ExpectedFieldsJsonArray,
    #[error("record's field json schema must be an object")]
    InvalidRecordFieldType,
    #[error("record schema does not have a required field named `name`")]
    RecordNameNotFound,
    #[error("record schema does not have a required field named `type`")]
    RecordTypeNotFound,
    #[error("could not parse name from json value")]
    NameParseFailed,
    #[error("duplicate definition of named schema `{0}`")]
    DuplicateSchema(String),
    #[error("duplicate field name `{0}` in record schema")]
    DuplicateField(String),
    #[error("unknown field ordering value")]
    UnknownFieldOrdering,
    #[error("field ordering value must be a string")]
    InvalidFieldOrdering,
    #[error("failed to parse symbol from enum's symbols field")]
    EnumSymbolParseErr,
    #[error("enum schema must contain a required `symbols` field")]
    EnumSymbolsMissing,
    #[error("duplicate symbol `{0}` in enum schema")]
    DuplicateEnumSymbol(String),
    #[error("enum default symbol `{0}` not present in `symbols`")]
    EnumDefaultNotInSymbols(String),
    #[error("fixed schema `size` field must be a number")]
    FixedSizeNotNumber,
    #[error("fixed schema `size` field missing")]
    FixedSizeNotFound,
    #[error("array schema must have an `items` field")]
    ArrayItemsMissing,
    #[error("map schema must have a `values` field")]
    MapValuesMissing,
    #[error("named schema `{0}` must be defined before use")]
    NamedSchemaNotYetDefined(String),
    #[error("expected the avro schema to be a json string, object or array")]
    UnknownSchema,
    #[error("enum schema parsing failed, found: {0}")]
    EnumParseErr(String),
    #[error("primitive schema must be a string")]
    InvalidPrimitiveSchema,
    #[error("namespaces must either be empty or follow the grammar <name>[(<dot><name>)*]")]
    InvalidNamespace,
    #[error("names must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName,
    #[error("{0}")]
    ParsingCanonicalForm(String),

    // Union construction errors
    #[error("unions must not contain immediate union members")]
    NestedUnion,
    #[error("union branches must have distinct fullnames; duplicate `{0}`")]
    DuplicateUnionBranch(String),

    // Default value validation (AvroType)
    #[error("invalid default value for field `{field}`: {reason}")]
    InvalidDefaultValue { field: String, reason: String },
    #[error("invalid default value for union: must conform to branch 0")]
    FailedDefaultUnion,

    // Value / GenericDatum (AvroType) errors
    #[error("expected avro value of a different type than the one found")]
    ExpectedVariantNotFound,
    #[error("mismatch in fixed bytes length: found {found}, expected {expected}")]
    FixedValueLenMismatch { found: usize, expected: usize },
    #[error("union index {0} out of range")]
    UnionIndexOutOfRange(usize),
    #[error("enum ordinal {0} out of range for {1} symbols")]
    EnumOrdinalOutOfRange(usize, usize),
    #[error("field `{0}` not found in record")]
    FieldNotFound(String),
    #[error("value does not match schema: {0}")]
    SchemaDataMismatch(String),
    #[error("operation requires a record value")]
    NotARecord,

    // Encode/decode (AvroRuntime) errors
    #[error("write failed")]
    EncodeFailed(#[source] std::io::Error),
    #[error("read failed")]
    DecodeFailed(#[source] std::io::Error),
    #[error("malformed varint: more than 10 continuation bytes")]
    MalformedVarint,
    #[error("named schema `{0}` was not found in schema table")]
    NamedSchemaNotFound(String),
    #[error("unexpected end of input")]
    Eof,
    #[error("malformed utf-8 in string/bytes value")]
    InvalidUtf8,
    #[error("unexpected json token while decoding avro json: {0}")]
    JsonLex(String),
    #[error("union branch `{0}` not found in schema")]
    UnionBranchNotFound(String),

    // Schema resolution (AvroRuntime), only reachable via the opt-in resolve path
    #[error("reader's record name does not match writer's record name")]
    RecordNameMismatch,
    #[error("reader's enum name does not match writer's enum name")]
    EnumNameMismatch,
    #[error("fixed schema names or sizes do not match between reader and writer")]
    FixedSchemaMismatch,
    #[error("array items schema does not match between reader and writer")]
    ArrayItemsMismatch,
    #[error("map value schema does not match between reader and writer")]
    MapSchemaMismatch,
    #[error("writer's schema was not found among reader's union branches")]
    WriterNotInReader,
    #[error("reader's union schema does not match writer's selected branch")]
    UnionSchemaMismatch,
    #[error("schema resolution failed: reader {0}, writer {1}")]
    SchemaResolutionFailed(String, String),
}

impl AvrowErr {
    /// Classifies this error into the three-kind taxonomy from the library's
    /// error handling design: schema parsing, value/type mismatches, or
    /// everything else the library signals at runtime.
    pub fn kind(&self) -> ErrKind {
        use AvrowErr::*;
        match self {
            SchemaParseErr(_)
            | SchemaJson(_)
            | SchemaParseFailed
            | ExpectedFieldsJsonArray
            | InvalidRecordFieldType
            | RecordNameNotFound
            | RecordTypeNotFound
            | NameParseFailed
            | DuplicateSchema(_)
            | DuplicateField(_)
            | UnknownFieldOrdering
            | InvalidFieldOrdering
            | EnumSymbolParseErr
            | EnumSymbolsMissing
            | DuplicateEnumSymbol(_)
            | EnumDefaultNotInSymbols(_)
            | FixedSizeNotNumber
            | FixedSizeNotFound
            | ArrayItemsMissing
            | MapValuesMissing
            | NamedSchemaNotYetDefined(_)
            | UnknownSchema
            | EnumParseErr(_)
            | InvalidPrimitiveSchema
            | InvalidNamespace
            | InvalidName
            | ParsingCanonicalForm(_) => ErrKind::SchemaParse,

            InvalidDefaultValue { .. }
            | FailedDefaultUnion
            | ExpectedVariantNotFound
            | FixedValueLenMismatch { .. }
            | UnionIndexOutOfRange(_)
            | FieldNotFound(_)
            | SchemaDataMismatch(_)
            | NotARecord => ErrKind::AvroType,

            NestedUnion
            | DuplicateUnionBranch(_)
            | EncodeFailed(_)
            | DecodeFailed(_)
            | MalformedVarint
            | EnumOrdinalOutOfRange(_, _)
            | NamedSchemaNotFound(_)
            | Eof
            | InvalidUtf8
            | JsonLex(_)
            | UnionBranchNotFound(_)
            | RecordNameMismatch
            | EnumNameMismatch
            | FixedSchemaMismatch
            | ArrayItemsMismatch
            | MapSchemaMismatch
            | WriterNotInReader
            | UnionSchemaMismatch
            | SchemaResolutionFailed(_, _) => ErrKind::AvroRuntime,
        }
    }
}
