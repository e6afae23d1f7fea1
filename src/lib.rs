//! avro-core is a pure Rust implementation of the [Apache Avro](https://avro.apache.org/docs/current/spec.html)
//! schema model, generic data model, and binary/JSON wire codecs.
//!
//! This crate covers the schema and data layer of Avro: parsing schema
//! JSON into a [`Schema`], holding a dynamically-typed [`GenericDatum`]
//! against that schema, and moving datums to and from bytes in both of
//! Avro's wire encodings. It does not implement the object container file
//! format, RPC, or specific-record code generation — see the crate's
//! `DESIGN.md` for the reasoning.
//!
//! ## Parsing a schema and round-tripping a value
//!
//!```rust
//! use avro_core::codec::binary::{BinaryDecoder, BinaryEncoder};
//! use avro_core::datum::GenericDatum;
//! use avro_core::generic::{GenericReader, GenericWriter};
//! use avro_core::schema::table::SchemaTable;
//! use avro_core::Schema;
//! use std::str::FromStr;
//! use anyhow::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let schema = Schema::from_str(r#""string""#)?;
//!     let table = SchemaTable::new();
//!
//!     let datum = GenericDatum::from("hello avro".to_string());
//!     let mut buf = Vec::new();
//!     let mut writer = GenericWriter::new(BinaryEncoder::new(&mut buf));
//!     writer.write(&datum, &schema, &table)?;
//!
//!     let mut reader = GenericReader::new(BinaryDecoder::new(buf.as_slice()));
//!     let decoded = reader.read(&schema, &table)?;
//!     assert_eq!(decoded, datum);
//!
//!     Ok(())
//! }
//!```

#![deny(unused_must_use)]
#![deny(rust_2018_idioms)]

pub mod codec;
pub mod config;
pub mod datum;
mod error;
pub mod generic;
pub mod io;
pub mod schema;
pub mod util;

pub use datum::{GenericDatum, GenericRecord};
pub use error::{AvrowErr, AvrowResult, ErrKind};
pub use generic::{GenericReader, GenericWriter};
pub use schema::Schema;
