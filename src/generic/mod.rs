//! [`GenericWriter`]/[`GenericReader`]: thin owners of a codec that drive
//! [`crate::datum::GenericDatum`]'s schema-directed walk. The walk itself
//! lives on `GenericDatum` (`encode`/`decode`); these two types exist so a
//! caller has something to hold onto for the lifetime of one write or read
//! session, the same role the teacher's `Writer`/`Reader` play around an
//! open datafile.

mod resolve;

use crate::codec::{Decoder, Encoder};
use crate::datum::GenericDatum;
use crate::error::AvrowResult;
use crate::schema::table::SchemaTable;
use crate::schema::Schema;

/// Writes one or more datums through an [`Encoder`].
pub struct GenericWriter<E> {
    encoder: E,
}

impl<E: Encoder> GenericWriter<E> {
    pub fn new(encoder: E) -> Self {
        GenericWriter { encoder }
    }

    /// Encodes `datum` against `schema`.
    pub fn write(&mut self, datum: &GenericDatum, schema: &Schema, table: &SchemaTable) -> AvrowResult<()> {
        datum.encode(schema, table, &mut self.encoder)
    }

    pub fn into_inner(self) -> E {
        self.encoder
    }
}

/// Reads one or more datums through a [`Decoder`].
pub struct GenericReader<D> {
    decoder: D,
}

impl<D: Decoder> GenericReader<D> {
    pub fn new(decoder: D) -> Self {
        GenericReader { decoder }
    }

    /// Decodes a datum shaped like `schema`.
    pub fn read(&mut self, schema: &Schema, table: &SchemaTable) -> AvrowResult<GenericDatum> {
        GenericDatum::decode(schema, table, &mut self.decoder)
    }

    /// Decodes a datum written with `writer_schema`, producing a value
    /// shaped like `reader_schema`. This is the opt-in schema-resolution
    /// path; [`GenericReader::read`] (same reader and writer schema) is the
    /// default and does not go through [`resolve`].
    pub fn read_with_resolution(
        &mut self,
        reader_schema: &Schema,
        writer_schema: &Schema,
        table: &SchemaTable,
    ) -> AvrowResult<GenericDatum> {
        resolve::decode_with_resolution(reader_schema, writer_schema, table, &mut self.decoder)
    }

    pub fn into_inner(self) -> D {
        self.decoder
    }
}
