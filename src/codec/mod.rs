//! Wire codecs: the binary encoding and the JSON encoding share one
//! [`Encoder`]/[`Decoder`] abstraction so [`crate::datum::GenericDatum`]'s
//! read/write walk is written once and is codec-agnostic.

pub mod binary;
pub mod json;
pub mod json_lexer;
pub mod varint;
pub mod zigzag;

use crate::error::AvrowResult;

/// Writes primitive Avro values and frames complex-type boundaries. A
/// caller encoding a record writes its fields in schema order; a caller
/// encoding an array calls [`Encoder::write_array_start`], optionally
/// [`Encoder::set_item_count`] once the count is known, [`Encoder::start_item`]
/// before each element, and [`Encoder::write_array_end`] once no more
/// elements remain. Maps follow the same shape with [`Encoder::write_map_key`]
/// before each value.
pub trait Encoder {
    fn write_null(&mut self) -> AvrowResult<()>;
    fn write_boolean(&mut self, value: bool) -> AvrowResult<()>;
    fn write_int(&mut self, value: i32) -> AvrowResult<()>;
    fn write_long(&mut self, value: i64) -> AvrowResult<()>;
    fn write_float(&mut self, value: f32) -> AvrowResult<()>;
    fn write_double(&mut self, value: f64) -> AvrowResult<()>;
    fn write_bytes(&mut self, value: &[u8]) -> AvrowResult<()>;
    fn write_string(&mut self, value: &str) -> AvrowResult<()>;
    fn write_fixed(&mut self, value: &[u8]) -> AvrowResult<()>;
    fn write_enum(&mut self, ordinal: usize, symbol: &str) -> AvrowResult<()>;

    /// Begins a union value. `ordinal` is the branch index in schema order;
    /// `branch_name` is that branch's fullname/type-tag, used by the JSON
    /// encoder to choose the tag key (and to recognise the untagged `null`
    /// case). Binary encoding ignores `branch_name`.
    fn write_union_branch(&mut self, ordinal: usize, branch_name: &str) -> AvrowResult<()>;
    /// Closes a union value opened with [`Encoder::write_union_branch`].
    fn write_union_end(&mut self, branch_name: &str) -> AvrowResult<()>;

    fn write_array_start(&mut self) -> AvrowResult<()>;
    /// Declares how many items remain in the current (or next) block. Only
    /// the binary encoder uses this; it is a no-op for JSON.
    fn set_item_count(&mut self, count: usize) -> AvrowResult<()>;
    fn start_item(&mut self) -> AvrowResult<()>;
    fn write_array_end(&mut self) -> AvrowResult<()>;

    fn write_map_start(&mut self) -> AvrowResult<()>;
    fn write_map_key(&mut self, key: &str) -> AvrowResult<()>;
    fn write_map_end(&mut self) -> AvrowResult<()>;

    /// Begins a record value. Binary encoding has no framing for records
    /// (fields are simply written back to back in schema order) so this is
    /// a no-op there; JSON opens the enclosing `{`.
    fn write_record_start(&mut self) -> AvrowResult<()>;
    /// Announces the next field by name, in schema order. A no-op for
    /// binary; JSON writes the field's key and `:`.
    fn write_record_field(&mut self, name: &str) -> AvrowResult<()>;
    /// Closes a record opened with [`Encoder::write_record_start`].
    fn write_record_end(&mut self) -> AvrowResult<()>;
}

/// Reads primitive Avro values and the complex-type framing written by a
/// matching [`Encoder`]. Array/map reads return a block length; a positive
/// count means that many items follow, zero means no more items, and the
/// binary encoding's negative-count-then-byte-size form is resolved
/// transparently so callers never see it.
pub trait Decoder {
    fn read_null(&mut self) -> AvrowResult<()>;
    fn read_boolean(&mut self) -> AvrowResult<bool>;
    fn read_int(&mut self) -> AvrowResult<i32>;
    fn read_long(&mut self) -> AvrowResult<i64>;
    fn read_float(&mut self) -> AvrowResult<f32>;
    fn read_double(&mut self) -> AvrowResult<f64>;
    fn read_bytes(&mut self) -> AvrowResult<Vec<u8>>;
    fn read_string(&mut self) -> AvrowResult<String>;
    fn read_fixed(&mut self, size: usize) -> AvrowResult<Vec<u8>>;
    fn read_enum(&mut self, symbols: &[String]) -> AvrowResult<usize>;

    /// Reads a union's branch selector. `branch_names` are the candidate
    /// branches' fullnames/type-tags in schema order; returns the selected
    /// branch's index.
    fn read_union_branch(&mut self, branch_names: &[String]) -> AvrowResult<usize>;
    fn read_union_end(&mut self) -> AvrowResult<()>;

    /// Starts reading an array, returning the first block's item count (0
    /// if the array is empty).
    fn read_array_block(&mut self) -> AvrowResult<i64>;
    fn read_array_end(&mut self) -> AvrowResult<()>;

    /// Starts or continues reading a map, returning the next block's item
    /// count (0 once exhausted).
    fn read_map_block(&mut self) -> AvrowResult<i64>;
    fn read_map_key(&mut self) -> AvrowResult<String>;
    fn read_map_end(&mut self) -> AvrowResult<()>;

    /// Skips a whole array value without materialising its items. Binary
    /// can only do this for blocks a writer framed with an explicit
    /// byte-size prefix; JSON can always do it, since a JSON array is
    /// self-delimiting.
    fn skip_array(&mut self) -> AvrowResult<()>;
    /// Skips a whole map value without materialising its entries, under
    /// the same conditions as [`Decoder::skip_array`].
    fn skip_map(&mut self) -> AvrowResult<()>;

    /// Starts reading a record. A no-op for binary; JSON expects `{`.
    fn read_record_start(&mut self) -> AvrowResult<()>;
    /// Consumes the framing before the next field, whose name is `name` in
    /// schema order. A no-op for binary; JSON consumes a leading comma (if
    /// this is not the first field), the key, and the `:`.
    fn read_record_field(&mut self, name: &str) -> AvrowResult<()>;
    /// Finishes reading a record opened with [`Decoder::read_record_start`].
    fn read_record_end(&mut self) -> AvrowResult<()>;
}
