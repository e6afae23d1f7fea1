//! The Avro binary wire encoding: zigzag+varint integers, little-endian
//! IEEE-754 floats, length-prefixed bytes/strings, and block-framed
//! arrays/maps terminated by a zero-length block.

use crate::codec::varint;
use crate::codec::{Decoder, Encoder};
use crate::error::{AvrowErr, AvrowResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Writes the Avro binary encoding to an underlying [`Write`].
pub struct BinaryEncoder<W: Write> {
    writer: W,
}

impl<W: Write> BinaryEncoder<W> {
    pub fn new(writer: W) -> Self {
        BinaryEncoder { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_long_raw(&mut self, v: i64) -> AvrowResult<()> {
        let mut buf = Vec::with_capacity(10);
        varint::write_i64(v, &mut buf);
        self.writer.write_all(&buf).map_err(AvrowErr::EncodeFailed)
    }
}

impl<W: Write> Encoder for BinaryEncoder<W> {
    fn write_null(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn write_boolean(&mut self, value: bool) -> AvrowResult<()> {
        self.writer
            .write_u8(value as u8)
            .map_err(AvrowErr::EncodeFailed)
    }

    fn write_int(&mut self, value: i32) -> AvrowResult<()> {
        self.write_long_raw(value as i64)
    }

    fn write_long(&mut self, value: i64) -> AvrowResult<()> {
        self.write_long_raw(value)
    }

    fn write_float(&mut self, value: f32) -> AvrowResult<()> {
        self.writer
            .write_f32::<LittleEndian>(value)
            .map_err(AvrowErr::EncodeFailed)
    }

    fn write_double(&mut self, value: f64) -> AvrowResult<()> {
        self.writer
            .write_f64::<LittleEndian>(value)
            .map_err(AvrowErr::EncodeFailed)
    }

    fn write_bytes(&mut self, value: &[u8]) -> AvrowResult<()> {
        self.write_long_raw(value.len() as i64)?;
        self.writer.write_all(value).map_err(AvrowErr::EncodeFailed)
    }

    fn write_string(&mut self, value: &str) -> AvrowResult<()> {
        self.write_bytes(value.as_bytes())
    }

    fn write_fixed(&mut self, value: &[u8]) -> AvrowResult<()> {
        self.writer.write_all(value).map_err(AvrowErr::EncodeFailed)
    }

    fn write_enum(&mut self, ordinal: usize, _symbol: &str) -> AvrowResult<()> {
        self.write_long_raw(ordinal as i64)
    }

    fn write_union_branch(&mut self, ordinal: usize, _branch_name: &str) -> AvrowResult<()> {
        self.write_long_raw(ordinal as i64)
    }

    fn write_union_end(&mut self, _branch_name: &str) -> AvrowResult<()> {
        Ok(())
    }

    fn write_array_start(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn set_item_count(&mut self, count: usize) -> AvrowResult<()> {
        if count > 0 {
            self.write_long_raw(count as i64)?;
        }
        Ok(())
    }

    fn start_item(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn write_array_end(&mut self) -> AvrowResult<()> {
        self.write_long_raw(0)
    }

    fn write_map_start(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn write_map_key(&mut self, key: &str) -> AvrowResult<()> {
        self.write_string(key)
    }

    fn write_map_end(&mut self) -> AvrowResult<()> {
        self.write_long_raw(0)
    }

    fn write_record_start(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn write_record_field(&mut self, _name: &str) -> AvrowResult<()> {
        Ok(())
    }

    fn write_record_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }
}

/// Reads the Avro binary encoding from an underlying [`Read`].
pub struct BinaryDecoder<R: Read> {
    reader: R,
}

impl<R: Read> BinaryDecoder<R> {
    pub fn new(reader: R) -> Self {
        BinaryDecoder { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_long_raw(&mut self) -> AvrowResult<i64> {
        let reader = &mut self.reader;
        varint::read_i64(|| {
            let mut byte = [0u8; 1];
            reader.read_exact(&mut byte).map_err(|_| AvrowErr::Eof)?;
            Ok(byte[0])
        })
    }

    // A block length is a plain long unless negative, in which case it is
    // immediately followed by a long byte-count for the block (used by
    // writers that want to size a block before emitting it); this decoder
    // only needs the item count, so the byte-count is read and discarded.
    fn read_block_count(&mut self) -> AvrowResult<i64> {
        let count = self.read_long_raw()?;
        if count < 0 {
            let _byte_size = self.read_long_raw()?;
            Ok(-count)
        } else {
            Ok(count)
        }
    }

    // Skips every block of an array or map (the two share the same block
    // framing) by jumping over each block's byte-size prefix. A block with
    // no byte-size (a writer that did not choose to frame it) cannot be
    // skipped without decoding its items one at a time against a schema,
    // which this codec-level trait has no access to.
    fn skip_block(&mut self) -> AvrowResult<()> {
        loop {
            let count = self.read_long_raw()?;
            if count == 0 {
                return Ok(());
            }
            if count > 0 {
                return Err(AvrowErr::DecodeFailed(crate::error::io_err(
                    "cannot skip a block with no byte-size prefix",
                )));
            }
            let byte_size = self.read_long_raw()?;
            self.read_fixed(byte_size as usize)?;
        }
    }
}

impl<R: Read> Decoder for BinaryDecoder<R> {
    fn read_null(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn read_boolean(&mut self) -> AvrowResult<bool> {
        let mut byte = [0u8; 1];
        self.reader.read_exact(&mut byte).map_err(|_| AvrowErr::Eof)?;
        Ok(byte[0] != 0)
    }

    fn read_int(&mut self) -> AvrowResult<i32> {
        Ok(self.read_long_raw()? as i32)
    }

    fn read_long(&mut self) -> AvrowResult<i64> {
        self.read_long_raw()
    }

    fn read_float(&mut self) -> AvrowResult<f32> {
        self.reader
            .read_f32::<LittleEndian>()
            .map_err(|_| AvrowErr::Eof)
    }

    fn read_double(&mut self) -> AvrowResult<f64> {
        self.reader
            .read_f64::<LittleEndian>()
            .map_err(|_| AvrowErr::Eof)
    }

    fn read_bytes(&mut self) -> AvrowResult<Vec<u8>> {
        let len = self.read_long_raw()?;
        if len < 0 {
            return Err(AvrowErr::DecodeFailed(crate::error::io_err(
                "negative bytes length",
            )));
        }
        let mut buf = vec![0u8; len as usize];
        self.reader.read_exact(&mut buf).map_err(|_| AvrowErr::Eof)?;
        Ok(buf)
    }

    fn read_string(&mut self) -> AvrowResult<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| AvrowErr::InvalidUtf8)
    }

    fn read_fixed(&mut self, size: usize) -> AvrowResult<Vec<u8>> {
        let mut buf = vec![0u8; size];
        self.reader.read_exact(&mut buf).map_err(|_| AvrowErr::Eof)?;
        Ok(buf)
    }

    fn read_enum(&mut self, symbols: &[String]) -> AvrowResult<usize> {
        let ordinal = self.read_long_raw()? as usize;
        if ordinal >= symbols.len() {
            return Err(AvrowErr::EnumOrdinalOutOfRange(ordinal, symbols.len()));
        }
        Ok(ordinal)
    }

    fn read_union_branch(&mut self, branch_names: &[String]) -> AvrowResult<usize> {
        let ordinal = self.read_long_raw()? as usize;
        if ordinal >= branch_names.len() {
            return Err(AvrowErr::UnionIndexOutOfRange(ordinal));
        }
        Ok(ordinal)
    }

    fn read_union_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn read_array_block(&mut self) -> AvrowResult<i64> {
        self.read_block_count()
    }

    fn read_array_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn read_map_block(&mut self) -> AvrowResult<i64> {
        self.read_block_count()
    }

    fn read_map_key(&mut self) -> AvrowResult<String> {
        self.read_string()
    }

    fn read_map_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn skip_array(&mut self) -> AvrowResult<()> {
        self.skip_block()
    }

    fn skip_map(&mut self) -> AvrowResult<()> {
        self.skip_block()
    }

    fn read_record_start(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn read_record_field(&mut self, _name: &str) -> AvrowResult<()> {
        Ok(())
    }

    fn read_record_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }
}
