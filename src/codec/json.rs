//! The Avro JSON wire encoding: union values are tagged objects (or a bare
//! `null`), bytes/fixed values are strings under a latin-1 byte mapping,
//! and floats/doubles may surface as the non-standard `NaN`/`Infinity`/
//! `-Infinity` barewords the [`json_lexer`](crate::codec::json_lexer)
//! recognises.

use crate::codec::json_lexer::{Lexer, Token};
use crate::codec::{Decoder, Encoder};
use crate::error::{AvrowErr, AvrowResult};
use std::io::{Read, Write};

/// Writes the Avro JSON encoding to an underlying [`Write`].
pub struct JsonEncoder<W: Write> {
    writer: W,
    // Per open array/object: whether an item has already been written, so
    // the next one is preceded by a comma.
    frames: Vec<bool>,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(writer: W) -> Self {
        JsonEncoder {
            writer,
            frames: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn raw(&mut self, s: &str) -> AvrowResult<()> {
        self.writer
            .write_all(s.as_bytes())
            .map_err(AvrowErr::EncodeFailed)
    }

    fn escaped_string(&mut self, s: &str) -> AvrowResult<()> {
        self.writer.write_all(b"\"").map_err(AvrowErr::EncodeFailed)?;
        for c in s.chars() {
            match c {
                '"' => self.raw("\\\"")?,
                '\\' => self.raw("\\\\")?,
                '\n' => self.raw("\\n")?,
                '\r' => self.raw("\\r")?,
                '\t' => self.raw("\\t")?,
                c if (c as u32) < 0x20 => self.raw(&format!("\\u{:04x}", c as u32))?,
                c => {
                    let mut buf = [0u8; 4];
                    self.raw(c.encode_utf8(&mut buf))?
                }
            }
        }
        self.writer.write_all(b"\"").map_err(AvrowErr::EncodeFailed)
    }

    // Bytes and fixed values are encoded as a string where each byte maps
    // to the codepoint of the same value (latin-1), not as UTF-8 of the
    // raw bytes.
    fn latin1_string(&mut self, bytes: &[u8]) -> AvrowResult<()> {
        let s: String = bytes.iter().map(|&b| b as char).collect();
        self.escaped_string(&s)
    }

    fn float_literal(&mut self, v: f64) -> AvrowResult<()> {
        if v.is_nan() {
            self.raw("NaN")
        } else if v == f64::INFINITY {
            self.raw("Infinity")
        } else if v == f64::NEG_INFINITY {
            self.raw("-Infinity")
        } else {
            self.raw(&v.to_string())
        }
    }

    // Emits a comma if this is not the first item of the current
    // array/object frame, then marks the frame as having an item.
    fn item_separator(&mut self) -> AvrowResult<()> {
        if let Some(has_item) = self.frames.last_mut() {
            if *has_item {
                self.writer.write_all(b",").map_err(AvrowErr::EncodeFailed)?;
            } else {
                *has_item = true;
            }
        }
        Ok(())
    }
}

impl<W: Write> Encoder for JsonEncoder<W> {
    fn write_null(&mut self) -> AvrowResult<()> {
        self.raw("null")
    }

    fn write_boolean(&mut self, value: bool) -> AvrowResult<()> {
        self.raw(if value { "true" } else { "false" })
    }

    fn write_int(&mut self, value: i32) -> AvrowResult<()> {
        self.raw(&value.to_string())
    }

    fn write_long(&mut self, value: i64) -> AvrowResult<()> {
        self.raw(&value.to_string())
    }

    fn write_float(&mut self, value: f32) -> AvrowResult<()> {
        self.float_literal(value as f64)
    }

    fn write_double(&mut self, value: f64) -> AvrowResult<()> {
        self.float_literal(value)
    }

    fn write_bytes(&mut self, value: &[u8]) -> AvrowResult<()> {
        self.latin1_string(value)
    }

    fn write_string(&mut self, value: &str) -> AvrowResult<()> {
        self.escaped_string(value)
    }

    fn write_fixed(&mut self, value: &[u8]) -> AvrowResult<()> {
        self.latin1_string(value)
    }

    fn write_enum(&mut self, _ordinal: usize, symbol: &str) -> AvrowResult<()> {
        self.escaped_string(symbol)
    }

    fn write_union_branch(&mut self, _ordinal: usize, branch_name: &str) -> AvrowResult<()> {
        if branch_name == "null" {
            return Ok(());
        }
        self.raw("{")?;
        self.escaped_string(branch_name)?;
        self.raw(":")
    }

    fn write_union_end(&mut self, branch_name: &str) -> AvrowResult<()> {
        if branch_name == "null" {
            return Ok(());
        }
        self.raw("}")
    }

    fn write_array_start(&mut self) -> AvrowResult<()> {
        self.frames.push(false);
        self.raw("[")
    }

    fn set_item_count(&mut self, _count: usize) -> AvrowResult<()> {
        Ok(())
    }

    fn start_item(&mut self) -> AvrowResult<()> {
        self.item_separator()
    }

    fn write_array_end(&mut self) -> AvrowResult<()> {
        self.frames.pop();
        self.raw("]")
    }

    fn write_map_start(&mut self) -> AvrowResult<()> {
        self.frames.push(false);
        self.raw("{")
    }

    fn write_map_key(&mut self, key: &str) -> AvrowResult<()> {
        self.item_separator()?;
        self.escaped_string(key)?;
        self.raw(":")
    }

    fn write_map_end(&mut self) -> AvrowResult<()> {
        self.frames.pop();
        self.raw("}")
    }

    fn write_record_start(&mut self) -> AvrowResult<()> {
        self.frames.push(false);
        self.raw("{")
    }

    fn write_record_field(&mut self, name: &str) -> AvrowResult<()> {
        self.item_separator()?;
        self.escaped_string(name)?;
        self.raw(":")
    }

    fn write_record_end(&mut self) -> AvrowResult<()> {
        self.frames.pop();
        self.raw("}")
    }
}

/// Reads the Avro JSON encoding from an underlying [`Read`].
pub struct JsonDecoder<R: Read> {
    lexer: Lexer<R>,
    // Whether each currently open union value needs a closing `}`.
    union_frames: Vec<bool>,
    // Per open record: whether a field has already been read, so the next
    // one is expected to be preceded by a comma.
    record_frames: Vec<bool>,
}

impl<R: Read> JsonDecoder<R> {
    pub fn new(reader: R) -> Self {
        JsonDecoder {
            lexer: Lexer::new(reader),
            union_frames: Vec::new(),
            record_frames: Vec::new(),
        }
    }

    fn chars_to_bytes(s: &str) -> AvrowResult<Vec<u8>> {
        s.chars()
            .map(|c| {
                let v = c as u32;
                if v > 0xff {
                    Err(AvrowErr::JsonLex(format!(
                        "codepoint U+{:04x} is not a valid latin-1 byte value",
                        v
                    )))
                } else {
                    Ok(v as u8)
                }
            })
            .collect()
    }

    // Consumes tokens until bracket/brace nesting returns to zero. JSON is
    // self-delimiting at the token level, so this needs no schema to know
    // where a value ends, unlike binary's unsized blocks.
    fn skip_balanced(&mut self, mut depth: usize) -> AvrowResult<()> {
        while depth > 0 {
            match self.lexer.next()? {
                Token::ArrayStart | Token::ObjectStart => depth += 1,
                Token::ArrayEnd | Token::ObjectEnd => depth -= 1,
                Token::Eof => {
                    return Err(AvrowErr::JsonLex("unexpected eof while skipping value".into()))
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<R: Read> Decoder for JsonDecoder<R> {
    fn read_null(&mut self) -> AvrowResult<()> {
        match self.lexer.next()? {
            Token::Null => Ok(()),
            t => Err(AvrowErr::JsonLex(format!("expected `null`, found {:?}", t))),
        }
    }

    fn read_boolean(&mut self) -> AvrowResult<bool> {
        match self.lexer.next()? {
            Token::True => Ok(true),
            Token::False => Ok(false),
            t => Err(AvrowErr::JsonLex(format!("expected boolean, found {:?}", t))),
        }
    }

    fn read_int(&mut self) -> AvrowResult<i32> {
        match self.lexer.next()? {
            Token::Number(n) => Ok(n as i32),
            t => Err(AvrowErr::JsonLex(format!("expected number, found {:?}", t))),
        }
    }

    fn read_long(&mut self) -> AvrowResult<i64> {
        match self.lexer.next()? {
            Token::Number(n) => Ok(n as i64),
            t => Err(AvrowErr::JsonLex(format!("expected number, found {:?}", t))),
        }
    }

    fn read_float(&mut self) -> AvrowResult<f32> {
        match self.lexer.next()? {
            Token::Number(n) => Ok(n as f32),
            t => Err(AvrowErr::JsonLex(format!("expected number, found {:?}", t))),
        }
    }

    fn read_double(&mut self) -> AvrowResult<f64> {
        match self.lexer.next()? {
            Token::Number(n) => Ok(n),
            t => Err(AvrowErr::JsonLex(format!("expected number, found {:?}", t))),
        }
    }

    fn read_bytes(&mut self) -> AvrowResult<Vec<u8>> {
        match self.lexer.next()? {
            Token::String(s) => Self::chars_to_bytes(&s),
            t => Err(AvrowErr::JsonLex(format!("expected string, found {:?}", t))),
        }
    }

    fn read_string(&mut self) -> AvrowResult<String> {
        match self.lexer.next()? {
            Token::String(s) => Ok(s),
            t => Err(AvrowErr::JsonLex(format!("expected string, found {:?}", t))),
        }
    }

    fn read_fixed(&mut self, size: usize) -> AvrowResult<Vec<u8>> {
        let bytes = self.read_bytes()?;
        if bytes.len() != size {
            return Err(AvrowErr::FixedValueLenMismatch {
                found: bytes.len(),
                expected: size,
            });
        }
        Ok(bytes)
    }

    fn read_enum(&mut self, symbols: &[String]) -> AvrowResult<usize> {
        let sym = self.read_string()?;
        symbols
            .iter()
            .position(|s| *s == sym)
            .ok_or_else(|| AvrowErr::SchemaDataMismatch(format!("unknown enum symbol `{}`", sym)))
    }

    fn read_union_branch(&mut self, branch_names: &[String]) -> AvrowResult<usize> {
        if self.lexer.peek()? == &Token::Null {
            let idx = branch_names
                .iter()
                .position(|n| n == "null")
                .ok_or_else(|| AvrowErr::UnionBranchNotFound("null".to_string()))?;
            self.union_frames.push(false);
            return Ok(idx);
        }
        match self.lexer.next()? {
            Token::ObjectStart => {}
            t => return Err(AvrowErr::JsonLex(format!("expected union tag object, found {:?}", t))),
        }
        let tag = match self.lexer.next()? {
            Token::String(s) => s,
            t => return Err(AvrowErr::JsonLex(format!("expected union tag string, found {:?}", t))),
        };
        match self.lexer.next()? {
            Token::Colon => {}
            t => return Err(AvrowErr::JsonLex(format!("expected `:`, found {:?}", t))),
        }
        let idx = branch_names
            .iter()
            .position(|n| *n == tag)
            .ok_or_else(|| AvrowErr::UnionBranchNotFound(tag.clone()))?;
        self.union_frames.push(true);
        Ok(idx)
    }

    fn read_union_end(&mut self) -> AvrowResult<()> {
        if self.union_frames.pop().unwrap_or(false) {
            match self.lexer.next()? {
                Token::ObjectEnd => Ok(()),
                t => Err(AvrowErr::JsonLex(format!(
                    "expected `}}` closing union tag object, found {:?}",
                    t
                ))),
            }
        } else {
            Ok(())
        }
    }

    fn read_array_block(&mut self) -> AvrowResult<i64> {
        match self.lexer.peek()?.clone() {
            Token::ArrayStart => {
                self.lexer.next()?;
                match self.lexer.peek()? {
                    Token::ArrayEnd => {
                        self.lexer.next()?;
                        Ok(0)
                    }
                    _ => Ok(1),
                }
            }
            Token::Comma => {
                self.lexer.next()?;
                Ok(1)
            }
            Token::ArrayEnd => {
                self.lexer.next()?;
                Ok(0)
            }
            t => Err(AvrowErr::JsonLex(format!("expected array, found {:?}", t))),
        }
    }

    fn read_array_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn read_map_block(&mut self) -> AvrowResult<i64> {
        match self.lexer.peek()?.clone() {
            Token::ObjectStart => {
                self.lexer.next()?;
                match self.lexer.peek()? {
                    Token::ObjectEnd => {
                        self.lexer.next()?;
                        Ok(0)
                    }
                    _ => Ok(1),
                }
            }
            Token::Comma => {
                self.lexer.next()?;
                Ok(1)
            }
            Token::ObjectEnd => {
                self.lexer.next()?;
                Ok(0)
            }
            t => Err(AvrowErr::JsonLex(format!("expected object, found {:?}", t))),
        }
    }

    fn read_map_key(&mut self) -> AvrowResult<String> {
        let key = self.read_string()?;
        match self.lexer.next()? {
            Token::Colon => Ok(key),
            t => Err(AvrowErr::JsonLex(format!("expected `:`, found {:?}", t))),
        }
    }

    fn read_map_end(&mut self) -> AvrowResult<()> {
        Ok(())
    }

    fn skip_array(&mut self) -> AvrowResult<()> {
        match self.lexer.next()? {
            Token::ArrayStart => self.skip_balanced(1),
            t => Err(AvrowErr::JsonLex(format!("expected array, found {:?}", t))),
        }
    }

    fn skip_map(&mut self) -> AvrowResult<()> {
        match self.lexer.next()? {
            Token::ObjectStart => self.skip_balanced(1),
            t => Err(AvrowErr::JsonLex(format!("expected object, found {:?}", t))),
        }
    }

    fn read_record_start(&mut self) -> AvrowResult<()> {
        match self.lexer.next()? {
            Token::ObjectStart => {
                self.record_frames.push(false);
                Ok(())
            }
            t => Err(AvrowErr::JsonLex(format!("expected `{{` opening record, found {:?}", t))),
        }
    }

    fn read_record_field(&mut self, name: &str) -> AvrowResult<()> {
        if let Some(has_item) = self.record_frames.last_mut() {
            if *has_item {
                match self.lexer.next()? {
                    Token::Comma => {}
                    t => return Err(AvrowErr::JsonLex(format!("expected `,` between fields, found {:?}", t))),
                }
            } else {
                *has_item = true;
            }
        }
        let key = match self.lexer.next()? {
            Token::String(s) => s,
            t => return Err(AvrowErr::JsonLex(format!("expected field name, found {:?}", t))),
        };
        if key != name {
            return Err(AvrowErr::JsonLex(format!(
                "expected field `{}`, found `{}`",
                name, key
            )));
        }
        match self.lexer.next()? {
            Token::Colon => Ok(()),
            t => Err(AvrowErr::JsonLex(format!("expected `:`, found {:?}", t))),
        }
    }

    fn read_record_end(&mut self) -> AvrowResult<()> {
        self.record_frames.pop();
        match self.lexer.next()? {
            Token::ObjectEnd => Ok(()),
            t => Err(AvrowErr::JsonLex(format!("expected `}}` closing record, found {:?}", t))),
        }
    }
}
