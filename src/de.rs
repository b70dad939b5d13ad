//! Walker decoder.

use crate::error::{Error, Result};
use crate::order::ByteOrder;
use crate::size;
use serde::de::{self, DeserializeOwned, SeqAccess, Visitor};
use std::io::Read;
use std::marker::PhantomData;

/// Decode a `T` from the front of `input`. Trailing bytes are ignored.
pub fn from_bytes<O: ByteOrder, T: DeserializeOwned + 'static>(input: &[u8]) -> Result<T> {
    let (value, _) = from_bytes_partial::<O, T>(input)?;
    Ok(value)
}

/// Decode a `T` from the front of `input`, also returning the unconsumed bytes.
pub fn from_bytes_partial<O: ByteOrder, T: DeserializeOwned + 'static>(
    input: &[u8],
) -> Result<(T, &[u8])> {
    let width = sized::<T>()?;
    if input.len() < width {
        return Err(Error::UnexpectedEof);
    }
    let mut de = Deserializer::<O>::new(input);
    let value = T::deserialize(&mut de)?;
    Ok((value, de.remaining()))
}

/// Decode a `T` from `reader` with a single `read_exact` of its wire width.
pub fn from_reader<O: ByteOrder, R: Read, T: DeserializeOwned + 'static>(
    mut reader: R,
) -> Result<T> {
    let width = sized::<T>()?;
    let mut staging = vec![0u8; width];
    reader.read_exact(&mut staging)?;
    T::deserialize(&mut Deserializer::<O>::new(&staging))
}

/// Fill `dst` with consecutive `T`s decoded from `reader`. The slice's length
/// decides how many; the whole range is fetched with a single `read_exact`.
///
/// On error the contents of `dst` are unspecified.
pub fn from_reader_into_slice<O: ByteOrder, R: Read, T: DeserializeOwned + 'static>(
    mut reader: R,
    dst: &mut [T],
) -> Result<()> {
    let total = sized::<T>()?
        .checked_mul(dst.len())
        .ok_or(Error::SizeOverflow)?;
    let mut staging = vec![0u8; total];
    reader.read_exact(&mut staging)?;
    let mut de = Deserializer::<O>::new(&staging);
    for slot in dst.iter_mut() {
        *slot = T::deserialize(&mut de)?;
    }
    Ok(())
}

fn sized<T: DeserializeOwned + 'static>() -> Result<usize> {
    size::type_width::<T>().inspect_err(|e| tracing::debug!(error = %e, "rejected decode"))
}

/// The walker decoder: a cursor over a byte slice, reading leaves in byte
/// order `O`.
pub struct Deserializer<'de, O: ByteOrder> {
    input: &'de [u8],
    pos: usize,
    _order: PhantomData<O>,
}

impl<'de, O: ByteOrder> Deserializer<'de, O> {
    pub fn new(input: &'de [u8]) -> Self {
        Deserializer {
            input,
            pos: 0,
            _order: PhantomData,
        }
    }

    /// Returns the unconsumed portion of the input buffer.
    pub fn remaining(&self) -> &'de [u8] {
        &self.input[self.pos..]
    }

    /// Consume exactly `n` bytes, returning a slice. Fails with UnexpectedEof.
    fn take(&mut self, n: usize) -> Result<&'de [u8]> {
        if self.input.len() - self.pos < n {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(O::decode_u16(self.take(2)?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(O::decode_u32(self.take(4)?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(O::decode_u64(self.take(8)?))
    }
}

macro_rules! reject {
    ($method:ident, $what:expr) => {
        fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
            Err(Error::Unsupported($what))
        }
    };
}

// ── Main Deserializer impl ─────────────────────────────────────────────────

impl<'de, 'a, O: ByteOrder> de::Deserializer<'de> for &'a mut Deserializer<'de, O> {
    type Error = Error;

    /// Any non-zero byte is `true`.
    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bool(self.read_u8()? != 0)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i8(self.read_u8()? as i8)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i16(self.read_u16()? as i16)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i32(self.read_u32()? as i32)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i64(self.read_u64()? as i64)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u8(self.read_u8()?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u16(self.read_u16()?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u32(self.read_u32()?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u64(self.read_u64()?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f32(f32::from_bits(self.read_u32()?))
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f64(f64::from_bits(self.read_u64()?))
    }

    // The format is not self-describing and carries no variable-length data.
    reject!(deserialize_any, "a self-describing member");
    reject!(deserialize_ignored_any, "a self-describing member");
    reject!(deserialize_char, "a char");
    reject!(deserialize_i128, "a 128-bit integer");
    reject!(deserialize_u128, "a 128-bit integer");
    reject!(deserialize_str, "a string");
    reject!(deserialize_string, "a string");
    reject!(deserialize_bytes, "a byte buffer");
    reject!(deserialize_byte_buf, "a byte buffer");
    reject!(deserialize_option, "an option");
    reject!(deserialize_seq, "a sequence");
    reject!(deserialize_map, "a map");
    reject!(deserialize_identifier, "an identifier");

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        if name == crate::PADDING_TOKEN {
            // Skipped without producing a value.
            self.take(len)?;
            return visitor.visit_unit();
        }
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        // Fields in declaration order, no prefix
        visitor.visit_seq(SeqDeserializer::new(self, fields.len()))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::Unsupported("an enum"))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── SeqDeserializer: fixed count ───────────────────────────────────────────

struct SeqDeserializer<'a, 'de: 'a, O: ByteOrder> {
    de: &'a mut Deserializer<'de, O>,
    remaining: usize,
}

impl<'a, 'de, O: ByteOrder> SeqDeserializer<'a, 'de, O> {
    fn new(de: &'a mut Deserializer<'de, O>, count: usize) -> Self {
        SeqDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de, 'a, O: ByteOrder> SeqAccess<'de> for SeqDeserializer<'a, 'de, O> {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}
