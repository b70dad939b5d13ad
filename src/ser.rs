//! Walker encoder.
//!
//! The [`Serializer`] packs any fixed-size value into a staging buffer, one
//! leaf at a time, in declaration order. Every entry point sizes the value
//! first, so the buffer is allocated once and a value that is not fixed-size
//! is rejected before anything reaches the writer.
//!
//! ## Wire format summary
//! - `bool`: 1 byte, 0 or 1
//! - Integers: 1, 2, 4 or 8 bytes in the chosen byte order, two's complement
//! - Floats: raw IEEE 754 bits, 4 or 8 bytes
//! - Structs / tuples / arrays: fields encoded consecutively, no prefix, no alignment
//! - Padding: the reserved width as zero bytes
//! - A top-level slice: elements encoded consecutively, no length prefix

use crate::error::{Error, Result};
use crate::order::ByteOrder;
use crate::size;
use serde::ser::{self, Impossible, Serialize};
use std::io::Write;
use std::marker::PhantomData;

// ── Public entry points ────────────────────────────────────────────────────

/// Encode `value` into a freshly allocated `Vec<u8>`.
pub fn to_bytes<O: ByteOrder, T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let width = sized::<T>(value)?;
    let mut ser = Serializer::<O>::with_capacity(width);
    value.serialize(&mut ser)?;
    let buf = ser.into_inner();
    debug_assert_eq!(buf.len(), width);
    Ok(buf)
}

/// Encode `value` and hand it to `writer` in a single `write_all`.
pub fn to_writer<O: ByteOrder, W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
) -> Result<()> {
    let buf = to_bytes::<O, T>(value)?;
    writer.write_all(&buf)?;
    Ok(())
}

fn sized<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    size::value_width(value).inspect_err(|e| tracing::debug!(error = %e, "rejected encode"))
}

// ── Serializer ─────────────────────────────────────────────────────────────

/// The walker encoder, packing leaves in byte order `O`.
///
/// Obtain one via [`to_bytes`] / [`to_writer`], or construct directly:
///
/// ```rust
/// use endian_serde::LittleEndian;
/// use endian_serde::ser::Serializer;
/// use serde::Serialize;
///
/// let mut ser = Serializer::<LittleEndian>::with_capacity(4);
/// 0x0102_0304u32.serialize(&mut ser).unwrap();
/// assert_eq!(ser.into_inner(), [4, 3, 2, 1]);
/// ```
///
/// Used directly it performs no size check, so values that are not
/// fixed-size fail part-way with [`Error::Unsupported`].
pub struct Serializer<O: ByteOrder> {
    buf: Vec<u8>,
    _order: PhantomData<O>,
}

impl<O: ByteOrder> Serializer<O> {
    /// Create a serializer whose staging buffer holds `capacity` bytes
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Serializer {
            buf: Vec::with_capacity(capacity),
            _order: PhantomData,
        }
    }

    /// Consume the serializer and return the encoded bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    fn zero_fill(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }
}

// ── serde::Serializer impl ─────────────────────────────────────────────────

impl<'a, O: ByteOrder> ser::Serializer for &'a mut Serializer<O> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    // ── Primitives ─────────────────────────────────────────────────────────

    /// `true` is byte 1, `false` is byte 0
    fn serialize_bool(self, v: bool) -> Result<()> {
        self.buf.push(v as u8);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.buf.push(v as u8);
        Ok(())
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        O::append_u16(&mut self.buf, v as u16);
        Ok(())
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        O::append_u32(&mut self.buf, v as u32);
        Ok(())
    }
    fn serialize_i64(self, v: i64) -> Result<()> {
        O::append_u64(&mut self.buf, v as u64);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.buf.push(v);
        Ok(())
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        O::append_u16(&mut self.buf, v);
        Ok(())
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        O::append_u32(&mut self.buf, v);
        Ok(())
    }
    fn serialize_u64(self, v: u64) -> Result<()> {
        O::append_u64(&mut self.buf, v);
        Ok(())
    }

    /// IEEE 754 single precision, raw bits
    fn serialize_f32(self, v: f32) -> Result<()> {
        O::append_u32(&mut self.buf, v.to_bits());
        Ok(())
    }
    /// IEEE 754 double precision, raw bits
    fn serialize_f64(self, v: f64) -> Result<()> {
        O::append_u64(&mut self.buf, v.to_bits());
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Err(Error::Unsupported("a 128-bit integer"))
    }
    fn serialize_u128(self, _v: u128) -> Result<()> {
        Err(Error::Unsupported("a 128-bit integer"))
    }
    fn serialize_char(self, _v: char) -> Result<()> {
        Err(Error::Unsupported("a char"))
    }
    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(Error::Unsupported("a string"))
    }
    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::Unsupported("a byte buffer"))
    }
    fn serialize_none(self) -> Result<()> {
        Err(Error::Unsupported("an option"))
    }
    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<()> {
        Err(Error::Unsupported("an option"))
    }

    /// Zero-sized: `()` and unit structs such as `PhantomData`
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::Unsupported("an enum"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()> {
        Err(Error::Unsupported("an enum"))
    }

    /// Runtime sequence: elements only, the length is never written
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        if len.is_none() {
            return Err(Error::LengthRequired);
        }
        Ok(self)
    }

    /// Fixed-length array / tuple: elements without a prefix
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        if name == crate::PADDING_TOKEN {
            // `Padding` sends no fields; `len` is the reserved width.
            self.zero_fill(len);
        }
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::Unsupported("an enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::Unsupported("a map"))
    }

    /// Struct: fields encoded consecutively in declaration order
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::Unsupported("an enum"))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── Compound serializer impls ──────────────────────────────────────────────

macro_rules! forward_serialize_element {
    ($t:ty) => {
        impl<'a, O: ByteOrder> $t for &'a mut Serializer<O> {
            type Ok = ();
            type Error = Error;
            fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

forward_serialize_element!(ser::SerializeSeq);
forward_serialize_element!(ser::SerializeTuple);

impl<'a, O: ByteOrder> ser::SerializeTupleStruct for &'a mut Serializer<O> {
    type Ok = ();
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, O: ByteOrder> ser::SerializeStruct for &'a mut Serializer<O> {
    type Ok = ();
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}
