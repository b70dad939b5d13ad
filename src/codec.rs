//! Stream entry points, one set per byte order.
//!
//! [`Codec`] is implemented for every [`ByteOrder`], so the order is picked by
//! naming it at the call site (`BigEndian::write(...)`) and every loop below
//! is compiled for that one order.
//!
//! Two routes are offered, and the compiler picks between them from the
//! argument's type:
//!
//! - [`Codec::read`] / [`Codec::write`] take any [`Flat`] value (a scalar, or
//!   a slice, array or `Vec` of one scalar type). Its length is known from the
//!   element count, so these go straight to one bulk read or write.
//! - [`Codec::read_value`] / [`Codec::write_value`] take any serde value of
//!   fixed size: nested structs, arrays of structs, padding, and on encode a
//!   top-level slice of any of those. They size the value first and reject
//!   anything that is not fixed-size before touching the stream.
//!
//! The walker also accepts scalars and scalar slices, and produces the same
//! bytes as the fast path for them. It does not take the fast path, though: it
//! sizes the value and packs it leaf by leaf through serde. Call
//! [`Codec::write`] / [`Codec::read`] when the data is a scalar slice.

use crate::de;
use crate::error::Result;
use crate::order::ByteOrder;
use crate::primitive::Flat;
use crate::ser;
use crate::size;
use serde::Serialize;
use serde::de::DeserializeOwned;
use smallvec::{SmallVec, smallvec};
use std::io::{Read, Write};

/// Staging buffers up to this many bytes live on the stack.
const INLINE_STAGING: usize = 16;

type Staging = SmallVec<[u8; INLINE_STAGING]>;

/// Encoding and decoding in byte order `Self`.
pub trait Codec: ByteOrder {
    /// Fill `dst` from `reader` with a single `read_exact`.
    ///
    /// A slice or `Vec` destination keeps its length; that many elements are
    /// read. If the stream ends early the error is returned and `dst` is left
    /// as it was.
    fn read<R: Read, T: Flat + ?Sized>(mut reader: R, dst: &mut T) -> Result<()> {
        let mut staging: Staging = smallvec![0; dst.packed_len()];
        reader.read_exact(&mut staging)?;
        dst.unpack::<Self>(&staging);
        Ok(())
    }

    /// Encode `value` and hand it to `writer` in a single `write_all`.
    fn write<W: Write, T: Flat + ?Sized>(mut writer: W, value: &T) -> Result<()> {
        let mut staging: Staging = smallvec![0; value.packed_len()];
        value.pack::<Self>(&mut staging);
        writer.write_all(&staging)?;
        Ok(())
    }

    /// Decode a fixed-size `T` from `reader`.
    fn read_value<R: Read, T: DeserializeOwned + 'static>(reader: R) -> Result<T> {
        de::from_reader::<Self, R, T>(reader)
    }

    /// Decode a fixed-size `T` from `reader` into `dst`. On error `dst` is
    /// unspecified.
    fn read_value_into<R: Read, T: DeserializeOwned + 'static>(
        reader: R,
        dst: &mut T,
    ) -> Result<()> {
        *dst = Self::read_value(reader)?;
        Ok(())
    }

    /// Fill every element of `dst` from `reader`, in index order.
    fn read_values_into<R: Read, T: DeserializeOwned + 'static>(
        reader: R,
        dst: &mut [T],
    ) -> Result<()> {
        de::from_reader_into_slice::<Self, R, T>(reader, dst)
    }

    /// Encode a fixed-size value, or a slice of them, to `writer`.
    fn write_value<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
        ser::to_writer::<Self, W, T>(writer, value)
    }

    /// Encode a fixed-size value, or a slice of them, into a new buffer.
    fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        ser::to_bytes::<Self, T>(value)
    }

    /// Decode a fixed-size `T` from the front of `input`.
    fn from_bytes<T: DeserializeOwned + 'static>(input: &[u8]) -> Result<T> {
        de::from_bytes::<Self, T>(input)
    }

    /// Wire width of `value`; the same in every byte order.
    fn size_of_value<T: Serialize + ?Sized>(value: &T) -> Option<usize> {
        size::size_of_value(value)
    }
}

impl<O: ByteOrder> Codec for O {}
