//! # endian-serde
//!
//! Fixed-width binary encoding of scalars, scalar slices and fixed-size
//! aggregates in a caller-chosen byte order, built on top of the `serde`
//! framework.
//!
//! ## Overview
//!
//! The wire format is the value's in-memory shape and nothing else: each leaf
//! is written at its natural width, in declaration order, in the byte order of
//! the codec. There are no length prefixes, type tags or alignment gaps.
//! Because nothing is self-describing, both ends must agree on the type and
//! on the byte order out of band. Decoding with the wrong order silently
//! produces different numbers.
//!
//! Byte orders are zero-sized types: [`LittleEndian`], [`BigEndian`], and the
//! aliases [`NativeEndian`] and [`NetworkEndian`]. The [`Codec`] trait gives
//! each of them the stream entry points.
//!
//! ## Two entry points
//!
//! There is no single `read` / `write` that picks its strategy at runtime.
//! The caller picks it by choosing the method:
//!
//! - [`Codec::read`] / [`Codec::write`] are the bulk fast path. They accept a
//!   scalar, or a slice, array or `Vec` of one scalar type.
//! - [`Codec::read_value`] / [`Codec::write_value`] run the general walker.
//!   They accept any fixed-size serde value.
//!
//! `write_value` on a scalar slice produces exactly the bytes `write` would.
//! It skips the bulk fast path, though, and sizes and packs the slice one
//! element at a time.
//!
//! ```rust
//! use endian_serde::{Codec, LittleEndian};
//!
//! let data = [1u32, 2, 3];
//! let mut fast = Vec::new();
//! LittleEndian::write(&mut fast, &data[..]).unwrap();
//! let mut walked = Vec::new();
//! LittleEndian::write_value(&mut walked, &data[..]).unwrap();
//! assert_eq!(fast, walked);
//! ```
//!
//! ## Type mapping
//!
//! | Rust / serde type | Encoding |
//! |-------------------|----------|
//! | `bool`            | 1 byte: 0 (false) or 1 (true); any non-zero byte decodes as true |
//! | `i8`, `u8`        | 1 byte |
//! | `i16`, `u16`      | 2 bytes |
//! | `i32`, `u32`      | 4 bytes |
//! | `i64`, `u64`      | 8 bytes |
//! | `f32`, `f64`      | 4 / 8 bytes, raw IEEE 754 bits |
//! | [`Complex32`], [`Complex64`] | real part then imaginary part |
//! | `[T; N]`, tuples  | elements consecutively |
//! | Struct            | fields consecutively, declaration order |
//! | [`Padding<T>`]    | `size_of::<T>()` zero bytes, skipped on decode |
//! | `()` / unit struct | 0 bytes |
//! | `&[T]`, `Vec<T>` (top level only) | elements consecutively, length from the caller |
//!
//! Strings, options, enums, maps, `char` and nested sequences are not
//! fixed-size and are rejected before any I/O.
//!
//! ## Example
//!
//! ```rust
//! use endian_serde::{BigEndian, Codec, LittleEndian};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct FileHeader {
//!     magic: [u8; 4],
//!     version: u16,
//!     flags: u16,
//!     length: u64,
//! }
//!
//! let hdr = FileHeader {
//!     magic: *b"ESRD",
//!     version: 2,
//!     flags: 0,
//!     length: 0x0102030405060708,
//! };
//!
//! // Aggregates go through the walker
//! let mut buf = Vec::new();
//! BigEndian::write_value(&mut buf, &hdr).unwrap();
//! assert_eq!(buf.len(), 16); // 4 + 2 + 2 + 8
//! assert_eq!(&buf[8..], [1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! let decoded: FileHeader = BigEndian::read_value(&buf[..]).unwrap();
//! assert_eq!(hdr, decoded);
//!
//! // Scalars and scalar slices take the fast path
//! let mut out = Vec::new();
//! LittleEndian::write(&mut out, &[1u16, 2, 3][..]).unwrap();
//! assert_eq!(out, [1, 0, 2, 0, 3, 0]);
//!
//! let mut back = [0u16; 3];
//! LittleEndian::read(&out[..], &mut back).unwrap();
//! assert_eq!(back, [1, 2, 3]);
//! ```

pub mod codec;
pub mod complex;
pub mod de;
pub mod error;
pub mod order;
pub mod padding;
pub mod primitive;
pub mod ser;
pub mod size;

pub use codec::Codec;
pub use complex::{Complex, Complex32, Complex64};
pub use de::{Deserializer, from_bytes, from_bytes_partial, from_reader, from_reader_into_slice};
pub use error::{Error, Result};
pub use order::{BigEndian, ByteOrder, LittleEndian, NativeEndian, NetworkEndian};
pub use padding::Padding;
pub use primitive::{Flat, Primitive};
pub use ser::{Serializer, to_bytes, to_writer};
pub use size::{size_of, size_of_value};

pub use serde::{Deserialize, Serialize};

/// Reserved tuple-struct name that marks a [`Padding`] field on the wire.
pub(crate) const PADDING_TOKEN: &str = "$endian_serde::Padding";
