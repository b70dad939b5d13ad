//! Byte-order primitives.
//!
//! [`ByteOrder`] maps 16/32/64-bit unsigned integers to and from their byte
//! representation in one fixed order. It is the only place in the crate that
//! knows which end of an integer goes first; every other module reaches the
//! wire through these functions, monomorphised for one order.
//!
//! ```rust
//! use endian_serde::{BigEndian, ByteOrder, LittleEndian};
//!
//! let mut buf = [0u8; 4];
//! LittleEndian::encode_u32(&mut buf, 0x0102_0304);
//! assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
//! BigEndian::encode_u32(&mut buf, 0x0102_0304);
//! assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
//! ```
//!
//! The wire format carries no byte-order marker. Decoding with the wrong
//! order yields a different number, not an error; both ends must agree on the
//! order out of band.

use std::fmt::Debug;
use std::hash::Hash;

mod private {
    pub trait Sealed {}

    impl Sealed for super::LittleEndian {}
    impl Sealed for super::BigEndian {}
}

/// A fixed byte order.
///
/// This trait is sealed: [`LittleEndian`] and [`BigEndian`] are the only
/// implementations. All functions panic if the slice is shorter than the
/// width being read or written.
pub trait ByteOrder:
    Clone + Copy + Debug + Default + Eq + Hash + Send + Sync + 'static + private::Sealed
{
    fn decode_u16(src: &[u8]) -> u16;
    fn decode_u32(src: &[u8]) -> u32;
    fn decode_u64(src: &[u8]) -> u64;

    fn encode_u16(dst: &mut [u8], v: u16);
    fn encode_u32(dst: &mut [u8], v: u32);
    fn encode_u64(dst: &mut [u8], v: u64);

    /// Grow `buf` by two bytes holding `v`.
    fn append_u16(buf: &mut Vec<u8>, v: u16);
    /// Grow `buf` by four bytes holding `v`.
    fn append_u32(buf: &mut Vec<u8>, v: u32);
    /// Grow `buf` by eight bytes holding `v`.
    fn append_u64(buf: &mut Vec<u8>, v: u64);
}

/// Least significant byte first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LittleEndian;

/// Most significant byte first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigEndian;

/// Network byte order (RFC 1700).
pub type NetworkEndian = BigEndian;

/// The byte order of the host's in-memory integers.
#[cfg(target_endian = "little")]
pub type NativeEndian = LittleEndian;

/// The byte order of the host's in-memory integers.
#[cfg(target_endian = "big")]
pub type NativeEndian = BigEndian;

/// Copy the first `N` bytes of `src`; panics if there are fewer.
#[inline(always)]
fn head<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&src[..N]);
    out
}

macro_rules! impl_byte_order {
    ($order:ty, $from:ident, $to:ident) => {
        impl ByteOrder for $order {
            #[inline]
            fn decode_u16(src: &[u8]) -> u16 {
                u16::$from(head(src))
            }
            #[inline]
            fn decode_u32(src: &[u8]) -> u32 {
                u32::$from(head(src))
            }
            #[inline]
            fn decode_u64(src: &[u8]) -> u64 {
                u64::$from(head(src))
            }

            #[inline]
            fn encode_u16(dst: &mut [u8], v: u16) {
                dst[..2].copy_from_slice(&v.$to());
            }
            #[inline]
            fn encode_u32(dst: &mut [u8], v: u32) {
                dst[..4].copy_from_slice(&v.$to());
            }
            #[inline]
            fn encode_u64(dst: &mut [u8], v: u64) {
                dst[..8].copy_from_slice(&v.$to());
            }

            #[inline]
            fn append_u16(buf: &mut Vec<u8>, v: u16) {
                buf.extend_from_slice(&v.$to());
            }
            #[inline]
            fn append_u32(buf: &mut Vec<u8>, v: u32) {
                buf.extend_from_slice(&v.$to());
            }
            #[inline]
            fn append_u64(buf: &mut Vec<u8>, v: u64) {
                buf.extend_from_slice(&v.$to());
            }
        }
    };
}

impl_byte_order!(LittleEndian, from_le_bytes, to_le_bytes);
impl_byte_order!(BigEndian, from_be_bytes, to_be_bytes);
