//! The closed set of fast-path types.
//!
//! [`Primitive`] covers the scalars; [`Flat`] covers a scalar or a homogeneous
//! sequence of one scalar type. Both are sealed, so the set is fixed and every
//! call is resolved at compile time to one monomorphised pack/unpack loop.

use crate::complex::{Complex32, Complex64};
use crate::order::ByteOrder;

mod private {
    pub trait Sealed {}
}

/// A scalar with an intrinsic wire width.
///
/// Sealed: implemented for `bool`, the 8/16/32/64-bit integers, `f32`, `f64`,
/// [`Complex32`] and [`Complex64`].
pub trait Primitive: Copy + Default + private::Sealed {
    /// Width in bytes on the wire.
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `src`.
    fn load<O: ByteOrder>(src: &[u8]) -> Self;

    /// Encode into the first `WIDTH` bytes of `dst`.
    fn store<O: ByteOrder>(self, dst: &mut [u8]);
}

impl private::Sealed for bool {}
impl Primitive for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        src[0] != 0
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        dst[0] = self as u8;
    }
}

impl private::Sealed for u8 {}
impl Primitive for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        src[0]
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        dst[0] = self;
    }
}

impl private::Sealed for i8 {}
impl Primitive for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        src[0] as i8
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        dst[0] = self as u8;
    }
}

macro_rules! impl_primitive_int {
    ($t:ty, $bits:ty, $width:expr, $decode:ident, $encode:ident) => {
        impl private::Sealed for $t {}
        impl Primitive for $t {
            const WIDTH: usize = $width;

            #[inline]
            fn load<O: ByteOrder>(src: &[u8]) -> Self {
                O::$decode(src) as $t
            }
            #[inline]
            fn store<O: ByteOrder>(self, dst: &mut [u8]) {
                O::$encode(dst, self as $bits);
            }
        }
    };
}

impl_primitive_int!(u16, u16, 2, decode_u16, encode_u16);
impl_primitive_int!(i16, u16, 2, decode_u16, encode_u16);
impl_primitive_int!(u32, u32, 4, decode_u32, encode_u32);
impl_primitive_int!(i32, u32, 4, decode_u32, encode_u32);
impl_primitive_int!(u64, u64, 8, decode_u64, encode_u64);
impl_primitive_int!(i64, u64, 8, decode_u64, encode_u64);

// Floats travel as their raw IEEE bits, so NaN payloads survive.

impl private::Sealed for f32 {}
impl Primitive for f32 {
    const WIDTH: usize = 4;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        f32::from_bits(O::decode_u32(src))
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        O::encode_u32(dst, self.to_bits());
    }
}

impl private::Sealed for f64 {}
impl Primitive for f64 {
    const WIDTH: usize = 8;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        f64::from_bits(O::decode_u64(src))
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        O::encode_u64(dst, self.to_bits());
    }
}

impl private::Sealed for Complex32 {}
impl Primitive for Complex32 {
    const WIDTH: usize = 8;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        Complex32::new(f32::load::<O>(src), f32::load::<O>(&src[4..]))
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        self.re.store::<O>(dst);
        self.im.store::<O>(&mut dst[4..]);
    }
}

impl private::Sealed for Complex64 {}
impl Primitive for Complex64 {
    const WIDTH: usize = 16;

    #[inline]
    fn load<O: ByteOrder>(src: &[u8]) -> Self {
        Complex64::new(f64::load::<O>(src), f64::load::<O>(&src[8..]))
    }
    #[inline]
    fn store<O: ByteOrder>(self, dst: &mut [u8]) {
        self.re.store::<O>(dst);
        self.im.store::<O>(&mut dst[8..]);
    }
}

// ── Flat: scalars and homogeneous scalar sequences ────────────────────────

/// A value the fast path packs directly: one scalar, or a slice, array or
/// vector of one scalar type.
///
/// The packed length is known from the element count alone, so no size
/// computation or cache lookup is involved.
pub trait Flat: private::Sealed {
    /// Exact number of bytes on the wire.
    fn packed_len(&self) -> usize;

    /// Encode into `dst`, which holds exactly `packed_len()` bytes.
    fn pack<O: ByteOrder>(&self, dst: &mut [u8]);

    /// Overwrite `self` from `src`, which holds exactly `packed_len()` bytes.
    fn unpack<O: ByteOrder>(&mut self, src: &[u8]);
}

macro_rules! impl_flat_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Flat for $t {
                #[inline]
                fn packed_len(&self) -> usize {
                    <$t as Primitive>::WIDTH
                }
                #[inline]
                fn pack<O: ByteOrder>(&self, dst: &mut [u8]) {
                    self.store::<O>(dst);
                }
                #[inline]
                fn unpack<O: ByteOrder>(&mut self, src: &[u8]) {
                    *self = <$t as Primitive>::load::<O>(src);
                }
            }
        )*
    };
}

impl_flat_scalar!(bool, u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, Complex32, Complex64);

impl<T: Primitive> private::Sealed for [T] {}
impl<T: Primitive> Flat for [T] {
    #[inline]
    fn packed_len(&self) -> usize {
        self.len() * T::WIDTH
    }

    fn pack<O: ByteOrder>(&self, dst: &mut [u8]) {
        for (chunk, x) in dst.chunks_exact_mut(T::WIDTH).zip(self) {
            x.store::<O>(chunk);
        }
    }

    fn unpack<O: ByteOrder>(&mut self, src: &[u8]) {
        for (x, chunk) in self.iter_mut().zip(src.chunks_exact(T::WIDTH)) {
            *x = T::load::<O>(chunk);
        }
    }
}

impl<T: Primitive, const N: usize> private::Sealed for [T; N] {}
impl<T: Primitive, const N: usize> Flat for [T; N] {
    #[inline]
    fn packed_len(&self) -> usize {
        N * T::WIDTH
    }
    #[inline]
    fn pack<O: ByteOrder>(&self, dst: &mut [u8]) {
        self.as_slice().pack::<O>(dst);
    }
    #[inline]
    fn unpack<O: ByteOrder>(&mut self, src: &[u8]) {
        self.as_mut_slice().unpack::<O>(src);
    }
}

impl<T: Primitive> private::Sealed for Vec<T> {}
impl<T: Primitive> Flat for Vec<T> {
    #[inline]
    fn packed_len(&self) -> usize {
        self.as_slice().packed_len()
    }
    #[inline]
    fn pack<O: ByteOrder>(&self, dst: &mut [u8]) {
        self.as_slice().pack::<O>(dst);
    }
    #[inline]
    fn unpack<O: ByteOrder>(&mut self, src: &[u8]) {
        self.as_mut_slice().unpack::<O>(src);
    }
}
