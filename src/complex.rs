//! Complex scalars.
//!
//! A complex number is two adjacent floats of the same width, real part
//! first. The fast path treats [`Complex32`] and [`Complex64`] as single
//! scalars; inside aggregates the walker sees an ordinary two-field struct and
//! encodes the same bytes.

use serde::{Deserialize, Serialize};

/// A complex number with real part `re` and imaginary part `im`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

/// Two `f32`s, 8 bytes on the wire.
pub type Complex32 = Complex<f32>;

/// Two `f64`s, 16 bytes on the wire.
pub type Complex64 = Complex<f64>;

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Complex { re, im }
    }
}
