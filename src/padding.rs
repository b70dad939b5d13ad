//! Padding fields.
//!
//! A padding field reserves wire space without carrying a value. Declare it
//! as [`Padding<T>`] where `T` is the type whose width is reserved:
//!
//! ```rust
//! use endian_serde::{Codec, LittleEndian, Padding};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Record {
//!     a: i8,
//!     _pad: Padding<[u8; 3]>,
//!     b: u32,
//! }
//!
//! let rec = Record { a: -1, _pad: Padding::new(), b: 1 };
//! let bytes = LittleEndian::to_bytes(&rec).unwrap();
//! assert_eq!(bytes, [0xFF, 0, 0, 0, 1, 0, 0, 0]);
//! assert_eq!(rec, LittleEndian::from_bytes::<Record>(&bytes).unwrap());
//! ```
//!
//! # Wire format
//!
//! ```text
//! +--------+---...---+--------+
//! |  0x00  |   0x00  |  0x00  |   encode: size_of::<T>() zero bytes
//! +--------+---...---+--------+   decode: the same range is skipped
//! ```
//!
//! Only the declared type's width matters; its contents are never read or
//! written. `Padding<T>` itself occupies no memory.
//!
//! # Signalling
//!
//! Padding serializes as a tuple struct with a reserved name whose length is
//! the reserved width, with no elements. The encoders and decoders
//! in this crate recognise the name and zero-fill or skip the range. Other
//! serde formats see an empty tuple struct.
//!
//! If `T` is not fixed-size, encoding or decoding the enclosing value fails
//! with [`Error::Undecidable`](crate::Error::Undecidable) naming `T`'s
//! offending member.

use crate::error;
use crate::size;
use serde::de::{self, DeserializeOwned, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{self, SerializeTupleStruct};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Reserves `size_of::<T>()` bytes on the wire and carries no value.
pub struct Padding<T>(PhantomData<fn() -> T>);

impl<T> Padding<T> {
    pub const fn new() -> Self {
        Padding(PhantomData)
    }
}

impl<T> Default for Padding<T> {
    fn default() -> Self {
        Padding::new()
    }
}

impl<T> Clone for Padding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Padding<T> {}

// Every padding of the same type is equal: there is nothing to compare.
impl<T> PartialEq for Padding<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for Padding<T> {}

impl<T> Hash for Padding<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T> fmt::Debug for Padding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Padding<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned + 'static> Padding<T> {
    /// Number of bytes this field reserves, or `None` if `T` is not fixed-size.
    pub fn width() -> Option<usize> {
        size::size_of::<T>()
    }
}

impl<T: DeserializeOwned + 'static> ser::Serialize for Padding<T> {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let width = size::type_width::<T>()
            .map_err(|e| error::relay(e, <S::Error as ser::Error>::custom))?;
        serializer
            .serialize_tuple_struct(crate::PADDING_TOKEN, width)?
            .end()
    }
}

impl<'de, T: DeserializeOwned + 'static> de::Deserialize<'de> for Padding<T> {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let width = size::type_width::<T>()
            .map_err(|e| error::relay(e, <D::Error as de::Error>::custom))?;
        deserializer.deserialize_tuple_struct(
            crate::PADDING_TOKEN,
            width,
            PaddingVisitor::<T>(PhantomData),
        )
    }
}

struct PaddingVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for PaddingVisitor<T> {
    type Value = Padding<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "padding reserving the width of {}", std::any::type_name::<T>())
    }

    /// Our decoders skip the reserved range and report unit.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Padding::new())
    }

    // Fallback for other formats: whatever was stored is discarded.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Padding::new())
    }
}
