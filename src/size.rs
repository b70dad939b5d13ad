//! Wire-size calculation.
//!
//! Two questions are answered here:
//!
//! - [`size_of`]: how many bytes does every value of type `T` occupy? This is
//!   a type-level query. It drives `T`'s own `Deserialize` impl against a
//!   [`Probe`] that sums the width of each leaf and answers it with a zero
//!   value, or with ones if the type refuses zero (`NonZeroU32`). The answer
//!   is cached per type for the life of the process.
//! - [`size_of_value`]: how many bytes does this particular value occupy? The
//!   only difference is that a top-level sequence is allowed, sized by its
//!   runtime length. It walks the value with a [`Counter`].
//!
//! A type that transitively contains a sequence, string, option, map, enum or
//! `char` is undecidable at the type level.

use crate::error::{Error, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::de::{self, DeserializeOwned, SeqAccess, Visitor};
use serde::ser::{self, Impossible, Serialize};
use std::any::{TypeId, type_name};
use std::sync::LazyLock;

/// Either an exact byte width or the reason there is none.
type Width = std::result::Result<usize, NoWidth>;

#[derive(Debug, Clone)]
enum NoWidth {
    /// The kind of member that has no fixed width.
    Member(&'static str),
    /// The type's `Deserialize` impl refused every probe value.
    Refused(String),
}

static WIDTHS: LazyLock<RwLock<FxHashMap<TypeId, Width>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

// ── Public entry points ────────────────────────────────────────────────────

/// Exact wire width of every value of type `T`, or `None` if it is not
/// fixed-size.
///
/// ```rust
/// use endian_serde::{Padding, size_of};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Header { kind: u8, _pad: Padding<[u8; 3]>, len: u32 }
///
/// #[derive(Deserialize)]
/// struct Message { len: u32, body: Vec<u8> }
///
/// assert_eq!(size_of::<Header>(), Some(8));
/// assert_eq!(size_of::<[Header; 4]>(), Some(32));
/// assert_eq!(size_of::<Message>(), None);
/// ```
pub fn size_of<T: DeserializeOwned + 'static>() -> Option<usize> {
    type_width::<T>().ok()
}

/// Exact wire width of `value`, or `None` if it is not fixed-size.
///
/// A top-level slice or vector is sized by its length; a sequence anywhere
/// below the top level is undecidable.
pub fn size_of_value<T: Serialize + ?Sized>(value: &T) -> Option<usize> {
    value_width(value).ok()
}

/// Cached type-level width of `T`.
///
/// The lock is never held while probing: two threads may compute the same
/// width concurrently, and the first insert wins.
pub(crate) fn type_width<T: DeserializeOwned + 'static>() -> Result<usize> {
    let id = TypeId::of::<T>();
    let cached = WIDTHS.read().get(&id).cloned();
    let width = match cached {
        Some(width) => width,
        None => {
            let width = probe::<T>();
            tracing::trace!(type_name = type_name::<T>(), ?width, "cached wire width");
            WIDTHS.write().entry(id).or_insert(width).clone()
        }
    };
    width.map_err(|why| match why {
        NoWidth::Member(member) => Error::Undecidable {
            type_name: type_name::<T>(),
            member,
        },
        NoWidth::Refused(reason) => Error::Unmeasurable {
            type_name: type_name::<T>(),
            reason,
        },
    })
}

/// Uncached value-level width of `value`.
pub(crate) fn value_width<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    let mut counter = Counter { width: 0, depth: 0 };
    match value.serialize(&mut counter) {
        Ok(()) => Ok(counter.width),
        Err(Error::Unsupported(member) | Error::Undecidable { member, .. }) => {
            Err(Error::Undecidable {
                type_name: type_name::<T>(),
                member,
            })
        }
        Err(e) => Err(e),
    }
}

fn probe<T: DeserializeOwned>() -> Width {
    match probe_with::<T>(0) {
        Err(NoWidth::Refused(_)) => probe_with::<T>(1),
        width => width,
    }
}

fn probe_with<T: DeserializeOwned>(fill: u8) -> Width {
    let mut probe = Probe { width: 0, fill };
    match T::deserialize(&mut probe) {
        Ok(_) => Ok(probe.width),
        Err(Error::Unsupported(member) | Error::Undecidable { member, .. }) => {
            Err(NoWidth::Member(member))
        }
        Err(Error::Unmeasurable { reason, .. }) => Err(NoWidth::Refused(reason)),
        Err(e) => Err(NoWidth::Refused(e.to_string())),
    }
}

// ── Probe: type-level width ────────────────────────────────────────────────

/// A deserializer that reads nothing. Each leaf adds its width and is
/// answered with `fill`; each non-fixed shape aborts with `Unsupported`.
struct Probe {
    width: usize,
    fill: u8,
}

impl Probe {
    fn leaf(&mut self, width: usize) {
        self.width += width;
    }
}

macro_rules! probe_leaf {
    ($method:ident, $visit:ident, $t:ty) => {
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            self.leaf(std::mem::size_of::<$t>());
            visitor.$visit(self.fill as $t)
        }
    };
}

macro_rules! probe_reject {
    ($method:ident, $what:expr) => {
        fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
            Err(Error::Unsupported($what))
        }
    };
}

impl<'de> de::Deserializer<'de> for &mut Probe {
    type Error = Error;

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.leaf(1);
        visitor.visit_bool(self.fill != 0)
    }

    probe_leaf!(deserialize_i8, visit_i8, i8);
    probe_leaf!(deserialize_u8, visit_u8, u8);
    probe_leaf!(deserialize_i16, visit_i16, i16);
    probe_leaf!(deserialize_u16, visit_u16, u16);
    probe_leaf!(deserialize_i32, visit_i32, i32);
    probe_leaf!(deserialize_u32, visit_u32, u32);
    probe_leaf!(deserialize_i64, visit_i64, i64);
    probe_leaf!(deserialize_u64, visit_u64, u64);
    probe_leaf!(deserialize_f32, visit_f32, f32);
    probe_leaf!(deserialize_f64, visit_f64, f64);

    probe_reject!(deserialize_any, "a self-describing member");
    probe_reject!(deserialize_ignored_any, "a self-describing member");
    probe_reject!(deserialize_char, "a char");
    probe_reject!(deserialize_i128, "a 128-bit integer");
    probe_reject!(deserialize_u128, "a 128-bit integer");
    probe_reject!(deserialize_str, "a string");
    probe_reject!(deserialize_string, "a string");
    probe_reject!(deserialize_bytes, "a byte buffer");
    probe_reject!(deserialize_byte_buf, "a byte buffer");
    probe_reject!(deserialize_option, "an option");
    probe_reject!(deserialize_seq, "a sequence");
    probe_reject!(deserialize_map, "a map");
    probe_reject!(deserialize_identifier, "an identifier");

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
        visitor.visit_seq(ProbeSeq { probe: self, remaining: len })
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        if name == crate::PADDING_TOKEN {
            self.leaf(len);
            return visitor.visit_unit();
        }
        visitor.visit_seq(ProbeSeq { probe: self, remaining: len })
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(ProbeSeq {
            probe: self,
            remaining: fields.len(),
        })
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

struct ProbeSeq<'a> {
    probe: &'a mut Probe,
    remaining: usize,
}

impl<'de> SeqAccess<'de> for ProbeSeq<'_> {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.probe).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── Counter: value-level width ─────────────────────────────────────────────

/// A serializer that writes nothing and sums leaf widths. `depth` counts the
/// enclosing aggregates so that only a top-level sequence is accepted.
struct Counter {
    width: usize,
    depth: usize,
}

impl Counter {
    fn leaf(&mut self, width: usize) -> Result<()> {
        self.width = self.width.checked_add(width).ok_or(Error::SizeOverflow)?;
        Ok(())
    }

    fn enter(&mut self) -> Result<&mut Self> {
        self.depth += 1;
        Ok(self)
    }

    fn leave(&mut self) -> Result<()> {
        self.depth -= 1;
        Ok(())
    }
}

impl<'a> ser::Serializer for &'a mut Counter {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        self.leaf(1)
    }
    fn serialize_i8(self, _v: i8) -> Result<()> {
        self.leaf(1)
    }
    fn serialize_u8(self, _v: u8) -> Result<()> {
        self.leaf(1)
    }
    fn serialize_i16(self, _v: i16) -> Result<()> {
        self.leaf(2)
    }
    fn serialize_u16(self, _v: u16) -> Result<()> {
        self.leaf(2)
    }
    fn serialize_i32(self, _v: i32) -> Result<()> {
        self.leaf(4)
    }
    fn serialize_u32(self, _v: u32) -> Result<()> {
        self.leaf(4)
    }
    fn serialize_i64(self, _v: i64) -> Result<()> {
        self.leaf(8)
    }
    fn serialize_u64(self, _v: u64) -> Result<()> {
        self.leaf(8)
    }
    fn serialize_f32(self, _v: f32) -> Result<()> {
        self.leaf(4)
    }
    fn serialize_f64(self, _v: f64) -> Result<()> {
        self.leaf(8)
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

    /// A newtype is a one-field struct: it counts as an enclosing aggregate.
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self.enter()?)?;
        self.leave()
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

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        if self.depth > 0 {
            return Err(Error::Unsupported("a sequence"));
        }
        self.enter()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.enter()
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        if name == crate::PADDING_TOKEN {
            self.leaf(len)?;
        }
        self.enter()
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

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.enter()
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

impl ser::SerializeSeq for &mut Counter {
    type Ok = ();
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        self.leave()
    }
}

impl ser::SerializeTuple for &mut Counter {
    type Ok = ();
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        self.leave()
    }
}

impl ser::SerializeTupleStruct for &mut Counter {
    type Ok = ();
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        self.leave()
    }
}

impl ser::SerializeStruct for &mut Counter {
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
        self.leave()
    }
}
