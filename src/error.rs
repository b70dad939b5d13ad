use serde::{de, ser};
use std::cell::Cell;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during encoding or decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// A custom error message from serde
    #[error("{0}")]
    Message(String),

    /// Attempted to read past the end of an in-memory input buffer
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The underlying stream failed; end-of-stream surfaces here as
    /// `io::ErrorKind::UnexpectedEof`
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The wire width of a type cannot be known without a concrete value,
    /// or cannot be known at all
    #[error("type {type_name} is not fixed-size: it contains {member}")]
    Undecidable {
        type_name: &'static str,
        member: &'static str,
    },

    /// The type's own `Deserialize` impl refused every value offered while
    /// measuring it
    #[error("cannot measure type {type_name}: {reason}")]
    Unmeasurable {
        type_name: &'static str,
        reason: String,
    },

    /// The serde data model type has no fixed-width encoding
    #[error("no fixed-width encoding for {0}")]
    Unsupported(&'static str),

    /// A sequence length was not known ahead of time
    #[error("sequence length must be known before encoding")]
    LengthRequired,

    /// The total wire width does not fit in `usize`
    #[error("wire size overflows usize")]
    SizeOverflow,
}

impl Error {
    /// True when the input ran out before the value was complete, whether it
    /// came from a stream or an in-memory buffer.
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            Error::UnexpectedEof => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

thread_local! {
    static RELAYED: Cell<Option<Error>> = const { Cell::new(None) };
}

/// Hand `err` to a foreign error constructor such as `S::Error::custom`.
///
/// When the constructor is this crate's own `custom`, the original `err`
/// comes back intact instead of being flattened into a [`Error::Message`].
/// Any other error type just receives the message.
pub(crate) fn relay<E>(err: Error, custom: impl FnOnce(String) -> E) -> E {
    let msg = err.to_string();
    RELAYED.with(|slot| slot.set(Some(err)));
    let out = custom(msg);
    RELAYED.with(|slot| slot.set(None));
    out
}

fn from_message(msg: String) -> Error {
    match RELAYED.with(|slot| slot.take()) {
        Some(err) if err.to_string() == msg => err,
        _ => Error::Message(msg),
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        from_message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        from_message(msg.to_string())
    }
}
