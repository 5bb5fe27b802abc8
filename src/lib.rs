// src/lib.rs
//
// readmore: word-budget previews for HTML fragments
//
// - `truncate` cuts a fragment to N words and keeps the tag structure of what remains:
//   the ellipsis goes on the last kept word, everything after it is dropped at every
//   depth, and the result is balanced markup.
// - Input that already fits is returned byte for byte.
// - `Controller` tracks collapsed/expanded state for a set of blocks built from those
//   previews.

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod parser;
mod scan;
pub mod serialize;
pub mod truncate;
pub mod words;

pub use config::{Config, DEFAULT_ELLIPSIS, DEFAULT_WORD_LIMIT};
pub use controller::{Block, BlockState, Controller, Key};
pub use dom::{Attribute, Element, Node};
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use parser::{parse_fragment, MAX_DEPTH};
pub use serialize::serialize_fragment;
pub use truncate::{truncate, word_count, Truncated, Truncator};
