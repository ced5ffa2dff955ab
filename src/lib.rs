//! ID3v2 metadata manipulation.
//!
//! Tagr reads and rewrites the ID3v2 tag block prefixed to audio media
//! files. A tag is parsed into an ordered collection of typed frames that
//! can be inspected, added, replaced, or removed, and then serialized back
//! into a new file image with the audio payload untouched.

#![forbid(unsafe_code)]

#[macro_use]
mod core;

pub mod file;
pub mod id3v2;
pub mod metadata;
pub mod string;
