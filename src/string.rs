//! Tag string handling.

use log::warn;
use std::error;
use std::fmt::{self, Display, Formatter};

/// A text encoding carried by an ID3v2 frame.
///
/// Frames that carry textual sub-fields name their encoding in a single
/// indicator byte at the start of the payload. The encoding decides both how
/// field bytes map to characters and how wide the NUL terminator between
/// variable-length fields is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    /// ISO-8859-1, also known as Latin1. Writing this encoding is lossy, as
    /// any character outside of it is flattened into a "?" when rendered.
    Latin1,
    /// UTF-16 with a byte-order mark. In practice this will be UTF-16LE with
    /// a `0xFFFE` mark, which is what the vast majority of taggers write.
    Utf16,
    /// UTF-16BE with no byte-order mark.
    Utf16Be,
    /// UTF-8. This allows the direct mapping of rust strings to tag data.
    Utf8,
}

impl Encoding {
    /// The width of this encoding's NUL terminator, in bytes.
    pub(crate) fn nul_size(&self) -> usize {
        match self {
            Self::Utf8 | Self::Latin1 => 1,
            _ => 2,
        }
    }

    /// The terminator byte sequence that ends a field in this encoding.
    pub(crate) fn terminator(&self) -> &'static [u8] {
        match self.nul_size() {
            1 => &[0],
            _ => &[0, 0],
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

/// Decodes `data` into a string according to the encoding.
///
/// A trailing NUL terminator is stripped before decoding, as taggers will
/// often terminate even the final field of a frame. Byte sequences that are
/// not valid for the encoding are an error, which callers treat as
/// non-fatal for the rest of the tag.
pub(crate) fn decode(encoding: Encoding, data: &[u8]) -> Result<String, DecodeError> {
    let data = match encoding.nul_size() {
        1 => data.strip_suffix(&[0]).unwrap_or(data),
        _ => data.strip_suffix(&[0, 0]).unwrap_or(data),
    };

    match encoding {
        Encoding::Latin1 => Ok(decode_latin1(data)),
        Encoding::Utf16 => decode_utf16(data),
        Encoding::Utf16Be => decode_utf16be(data),
        Encoding::Utf8 => String::from_utf8(data.to_vec()).map_err(|_| DecodeError::InvalidUtf8),
    }
}

/// Renders a string according to the encoding. This never fails, at worst
/// flattening unrepresentable characters.
pub(crate) fn render(encoding: Encoding, string: &str) -> Vec<u8> {
    match encoding {
        Encoding::Latin1 => encode_latin1(string),
        Encoding::Utf16 => encode_utf16(string),
        Encoding::Utf16Be => encode_utf16be(string),
        Encoding::Utf8 => string.as_bytes().to_vec(),
    }
}

/// Renders a string plus a NUL terminator according to the encoding.
pub(crate) fn render_terminated(encoding: Encoding, string: &str) -> Vec<u8> {
    let mut result = render(encoding, string);

    // One zero byte for Latin1/UTF-8, two for the UTF-16 encodings.
    result.resize(result.len() + encoding.nul_size(), 0);

    result
}

fn decode_latin1(data: &[u8]) -> String {
    // UTF-8 expresses high code-points as two bytes instead of one, so we
    // cannot reinterpret the buffer directly. Mapping each byte through
    // char keeps the code-points lined up.
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_utf16(data: &[u8]) -> Result<String, DecodeError> {
    // The endianness comes from the BOM. Data without one does exist in the
    // wild, so that falls back to a big-endian read instead of failing.
    match data {
        [0xFF, 0xFE, rest @ ..] => decode_utf16le(rest),
        [0xFE, 0xFF, rest @ ..] => decode_utf16be(rest),
        _ => {
            if !data.is_empty() {
                warn!("could not determine UTF-16 BOM, defaulting to UTF-16BE");
            }

            decode_utf16be(data)
        }
    }
}

fn decode_utf16be(data: &[u8]) -> Result<String, DecodeError> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::InvalidUtf16);
    }

    String::from_utf16(
        data.chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
    .map_err(|_| DecodeError::InvalidUtf16)
}

fn decode_utf16le(data: &[u8]) -> Result<String, DecodeError> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::InvalidUtf16);
    }

    String::from_utf16(
        data.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
    .map_err(|_| DecodeError::InvalidUtf16)
}

fn encode_latin1(string: &str) -> Vec<u8> {
    // All Latin1 chars line up with UTF-8 code-points, but everything else
    // has to be expressed as a ?
    string
        .chars()
        .map(|ch| if u32::from(ch) > 0xFF { b'?' } else { ch as u8 })
        .collect()
}

fn encode_utf16(string: &str) -> Vec<u8> {
    // UTF-16 requires a BOM at the beginning. We always write UTF-16LE
    // bytes, so the mark is always 0xFFFE.
    let mut result: Vec<u8> = vec![0xFF, 0xFE];

    result.extend(string.encode_utf16().flat_map(|cp| cp.to_le_bytes()));

    result
}

fn encode_utf16be(string: &str) -> Vec<u8> {
    string
        .encode_utf16()
        .flat_map(|cp| cp.to_be_bytes())
        .collect()
}

/// An error when a byte sequence is not valid for its declared encoding.
#[derive(Clone, Copy, Debug)]
pub enum DecodeError {
    InvalidUtf8,
    InvalidUtf16,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?}", self]
    }
}

impl error::Error for DecodeError {
    // Nothing to implement
}
