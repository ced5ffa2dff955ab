//! Encoding indicator byte handling.
//!
//! Any frame that carries textual sub-fields names its encoding in the
//! first byte of its payload. Structural parsing of those frames always
//! begins at offset 1.

use crate::core::io::BufStream;
use crate::id3v2::ParseResult;
use crate::string::Encoding;
use log::warn;

const FLAG_LATIN1: u8 = 0x00;
const FLAG_UTF16: u8 = 0x01;
const FLAG_UTF16BE: u8 = 0x02;
const FLAG_UTF8: u8 = 0x03;

/// Reads the indicator byte at the start of a payload. Indicators outside
/// the table fall back to Latin1, as an unknown indicator must not abort
/// the parse of an otherwise valid frame.
pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Encoding> {
    let encoding = match stream.read_u8()? {
        FLAG_LATIN1 => Encoding::Latin1,
        FLAG_UTF16 => Encoding::Utf16,
        FLAG_UTF16BE => Encoding::Utf16Be,
        FLAG_UTF8 => Encoding::Utf8,
        unknown => {
            warn!(target: "id3v2", "unrecognized encoding {}, assuming Latin1", unknown);
            Encoding::Latin1
        }
    };

    Ok(encoding)
}

pub(crate) fn render(encoding: Encoding) -> u8 {
    match encoding {
        Encoding::Latin1 => FLAG_LATIN1,
        Encoding::Utf16 => FLAG_UTF16,
        Encoding::Utf16Be => FLAG_UTF16BE,
        Encoding::Utf8 => FLAG_UTF8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_encoding_indicators() {
        let mut stream = BufStream::new(b"\x00\x01\x02\x03\x04\xFF");

        assert_eq!(parse(&mut stream).unwrap(), Encoding::Latin1);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf16);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf16Be);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf8);

        // Unknown indicators fall back instead of failing.
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Latin1);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Latin1);

        assert!(parse(&mut stream).is_err());
    }

    #[test]
    fn render_encoding_indicators() {
        assert_eq!(render(Encoding::Latin1), 0x00);
        assert_eq!(render(Encoding::Utf16), 0x01);
        assert_eq!(render(Encoding::Utf16Be), 0x02);
        assert_eq!(render(Encoding::Utf8), 0x03);
    }
}
