//! Comment frames.

use crate::core::io::BufStream;
use crate::id3v2::frames::{encoding, Language};
use crate::id3v2::{ParseError, ParseResult};
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// A comment frame: an encoding indicator, a 3-byte language code, a short
/// description terminated in the frame's encoding, and the full comment
/// text filling the rest of the payload.
#[derive(Default, Debug, Clone)]
pub struct CommentsFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub text: String,
}

impl CommentsFrame {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;

        // The description must be bounded by a terminator so that the
        // comment text can be located. A missing one means the frame
        // cannot be split into its fields.
        let desc_data = stream
            .search(encoding.terminator())
            .ok_or(ParseError::MalformedFrame)?;

        let desc = string::decode(encoding, desc_data)?;
        let text = string::decode(encoding, stream.take_rest())?;

        Ok(Self {
            encoding,
            lang,
            desc,
            text,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];

        result.extend(&self.lang);
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(string::render(self.encoding, &self.text));

        result
    }
}

impl Display for CommentsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v2::frames::{Frame, FrameBody};

    const COMM_DATA: &[u8] = b"COMM\x00\x00\x00\x12\x00\x00\
                               \x00\
                               eng\
                               Desc\x00\
                               Full Text";

    #[test]
    fn parse_comm() {
        make_frame!(FrameBody::Comment, COMM_DATA, frame);

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.lang, *b"eng");
        assert_eq!(frame.desc, "Desc");
        assert_eq!(frame.text, "Full Text");
    }

    #[test]
    fn parse_comm_empty_desc() {
        // A terminator right after the language code is an empty
        // description, with the comment starting immediately behind it.
        make_frame!(
            FrameBody::Comment,
            b"COMM\x00\x00\x00\x0E\x00\x00\x00eng\x00Full Text",
            frame
        );

        assert_eq!(frame.desc, "");
        assert_eq!(frame.text, "Full Text");
    }

    #[test]
    fn parse_comm_utf16() {
        make_frame!(
            FrameBody::Comment,
            b"COMM\x00\x00\x00\x14\x00\x00\
              \x01\
              deu\
              \xFF\xFE\x44\x00\0\0\
              \xFF\xFE\x54\x00\x65\x00\x78\x00\x74\x00",
            frame
        );

        assert_eq!(frame.encoding, Encoding::Utf16);
        assert_eq!(frame.lang, *b"deu");
        assert_eq!(frame.desc, "D");
        assert_eq!(frame.text, "Text");
    }

    #[test]
    fn render_comm() {
        let frame = CommentsFrame {
            encoding: Encoding::Latin1,
            lang: Language::new(b"eng").unwrap(),
            desc: String::from("Desc"),
            text: String::from("Full Text"),
        };

        assert_render!(Frame::comment(frame), COMM_DATA);
    }
}
