//! Text information and URL link frames.

use crate::core::io::BufStream;
use crate::id3v2::frames::encoding;
use crate::id3v2::ParseResult;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// A text information frame: an encoding indicator byte followed by one
/// string occupying the rest of the payload.
///
/// URL link frames (`W` identifiers) reuse this shape. Their payload is a
/// URL, conventionally stored in Latin1.
#[derive(Debug, Clone)]
pub struct TextFrame {
    pub encoding: Encoding,
    pub text: String,
}

impl TextFrame {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            encoding: Encoding::default(),
            text: text.into(),
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let text = string::decode(encoding, stream.take_rest())?;

        Ok(Self { encoding, text })
    }

    /// Renders this frame's payload. No trailing terminator is written, as
    /// the final field of a frame is bounded by the frame size instead.
    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render(self.encoding, &self.text));

        result
    }
}

impl Display for TextFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v2::frames::FrameBody;

    const TALB_DATA: &[u8] = b"TALB\x00\x00\x00\x0B\x00\x00\
                               \x00\
                               Test Album";

    const TIT2_DATA: &[u8] = b"TIT2\x00\x00\x00\x49\x00\x00\
                               \x01\
                               \xFF\xFE\x49\x00\x20\x00\x53\x00\x77\x00\x61\x00\x6c\x00\x6c\x00\
                               \x6f\x00\x77\x00\x65\x00\x64\x00\x20\x00\x48\x00\x61\x00\x72\x00\
                               \x64\x00\x2c\x00\x20\x00\x4c\x00\x69\x00\x6b\x00\x65\x00\x20\x00\
                               \x49\x00\x20\x00\x55\x00\x6e\x00\x64\x00\x65\x00\x72\x00\x73\x00\
                               \x74\x00\x6f\x00\x6f\x00\x64\x00";

    const WOAR_DATA: &[u8] = b"WOAR\x00\x00\x00\x11\x00\x00\
                               \x00\
                               https://test.com";

    #[test]
    fn parse_text() {
        make_frame!(FrameBody::Text, TALB_DATA, frame);

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.text, "Test Album");
    }

    #[test]
    fn parse_text_utf16() {
        make_frame!(FrameBody::Text, TIT2_DATA, frame);

        assert_eq!(frame.encoding, Encoding::Utf16);
        assert_eq!(frame.text, "I Swallowed Hard, Like I Understood");
    }

    #[test]
    fn parse_text_terminated() {
        // A trailing terminator on the final field is legal and stripped.
        make_frame!(
            FrameBody::Text,
            b"TALB\x00\x00\x00\x0C\x00\x00\x00Test Album\0",
            frame
        );

        assert_eq!(frame.text, "Test Album");
    }

    #[test]
    fn parse_url() {
        make_frame!(FrameBody::Text, WOAR_DATA, frame);

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.text, "https://test.com");
    }

    #[test]
    fn render_text() {
        let frame = TextFrame {
            encoding: Encoding::Latin1,
            text: String::from("Test Album"),
        };

        assert_render!(crate::id3v2::frames::Frame::text(b"TALB", frame), TALB_DATA);
    }

    #[test]
    fn render_text_utf16() {
        let frame = TextFrame {
            encoding: Encoding::Utf16,
            text: String::from("I Swallowed Hard, Like I Understood"),
        };

        assert_render!(crate::id3v2::frames::Frame::text(b"TIT2", frame), TIT2_DATA);
    }
}
