//! Opaque binary frames.

use crate::core::io::BufStream;
use std::fmt::{self, Display, Formatter};

/// A frame with no structural decoding, carrying its payload verbatim.
///
/// This shape covers every identifier outside the text, comment, and
/// picture families, and also stands in for frames of those families whose
/// payloads turned out to be malformed.
#[derive(Default, Debug, Clone)]
pub struct GenericFrame {
    pub data: Vec<u8>,
}

impl GenericFrame {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> Self {
        Self {
            data: stream.take_rest().to_vec(),
        }
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl From<&[u8]> for GenericFrame {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl Display for GenericFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "[{} bytes]", self.data.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v2::frames::{Frame, FrameBody};

    const PRIV_DATA: &[u8] = b"PRIV\x00\x00\x00\x14\x00\x00\
                               test@test.com\0\
                               \x16\x16\x16\x16\x16\x16";

    #[test]
    fn parse_generic() {
        make_frame!(FrameBody::Generic, PRIV_DATA, frame);

        assert_eq!(frame.data, b"test@test.com\0\x16\x16\x16\x16\x16\x16");
    }

    #[test]
    fn render_generic() {
        let frame = GenericFrame::new(b"test@test.com\0\x16\x16\x16\x16\x16\x16".to_vec());

        assert_render!(Frame::generic(b"PRIV", frame), PRIV_DATA);
    }
}
