//! Attached picture frames.

use crate::core::io::BufStream;
use crate::id3v2::frames::encoding;
use crate::id3v2::{ParseError, ParseResult};
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// An attached picture frame: an encoding indicator, a Latin1 MIME-type
/// string with a single-byte terminator, a picture type byte, a description
/// in the frame's encoding, and the raw picture data.
///
/// The picture data is opaque to this library. Decoding it into an image is
/// the business of an external image codec, which only needs the bytes and
/// the declared MIME type carried here.
#[derive(Debug, Clone)]
pub struct AttachedPictureFrame {
    pub encoding: Encoding,
    pub mime: String,
    pub pic_type: PictureType,
    pub desc: String,
    pub picture: Vec<u8>,
}

impl AttachedPictureFrame {
    pub fn new(mime: impl Into<String>, picture: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            picture,
            ..Self::default()
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;

        // The MIME type is always Latin1 with a single-byte terminator, no
        // matter what encoding the description uses.
        let mime_data = stream.search(&[0]).ok_or(ParseError::MalformedFrame)?;
        let mut mime = string::decode(Encoding::Latin1, mime_data)?;

        // image/ is implied when there is no mime type.
        if mime.is_empty() {
            mime.push_str("image/");
        }

        let pic_type =
            PictureType::parse(stream.read_u8()?).ok_or(ParseError::MalformedFrame)?;

        let desc_data = stream
            .search(encoding.terminator())
            .ok_or(ParseError::MalformedFrame)?;
        let desc = string::decode(encoding, desc_data)?;

        let picture = stream.take_rest().to_vec();

        Ok(Self {
            encoding,
            mime,
            pic_type,
            desc,
            picture,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];

        result.extend(string::render_terminated(Encoding::Latin1, &self.mime));
        result.push(self.pic_type as u8);
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(&self.picture);

        result
    }
}

impl Display for AttachedPictureFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} ", self.mime]?;

        if !self.desc.is_empty() {
            write![f, "\"{}\" ", self.desc]?;
        }

        write![f, "[{:?}]", self.pic_type]
    }
}

impl Default for AttachedPictureFrame {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            mime: String::new(),
            pic_type: PictureType::Other,
            desc: String::new(),
            picture: Vec::new(),
        }
    }
}

byte_enum! {
    /// The fixed table of attached picture types. A picture type byte
    /// outside this table is a malformed frame.
    pub enum PictureType {
        Other = 0x00,
        FileIcon = 0x01,
        OtherFileIcon = 0x02,
        FrontCover = 0x03,
        BackCover = 0x04,
        LeafletPage = 0x05,
        Media = 0x06,
        LeadArtist = 0x07,
        Artist = 0x08,
        Conductor = 0x09,
        Band = 0x0A,
        Composer = 0x0B,
        Writer = 0x0C,
        RecordingLocation = 0x0D,
        DuringRecording = 0x0E,
        DuringPerformance = 0x0F,
        MovieScreenCapture = 0x10,
        ColoredFish = 0x11,
        Illustration = 0x12,
        BandLogo = 0x13,
        PublisherLogo = 0x14,
    }
}

impl Default for PictureType {
    fn default() -> Self {
        PictureType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v2::frames::{Frame, FrameBody};

    const APIC_DATA: &[u8] = b"APIC\x00\x00\x00\x14\x00\x00\
                               \x00\
                               image/png\0\
                               \x03\
                               cover\0\
                               \xFF\xD8";

    #[test]
    fn parse_apic() {
        make_frame!(FrameBody::Picture, APIC_DATA, frame);

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.mime, "image/png");
        assert_eq!(frame.pic_type, PictureType::FrontCover);
        assert_eq!(frame.desc, "cover");
        assert_eq!(frame.picture, b"\xFF\xD8");
    }

    #[test]
    fn parse_apic_no_mime() {
        make_frame!(
            FrameBody::Picture,
            b"APIC\x00\x00\x00\x07\x00\x00\x00\x00\x00\x00\x16\x16\x16",
            frame
        );

        assert_eq!(frame.mime, "image/");
        assert_eq!(frame.pic_type, PictureType::Other);
        assert_eq!(frame.picture, b"\x16\x16\x16");
    }

    #[test]
    fn downgrade_bad_picture_type() {
        // Picture type 99 is outside the table, which must degrade this
        // frame instead of panicking or failing the tag.
        let data = b"APIC\x00\x00\x00\x14\x00\x00\
                     \x00\
                     image/png\0\
                     \x63\
                     cover\0\
                     \xFF\xD8";

        let frame = crate::id3v2::frames::next(&mut BufStream::new(data)).unwrap();

        assert!(matches!(frame.body(), FrameBody::Generic(_)));
    }

    #[test]
    fn render_apic() {
        let frame = AttachedPictureFrame {
            encoding: Encoding::Latin1,
            mime: String::from("image/png"),
            pic_type: PictureType::FrontCover,
            desc: String::from("cover"),
            picture: vec![0xFF, 0xD8],
        };

        assert_render!(Frame::picture(frame), APIC_DATA);
    }
}
