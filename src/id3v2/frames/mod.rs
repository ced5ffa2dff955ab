//! Frame parsing and implementations.
//!
//! An ID3v2 tag is primarily made up of chunks of data, called "Frames" by
//! the format. Frames are structured and can contain a variety of
//! information about the audio, from plain text fields to embedded cover
//! art.
//!
//! Frames come in four payload shapes, modeled by [`FrameBody`](FrameBody):
//! text (including URL links), comments, attached pictures, and a generic
//! shape that carries any other payload verbatim. Which shape a frame takes
//! is a pure function of its identifier.

pub mod apic;
pub mod bin;
pub mod comments;
mod encoding;
pub mod lang;
pub mod text;

pub use apic::{AttachedPictureFrame, PictureType};
pub use bin::GenericFrame;
pub use comments::CommentsFrame;
pub use lang::Language;
pub use text::TextFrame;

use crate::core::io::BufStream;
use crate::core::raw;
use crate::id3v2::{ParseError, ParseResult, SaveError, SaveResult};
use log::warn;
use std::convert::TryInto;
use std::fmt::{self, Display, Formatter};
use std::str;

/// A four-character frame identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct FrameId([u8; 4]);

impl FrameId {
    /// Creates a new frame ID from a hard-coded identifier. Passing a
    /// malformed identifier here is programmer error, so this panics
    /// instead of returning a result.
    pub fn new(id: &[u8; 4]) -> Self {
        Self::parse(id).expect("Frame IDs must be 4 uppercase ASCII characters or numbers.")
    }

    pub(crate) fn parse(id: &[u8; 4]) -> ParseResult<Self> {
        for ch in id {
            // Valid frame IDs can only contain uppercase ASCII chars and numbers.
            if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() {
                return Err(ParseError::MalformedFrame);
            }
        }

        Ok(Self(*id))
    }

    pub fn inner(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // We've asserted that this identifier is ASCII, so we can unwrap.
        str::from_utf8(&self.0).unwrap()
    }

    pub fn starts_with(&self, ch: u8) -> bool {
        self.0[0] == ch
    }

    /// Whether this identifier is in the fixed table of standard ID3v2.3
    /// and ID3v2.4 identifiers. Non-standard identifiers still parse as
    /// generic frames, this only backs validity checks.
    pub fn is_standard(&self) -> bool {
        STANDARD_IDS.iter().any(|id| id == &self.inner())
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.as_str()]
    }
}

impl PartialEq<[u8; 4]> for FrameId {
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&[u8; 4]> for FrameId {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        self == *other
    }
}

/// Every standard ID3v2.3/ID3v2.4 frame identifier.
const STANDARD_IDS: [&[u8; 4]; 92] = [
    b"AENC", b"APIC", b"ASPI", b"COMM", b"COMR", b"TSIZ", b"ENCR", b"EQUA", b"EQU2", b"ETCO",
    b"GEOB", b"GRID", b"LINK", b"MCDI", b"MLLT", b"OWNE", b"PCNT", b"POPM", b"POSS", b"PRIV",
    b"RBUF", b"RVAD", b"RVA2", b"RVRB", b"SEEK", b"SIGN", b"SYLT", b"SYTC", b"TALB", b"TBPM",
    b"TCOM", b"TCON", b"TCOP", b"TDEN", b"TDLY", b"TORY", b"TDOR", b"TDAT", b"TDRC", b"TRDA",
    b"TIME", b"TYER", b"TDRL", b"TDTG", b"TENC", b"TEXT", b"TFLT", b"IPLS", b"TIPL", b"TIT1",
    b"TIT2", b"TIT3", b"TKEY", b"TLAN", b"TLEN", b"TMCL", b"TMED", b"TMOO", b"TOAL", b"TOFN",
    b"TOLY", b"TOPE", b"TOWN", b"TPE1", b"TPE2", b"TPE3", b"TPE4", b"TPOS", b"TPRO", b"TPUB",
    b"TRCK", b"TRSN", b"TRSO", b"TSOA", b"TSOP", b"TSOT", b"TSRC", b"TSSE", b"TSST", b"TXXX",
    b"UFID", b"USER", b"USLT", b"WCOM", b"WCOP", b"WOAF", b"WOAR", b"WOAS", b"WORS", b"WPAY",
    b"WPUB", b"WXXX",
];

/// The identifier and flag bytes of a single frame. The two raw flag bytes
/// are kept as-is so that bits this library does not model survive a
/// rewrite unchanged.
#[derive(Clone, Copy, Debug)]
pub struct FrameHeader {
    frame_id: FrameId,
    stat_flags: u8,
    format_flags: u8,
}

impl FrameHeader {
    pub fn new(frame_id: FrameId) -> Self {
        Self::with_flags(frame_id, 0, 0)
    }

    pub fn with_flags(frame_id: FrameId, stat_flags: u8, format_flags: u8) -> Self {
        FrameHeader {
            frame_id,
            stat_flags,
            format_flags,
        }
    }

    pub fn id(&self) -> FrameId {
        self.frame_id
    }

    /// The raw flag bytes, status byte first.
    pub fn flag_bytes(&self) -> [u8; 2] {
        [self.stat_flags, self.format_flags]
    }

    // Frame status flags, from the first flag byte.

    pub fn tag_alter_preserve(&self) -> bool {
        raw::bit_at(7, self.stat_flags)
    }

    pub fn file_alter_preserve(&self) -> bool {
        raw::bit_at(6, self.stat_flags)
    }

    pub fn read_only(&self) -> bool {
        raw::bit_at(5, self.stat_flags)
    }

    // Frame format flags, from the second flag byte.

    pub fn compressed(&self) -> bool {
        raw::bit_at(7, self.format_flags)
    }

    pub fn encrypted(&self) -> bool {
        raw::bit_at(6, self.format_flags)
    }

    pub fn grouped(&self) -> bool {
        raw::bit_at(5, self.format_flags)
    }
}

/// A single frame, made up of its header and a decoded payload body.
#[derive(Clone, Debug)]
pub struct Frame {
    header: FrameHeader,
    body: FrameBody,
}

/// The decoded payload of a frame, in one of the four payload shapes.
#[derive(Clone, Debug)]
pub enum FrameBody {
    Text(TextFrame),
    Comment(CommentsFrame),
    Picture(AttachedPictureFrame),
    Generic(GenericFrame),
}

impl FrameBody {
    /// Whether this body has the shape that `id` dispatches to. Generic
    /// bodies can stand in for any identifier, since any frame may be
    /// downgraded to one.
    fn matches(&self, id: FrameId) -> bool {
        match self {
            FrameBody::Generic(_) => true,
            FrameBody::Text(_) => id.starts_with(b'T') || id.starts_with(b'W'),
            FrameBody::Comment(_) => id == b"COMM",
            FrameBody::Picture(_) => id == b"APIC",
        }
    }
}

impl Frame {
    /// Creates a frame from an identifier and a matching body. Pairing an
    /// identifier with a body shape it does not dispatch to is programmer
    /// error and panics.
    pub fn new(id: &[u8; 4], body: FrameBody) -> Self {
        Self::with_header(FrameHeader::new(FrameId::new(id)), body)
    }

    pub fn with_header(header: FrameHeader, body: FrameBody) -> Self {
        if !body.matches(header.id()) {
            panic!("frame body shape does not match identifier {}", header.id());
        }

        Frame { header, body }
    }

    /// A text or URL link frame under the given identifier.
    pub fn text(id: &[u8; 4], frame: TextFrame) -> Self {
        Self::new(id, FrameBody::Text(frame))
    }

    /// A `COMM` frame.
    pub fn comment(frame: CommentsFrame) -> Self {
        Self::new(b"COMM", FrameBody::Comment(frame))
    }

    /// An `APIC` frame.
    pub fn picture(frame: AttachedPictureFrame) -> Self {
        Self::new(b"APIC", FrameBody::Picture(frame))
    }

    /// An opaque frame under the given identifier.
    pub fn generic(id: &[u8; 4], frame: GenericFrame) -> Self {
        Self::new(id, FrameBody::Generic(frame))
    }

    pub fn id(&self) -> FrameId {
        self.header.id()
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn body(&self) -> &FrameBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut FrameBody {
        &mut self.body
    }

    pub fn into_body(self) -> FrameBody {
        self.body
    }

    /// A key that identifies this frame within a tag. Comment and picture
    /// frames may legally repeat under one identifier as long as their
    /// descriptions (and languages) differ, so those fields are part of
    /// the key.
    pub fn key(&self) -> String {
        match &self.body {
            FrameBody::Comment(comment) => format!["COMM:{}:{}", comment.desc, comment.lang],
            FrameBody::Picture(picture) => format!["APIC:{}", picture.desc],
            _ => self.id().to_string(),
        }
    }

    fn render_payload(&self) -> Vec<u8> {
        match &self.body {
            FrameBody::Text(frame) => frame.render(),
            FrameBody::Comment(frame) => frame.render(),
            FrameBody::Picture(frame) => frame.render(),
            FrameBody::Generic(frame) => frame.render(),
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.body {
            FrameBody::Text(frame) => frame.fmt(f),
            FrameBody::Comment(frame) => frame.fmt(f),
            FrameBody::Picture(frame) => frame.fmt(f),
            FrameBody::Generic(frame) => frame.fmt(f),
        }
    }
}

/// Reads the next frame block from the stream: a fixed 10-byte header of
/// identifier, plain big-endian payload size, and two flag bytes, followed
/// by exactly that many payload bytes. A payload running past the stream is
/// a truncated tag.
pub(crate) fn next(stream: &mut BufStream) -> ParseResult<Frame> {
    let frame_id = FrameId::parse(&stream.read_array()?)?;

    // Unlike the tag size, frame sizes are plain big-endian integers, not
    // synchsafe.
    let size = stream.read_u32()? as usize;
    let flags = stream.read_array::<2>()?;

    let header = FrameHeader::with_flags(frame_id, flags[0], flags[1]);
    let payload = stream.slice(size).map_err(|_| ParseError::Truncated)?;

    Ok(parse(header, payload))
}

/// Decodes a frame payload into the shape its identifier dispatches to.
/// A payload that violates its shape's structure or text encoding is
/// downgraded to a generic frame over the same raw bytes, so one bad frame
/// never loses the rest of the tag.
pub(crate) fn parse(header: FrameHeader, payload: &[u8]) -> Frame {
    let body = match decode_body(&header, payload) {
        Ok(body) => body,
        Err(err) => {
            warn!(
                target: "id3v2",
                "downgrading frame {} to its raw payload: {}",
                header.id(),
                err
            );

            FrameBody::Generic(GenericFrame::from(payload))
        }
    };

    Frame { header, body }
}

fn decode_body(header: &FrameHeader, payload: &[u8]) -> ParseResult<FrameBody> {
    let mut stream = BufStream::new(payload);
    let id = header.id();

    // Dispatch by identifier. The comment and picture matches are exact:
    // an identifier that merely contains "COMM" (such as COMR) is not a
    // comment frame.
    let body = if id == b"COMM" {
        FrameBody::Comment(CommentsFrame::parse(&mut stream)?)
    } else if id == b"APIC" {
        FrameBody::Picture(AttachedPictureFrame::parse(&mut stream)?)
    } else if id.starts_with(b'T') || id.starts_with(b'W') {
        FrameBody::Text(TextFrame::parse(&mut stream)?)
    } else {
        FrameBody::Generic(GenericFrame::parse(&mut stream))
    };

    Ok(body)
}

/// Renders a frame into a complete block: the 10-byte header with the
/// payload size recomputed from the encoded payload, then the payload.
pub(crate) fn render(frame: &Frame) -> SaveResult<Vec<u8>> {
    let payload = frame.render_payload();

    let size: u32 = payload.len().try_into().map_err(|_| {
        warn!(
            target: "id3v2",
            "frame {} payload exceeds the maximum frame size",
            frame.id()
        );

        SaveError::TooLarge
    })?;

    let mut data = Vec::with_capacity(payload.len() + 10);
    data.extend(frame.id().inner());
    data.extend(&size.to_be_bytes());
    data.extend(&frame.header().flag_bytes());
    data.extend(payload);

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::Encoding;

    fn test_text(text: &str) -> TextFrame {
        TextFrame {
            encoding: Encoding::Latin1,
            text: String::from(text),
        }
    }

    #[test]
    fn parse_frame_id() {
        assert!(FrameId::parse(b"TIT2").is_ok());
        assert!(FrameId::parse(b"TPE1").is_ok());
        assert!(FrameId::parse(b"WZZZ").is_ok());
        assert!(FrameId::parse(b"GRP1").is_ok());

        assert!(FrameId::parse(b"tit2").is_err());
        assert!(FrameId::parse(b"TIT\x00").is_err());
        assert!(FrameId::parse(b"\xFF\xFE\x00\x01").is_err());
    }

    #[test]
    fn check_standard_ids() {
        assert!(FrameId::new(b"TIT2").is_standard());
        assert!(FrameId::new(b"APIC").is_standard());
        assert!(FrameId::new(b"WXXX").is_standard());

        // Well-formed but non-standard identifiers are not in the table.
        assert!(!FrameId::new(b"ZZZZ").is_standard());
        assert!(!FrameId::new(b"GRP1").is_standard());
    }

    #[test]
    fn dispatch_by_id() {
        let text = next(&mut BufStream::new(b"TIT2\x00\x00\x00\x06\x00\x00\x00Title")).unwrap();
        assert!(matches!(text.body(), FrameBody::Text(_)));

        let link = next(&mut BufStream::new(
            b"WOAR\x00\x00\x00\x11\x00\x00\x00https://test.com",
        ))
        .unwrap();
        assert!(matches!(link.body(), FrameBody::Text(_)));

        let unknown = next(&mut BufStream::new(b"ZZZZ\x00\x00\x00\x02\x00\x00\x16\x16")).unwrap();
        assert!(matches!(unknown.body(), FrameBody::Generic(_)));
    }

    #[test]
    fn dispatch_comm_exactly() {
        // COMR contains "COMM" minus a letter, but it is a commercial
        // frame, not a comment, and must come out generic.
        let frame = next(&mut BufStream::new(b"COMR\x00\x00\x00\x04\x00\x00\x16\x16\x16\x16"))
            .unwrap();

        assert!(matches!(frame.body(), FrameBody::Generic(_)));
    }

    #[test]
    fn downgrade_malformed_frame() {
        // A comment frame with no description terminator cannot be decoded
        // structurally, but its raw payload must survive.
        let frame = next(&mut BufStream::new(b"COMM\x00\x00\x00\x08\x00\x00\x00engDesc")).unwrap();

        assert_eq!(frame.id(), b"COMM");

        match frame.body() {
            FrameBody::Generic(generic) => assert_eq!(generic.data, b"\x00engDesc"),
            other => panic!("expected a generic downgrade, got {:?}", other),
        }
    }

    #[test]
    fn truncated_frame_is_fatal() {
        let result = next(&mut BufStream::new(b"TIT2\x00\x00\x00\x40\x00\x00Title"));

        assert!(matches!(result, Err(ParseError::Truncated)));
    }

    #[test]
    fn render_frame_block() {
        let frame = Frame::text(b"TALB", test_text("Test Album"));

        assert_render!(frame, b"TALB\x00\x00\x00\x0B\x00\x00\x00Test Album");
    }

    #[test]
    fn render_keeps_flag_bytes() {
        let header = FrameHeader::with_flags(FrameId::new(b"TALB"), 0xA0, 0x20);
        let frame = Frame::with_header(header, FrameBody::Text(test_text("Test Album")));

        assert!(frame.header().tag_alter_preserve());
        assert!(!frame.header().file_alter_preserve());
        assert!(frame.header().read_only());
        assert!(frame.header().grouped());

        assert_render!(frame, b"TALB\x00\x00\x00\x0B\xA0\x20\x00Test Album");
    }

    #[test]
    fn frame_keys() {
        assert_eq!(Frame::text(b"TIT2", test_text("Title")).key(), "TIT2");

        let comment = CommentsFrame {
            desc: String::from("Desc"),
            ..Default::default()
        };

        assert_eq!(Frame::comment(comment).key(), "COMM:Desc:xxx");
    }
}
