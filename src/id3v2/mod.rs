//! ID3v2 tag reading and writing.
//!
//! An ID3v2 tag is a block of metadata prefixed to an audio file, split
//! into a fixed 10-byte header and a directory of frames. [`Tag`](Tag)
//! parses that block out of a byte source, exposes the frames for editing,
//! and reassembles a complete file image with the audio payload untouched.

pub mod frame_map;
pub mod frames;
pub mod header;
mod syncdata;

pub use frame_map::FrameMap;
pub use frames::Frame;
pub use header::{ExtendedHeader, TagFlags, TagHeader};

use crate::core::io::BufStream;
use crate::string::DecodeError;
use log::warn;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

/// An ID3v2 tag: its header and an ordered collection of frames.
pub struct Tag {
    header: TagHeader,
    ext_header: Option<ExtendedHeader>,
    frames: FrameMap,
}

impl Tag {
    /// An empty ID3v2.3 tag with no frames.
    pub fn new() -> Self {
        Tag {
            header: TagHeader::new(),
            ext_header: None,
            frames: FrameMap::new(),
        }
    }

    /// Reads a file and parses the tag at its start. `Ok(None)` means the
    /// file exists but carries no tag.
    pub fn open<P: AsRef<Path>>(path: P) -> ParseResult<Option<Self>> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parses the tag at the start of `data`. A source that does not begin
    /// with the `ID3` identifier is simply tagless, which is a valid state
    /// and not an error. A tag whose declared size cannot be bounded by
    /// the source is truncated, which is.
    pub fn parse(data: &[u8]) -> ParseResult<Option<Self>> {
        let mut stream = BufStream::new(data);

        if stream.remaining() < 10 {
            return Ok(None);
        }

        let mut header = match TagHeader::parse(stream.read_array()?) {
            Some(header) => header,
            None => return Ok(None),
        };

        if header.flags().unsync {
            // Unsynchronization byte-stuffing is not decoded, only the
            // flag is carried through.
            warn!(target: "id3v2", "tag is unsynchronized, text fields may decode oddly");
        }

        let body = stream
            .slice(header.size())
            .map_err(|_| ParseError::Truncated)?;

        // The extended header is only skipped, never decoded. If parsing
        // it runs out of bounds the flag was set by mistake, so correct
        // the flag and treat the body as starting with frames.
        let ext_header = if header.flags().extended {
            match ExtendedHeader::parse(&mut BufStream::new(body)) {
                Ok(ext) => Some(ext),
                Err(_) => {
                    header.flags_mut().extended = false;
                    None
                }
            }
        } else {
            None
        };

        let frame_data = match &ext_header {
            Some(ext) => &body[ext.total_size()..],
            None => body,
        };

        let frames = parse_frames(frame_data)?;

        Ok(Some(Tag {
            header,
            ext_header,
            frames,
        }))
    }

    pub fn version(&self) -> (u8, u8) {
        (self.header.major(), self.header.minor())
    }

    /// The size the tag body declared when it was parsed. A tag that was
    /// built from scratch declares zero until it is rendered.
    pub fn size(&self) -> usize {
        self.header.size()
    }

    pub fn flags(&self) -> &TagFlags {
        self.header.flags()
    }

    pub fn flags_mut(&mut self) -> &mut TagFlags {
        self.header.flags_mut()
    }

    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameMap {
        &mut self.frames
    }

    pub fn ext_header(&self) -> Option<&ExtendedHeader> {
        self.ext_header.as_ref()
    }

    /// Serializes this tag into a standalone byte image: the 10-byte tag
    /// header with a recomputed synchsafe size, then every frame in
    /// collection order. Rendering the same frame set twice produces
    /// byte-identical output.
    pub fn render(&self) -> SaveResult<Vec<u8>> {
        let mut body = Vec::new();

        for frame in self.frames.frames() {
            body.extend(frames::render(frame)?);
        }

        // The declared size is synchsafe and therefore capped at 28 bits.
        if body.len() > 0x0FFF_FFFF {
            return Err(SaveError::TooLarge);
        }

        let mut out = Vec::with_capacity(body.len() + 10);
        out.extend(&self.header.render(body.len() as u32));
        out.extend(body);

        Ok(out)
    }

    /// Produces a new file image: this tag, rendered, followed by the audio
    /// payload of `source` with its old tag stripped off. The audio bytes
    /// are never touched.
    pub fn rewrite(&self, source: &[u8]) -> SaveResult<Vec<u8>> {
        let offset = media_offset(source)?;

        let mut out = self.render()?;
        out.extend(&source[offset..]);

        Ok(out)
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the audio payload of `source` with any leading tag removed. The
/// payload is returned unchanged, byte for byte.
pub fn strip(source: &[u8]) -> ParseResult<Vec<u8>> {
    let offset = media_offset(source)?;

    Ok(source[offset..].to_vec())
}

/// Finds the offset where the audio payload begins: zero for a tagless
/// source, or the end of the declared tag. A declared size running past
/// the source is an error, since the payload cannot be isolated safely.
fn media_offset(source: &[u8]) -> ParseResult<usize> {
    if source.len() < 10 {
        return Ok(0);
    }

    let mut raw = [0; 10];
    raw.copy_from_slice(&source[..10]);

    match TagHeader::parse(raw) {
        Some(header) => {
            let end = 10 + header.size();

            if end > source.len() {
                return Err(ParseError::Truncated);
            }

            Ok(end)
        }

        None => Ok(0),
    }
}

/// Walks the frame directory. Every frame block is 10 bytes of header plus
/// its declared payload. A block starting with a zero byte is padding and
/// is skipped whole. Anything that runs past the directory is a truncated
/// tag, surfaced to the caller rather than silently dropped.
fn parse_frames(data: &[u8]) -> ParseResult<FrameMap> {
    let mut frames = FrameMap::new();
    let mut stream = BufStream::new(data);

    while stream.remaining() >= 10 {
        // A zero byte where an identifier should start means this block is
        // trailing padding. Frames cannot follow padding, but some taggers
        // interleave it anyway, so keep walking instead of stopping.
        if stream.peek_u8()? == 0 {
            stream.skip(10)?;
            continue;
        }

        frames.add(frames::next(&mut stream)?);
    }

    // Whatever remains is too short to be a frame header. Zeroes are the
    // tail of the padding; anything else is a frame header that was cut
    // off by the declared size.
    if stream.take_rest().iter().any(|&byte| byte != 0) {
        return Err(ParseError::Truncated);
    }

    Ok(frames)
}

/// An error encountered while parsing a tag from a source.
#[derive(Debug)]
pub enum ParseError {
    /// The declared tag size exceeds the available bytes, or a frame
    /// claims more payload than remains in the directory.
    Truncated,
    /// A frame payload violated a structural invariant of its shape.
    MalformedFrame,
    /// A text field was not valid in its declared encoding.
    BadText(DecodeError),
    /// The source could not be read at all.
    IoError(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?}", self]
    }
}

impl error::Error for ParseError {}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        // In-memory underreads always mean the tag data ran out early.
        // Anything else is a real I/O failure from the source.
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::IoError(err)
        }
    }
}

impl From<DecodeError> for ParseError {
    fn from(err: DecodeError) -> Self {
        Self::BadText(err)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// An error encountered while rendering or writing a tag.
#[derive(Debug)]
pub enum SaveError {
    /// A frame payload or the whole tag body exceeded its size field.
    TooLarge,
    /// The source's existing tag cannot be bounded, so the audio payload
    /// cannot be isolated for a rewrite.
    Truncated,
    /// The rewritten image could not be written out.
    IoError(io::Error),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?}", self]
    }
}

impl error::Error for SaveError {}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<ParseError> for SaveError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::IoError(err) => Self::IoError(err),
            _ => Self::Truncated,
        }
    }
}

pub type SaveResult<T> = Result<T, SaveError>;
