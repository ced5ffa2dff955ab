use crate::core::io::BufStream;
use crate::core::raw;
use crate::id3v2::syncdata;
use crate::id3v2::ParseResult;

pub(crate) const ID_HEADER: &[u8; 3] = b"ID3";

/// The fixed 10-byte header at the start of every ID3v2 tag.
pub struct TagHeader {
    major: u8,
    minor: u8,
    tag_size: usize,
    flags: TagFlags,
}

impl TagHeader {
    /// Parses a raw 10-byte block into a tag header. Returns `None` when
    /// the block does not begin with the literal `ID3` identifier, which
    /// means the source has no tag at all rather than a malformed one.
    pub(crate) fn parse(raw: [u8; 10]) -> Option<Self> {
        if &raw[0..3] != ID_HEADER {
            return None;
        }

        let major = raw[3];
        let minor = raw[4];
        let flags = TagFlags::parse(raw[5]);

        // The declared size covers the frame blocks and padding, but not
        // the header itself.
        let tag_size = syncdata::to_u28([raw[6], raw[7], raw[8], raw[9]]) as usize;

        Some(TagHeader {
            major,
            minor,
            tag_size,
            flags,
        })
    }

    /// A fresh header for a newly-built tag, using ID3v2.3 with no flags.
    pub(crate) fn new() -> Self {
        TagHeader {
            major: 3,
            minor: 0,
            tag_size: 0,
            flags: TagFlags::default(),
        }
    }

    /// Renders this header with a new declared size. The extended header
    /// flag is dropped, as assembled tags never contain one.
    pub(crate) fn render(&self, size: u32) -> [u8; 10] {
        let mut out = [0; 10];

        out[0..3].copy_from_slice(ID_HEADER);
        out[3] = self.major;
        out[4] = self.minor;
        out[5] = self.flags.render() & !0x40;
        out[6..10].copy_from_slice(&syncdata::from_u28(size));

        out
    }

    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// The declared size of the tag body, in bytes, excluding the header.
    pub fn size(&self) -> usize {
        self.tag_size
    }

    pub fn flags(&self) -> &TagFlags {
        &self.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut TagFlags {
        &mut self.flags
    }
}

/// The flag bits carried in byte 5 of the tag header.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagFlags {
    pub unsync: bool,
    pub extended: bool,
    pub experimental: bool,
}

impl TagFlags {
    pub(crate) fn parse(flags: u8) -> Self {
        TagFlags {
            unsync: raw::bit_at(7, flags),
            extended: raw::bit_at(6, flags),
            experimental: raw::bit_at(5, flags),
        }
    }

    pub(crate) fn render(&self) -> u8 {
        let mut flags = 0;

        if self.unsync {
            flags |= 0x80;
        }

        if self.extended {
            flags |= 0x40;
        }

        if self.experimental {
            flags |= 0x20;
        }

        flags
    }
}

/// An extended header, carried verbatim.
///
/// The extended header is detected and skipped so that the frame directory
/// starts in the right place, but its fields are never interpreted and it
/// is not written back out when the tag is assembled.
pub struct ExtendedHeader {
    data: Vec<u8>,
}

impl ExtendedHeader {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let size = stream.read_u32()? as usize;
        let data = stream.slice(size)?.to_vec();

        Ok(ExtendedHeader { data })
    }

    /// The undecoded contents, not including the leading size field.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The on-wire footprint of this header, including the size field.
    pub(crate) fn total_size(&self) -> usize {
        self.data.len() + 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tag_header() {
        let data = *b"\x49\x44\x33\x03\x00\xA0\x00\x00\x02\x01";
        let header = TagHeader::parse(data).unwrap();
        let flags = header.flags();

        assert_eq!(header.major(), 3);
        assert_eq!(header.minor(), 0);
        assert_eq!(header.size(), 257);

        assert!(flags.unsync);
        assert!(!flags.extended);
        assert!(flags.experimental);
    }

    #[test]
    fn parse_foreign_header() {
        // Anything that doesn't start with "ID3" is simply not a tag.
        assert!(TagHeader::parse(*b"ID2\x03\x00\x00\x00\x00\x02\x01").is_none());
        assert!(TagHeader::parse([0xFF; 10]).is_none());
    }

    #[test]
    fn render_tag_header() {
        let mut header = TagHeader::new();
        header.flags_mut().unsync = true;

        assert_eq!(
            header.render(257),
            *b"\x49\x44\x33\x03\x00\x80\x00\x00\x02\x01"
        );
    }

    #[test]
    fn render_drops_extended_flag() {
        let mut header = TagHeader::new();
        header.flags_mut().extended = true;
        header.flags_mut().experimental = true;

        assert_eq!(header.render(0)[5], 0x20);
    }

    #[test]
    fn parse_ext_header() {
        let data = b"\x00\x00\x00\x06\x16\x16\x16\x16\x16\x16rest";
        let mut stream = BufStream::new(data);
        let header = ExtendedHeader::parse(&mut stream).unwrap();

        assert_eq!(header.data(), &[0x16; 6]);
        assert_eq!(header.total_size(), 10);
        assert_eq!(stream.take_rest(), b"rest");
    }

    #[test]
    fn parse_bogus_ext_header() {
        // A size running past the buffer means the flag was set by mistake.
        let data = b"\xAB\xCD\xEF\x00\x16\x16";
        assert!(ExtendedHeader::parse(&mut BufStream::new(data)).is_err());
    }
}
