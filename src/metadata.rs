//! Friendly field access.
//!
//! This module is a thin mapping layer between well-known frame
//! identifiers and domain-named accessors, so that callers can ask for an
//! album title instead of a `TALB` frame. All of the real work happens in
//! the [`id3v2`](crate::id3v2) module; nothing here touches the wire
//! format.

use crate::file::File;
use crate::id3v2::frames::{
    AttachedPictureFrame, CommentsFrame, Frame, FrameBody, PictureType, TextFrame,
};
use crate::id3v2::{ParseResult, Tag};
use regex::Regex;

/// Domain-named access to the common fields of a tag.
pub struct Metadata {
    tag: Tag,
}

impl Metadata {
    pub fn new(tag: Tag) -> Self {
        Metadata { tag }
    }

    /// Reads the metadata of a media file. A tagless file yields an empty
    /// set of fields backed by a fresh tag.
    pub fn from_file(file: &File) -> ParseResult<Self> {
        Ok(Metadata {
            tag: file.tag()?.unwrap_or_default(),
        })
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }

    pub fn title(&self) -> Option<&str> {
        self.text(b"TIT2")
    }

    pub fn artist(&self) -> Option<&str> {
        self.text(b"TPE1")
    }

    pub fn album(&self) -> Option<&str> {
        self.text(b"TALB")
    }

    pub fn album_artist(&self) -> Option<&str> {
        self.text(b"TPE2")
    }

    pub fn composer(&self) -> Option<&str> {
        self.text(b"TCOM")
    }

    pub fn publisher(&self) -> Option<&str> {
        self.text(b"TPUB")
    }

    pub fn encoded_by(&self) -> Option<&str> {
        self.text(b"TENC")
    }

    pub fn lyricist(&self) -> Option<&str> {
        self.text(b"TEXT")
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.text(b"TIT3")
    }

    pub fn conductor(&self) -> Option<&str> {
        self.text(b"TPE3")
    }

    pub fn copyright(&self) -> Option<&str> {
        self.text(b"TCOP")
    }

    pub fn media_type(&self) -> Option<&str> {
        self.text(b"TMED")
    }

    pub fn original_title(&self) -> Option<&str> {
        self.text(b"TOAL")
    }

    pub fn original_artist(&self) -> Option<&str> {
        self.text(b"TOPE")
    }

    /// The official artist webpage. Link frames share the text frame
    /// shape, so webpages read like any other text field.
    pub fn artist_webpage(&self) -> Option<&str> {
        self.text(b"WOAR")
    }

    pub fn audio_webpage(&self) -> Option<&str> {
        self.text(b"WOAF")
    }

    pub fn publisher_webpage(&self) -> Option<&str> {
        self.text(b"WPUB")
    }

    /// The track number. Tracks are often stored as "3/12", in which case
    /// only the position is returned.
    pub fn track(&self) -> Option<u32> {
        let text = self.text(b"TRCK")?;
        text.split('/').next()?.parse().ok()
    }

    pub fn year(&self) -> Option<u32> {
        self.text(b"TYER")?.parse().ok()
    }

    /// The length of the audio, in milliseconds.
    pub fn length(&self) -> Option<u32> {
        self.text(b"TLEN")?.parse().ok()
    }

    /// The genre, with references into the legacy genre table resolved to
    /// their names.
    pub fn genre(&self) -> Option<String> {
        self.text(b"TCON").map(resolve_genre)
    }

    /// The text of the first comment frame, if any.
    pub fn comment(&self) -> Option<&str> {
        self.tag.frames().frames().find_map(|frame| match frame.body() {
            FrameBody::Comment(comment) => Some(comment.text.as_str()),
            _ => None,
        })
    }

    /// The first attached picture, if any. The picture bytes are raw;
    /// decoding them is up to an image library.
    pub fn cover(&self) -> Option<&AttachedPictureFrame> {
        self.tag.frames().frames().find_map(|frame| match frame.body() {
            FrameBody::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    pub fn set_title(&mut self, title: &str) {
        self.set_text(b"TIT2", title)
    }

    pub fn set_artist(&mut self, artist: &str) {
        self.set_text(b"TPE1", artist)
    }

    pub fn set_album(&mut self, album: &str) {
        self.set_text(b"TALB", album)
    }

    pub fn set_album_artist(&mut self, artist: &str) {
        self.set_text(b"TPE2", artist)
    }

    pub fn set_composer(&mut self, composer: &str) {
        self.set_text(b"TCOM", composer)
    }

    pub fn set_publisher(&mut self, publisher: &str) {
        self.set_text(b"TPUB", publisher)
    }

    pub fn set_lyricist(&mut self, lyricist: &str) {
        self.set_text(b"TEXT", lyricist)
    }

    pub fn set_subtitle(&mut self, subtitle: &str) {
        self.set_text(b"TIT3", subtitle)
    }

    pub fn set_conductor(&mut self, conductor: &str) {
        self.set_text(b"TPE3", conductor)
    }

    pub fn set_copyright(&mut self, copyright: &str) {
        self.set_text(b"TCOP", copyright)
    }

    pub fn set_track(&mut self, track: u32) {
        self.set_text(b"TRCK", &track.to_string())
    }

    pub fn set_year(&mut self, year: u32) {
        self.set_text(b"TYER", &year.to_string())
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.set_text(b"TCON", genre)
    }

    /// Replaces every comment frame with a single one holding `comment`.
    pub fn set_comment(&mut self, comment: &str) {
        self.tag
            .frames_mut()
            .replace(Frame::comment(CommentsFrame::new(comment)));
    }

    /// Replaces every attached picture with a single front-cover picture.
    pub fn set_cover(&mut self, mime: &str, picture: Vec<u8>) {
        let mut frame = AttachedPictureFrame::new(mime, picture);
        frame.pic_type = PictureType::FrontCover;

        self.tag.frames_mut().replace(Frame::picture(frame));
    }

    fn text(&self, id: &[u8; 4]) -> Option<&str> {
        self.tag.frames().frames().find_map(|frame| {
            if frame.id() != id {
                return None;
            }

            match frame.body() {
                FrameBody::Text(text) => Some(text.text.as_str()),
                _ => None,
            }
        })
    }

    fn set_text(&mut self, id: &[u8; 4], text: &str) {
        self.tag
            .frames_mut()
            .replace(Frame::text(id, TextFrame::new(text)));
    }
}

/// Looks up a genre name in the legacy genre table.
pub fn genre_name(index: usize) -> Option<&'static str> {
    GENRES.get(index).copied()
}

/// Resolves a TCON value. The genre may be named directly or reference the
/// legacy table as "(NN)" or a bare number; unresolvable references come
/// back verbatim.
fn resolve_genre(text: &str) -> String {
    // The pattern is hard-coded, so we can unwrap.
    let reference = Regex::new(r"^\((\d+)\)$|^(\d+)$").unwrap();

    if let Some(caps) = reference.captures(text) {
        let digits = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();

        if let Some(name) = digits.parse().ok().and_then(genre_name) {
            return name.to_string();
        }
    }

    text.to_string()
}

/// The legacy genre name table, indexed by TCON genre references.
const GENRES: [&str; 147] = [
    "Blues",
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "Alternative Rock",
    "Bass",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top 40",
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native US",
    "Cabaret",
    "New Wave",
    "Psychedelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
    "Folk",
    "Folk-Rock",
    "National Folk",
    "Swing",
    "Fast Fusion",
    "Bebob",
    "Latin",
    "Revival",
    "Celtic",
    "Bluegrass",
    "Avantgarde",
    "Gothic Rock",
    "Progressive Rock",
    "Psychedelic Rock",
    "Symphonic Rock",
    "Slow Rock",
    "Big Band",
    "Chorus",
    "Easy Listening",
    "Acoustic",
    "Humour",
    "Speech",
    "Chanson",
    "Opera",
    "Chamber Music",
    "Sonata",
    "Symphony",
    "Booty Bass",
    "Primus",
    "Porn Groove",
    "Satire",
    "Slow Jam",
    "Club",
    "Tango",
    "Samba",
    "Folklore",
    "Ballad",
    "Power Ballad",
    "Rhythmic Soul",
    "Freestyle",
    "Duet",
    "Punk Rock",
    "Drum Solo",
    "A Cappella",
    "Euro-House",
    "Dance Hall",
    "Goa",
    "Drum & Bass",
    "Club-House",
    "Hardcore",
    "Terror",
    "Indie",
    "BritPop",
    "Negerpunk",
    "Polsk Punk",
    "Beat",
    "Christian Gangsta",
    "Heavy Metal",
    "Black Metal",
    "Crossover",
    "Contemporary Christian",
    "Christian Rock",
    "Merengue",
    "Salsa",
    "Thrash Metal",
    "Anime",
    "JPop",
    "SynthPop",
];
