//! Media file handling.

use crate::id3v2::{self, ParseResult, SaveResult, Tag};
use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::{Path, PathBuf};

/// A media file buffered into memory.
///
/// Tag parsing and rewriting both need the full source available at once,
/// since the tag size field is written only after the total length is
/// known, so the file is read in one shot rather than streamed.
pub struct File {
    path: PathBuf,
    data: Vec<u8>,
}

impl File {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<File> {
        let path = path.as_ref();

        // Directories aren't supported
        if path.is_dir() {
            return Err(Error::new(ErrorKind::InvalidInput, FileError::IsDir));
        }

        let data = fs::read(path)?;

        Ok(File {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parses the ID3v2 tag at the start of this file, if there is one.
    pub fn tag(&self) -> ParseResult<Option<Tag>> {
        Tag::parse(&self.data)
    }

    /// Rewrites this file with a new tag, leaving the audio payload
    /// untouched.
    pub fn save(&mut self, tag: &Tag) -> SaveResult<()> {
        let image = tag.rewrite(&self.data)?;
        self.replace(image)
    }

    /// Rewrites this file with its tag removed.
    pub fn strip(&mut self) -> SaveResult<()> {
        let image = id3v2::strip(&self.data)?;
        self.replace(image)
    }

    /// Replaces the file on disk with a new image. The image is written to
    /// a sibling temporary file and renamed over the original, so the
    /// original is never left half-written.
    fn replace(&mut self, image: Vec<u8>) -> SaveResult<()> {
        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, &image)?;
        fs::rename(&tmp, &self.path)?;

        self.data = image;

        Ok(())
    }
}

#[derive(Debug)]
enum FileError {
    IsDir,
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let msg = match self {
            FileError::IsDir => "Is a directory",
        };

        write!(f, "{}", msg)
    }
}

impl error::Error for FileError {}
