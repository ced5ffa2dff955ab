use std::error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// A bounds-checked cursor over an in-memory byte slice.
///
/// Every tag parse operates on a fully-buffered source, so this only needs
/// to automate bounds checking and position tracking over a borrowed slice.
pub struct BufStream<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> BufStream<'a> {
    /// Construct a new `BufStream` from `src`.
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Read this stream into a buffer. If the buffer cannot be completely
    /// filled, an error is returned and the buffer is left in an
    /// indeterminate state.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        if self.remaining() < buf.len() {
            return Err(underread_error());
        }

        buf.copy_from_slice(&self.src[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();

        Ok(())
    }

    /// Read this stream into an array of size `N`, returning an error when
    /// the array cannot be filled.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut arr = [0; N];
        self.read_exact(&mut arr)?;
        Ok(arr)
    }

    /// Read exactly one byte from this stream.
    pub fn read_u8(&mut self) -> io::Result<u8> {
        if self.is_empty() {
            return Err(eos_error());
        }

        self.pos += 1;

        Ok(self.src[self.pos - 1])
    }

    /// Read a big-endian u32 from this stream.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Peek at the next byte without consuming the stream.
    pub fn peek_u8(&self) -> io::Result<u8> {
        if self.is_empty() {
            return Err(eos_error());
        }

        Ok(self.src[self.pos])
    }

    /// Skip `n` bytes in this stream. If the skip is beyond the stream
    /// length then an error is returned and the position is unchanged.
    pub fn skip(&mut self, n: usize) -> io::Result<()> {
        if self.remaining() < n {
            return Err(oob_error());
        }

        self.pos += n;

        Ok(())
    }

    /// Consumes the stream and returns a slice of size `n`. If the slice
    /// cannot be created, then an error is returned.
    pub fn slice(&mut self, n: usize) -> io::Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(underread_error());
        }

        self.pos += n;

        Ok(&self.src[self.pos - n..self.pos])
    }

    /// Searches for `needle`, scanning forward in steps of the needle's
    /// width so that multi-byte terminators stay aligned to their field.
    /// On a match the stream is consumed through the needle and the data
    /// preceding it is returned. If the stream runs out without a match,
    /// `None` is returned and the position is left unchanged.
    pub fn search(&mut self, needle: &[u8]) -> Option<&'a [u8]> {
        let start = self.pos;

        let mut begin = self.pos;
        let mut end = self.pos + needle.len();

        while end <= self.src.len() {
            if &self.src[begin..end] == needle {
                self.pos = end;

                return Some(&self.src[start..begin]);
            }

            begin += needle.len();
            end += needle.len();
        }

        None
    }

    /// Takes the rest of the stream's data into a slice, leaving the stream
    /// in a fully consumed state.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = &self.src[self.pos..];
        self.pos += self.remaining();
        rest
    }

    /// Returns the length of this stream.
    pub fn len(&self) -> usize {
        self.src.len()
    }

    /// Returns the stream position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the remaining length of this stream.
    pub fn remaining(&self) -> usize {
        self.len() - self.pos()
    }

    /// Returns if this stream has been fully consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[derive(Debug)]
pub enum StreamError {
    EndOfStream,
    BufferUnderread,
    OutOfBounds,
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?}", self]
    }
}

impl error::Error for StreamError {
    // Nothing to implement
}

#[inline(always)]
fn eos_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::EndOfStream)
}

#[inline(always)]
fn underread_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::BufferUnderread)
}

#[inline(always)]
fn oob_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::OutOfBounds)
}
