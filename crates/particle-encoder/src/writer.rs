use std::io::{self, Write};

/// Content writer returned by
/// [`FrontmatterEncoder::writer`](crate::FrontmatterEncoder::writer).
///
/// The frontmatter block has already been written to the inner writer by
/// the time this is constructed; everything written here lands after it
/// unchanged.
#[derive(Debug)]
pub struct FrontmatterWriter<W> {
    inner: W,
    frontmatter_len: usize,
}

impl<W: Write> FrontmatterWriter<W> {
    pub(crate) fn new(inner: W, frontmatter_len: usize) -> Self {
        Self {
            inner,
            frontmatter_len,
        }
    }

    /// Bytes of frontmatter written ahead of the content.
    #[must_use]
    pub fn frontmatter_len(&self) -> usize {
        self.frontmatter_len
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for FrontmatterWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
