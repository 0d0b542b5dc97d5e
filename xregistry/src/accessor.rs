//! Lazily-opened artifact content.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A boxed, owned byte stream handed to the caller of [`ContentAccessor::open`].
pub type ContentStream = Box<dyn Read + Send>;

type OpenFn = dyn Fn() -> io::Result<ContentStream> + Send + Sync;

/// Opens a fresh stream over an artifact's content on every call.
///
/// The accessor holds no open handle between calls: each [`open`](Self::open)
/// returns an independent stream positioned at the start, owned by the caller
/// and closed when dropped. Clones share the same opener, so an accessor can
/// be copied into several maps and invoked from several threads.
#[derive(Clone)]
pub struct ContentAccessor {
    open: Arc<OpenFn>,
    source: Option<PathBuf>,
}

impl ContentAccessor {
    /// Accessor that opens the file at `path` on each call.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let target = path.clone();
        Self {
            open: Arc::new(move || -> io::Result<ContentStream> {
                let file = File::open(&target)?;
                Ok(Box::new(BufReader::new(file)))
            }),
            source: Some(path),
        }
    }

    /// Accessor backed by an arbitrary opener.
    #[must_use]
    pub fn from_fn<F>(open: F) -> Self
    where
        F: Fn() -> io::Result<ContentStream> + Send + Sync + 'static,
    {
        Self {
            open: Arc::new(open),
            source: None,
        }
    }

    /// Open a new stream over the content.
    ///
    /// # Errors
    /// Returns the I/O error raised while opening the underlying source.
    pub fn open(&self) -> io::Result<ContentStream> {
        (self.open)()
    }

    /// Open a new stream and read it to the end.
    ///
    /// # Errors
    /// Returns any I/O error raised while opening or reading.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut stream = self.open()?;
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// The backing file, for file-backed accessors.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether both accessors share the same opener.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.open, &other.open)
    }
}

impl fmt::Debug for ContentAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentAccessor")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
