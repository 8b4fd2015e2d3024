//! Where a logger writes

use super::sink::Sink;
use std::fmt;
use std::path::{Path, PathBuf};

/// A logger's destination, resolved once when the logger is built
#[derive(Default)]
pub enum Destination {
    /// No device: every emit is a no-op that still reports success
    #[default]
    None,
    /// An already-open stream, adopted as is
    Stream(Box<dyn Sink>),
    /// A file, created with a header banner if it does not exist yet
    Path(PathBuf),
}

impl Destination {
    pub fn stream(sink: impl Sink + 'static) -> Self {
        Destination::Stream(Box::new(sink))
    }

    pub fn stdout() -> Self {
        Self::stream(std::io::stdout())
    }

    pub fn stderr() -> Self {
        Self::stream(std::io::stderr())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Destination::None)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::None => f.write_str("None"),
            Destination::Stream(sink) => f.debug_tuple("Stream").field(&sink.name()).finish(),
            Destination::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

impl From<&str> for Destination {
    fn from(path: &str) -> Self {
        Destination::Path(PathBuf::from(path))
    }
}

impl From<String> for Destination {
    fn from(path: String) -> Self {
        Destination::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for Destination {
    fn from(path: PathBuf) -> Self {
        Destination::Path(path)
    }
}

impl From<&Path> for Destination {
    fn from(path: &Path) -> Self {
        Destination::Path(path.to_path_buf())
    }
}

impl<P: Into<Destination>> From<Option<P>> for Destination {
    fn from(value: Option<P>) -> Self {
        value.map(Into::into).unwrap_or(Destination::None)
    }
}
