//! Append-only device without locking or rotation

use super::destination::Destination;
use super::sink::Sink;
use crate::core::{banner_timestamp, sanitize, FallbackReporter, LogDevice, LoggerError, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Owns one sink for its whole life and writes to it without a lock.
///
/// Concurrent writers may interleave bytes; callers that need atomic lines
/// across threads must serialize externally. Every line goes straight to
/// the sink followed by a flush, so nothing is held back in a buffer.
///
/// # Examples
///
/// ```no_run
/// use lockless_logger::devices::LocklessLogDevice;
/// use lockless_logger::LogDevice;
///
/// let mut device = LocklessLogDevice::open("/var/log/app.log")?;
/// device.write("hello\n");
/// device.close();
/// # Ok::<(), lockless_logger::LoggerError>(())
/// ```
pub struct LocklessLogDevice {
    sink: Option<Box<dyn Sink>>,
    path: Option<PathBuf>,
    fallback: FallbackReporter,
}

impl LocklessLogDevice {
    /// Resolve `destination` into a device.
    ///
    /// Fails for [`Destination::None`], an empty path, a directory, or a
    /// file that cannot be opened or created.
    pub fn open(destination: impl Into<Destination>) -> Result<Self> {
        match destination.into() {
            Destination::None => Err(LoggerError::config(
                "LocklessLogDevice",
                "no destination given",
            )),
            Destination::Stream(sink) => Ok(Self::from_sink(sink)),
            Destination::Path(path) => {
                let file = open_logfile(&path)?;
                Ok(Self {
                    sink: Some(Box::new(file)),
                    path: Some(path),
                    fallback: FallbackReporter::default(),
                })
            }
        }
    }

    /// Adopt an already-open stream
    pub fn from_sink(sink: Box<dyn Sink>) -> Self {
        Self {
            sink: Some(sink),
            path: None,
            fallback: FallbackReporter::default(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackReporter) -> Self {
        self.fallback = fallback;
        self
    }

    /// Path of a file-backed device; `None` for adopted streams
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }
}

impl LogDevice for LocklessLogDevice {
    fn write(&self, line: &str) -> bool {
        let Some(sink) = self.sink.as_ref() else {
            self.fallback.report(&LoggerError::DeviceClosed);
            return false;
        };

        match sink.write_all(line.as_bytes()).and_then(|()| sink.flush()) {
            Ok(()) => true,
            Err(e) => {
                self.fallback.report(&LoggerError::write_failure(sink.name(), e));
                false
            }
        }
    }

    fn close(&mut self) {
        if let Some(sink) = self.sink.take() {
            // Best-effort cleanup
            let _ = sink.close();
        }
    }

    fn name(&self) -> &str {
        self.sink.as_ref().map_or("closed", |sink| sink.name())
    }
}

impl fmt::Debug for LocklessLogDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocklessLogDevice")
            .field("sink", &self.name())
            .field("path", &self.path)
            .finish()
    }
}

impl Drop for LocklessLogDevice {
    fn drop(&mut self) {
        self.close();
    }
}

/// Name of the running program, as shown in the header banner
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn open_logfile(path: &Path) -> Result<File> {
    if path.as_os_str().is_empty() {
        return Err(LoggerError::config("LocklessLogDevice", "log path is empty"));
    }
    if path.is_dir() {
        return Err(LoggerError::config(
            "LocklessLogDevice",
            format!("'{}' is a directory", path.display()),
        ));
    }

    // create_new makes "exists" and "create" a single atomic decision
    match OpenOptions::new().append(true).create_new(true).open(path) {
        Ok(mut file) => {
            add_log_header(&mut file).map_err(|e| {
                LoggerError::io_operation(
                    "writing log header",
                    path.display().to_string(),
                    e,
                )
            })?;
            Ok(file)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            }),
        Err(e) => Err(LoggerError::io_operation(
            "creating log file",
            path.display().to_string(),
            e,
        )),
    }
}

fn add_log_header(file: &mut File) -> io::Result<()> {
    let header = format!(
        "# Logfile created on {} by {}\n",
        banner_timestamp(),
        sanitize(&program_name())
    );
    Write::write_all(file, header.as_bytes())
}
