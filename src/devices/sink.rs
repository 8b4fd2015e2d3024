//! Stream capability adopted by the lockless device
//!
//! Every method takes `&self`. The standard library's file and socket
//! handles implement `Write` for shared references, so writing through them
//! needs no lock on our side; stdout/stderr use their own internal lock.

use std::fs::File;
use std::io::{self, Stderr, Stdout, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;

pub trait Sink: Send + Sync {
    fn write_all(&self, buf: &[u8]) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn close(&self) -> io::Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}

impl Sink for File {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut file: &File = self;
        Write::write_all(&mut file, buf)
    }

    fn close(&self) -> io::Result<()> {
        self.sync_all()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Sink for Stdout {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.lock(), buf)
    }

    fn flush(&self) -> io::Result<()> {
        Write::flush(&mut self.lock())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

impl Sink for Stderr {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.lock(), buf)
    }

    fn flush(&self) -> io::Result<()> {
        Write::flush(&mut self.lock())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}

impl Sink for TcpStream {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut stream: &TcpStream = self;
        Write::write_all(&mut stream, buf)
    }

    fn close(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)
    }

    fn name(&self) -> &str {
        "tcp"
    }
}

#[cfg(unix)]
impl Sink for std::os::unix::net::UnixStream {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut stream: &std::os::unix::net::UnixStream = self;
        Write::write_all(&mut stream, buf)
    }

    fn close(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)
    }

    fn name(&self) -> &str {
        "unix"
    }
}

/// Lets callers keep a handle on a sink they hand to a logger
impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        (**self).write_all(buf)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }

    fn close(&self) -> io::Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        (**self).write_all(buf)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }

    fn close(&self) -> io::Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
