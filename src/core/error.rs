//! Error types for the logger system

use std::io;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The sink's peer went away (broken pipe, reset connection)
    #[error("Sink '{sink}' disconnected: {source}")]
    SinkDisconnected {
        sink: String,
        #[source]
        source: io::Error,
    },

    /// Write attempted after the device was closed
    #[error("Log device closed")]
    DeviceClosed,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Classify an I/O failure raised while writing to `sink`.
    ///
    /// Failures meaning the reader is gone are reported as
    /// [`LoggerError::SinkDisconnected`]; everything else keeps its
    /// operation context.
    pub fn write_failure(sink: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => LoggerError::SinkDisconnected {
                sink: sink.to_string(),
                source,
            },
            _ => LoggerError::IoOperation {
                operation: "writing log line".to_string(),
                message: format!("sink '{}' rejected the write", sink),
                source,
            },
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
