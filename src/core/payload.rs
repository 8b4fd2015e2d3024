//! Event payload: the message or error plus merged key/value fields

use super::field::FieldValue;
use super::log_context::LogContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Payload key holding a plain message
pub const MSG_KEY: &str = "msg";

/// Payload key holding an error value
pub const ERR_KEY: &str = "err";

/// Snapshot of an error taken at emit time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    /// Short type name, e.g. `Error` for `std::io::Error`
    pub class: String,
    pub message: String,
    /// Display text of each error in the `source()` chain, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorValue {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Capture the type name, message and source chain of `err`
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            class: short_type_name(std::any::type_name::<E>()).to_string(),
            message: err.to_string(),
            causes,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)?;
        if !self.causes.is_empty() {
            write!(f, " (caused by: {})", self.causes.join("; "))?;
        }
        Ok(())
    }
}

/// `my_crate::io::ParseError<T>` -> `ParseError`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).trim_start_matches("dyn ")
}

/// What an event is about: a plain value or an error
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Value(FieldValue),
    Error(ErrorValue),
}

impl Message {
    /// Wrap any `std::error::Error` so it lands under the `err` key
    pub fn error<E: Error + ?Sized>(err: &E) -> Self {
        Message::Error(ErrorValue::from_error(err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Message::Error(_))
    }

    /// The payload key this message is stored under
    pub fn key(&self) -> &'static str {
        match self {
            Message::Value(_) => MSG_KEY,
            Message::Error(_) => ERR_KEY,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Value(value) => write!(f, "{}", value),
            Message::Error(err) => write!(f, "{}", err),
        }
    }
}

impl From<FieldValue> for Message {
    fn from(value: FieldValue) -> Self {
        Message::Value(value)
    }
}

macro_rules! message_from_value {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Message {
                fn from(value: $ty) -> Self {
                    Message::Value(FieldValue::from(value))
                }
            }
        )+
    };
}

message_from_value!(String, &str, i64, i32, u32, f64, bool);

impl From<std::io::Error> for Message {
    fn from(err: std::io::Error) -> Self {
        Message::error(&err)
    }
}

impl From<ErrorValue> for Message {
    fn from(err: ErrorValue) -> Self {
        Message::Error(err)
    }
}

/// Key/value mapping attached to one event
///
/// Always holds exactly one of `msg` or `err`; the reserved keys never
/// appear among the extra fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    message: Message,
    fields: BTreeMap<String, FieldValue>,
}

impl Payload {
    /// Merge `base` fields, then `extra`, then apply `message`.
    ///
    /// Later layers win on key collisions. Caller-supplied `msg`/`err`
    /// keys are dropped in favour of the actual message.
    pub fn build(
        message: Message,
        base: Option<&BTreeMap<String, FieldValue>>,
        extra: Option<&LogContext>,
    ) -> Self {
        let mut fields = base.cloned().unwrap_or_default();
        if let Some(extra) = extra {
            for (key, value) in extra.fields() {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields.remove(MSG_KEY);
        fields.remove(ERR_KEY);

        Self { message, fields }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn msg(&self) -> Option<&FieldValue> {
        match &self.message {
            Message::Value(value) => Some(value),
            Message::Error(_) => None,
        }
    }

    pub fn err(&self) -> Option<&ErrorValue> {
        match &self.message {
            Message::Error(err) => Some(err),
            Message::Value(_) => None,
        }
    }

    /// Extra fields, excluding `msg`/`err`
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match key {
            MSG_KEY => self.msg().is_some(),
            ERR_KEY => self.err().is_some(),
            _ => self.fields.contains_key(key),
        }
    }

    /// Number of keys including `msg`/`err`
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct SomeException(&'static str);

    impl fmt::Display for SomeException {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Error for SomeException {}

    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("config load failed")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_value_captures_class_and_message() {
        let err = ErrorValue::from_error(&SomeException("boom"));
        assert_eq!(err.class, "SomeException");
        assert_eq!(err.message, "boom");
        assert!(err.causes.is_empty());
        assert_eq!(err.to_string(), "SomeException: boom");
    }

    #[test]
    fn test_error_value_walks_source_chain() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = ErrorValue::from_error(&Wrapper(inner));
        assert_eq!(err.causes, vec!["no such file".to_string()]);
        assert_eq!(
            err.to_string(),
            "Wrapper: config load failed (caused by: no such file)"
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("a::b::Parse<c::D>"), "Parse");
        assert_eq!(short_type_name("dyn core::error::Error"), "Error");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_plain_message_goes_under_msg() {
        let payload = Payload::build("hello".into(), None, None);
        assert_eq!(payload.msg(), Some(&FieldValue::from("hello")));
        assert!(payload.err().is_none());
        assert!(payload.contains_key(MSG_KEY));
        assert!(!payload.contains_key(ERR_KEY));
    }

    #[test]
    fn test_error_message_goes_under_err() {
        let payload = Payload::build(Message::error(&SomeException("boom")), None, None);
        assert!(payload.msg().is_none());
        assert_eq!(payload.err().map(|e| e.message.as_str()), Some("boom"));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_reserved_keys_superseded() {
        let extra = LogContext::new()
            .with_field("msg", "spoofed")
            .with_field("err", "also spoofed")
            .with_field("req_id", 42);
        let payload = Payload::build("real".into(), None, Some(&extra));

        assert_eq!(payload.msg(), Some(&FieldValue::from("real")));
        assert_eq!(payload.get("req_id"), Some(&FieldValue::Int(42)));
        assert!(payload.get("msg").is_none());
        assert!(payload.get("err").is_none());
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn test_extra_overrides_base() {
        let mut base = BTreeMap::new();
        base.insert("service".to_string(), FieldValue::from("api"));
        base.insert("env".to_string(), FieldValue::from("prod"));
        let extra = LogContext::new().with_field("env", "staging");

        let payload = Payload::build("x".into(), Some(&base), Some(&extra));
        assert_eq!(payload.get("service"), Some(&FieldValue::from("api")));
        assert_eq!(payload.get("env"), Some(&FieldValue::from("staging")));
    }
}
