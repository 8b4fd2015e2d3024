//! Device trait for log output destinations

/// Capability interface the logger writes through.
///
/// `write` takes `&self`: implementations must not serialize callers, and
/// must never propagate a failure. They report it out of band and return
/// `false` instead.
pub trait LogDevice: Send + Sync {
    /// Append one formatted line; `true` if it reached the destination
    fn write(&self, line: &str) -> bool;

    /// Release the destination. Must be safe to call more than once.
    fn close(&mut self);

    fn name(&self) -> &str;
}
