/// Result returned by the group dispatch methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// A widget acted on the event.
    Consumed,
    /// No widget acted on the event.
    Ignored,
}
