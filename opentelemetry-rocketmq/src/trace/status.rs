use opentelemetry::trace::Status;

/// Outcome reported by a message hook point, such as the end of a send or
/// of a consume callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MessageHookPointStatus {
    /// The outcome is not known.
    #[default]
    Unset,
    /// The operation completed successfully.
    Ok,
    /// The operation failed.
    Error,
}

/// Maps a hook point outcome to the status recorded on the span that traces it.
pub fn convert_to_trace_status(status: MessageHookPointStatus) -> Status {
    match status {
        MessageHookPointStatus::Ok => Status::Ok,
        MessageHookPointStatus::Error => Status::error(""),
        MessageHookPointStatus::Unset => Status::Unset,
    }
}

impl From<MessageHookPointStatus> for Status {
    fn from(status: MessageHookPointStatus) -> Self {
        convert_to_trace_status(status)
    }
}
