/// Acknowledgement returned by successful deletions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAcknowledgement {
    /// Always `true` for a completed deletion.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl DeleteAcknowledgement {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
