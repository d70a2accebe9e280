/// Correlation id tying later status updates to the same visual slot,
/// so "loading" can later turn into "success" or "error" in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

/// Status of one tracked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Observational status sink. The flow reports progress here; nothing is
/// read back and failures to display are not this component's problem.
pub trait Notifier {
    fn notify(&self, id: NotificationId, status: Status, message: &str);
}

/// Notifier that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, id: NotificationId, status: Status, message: &str) {
        match status {
            Status::Error => {
                tracing::error!(notification = id.0, status = status.as_str(), "{message}")
            }
            _ => tracing::info!(notification = id.0, status = status.as_str(), "{message}"),
        }
    }
}
