//! Progress notification port
//!
//! Lets the presentation layer show activity while a request is in flight.

/// Callback for request progress
///
/// Implementations live in the presentation layer (spinner, silent, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called before a remote call is issued
    fn on_request_start(&self, label: &str);

    /// Called once the remote call has resolved
    fn on_request_complete(&self, label: &str, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _label: &str) {}
    fn on_request_complete(&self, _label: &str, _success: bool) {}
}
