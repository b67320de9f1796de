//! Blocking user notifications.

/// Shows a message the user must acknowledge.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Writes alerts to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
