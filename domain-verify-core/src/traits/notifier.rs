//! User-facing progress and diagnosis output

/// `log` target used by [`LogNotifier`].
pub const NOTICE_TARGET: &str = "domain_verify::notice";

/// Receives the messages a run shows to the user.
///
/// Services never print directly; everything user-visible goes through this
/// trait so the front end decides how to render it and tests can assert on it.
pub trait Notifier: Send + Sync {
    /// Informational progress or guidance.
    fn notice(&self, message: &str);

    /// Something the user should act on.
    fn warning(&self, message: &str);
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        log::info!(target: NOTICE_TARGET, "{message}");
    }

    fn warning(&self, message: &str) {
        log::warn!(target: NOTICE_TARGET, "{message}");
    }
}
