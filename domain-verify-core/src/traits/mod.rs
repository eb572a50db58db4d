//! Injected collaborator traits

mod notifier;

pub use notifier::{LogNotifier, Notifier, NOTICE_TARGET};
