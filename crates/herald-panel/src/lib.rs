//! Notification panel: a composer that owns one draft, and a dispatcher that
//! gets notifications recorded in a store and optionally shown natively.
//!
//! - `draft`: the form state as an immutable value with a per-field reducer
//! - `composer`: validation, submission, double-submit guard, phase tracking
//! - `dispatcher`: quick-push templates, permission gate, persistence, events
//! - `notifier` / `store`: the two external collaborators as traits

pub mod composer;
pub mod config;
pub mod dispatcher;
pub mod draft;
pub mod error;
pub mod notifier;
pub mod store;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use composer::Composer;
pub use config::{NativeMode, PanelConfig};
pub use dispatcher::{Dispatcher, Phase, PhaseObserver};
pub use draft::{DraftField, DraftUpdate, NotificationDraft};
pub use error::PanelError;
pub use notifier::{DesktopNotifier, NativeNotifier, Permission, PolicyNotifier, SilentNotifier};
pub use store::{NotificationStore, SqliteStore};
