//! UI collaborators driven by the request layer and controllers.
//!
//! # Design
//! - Controllers never touch the DOM; they talk to these seams instead.
//! - Browser implementations live in `app::shell`; tests use recording doubles.

use crate::models::ToastKind;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Field-level validation messages keyed by wire field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Transient notification sink (toasts).
pub trait Notifier {
    /// Show a notification.
    fn notify(&self, kind: ToastKind, message: String);

    /// Show an informational notification.
    fn info(&self, message: &str) {
        self.notify(ToastKind::Info, message.to_string());
    }

    /// Show a success notification.
    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message.to_string());
    }

    /// Show a warning notification.
    fn warning(&self, message: &str) {
        self.notify(ToastKind::Warning, message.to_string());
    }

    /// Show an error notification.
    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message.to_string());
    }
}

/// Top-level views the console can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Login screen.
    Login,
    /// Hero management screen.
    Heroes,
}

/// Page-level navigation.
pub trait Navigator {
    /// Navigate to a top-level view.
    fn go_to(&self, view: View);
    /// Reload the application shell from scratch.
    fn reload(&self);
}

/// Modal asking the user to sign in again after the session expired.
#[async_trait(?Send)]
pub trait ReauthPrompt {
    /// Show the confirmation and resolve `true` on confirm, `false` on cancel.
    async fn confirm_relogin(&self) -> bool;
}
