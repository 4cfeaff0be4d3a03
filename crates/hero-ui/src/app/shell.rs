//! Browser implementations of the UI seams used by the request layer.

use crate::core::store::{SliceHandle, reauth_slice, toasts_slice};
use crate::core::ui::{Navigator, Notifier, ReauthPrompt, View};
use crate::models::ToastKind;
use async_trait::async_trait;
use futures::channel::oneshot;
use gloo::utils::window;
use std::cell::RefCell;

/// Pushes toasts into the global store.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, kind: ToastKind, message: String) {
        toasts_slice().update(|toasts| toasts.push(kind, message));
    }
}

/// Full-page navigation through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocationNavigator;

impl LocationNavigator {
    pub(crate) const fn path(view: View) -> &'static str {
        match view {
            View::Login => "/login",
            View::Heroes => "/hero",
        }
    }
}

impl Navigator for LocationNavigator {
    fn go_to(&self, view: View) {
        let path = Self::path(view);
        if let Err(err) = window().location().set_href(path) {
            tracing::warn!(path, error = ?err, "navigation failed");
        }
    }

    fn reload(&self) {
        if let Err(err) = window().location().reload() {
            tracing::warn!(error = ?err, "reload failed");
        }
    }
}

/// Session-expired prompt rendered by `ReauthModal`; resolves when the user picks a button.
#[derive(Default)]
pub(crate) struct ModalPrompt {
    pending: RefCell<Option<oneshot::Sender<bool>>>,
}

impl ModalPrompt {
    /// Answer the open prompt and hide the modal.
    pub(crate) fn resolve(&self, confirm: bool) {
        reauth_slice().update(|reauth| reauth.open = false);
        if let Some(sender) = self.pending.borrow_mut().take() {
            let _ = sender.send(confirm);
        }
    }
}

#[async_trait(?Send)]
impl ReauthPrompt for ModalPrompt {
    async fn confirm_relogin(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().replace(tx);
        reauth_slice().update(|reauth| reauth.open = true);
        rx.await.unwrap_or(false)
    }
}
