//! Session-expired gate.
//!
//! # Design
//! - At most one prompt is open at a time across the whole console.
//! - Callers arriving while the prompt is open follow [`PendingCallerPolicy`].
//! - Confirm sends the user to the login view; cancel clears the session and reloads.

use crate::core::auth::SessionStore;
use crate::core::ui::{Navigator, ReauthPrompt, View};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;

/// How callers that arrive while a prompt is already open are answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingCallerPolicy {
    /// Wait for the open prompt and share its outcome.
    #[default]
    Join,
    /// Answer `false` immediately.
    Decline,
}

#[derive(Debug, Default)]
enum GateState {
    #[default]
    Idle,
    PromptOpen {
        waiters: Vec<oneshot::Sender<bool>>,
    },
}

/// Singleton controller for the session-expired prompt.
pub struct ReauthGate {
    session: Rc<dyn SessionStore>,
    prompt: Rc<dyn ReauthPrompt>,
    navigator: Rc<dyn Navigator>,
    policy: PendingCallerPolicy,
    state: RefCell<GateState>,
}

impl ReauthGate {
    /// Gate with the default [`PendingCallerPolicy::Join`] policy.
    pub fn new(
        session: Rc<dyn SessionStore>,
        prompt: Rc<dyn ReauthPrompt>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            prompt,
            navigator,
            policy: PendingCallerPolicy::default(),
            state: RefCell::new(GateState::Idle),
        }
    }

    /// Replace the pending-caller policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PendingCallerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether the prompt is currently open.
    #[must_use]
    pub fn is_prompt_open(&self) -> bool {
        matches!(*self.state.borrow(), GateState::PromptOpen { .. })
    }

    /// Resolve `true` when the caller may proceed.
    ///
    /// Without `force` a stored token passes straight through. Otherwise the
    /// prompt decides, and only one prompt is shown no matter how many callers
    /// are waiting.
    pub async fn verify(&self, force: bool) -> bool {
        if !force && self.session.is_authenticated() {
            return true;
        }

        let waiter = {
            let mut state = self.state.borrow_mut();
            match &mut *state {
                GateState::PromptOpen { waiters } => match self.policy {
                    PendingCallerPolicy::Decline => return false,
                    PendingCallerPolicy::Join => {
                        let (tx, rx) = oneshot::channel();
                        waiters.push(tx);
                        Some(rx)
                    }
                },
                GateState::Idle => None,
            }
        };
        if let Some(rx) = waiter {
            return rx.await.unwrap_or(false);
        }

        *self.state.borrow_mut() = GateState::PromptOpen {
            waiters: Vec::new(),
        };
        tracing::debug!(force, "session expired prompt opened");
        let confirmed = self.prompt.confirm_relogin().await;
        if confirmed {
            if force {
                self.session.clear();
            }
            self.navigator.go_to(View::Login);
        } else {
            self.session.clear();
            self.navigator.reload();
        }

        let previous = std::mem::take(&mut *self.state.borrow_mut());
        if let GateState::PromptOpen { waiters } = previous {
            for waiter in waiters {
                let _ = waiter.send(confirmed);
            }
        }
        tracing::debug!(confirmed, "session expired prompt resolved");
        confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::MemorySession;
    use crate::testing::{RecordingNavigator, ScriptedPrompt};

    fn gate(
        token: Option<&str>,
        answer: bool,
        policy: PendingCallerPolicy,
    ) -> (
        ReauthGate,
        Rc<MemorySession>,
        Rc<ScriptedPrompt>,
        Rc<RecordingNavigator>,
    ) {
        let session = Rc::new(token.map_or_else(MemorySession::default, MemorySession::with_token));
        let prompt = Rc::new(ScriptedPrompt::yielding());
        prompt.answer(answer);
        let navigator = Rc::new(RecordingNavigator::default());
        let gate = ReauthGate::new(session.clone(), prompt.clone(), navigator.clone())
            .with_policy(policy);
        (gate, session, prompt, navigator)
    }

    #[tokio::test]
    async fn token_passes_without_prompt() {
        let (gate, _, prompt, _) = gate(Some("tok"), false, PendingCallerPolicy::Join);
        assert!(gate.verify(false).await);
        assert_eq!(prompt.shown(), 0);
        assert!(!gate.is_prompt_open());
    }

    #[tokio::test]
    async fn cancel_clears_session_and_reloads() {
        let (gate, session, prompt, navigator) = gate(Some("tok"), false, PendingCallerPolicy::Join);
        assert!(!gate.verify(true).await);
        assert_eq!(prompt.shown(), 1);
        assert!(session.token().is_none());
        assert_eq!(navigator.reloads(), 1);
        assert_eq!(navigator.logins(), 0);
        assert!(!gate.is_prompt_open());
    }

    #[tokio::test]
    async fn confirm_navigates_to_login() {
        let (gate, session, _, navigator) = gate(None, true, PendingCallerPolicy::Join);
        assert!(gate.verify(false).await);
        assert_eq!(navigator.logins(), 1);
        assert_eq!(navigator.reloads(), 0);
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_prompt() {
        let (gate, _, prompt, navigator) = gate(Some("stale"), true, PendingCallerPolicy::Join);
        let (first, second, third) =
            futures::join!(gate.verify(true), gate.verify(true), gate.verify(false));
        assert_eq!((first, second, third), (true, true, true));
        assert_eq!(prompt.shown(), 1);
        assert_eq!(navigator.logins(), 1);
        assert!(!gate.is_prompt_open());
    }

    #[tokio::test]
    async fn decline_policy_answers_waiters_immediately() {
        let (gate, _, prompt, _) = gate(None, true, PendingCallerPolicy::Decline);
        let (first, second) = futures::join!(gate.verify(false), gate.verify(false));
        assert!(first);
        assert!(!second);
        assert_eq!(prompt.shown(), 1);
    }

    #[tokio::test]
    async fn gate_reopens_after_resolution() {
        let (gate, _, prompt, _) = gate(None, false, PendingCallerPolicy::Join);
        assert!(!gate.verify(false).await);
        assert!(!gate.verify(false).await);
        assert_eq!(prompt.shown(), 2);
    }
}
