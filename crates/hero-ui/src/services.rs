//! Request layer: HTTP client, re-auth gate and endpoint facades.

pub mod account;
pub mod catalog;
pub mod http;
pub mod reauth;
#[cfg(target_arch = "wasm32")]
pub mod transport;

use crate::core::auth::SessionStore;
use crate::core::config::UiConfig;
use crate::core::ui::{Navigator, Notifier, ReauthPrompt};
use account::AccountService;
use catalog::CatalogService;
use http::{HttpClient, Transport};
use reauth::{PendingCallerPolicy, ReauthGate};
use std::rc::Rc;

/// Collaborators shared by every controller, built once at the application root.
#[derive(Clone)]
pub struct Services {
    /// Resolved configuration.
    pub config: UiConfig,
    /// Session token store.
    pub session: Rc<dyn SessionStore>,
    /// Session-expired gate.
    pub gate: Rc<ReauthGate>,
    /// Token-aware HTTP client.
    pub http: Rc<HttpClient>,
    /// Hero endpoints.
    pub catalog: CatalogService,
    /// Login and registration endpoints.
    pub account: AccountService,
    /// Toast sink.
    pub notifier: Rc<dyn Notifier>,
    /// Page navigation.
    pub navigator: Rc<dyn Navigator>,
}

impl Services {
    /// Wire the request layer over the given browser (or test) collaborators.
    pub fn new(
        config: &UiConfig,
        transport: Rc<dyn Transport>,
        session: Rc<dyn SessionStore>,
        prompt: Rc<dyn ReauthPrompt>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self::with_policy(
            config,
            transport,
            session,
            prompt,
            navigator,
            notifier,
            PendingCallerPolicy::default(),
        )
    }

    /// Same as [`Services::new`] with an explicit pending-caller policy.
    #[allow(clippy::too_many_arguments)]
    pub fn with_policy(
        config: &UiConfig,
        transport: Rc<dyn Transport>,
        session: Rc<dyn SessionStore>,
        prompt: Rc<dyn ReauthPrompt>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        policy: PendingCallerPolicy,
    ) -> Self {
        let gate = Rc::new(
            ReauthGate::new(session.clone(), prompt, navigator.clone()).with_policy(policy),
        );
        let http = Rc::new(HttpClient::new(
            config.api_base_url.clone(),
            transport,
            session.clone(),
            gate.clone(),
            notifier.clone(),
        ));
        Self {
            config: config.clone(),
            session,
            gate,
            catalog: CatalogService::new(http.clone()),
            account: AccountService::new(http.clone()),
            http,
            notifier,
            navigator,
        }
    }
}
