//! Login-or-register flow and logout.

use crate::core::auth::SessionStore;
use crate::core::ui::{FieldErrors, Navigator, Notifier, View};
use crate::features::login::state::LoginForm;
use crate::models::Credentials;
use crate::services::Services;
use crate::services::account::AccountService;
use std::rc::Rc;

/// Shown before an unknown user is registered automatically.
pub const AUTO_REGISTER_NOTICE: &str = "用户不存在，正在为你自动注册...";
/// Shown after a registration-then-login succeeds.
pub const LOGIN_SUCCESS: &str = "登录成功！";

/// Result of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The form failed validation; nothing was sent.
    Invalid(FieldErrors),
    /// Existing account, signed in.
    LoggedIn,
    /// New account registered and signed in.
    Registered,
    /// Registration or the follow-up login failed.
    Failed,
}

/// Drives login, automatic registration and logout.
#[derive(Clone)]
pub struct LoginFlow {
    account: AccountService,
    session: Rc<dyn SessionStore>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl LoginFlow {
    /// Flow over the shared services.
    #[must_use]
    pub fn new(services: &Services) -> Self {
        Self {
            account: services.account.clone(),
            session: services.session.clone(),
            navigator: services.navigator.clone(),
            notifier: services.notifier.clone(),
        }
    }

    /// Sign in, registering the account first when the backend does not know it.
    pub async fn submit(&self, form: &LoginForm) -> LoginOutcome {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return LoginOutcome::Invalid(errors),
        };

        if let Ok(result) = self.account.login(&credentials).await {
            self.signed_in(&result.token);
            return LoginOutcome::LoggedIn;
        }

        self.notifier.info(AUTO_REGISTER_NOTICE);
        if self.register_and_login(&credentials).await {
            LoginOutcome::Registered
        } else {
            LoginOutcome::Failed
        }
    }

    /// Forget the session and return to the login view.
    pub fn logout(&self) {
        self.session.clear();
        self.navigator.go_to(View::Login);
        tracing::debug!("signed out");
    }

    async fn register_and_login(&self, credentials: &Credentials) -> bool {
        if let Err(err) = self.account.register(credentials).await {
            tracing::debug!(user = %credentials.user_name, error = %err, "registration failed");
            return false;
        }
        match self.account.login(credentials).await {
            Ok(result) => {
                self.notifier.success(LOGIN_SUCCESS);
                self.signed_in(&result.token);
                true
            }
            Err(err) => {
                tracing::debug!(user = %credentials.user_name, error = %err, "login after registration failed");
                false
            }
        }
    }

    fn signed_in(&self, token: &str) {
        self.session.store_token(token);
        self.navigator.go_to(View::Heroes);
        tracing::debug!("signed in");
    }
}
