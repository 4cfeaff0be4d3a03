//! Application root: wiring, routing and the global overlays.

use crate::components::reauth_modal::ReauthModal;
use crate::components::toast::ToastHost;
use crate::core::config::UiConfig;
use crate::core::store::{AppStore, SliceHandle, toasts_slice};
use crate::core::telemetry::{LoggingConfig, init_logging};
use crate::features::heroes::view::HeroPage;
use crate::features::login::view::LoginPage;
use crate::services::Services;
use crate::services::transport::FetchTransport;
use preferences::LocalStorageSession;
use shell::{LocationNavigator, ModalPrompt, ToastNotifier};
use std::rc::Rc;
use telemetry::ConsoleWriter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
mod preferences;
mod routes;
pub(crate) mod shell;
mod telemetry;

pub(crate) use api::ApiCtx;
pub(crate) use routes::Route;

/// Boot the console into `<body>`.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = UiConfig::from_build_env();
    if let Err(err) = init_logging(&LoggingConfig::new(&config.log_level), ConsoleWriter) {
        gloo::console::warn!(format!("logging disabled: {err}"));
    }
    tracing::info!(api = %config.api_base_url, "hero console starting");
    yew::Renderer::<HeroApp>::with_props(HeroAppProps { config }).render();
}

fn build_context(config: &UiConfig) -> ApiCtx {
    let prompt = Rc::new(ModalPrompt::default());
    let services = Services::new(
        config,
        Rc::new(FetchTransport),
        Rc::new(LocalStorageSession::new(config.token_storage_key)),
        prompt.clone(),
        Rc::new(LocationNavigator),
        Rc::new(ToastNotifier),
    );
    ApiCtx::new(services, prompt)
}

#[derive(Properties, PartialEq)]
pub(crate) struct HeroAppProps {
    pub config: UiConfig,
}

#[function_component(HeroApp)]
pub(crate) fn hero_app(props: &HeroAppProps) -> Html {
    let ctx = {
        let config = props.config.clone();
        use_memo(move |_| build_context(&config), ())
    };
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let reauth_open = use_selector(|store: &AppStore| store.reauth.open);

    let on_dismiss = Callback::from(|id: u64| toasts_slice().update(|toasts| toasts.dismiss(id)));
    let on_reauth = {
        let prompt = ctx.prompt.clone();
        Callback::from(move |confirm: bool| prompt.resolve(confirm))
    };

    html! {
        <ContextProvider<ApiCtx> context={(*ctx).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
            <ReauthModal open={*reauth_open} on_answer={on_reauth} />
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Login => html! { <LoginPage /> },
        Route::Heroes => html! { <HeroPage /> },
        Route::NotFound => html! {
            <div class="not-found">
                <p>{"页面不存在"}</p>
                <Link<Route> to={Route::Login}>{"返回登录"}</Link<Route>>
            </div>
        },
    }
}
