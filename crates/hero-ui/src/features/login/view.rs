//! Login screen.

use crate::app::ApiCtx;
use crate::core::ui::FieldErrors;
use crate::features::login::flow::{LoginFlow, LoginOutcome};
use crate::features::login::state::{FIELD_PASSWORD, FIELD_USER_NAME, LoginForm, MAX_INPUT_LEN};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let ctx = use_context::<ApiCtx>();
    let form = use_state(LoginForm::default);
    let errors = use_state(FieldErrors::new);
    let busy = use_state(|| false);

    let on_user_name = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            form.set(LoginForm {
                user_name: value,
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            form.set(LoginForm {
                password: value,
                ..(*form).clone()
            });
        })
    };
    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(ctx) = ctx.as_ref() else {
                return;
            };
            if *busy {
                return;
            }
            let flow = LoginFlow::new(&ctx.services);
            let values = (*form).clone();
            let errors = errors.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match flow.submit(&values).await {
                    LoginOutcome::Invalid(found) => errors.set(found),
                    _ => errors.set(FieldErrors::new()),
                }
                busy.set(false);
            });
        })
    };
    let field_error = |field: &str| {
        errors
            .get(field)
            .map(|error| html! { <span class="field-error">{error.clone()}</span> })
    };
    let max_len = MAX_INPUT_LEN.to_string();

    html! {
        <div class="login-page">
            <form class="card login-card" onsubmit={on_submit}>
                <h1>{"欢迎回来"}</h1>
                <label>
                    {"用户名"}
                    <input
                        placeholder="请输入用户名"
                        autocomplete="username"
                        maxlength={max_len.clone()}
                        value={form.user_name.clone()}
                        oninput={on_user_name}
                    />
                    {for field_error(FIELD_USER_NAME)}
                </label>
                <label>
                    {"密码"}
                    <input
                        type="password"
                        placeholder="请输入密码"
                        autocomplete="current-password"
                        maxlength={max_len}
                        value={form.password.clone()}
                        oninput={on_password}
                    />
                    {for field_error(FIELD_PASSWORD)}
                </label>
                <button class="btn primary" type="submit" disabled={*busy}>
                    {if *busy { "登录中..." } else { "登录" }}
                </button>
            </form>
        </div>
    }
}
