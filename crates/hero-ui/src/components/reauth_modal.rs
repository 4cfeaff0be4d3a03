use crate::components::modal::Modal;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ReauthModalProps {
    pub open: bool,
    /// `true` on confirm, `false` on cancel.
    pub on_answer: Callback<bool>,
}

#[function_component(ReauthModal)]
pub(crate) fn reauth_modal(props: &ReauthModalProps) -> Html {
    let on_ok = {
        let on_answer = props.on_answer.clone();
        Callback::from(move |()| on_answer.emit(true))
    };
    let on_cancel = {
        let on_answer = props.on_answer.clone();
        Callback::from(move |()| on_answer.emit(false))
    };

    html! {
        <Modal open={props.open} title="重新登录" on_ok={on_ok} on_cancel={on_cancel}>
            <div class="reauth-body">{"您当前的登录态已过期，请重新登录"}</div>
        </Modal>
    }
}
