use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub on_ok: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or(AttrValue::Static("确定"))]
    pub ok_label: AttrValue,
    #[prop_or(AttrValue::Static("取消"))]
    pub cancel_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub children: Children,
}

/// Centered dialog with OK/cancel actions. Clicking the backdrop does nothing.
#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_ok = {
        let on_ok = props.on_ok.clone();
        Callback::from(move |_| on_ok.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <div class="modal-title">{props.title.clone()}</div>
                <div class="modal-body">{for props.children.iter()}</div>
                <div class="modal-actions">
                    <button class="btn" onclick={on_cancel}>{props.cancel_label.clone()}</button>
                    <button class="btn primary" disabled={props.busy} onclick={on_ok}>
                        {props.ok_label.clone()}
                    </button>
                </div>
            </div>
        </div>
    }
}
