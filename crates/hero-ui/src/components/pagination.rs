use crate::features::heroes::state::{PAGE_SIZES, Pagination};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PagerProps {
    pub pagination: Pagination,
    pub on_page: Callback<u32>,
    pub on_page_size: Callback<u32>,
}

#[function_component(Pager)]
pub(crate) fn pager(props: &PagerProps) -> Html {
    let Pagination {
        current,
        page_size,
        total,
    } = props.pagination;
    let pages = props.pagination.page_count();

    let go = |page: u32| {
        let on_page = props.on_page.clone();
        Callback::from(move |_| on_page.emit(page))
    };
    let on_size = {
        let on_page_size = props.on_page_size.clone();
        Callback::from(move |event: Event| {
            let size = event
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<u32>().ok());
            if let Some(size) = size {
                on_page_size.emit(size);
            }
        })
    };

    html! {
        <div class="pager">
            <span class="pager-total">{format!("共 {total} 条")}</span>
            <button class="btn ghost" disabled={current <= 1} onclick={go(current.saturating_sub(1).max(1))}>
                {"‹"}
            </button>
            {for (1..=pages).map(|page| html! {
                <button
                    class={classes!("btn", "ghost", (page == current).then_some("active"))}
                    onclick={go(page)}
                >
                    {page}
                </button>
            })}
            <button class="btn ghost" disabled={current >= pages} onclick={go((current + 1).min(pages))}>
                {"›"}
            </button>
            <select class="pager-size" onchange={on_size}>
                {for PAGE_SIZES.iter().map(|size| html! {
                    <option value={size.to_string()} selected={*size == page_size}>
                        {format!("{size} 条/页")}
                    </option>
                })}
            </select>
        </div>
    }
}
