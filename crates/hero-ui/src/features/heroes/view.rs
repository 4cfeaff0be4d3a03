//! Hero management screen.

mod editor;

use crate::app::ApiCtx;
use crate::components::modal::Modal;
use crate::components::pagination::Pager;
use crate::core::store::{AppStore, StoreSlice, editor_slice, heroes_slice};
use crate::features::heroes::actions::{DELETE_CONFIRM_BODY, DELETE_CONFIRM_TITLE, HeroAction};
use crate::features::heroes::form::HeroFormController;
use crate::features::heroes::list::HeroListController;
use crate::features::heroes::logic::FIELD_DATE;
use crate::features::heroes::state::{HeroFormState, HeroListState, SearchFilter};
use crate::features::login::flow::LoginFlow;
use crate::models::{HeroSummary, Position, StrongLevel};
use editor::HeroEditor;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) type StoreListController = HeroListController<StoreSlice<HeroListState>>;
pub(crate) type StoreFormController = HeroFormController<StoreSlice<HeroFormState>>;

fn controllers(ctx: &ApiCtx) -> (StoreListController, StoreFormController) {
    let services = &ctx.services;
    (
        HeroListController::new(services.catalog.clone(), heroes_slice()),
        HeroFormController::new(
            services.catalog.clone(),
            services.notifier.clone(),
            editor_slice(),
        ),
    )
}

#[function_component(HeroPage)]
pub(crate) fn hero_page() -> Html {
    match use_context::<ApiCtx>() {
        Some(ctx) => html! { <HeroScreen ctx={ctx} /> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct HeroScreenProps {
    ctx: ApiCtx,
}

#[function_component(HeroScreen)]
fn hero_screen(props: &HeroScreenProps) -> Html {
    let ctx = &props.ctx;
    let (list, form) = controllers(ctx);
    let state = use_selector(|store: &AppStore| store.heroes.clone());
    let pending_delete = use_state(|| None::<String>);

    {
        let list = list.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    list.refresh().await;
                });
                || ()
            },
            (),
        );
    }

    let on_action = {
        let form = form.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |action: HeroAction| match action {
            HeroAction::Edit { hero_id, img_ids } => {
                let form = form.clone();
                spawn_local(async move {
                    form.open_update(&hero_id, &img_ids).await;
                });
            }
            HeroAction::Delete { hero_name } => pending_delete.set(Some(hero_name)),
        })
    };
    let on_confirm_delete = {
        let list = list.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |()| {
            if let Some(hero_name) = (*pending_delete).clone() {
                let list = list.clone();
                spawn_local(async move {
                    list.delete(&hero_name).await;
                });
            }
            pending_delete.set(None);
        })
    };
    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |()| pending_delete.set(None))
    };
    let on_add = {
        let form = form.clone();
        Callback::from(move |_| form.open_add())
    };
    let on_logout = {
        let flow = LoginFlow::new(&ctx.services);
        Callback::from(move |_| flow.logout())
    };
    let on_page = {
        let list = list.clone();
        Callback::from(move |page: u32| {
            let list = list.clone();
            spawn_local(async move {
                list.change_page(page).await;
            });
        })
    };
    let on_page_size = {
        let list = list.clone();
        Callback::from(move |size: u32| {
            let list = list.clone();
            spawn_local(async move {
                list.change_page_size(size).await;
            });
        })
    };

    html! {
        <div class="hero-page card">
            <div class="card-title">
                <span>{"数据面板"}</span>
                <button class="btn ghost" onclick={on_logout}>{"退出登录"}</button>
            </div>
            <SearchBar
                filter={state.filter.clone()}
                date_error={state.filter_errors.get(FIELD_DATE).cloned()}
                list={list.clone()}
            />
            <div class="toolbar">
                <button class="btn primary" onclick={on_add}>{"新增"}</button>
            </div>
            <HeroTable rows={state.rows.clone()} loading={state.loading} on_action={on_action} />
            <Pager pagination={state.pagination} on_page={on_page} on_page_size={on_page_size} />
            <HeroEditor form={form} list={list} config={ctx.services.config.clone()} />
            <Modal
                open={pending_delete.is_some()}
                title={DELETE_CONFIRM_TITLE}
                on_ok={on_confirm_delete}
                on_cancel={on_cancel_delete}
            >
                {DELETE_CONFIRM_BODY}
            </Modal>
        </div>
    }
}

#[derive(Properties)]
struct SearchBarProps {
    filter: SearchFilter,
    date_error: Option<String>,
    list: StoreListController,
}

impl PartialEq for SearchBarProps {
    fn eq(&self, other: &Self) -> bool {
        self.filter == other.filter && self.date_error == other.date_error
    }
}

#[function_component(SearchBar)]
fn search_bar(props: &SearchBarProps) -> Html {
    let list = props.list.clone();
    let on_name = {
        let list = list.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            list.update_filter(|filter| filter.hero_name = value);
        })
    };
    let on_date = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            list.update_filter(|filter| filter.date = value);
        })
    };
    let on_level = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            list.update_filter(|filter| filter.strong_level = StrongLevel::parse(&value));
        })
    };
    let on_position = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            list.update_filter(|filter| filter.position = Position::from_code(&value));
        })
    };
    let on_search = {
        let list = list.clone();
        Callback::from(move |_| {
            let list = list.clone();
            spawn_local(async move {
                list.search().await;
            });
        })
    };
    let on_reset = Callback::from(move |_| list.reset_filter());
    let filter = &props.filter;

    html! {
        <form class="search-bar" onsubmit={Callback::from(|event: SubmitEvent| event.prevent_default())}>
            <label>
                {"英雄名称"}
                <input placeholder="请输入英雄名称" value={filter.hero_name.clone()} oninput={on_name} />
            </label>
            <label>
                {"上线时间"}
                <input type="date" value={filter.date.clone()} onchange={on_date} />
                {for props.date_error.iter().map(|error| html! { <span class="field-error">{error.clone()}</span> })}
            </label>
            <label>
                {"版本强度"}
                <select onchange={on_level}>
                    <option value="" selected={filter.strong_level.is_none()}>{"请选择版本强度"}</option>
                    {for StrongLevel::all().iter().map(|level| html! {
                        <option value={level.as_str()} selected={filter.strong_level == Some(*level)}>
                            {level.as_str()}
                        </option>
                    })}
                </select>
            </label>
            <label>
                {"英雄定位"}
                <select onchange={on_position}>
                    <option value="" selected={filter.position.is_none()}>{"全部"}</option>
                    {for Position::all().iter().map(|position| html! {
                        <option value={position.code()} selected={filter.position == Some(*position)}>
                            {position.label()}
                        </option>
                    })}
                </select>
            </label>
            <button class="btn primary" type="button" onclick={on_search}>{"查询"}</button>
            <button class="btn" type="button" onclick={on_reset}>{"重置"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct HeroTableProps {
    rows: Vec<HeroSummary>,
    loading: bool,
    on_action: Callback<HeroAction>,
}

#[function_component(HeroTable)]
fn hero_table(props: &HeroTableProps) -> Html {
    let render_row = |row: &HeroSummary| {
        let on_edit = {
            let on_action = props.on_action.clone();
            let action = HeroAction::Edit {
                hero_id: row.hero_id.clone(),
                img_ids: row.img_ids.clone(),
            };
            Callback::from(move |_| on_action.emit(action.clone()))
        };
        let on_delete = {
            let on_action = props.on_action.clone();
            let action = HeroAction::Delete {
                hero_name: row.hero_name.clone(),
            };
            Callback::from(move |_| on_action.emit(action.clone()))
        };
        html! {
            <tr key={row.hero_id.clone()}>
                <td>{row.hero_name.clone()}</td>
                <td>{row.date.clone()}</td>
                <td>{row.strong_level.as_str()}</td>
                <td>{row.position.label()}</td>
                <td class="actions">
                    <button class="btn primary" onclick={on_edit}>{"编辑"}</button>
                    <button class="btn danger" onclick={on_delete}>{"删除"}</button>
                </td>
            </tr>
        }
    };

    html! {
        <table class={classes!("hero-table", props.loading.then_some("loading"))}>
            <thead>
                <tr>
                    <th>{"英雄名称"}</th>
                    <th>{"上线时间"}</th>
                    <th>{"版本强度"}</th>
                    <th>{"英雄定位"}</th>
                    <th>{"操作"}</th>
                </tr>
            </thead>
            <tbody>
                if props.rows.is_empty() {
                    <tr><td colspan="5" class="empty">{"暂无数据"}</td></tr>
                } else {
                    {for props.rows.iter().map(render_row)}
                }
            </tbody>
        </table>
    }
}
