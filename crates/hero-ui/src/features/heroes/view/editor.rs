//! Add/update modal.

use super::{StoreFormController, StoreListController};
use crate::components::modal::Modal;
use crate::core::config::UiConfig;
use crate::core::store::AppStore;
use crate::features::heroes::logic::{
    FIELD_DATE, FIELD_HERO_NAME, FIELD_POSITION, FIELD_POSTERS, FIELD_STRONG_LEVEL, MAX_POSTERS,
    poster_count,
};
use crate::features::heroes::state::{UploadItem, UploadStatus};
use crate::models::{HeroImage, Position, StrongLevel};
use crate::services::http::UploadFile;
use gloo::file::{File, FileList};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

/// Accepted poster file types.
const POSTER_ACCEPT: &str = ".jpg,.jpeg,.png";

#[derive(Properties)]
pub(crate) struct HeroEditorProps {
    pub form: StoreFormController,
    pub list: StoreListController,
    pub config: UiConfig,
}

impl PartialEq for HeroEditorProps {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

#[function_component(HeroEditor)]
pub(crate) fn hero_editor(props: &HeroEditorProps) -> Html {
    let state = use_selector(|store: &AppStore| store.editor.clone());
    let form = props.form.clone();

    let on_ok = {
        let form = form.clone();
        let list = props.list.clone();
        Callback::from(move |()| {
            let form = form.clone();
            let list = list.clone();
            spawn_local(async move {
                form.save(&list).await;
            });
        })
    };
    let on_cancel = {
        let form = form.clone();
        Callback::from(move |()| form.cancel())
    };
    let on_name = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            form.edit(|draft| draft.hero_name = value);
        })
    };
    let on_date = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            form.edit(|draft| draft.date = value);
        })
    };
    let on_level = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            form.edit(|draft| draft.strong_level = StrongLevel::parse(&value));
        })
    };
    let on_files = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let input = event.target_unchecked_into::<HtmlInputElement>();
            let Some(files) = input.files() else {
                return;
            };
            let picked: Vec<File> = FileList::from(files).iter().cloned().collect();
            input.set_value("");
            let form = form.clone();
            spawn_local(async move {
                form.select_files(read_files(picked).await).await;
            });
        })
    };

    let draft = &state.draft;
    let mode = state.mode;
    let field_error = |field: &str| {
        state
            .errors
            .get(field)
            .map(|error| html! { <span class="field-error">{error.clone()}</span> })
    };

    html! {
        <Modal
            open={state.visible}
            title={format!("{}英雄", mode.label())}
            ok_label={mode.label()}
            busy={state.saving}
            on_ok={on_ok}
            on_cancel={on_cancel}
        >
            <div class="hero-form">
                <label>
                    {"英雄名称"}
                    <input placeholder="请输入英雄名称" value={draft.hero_name.clone()} oninput={on_name} />
                    {for field_error(FIELD_HERO_NAME)}
                </label>
                <label>
                    {"上线时间"}
                    <input type="date" value={draft.date.clone()} onchange={on_date} />
                    {for field_error(FIELD_DATE)}
                </label>
                <label>
                    {"版本强度"}
                    <select onchange={on_level}>
                        <option value="" selected={draft.strong_level.is_none()}>{"请选择版本强度"}</option>
                        {for StrongLevel::all().iter().map(|level| html! {
                            <option value={level.as_str()} selected={draft.strong_level == Some(*level)}>
                                {level.as_str()}
                            </option>
                        })}
                    </select>
                    {for field_error(FIELD_STRONG_LEVEL)}
                </label>
                <fieldset class="position-group">
                    <legend>{"英雄定位"}</legend>
                    {for Position::all().iter().map(|position| {
                        let form = form.clone();
                        let position = *position;
                        let onchange = Callback::from(move |_: Event| {
                            form.edit(|draft| draft.position = Some(position));
                        });
                        html! {
                            <label class="radio">
                                <input
                                    type="radio"
                                    name="hero-position"
                                    value={position.code()}
                                    checked={draft.position == Some(position)}
                                    {onchange}
                                />
                                {position.label()}
                            </label>
                        }
                    })}
                    {for field_error(FIELD_POSITION)}
                </fieldset>
                <div class="posters">
                    <span>{"英雄图片"}</span>
                    <ul class="poster-list">
                        {for draft.hero_image.iter().map(|image| stored_poster(&form, image, &props.config))}
                        {for state.uploads.iter().map(|item| upload_row(&form, item))}
                    </ul>
                    if poster_count(&state) < MAX_POSTERS {
                        <input type="file" accept={POSTER_ACCEPT} multiple=true onchange={on_files} />
                    }
                    {for field_error(FIELD_POSTERS)}
                </div>
            </div>
        </Modal>
    }
}

fn stored_poster(form: &StoreFormController, image: &HeroImage, config: &UiConfig) -> Html {
    let on_remove = {
        let form = form.clone();
        let img_id = image.img_id.clone();
        Callback::from(move |_| {
            form.remove_poster(&img_id);
        })
    };
    html! {
        <li key={image.img_id.clone()} class="poster">
            <img src={config.poster_url(&image.img_name)} alt={image.img_name.clone()} />
            <button class="btn danger" type="button" onclick={on_remove}>{"删除"}</button>
        </li>
    }
}

fn upload_row(form: &StoreFormController, item: &UploadItem) -> Html {
    let on_discard = {
        let form = form.clone();
        let local_id = item.local_id;
        Callback::from(move |_| {
            form.discard_upload(local_id);
        })
    };
    let status = match item.status {
        UploadStatus::Pending => "上传中",
        UploadStatus::Done => "已上传",
        UploadStatus::Error => "上传失败",
    };
    html! {
        <li key={format!("upload-{}", item.local_id)} class={classes!("upload", upload_class(item.status))}>
            <span>{item.file_name.clone()}</span>
            <span class="status">{status}</span>
            <button class="btn ghost" type="button" onclick={on_discard}>{"移除"}</button>
        </li>
    }
}

const fn upload_class(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Pending => "pending",
        UploadStatus::Done => "done",
        UploadStatus::Error => "error",
    }
}

/// Read picked files into memory. Unreadable files are logged and skipped.
async fn read_files(files: Vec<File>) -> Vec<UploadFile> {
    let mut out = Vec::with_capacity(files.len());
    for file in files {
        match gloo::file::futures::read_as_bytes(&file).await {
            Ok(bytes) => {
                let mime = file.raw_mime_type();
                out.push(UploadFile {
                    name: file.name(),
                    mime: (!mime.is_empty()).then_some(mime),
                    bytes,
                });
            }
            Err(err) => tracing::warn!(file = %file.name(), error = %err, "poster read failed"),
        }
    }
    out
}
