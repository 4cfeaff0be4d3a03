//! Pure hero screen rules: validation, list outcome policy and poster bookkeeping.
//!
//! # Design
//! - Every function here mutates plain state and never performs I/O.
//! - Behaviors that may change later (empty results, overlapping fetches) sit
//!   behind [`ListPolicy`] so call sites stay the same.
//! - `imgIds` is only ever built here, from the poster lists, when a request is assembled.

use crate::core::ui::FieldErrors;
use crate::features::heroes::state::{
    FormMode, HeroDraft, HeroFormState, HeroListState, SearchFilter, UploadItem, UploadStatus,
};
use crate::models::{HeroDetail, HeroPage, HeroUpsert};
use chrono::NaiveDate;

/// Maximum posters per hero, counting stored and in-flight images.
pub const MAX_POSTERS: usize = 3;
/// Shown once per file rejected by the poster limit.
pub const LIMIT_WARNING: &str = "超过上传数量限制！最多上传3个";
/// Shown when a poster upload completes.
pub const UPLOAD_SUCCESS: &str = "图片上传成功";

/// Form field keys, matching the wire names.
pub const FIELD_HERO_NAME: &str = "heroName";
/// Release date field.
pub const FIELD_DATE: &str = "date";
/// Tier field.
pub const FIELD_STRONG_LEVEL: &str = "strongLevel";
/// Lane field.
pub const FIELD_POSITION: &str = "position";
/// Poster list field.
pub const FIELD_POSTERS: &str = "heroImage";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `value` is a real calendar date written as `YYYY-MM-DD`.
#[must_use]
pub fn validate_date(value: &str) -> bool {
    let value = value.trim();
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Search form errors. Only a malformed date can fail.
#[must_use]
pub fn validate_filter(filter: &SearchFilter) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !filter.date.trim().is_empty() && !validate_date(&filter.date) {
        errors.insert(FIELD_DATE, "上线时间格式应为 YYYY-MM-DD".to_string());
    }
    errors
}

/// What an empty page (or a failed fetch) does to the pager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyResultPolicy {
    /// Clear rows, zero the total and jump back to page 1.
    #[default]
    ResetToFirstPage,
    /// Clear rows and zero the total but keep the page number.
    KeepPage,
}

/// Which completion wins when fetches overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Apply every completion in arrival order.
    #[default]
    LastResolvedWins,
    /// Drop completions older than the most recently issued fetch.
    LatestIssuedWins,
}

/// List outcome handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListPolicy {
    /// Empty page handling.
    pub empty: EmptyResultPolicy,
    /// Overlapping fetch handling.
    pub overlap: OverlapPolicy,
}

impl ListPolicy {
    /// Whether the completion of fetch `seq` should be applied.
    #[must_use]
    pub const fn accepts(self, issued: u64, seq: u64) -> bool {
        match self.overlap {
            OverlapPolicy::LastResolvedWins => true,
            OverlapPolicy::LatestIssuedWins => seq == issued,
        }
    }
}

/// Apply a fetch outcome; `None` means the fetch failed.
pub fn apply_resolution(state: &mut HeroListState, page: Option<HeroPage>, policy: ListPolicy) {
    match page {
        Some(page) if !page.data.is_empty() => {
            state.rows = page.data;
            state.pagination.total = page.total;
        }
        _ => {
            state.rows.clear();
            state.pagination.total = 0;
            if policy.empty == EmptyResultPolicy::ResetToFirstPage {
                state.pagination.current = 1;
            }
        }
    }
}

/// Start a fresh add session.
pub fn open_add(state: &mut HeroFormState) {
    reset(state);
    state.visible = true;
}

/// Start an edit session for a fetched record.
pub fn open_update(state: &mut HeroFormState, detail: HeroDetail) {
    reset(state);
    state.mode = FormMode::Update;
    state.draft = HeroDraft::from_detail(detail);
    state.visible = true;
}

/// Close the editor and discard the draft and uploads.
pub fn close(state: &mut HeroFormState) {
    reset(state);
}

fn reset(state: &mut HeroFormState) {
    state.session += 1;
    state.visible = false;
    state.mode = FormMode::Add;
    state.draft = HeroDraft::default();
    state.uploads.clear();
    state.errors.clear();
    state.saving = false;
}

/// Posters counted against [`MAX_POSTERS`]: stored images plus uploads that have not failed.
#[must_use]
pub fn poster_count(state: &HeroFormState) -> usize {
    let live_uploads = state
        .uploads
        .iter()
        .filter(|item| item.status != UploadStatus::Error)
        .count();
    state.draft.hero_image.len() + live_uploads
}

/// Admit picked files up to the poster limit.
///
/// The result lines up with `file_names`: `Some(local_id)` for an admitted
/// file, `None` for one rejected by the limit.
pub fn admit_files(state: &mut HeroFormState, file_names: &[String]) -> Vec<Option<u64>> {
    file_names
        .iter()
        .map(|name| {
            if poster_count(state) >= MAX_POSTERS {
                return None;
            }
            let local_id = state.next_upload_id;
            state.next_upload_id += 1;
            state.uploads.push(UploadItem {
                local_id,
                file_name: name.clone(),
                status: UploadStatus::Pending,
                response_image_id: None,
            });
            state.errors.remove(FIELD_POSTERS);
            Some(local_id)
        })
        .collect()
}

/// Record an upload outcome. Returns `false` when the editor session has moved on.
pub fn complete_upload(
    state: &mut HeroFormState,
    session: u64,
    local_id: u64,
    image_id: Option<String>,
) -> bool {
    if state.session != session {
        return false;
    }
    let Some(item) = state
        .uploads
        .iter_mut()
        .find(|item| item.local_id == local_id)
    else {
        return false;
    };
    item.status = if image_id.is_some() {
        UploadStatus::Done
    } else {
        UploadStatus::Error
    };
    item.response_image_id = image_id;
    true
}

/// Drop a stored poster from the draft. Only meaningful while updating.
pub fn remove_poster(state: &mut HeroFormState, img_id: &str) -> bool {
    if state.mode != FormMode::Update {
        return false;
    }
    let before = state.draft.hero_image.len();
    state
        .draft
        .hero_image
        .retain(|image| image.img_id != img_id);
    before != state.draft.hero_image.len()
}

/// Forget a picked file; its upload result, if any, is no longer used.
pub fn discard_upload(state: &mut HeroFormState, local_id: u64) -> bool {
    let before = state.uploads.len();
    state.uploads.retain(|item| item.local_id != local_id);
    before != state.uploads.len()
}

/// Stored poster ids followed by completed upload ids, with no empty segments.
#[must_use]
pub fn merged_img_ids(state: &HeroFormState) -> String {
    state
        .draft
        .hero_image
        .iter()
        .map(|image| image.img_id.as_str())
        .chain(
            state
                .uploads
                .iter()
                .filter(|item| item.status == UploadStatus::Done)
                .filter_map(|item| item.response_image_id.as_deref()),
        )
        .filter(|id| !id.trim().is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Validate the draft and build the create/update body.
///
/// # Errors
/// Returns one message per failing field.
pub fn validate_draft(state: &HeroFormState) -> Result<HeroUpsert, FieldErrors> {
    let draft = &state.draft;
    let mut errors = FieldErrors::new();
    let hero_name = draft.hero_name.trim();
    if hero_name.is_empty() {
        errors.insert(FIELD_HERO_NAME, "英雄名称必填！".to_string());
    }
    let date = draft.date.trim();
    if date.is_empty() {
        errors.insert(FIELD_DATE, "上线时间必填！".to_string());
    } else if !validate_date(date) {
        errors.insert(FIELD_DATE, "上线时间格式应为 YYYY-MM-DD".to_string());
    }
    if draft.strong_level.is_none() {
        errors.insert(FIELD_STRONG_LEVEL, "版本强度必填！".to_string());
    }
    if draft.position.is_none() {
        errors.insert(FIELD_POSITION, "英雄定位必填！".to_string());
    }
    let img_ids = merged_img_ids(state);
    if img_ids.is_empty() {
        errors.insert(FIELD_POSTERS, "英雄图片必填".to_string());
    }

    match (draft.strong_level, draft.position) {
        (Some(strong_level), Some(position)) if errors.is_empty() => Ok(HeroUpsert {
            hero_id: match state.mode {
                FormMode::Add => String::new(),
                FormMode::Update => draft.hero_id.clone(),
            },
            hero_name: hero_name.to_string(),
            date: date.to_string(),
            strong_level,
            position,
            img_ids,
        }),
        _ => Err(errors),
    }
}
