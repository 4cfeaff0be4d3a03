//! Hero screen state: list, filter, pagination and the editor draft.

use crate::core::ui::FieldErrors;
use crate::models::{
    HeroDetail, HeroImage, HeroListQuery, HeroSummary, Position, StrongLevel, join_image_ids,
};

/// Page sizes offered by the pager.
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];
/// Page size used on first load.
pub const DEFAULT_PAGE_SIZE: u32 = PAGE_SIZES[0];

/// Search form values. Empty fields are left out of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Name fragment.
    pub hero_name: String,
    /// Release date, `YYYY-MM-DD`.
    pub date: String,
    /// Tier.
    pub strong_level: Option<StrongLevel>,
    /// Lane.
    pub position: Option<Position>,
}

impl SearchFilter {
    /// List request for the given page.
    #[must_use]
    pub fn to_query(&self, pagination: &Pagination) -> HeroListQuery {
        HeroListQuery {
            hero_name: non_blank(&self.hero_name),
            date: non_blank(&self.date),
            strong_level: self.strong_level,
            position: self.position,
            page_num: pagination.current,
            page_size: pagination.page_size,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Pager position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page number.
    pub current: u32,
    /// Rows per page, one of [`PAGE_SIZES`].
    pub page_size: u32,
    /// Total matching rows reported by the backend.
    pub total: u64,
}

impl Pagination {
    /// Number of pages for the current total, never less than one.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size))
            .unwrap_or(u32::MAX)
            .max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

/// List slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeroListState {
    /// Current search form values.
    pub filter: SearchFilter,
    /// Pager position.
    pub pagination: Pagination,
    /// Rows on the current page.
    pub rows: Vec<HeroSummary>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Sequence number of the most recently issued fetch.
    pub issued: u64,
    /// Search form validation messages.
    pub filter_errors: FieldErrors,
}

/// Whether the editor creates or updates a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    /// New record.
    #[default]
    Add,
    /// Existing record.
    Update,
}

impl FormMode {
    /// Verb shown in the modal title and button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "新增",
            Self::Update => "更新",
        }
    }
}

/// Editable copy of a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeroDraft {
    /// Empty for new records.
    pub hero_id: String,
    /// Display name.
    pub hero_name: String,
    /// Release date, `YYYY-MM-DD`.
    pub date: String,
    /// Tier.
    pub strong_level: Option<StrongLevel>,
    /// Lane.
    pub position: Option<Position>,
    /// Posters already stored on the server.
    pub hero_image: Vec<HeroImage>,
}

impl HeroDraft {
    /// Draft populated from a fetched record.
    #[must_use]
    pub fn from_detail(detail: HeroDetail) -> Self {
        Self {
            hero_id: detail.hero_id,
            hero_name: detail.hero_name,
            date: detail.date,
            strong_level: Some(detail.strong_level),
            position: Some(detail.position),
            hero_image: detail.hero_image,
        }
    }

    /// Persisted poster ids, comma-joined in display order.
    #[must_use]
    pub fn img_ids(&self) -> String {
        join_image_ids(&self.hero_image)
    }
}

/// Upload lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    /// Sent, no answer yet.
    Pending,
    /// Stored; the image id is known.
    Done,
    /// Rejected or failed in transit.
    Error,
}

/// One file picked in the current editor session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadItem {
    /// Identifier local to the editor session.
    pub local_id: u64,
    /// Original file name.
    pub file_name: String,
    /// Upload progress.
    pub status: UploadStatus,
    /// Stored image id once done.
    pub response_image_id: Option<String>,
}

/// Editor slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeroFormState {
    /// Modal visibility.
    pub visible: bool,
    /// Add or update.
    pub mode: FormMode,
    /// Field values.
    pub draft: HeroDraft,
    /// Files picked in this session.
    pub uploads: Vec<UploadItem>,
    /// Validation messages.
    pub errors: FieldErrors,
    /// Bumped on every open and close; late results for older sessions are dropped.
    pub session: u64,
    /// Identifier for the next picked file.
    pub next_upload_id: u64,
    /// A save is in flight.
    pub saving: bool,
}
