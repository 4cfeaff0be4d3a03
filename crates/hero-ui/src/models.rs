//! UI-facing models shared across views, plus re-exported API DTOs.

pub use hero_api_models::{
    Credentials, Envelope, HeroDeleteRequest, HeroDetail, HeroImage, HeroListQuery, HeroLookup,
    HeroPage, HeroSummary, HeroUpsert, LoginResult, Position, StrongLevel, join_image_ids,
};

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Warning toast.
    Warning,
    /// Error toast.
    Error,
}

impl ToastKind {
    /// CSS modifier for the toast variant.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Toast payload used by the host and app state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}
