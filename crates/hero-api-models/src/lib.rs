#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the hero catalog API.
//!
//! Every endpoint answers with the same [`Envelope`]; the typed payloads below
//! describe what lives inside `result` and what the console sends in request
//! bodies. Field names follow the backend's camelCase wire format.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope `code` reported on success.
pub const SUCCESS_CODE: i64 = 200;
/// Envelope `code` reported when the bearer token is missing or stale.
pub const UNAUTHORIZED_CODE: i64 = 401;

/// Response wrapper returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Application status code; `200` means success.
    pub code: i64,
    #[serde(default)]
    /// Human-readable status message, shown to the user on failure.
    pub message: String,
    #[serde(default)]
    /// Endpoint-specific payload.
    pub result: Value,
}

impl Envelope {
    /// Whether the envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Whether the envelope reports an expired or missing session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == UNAUTHORIZED_CODE
    }

    /// Decode `result` into a typed payload.
    ///
    /// # Errors
    /// Returns the serde error when `result` does not match `T`.
    pub fn decode<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.result)
    }

    /// Interpret `result` as an identifier. The upload endpoint answers with
    /// either a string or a number depending on the storage backend.
    #[must_use]
    pub fn result_id(&self) -> Option<String> {
        match &self.result {
            Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Version strength tier assigned to a hero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrongLevel {
    /// Strongest tier.
    T0,
    /// Strong tier.
    T1,
    /// Average tier.
    T2,
    /// Weak tier.
    T3,
}

impl StrongLevel {
    /// All tiers in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::T0, Self::T1, Self::T2, Self::T3]
    }

    /// Wire value of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::T0 => "T0",
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
        }
    }

    /// Parse a wire value; unknown or empty input yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|level| level.as_str() == value.trim())
    }
}

impl fmt::Display for StrongLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lane a hero is played in. Serialized as the backend's `"1"`..`"5"` codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    /// Marksman (`1`).
    #[serde(rename = "1")]
    Marksman,
    /// Support (`2`).
    #[serde(rename = "2")]
    Support,
    /// Mid lane (`3`).
    #[serde(rename = "3")]
    Mid,
    /// Side lane (`4`).
    #[serde(rename = "4")]
    Side,
    /// Jungle (`5`).
    #[serde(rename = "5")]
    Jungle,
}

impl Position {
    /// All positions in code order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Marksman,
            Self::Support,
            Self::Mid,
            Self::Side,
            Self::Jungle,
        ]
    }

    /// Wire code (`"1"`..`"5"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Marksman => "1",
            Self::Support => "2",
            Self::Mid => "3",
            Self::Side => "4",
            Self::Jungle => "5",
        }
    }

    /// Display label used in tables and forms.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Marksman => "射手",
            Self::Support => "辅助",
            Self::Mid => "中路",
            Self::Side => "边路",
            Self::Jungle => "打野",
        }
    }

    /// Parse a wire code; unknown or empty input yields `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|position| position.code() == code.trim())
    }
}

/// Poster image attached to a hero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    /// Stable image identifier.
    pub img_id: String,
    /// Stored file name, used to build the display URL.
    pub img_name: String,
}

/// Row returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroSummary {
    /// Hero identifier.
    pub hero_id: String,
    /// Hero display name.
    pub hero_name: String,
    /// Release date (`YYYY-MM-DD`).
    pub date: String,
    /// Version strength tier.
    pub strong_level: StrongLevel,
    /// Lane code.
    pub position: Position,
    #[serde(default)]
    /// Comma-joined poster identifiers as stored by the backend.
    pub img_ids: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Creation timestamp, when reported.
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Last update timestamp, when reported.
    pub updated_at: Option<String>,
}

/// Full hero record returned by the lookup endpoint.
///
/// The backend also echoes `imgIds`; it is intentionally not captured because
/// [`HeroDetail::img_ids`] derives it from `hero_image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroDetail {
    /// Hero identifier.
    pub hero_id: String,
    /// Hero display name.
    pub hero_name: String,
    /// Release date (`YYYY-MM-DD`).
    pub date: String,
    /// Version strength tier.
    pub strong_level: StrongLevel,
    /// Lane code.
    pub position: Position,
    #[serde(default)]
    /// Ordered poster images.
    pub hero_image: Vec<HeroImage>,
}

impl HeroDetail {
    /// Comma-joined poster identifiers, in `hero_image` order.
    #[must_use]
    pub fn img_ids(&self) -> String {
        join_image_ids(&self.hero_image)
    }
}

/// Join poster identifiers with commas, preserving order.
#[must_use]
pub fn join_image_ids(images: &[HeroImage]) -> String {
    images
        .iter()
        .map(|image| image.img_id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// One page of list results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HeroPage {
    #[serde(default)]
    /// Rows on the requested page.
    pub data: Vec<HeroSummary>,
    #[serde(default)]
    /// Total matching rows across all pages.
    pub total: u64,
}

/// Body of `POST /hero/getHeroList`. Empty filters are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeroListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Name filter.
    pub hero_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Release date filter.
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tier filter.
    pub strong_level: Option<StrongLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Lane filter.
    pub position: Option<Position>,
    /// One-based page number.
    pub page_num: u32,
    /// Rows per page.
    pub page_size: u32,
}

/// Body of `POST /hero/getHero`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroLookup {
    /// Hero identifier.
    pub hero_id: String,
    /// Poster identifiers from the list row.
    pub img_ids: String,
}

/// Body of `POST /hero/create` and `POST /hero/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroUpsert {
    /// Target hero identifier; empty when creating.
    pub hero_id: String,
    /// Hero display name.
    pub hero_name: String,
    /// Release date (`YYYY-MM-DD`).
    pub date: String,
    /// Version strength tier.
    pub strong_level: StrongLevel,
    /// Lane code.
    pub position: Position,
    /// Comma-joined poster identifiers.
    pub img_ids: String,
}

/// Body of `POST /hero/delete`. The backend keys deletion by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroDeleteRequest {
    /// Name of the hero to delete.
    pub hero_name: String,
}

/// Body of `POST /users/login` and `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account name.
    pub user_name: String,
    /// Account password.
    pub password: String,
}

/// `result` of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResult {
    /// Bearer token for subsequent requests.
    pub token: String,
}
