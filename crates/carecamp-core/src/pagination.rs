//! Pagination utilities for list endpoints.
//!
//! Admin-facing list endpoints accept `limit`/`offset` (or `page`) query
//! parameters and respond with a `data` + `meta` envelope. `limit` is
//! clamped to [1, 100]; when `page` is given it takes precedence over
//! `offset`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Query parameters arrive as strings; empty strings mean "not provided".
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata included alongside a paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// The limit that was applied
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether there are more items after this page
    pub has_more: bool,
}

/// Offset- or page-based pagination parameters.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    /// Effective limit, clamped to [1, 100]. Defaults to 10.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Effective offset. Derived from `page` when provided, never negative.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            let page = page.max(1);
            (page - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// Page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}
