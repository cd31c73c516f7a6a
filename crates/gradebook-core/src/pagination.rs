//! Pagination parameters and response metadata for listing queries.
//!
//! Offset-based pagination: `limit` is clamped to [1, 100] (default 10) and
//! `offset` to a minimum of 0. [`PaginationMeta`] travels alongside the page
//! of data so callers can tell whether more rows remain.

use crate::serde::deserialize_optional_i64;
use serde::{Deserialize, Serialize};

/// Metadata describing one page of a listing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of rows across all pages.
    pub total: i64,
    /// The limit that was applied.
    pub limit: i64,
    /// Number of rows skipped.
    pub offset: i64,
    /// Whether rows remain after this page.
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds metadata for a page given the applied parameters and the total
    /// row count.
    pub fn for_page(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

/// Caller-supplied pagination parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of rows to return (1-100, default 10).
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of rows to skip (default 0).
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// The effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// The effective offset, clamped to a minimum of 0.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_clamping() {
        let params = PaginationParams {
            limit: Some(500),
            offset: Some(-3),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(0),
        };
        let meta = PaginationMeta::for_page(&params, 25);
        assert!(meta.has_more);

        let params = PaginationParams {
            limit: Some(10),
            offset: Some(20),
        };
        let meta = PaginationMeta::for_page(&params, 25);
        assert!(!meta.has_more);
        assert_eq!(meta.total, 25);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let params: PaginationParams = serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_deserialize_string_values() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"50"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }
}
