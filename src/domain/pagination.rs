//! Pagination metadata reported by the aggregation API.

use serde::{Deserialize, Serialize};

use crate::domain::lenient::{lenient_bool, lenient_count};

/// Pagination block as it appears on the wire. Every field may be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PaginationPayload {
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(
        default,
        rename = "totalPages",
        alias = "total_pages",
        deserialize_with = "lenient_count"
    )]
    pub total_pages: Option<u64>,
    #[serde(default, alias = "hasNext", deserialize_with = "lenient_bool")]
    pub has_next: Option<bool>,
    #[serde(default, alias = "hasPrev", deserialize_with = "lenient_bool")]
    pub has_prev: Option<bool>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u64>,
}

/// Resolved pagination state of a result page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub page: u64,
    pub total_pages: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: u64,
}

impl PaginationState {
    /// Fills the gaps of a wire pagination block.
    ///
    /// `requested_page` and `requested_limit` are what the request asked for;
    /// `result_count` is the number of lots in the body. Without a total, the
    /// body is taken to be the whole result set. Without a page count, it is
    /// derived as `ceil(total / limit)`. The page is kept within
    /// `1..=max(total_pages, 1)`.
    pub fn resolve(
        payload: Option<&PaginationPayload>,
        requested_page: u64,
        requested_limit: u64,
        result_count: usize,
    ) -> Self {
        let payload = payload.cloned().unwrap_or_default();

        let limit = payload.limit.filter(|l| *l > 0).unwrap_or(requested_limit);
        let total = payload.total.unwrap_or(result_count as u64);
        let total_pages = payload.total_pages.unwrap_or_else(|| {
            if limit == 0 {
                u64::from(total > 0)
            } else {
                total.div_ceil(limit)
            }
        });

        let page = payload
            .page
            .unwrap_or(requested_page)
            .clamp(1, total_pages.max(1));

        Self {
            page,
            total_pages,
            total,
            has_next: payload.has_next.unwrap_or(page < total_pages),
            has_prev: payload.has_prev.unwrap_or(page > 1),
            limit,
        }
    }
}
