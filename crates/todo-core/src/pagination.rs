//! Pagination arithmetic shared by the REST and gRPC list paths.
//!
//! Raw page/per-page values arrive from untrusted query input and may be
//! zero or negative; the helpers substitute defaults so the computed
//! (limit, offset) pair is always usable. `per_page` is not capped — very
//! large values are the caller's concern.

/// Default page size when the caller supplies none (or a non-positive one).
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Effective page number: `raw` when positive, otherwise page 1.
pub fn current_page(raw: i64) -> i64 {
    if raw > 0 { raw } else { 1 }
}

/// Effective page size: `raw` when positive, otherwise [`DEFAULT_PER_PAGE`].
pub fn per_page(raw: i64) -> i64 {
    if raw > 0 { raw } else { DEFAULT_PER_PAGE }
}

/// Row offset for a page. Never negative for inputs produced by
/// [`current_page`] and [`per_page`].
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

/// Total page count: ceiling of `total / per_page`, 0 when there are no rows.
pub fn total_page(total: i64, per_page: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}
