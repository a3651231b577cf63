//! Claims Analytics
//!
//! Pure aggregation over an enriched claims batch. Every function reads a
//! slice of [`EnrichedClaim`](domain_claims::EnrichedClaim) and recomputes
//! its answer from scratch; nothing is cached between calls.
//!
//! - [`summary_counts`]: totals per business status bucket
//! - [`status_distribution`]: non-empty buckets as name/value pairs
//! - [`top_providers`]: five busiest providers
//! - [`approvals_over_time`]: approved claims per approval day
//! - [`attention_list`]: first ten claims needing manual review
//! - [`DashboardStats`]: all of the above in one serializable bundle

pub mod stats;
pub mod dashboard;

pub use stats::{
    approvals_over_time, attention_list, status_distribution, summary_counts, top_providers,
    ApprovalBucket, ProviderCount, StatusBucket, StatusShare, SummaryCounts,
    ATTENTION_LIST_LIMIT, TOP_PROVIDER_LIMIT,
};
pub use dashboard::{AmountTotals, DashboardStats};
