//! Aggregation functions over an enriched batch

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use tracing::debug;

use core_kernel::{iso_date_key, parse_calendar_date};
use domain_claims::{ClaimStatus, EnrichedClaim};

/// Maximum number of providers returned by [`top_providers`]
pub const TOP_PROVIDER_LIMIT: usize = 5;

/// Maximum number of claims returned by [`attention_list`]
pub const ATTENTION_LIST_LIMIT: usize = 10;

/// Business status bucket used for dashboard counts
///
/// `Pending` groups `Submitted` and `Under Review` claims. It describes the
/// payer decision, not enrichment progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusBucket {
    Approved,
    Rejected,
    Pending,
}

impl StatusBucket {
    /// Bucket for a CSV status; `None` for statuses outside the known set
    pub fn for_status(status: &ClaimStatus) -> Option<Self> {
        match status {
            ClaimStatus::Approved => Some(StatusBucket::Approved),
            ClaimStatus::Rejected => Some(StatusBucket::Rejected),
            s if s.is_awaiting_decision() => Some(StatusBucket::Pending),
            _ => None,
        }
    }
}

/// Claim counts per status bucket
///
/// `approved + rejected + pending` can be less than `total`: claims with an
/// unrecognized status count toward the total only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryCounts {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

/// One slice of the status distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusShare {
    pub name: StatusBucket,
    pub value: usize,
}

/// Claim count for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderCount {
    pub provider_name: String,
    pub count: usize,
}

/// Approved claims on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApprovalBucket {
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: NaiveDate,
    pub count: usize,
}

fn serialize_iso_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_date_key(*date))
}

/// Counts claims per business status bucket
pub fn summary_counts(claims: &[EnrichedClaim]) -> SummaryCounts {
    claims.iter().fold(
        SummaryCounts {
            total: claims.len(),
            ..SummaryCounts::default()
        },
        |mut counts, claim| {
            match StatusBucket::for_status(&claim.record().status) {
                Some(StatusBucket::Approved) => counts.approved += 1,
                Some(StatusBucket::Rejected) => counts.rejected += 1,
                Some(StatusBucket::Pending) => counts.pending += 1,
                None => {}
            }
            counts
        },
    )
}

/// Non-empty status buckets in the order Approved, Rejected, Pending
pub fn status_distribution(claims: &[EnrichedClaim]) -> Vec<StatusShare> {
    let counts = summary_counts(claims);
    [
        (StatusBucket::Approved, counts.approved),
        (StatusBucket::Rejected, counts.rejected),
        (StatusBucket::Pending, counts.pending),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0)
    .map(|(name, value)| StatusShare { name, value })
    .collect()
}

/// The busiest providers, most claims first
///
/// Providers with equal counts keep the order in which they first appear in
/// the batch.
pub fn top_providers(claims: &[EnrichedClaim]) -> Vec<ProviderCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut providers: Vec<ProviderCount> = Vec::new();

    for claim in claims {
        let name = claim.record().provider_name.as_str();
        match positions.get(name) {
            Some(&index) => providers[index].count += 1,
            None => {
                positions.insert(name, providers.len());
                providers.push(ProviderCount {
                    provider_name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    providers.sort_by(|a, b| b.count.cmp(&a.count));
    providers.truncate(TOP_PROVIDER_LIMIT);
    providers
}

/// Approved claims per approval day, oldest day first
///
/// Only claims with status `Approved` and a non-empty `approval_date` are
/// counted. Approval dates that do not parse as a calendar date are left out.
pub fn approvals_over_time(claims: &[EnrichedClaim]) -> Vec<ApprovalBucket> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for claim in claims {
        let record = claim.record();
        if record.status != ClaimStatus::Approved || record.approval_date.is_empty() {
            continue;
        }
        match parse_calendar_date(&record.approval_date) {
            Ok(date) => *per_day.entry(date).or_insert(0) += 1,
            Err(error) => debug!(
                claim_id = %record.claim_id,
                error = %error,
                "Skipping approval with unparseable date"
            ),
        }
    }

    per_day
        .into_iter()
        .map(|(date, count)| ApprovalBucket { date, count })
        .collect()
}

/// First claims in batch order that are high risk or carry validation errors
pub fn attention_list(claims: &[EnrichedClaim]) -> Vec<&EnrichedClaim> {
    claims
        .iter()
        .filter(|claim| claim.needs_attention())
        .take(ATTENTION_LIST_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ClaimRecord;

    fn claim(id: usize, provider: &str, status: &str, approval_date: &str) -> EnrichedClaim {
        EnrichedClaim::pending(
            id,
            ClaimRecord {
                claim_id: format!("C{}", id),
                provider_name: provider.to_string(),
                status: ClaimStatus::parse(status),
                approval_date: approval_date.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(summary_counts(&[]), SummaryCounts::default());
        assert!(status_distribution(&[]).is_empty());
        assert!(top_providers(&[]).is_empty());
        assert!(approvals_over_time(&[]).is_empty());
        assert!(attention_list(&[]).is_empty());
    }

    #[test]
    fn test_bucket_mapping() {
        assert_eq!(
            StatusBucket::for_status(&ClaimStatus::UnderReview),
            Some(StatusBucket::Pending)
        );
        assert_eq!(
            StatusBucket::for_status(&ClaimStatus::Other("Pended".into())),
            None
        );
    }

    #[test]
    fn test_pending_claims_are_not_in_attention_list() {
        let claims = vec![claim(0, "A", "Submitted", "")];
        assert!(attention_list(&claims).is_empty());
    }

    #[test]
    fn test_approval_bucket_serializes_iso_date() {
        let claims = vec![claim(0, "A", "Approved", "Jan 5, 2024")];
        let buckets = approvals_over_time(&claims);
        let value = serde_json::to_value(buckets[0]).unwrap();
        assert_eq!(value["date"], "2024-01-05");
        assert_eq!(value["count"], 1);
    }
}
