//! Dashboard bundle of every batch statistic

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use domain_claims::EnrichedClaim;

use crate::stats::{
    approvals_over_time, attention_list, status_distribution, summary_counts, top_providers,
    ApprovalBucket, ProviderCount, StatusShare, SummaryCounts,
};

/// Sum of claim amounts that parse as decimals
///
/// The sum never overflows: an amount that would push it past
/// `Decimal::MAX` is left out and counted in `out_of_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AmountTotals {
    pub total_claimed: Decimal,
    /// Claims whose `claim_amount` is blank or not a number
    pub unparseable: usize,
    /// Claims whose amount parsed but did not fit into the running total
    pub out_of_range: usize,
}

impl AmountTotals {
    pub fn compute(claims: &[EnrichedClaim]) -> Self {
        claims
            .iter()
            .fold(AmountTotals::default(), |mut totals, claim| {
                match claim.record().claim_amount_value() {
                    Some(amount) => match totals.total_claimed.checked_add(amount) {
                        Some(sum) => totals.total_claimed = sum,
                        None => {
                            warn!(
                                claim_id = %claim.record().claim_id,
                                amount = %amount,
                                "Claim amount overflows the batch total, leaving it out"
                            );
                            totals.out_of_range += 1;
                        }
                    },
                    None => totals.unparseable += 1,
                }
                totals
            })
    }
}

/// Snapshot of all dashboard figures for one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub summary: SummaryCounts,
    pub status_distribution: Vec<StatusShare>,
    pub top_providers: Vec<ProviderCount>,
    pub approvals_over_time: Vec<ApprovalBucket>,
    pub attention: Vec<EnrichedClaim>,
    pub amounts: AmountTotals,
}

impl DashboardStats {
    pub fn compute(claims: &[EnrichedClaim]) -> Self {
        Self {
            summary: summary_counts(claims),
            status_distribution: status_distribution(claims),
            top_providers: top_providers(claims),
            approvals_over_time: approvals_over_time(claims),
            attention: attention_list(claims).into_iter().cloned().collect(),
            amounts: AmountTotals::compute(claims),
        }
    }
}
