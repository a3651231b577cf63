//! Pre-built Test Fixtures
//!
//! Ready-to-use CSV uploads and provider answers. The sample batch is small
//! enough to reason about by hand:
//!
//! | row | provider        | status       | approval   | amount |
//! |-----|-----------------|--------------|------------|--------|
//! | 0   | Acme Clinic     | Approved     | 2024-01-05 | 500    |
//! | 1   | Beta Health     | Submitted    |            | 50000  |
//! | 2   | Acme Clinic     | Rejected     |            | 120    |
//! | 3   | Gamma Surgical  | Under Review |            | 8800   |
//! | 4   | Beta Health     | Approved     | 2024-01-03 | 310.25 |
//! | 5   | Acme Clinic     | Approved     | 2024-01-05 | 95     |
//! | 6   | Delta Labs      | Pended       |            | n/a    |

use domain_claims::{AnalysisResult, RiskLevel, EXPECTED_HEADER};

/// Fixture for CSV uploads
pub struct CsvFixtures;

impl CsvFixtures {
    /// The mandatory header row
    pub fn header() -> String {
        EXPECTED_HEADER.join(",")
    }

    /// Header followed by the given data rows
    pub fn with_rows(rows: &[&str]) -> String {
        let mut text = Self::header();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    /// One approved claim with a clean record
    pub fn single_approved() -> String {
        Self::with_rows(&[
            "C1,P1,Acme Clinic,2024-01-01,D1,99213,500,POL1,Approved,2024-01-01,2024-01-05",
        ])
    }

    /// One high-value surgical claim awaiting decision
    pub fn single_high_value() -> String {
        Self::with_rows(&[
            "C9,P9,Big Hospital,2024-02-01,D9,27447,50000,POL9,Submitted,2024-02-01,",
        ])
    }

    /// Seven claims across four providers; see the module table
    pub fn sample_batch() -> String {
        Self::with_rows(&[
            "C1,P1,Acme Clinic,2024-01-01,D1,99213,500,POL1,Approved,2024-01-01,2024-01-05",
            "C2,P2,Beta Health,2024-01-02,D2,27447,50000,POL2,Submitted,2024-01-02,",
            "C3,P3,Acme Clinic,2024-01-03,D3,99214,120,POL3,Rejected,2024-01-03,",
            "C4,P4,Gamma Surgical,2024-01-04,D4,33533,8800,POL4,Under Review,2024-01-04,",
            "C5,P5,Beta Health,2024-01-01,D5,99212,310.25,POL5,Approved,2024-01-01,2024-01-03",
            "C6,P6,Acme Clinic,2024-01-02,D6,99211,95,POL6,Approved,2024-01-02,2024-01-05",
            "C7,P7,Delta Labs,2024-01-05,D7,80050,n/a,POL7,Pended,2024-01-05,",
        ])
    }

    /// A header with two columns swapped
    pub fn swapped_header() -> String {
        let mut columns = EXPECTED_HEADER.to_vec();
        columns.swap(1, 2);
        format!("{}\nC1,P1", columns.join(","))
    }
}

/// Fixture for analysis results and raw provider answers
pub struct AnalysisFixtures;

impl AnalysisFixtures {
    pub fn clean_low() -> AnalysisResult {
        AnalysisResult::new(Vec::new(), RiskLevel::Low, "Auto-Approval")
    }

    pub fn medium_with_errors() -> AnalysisResult {
        AnalysisResult::new(
            vec!["approval_date is missing for an Approved claim".to_string()],
            RiskLevel::Medium,
            "Standard Review",
        )
    }

    pub fn high_surgical() -> AnalysisResult {
        AnalysisResult::new(Vec::new(), RiskLevel::High, "Surgical Claims Audit")
    }

    /// Provider answer for `clean_low`, as bare JSON
    pub fn clean_low_json() -> String {
        r#"{"validationErrors":[],"riskLevel":"Low","suggestedWorkflow":"Auto-Approval"}"#
            .to_string()
    }

    /// Provider answer for `high_surgical`, wrapped in a markdown fence
    pub fn high_surgical_fenced() -> String {
        "```json\n{\"validationErrors\":[],\"riskLevel\":\"High\",\"suggestedWorkflow\":\"Surgical Claims Audit\"}\n```"
            .to_string()
    }
}
