//! CSV intake and schema validation
//!
//! The upload format is deliberately simple: comma-delimited lines with no
//! quoting or escaping. A header row naming exactly the eleven claim columns
//! is mandatory. Data rows are never rejected individually; missing cells
//! come through as empty strings, so a short or blank row still yields a
//! record.

use tracing::debug;

use crate::claim::{ClaimRecord, ClaimStatus};
use crate::error::ClaimError;
use crate::processing::EnrichedClaim;

/// Field delimiter of the upload format
pub const FIELD_DELIMITER: char = ',';

/// Required header columns, in order
pub const EXPECTED_HEADER: [&str; 11] = [
    "claim_id",
    "patient_id",
    "provider_name",
    "date_of_service",
    "diagnosis_code",
    "procedure_code",
    "claim_amount",
    "insurance_policy_number",
    "status",
    "submitted_date",
    "approval_date",
];

/// Parses raw CSV text into an ordered batch of pending claims
///
/// Row `i` (zero-based, header excluded) becomes the claim with `id == i`.
///
/// # Errors
///
/// - [`ClaimError::EmptyInput`] when there is no data row after the header
/// - [`ClaimError::SchemaMismatch`] when the header differs from
///   [`EXPECTED_HEADER`] in any way (order, extra or missing columns)
pub fn parse_claims_csv(input: &str) -> Result<Vec<EnrichedClaim>, ClaimError> {
    let mut lines = input.trim().split('\n');

    let header_line = lines.next().unwrap_or_default();
    let rows: Vec<&str> = lines.collect();
    if rows.is_empty() {
        return Err(ClaimError::EmptyInput);
    }

    validate_header(header_line)?;

    let claims: Vec<EnrichedClaim> = rows
        .into_iter()
        .enumerate()
        .map(|(index, line)| EnrichedClaim::pending(index, parse_row(line)))
        .collect();

    debug!(rows = claims.len(), "Parsed claims CSV");
    Ok(claims)
}

fn validate_header(line: &str) -> Result<(), ClaimError> {
    let found: Vec<String> = line
        .split(FIELD_DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect();

    if found.iter().map(String::as_str).eq(EXPECTED_HEADER) {
        return Ok(());
    }

    Err(ClaimError::SchemaMismatch {
        expected: EXPECTED_HEADER.iter().map(|h| h.to_string()).collect(),
        found,
    })
}

fn parse_row(line: &str) -> ClaimRecord {
    let cells: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    let cell = |index: usize| cells.get(index).copied().unwrap_or_default().to_string();

    let status = match cells.get(8).copied().unwrap_or_default() {
        "" => ClaimStatus::Submitted,
        text => ClaimStatus::parse(text),
    };

    ClaimRecord {
        claim_id: cell(0),
        patient_id: cell(1),
        provider_name: cell(2),
        date_of_service: cell(3),
        diagnosis_code: cell(4),
        procedure_code: cell(5),
        claim_amount: cell(6),
        insurance_policy_number: cell(7),
        status,
        submitted_date: cell(9),
        approval_date: cell(10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ProcessingState;

    fn header() -> String {
        EXPECTED_HEADER.join(",")
    }

    #[test]
    fn test_single_row() {
        let csv = format!(
            "{}\nC1,P1,Acme Clinic,2024-01-01,D1,99213,500,POL1,Approved,2024-01-01,2024-01-05",
            header()
        );
        let claims = parse_claims_csv(&csv).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].id(), 0);
        assert_eq!(claims[0].record().status, ClaimStatus::Approved);
        assert_eq!(claims[0].record().approval_date, "2024-01-05");
        assert_eq!(claims[0].state(), ProcessingState::Pending);
        assert!(claims[0].analysis().is_none());
    }

    #[test]
    fn test_header_only_is_empty_input() {
        assert!(matches!(parse_claims_csv(&header()), Err(ClaimError::EmptyInput)));
        assert!(matches!(
            parse_claims_csv(&format!("{}\n\n  \n", header())),
            Err(ClaimError::EmptyInput)
        ));
        assert!(matches!(parse_claims_csv(""), Err(ClaimError::EmptyInput)));
    }

    #[test]
    fn test_short_row_defaults() {
        let csv = format!("{}\nC9,P9", header());
        let claims = parse_claims_csv(&csv).unwrap();
        let record = claims[0].record();
        assert_eq!(record.claim_id, "C9");
        assert_eq!(record.provider_name, "");
        assert_eq!(record.status, ClaimStatus::Submitted);
        assert_eq!(record.approval_date, "");
    }

    #[test]
    fn test_crlf_and_padded_cells() {
        let csv = format!(
            "{}\r\n C1 , P1 ,Acme, , , , , , Under Review , , \r\n",
            header().replace(',', " , ")
        );
        let claims = parse_claims_csv(&csv).unwrap();
        assert_eq!(claims[0].record().claim_id, "C1");
        assert_eq!(claims[0].record().status, ClaimStatus::UnderReview);
    }

    #[test]
    fn test_schema_mismatch_carries_expected_header() {
        let csv = "claim_id,patient_id\nC1,P1";
        match parse_claims_csv(csv) {
            Err(ClaimError::SchemaMismatch { expected, found }) => {
                assert_eq!(expected.len(), 11);
                assert_eq!(expected[0], "claim_id");
                assert_eq!(found, vec!["claim_id", "patient_id"]);
            }
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }
}
