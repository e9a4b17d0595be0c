//! Run-report DTOs returned by the price-update trigger endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RunReport;

/// Per-run counters returned in the trigger response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateCounts {
    /// Items loaded for the run.
    pub total: usize,
    /// Items whose price was written.
    pub success: usize,
    /// Items that failed.
    pub failed: usize,
    /// Items skipped.
    pub skipped: usize,
}

/// Response body for both trigger endpoints.
///
/// An empty item set yields a message-only body; otherwise `results`
/// carries the counters and `errors` appears only when failures
/// occurred.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateRunResponse {
    /// Human-readable completion message.
    pub message: String,
    /// Run counters; absent when there was nothing to do.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<UpdateCounts>,
    /// Per-item error messages; absent when the run had no failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl UpdateRunResponse {
    /// Renders a run report with the given completion message.
    #[must_use]
    pub fn from_report(report: RunReport, message: &str) -> Self {
        if report.is_empty() {
            return Self {
                message: "No items to update".to_string(),
                results: None,
                errors: None,
            };
        }
        let errors = if report.errors.is_empty() {
            None
        } else {
            Some(report.errors)
        };
        Self {
            message: message.to_string(),
            results: Some(UpdateCounts {
                total: report.total,
                success: report.success,
                failed: report.failed,
                skipped: report.skipped,
            }),
            errors,
        }
    }
}
