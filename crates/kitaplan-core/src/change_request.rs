//! Change-request workflow for an existing dual placement.
//!
//! ```text
//! draft (ChangeRequestInput) --create--> pending --(external review)--> approved | rejected
//! ```
//!
//! Only `create` is performed here. Review, and merging an approved request
//! into its placement, belong to the caseworker system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::Policy;
use crate::custody::compute_custody_percentage;
use crate::error::ValidationError;
use crate::resolver::SchedulePair;
use crate::schedule::WeeklySchedule;
use crate::validator::split_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Temporary,
    Permanent,
    Seasonal,
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temporary" => Ok(RequestType::Temporary),
            "permanent" => Ok(RequestType::Permanent),
            "seasonal" => Ok(RequestType::Seasonal),
            other => Err(format!(
                "unknown request type {other:?} (expected temporary, permanent or seasonal)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and rejected are set by the external reviewer and never change.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

/// A client-side draft, not yet an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestInput {
    pub dual_placement_id: String,
    pub request_type: RequestType,
    pub proposed_primary: WeeklySchedule,
    pub proposed_secondary: WeeklySchedule,
    pub reason: String,
    pub requested_by: String,
}

/// A submitted proposal to replace a placement's schedules.
///
/// Does not modify the referenced placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleChangeRequest {
    pub id: Uuid,
    pub dual_placement_id: String,
    pub request_type: RequestType,
    pub proposed_primary: WeeklySchedule,
    pub proposed_primary_percentage: u8,
    pub proposed_secondary: WeeklySchedule,
    pub proposed_secondary_percentage: u8,
    pub reason: String,
    pub requested_by: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl ScheduleChangeRequest {
    pub fn proposed_pair(&self) -> SchedulePair {
        SchedulePair::new(self.proposed_primary, self.proposed_secondary)
    }
}

/// Validate a draft and turn it into a `pending` request.
///
/// Fails unless the proposed schedules form a valid split and the trimmed
/// reason is longer than `policy.min_reason_len` characters.
pub fn create_change_request(
    input: ChangeRequestInput,
    policy: &Policy,
) -> Result<ScheduleChangeRequest, ValidationError> {
    if input.dual_placement_id.trim().is_empty() {
        return Err(ValidationError::MissingField("dualPlacementId"));
    }
    if input.requested_by.trim().is_empty() {
        return Err(ValidationError::MissingField("requestedBy"));
    }

    let pair = SchedulePair::new(input.proposed_primary, input.proposed_secondary);
    check_split(&pair)?;

    policy
        .check_text(&input.reason)
        .map_err(|actual| ValidationError::ReasonTooShort {
            min: policy.min_reason_len,
            actual,
        })?;

    let request = ScheduleChangeRequest {
        id: Uuid::new_v4(),
        dual_placement_id: input.dual_placement_id.trim().to_string(),
        request_type: input.request_type,
        proposed_primary: input.proposed_primary,
        proposed_primary_percentage: compute_custody_percentage(&input.proposed_primary),
        proposed_secondary: input.proposed_secondary,
        proposed_secondary_percentage: compute_custody_percentage(&input.proposed_secondary),
        reason: input.reason.trim().to_string(),
        requested_by: input.requested_by.trim().to_string(),
        status: RequestStatus::Pending,
        created_at: Utc::now(),
    };

    info!(
        request_id = %request.id,
        placement_id = %request.dual_placement_id,
        request_type = ?request.request_type,
        primary = request.proposed_primary_percentage,
        secondary = request.proposed_secondary_percentage,
        "schedule change request created"
    );
    Ok(request)
}

/// Reject pairs that overlap or do not cover the whole week.
pub(crate) fn check_split(pair: &SchedulePair) -> Result<(), ValidationError> {
    let report = split_report(pair);
    if !report.conflicting_days.is_empty() {
        return Err(ValidationError::ConflictingDays(report.conflicting_days));
    }
    if !report.is_valid() {
        return Err(ValidationError::InvalidSplit {
            combined: report.combined,
        });
    }
    Ok(())
}
