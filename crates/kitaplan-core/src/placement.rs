//! Dual placements: a child's week split between two kindergartens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::change_request::check_split;
use crate::config::Policy;
use crate::custody::compute_custody_percentage;
use crate::error::ValidationError;
use crate::resolver::SchedulePair;
use crate::schedule::WeeklySchedule;

/// Placement lifecycle. Placements are never deleted, only terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStatus {
    Pending,
    Approved,
    Active,
    Terminated,
}

impl PlacementStatus {
    /// Whether the external case system may move a placement from `self` to `next`.
    ///
    /// `pending → approved → active`, and any live state may be terminated.
    pub fn can_transition_to(self, next: PlacementStatus) -> bool {
        use PlacementStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Approved, Active)
                | (Pending | Approved | Active, Terminated)
        )
    }
}

/// One side of a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSlot {
    pub kindergarten_id: String,
    pub kindergarten_name: String,
    pub schedule: WeeklySchedule,
    pub custody_percentage: u8,
}

impl PlacementSlot {
    pub fn new(
        kindergarten_id: impl Into<String>,
        kindergarten_name: impl Into<String>,
        schedule: WeeklySchedule,
    ) -> Self {
        Self {
            kindergarten_id: kindergarten_id.into(),
            kindergarten_name: kindergarten_name.into(),
            custody_percentage: compute_custody_percentage(&schedule),
            schedule,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualPlacement {
    pub id: Uuid,
    pub child_id: String,
    pub primary: PlacementSlot,
    pub secondary: PlacementSlot,
    pub status: PlacementStatus,
    pub created_at: DateTime<Utc>,
    pub justification: String,
    /// Opaque document references; never inspected.
    pub documents: Vec<String>,
}

impl DualPlacement {
    pub fn schedules(&self) -> SchedulePair {
        SchedulePair::new(self.primary.schedule, self.secondary.schedule)
    }
}

/// Data collected by the placement wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementInput {
    pub child_id: String,
    pub primary_kindergarten_id: String,
    pub primary_kindergarten_name: String,
    pub secondary_kindergarten_id: String,
    pub secondary_kindergarten_name: String,
    pub schedules: SchedulePair,
    pub justification: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Validate the wizard's final step and create a `pending` placement.
pub fn create_dual_placement(
    input: PlacementInput,
    policy: &Policy,
) -> Result<DualPlacement, ValidationError> {
    if input.child_id.trim().is_empty() {
        return Err(ValidationError::MissingField("childId"));
    }
    let primary_id = input.primary_kindergarten_id.trim();
    let secondary_id = input.secondary_kindergarten_id.trim();
    if primary_id.is_empty() {
        return Err(ValidationError::MissingField("primaryKindergartenId"));
    }
    if secondary_id.is_empty() {
        return Err(ValidationError::MissingField("secondaryKindergartenId"));
    }
    if primary_id == secondary_id {
        return Err(ValidationError::SameKindergarten);
    }

    check_split(&input.schedules)?;

    policy
        .check_text(&input.justification)
        .map_err(|actual| ValidationError::ReasonTooShort {
            min: policy.min_reason_len,
            actual,
        })?;

    let placement = DualPlacement {
        id: Uuid::new_v4(),
        child_id: input.child_id.trim().to_string(),
        primary: PlacementSlot::new(
            primary_id,
            input.primary_kindergarten_name,
            input.schedules.primary,
        ),
        secondary: PlacementSlot::new(
            secondary_id,
            input.secondary_kindergarten_name,
            input.schedules.secondary,
        ),
        status: PlacementStatus::Pending,
        created_at: Utc::now(),
        justification: input.justification.trim().to_string(),
        documents: input.documents,
    };

    info!(
        placement_id = %placement.id,
        child_id = %placement.child_id,
        primary = placement.primary.custody_percentage,
        secondary = placement.secondary.custody_percentage,
        "dual placement created"
    );
    Ok(placement)
}
