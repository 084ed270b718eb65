//! Submission service receiving finished placements and change requests.
//!
//! The real service is a backend owned by the case-management system; it
//! stores submissions and notifies caseworkers. [`MemorySubmissions`] keeps
//! them in a list for the CLI and for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kitaplan_core::{DualPlacement, RequestStatus, ScheduleChangeRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::SubmissionError;

/// Receipt returned by the backend for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit_placement(
        &self,
        placement: &DualPlacement,
    ) -> Result<Confirmation, SubmissionError>;

    async fn submit_change_request(
        &self,
        request: &ScheduleChangeRequest,
    ) -> Result<Confirmation, SubmissionError>;
}

/// Anything accepted by [`MemorySubmissions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Placement(DualPlacement),
    ChangeRequest(ScheduleChangeRequest),
}

impl Submitted {
    fn id(&self) -> Uuid {
        match self {
            Submitted::Placement(p) => p.id,
            Submitted::ChangeRequest(r) => r.id,
        }
    }
}

/// In-memory submission backend.
///
/// Rejects duplicate ids and change requests that are not `pending`.
/// [`set_failing`](Self::set_failing) makes every call fail, standing in
/// for an unreachable backend.
#[derive(Debug, Default)]
pub struct MemorySubmissions {
    received: Mutex<Vec<Submitted>>,
    failing: AtomicBool,
}

impl MemorySubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything accepted so far, in arrival order.
    pub fn submissions(&self) -> Vec<Submitted> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Accepted change requests referencing `placement_id`.
    pub fn change_requests_for(&self, placement_id: &str) -> Vec<ScheduleChangeRequest> {
        self.submissions()
            .into_iter()
            .filter_map(|s| match s {
                Submitted::ChangeRequest(r) if r.dual_placement_id == placement_id => Some(r),
                _ => None,
            })
            .collect()
    }

    fn accept(&self, item: Submitted) -> Result<Confirmation, SubmissionError> {
        if self.failing.load(Ordering::SeqCst) {
            warn!(id = %item.id(), "submission backend unavailable");
            return Err(SubmissionError::new("backend unavailable"));
        }

        let mut received = self
            .received
            .lock()
            .map_err(|e| SubmissionError::new(format!("mutex poisoned: {e}")))?;
        let id = item.id();
        if received.iter().any(|s| s.id() == id) {
            warn!(%id, "duplicate submission rejected");
            return Err(SubmissionError::new(format!("duplicate submission {id}")));
        }
        received.push(item);

        let confirmation = Confirmation {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
        };
        info!(%id, reference = %confirmation.reference, "submission accepted");
        Ok(confirmation)
    }
}

#[async_trait]
impl SubmissionService for MemorySubmissions {
    async fn submit_placement(
        &self,
        placement: &DualPlacement,
    ) -> Result<Confirmation, SubmissionError> {
        self.accept(Submitted::Placement(placement.clone()))
    }

    async fn submit_change_request(
        &self,
        request: &ScheduleChangeRequest,
    ) -> Result<Confirmation, SubmissionError> {
        if request.status != RequestStatus::Pending {
            warn!(id = %request.id, status = ?request.status, "only pending requests can be submitted");
            return Err(SubmissionError::new(format!(
                "request {} is {:?}, expected pending",
                request.id, request.status
            )));
        }
        self.accept(Submitted::ChangeRequest(request.clone()))
    }
}
