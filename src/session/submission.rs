use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{InvoiceRecord, RecordId};
use crate::payload;

/// Lifecycle of a pending record. Committed records leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    /// Under review; editable.
    Pending,
    /// Handed to the submission sink; locked until the outcome arrives.
    Submitting,
}

/// Ticket for a submission in flight.
///
/// Holds a snapshot of the record as it was when the gate passed; the
/// session refuses edits until the ticket is completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record_id: RecordId,
    pub record: InvoiceRecord,
    pub started_at: DateTime<Utc>,
}

impl Submission {
    pub(crate) fn new(record: InvoiceRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            record,
            started_at: Utc::now(),
        }
    }

    /// JSON body for the submission sink.
    pub fn payload(&self) -> serde_json::Value {
        payload::submission_payload(&self.record)
    }
}

/// What happened to a completed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The sink accepted the record; it has left the pending collection.
    Committed(InvoiceRecord),
    /// The sink refused or failed; the record is pending again.
    Failed { record_id: RecordId, message: String },
}

impl SubmissionOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
