//! Review session: the pending collection, the displayed record, and the
//! operations an operator can perform on it.
//!
//! A session moves through [`Phase`]s:
//!
//! ```text
//! Loading ──fetch ok, ≥1 record──▶ Reviewing ──last record removed──▶ Completed
//!    │
//!    └──fetch failed / 0 records──▶ Empty
//! ```
//!
//! All reads are derive-on-read: [`ReviewSession::derived`],
//! [`ReviewSession::gate`] and [`ReviewSession::view`] recompute from the
//! current record every time they are called.
//!
//! # Example
//!
//! ```
//! use facturator::core::{FieldName, InvoiceRecord, ReviewConfig};
//! use facturator::payload::Batch;
//! use facturator::session::{Phase, ReviewSession};
//!
//! let batch = Batch {
//!     invoices: vec![
//!         InvoiceRecord::new("a").with(FieldName::Total, "10"),
//!         InvoiceRecord::new("b"),
//!     ],
//!     providers: vec![],
//! };
//! let mut session = ReviewSession::from_batch(ReviewConfig::default(), batch);
//! assert_eq!(session.phase(), Phase::Reviewing);
//! assert_eq!(session.advance(), Some(1));
//! assert_eq!(session.advance(), Some(1));
//! assert!(!session.gate().submittable());
//! ```

mod controller;
mod navigator;
mod submission;

pub use controller::{InvoiceSource, Reviewer, SubmissionSink};
pub use navigator::Cursor;
pub use submission::{RecordState, Submission, SubmissionOutcome};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    DerivedRates, FieldName, GateReport, InvoiceRecord, Provider, RecordId, ReviewConfig,
    ReviewError, derive_rates, evaluate_current,
};
use crate::payload::Batch;
use crate::registry::{self, ProviderRegistry};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the initial fetch.
    Loading,
    /// At least one record is pending and displayed.
    Reviewing,
    /// The fetch produced no records or failed.
    Empty,
    /// Every record has been submitted. Terminal.
    Completed,
}

/// The state of one operator's review.
///
/// Mutated only through navigation ([`advance`](Self::advance),
/// [`retreat`](Self::retreat)), [`edit_field`](Self::edit_field),
/// [`select_provider`](Self::select_provider) (or
/// [`select_search_result`](Self::select_search_result)) and removal
/// ([`remove_current`](Self::remove_current) or a committed submission).
#[derive(Debug, Clone)]
pub struct ReviewSession {
    config: ReviewConfig,
    phase: Phase,
    pending: Vec<InvoiceRecord>,
    cursor: Cursor,
    registry: ProviderRegistry,
    search_term: String,
    in_flight: Option<RecordId>,
    load_error: Option<String>,
}

/// Everything a caller needs to render the current state.
#[derive(Debug, Clone)]
pub struct ReviewView<'a> {
    pub phase: Phase,
    pub record: Option<&'a InvoiceRecord>,
    /// Zero-based index of `record`.
    pub position: Option<usize>,
    pub pending: usize,
    pub derived: Option<DerivedRates>,
    pub gate: GateReport,
    pub submitting: bool,
    pub search_term: &'a str,
    pub search_results: Vec<&'a Provider>,
    pub load_error: Option<&'a str>,
}

impl ReviewSession {
    /// A session waiting for its initial fetch.
    pub fn new(config: ReviewConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            pending: Vec::new(),
            cursor: Cursor::new(),
            registry: ProviderRegistry::default(),
            search_term: String::new(),
            in_flight: None,
            load_error: None,
        }
    }

    /// A session loaded directly from a batch.
    pub fn from_batch(config: ReviewConfig, batch: Batch) -> Self {
        let mut session = Self::new(config);
        session.apply_batch(batch);
        session
    }

    /// Leave the loading phase with the result of the initial fetch.
    ///
    /// A failed fetch leaves an empty session that remembers the error
    /// message. May only be called once.
    pub fn finish_loading(
        &mut self,
        outcome: Result<Batch, ReviewError>,
    ) -> Result<Phase, ReviewError> {
        if self.phase != Phase::Loading {
            return Err(ReviewError::AlreadyLoaded);
        }
        match outcome {
            Ok(batch) => self.apply_batch(batch),
            Err(e) => {
                warn!(error = %e, "initial fetch failed");
                self.load_error = Some(e.to_string());
                self.phase = Phase::Empty;
            }
        }
        Ok(self.phase)
    }

    fn apply_batch(&mut self, batch: Batch) {
        info!(
            invoices = batch.invoices.len(),
            providers = batch.providers.len(),
            "review session loaded"
        );
        self.pending = batch.invoices;
        self.registry = ProviderRegistry::new(batch.providers);
        self.cursor = Cursor::new();
        self.phase = if self.pending.is_empty() {
            Phase::Empty
        } else {
            Phase::Reviewing
        };
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> &[InvoiceRecord] {
        &self.pending
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Index of the displayed record, if any.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Reviewing => Some(self.cursor.index()),
            _ => None,
        }
    }

    /// The displayed record, if any.
    pub fn current(&self) -> Option<&InvoiceRecord> {
        self.current_index().and_then(|i| self.pending.get(i))
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Lifecycle state of a pending record; `None` if it is not pending.
    pub fn record_state(&self, id: &RecordId) -> Option<RecordState> {
        if !self.pending.iter().any(|r| &r.id == id) {
            return None;
        }
        if self.in_flight.as_ref() == Some(id) {
            Some(RecordState::Submitting)
        } else {
            Some(RecordState::Pending)
        }
    }

    // --- navigation ---

    /// Show the next record. No-op at the last record, outside
    /// [`Phase::Reviewing`], or while a submission is in flight.
    pub fn advance(&mut self) -> Option<usize> {
        if self.phase == Phase::Reviewing && self.in_flight.is_none() {
            let index = self.cursor.advance(self.pending.len());
            debug!(index, "advance");
        }
        self.current_index()
    }

    /// Show the previous record. No-op at the first record, outside
    /// [`Phase::Reviewing`], or while a submission is in flight.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.phase == Phase::Reviewing && self.in_flight.is_none() {
            let index = self.cursor.retreat();
            debug!(index, "retreat");
        }
        self.current_index()
    }

    /// Drop the displayed record from the pending collection.
    ///
    /// The cursor stays on the same index (now the following record) unless
    /// the removed record was the last one. Removing the only remaining
    /// record completes the session.
    pub fn remove_current(&mut self) -> Result<InvoiceRecord, ReviewError> {
        self.ensure_idle()?;
        self.remove_at_cursor()
    }

    fn remove_at_cursor(&mut self) -> Result<InvoiceRecord, ReviewError> {
        let index = self.current_index().ok_or(ReviewError::NoCurrentRecord)?;
        if index >= self.pending.len() {
            return Err(ReviewError::NoCurrentRecord);
        }
        let removed = self.pending.remove(index);
        match self.cursor.clamp(self.pending.len()) {
            Some(next) => debug!(removed = %removed.id, next, "record removed"),
            None => {
                info!(removed = %removed.id, "all records processed");
                self.phase = Phase::Completed;
            }
        }
        Ok(removed)
    }

    // --- editing ---

    fn ensure_idle(&self) -> Result<(), ReviewError> {
        match &self.in_flight {
            Some(id) => Err(ReviewError::SubmissionInFlight(id.clone())),
            None => Ok(()),
        }
    }

    fn editable(&mut self) -> Result<&mut InvoiceRecord, ReviewError> {
        self.ensure_idle()?;
        let index = self.current_index().ok_or(ReviewError::NoCurrentRecord)?;
        self.pending
            .get_mut(index)
            .ok_or(ReviewError::NoCurrentRecord)
    }

    /// Overwrite a field of the displayed record with operator text.
    pub fn edit_field(&mut self, field: FieldName, raw: &str) -> Result<(), ReviewError> {
        let record = self.editable()?;
        record.set(field, raw);
        debug!(record = %record.id, field = field.key(), "field edited");
        Ok(())
    }

    // --- provider resolution ---

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Providers matching the active search term.
    pub fn search_results(&self) -> Vec<&Provider> {
        self.registry.search(&self.search_term)
    }

    /// Copy the provider the operator picked onto the displayed record and
    /// clear the search term. Nothing changes if the record cannot be edited.
    pub fn select_provider(&mut self, provider: &Provider) -> Result<(), ReviewError> {
        let record = self.editable()?;
        registry::select(record, provider);
        self.search_term.clear();
        Ok(())
    }

    /// Select the hit at `position` in [`search_results`](Self::search_results).
    pub fn select_search_result(&mut self, position: usize) -> Result<(), ReviewError> {
        let provider = self
            .search_results()
            .get(position)
            .map(|p| (*p).clone())
            .ok_or(ReviewError::NoSuchSearchResult(position))?;
        self.select_provider(&provider)
    }

    // --- derived values ---

    /// Rates of the displayed record.
    pub fn derived(&self) -> Option<DerivedRates> {
        self.current().map(|r| derive_rates(r, &self.config))
    }

    /// Gate report of the displayed record; blocked when there is none.
    pub fn gate(&self) -> GateReport {
        evaluate_current(self.current(), &self.config)
    }

    /// Whether [`begin_submission`](Self::begin_submission) would succeed.
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && self.gate().submittable()
    }

    pub fn view(&self) -> ReviewView<'_> {
        ReviewView {
            phase: self.phase,
            record: self.current(),
            position: self.current_index(),
            pending: self.pending.len(),
            derived: self.derived(),
            gate: self.gate(),
            submitting: self.is_submitting(),
            search_term: &self.search_term,
            search_results: self.search_results(),
            load_error: self.load_error(),
        }
    }

    // --- submission ---

    /// Lock the displayed record for submission.
    ///
    /// Fails if there is no record, a submission is already in flight, or
    /// the record does not pass the gate.
    pub fn begin_submission(&mut self) -> Result<Submission, ReviewError> {
        self.ensure_idle()?;
        let record = self.current().ok_or(ReviewError::NoCurrentRecord)?;
        let report = evaluate_current(Some(record), &self.config);
        if !report.submittable() {
            return Err(ReviewError::Rejected(report.violations()));
        }
        let submission = Submission::new(record.clone());
        info!(record = %submission.record_id, "submission started");
        self.in_flight = Some(submission.record_id.clone());
        Ok(submission)
    }

    /// Apply the sink's answer to a submission in flight.
    ///
    /// On success the record is removed; on failure it stays pending and
    /// editable.
    pub fn complete_submission(
        &mut self,
        submission: &Submission,
        outcome: Result<(), String>,
    ) -> Result<SubmissionOutcome, ReviewError> {
        if self.in_flight.as_ref() != Some(&submission.record_id) {
            return Err(ReviewError::UnknownSubmission(submission.record_id.clone()));
        }
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                let elapsed = chrono::Utc::now() - submission.started_at;
                info!(
                    record = %submission.record_id,
                    elapsed_ms = elapsed.num_milliseconds(),
                    "submission committed"
                );
                self.remove_at_cursor().map(SubmissionOutcome::Committed)
            }
            Err(message) => {
                warn!(record = %submission.record_id, %message, "submission failed");
                Ok(SubmissionOutcome::Failed {
                    record_id: submission.record_id.clone(),
                    message,
                })
            }
        }
    }

    /// Release a submission whose outcome will never arrive, for example
    /// because the sink call was cancelled. The record stays pending and
    /// editable at its position.
    pub fn abort_submission(&mut self, submission: &Submission) -> Result<(), ReviewError> {
        if self.in_flight.as_ref() != Some(&submission.record_id) {
            return Err(ReviewError::UnknownSubmission(submission.record_id.clone()));
        }
        self.in_flight = None;
        warn!(record = %submission.record_id, "submission abandoned");
        Ok(())
    }
}
