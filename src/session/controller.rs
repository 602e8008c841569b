use serde_json::Value;
use tracing::{info, warn};

use super::{ReviewSession, Submission, SubmissionOutcome};
use crate::core::{ReviewConfig, ReviewError};
use crate::payload::Batch;

/// Upstream source of invoices and providers.
#[allow(async_fn_in_trait)]
pub trait InvoiceSource {
    /// Fetch every pending invoice plus the provider registry.
    async fn fetch(&self) -> Result<Batch, ReviewError>;
}

/// Downstream sink that commits a reviewed invoice.
#[allow(async_fn_in_trait)]
pub trait SubmissionSink {
    /// Commit one record. Any error leaves the record pending.
    async fn submit(&self, payload: &Value) -> Result<(), ReviewError>;
}

/// Owns one [`ReviewSession`] and sequences the two I/O calls around it.
///
/// At most one submission is in flight: [`submit_current`](Self::submit_current)
/// holds `&mut self` across the sink call.
pub struct Reviewer<S, K> {
    session: ReviewSession,
    source: S,
    sink: K,
}

impl<S: InvoiceSource, K: SubmissionSink> Reviewer<S, K> {
    /// Start a session and run the initial fetch.
    ///
    /// A failed fetch is not an error here: the session ends up
    /// [`Empty`](super::Phase::Empty) with the message in
    /// [`ReviewSession::load_error`].
    pub async fn open(source: S, sink: K, config: ReviewConfig) -> Self {
        let mut session = ReviewSession::new(config);
        let fetched = source.fetch().await;
        match session.finish_loading(fetched) {
            Ok(phase) => info!(?phase, "review session ready"),
            Err(e) => warn!(error = %e, "unexpected state after fetch"),
        }
        Self {
            session,
            source,
            sink,
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ReviewSession {
        &mut self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Gate, submit and resolve the displayed record.
    ///
    /// Errors are returned only when the submission could not start (no
    /// record, gate failure). A sink failure is reported as
    /// [`SubmissionOutcome::Failed`] and the record stays pending. If the
    /// returned future is dropped before the sink answers, the submission is
    /// aborted and the record stays pending.
    pub async fn submit_current(&mut self) -> Result<SubmissionOutcome, ReviewError> {
        let submission = self.session.begin_submission()?;
        let payload = submission.payload();
        let mut guard = InFlight {
            session: &mut self.session,
            submission,
            armed: true,
        };
        let result = self.sink.submit(&payload).await.map_err(|e| e.to_string());
        guard.armed = false;
        guard.session.complete_submission(&guard.submission, result)
    }

    pub fn into_session(self) -> ReviewSession {
        self.session
    }
}

/// Aborts the submission on drop unless its outcome was applied.
struct InFlight<'a> {
    session: &'a mut ReviewSession,
    submission: Submission,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(
                record = %self.submission.record_id,
                "submission cancelled before the sink answered"
            );
            let _ = self.session.abort_submission(&self.submission);
        }
    }
}
