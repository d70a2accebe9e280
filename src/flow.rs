use thiserror::Error;

use crate::draft::{validate, FieldErrors, MarketDraft};
use crate::notify::{NotificationId, Notifier, Status};
use crate::request::{build_request, BuildError};
use crate::submit::{submit, ContractWriter, PendingHandle, SubmitError};
use crate::wallet::WalletIdentity;

/// Errors from one pass through the create-market flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A previous submit has not settled yet. Mirrors the disabled submit
    /// control in the original form; cooperative exclusion, not a lock.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("invalid draft: {0}")]
    Validation(#[from] FieldErrors),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// One interactive market-creation session.
///
/// Owns the editable draft and a single in-flight flag; nothing here is
/// shared across sessions and nothing survives the session ending.
///
/// Per attempt: Idle -> Validating -> Building -> Submitting, then back to
/// Idle. Validation failures surface as field errors without touching the
/// notifier (they annotate the form inline); later stages report through
/// the notifier under one correlation id. Only success clears the draft.
#[derive(Debug, Default)]
pub struct CreateMarketFlow {
    draft: MarketDraft,
    in_flight: bool,
    next_notification: u64,
}

impl CreateMarketFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &MarketDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MarketDraft {
        &mut self.draft
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Run one submit attempt against the current draft.
    ///
    /// `now` is injected unix seconds. Every failure leaves the draft intact
    /// for correction; success resets it to empty.
    pub async fn submit_draft<I, W, N>(
        &mut self,
        now: i64,
        identity: &I,
        writer: &W,
        notifier: &N,
    ) -> Result<PendingHandle, FlowError>
    where
        I: WalletIdentity,
        W: ContractWriter,
        N: Notifier,
    {
        if self.in_flight {
            return Err(FlowError::SubmissionInFlight);
        }

        let validated = validate(&self.draft)?;

        let id = NotificationId(self.next_notification);
        self.next_notification += 1;
        notifier.notify(id, Status::Loading, "Preparing market creation...");

        let request = match build_request(&validated, now) {
            Ok(request) => request,
            Err(error) => {
                let message = match &error {
                    BuildError::InsufficientOutcomes(_) => {
                        "Please provide at least two outcomes.".to_string()
                    }
                    other => other.to_string(),
                };
                notifier.notify(id, Status::Error, &message);
                return Err(error.into());
            }
        };

        self.in_flight = true;
        let result = submit(&request, identity, writer).await;
        self.in_flight = false;

        match result {
            Ok(handle) => {
                notifier.notify(
                    id,
                    Status::Success,
                    "Market creation transaction submitted successfully!",
                );
                tracing::info!(tx = %handle.tx_hash, "market creation submitted");
                self.draft = MarketDraft::default();
                Ok(handle)
            }
            Err(SubmitError::NoWalletConnected) => {
                notifier.notify(id, Status::Error, "Please connect your wallet.");
                Err(SubmitError::NoWalletConnected.into())
            }
            Err(SubmitError::SubmitFailed(reason)) => {
                notifier.notify(
                    id,
                    Status::Error,
                    &format!("Error creating market: {reason}"),
                );
                Err(SubmitError::SubmitFailed(reason).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MarketCreationRequest;
    use crate::submit::WriteFailure;
    use crate::wallet::StaticIdentity;
    use alloy_primitives::{Address, B256};
    use std::sync::Mutex;

    const NOW: i64 = 1_700_000_000;

    fn flow_with_draft(draft: MarketDraft) -> CreateMarketFlow {
        let mut flow = CreateMarketFlow::new();
        *flow.draft_mut() = draft;
        flow
    }

    fn full_draft() -> MarketDraft {
        MarketDraft {
            template: "multiple_choice".to_string(),
            subject: "Who wins the cup?".to_string(),
            description: "Per the official final result.".to_string(),
            outcomes_raw: "Red, Blue, Green".to_string(),
        }
    }

    struct StubWriter {
        calls: Mutex<usize>,
        result: Result<PendingHandle, WriteFailure>,
    }

    impl StubWriter {
        fn returning(result: Result<PendingHandle, WriteFailure>) -> Self {
            Self {
                calls: Mutex::new(0),
                result,
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl ContractWriter for StubWriter {
        async fn write(
            &self,
            _function_name: &str,
            _request: &MarketCreationRequest,
        ) -> Result<PendingHandle, WriteFailure> {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<(NotificationId, Status, String)>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<(NotificationId, Status, String)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, id: NotificationId, status: Status, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((id, status, message.to_string()));
        }
    }

    fn handle() -> PendingHandle {
        PendingHandle {
            tx_hash: B256::repeat_byte(0xcd),
        }
    }

    fn connected() -> StaticIdentity {
        StaticIdentity::connected(Address::repeat_byte(0x33))
    }

    #[tokio::test]
    async fn test_happy_path_clears_draft() {
        let mut flow = flow_with_draft(full_draft());
        let writer = StubWriter::returning(Ok(handle()));
        let notifier = RecordingNotifier::default();

        let pending = flow
            .submit_draft(NOW, &connected(), &writer, &notifier)
            .await
            .unwrap();

        assert_eq!(pending, handle());
        assert_eq!(flow.draft(), &MarketDraft::default());
        assert!(!flow.is_in_flight());

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].1, Status::Loading);
        assert_eq!(events[1].1, Status::Success);
        // Both updates land on the same correlation id.
        assert_eq!(events[0].0, events[1].0);
    }

    #[tokio::test]
    async fn test_validation_failure_is_silent_and_keeps_draft() {
        let mut draft = full_draft();
        draft.subject = String::new();
        let mut flow = flow_with_draft(draft.clone());
        let writer = StubWriter::returning(Ok(handle()));
        let notifier = RecordingNotifier::default();

        let err = flow
            .submit_draft(NOW, &connected(), &writer, &notifier)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(flow.draft(), &draft);
        // Field errors annotate the form inline; no toast, no writer call.
        assert!(notifier.events().is_empty());
        assert_eq!(writer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_insufficient_outcomes_short_circuits() {
        let mut draft = full_draft();
        draft.outcomes_raw = "OnlyOne".to_string();
        let mut flow = flow_with_draft(draft.clone());
        let writer = StubWriter::returning(Ok(handle()));
        let notifier = RecordingNotifier::default();

        let err = flow
            .submit_draft(NOW, &connected(), &writer, &notifier)
            .await
            .unwrap_err();

        assert_eq!(err, FlowError::Build(BuildError::InsufficientOutcomes(1)));
        assert_eq!(flow.draft(), &draft);
        assert_eq!(writer.call_count(), 0);

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].1, Status::Error);
        assert_eq!(events[1].2, "Please provide at least two outcomes.");
    }

    #[tokio::test]
    async fn test_no_wallet_reports_error() {
        let mut flow = flow_with_draft(full_draft());
        let writer = StubWriter::returning(Ok(handle()));
        let notifier = RecordingNotifier::default();

        let err = flow
            .submit_draft(NOW, &StaticIdentity::disconnected(), &writer, &notifier)
            .await
            .unwrap_err();

        assert_eq!(err, FlowError::Submit(SubmitError::NoWalletConnected));
        assert_eq!(writer.call_count(), 0);

        let events = notifier.events();
        assert_eq!(events.last().unwrap().1, Status::Error);
        assert_eq!(events.last().unwrap().2, "Please connect your wallet.");
    }

    #[tokio::test]
    async fn test_writer_failure_keeps_draft_and_formats_reason() {
        let mut flow = flow_with_draft(full_draft());
        let writer = StubWriter::returning(Err(WriteFailure::short("execution reverted")));
        let notifier = RecordingNotifier::default();

        let err = flow
            .submit_draft(NOW, &connected(), &writer, &notifier)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FlowError::Submit(SubmitError::SubmitFailed("execution reverted".to_string()))
        );
        assert_eq!(flow.draft(), &full_draft());
        assert!(!flow.is_in_flight());

        let events = notifier.events();
        assert_eq!(
            events.last().unwrap().2,
            "Error creating market: execution reverted"
        );
    }

    #[tokio::test]
    async fn test_attempts_get_fresh_correlation_ids() {
        let mut flow = flow_with_draft(full_draft());
        let notifier = RecordingNotifier::default();

        let failing = StubWriter::returning(Err(WriteFailure::default()));
        let _ = flow
            .submit_draft(NOW, &connected(), &failing, &notifier)
            .await;

        let succeeding = StubWriter::returning(Ok(handle()));
        let _ = flow
            .submit_draft(NOW, &connected(), &succeeding, &notifier)
            .await;

        let events = notifier.events();
        assert_eq!(events.len(), 4);
        assert_ne!(events[0].0, events[2].0);
    }
}
