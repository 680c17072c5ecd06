//! Transfer Workflow
//!
//! Drives a single transfer through Form → Confirmation → Receipt.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use super::error::TransferError;
use super::state::TransferState;
use super::submitter::TransferSubmitter;
use super::types::{OpResult, Party, Receipt, ReceiptId, TransferDraft, TransferSummary};
use crate::account::{Account, AccountId};
use crate::config::TransferConfig;
use crate::history::{Transaction, TransactionKind, TransactionLog, TransactionStatus};
use crate::money::parse_amount;
use crate::session::SessionContext;

#[derive(Debug, Default)]
struct WorkflowInner {
    /// Account the workflow was started by
    owner: Option<AccountId>,
    state: TransferState,
    draft: TransferDraft,
    summary: Option<TransferSummary>,
    receipt: Option<Receipt>,
}

impl WorkflowInner {
    /// Reject `self.state → next` unless the transition table allows it
    fn check_step(&self, next: TransferState, action: &'static str) -> Result<(), TransferError> {
        if !self.state.can_transition_to(next) {
            return Err(TransferError::InvalidStateTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    fn check_editable(&self, action: &'static str) -> Result<(), TransferError> {
        if !self.state.is_editable() {
            return Err(TransferError::InvalidStateTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    /// The workflow must still belong to the logged-in account
    fn check_session(&self, discarded: bool) -> Result<(), TransferError> {
        if self.owner.is_none() {
            return Err(TransferError::NotAuthenticated);
        }
        if discarded {
            return Err(TransferError::SessionChanged);
        }
        Ok(())
    }
}

/// Clears the in-flight flag when `confirm()` returns, on every path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Transfer Workflow - one instance per transfer screen
///
/// The workflow belongs to the account that was logged in when it was
/// first touched. After a logout or a switch to another account, any
/// draft, pending confirmation or receipt is discarded.
pub struct TransferWorkflow {
    session: Arc<SessionContext>,
    ledger: Arc<TransactionLog>,
    submitter: Arc<dyn TransferSubmitter>,
    credit_receiver: bool,
    inner: Mutex<WorkflowInner>,
    in_flight: AtomicBool,
}

impl TransferWorkflow {
    pub fn new(
        session: Arc<SessionContext>,
        ledger: Arc<TransactionLog>,
        submitter: Arc<dyn TransferSubmitter>,
        config: &TransferConfig,
    ) -> Self {
        Self {
            session,
            ledger,
            submitter,
            credit_receiver: config.credit_receiver,
            inner: Mutex::new(WorkflowInner::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> TransferState {
        self.lock().await.0.state
    }

    pub async fn draft(&self) -> TransferDraft {
        self.lock().await.0.draft.clone()
    }

    /// Summary awaiting confirmation (also kept while the receipt is shown)
    pub async fn summary(&self) -> Option<TransferSummary> {
        self.lock().await.0.summary.clone()
    }

    pub async fn receipt(&self) -> Option<Receipt> {
        self.lock().await.0.receipt.clone()
    }

    /// True while a confirmed transfer is being submitted
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Every account except the sender
    pub async fn eligible_receivers(&self) -> Result<Vec<Account>, TransferError> {
        let sender = self.sender().await?;
        let accounts = self.session.accounts().list().await;
        Ok(accounts.into_iter().filter(|a| a.id != sender.id).collect())
    }

    pub async fn select_receiver(&self, receiver_id: &AccountId) -> Result<(), TransferError> {
        let sender = self.sender().await?;
        let (mut inner, _) = self.lock().await;
        inner.check_editable("select a receiver")?;

        if receiver_id == &sender.id {
            return Err(TransferError::SameAccount);
        }
        if self.session.accounts().get_by_id(receiver_id).await.is_none() {
            return Err(TransferError::ReceiverNotFound(receiver_id.clone()));
        }

        inner.draft.receiver_id = Some(receiver_id.clone());
        Ok(())
    }

    /// Store the amount text as typed. Parsed on `submit()`.
    pub async fn set_amount(&self, amount: &str) -> Result<(), TransferError> {
        let (mut inner, _) = self.lock().await;
        inner.check_editable("edit the amount")?;
        inner.draft.amount = amount.to_string();
        Ok(())
    }

    pub async fn set_note(&self, note: &str) -> Result<(), TransferError> {
        let (mut inner, _) = self.lock().await;
        inner.check_editable("edit the note")?;
        inner.draft.note = note.to_string();
        Ok(())
    }

    /// Validate the draft and move to Confirmation.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// amount, funds, receiver selected, receiver differs, receiver exists.
    /// On failure the workflow stays in Form with the draft intact.
    pub async fn submit(&self) -> Result<TransferSummary, TransferError> {
        let sender = self.sender().await?;
        let (mut inner, _) = self.lock().await;
        inner.check_step(TransferState::Confirmation, "submit")?;

        let summary = match self.validate(&sender, &inner.draft).await {
            Ok(summary) => summary,
            Err(e) => {
                debug!(code = e.code(), "Transfer form rejected");
                return Err(e);
            }
        };

        inner.summary = Some(summary.clone());
        inner.state = TransferState::Confirmation;
        debug!(
            receiver = %summary.receiver.id,
            amount = %summary.amount,
            "Transfer awaiting confirmation"
        );
        Ok(summary)
    }

    /// Return to the form with every entered value preserved
    pub async fn back(&self) -> Result<(), TransferError> {
        if self.is_in_flight() {
            return Err(TransferError::InFlight);
        }
        let (mut inner, discarded) = self.lock().await;
        inner.check_session(discarded)?;
        inner.check_step(TransferState::Form, "go back")?;
        inner.state = TransferState::Form;
        inner.summary = None;
        Ok(())
    }

    /// Submit the confirmed transfer and debit the sender.
    ///
    /// Only one call can be in flight; a concurrent call returns
    /// [`TransferError::InFlight`] without side effects. The balance is
    /// written only after the submitter reports success, and only if the
    /// workflow was neither reset nor taken over by another session while
    /// waiting.
    pub async fn confirm(&self) -> Result<Receipt, TransferError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(TransferError::InFlight)?;

        let summary = {
            let (inner, discarded) = self.lock().await;
            inner.check_session(discarded)?;
            inner.check_step(TransferState::Receipt, "confirm")?;
            inner
                .summary
                .clone()
                .ok_or(TransferError::InvalidStateTransition {
                    state: inner.state,
                    action: "confirm",
                })?
        };

        info!(
            submitter = self.submitter.name(),
            sender = %summary.sender.id,
            receiver = %summary.receiver.id,
            amount = %summary.amount,
            "Submitting transfer"
        );

        if let OpResult::Failed(reason) = self.submitter.submit(&summary).await {
            warn!(
                submitter = self.submitter.name(),
                reason = %reason,
                "Transfer submission failed"
            );
            return Err(TransferError::SubmissionFailed(reason));
        }

        let (mut inner, discarded) = self.lock().await;
        inner.check_session(discarded)?;
        if inner.summary.as_ref() != Some(&summary) {
            warn!(state = %inner.state, "Transfer abandoned during submission");
            return Err(TransferError::InvalidStateTransition {
                state: inner.state,
                action: "confirm",
            });
        }
        inner.check_step(TransferState::Receipt, "confirm")?;

        // Balance may have moved since submit()
        let available = self
            .session
            .balance_of(&summary.sender.id)
            .await
            .ok_or(TransferError::NotAuthenticated)?;
        if summary.amount > available {
            return Err(TransferError::InsufficientFunds {
                available,
                requested: summary.amount,
            });
        }

        let new_balance = available - summary.amount;
        self.session
            .update_balance(&summary.sender.id, new_balance)
            .await;

        if self.credit_receiver
            && let Some(balance) = self.session.balance_of(&summary.receiver.id).await
        {
            self.session
                .update_balance(&summary.receiver.id, balance + summary.amount)
                .await;
        }

        let receipt = Receipt {
            receipt_id: ReceiptId::new(),
            sender: summary.sender.clone(),
            receiver: summary.receiver.clone(),
            amount: summary.amount,
            note: summary.note.clone(),
            new_balance,
            completed_at: Utc::now(),
        };
        self.record(&receipt).await;

        inner.state = TransferState::Receipt;
        inner.receipt = Some(receipt.clone());
        info!(
            receipt_id = %receipt.receipt_id,
            new_balance = %receipt.new_balance,
            "Transfer completed"
        );
        Ok(receipt)
    }

    /// Discard everything and return to an empty form. Never touches balances.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        let previous = inner.state;
        *inner = WorkflowInner::default();
        debug!(from = %previous, "Transfer workflow reset");
    }

    /// Lock the workflow on behalf of the logged-in account.
    ///
    /// A workflow owned by another account, or left over from before a
    /// logout, is discarded first; the flag reports whether that happened.
    async fn lock(&self) -> (MutexGuard<'_, WorkflowInner>, bool) {
        let current = self.session.current().await.map(|a| a.id);
        let mut inner = self.inner.lock().await;

        let discarded = inner.owner.is_some() && inner.owner != current;
        if discarded {
            warn!(
                previous = ?inner.owner,
                state = %inner.state,
                "Session changed, discarding transfer"
            );
            *inner = WorkflowInner::default();
        }
        inner.owner = current;
        (inner, discarded)
    }

    async fn sender(&self) -> Result<Account, TransferError> {
        self.session
            .require_current()
            .await
            .map_err(|_| TransferError::NotAuthenticated)
    }

    async fn validate(
        &self,
        sender: &Account,
        draft: &TransferDraft,
    ) -> Result<TransferSummary, TransferError> {
        let amount = parse_amount(&draft.amount).map_err(|_| TransferError::InvalidAmount)?;

        let available = self
            .session
            .balance_of(&sender.id)
            .await
            .unwrap_or(sender.balance);
        if amount > available {
            return Err(TransferError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        let receiver_id = draft
            .receiver_id
            .as_ref()
            .ok_or(TransferError::ReceiverMissing)?;
        if receiver_id == &sender.id {
            return Err(TransferError::SameAccount);
        }
        let receiver = self
            .session
            .accounts()
            .get_by_id(receiver_id)
            .await
            .ok_or_else(|| TransferError::ReceiverNotFound(receiver_id.clone()))?;

        Ok(TransferSummary {
            sender: Party::from(sender),
            receiver: Party::from(&receiver),
            amount,
            note: draft.note(),
            resulting_balance: available - amount,
        })
    }

    async fn record(&self, receipt: &Receipt) {
        let date = receipt.completed_at.date_naive();
        let debit_description = receipt
            .note
            .clone()
            .unwrap_or_else(|| format!("Transfer to {}", receipt.receiver.name));

        self.ledger
            .append(Transaction {
                id: receipt.receipt_id.to_string(),
                account_id: receipt.sender.id.clone(),
                account_name: receipt.sender.name.clone(),
                kind: TransactionKind::Debit,
                amount: receipt.amount,
                description: debit_description,
                date,
                counterparty: Some(receipt.receiver.name.clone()),
                status: TransactionStatus::Completed,
            })
            .await;

        if self.credit_receiver {
            self.ledger
                .append(Transaction {
                    id: format!("{}-CR", receipt.receipt_id),
                    account_id: receipt.receiver.id.clone(),
                    account_name: receipt.receiver.name.clone(),
                    kind: TransactionKind::Credit,
                    amount: receipt.amount,
                    description: format!("Transfer from {}", receipt.sender.name),
                    date,
                    counterparty: Some(receipt.sender.name.clone()),
                    status: TransactionStatus::Completed,
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::InMemoryAccountRepository;
    use crate::config::AuthConfig;
    use crate::session::MemorySessionStore;
    use crate::transfer::submitter::mock::MockSubmitter;
    use rust_decimal::Decimal;

    struct Fixture {
        workflow: Arc<TransferWorkflow>,
        session: Arc<SessionContext>,
        ledger: Arc<TransactionLog>,
        submitter: Arc<MockSubmitter>,
    }

    async fn fixture_with(email: &str, submitter: MockSubmitter, credit_receiver: bool) -> Fixture {
        let session = Arc::new(SessionContext::new(
            Arc::new(InMemoryAccountRepository::seeded()),
            Arc::new(MemorySessionStore::new()),
            &AuthConfig::default(),
        ));
        session.login(email, "password").await.unwrap();

        let ledger = Arc::new(TransactionLog::new());
        let submitter = Arc::new(submitter);
        let config = TransferConfig {
            simulated_delay_ms: 0,
            credit_receiver,
        };
        let workflow = Arc::new(TransferWorkflow::new(
            session.clone(),
            ledger.clone(),
            submitter.clone(),
            &config,
        ));
        Fixture {
            workflow,
            session,
            ledger,
            submitter,
        }
    }

    async fn fixture(email: &str) -> Fixture {
        fixture_with(email, MockSubmitter::new(), false).await
    }

    async fn fill(workflow: &TransferWorkflow, receiver: &str, amount: &str) {
        workflow.select_receiver(&AccountId::from(receiver)).await.unwrap();
        workflow.set_amount(amount).await.unwrap();
    }

    #[tokio::test]
    async fn test_happy_path_debits_once() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.set_note("Lunch").await.unwrap();

        let summary = f.workflow.submit().await.unwrap();
        assert_eq!(summary.resulting_balance, Decimal::from(48000));
        assert_eq!(summary.receiver.name, "Bob Johnson");
        assert_eq!(f.workflow.state().await, TransferState::Confirmation);
        // Nothing applied before confirmation
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );

        let receipt = f.workflow.confirm().await.unwrap();
        assert_eq!(receipt.new_balance, Decimal::from(48000));
        assert_eq!(receipt.note.as_deref(), Some("Lunch"));
        assert_eq!(f.workflow.state().await, TransferState::Receipt);
        assert_eq!(
            f.session.current().await.unwrap().balance,
            Decimal::from(48000)
        );
        // Receiver untouched by default
        assert_eq!(
            f.session.balance_of(&AccountId::from("3")).await,
            Some(Decimal::from(15000))
        );

        let history = f.ledger.all().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::Debit);
        assert_eq!(history[0].id, receipt.receipt_id.to_string());

        // Terminal: confirming again is rejected and changes nothing
        let err = f.workflow.confirm().await.unwrap_err();
        assert!(matches!(err, TransferError::InvalidStateTransition { .. }));
        assert_eq!(f.submitter.submit_count(), 1);
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(48000))
        );
    }

    #[tokio::test]
    async fn test_insufficient_funds() {
        let f = fixture("jane@example.com").await;
        fill(&f.workflow, "3", "100").await;

        let err = f.workflow.submit().await.unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientFunds {
                available: Decimal::from(75),
                requested: Decimal::from(100),
            }
        );
        assert_eq!(f.workflow.state().await, TransferState::Form);
        assert_eq!(f.workflow.draft().await.amount, "100");
    }

    #[tokio::test]
    async fn test_invalid_amounts() {
        let f = fixture("admin@bank.com").await;
        f.workflow.select_receiver(&AccountId::from("2")).await.unwrap();

        for amount in ["0", "-5", "", "abc", "1.234"] {
            f.workflow.set_amount(amount).await.unwrap();
            assert_eq!(
                f.workflow.submit().await.unwrap_err(),
                TransferError::InvalidAmount,
                "amount {:?}",
                amount
            );
        }
        assert_eq!(f.workflow.state().await, TransferState::Form);
    }

    #[tokio::test]
    async fn test_validation_order() {
        let f = fixture("admin@bank.com").await;

        // Amount is checked before the receiver
        assert_eq!(
            f.workflow.submit().await.unwrap_err(),
            TransferError::InvalidAmount
        );

        f.workflow.set_amount("10").await.unwrap();
        assert_eq!(
            f.workflow.submit().await.unwrap_err(),
            TransferError::ReceiverMissing
        );

        assert_eq!(
            f.workflow
                .select_receiver(&AccountId::from("1"))
                .await
                .unwrap_err(),
            TransferError::SameAccount
        );
        assert_eq!(
            f.workflow
                .select_receiver(&AccountId::from("99"))
                .await
                .unwrap_err(),
            TransferError::ReceiverNotFound(AccountId::from("99"))
        );
    }

    #[tokio::test]
    async fn test_requires_session() {
        let f = fixture("admin@bank.com").await;
        f.session.logout().await;

        assert_eq!(
            f.workflow.submit().await.unwrap_err(),
            TransferError::NotAuthenticated
        );
        assert_eq!(
            f.workflow.eligible_receivers().await.unwrap_err(),
            TransferError::NotAuthenticated
        );
    }

    #[tokio::test]
    async fn test_eligible_receivers_exclude_sender() {
        let f = fixture("bob@example.com").await;
        let receivers = f.workflow.eligible_receivers().await.unwrap();
        let ids: Vec<&str> = receivers.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[tokio::test]
    async fn test_back_preserves_draft() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "2", "250.50").await;
        f.workflow.set_note("rent").await.unwrap();
        f.workflow.submit().await.unwrap();

        f.workflow.back().await.unwrap();
        assert_eq!(f.workflow.state().await, TransferState::Form);
        assert_eq!(f.workflow.summary().await, None);

        let draft = f.workflow.draft().await;
        assert_eq!(draft.receiver_id, Some(AccountId::from("2")));
        assert_eq!(draft.amount, "250.50");
        assert_eq!(draft.note, "rent");

        // Editing is allowed again, but not from Confirmation
        f.workflow.submit().await.unwrap();
        assert!(f.workflow.set_amount("1").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_never_mutates_balance() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        f.workflow.reset().await;
        assert_eq!(f.workflow.state().await, TransferState::Form);
        assert_eq!(f.workflow.draft().await, TransferDraft::default());
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );
        assert!(f.ledger.is_empty().await);
        assert_eq!(f.submitter.submit_count(), 0);
    }

    #[tokio::test]
    async fn test_submission_failure_keeps_confirmation() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        f.submitter.set_fail(Some("network down"));
        let err = f.workflow.confirm().await.unwrap_err();
        assert_eq!(err, TransferError::SubmissionFailed("network down".to_string()));
        assert_eq!(f.workflow.state().await, TransferState::Confirmation);
        assert!(!f.workflow.is_in_flight());
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );

        // Retry succeeds
        f.submitter.set_fail(None);
        let receipt = f.workflow.confirm().await.unwrap();
        assert_eq!(receipt.new_balance, Decimal::from(48000));
    }

    #[tokio::test]
    async fn test_concurrent_confirm_rejected() {
        let f = fixture_with("admin@bank.com", MockSubmitter::gated(), false).await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        let workflow = f.workflow.clone();
        let first = tokio::spawn(async move { workflow.confirm().await });

        while f.submitter.submit_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(f.workflow.is_in_flight());
        assert_eq!(
            f.workflow.confirm().await.unwrap_err(),
            TransferError::InFlight
        );
        assert_eq!(f.workflow.back().await.unwrap_err(), TransferError::InFlight);

        f.submitter.release();
        let receipt = first.await.unwrap().unwrap();
        assert_eq!(receipt.new_balance, Decimal::from(48000));
        assert_eq!(f.submitter.submit_count(), 1);
        assert_eq!(f.ledger.len().await, 1);
        assert!(!f.workflow.is_in_flight());
    }

    #[tokio::test]
    async fn test_reset_during_submission_discards_transfer() {
        let f = fixture_with("admin@bank.com", MockSubmitter::gated(), false).await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        let workflow = f.workflow.clone();
        let first = tokio::spawn(async move { workflow.confirm().await });
        while f.submitter.submit_count() == 0 {
            tokio::task::yield_now().await;
        }

        f.workflow.reset().await;
        f.submitter.release();

        let err = first.await.unwrap().unwrap_err();
        assert!(matches!(err, TransferError::InvalidStateTransition { .. }));
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );
        assert!(f.ledger.is_empty().await);
    }

    #[tokio::test]
    async fn test_balance_drop_before_confirm() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        f.session
            .update_balance(&AccountId::from("1"), Decimal::from(500))
            .await;

        let err = f.workflow.confirm().await.unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientFunds {
                available: Decimal::from(500),
                requested: Decimal::from(2000),
            }
        );
        assert_eq!(f.workflow.state().await, TransferState::Confirmation);
        assert!(f.workflow.summary().await.is_some());
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(500))
        );
        assert!(f.ledger.is_empty().await);

        // Going back keeps the draft for a smaller amount
        f.workflow.back().await.unwrap();
        assert_eq!(f.workflow.draft().await.amount, "2000");
    }

    #[tokio::test]
    async fn test_confirm_after_logout_is_rejected() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        f.session.logout().await;
        assert_eq!(
            f.workflow.confirm().await.unwrap_err(),
            TransferError::NotAuthenticated
        );
        assert_eq!(f.submitter.submit_count(), 0);
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );
        assert!(f.ledger.is_empty().await);
        assert_eq!(f.workflow.state().await, TransferState::Form);
        assert!(f.workflow.receipt().await.is_none());
    }

    #[tokio::test]
    async fn test_confirm_after_session_switch_is_rejected() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.set_note("Lunch").await.unwrap();
        f.workflow.submit().await.unwrap();

        f.session.login("jane@example.com", "password").await.unwrap();
        assert_eq!(
            f.workflow.confirm().await.unwrap_err(),
            TransferError::SessionChanged
        );
        assert_eq!(f.submitter.submit_count(), 0);
        for (id, balance) in [("1", 50000), ("2", 75), ("3", 15000)] {
            assert_eq!(
                f.session.balance_of(&AccountId::from(id)).await,
                Some(Decimal::from(balance)),
                "account {}",
                id
            );
        }
        assert!(f.ledger.is_empty().await);

        // Jane starts from an empty form
        assert_eq!(f.workflow.state().await, TransferState::Form);
        assert_eq!(f.workflow.draft().await, TransferDraft::default());
        assert_eq!(f.workflow.summary().await, None);
    }

    #[tokio::test]
    async fn test_back_after_session_switch_is_rejected() {
        let f = fixture("admin@bank.com").await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        f.session.login("bob@example.com", "password").await.unwrap();
        assert_eq!(
            f.workflow.back().await.unwrap_err(),
            TransferError::SessionChanged
        );
        assert_eq!(f.workflow.draft().await, TransferDraft::default());
    }

    #[tokio::test]
    async fn test_logout_during_submission_discards_transfer() {
        let f = fixture_with("admin@bank.com", MockSubmitter::gated(), false).await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();

        let workflow = f.workflow.clone();
        let first = tokio::spawn(async move { workflow.confirm().await });
        while f.submitter.submit_count() == 0 {
            tokio::task::yield_now().await;
        }

        f.session.logout().await;
        f.submitter.release();

        assert_eq!(
            first.await.unwrap().unwrap_err(),
            TransferError::NotAuthenticated
        );
        assert_eq!(
            f.session.balance_of(&AccountId::from("1")).await,
            Some(Decimal::from(50000))
        );
        assert!(f.ledger.is_empty().await);
    }

    #[tokio::test]
    async fn test_steps_follow_transition_table() {
        let f = fixture("admin@bank.com").await;

        // Nothing to go back from or confirm in Form
        assert!(matches!(
            f.workflow.back().await.unwrap_err(),
            TransferError::InvalidStateTransition { action: "go back", .. }
        ));
        assert!(matches!(
            f.workflow.confirm().await.unwrap_err(),
            TransferError::InvalidStateTransition { action: "confirm", .. }
        ));

        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();
        assert!(matches!(
            f.workflow.submit().await.unwrap_err(),
            TransferError::InvalidStateTransition { action: "submit", .. }
        ));

        f.workflow.confirm().await.unwrap();
        assert!(matches!(
            f.workflow.back().await.unwrap_err(),
            TransferError::InvalidStateTransition { .. }
        ));
        assert!(f.workflow.set_note("late").await.is_err());
    }

    #[tokio::test]
    async fn test_credit_receiver_enabled() {
        let f = fixture_with("admin@bank.com", MockSubmitter::new(), true).await;
        fill(&f.workflow, "3", "2000").await;
        f.workflow.submit().await.unwrap();
        f.workflow.confirm().await.unwrap();

        assert_eq!(
            f.session.balance_of(&AccountId::from("3")).await,
            Some(Decimal::from(17000))
        );
        let bob = f.ledger.for_account(&AccountId::from("3")).await;
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].kind, TransactionKind::Credit);
        assert_eq!(bob[0].counterparty.as_deref(), Some("John Doe"));
    }
}
