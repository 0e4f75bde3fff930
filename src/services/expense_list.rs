//! Expense list controller
//!
//! Keeps a local copy of the user's expenses in sync with the server and
//! offers create, update and delete on it. The local list is a cache: it is
//! patched only after the server confirms a change, and a failed request
//! leaves it exactly as it was.
//!
//! State sits behind a mutex that is never held across a request. Each
//! operation registers a pending key (`Load`, `Create`, `Update(id)`,
//! `Delete(id)`) for its duration; triggering the same key again before the
//! first finishes fails with [`ExpenseError::Busy`] and sends nothing.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::confirm::Confirm;
use crate::api::ExpenseApi;
use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DraftField, Expense, ExpenseDraft, ExpenseId};

/// An operation that may be in flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingOp {
    Load,
    Create,
    Update(ExpenseId),
    Delete(ExpenseId),
}

impl fmt::Display for PendingOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Create => write!(f, "create"),
            Self::Update(id) => write!(f, "update of expense {}", id),
            Self::Delete(id) => write!(f, "delete of expense {}", id),
        }
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The server deleted the record and it was removed locally
    Deleted(Expense),
    /// The user declined; nothing was sent
    Cancelled,
}

#[derive(Debug, Default)]
struct ListState {
    expenses: Vec<Expense>,
    draft: ExpenseDraft,
    pending: HashSet<PendingOp>,
}

/// Removes its key from the pending set when dropped
struct PendingGuard<'a> {
    state: &'a Mutex<ListState>,
    op: PendingOp,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.pending.remove(&self.op);
    }
}

/// Local view of the user's expenses plus the add-form draft
pub struct ExpenseListController<A: ExpenseApi> {
    api: A,
    state: Mutex<ListState>,
    audit: Option<AuditLogger>,
}

impl<A: ExpenseApi> ExpenseListController<A> {
    /// Create a controller with an empty list
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(ListState::default()),
            audit: None,
        }
    }

    /// Record confirmed mutations in an activity log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The API this controller talks to
    pub fn api(&self) -> &A {
        &self.api
    }

    // ----- queries -----

    /// Snapshot of the list, in display order
    pub fn expenses(&self) -> Vec<Expense> {
        self.lock().expenses.clone()
    }

    /// Look up one expense by id
    pub fn get(&self, id: &ExpenseId) -> Option<Expense> {
        self.lock().expenses.iter().find(|e| &e.id == id).cloned()
    }

    /// Number of expenses held locally
    pub fn len(&self) -> usize {
        self.lock().expenses.len()
    }

    /// Check whether the local list is empty
    pub fn is_empty(&self) -> bool {
        self.lock().expenses.is_empty()
    }

    /// Check whether an operation is currently in flight
    pub fn is_pending(&self, op: &PendingOp) -> bool {
        self.lock().pending.contains(op)
    }

    // ----- draft -----

    /// Current add-form draft
    pub fn draft(&self) -> ExpenseDraft {
        self.lock().draft.clone()
    }

    /// Replace the add-form draft
    pub fn set_draft(&self, draft: ExpenseDraft) {
        self.lock().draft = draft;
    }

    /// Change one field of the add-form draft
    pub fn set_draft_field(&self, field: DraftField, value: impl Into<String>) {
        self.lock().draft.set(field, value);
    }

    // ----- operations -----

    /// Fetch the full list from the server, replacing the local copy
    ///
    /// Returns the number of expenses loaded. On failure the previous list
    /// is kept.
    pub fn load(&self) -> ExpenseResult<usize> {
        let _pending = self.begin(PendingOp::Load)?;

        let expenses = self.api.list().map_err(|e| report("load", e))?;
        let count = expenses.len();
        self.lock().expenses = expenses;

        info!(count, "expenses loaded");
        Ok(count)
    }

    /// Make `draft` the add-form draft and submit it
    pub fn create(&self, draft: ExpenseDraft) -> ExpenseResult<Expense> {
        self.set_draft(draft);
        self.submit_draft()
    }

    /// Submit the current add-form draft
    ///
    /// All four fields must be present; otherwise nothing is sent. On
    /// success the server's record is appended and the draft cleared. On
    /// failure the list and the draft are left as they were.
    pub fn submit_draft(&self) -> ExpenseResult<Expense> {
        let fields = self
            .lock()
            .draft
            .validate()
            .map_err(|e| report("create", e))?;

        let _pending = self.begin(PendingOp::Create)?;

        let created = self.api.create(&fields).map_err(|e| report("create", e))?;
        {
            let mut state = self.lock();
            state.expenses.push(created.clone());
            state.draft.clear();
        }

        info!(id = %created.id, "expense created");
        self.record(AuditEntry::create(&created));
        Ok(created)
    }

    /// Send a full replacement of expense `id` built from `form`
    ///
    /// The form is validated as a unit; every field is resent even if only
    /// one changed. On success the element is replaced in place.
    pub fn update(&self, id: &ExpenseId, form: &ExpenseDraft) -> ExpenseResult<Expense> {
        let fields = form.validate().map_err(|e| report("update", e))?;
        let before = self
            .get(id)
            .ok_or_else(|| report("update", ExpenseError::expense_not_found(id.as_str())))?;

        let _pending = self.begin(PendingOp::Update(id.clone()))?;

        let echoed = self
            .api
            .update(id, &fields)
            .map_err(|e| report("update", e))?;
        let updated = echoed.unwrap_or_else(|| Expense::from_fields(id.clone(), fields));

        {
            let mut state = self.lock();
            match state.expenses.iter_mut().find(|e| &e.id == id) {
                Some(slot) => *slot = updated.clone(),
                None => debug!(%id, "expense left the list while its update was in flight"),
            };
        }

        info!(%id, "expense updated");
        self.record(AuditEntry::update(&before, &updated));
        Ok(updated)
    }

    /// Delete expense `id` after the user confirms
    pub fn delete(&self, id: &ExpenseId, confirm: &dyn Confirm) -> ExpenseResult<Deletion> {
        let target = self
            .get(id)
            .ok_or_else(|| report("delete", ExpenseError::expense_not_found(id.as_str())))?;

        let _pending = self.begin(PendingOp::Delete(id.clone()))?;

        let prompt = format!("Are you sure you want to delete '{}'?", target.title);
        if !confirm.confirm(&prompt) {
            debug!(%id, "delete cancelled");
            return Ok(Deletion::Cancelled);
        }

        self.api.delete(id).map_err(|e| report("delete", e))?;

        let removed = {
            let mut state = self.lock();
            let index = state.expenses.iter().position(|e| &e.id == id);
            let removed = index.map(|index| state.expenses.remove(index));
            removed
        }
        .unwrap_or(target);

        info!(%id, "expense deleted");
        self.record(AuditEntry::delete(&removed));
        Ok(Deletion::Deleted(removed))
    }

    // ----- internals -----

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, op: PendingOp) -> ExpenseResult<PendingGuard<'_>> {
        let mut state = self.lock();
        if !state.pending.insert(op.clone()) {
            return Err(report(&op.to_string(), ExpenseError::Busy(op.to_string())));
        }
        Ok(PendingGuard {
            state: &self.state,
            op,
        })
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            // The server already accepted the change; a local log failure must not undo that
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write activity log");
            }
        }
    }
}

fn report(operation: &str, err: ExpenseError) -> ExpenseError {
    warn!(operation, kind = ?err.kind(), error = %err, "expense operation failed");
    err
}
