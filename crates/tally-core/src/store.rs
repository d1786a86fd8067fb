//! In-memory transaction log with validated create/update/delete operations.

use std::{collections::HashSet, fmt, slice, sync::Arc};

use tally_domain::{Transaction, TransactionDraft, TransactionId, ValidationError};
use tracing::debug;

use crate::{time::Clock, CoreError};

/// Authoritative, ordered transaction log.
///
/// Insertion order is preserved; edits replace a transaction in place so its
/// position does not change.
#[derive(Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    clock: Arc<dyn Clock>,
}

impl TransactionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            transactions: Vec::new(),
            clock,
        }
    }

    /// Rebuilds a store from a persisted log, rejecting invalid records and duplicate ids.
    pub fn from_transactions(
        transactions: Vec<Transaction>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        check_log(&transactions)?;
        Ok(Self {
            transactions,
            clock,
        })
    }

    /// Validates and appends a new transaction, returning its identifier.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<TransactionId, CoreError> {
        draft.validate()?;
        let id = match draft.id {
            Some(id) if self.contains(id) => return Err(ValidationError::DuplicateId(id).into()),
            Some(id) => id,
            None => self.fresh_id(),
        };
        let date = draft.date.unwrap_or_else(|| self.clock.now());
        let transaction = Transaction {
            id,
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date,
        };
        debug!(%id, kind = %transaction.kind, amount = transaction.amount, "transaction added");
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Replaces every field of the transaction identified by `id`.
    ///
    /// The id never changes and the date is kept unless the draft carries one.
    pub fn update(
        &mut self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<&Transaction, CoreError> {
        draft.validate()?;
        if let Some(requested) = draft.id {
            if requested != id {
                return Err(CoreError::Validation(format!(
                    "cannot change transaction id from {id} to {requested}"
                )));
            }
        }
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::NotFound(id))?;
        txn.kind = draft.kind;
        txn.amount = draft.amount;
        txn.category = draft.category;
        txn.description = draft.description;
        if let Some(date) = draft.date {
            txn.date = date;
        }
        debug!(%id, amount = txn.amount, "transaction updated");
        Ok(&*txn)
    }

    /// Removes the transaction identified by `id`. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        debug!(%id, "transaction removed");
        Some(self.transactions.remove(index))
    }

    /// Iterates the log in insertion order. The iterator can be cloned and restarted freely.
    pub fn list(&self) -> slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Returns an owned copy of the log.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn fresh_id(&self) -> TransactionId {
        loop {
            let candidate = TransactionId::new();
            if !self.contains(candidate) {
                return candidate;
            }
        }
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .finish_non_exhaustive()
    }
}

fn check_log(transactions: &[Transaction]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in transactions {
        if !seen.insert(txn.id) {
            return Err(ValidationError::DuplicateId(txn.id));
        }
        TransactionDraft::new(
            txn.kind,
            txn.amount,
            txn.category.as_str(),
            txn.description.as_str(),
        )
        .validate()?;
    }
    Ok(())
}
