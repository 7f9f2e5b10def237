//! Transaction service
//!
//! Entry, edit, delete and history queries for household transactions.
//! Every mutation is validated, saved immediately and written to the audit
//! log.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{DuoError, DuoResult};
use crate::models::{Buyer, CategoryId, Money, MonthKey, Transaction, TransactionId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transaction history
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: Option<MonthKey>,
    pub category_id: Option<CategoryId>,
    pub buyer: Option<Buyer>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn buyer(mut self, buyer: Buyer) -> Self {
        self.buyer = Some(buyer);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.month.map_or(true, |m| txn.is_in_month(m))
            && self.category_id.map_or(true, |c| txn.category_id == c)
            && self.buyer.map_or(true, |b| txn.buyer == b)
    }
}

/// Everything the entry form collects for one transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub amount: Money,
    pub category_id: CategoryId,
    pub buyer: Buyer,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CreateTransactionInput {
    /// Copy the editable fields of an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            amount: txn.amount,
            category_id: txn.category_id,
            buyer: txn.buyer,
            location: Some(txn.location.clone()),
            description: Some(txn.description.clone()),
        }
    }
}

fn audit_label(txn: &Transaction) -> Option<String> {
    Some(format!("{} {}", txn.date, txn.amount))
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_category_exists(&self, category_id: CategoryId) -> DuoResult<()> {
        self.storage
            .categories
            .get(category_id)?
            .map(|_| ())
            .ok_or_else(|| DuoError::category_not_found(category_id.to_string()))
    }

    fn apply_input(txn: &mut Transaction, input: CreateTransactionInput) {
        txn.date = input.date;
        txn.amount = input.amount;
        txn.category_id = input.category_id;
        txn.buyer = input.buyer;
        txn.location = input.location.map(|s| s.trim().to_string()).unwrap_or_default();
        txn.description = input
            .description
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
    }

    /// Record a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> DuoResult<Transaction> {
        self.ensure_category_exists(input.category_id)?;

        let mut txn = Transaction::new(input.date, input.amount, input.category_id, input.buyer);
        Self::apply_input(&mut txn, input);

        txn.validate()
            .map_err(|e| DuoError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_label(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    /// Replace every editable field of an existing transaction
    ///
    /// The id and creation time are kept.
    pub fn replace(&self, id: TransactionId, input: CreateTransactionInput) -> DuoResult<Transaction> {
        let before = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| DuoError::transaction_not_found(id.to_string()))?;

        self.ensure_category_exists(input.category_id)?;

        let mut txn = before.clone();
        Self::apply_input(&mut txn, input);
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| DuoError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_label(&txn),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction, returning what was removed
    pub fn delete(&self, id: TransactionId) -> DuoResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| DuoError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            audit_label(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> DuoResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID or a unique short prefix
    ///
    /// An ambiguous prefix is a validation error.
    pub fn find(&self, identifier: &str) -> DuoResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let mut matches = self.storage.transactions.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(DuoError::Validation(format!(
                "'{}' matches {} transactions; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Transaction history, newest first
    pub fn list(&self, filter: TransactionFilter) -> DuoResult<Vec<Transaction>> {
        let mut transactions = if let Some(category_id) = filter.category_id {
            self.storage.transactions.get_by_category(category_id)?
        } else if let Some(month) = filter.month {
            self.storage.transactions.get_by_month(month)?
        } else {
            self.storage.transactions.get_all()?
        };

        transactions.retain(|t| filter.matches(t));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// All transactions, for the reports
    pub fn all(&self) -> DuoResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn count(&self) -> DuoResult<usize> {
        self.storage.transactions.count()
    }
}
