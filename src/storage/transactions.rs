//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::DuoError;
use crate::models::{CategoryId, MonthKey, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DuoError> {
    lock.read()
        .map_err(|e| DuoError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DuoError> {
    lock.write()
        .map_err(|e| DuoError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Newest date first; same-day entries newest-created first
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the index
    ///
    /// Fails if two stored transactions share an id; the cache is left
    /// untouched in that case.
    pub fn load(&self) -> Result<(), DuoError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut loaded = HashMap::with_capacity(file_data.transactions.len());
        let mut index: HashMap<CategoryId, Vec<TransactionId>> = HashMap::new();

        for txn in file_data.transactions {
            let id = txn.id;
            let category_id = txn.category_id;
            if loaded.insert(id, txn).is_some() {
                return Err(DuoError::Storage(format!(
                    "Duplicate transaction id {} in {}",
                    id,
                    self.path.display()
                )));
            }
            index.entry(category_id).or_default().push(id);
        }

        *write_lock(&self.data)? = loaded;
        *write_lock(&self.by_category)? = index;

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), DuoError> {
        let data = read_lock(&self.data)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, DuoError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, DuoError> {
        let mut transactions: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions for a category, newest first
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, DuoError> {
        let data = read_lock(&self.data)?;
        let by_category = read_lock(&self.by_category)?;

        let ids = by_category.get(&category_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions dated within a month, newest first
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>, DuoError> {
        let mut transactions: Vec<_> = read_lock(&self.data)?
            .values()
            .filter(|t| t.is_in_month(month))
            .cloned()
            .collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Find transactions whose ID starts with the given prefix
    ///
    /// Accepts the short form printed in listings (`txn-1a2b3c4d`).
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Transaction>, DuoError> {
        let prefix = prefix.trim();
        let prefix = prefix.strip_prefix("txn-").unwrap_or(prefix).to_lowercase();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        Ok(read_lock(&self.data)?
            .values()
            .filter(|t| t.id.as_uuid().to_string().starts_with(&prefix))
            .cloned()
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), DuoError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, DuoError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(ids) = by_category.get_mut(&txn.category_id) {
                    ids.retain(|&tid| tid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, DuoError> {
        Ok(read_lock(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Buyer, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    fn txn(m: u32, d: u32, cents: i64, category: u32) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            Money::from_cents(cents),
            CategoryId::new(category),
            Buyer::PartyA,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let t = txn(3, 22, 15000, 2);
        let id = t.id;

        repo.upsert(t).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 15000);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(3, 1, 100, 1)).unwrap();
        repo.upsert(txn(3, 22, 200, 1)).unwrap();
        repo.upsert(txn(2, 14, 300, 1)).unwrap();

        let amounts: Vec<i64> = repo.get_all().unwrap().iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![200, 100, 300]);
    }

    #[test]
    fn test_category_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        let mut t = txn(3, 5, 500, 1);
        let id = t.id;
        repo.upsert(t.clone()).unwrap();
        assert_eq!(repo.get_by_category(CategoryId::new(1)).unwrap().len(), 1);

        t.category_id = CategoryId::new(2);
        repo.upsert(t).unwrap();
        assert!(repo.get_by_category(CategoryId::new(1)).unwrap().is_empty());
        assert_eq!(repo.get_by_category(CategoryId::new(2)).unwrap()[0].id, id);

        assert!(repo.delete(id).unwrap());
        assert!(repo.get_by_category(CategoryId::new(2)).unwrap().is_empty());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_get_by_month() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(2, 29, 100, 1)).unwrap();
        repo.upsert(txn(3, 1, 200, 1)).unwrap();
        repo.upsert(txn(3, 31, 300, 1)).unwrap();
        repo.upsert(txn(4, 1, 400, 1)).unwrap();

        let march = repo.get_by_month(MonthKey::new(2024, 3).unwrap()).unwrap();
        let amounts: Vec<i64> = march.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![300, 200]);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let t = txn(3, 5, 500, 1);
        let short = t.id.short();
        let id = t.id;
        repo.upsert(t).unwrap();

        let found = repo.find_by_prefix(&short).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert!(repo.find_by_prefix("txn-").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let t = txn(3, 22, 15000, 2);
        let id = t.id;

        repo.upsert(t).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 15000);
        assert_eq!(repo2.get_by_category(CategoryId::new(2)).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected_on_load() {
        let (temp_dir, repo) = create_test_repo();
        let first = txn(3, 5, 500, 1);
        let mut second = txn(3, 6, 700, 2);
        second.id = first.id;

        let data = TransactionData {
            transactions: vec![first, second],
        };
        write_json_atomic(temp_dir.path().join("transactions.json"), &data).unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, DuoError::Storage(_)));
        assert_eq!(repo.count().unwrap(), 0);
    }
}
