#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use chrono::NaiveDate;
use lumina_core::{
    config::{Config, ConfigManager},
    storage::{KeyValueStorage, MemoryStorage},
    Category, ExpenseStore, LuminaError, NewExpense,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application directory with a config manager rooted in it.
pub fn setup_test_env() -> (ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (manager, base)
}

pub fn memory_store() -> (ExpenseStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = ExpenseStore::load(Box::new(storage.clone()), &Config::default());
    (store, storage)
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub fn new_expense(title: &str, amount: Decimal, category: Category, day: &str) -> NewExpense {
    NewExpense::new(title, amount, category, date(day))
}

/// Storage whose writes can be switched to fail, standing in for a full disk.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LuminaError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LuminaError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LuminaError::Storage("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), LuminaError> {
        self.inner.remove(key)
    }
}
