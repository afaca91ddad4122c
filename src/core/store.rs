use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigManager};
use crate::core::aggregation::{self, MonthSummary};
use crate::domain::{
    ensure_non_negative, ensure_storable, Expense, ExpenseId, ExpensePatch, MonthKey, NewExpense,
};
use crate::errors::{LuminaError, Result};
use crate::storage::{JsonFileStorage, KeyValueStorage};
use crate::utils::persistence::{self, StorageKeys};

/// Authoritative in-memory expense collection and salary.
///
/// Every accepted mutation is written through to storage before the method
/// returns. A failed write does not roll back memory: the error is logged,
/// kept in [`last_save_error`](Self::last_save_error), and the store stays
/// dirty until [`flush`](Self::flush) succeeds.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    salary: Decimal,
    currency: String,
    keys: StorageKeys,
    storage: Box<dyn KeyValueStorage>,
    dirty: bool,
    last_save_error: Option<String>,
}

impl ExpenseStore {
    /// Builds a store from whatever is persisted under the configured keys.
    /// Missing or unreadable entries start out empty; this never fails.
    pub fn load(storage: Box<dyn KeyValueStorage>, config: &Config) -> Self {
        let keys = config.storage_keys();
        let report = persistence::load_state(storage.as_ref(), &keys);
        info!(
            expenses = report.expenses.len(),
            salary = %report.salary,
            warnings = report.warnings.len(),
            "expense store loaded"
        );
        Self {
            expenses: report.expenses,
            salary: report.salary,
            currency: config.currency.clone(),
            keys,
            storage,
            dirty: false,
            last_save_error: None,
        }
    }

    /// Opens the store under the application directory, using its config file.
    pub fn open_default() -> Result<Self> {
        Self::open_with(ConfigManager::new()?)
    }

    pub fn open_with(manager: ConfigManager) -> Result<Self> {
        let config = manager.load()?;
        let storage = JsonFileStorage::new(config.resolve_data_dir(manager.base_dir()))?;
        Ok(Self::load(Box::new(storage), &config))
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_salary(&mut self, amount: Decimal) -> Result<()> {
        self.salary = ensure_non_negative(amount)?;
        debug!(salary = %self.salary, "salary updated");
        self.persist_salary();
        Ok(())
    }

    /// Validates and prepends a new expense, returning its generated id.
    pub fn add_expense(&mut self, fields: NewExpense) -> Result<ExpenseId> {
        validate_title(&fields.title)?;
        validate_amount(fields.amount)?;
        let expense = Expense::from_new(fields);
        let id = expense.id.clone();
        self.expenses.insert(0, expense);
        debug!(%id, "expense added");
        self.persist_expenses();
        Ok(id)
    }

    /// Removes the expense with `id`. Unknown ids are a no-op and return `false`.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| &expense.id != id);
        let removed = self.expenses.len() != before;
        debug!(%id, removed, "expense delete");
        self.persist_expenses();
        removed
    }

    /// Merges `patch` into the expense with `id`. Unknown ids return `Ok(false)`.
    pub fn edit_expense(&mut self, id: &ExpenseId, patch: ExpensePatch) -> Result<bool> {
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        let updated = match self.expenses.iter_mut().find(|expense| &expense.id == id) {
            Some(expense) => {
                expense.apply(patch);
                true
            }
            None => false,
        };
        debug!(%id, updated, "expense edit");
        self.persist_expenses();
        Ok(updated)
    }

    /// Deletes every expense dated in `month` and returns how many went.
    /// Callers own the confirmation step; this runs unconditionally.
    pub fn reset_month(&mut self, month: MonthKey) -> usize {
        let before = self.expenses.len();
        self.expenses.retain(|expense| !month.contains(expense.date));
        let removed = before - self.expenses.len();
        info!(%month, removed, "month reset");
        self.persist_expenses();
        removed
    }

    pub fn expenses_by_month(&self, month: MonthKey) -> Vec<&Expense> {
        aggregation::expenses_by_month(&self.expenses, month)
    }

    pub fn month_summary(&self, month: MonthKey) -> MonthSummary {
        MonthSummary::compute(&self.expenses, self.salary, month)
    }

    /// Whether some accepted mutation has not reached storage yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Writes both entries again, clearing the dirty flag on success.
    pub fn flush(&mut self) -> Result<()> {
        persistence::save_expenses(self.storage.as_ref(), &self.keys.expenses, &self.expenses)?;
        persistence::save_salary(self.storage.as_ref(), &self.keys.salary, self.salary)?;
        self.dirty = false;
        self.last_save_error = None;
        Ok(())
    }

    fn persist_expenses(&mut self) {
        let result =
            persistence::save_expenses(self.storage.as_ref(), &self.keys.expenses, &self.expenses);
        self.record_save(result);
    }

    fn persist_salary(&mut self) {
        let result =
            persistence::save_salary(self.storage.as_ref(), &self.keys.salary, self.salary);
        self.record_save(result);
    }

    fn record_save(&mut self, result: Result<()>) {
        match result {
            // A partial earlier failure may still be pending for the other key.
            Ok(()) if self.dirty => {}
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                warn!(error = %err, "persisting expense state failed; keeping in-memory changes");
                self.dirty = true;
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(LuminaError::EmptyTitle);
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<Decimal> {
    ensure_non_negative(amount).and_then(ensure_storable)
}
