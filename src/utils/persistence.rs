//! Reading and writing the persisted expense collection and salary.
//!
//! Two independent entries live in the key-value area: the expense list as a
//! JSON array and the salary as a plain numeric string. Loading is forgiving:
//! anything missing or malformed degrades to the empty default and is
//! reported as a warning instead of an error. Within the expense array each
//! record is decoded on its own, so one bad entry only costs that entry.

use std::{collections::HashSet, str::FromStr};

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::{
    domain::{amount_from_f64, ensure_non_negative, Expense},
    errors::{LuminaError, Result},
    storage::KeyValueStorage,
};

pub const DEFAULT_EXPENSES_KEY: &str = "lumina_expenses";
pub const DEFAULT_SALARY_KEY: &str = "lumina_salary";

/// Names of the two storage entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub expenses: String,
    pub salary: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            expenses: DEFAULT_EXPENSES_KEY.into(),
            salary: DEFAULT_SALARY_KEY.into(),
        }
    }
}

/// Outcome of a tolerant load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub expenses: Vec<Expense>,
    pub salary: Decimal,
    pub warnings: Vec<String>,
}

/// Expense records decoded from storage, plus one note per record skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedExpenses {
    pub expenses: Vec<Expense>,
    pub skipped: Vec<String>,
}

/// Loads both entries, falling back to an empty collection and zero salary.
pub fn load_state(storage: &dyn KeyValueStorage, keys: &StorageKeys) -> LoadReport {
    let mut report = LoadReport::default();

    match read_expenses(storage, &keys.expenses) {
        Ok(Some(decoded)) => {
            report.warnings.extend(decoded.skipped);
            let (expenses, warnings) = dedupe_ids(decoded.expenses);
            report.expenses = expenses;
            report.warnings.extend(warnings);
        }
        Ok(None) => {}
        Err(err) => report.warnings.push(format!(
            "failed to load expenses from `{}`: {err}",
            keys.expenses
        )),
    }

    match read_salary(storage, &keys.salary) {
        Ok(Some(salary)) => report.salary = salary,
        Ok(None) => {}
        Err(err) => report
            .warnings
            .push(format!("failed to load salary from `{}`: {err}", keys.salary)),
    }

    for warning in &report.warnings {
        warn!(%warning, "recovered from persisted state");
    }
    report
}

/// Reads the expense collection. `Ok(None)` when the key is absent; an error
/// only when the entry is not a JSON array at all.
pub fn read_expenses(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<DecodedExpenses>> {
    match storage.get(key)? {
        Some(raw) => decode_expenses(&raw).map(Some),
        None => Ok(None),
    }
}

pub fn decode_expenses(raw: &str) -> Result<DecodedExpenses> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut decoded = DecodedExpenses::default();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Expense>(record) {
            Ok(expense) => decoded.expenses.push(expense),
            Err(err) => decoded
                .skipped
                .push(format!("skipped malformed expense at index {index}: {err}")),
        }
    }
    Ok(decoded)
}

/// Strict read of the salary. `Ok(None)` when the key is absent.
pub fn read_salary(storage: &dyn KeyValueStorage, key: &str) -> Result<Option<Decimal>> {
    match storage.get(key)? {
        Some(raw) => parse_salary(&raw).map(Some),
        None => Ok(None),
    }
}

pub fn save_expenses(
    storage: &dyn KeyValueStorage,
    key: &str,
    expenses: &[Expense],
) -> Result<()> {
    let json = serde_json::to_string(expenses)?;
    storage.set(key, &json)
}

pub fn save_salary(storage: &dyn KeyValueStorage, key: &str, salary: Decimal) -> Result<()> {
    storage.set(key, &salary.to_string())
}

/// Parses a stored salary. Plain decimals are expected; float notation such as
/// `1e3` written by other tools is accepted too.
pub fn parse_salary(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let value = match Decimal::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => {
            let float: f64 = trimmed
                .parse()
                .map_err(|_| LuminaError::InvalidAmount(format!("`{trimmed}` is not a number")))?;
            amount_from_f64(float)?
        }
    };
    ensure_non_negative(value)
}

/// Keeps the first record for each id; later duplicates are dropped.
fn dedupe_ids(expenses: Vec<Expense>) -> (Vec<Expense>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    let mut kept = Vec::with_capacity(expenses.len());
    for expense in expenses {
        if seen.insert(expense.id.clone()) {
            kept.push(expense);
        } else {
            warnings.push(format!("dropped expense with duplicate id {}", expense.id));
        }
    }
    (kept, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, NewExpense};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(title: &str, amount: Decimal) -> Expense {
        Expense::from_new(NewExpense::new(
            title,
            amount,
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ))
    }

    #[test]
    fn absent_keys_load_defaults_without_warnings() {
        let report = load_state(&MemoryStorage::new(), &StorageKeys::default());
        assert!(report.expenses.is_empty());
        assert_eq!(report.salary, Decimal::ZERO);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn malformed_entries_degrade_independently() {
        let storage = MemoryStorage::with_entries([
            (DEFAULT_EXPENSES_KEY, "{not json"),
            (DEFAULT_SALARY_KEY, "2500"),
        ]);
        let report = load_state(&storage, &StorageKeys::default());
        assert!(report.expenses.is_empty());
        assert_eq!(report.salary, dec!(2500));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn bad_records_are_skipped_individually() {
        let raw = r#"[
            {"id":"1712345678901","title":"Rent","amount":900,"category":"Housing","date":"2024-03-01"},
            {"id":"1712345678902","title":"Broken","amount":"lots","category":"Food","date":"2024-03-02"},
            {"id":"1712345678903","title":"Bus","amount":2.5,"category":"Transportation","date":"not a date"},
            {"id":"1712345678904","title":"Lunch","amount":12.5,"category":"Food","date":"2024-03-04"}
        ]"#;
        let storage = MemoryStorage::with_entries([(DEFAULT_EXPENSES_KEY, raw)]);
        let report = load_state(&storage, &StorageKeys::default());
        let titles: Vec<&str> = report.expenses.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Rent", "Lunch"]);
        assert_eq!(report.expenses[0].id.as_str(), "1712345678901");
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("index 1"));
    }

    #[test]
    fn salary_parsing_policy() {
        assert_eq!(parse_salary(" 1250.50 ").unwrap(), dec!(1250.50));
        assert_eq!(parse_salary("1e3").unwrap(), dec!(1000));
        assert!(parse_salary("NaN").is_err());
        assert!(parse_salary("-10").is_err());
        assert!(parse_salary("lots").is_err());
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let first = expense("first", dec!(1));
        let mut second = expense("second", dec!(2));
        second.id = first.id.clone();
        let storage = MemoryStorage::new();
        save_expenses(&storage, DEFAULT_EXPENSES_KEY, &[first.clone(), second]).unwrap();

        let report = load_state(&storage, &StorageKeys::default());
        assert_eq!(report.expenses, vec![first]);
        assert_eq!(report.warnings.len(), 1);
    }
}
