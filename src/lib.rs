#![doc(test(attr(deny(warnings))))]

//! Lumina Core holds the expense store behind the Lumina finance dashboard:
//! a salary, a list of expenses persisted to key-value storage, and the
//! month-scoped totals and breakdowns derived from them.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod storage;
pub mod utils;

pub use crate::core::{ExpenseStore, MonthSummary};
pub use domain::{Category, Expense, ExpenseId, ExpensePatch, MonthKey, NewExpense};
pub use errors::{LuminaError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Lumina core tracing initialized.");
    });
}
