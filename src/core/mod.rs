//! Expense state and the queries derived from it.

pub mod aggregation;
pub mod store;

pub use aggregation::{CategoryTotal, DailyTotal, MonthSummary};
pub use store::ExpenseStore;
