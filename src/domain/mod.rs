pub mod category;
pub mod common;
pub mod expense;
pub mod month;

pub use category::Category;
pub use common::{amount_from_f64, ensure_non_negative, ensure_storable, parse_amount};
pub use expense::{Expense, ExpenseId, ExpensePatch, NewExpense};
pub use month::MonthKey;
