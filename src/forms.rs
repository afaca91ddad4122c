//! Validation boundary between raw user input and the store.
//!
//! Form widgets hand over strings exactly as typed. Converting them here keeps
//! `NaN`, blank titles and negative amounts from ever reaching
//! [`ExpenseStore`](crate::core::store::ExpenseStore).

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{parse_amount, Category, NewExpense};
use crate::errors::{LuminaError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw field values of the "add expense" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl ExpenseDraft {
    /// Blank form: first category preselected and the date set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: Category::default().to_string(),
            date: today.format(DATE_FORMAT).to_string(),
            description: String::new(),
        }
    }

    pub fn into_new_expense(self) -> Result<NewExpense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LuminaError::EmptyTitle);
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        let category = if self.category.trim().is_empty() {
            Category::default()
        } else {
            Category::from_input(&self.category)
        };
        Ok(NewExpense {
            title: title.to_string(),
            amount,
            category,
            date,
            description: sanitize_description(&self.description),
        })
    }
}

/// Parses the monthly income field.
pub fn parse_salary_input(raw: &str) -> Result<Decimal> {
    parse_amount(raw)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| LuminaError::InvalidDate(trimmed.to_string()))
}

fn sanitize_description(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
