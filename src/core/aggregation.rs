//! Month-scoped queries over an expense collection.
//!
//! Everything here is pure: inputs are borrowed, nothing is persisted and the
//! wall clock is never consulted. Functions taking a subset accept any
//! iterator of `&Expense`, so they compose with [`expenses_by_month`] as well
//! as with a plain `&[Expense]`.
//!
//! Arithmetic saturates instead of panicking: sums that would exceed
//! `Decimal::MAX` are reported as `Decimal::MAX`, and a percentage that
//! cannot be represented is reported as `Decimal::MAX` too.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Category, Expense, MonthKey};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Summed spend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

/// Summed spend for one day of the month (1–31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub day: u32,
    pub total: Decimal,
}

/// Records dated within `month`, in collection order.
pub fn expenses_by_month(expenses: &[Expense], month: MonthKey) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|expense| month.contains(expense.date))
        .collect()
}

pub fn total_spent<'a, I>(subset: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    subset
        .into_iter()
        .fold(Decimal::ZERO, |total, expense| total.saturating_add(expense.amount))
}

/// Salary minus spend. Negative means overspent and is a normal result.
pub fn remaining(salary: Decimal, total_spent: Decimal) -> Decimal {
    salary.saturating_sub(total_spent)
}

/// Share of salary spent, in percent. Defined as zero when there is no salary.
pub fn spent_percentage(salary: Decimal, total_spent: Decimal) -> Decimal {
    if salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_spent
        .checked_div(salary)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// One entry per category present, largest total first. Equal totals keep the
/// order in which their category was first seen.
///
/// Categories are keyed by label, so a `Custom("Food")` built by hand lands in
/// the same group as `Category::Food`.
pub fn group_by_category<'a, I>(subset: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in subset {
        match index.get(expense.category.label()) {
            Some(&slot) => {
                totals[slot].total = totals[slot].total.saturating_add(expense.amount);
            }
            None => {
                index.insert(expense.category.label(), totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }
    // sort_by is stable, which gives the first-seen tie order.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// One entry per day-of-month with activity, ascending. Quiet days are absent.
pub fn group_by_day<'a, I>(subset: I) -> Vec<DailyTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut days: BTreeMap<u32, Decimal> = BTreeMap::new();
    for expense in subset {
        let total = days.entry(expense.date.day()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(expense.amount);
    }
    days.into_iter()
        .map(|(day, total)| DailyTotal { day, total })
        .collect()
}

/// Display order for transaction lists: newest date first, input order on ties.
pub fn sort_by_date_descending<'a, I>(subset: I) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut sorted: Vec<&Expense> = subset.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub salary: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub spent_percentage: Decimal,
    pub expense_count: usize,
    pub by_category: Vec<CategoryTotal>,
    pub by_day: Vec<DailyTotal>,
}

impl MonthSummary {
    pub fn compute(expenses: &[Expense], salary: Decimal, month: MonthKey) -> Self {
        let subset = expenses_by_month(expenses, month);
        let total = total_spent(subset.iter().copied());
        Self {
            month,
            salary,
            total_spent: total,
            remaining: remaining(salary, total),
            spent_percentage: spent_percentage(salary, total),
            expense_count: subset.len(),
            by_category: group_by_category(subset.iter().copied()),
            by_day: group_by_day(subset.iter().copied()),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }

    /// How far spend exceeds salary, when it does.
    pub fn overspend(&self) -> Option<Decimal> {
        self.is_over_budget().then(|| self.remaining.abs())
    }

    /// Percentage clamped to 0–100 for progress bars.
    pub fn usage_ratio(&self) -> Decimal {
        self.spent_percentage.clamp(Decimal::ZERO, HUNDRED)
    }
}
