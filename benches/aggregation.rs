use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumina_core::{
    core::aggregation::{expenses_by_month, group_by_category, group_by_day, total_spent},
    utils::persistence::{load_state, save_expenses, StorageKeys},
    storage::MemoryStorage,
    Category, Expense, MonthKey, MonthSummary, NewExpense,
};
use rust_decimal::Decimal;

fn build_sample_expenses(count: usize) -> Vec<Expense> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let category = Category::ALL[idx % Category::ALL.len()].clone();
            let date = start + Duration::days((idx % 365) as i64);
            let amount = Decimal::new(500 + (idx % 10_000) as i64, 2);
            Expense::from_new(NewExpense::new(format!("expense {idx}"), amount, category, date))
        })
        .collect()
}

fn bench_month_queries(c: &mut Criterion) {
    let expenses = build_sample_expenses(black_box(10_000));
    let month: MonthKey = "2024-03".parse().unwrap();

    c.bench_function("month_summary_10k", |b| {
        b.iter(|| black_box(MonthSummary::compute(&expenses, Decimal::new(500_000, 2), month)))
    });

    c.bench_function("month_breakdowns_10k", |b| {
        b.iter(|| {
            let subset = expenses_by_month(&expenses, month);
            black_box(total_spent(subset.iter().copied()));
            black_box(group_by_category(subset.iter().copied()));
            black_box(group_by_day(subset.iter().copied()));
        })
    });
}

fn bench_persistence(c: &mut Criterion) {
    let expenses = build_sample_expenses(10_000);
    let keys = StorageKeys::default();
    let storage = MemoryStorage::new();

    c.bench_function("expenses_save_10k", |b| {
        b.iter(|| save_expenses(&storage, &keys.expenses, &expenses).unwrap())
    });

    c.bench_function("expenses_load_10k", |b| {
        b.iter(|| black_box(load_state(&storage, &keys)))
    });
}

criterion_group!(benches, bench_month_queries, bench_persistence);
criterion_main!(benches);
