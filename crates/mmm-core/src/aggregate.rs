//! Pure aggregation over ledger snapshots.
//!
//! Every function here is a plain function of its inputs: no hidden state,
//! no wall-clock reads, safe to call concurrently and redundantly. Callers
//! that need "today" (the current-month filter) pass it in; see
//! [`crate::time::Clock`].

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mmm_domain::{Ownership, Transaction, TransactionKind};

/// Spend-to-budget fraction at which a group starts warning.
pub const WARNING_RATIO: f64 = 0.8;

/// Spend-to-budget fraction at which a group counts as exceeded.
pub const EXCEEDED_RATIO: f64 = 1.0;

/// Number of trailing active dates kept by [`daily_series`].
pub const DAILY_SERIES_BUCKETS: usize = 7;

/// Sums `amount` over transactions of the given kind.
pub fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Net balance: income minus expense.
pub fn balance(transactions: &[Transaction]) -> f64 {
    total_by_kind(transactions, TransactionKind::Income)
        - total_by_kind(transactions, TransactionKind::Expense)
}

/// Sums expense amounts attributed to the given group, matching by id alone.
pub fn group_spend(transactions: &[Transaction], group_id: Uuid) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.group_id == Some(group_id))
        .map(|t| t.amount)
        .sum()
}

/// Spend-to-budget fraction for a group.
///
/// Validation keeps budgets positive at creation time, but externally-loaded
/// data can bypass it; a non-positive or non-finite budget yields `+∞`, which
/// classifies as exceeded.
pub fn budget_ratio(spend: f64, budget: f64) -> f64 {
    if !budget.is_finite() || budget <= 0.0 {
        return f64::INFINITY;
    }
    spend / budget
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Alert classification for a group's budget consumption.
pub enum AlertLevel {
    None,
    Warning,
    Exceeded,
}

impl AlertLevel {
    pub fn is_alerting(self) -> bool {
        !matches!(self, AlertLevel::None)
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::None => "None",
            AlertLevel::Warning => "Warning",
            AlertLevel::Exceeded => "Exceeded",
        };
        f.write_str(label)
    }
}

/// Classifies a budget ratio against the fixed 0.8 / 1.0 policy thresholds.
pub fn classify_alert(ratio: f64) -> AlertLevel {
    if ratio < WARNING_RATIO {
        AlertLevel::None
    } else if ratio < EXCEEDED_RATIO {
        AlertLevel::Warning
    } else {
        AlertLevel::Exceeded
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Expense total for a single category bucket.
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Groups expense transactions by category label, absent labels bucketed as
/// "Other".
///
/// Output order is the order in which each category first occurs, not
/// sorted; chart legends rely on that being stable.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
        let label = txn.category_label();
        match index.get(label) {
            Some(&i) => totals[i].total += txn.amount,
            None => {
                index.insert(label.to_string(), totals.len());
                totals.push(CategoryTotal {
                    category: label.to_string(),
                    total: txn.amount,
                });
            }
        }
    }
    totals
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Income and expense sums for one calendar date.
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

/// Buckets all transactions by exact date, summing income and expense
/// separately, sorted ascending and truncated to the last
/// [`DAILY_SERIES_BUCKETS`] distinct dates present.
///
/// Gaps between active dates are not filled in.
pub fn daily_series(transactions: &[Transaction]) -> Vec<DailyFlow> {
    let mut buckets: HashMap<NaiveDate, DailyFlow> = HashMap::new();
    for txn in transactions {
        let entry = buckets.entry(txn.date).or_insert_with(|| DailyFlow {
            date: txn.date,
            income: 0.0,
            expense: 0.0,
        });
        match txn.kind {
            TransactionKind::Income => entry.income += txn.amount,
            TransactionKind::Expense => entry.expense += txn.amount,
        }
    }
    let mut series: Vec<DailyFlow> = buckets.into_values().collect();
    series.sort_by_key(|flow| flow.date);
    let excess = series.len().saturating_sub(DAILY_SERIES_BUCKETS);
    series.split_off(excess)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which slice of the ledger a view covers.
pub enum GroupFilter {
    All,
    Personal,
    Group(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which time window a view covers.
pub enum TimeFilter {
    All,
    CurrentMonth,
}

/// Applies group and time filters, then sorts descending by date.
///
/// `today` anchors the current-month check; the sort is stable, so equal
/// dates keep their raw collection order (newest-inserted first).
pub fn filter_view(
    transactions: &[Transaction],
    group: GroupFilter,
    time: TimeFilter,
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = transactions
        .iter()
        .filter(|t| match group {
            GroupFilter::All => true,
            GroupFilter::Personal => t.ownership == Ownership::Personal,
            GroupFilter::Group(id) => t.group_id == Some(id),
        })
        .filter(|t| match time {
            TimeFilter::All => true,
            TimeFilter::CurrentMonth => {
                t.date.year() == today.year() && t.date.month() == today.month()
            }
        })
        .cloned()
        .collect();
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

/// Descending-date view truncated to the first `n` entries.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = transactions.to_vec();
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view.truncate(n);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmm_domain::Ownership;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn txn(
        merchant: &str,
        amount: f64,
        kind: TransactionKind,
        day: u32,
    ) -> Transaction {
        Transaction::new(date(6, day), merchant, amount, kind, Ownership::Personal)
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            txn("Salary", 15000.0, TransactionKind::Income, 1),
            txn("Rent", 6000.0, TransactionKind::Expense, 2),
            txn("Food", 450.0, TransactionKind::Expense, 3),
        ];
        assert_eq!(
            balance(&transactions),
            total_by_kind(&transactions, TransactionKind::Income)
                - total_by_kind(&transactions, TransactionKind::Expense)
        );
        assert_eq!(balance(&transactions), 8550.0);
    }

    #[test]
    fn group_spend_ignores_income_and_other_groups() {
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let transactions = vec![
            txn("A", 100.0, TransactionKind::Expense, 1).with_group(target),
            txn("B", 50.0, TransactionKind::Expense, 2).with_group(other),
            txn("C", 999.0, TransactionKind::Income, 3).with_group(target),
            txn("D", 25.0, TransactionKind::Expense, 4),
        ];
        assert_eq!(group_spend(&transactions, target), 100.0);
    }

    #[test]
    fn budget_ratio_is_defensive_for_unvalidated_budgets() {
        assert_eq!(budget_ratio(500.0, 1000.0), 0.5);
        assert_eq!(budget_ratio(500.0, 0.0), f64::INFINITY);
        assert_eq!(budget_ratio(500.0, -10.0), f64::INFINITY);
        assert_eq!(classify_alert(budget_ratio(0.0, 0.0)), AlertLevel::Exceeded);
    }

    #[test]
    fn alert_thresholds_match_policy() {
        assert_eq!(classify_alert(0.79), AlertLevel::None);
        assert_eq!(classify_alert(0.8), AlertLevel::Warning);
        assert_eq!(classify_alert(0.999), AlertLevel::Warning);
        assert_eq!(classify_alert(1.0), AlertLevel::Exceeded);
        assert_eq!(classify_alert(1.5), AlertLevel::Exceeded);
    }

    #[test]
    fn category_breakdown_defaults_to_other_and_keeps_first_occurrence_order() {
        let transactions = vec![
            txn("Grab", 120.0, TransactionKind::Expense, 1).with_category("Transport"),
            txn("Mystery", 30.0, TransactionKind::Expense, 2),
            txn("BTS", 45.0, TransactionKind::Expense, 3).with_category("Transport"),
            txn("Lunch", 80.0, TransactionKind::Expense, 4).with_category("Food"),
            txn("Salary", 9999.0, TransactionKind::Income, 5),
        ];
        let breakdown = category_breakdown(&transactions);
        let labels: Vec<_> = breakdown.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, ["Transport", "Other", "Food"]);
        assert_eq!(breakdown[0].total, 165.0);
        assert_eq!(breakdown[1].total, 30.0);
    }

    #[test]
    fn daily_series_keeps_last_seven_active_dates_ascending() {
        let mut transactions = Vec::new();
        for day in 1..=10 {
            transactions.push(txn("Shop", day as f64, TransactionKind::Expense, day));
        }
        let series = daily_series(&transactions);
        assert_eq!(series.len(), DAILY_SERIES_BUCKETS);
        assert_eq!(series.first().unwrap().date, date(6, 4));
        assert_eq!(series.last().unwrap().date, date(6, 10));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn daily_series_splits_income_and_expense_per_date() {
        let transactions = vec![
            txn("Salary", 1000.0, TransactionKind::Income, 5),
            txn("Lunch", 200.0, TransactionKind::Expense, 5),
            txn("Dinner", 300.0, TransactionKind::Expense, 5),
        ];
        let series = daily_series(&transactions);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].income, 1000.0);
        assert_eq!(series[0].expense, 500.0);
    }

    #[test]
    fn group_filter_matches_exactly() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let transactions = vec![
            txn("In A", 1.0, TransactionKind::Expense, 1).with_group(a),
            txn("In B", 2.0, TransactionKind::Expense, 2).with_group(b),
            txn("Mine", 3.0, TransactionKind::Expense, 3),
        ];
        let today = date(6, 15);

        let only_a = filter_view(&transactions, GroupFilter::Group(a), TimeFilter::All, today);
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].merchant, "In A");

        let personal = filter_view(&transactions, GroupFilter::Personal, TimeFilter::All, today);
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].merchant, "Mine");

        let all = filter_view(&transactions, GroupFilter::All, TimeFilter::All, today);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn current_month_filter_uses_injected_today() {
        let transactions = vec![
            Transaction::new(
                date(5, 31),
                "Last month",
                10.0,
                TransactionKind::Expense,
                Ownership::Personal,
            ),
            Transaction::new(
                date(6, 1),
                "This month",
                20.0,
                TransactionKind::Expense,
                Ownership::Personal,
            ),
        ];
        let view = filter_view(
            &transactions,
            GroupFilter::All,
            TimeFilter::CurrentMonth,
            date(6, 15),
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].merchant, "This month");
    }

    #[test]
    fn filtered_view_sorts_descending_with_stable_ties() {
        let transactions = vec![
            txn("Newest insert", 1.0, TransactionKind::Expense, 10),
            txn("Older insert", 2.0, TransactionKind::Expense, 10),
            txn("Earlier date", 3.0, TransactionKind::Expense, 2),
        ];
        let view = filter_view(
            &transactions,
            GroupFilter::All,
            TimeFilter::All,
            date(6, 15),
        );
        let merchants: Vec<_> = view.iter().map(|t| t.merchant.as_str()).collect();
        assert_eq!(merchants, ["Newest insert", "Older insert", "Earlier date"]);
    }

    #[test]
    fn recent_transactions_truncates_after_date_sort() {
        let transactions = vec![
            txn("Old", 1.0, TransactionKind::Expense, 1),
            txn("Mid", 2.0, TransactionKind::Expense, 5),
            txn("New", 3.0, TransactionKind::Expense, 9),
        ];
        let recent = recent_transactions(&transactions, 2);
        let merchants: Vec<_> = recent.iter().map(|t| t.merchant.as_str()).collect();
        assert_eq!(merchants, ["New", "Mid"]);
    }
}
