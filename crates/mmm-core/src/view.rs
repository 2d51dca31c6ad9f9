//! Screen-model composition over ledger snapshots.
//!
//! Thin orchestration of the aggregation engine: one call per screen, no new
//! logic and no caching. Every call recomputes from the snapshot it is
//! given; cost is linear in transaction count, which stays small for a
//! personal/small-team tool.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use mmm_domain::{Group, Transaction, TransactionKind};

use crate::aggregate::{
    balance, budget_ratio, category_breakdown, classify_alert, daily_series, filter_view,
    group_spend, recent_transactions, total_by_kind, AlertLevel, CategoryTotal, DailyFlow,
    GroupFilter, TimeFilter,
};
use crate::store::LedgerSnapshot;

/// Number of entries in the dashboard's recent-transactions widget.
pub const RECENT_WIDGET_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize)]
/// Budget consumption for one group, shared by dashboard and overview rows.
pub struct GroupBudgetRow {
    pub group_id: Uuid,
    pub name: String,
    pub icon: String,
    pub spend: f64,
    pub budget: f64,
    pub ratio: f64,
    pub alert: AlertLevel,
}

impl GroupBudgetRow {
    fn compute(group: &Group, transactions: &[Transaction]) -> Self {
        let spend = group_spend(transactions, group.id);
        let ratio = budget_ratio(spend, group.budget);
        Self {
            group_id: group.id,
            name: group.name.clone(),
            icon: group.icon.clone(),
            spend,
            budget: group.budget,
            ratio,
            alert: classify_alert(ratio),
        }
    }

    /// Remaining budget; negative once the ceiling is exceeded.
    pub fn remaining(&self) -> f64 {
        self.budget - self.spend
    }

    /// Consumption percentage capped at 100 for progress bars.
    pub fn capped_percent(&self) -> f64 {
        (self.ratio * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Serialize)]
/// Everything the dashboard screen renders.
pub struct DashboardModel {
    pub balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    /// Group rows currently at warning or exceeded.
    pub alerts: Vec<GroupBudgetRow>,
    pub group_budgets: Vec<GroupBudgetRow>,
    pub category_pie: Vec<CategoryTotal>,
    pub recent: Vec<Transaction>,
}

/// Composes the dashboard from a snapshot.
pub fn dashboard_model(snapshot: LedgerSnapshot<'_>) -> DashboardModel {
    let group_budgets: Vec<GroupBudgetRow> = snapshot
        .groups
        .iter()
        .map(|g| GroupBudgetRow::compute(g, snapshot.transactions))
        .collect();
    let alerts = group_budgets
        .iter()
        .filter(|row| row.alert.is_alerting())
        .cloned()
        .collect();
    DashboardModel {
        balance: balance(snapshot.transactions),
        total_income: total_by_kind(snapshot.transactions, TransactionKind::Income),
        total_expense: total_by_kind(snapshot.transactions, TransactionKind::Expense),
        alerts,
        group_budgets,
        category_pie: category_breakdown(snapshot.transactions),
        recent: recent_transactions(snapshot.transactions, RECENT_WIDGET_SIZE),
    }
}

#[derive(Debug, Clone, Serialize)]
/// Everything the report screen renders for one filter combination.
pub struct ReportModel {
    pub filtered: Vec<Transaction>,
    pub total_income: f64,
    pub total_expense: f64,
    pub category_pie: Vec<CategoryTotal>,
    pub daily: Vec<DailyFlow>,
}

/// Composes the report screen for the given filters. `today` anchors the
/// current-month window; totals and charts cover the filtered view only.
pub fn report_model(
    snapshot: LedgerSnapshot<'_>,
    group: GroupFilter,
    time: TimeFilter,
    today: NaiveDate,
) -> ReportModel {
    let filtered = filter_view(snapshot.transactions, group, time, today);
    ReportModel {
        total_income: total_by_kind(&filtered, TransactionKind::Income),
        total_expense: total_by_kind(&filtered, TransactionKind::Expense),
        category_pie: category_breakdown(&filtered),
        daily: daily_series(&filtered),
        filtered,
    }
}

/// Per-group budget rows for the group-management screen, in display order.
pub fn group_overview(snapshot: LedgerSnapshot<'_>) -> Vec<GroupBudgetRow> {
    snapshot
        .groups
        .iter()
        .map(|g| GroupBudgetRow::compute(g, snapshot.transactions))
        .collect()
}
