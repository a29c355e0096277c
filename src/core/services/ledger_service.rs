//! The sparse closing-balance ledger and the independent all-time balance.
//!
//! These are two deliberately separate running totals. The ledger holds
//! what was officially reported month by month and is never recomputed
//! retroactively; the overall balance is a live stock estimate summed over
//! the full history. Editing past entries or receipts can make them drift
//! apart, and both readings are kept on purpose.

use std::fmt;
use std::ops::Bound;

use crate::core::services::{round2, round3};
use crate::domain::app_data::AppData;
use crate::domain::balance::{MonthKey, MonthlyBalanceData};
use crate::domain::settings::AlertThresholds;

pub struct LedgerService;

impl LedgerService {
    /// Opening balance for a month: the closing balance of the nearest
    /// strictly-prior ledger month, else the configured initial opening
    /// balance. Absence of history is a normal state, not an error.
    pub fn opening_balance_for_month(data: &AppData, month: &MonthKey) -> MonthlyBalanceData {
        data.monthly_balances
            .range((Bound::Unbounded, Bound::Excluded(month)))
            .next_back()
            .map(|(_, balance)| balance.clone())
            .unwrap_or_else(|| data.settings.initial_opening_balance.clone())
    }

    /// Records a month's closing balance, unconditionally overwriting any
    /// prior snapshot for that key. This is how the ledger advances as the
    /// user visits each month.
    pub fn record_closing_balance(
        data: &mut AppData,
        month: &MonthKey,
        balance: MonthlyBalanceData,
    ) {
        data.monthly_balances.insert(*month, balance);
    }

    /// Live all-time stock estimate: initial opening balance plus every
    /// receipt, minus every entry's consumption, summed across cohorts.
    /// Independent of the monthly ledger by design.
    pub fn calculate_overall_balance(data: &AppData) -> OverallBalance {
        let initial = &data.settings.initial_opening_balance;
        let mut rice_kg = initial.rice.sum();
        let mut cash = initial.cash.sum();

        for receipt in &data.receipts {
            rice_kg += receipt.total_rice();
            cash += receipt.total_cash();
        }
        for entry in &data.entries {
            rice_kg -= entry.consumption.rice_total;
            cash -= entry.consumption.total_cash;
        }

        OverallBalance {
            rice_kg: round3(rice_kg),
            cash: round2(cash),
        }
    }

    /// Compares the live balance against the configured thresholds.
    pub fn low_stock_alerts(data: &AppData, thresholds: &AlertThresholds) -> Vec<StockAlert> {
        let balance = Self::calculate_overall_balance(data);
        let mut alerts = Vec::new();
        if balance.rice_kg < thresholds.min_rice_kg {
            alerts.push(StockAlert {
                kind: StockKind::Rice,
                current: balance.rice_kg,
                threshold: thresholds.min_rice_kg,
            });
        }
        if balance.cash < thresholds.min_cash {
            alerts.push(StockAlert {
                kind: StockKind::Cash,
                current: balance.cash,
                threshold: thresholds.min_cash,
            });
        }
        alerts
    }
}

/// All-time rice/cash position, independent of the monthly ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallBalance {
    pub rice_kg: f64,
    pub cash: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockKind {
    Rice,
    Cash,
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockKind::Rice => f.write_str("rice"),
            StockKind::Cash => f.write_str("cash"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockAlert {
    pub kind: StockKind,
    pub current: f64,
    pub threshold: f64,
}
