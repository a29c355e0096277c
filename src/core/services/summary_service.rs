//! The monthly roll-up: attendance, consumption, receipts, and the
//! opening/received/consumed/closing abstracts for rice and cash.

use crate::core::services::ledger_service::LedgerService;
use crate::core::services::{round2, round3};
use crate::domain::app_data::AppData;
use crate::domain::balance::{
    Abstract, CategoryTotals, ExpenditureBreakdown, MonthKey, MonthTotals, MonthlyBalanceData,
    MonthlySummary,
};
use crate::domain::category::{Category, CategoryBalance, PerCategory};

pub struct SummaryService;

impl SummaryService {
    /// Computes the full summary for one month. Pure and idempotent: the
    /// input is never mutated, and identical inputs yield identical
    /// output. Persisting the closing balance into the ledger is the
    /// caller's decision.
    pub fn calculate(data: &AppData, month: &MonthKey) -> MonthlySummary {
        let entries: Vec<_> = data
            .entries_in_month(month)
            .into_iter()
            .cloned()
            .collect();
        let receipts = data.receipts_in_month(month);

        let opening = LedgerService::opening_balance_for_month(data, month);

        let received_rice: CategoryBalance = PerCategory::from_fn(|c| {
            round3(receipts.iter().map(|r| *r.rice.get(c)).sum())
        });
        let received_cash: CategoryBalance = PerCategory::from_fn(|c| {
            round2(receipts.iter().map(|r| *r.cash.get(c)).sum())
        });

        // Accumulate from the frozen per-entry snapshots only; the current
        // rate table plays no part here.
        let mut category_totals = CategoryTotals::default();
        let mut breakdown = ExpenditureBreakdown::default();
        for entry in &entries {
            for &c in &Category::ALL {
                *category_totals.present.get_mut(c) += *entry.present.get(c);
                *category_totals.rice.get_mut(c) += *entry.consumption.rice.get(c);
                *category_totals.expenditure.get_mut(c) += *entry.consumption.cash.get(c);
            }
            breakdown.dal_veg += entry.consumption.dal_veg;
            breakdown.oil_cond += entry.consumption.oil_cond;
            breakdown.salt += entry.consumption.salt;
            breakdown.fuel += entry.consumption.fuel;
        }
        category_totals.rice = category_totals.rice.map(|v| round3(*v));
        category_totals.expenditure = category_totals.expenditure.map(|v| round2(*v));
        breakdown.dal_veg = round2(breakdown.dal_veg);
        breakdown.oil_cond = round2(breakdown.oil_cond);
        breakdown.salt = round2(breakdown.salt);
        breakdown.fuel = round2(breakdown.fuel);
        breakdown.total =
            round2(breakdown.dal_veg + breakdown.oil_cond + breakdown.salt + breakdown.fuel);

        let totals = MonthTotals {
            present: category_totals.present.sum(),
            rice: round3(category_totals.rice.sum()),
            expenditure: round2(category_totals.expenditure.sum()),
        };

        let rice_abstracts = PerCategory::from_fn(|c| {
            Self::abstract_line(
                round3(*opening.rice.get(c)),
                *received_rice.get(c),
                *category_totals.rice.get(c),
                round3,
            )
        });
        let cash_abstracts = PerCategory::from_fn(|c| {
            Self::abstract_line(
                round2(*opening.cash.get(c)),
                *received_cash.get(c),
                *category_totals.expenditure.get(c),
                round2,
            )
        });

        let closing_balance = MonthlyBalanceData {
            rice: rice_abstracts.map(|a| a.balance),
            cash: cash_abstracts.map(|a| a.balance),
        };

        MonthlySummary {
            month: *month,
            entries,
            rice_abstracts,
            cash_abstracts,
            totals,
            category_totals,
            expenditure_breakdown: breakdown,
            closing_balance,
        }
    }

    fn abstract_line(
        opening: f64,
        received: f64,
        consumed: f64,
        round: fn(f64) -> f64,
    ) -> Abstract {
        let total = round(opening + received);
        Abstract {
            opening,
            received,
            total,
            consumed,
            balance: round(total - consumed),
        }
    }
}
