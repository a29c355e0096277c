//! Day-by-day consumption register for one month.

use chrono::NaiveDate;

use crate::cli::ui::table::{Table, TableColumn};
use crate::domain::balance::{MonthKey, MonthTotals, MonthlySummary};
use crate::domain::category::PerCategory;
use crate::reports::{fmt2, fmt3};

#[derive(Debug, Clone)]
pub struct RegisterRow {
    pub date: NaiveDate,
    pub present: PerCategory<u32>,
    pub total_present: u32,
    pub rice_kg: f64,
    pub cash: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConsumptionRegisterModel {
    pub month: MonthKey,
    pub rows: Vec<RegisterRow>,
    pub totals: MonthTotals,
}

pub fn build(summary: &MonthlySummary) -> ConsumptionRegisterModel {
    let rows = summary
        .entries
        .iter()
        .map(|entry| RegisterRow {
            date: entry.date,
            present: entry.present,
            total_present: entry.total_present,
            rice_kg: entry.consumption.rice_total,
            cash: entry.consumption.total_cash,
            reason: entry.reason_for_no_meal.as_ref().map(|r| r.to_string()),
        })
        .collect();
    ConsumptionRegisterModel {
        month: summary.month,
        rows,
        totals: summary.totals,
    }
}

pub fn render(model: &ConsumptionRegisterModel) -> String {
    let mut out = String::new();
    out.push_str("DAILY CONSUMPTION REGISTER\n");
    out.push_str(&format!("Month: {}\n\n", model.month));

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Balvatika"),
        TableColumn::right("Primary"),
        TableColumn::right("Middle"),
        TableColumn::right("Total"),
        TableColumn::right("Rice (kg)"),
        TableColumn::right("Cash"),
        TableColumn::left("Remarks"),
    ]);
    for row in &model.rows {
        table.push_row(vec![
            row.date.to_string(),
            row.present.balvatika.to_string(),
            row.present.primary.to_string(),
            row.present.middle.to_string(),
            row.total_present.to_string(),
            fmt3(row.rice_kg),
            fmt2(row.cash),
            row.reason.clone().unwrap_or_default(),
        ]);
    }
    table.push_row(vec![
        "Total".into(),
        String::new(),
        String::new(),
        String::new(),
        model.totals.present.to_string(),
        fmt3(model.totals.rice),
        fmt2(model.totals.expenditure),
        String::new(),
    ]);
    out.push_str(&table.render());
    out.push('\n');
    out
}
