//! Financial-year consumption report: twelve monthly rows, April to March.

use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::{round2, round3, SummaryService};
use crate::domain::app_data::AppData;
use crate::domain::balance::{FinancialYear, MonthKey};
use crate::reports::{fmt2, fmt3};

#[derive(Debug, Clone)]
pub struct YearlyRow {
    pub month: MonthKey,
    pub serving_days: usize,
    pub meals_served: u32,
    pub rice_consumed: f64,
    pub expenditure: f64,
    pub rice_received: f64,
    pub cash_received: f64,
}

#[derive(Debug, Clone)]
pub struct YearlyModel {
    pub school_name: String,
    pub year: FinancialYear,
    pub rows: Vec<YearlyRow>,
    pub total_meals: u32,
    pub total_rice: f64,
    pub total_expenditure: f64,
}

pub fn build(data: &AppData, year: FinancialYear) -> YearlyModel {
    let rows: Vec<YearlyRow> = year
        .months()
        .into_iter()
        .map(|month| {
            let summary = SummaryService::calculate(data, &month);
            let received_rice = data
                .receipts_in_month(&month)
                .iter()
                .map(|r| r.total_rice())
                .sum();
            let received_cash = data
                .receipts_in_month(&month)
                .iter()
                .map(|r| r.total_cash())
                .sum();
            YearlyRow {
                month,
                serving_days: summary.serving_days(),
                meals_served: summary.totals.present,
                rice_consumed: summary.totals.rice,
                expenditure: summary.totals.expenditure,
                rice_received: round3(received_rice),
                cash_received: round2(received_cash),
            }
        })
        .collect();

    YearlyModel {
        school_name: data.settings.school.name.clone(),
        year,
        total_meals: rows.iter().map(|r| r.meals_served).sum(),
        total_rice: round3(rows.iter().map(|r| r.rice_consumed).sum()),
        total_expenditure: round2(rows.iter().map(|r| r.expenditure).sum()),
        rows,
    }
}

pub fn render(model: &YearlyModel) -> String {
    let mut out = String::new();
    out.push_str("YEARLY CONSUMPTION REPORT\n");
    out.push_str(&format!("School: {}\n", model.school_name));
    out.push_str(&format!("Financial year: {}\n\n", model.year));

    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Serving days"),
        TableColumn::right("Meals"),
        TableColumn::right("Rice used (kg)"),
        TableColumn::right("Expenditure"),
        TableColumn::right("Rice recd (kg)"),
        TableColumn::right("Cash recd"),
    ]);
    for row in &model.rows {
        table.push_row(vec![
            row.month.to_string(),
            row.serving_days.to_string(),
            row.meals_served.to_string(),
            fmt3(row.rice_consumed),
            fmt2(row.expenditure),
            fmt3(row.rice_received),
            fmt2(row.cash_received),
        ]);
    }
    table.push_row(vec![
        "Total".into(),
        String::new(),
        model.total_meals.to_string(),
        fmt3(model.total_rice),
        fmt2(model.total_expenditure),
        String::new(),
        String::new(),
    ]);
    out.push_str(&table.render());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ConsumptionService;
    use crate::domain::category::PerCategory;
    use crate::domain::entry::DailyEntry;
    use chrono::NaiveDate;

    #[test]
    fn year_always_has_twelve_rows() {
        let data = AppData::default();
        let model = build(&data, "2024-25".parse().unwrap());
        assert_eq!(model.rows.len(), 12);
        assert_eq!(model.total_meals, 0);
    }

    #[test]
    fn entries_land_in_their_month_row() {
        let mut data = AppData::default();
        let present = PerCategory::new(10u32, 20, 5);
        let date = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
        data.entries.push(DailyEntry {
            id: DailyEntry::entry_id(date),
            date,
            present,
            total_present: present.sum(),
            consumption: ConsumptionService::compute(&present, &data.settings.rates),
            reason_for_no_meal: None,
        });
        let model = build(&data, "2024-25".parse().unwrap());
        let july = model
            .rows
            .iter()
            .find(|r| r.month.to_string() == "2024-07")
            .unwrap();
        assert_eq!(july.meals_served, 35);
        assert_eq!(model.total_meals, 35);
    }
}
