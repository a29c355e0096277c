//! Rice requirement certificate: next-period demand from enrollment, rates,
//! and working days, net of the present stock.

use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::ledger_service::LedgerService;
use crate::core::services::round3;
use crate::domain::app_data::AppData;
use crate::domain::balance::MonthKey;
use crate::domain::category::{Category, PerCategory};
use crate::domain::settings::Settings;
use crate::reports::fmt3;

pub const DEFAULT_WORKING_DAYS: u32 = 24;

#[derive(Debug, Clone)]
pub struct RiceRequirementModel {
    pub school_name: String,
    pub month: MonthKey,
    pub working_days: u32,
    pub on_roll: PerCategory<u32>,
    /// Grams per student per day.
    pub rates: PerCategory<f64>,
    /// Kg required per cohort for the period.
    pub requirement: PerCategory<f64>,
    pub total_requirement: f64,
    pub current_stock: f64,
    /// Requirement net of stock, floored at zero.
    pub net_requirement: f64,
}

pub fn build(
    settings: &Settings,
    data: &AppData,
    month: MonthKey,
    working_days: u32,
) -> RiceRequirementModel {
    let on_roll = PerCategory::from_fn(|c| settings.on_roll(c));
    let requirement = PerCategory::from_fn(|c| {
        round3(f64::from(*on_roll.get(c)) * settings.rates.rice.get(c) * f64::from(working_days)
            / 1000.0)
    });
    let total_requirement = round3(requirement.sum());
    let current_stock = LedgerService::calculate_overall_balance(data).rice_kg;
    RiceRequirementModel {
        school_name: settings.school.name.clone(),
        month,
        working_days,
        on_roll,
        rates: settings.rates.rice,
        requirement,
        total_requirement,
        current_stock,
        net_requirement: round3((total_requirement - current_stock).max(0.0)),
    }
}

pub fn render(model: &RiceRequirementModel) -> String {
    let mut out = String::new();
    out.push_str("RICE REQUIREMENT CERTIFICATE\n");
    out.push_str(&format!("School: {}\n", model.school_name));
    out.push_str(&format!(
        "Period: {}    Working days: {}\n\n",
        model.month, model.working_days
    ));

    let mut table = Table::new(vec![
        TableColumn::left("Cohort"),
        TableColumn::right("On roll"),
        TableColumn::right("Rate (g)"),
        TableColumn::right("Requirement (kg)"),
    ]);
    for &c in &Category::ALL {
        table.push_row(vec![
            c.label().into(),
            model.on_roll.get(c).to_string(),
            format!("{:.0}", model.rates.get(c)),
            fmt3(*model.requirement.get(c)),
        ]);
    }
    table.push_row(vec![
        "Total".into(),
        model.on_roll.sum().to_string(),
        String::new(),
        fmt3(model.total_requirement),
    ]);
    out.push_str(&table.render());

    out.push_str(&format!(
        "\n\nStock in hand : {} kg\nNet requirement: {} kg\n",
        fmt3(model.current_stock),
        fmt3(model.net_requirement)
    ));
    out
}
