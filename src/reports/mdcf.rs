//! Monthly Data Capture Format: the official month-end return combining
//! school identity, enrollment, meals served, and the rice/cash abstracts.

use crate::cli::ui::table::{Table, TableColumn};
use crate::domain::balance::{Abstract, ExpenditureBreakdown, MonthKey, MonthlySummary};
use crate::domain::category::{Category, PerCategory};
use crate::domain::settings::{HealthRecord, SchoolProfile, Settings};
use crate::reports::{fmt2, fmt3};

#[derive(Debug, Clone)]
pub struct MdcfModel {
    pub school: SchoolProfile,
    pub month: MonthKey,
    pub on_roll: PerCategory<u32>,
    pub serving_days: usize,
    pub meals_served: PerCategory<u32>,
    pub total_meals: u32,
    pub rice_abstracts: PerCategory<Abstract>,
    pub cash_abstracts: PerCategory<Abstract>,
    pub expenditure: ExpenditureBreakdown,
    pub health: HealthRecord,
}

pub fn build(settings: &Settings, summary: &MonthlySummary) -> MdcfModel {
    MdcfModel {
        school: settings.school.clone(),
        month: summary.month,
        on_roll: PerCategory::from_fn(|c| settings.on_roll(c)),
        serving_days: summary.serving_days(),
        meals_served: summary.category_totals.present,
        total_meals: summary.totals.present,
        rice_abstracts: summary.rice_abstracts,
        cash_abstracts: summary.cash_abstracts,
        expenditure: summary.expenditure_breakdown,
        health: settings.health.clone(),
    }
}

pub fn render(model: &MdcfModel) -> String {
    let mut out = String::new();
    out.push_str("MONTHLY DATA CAPTURE FORMAT (MDCF)\n");
    out.push_str(&format!("Month: {}\n\n", model.month));
    out.push_str(&format!("School  : {}\n", model.school.name));
    out.push_str(&format!("UDISE   : {}\n", model.school.udise_code));
    out.push_str(&format!(
        "Block   : {}    District: {}\n",
        model.school.block, model.school.district
    ));
    out.push_str(&format!("Incharge: {}\n", model.school.incharge_name));
    out.push_str(&format!("Kitchen : {}\n\n", model.school.kitchen_type));

    let mut enrollment = Table::new(vec![
        TableColumn::left("Cohort"),
        TableColumn::right("On roll"),
        TableColumn::right("Meals served"),
    ]);
    for &c in &Category::ALL {
        enrollment.push_row(vec![
            c.label().into(),
            model.on_roll.get(c).to_string(),
            model.meals_served.get(c).to_string(),
        ]);
    }
    enrollment.push_row(vec![
        "Total".into(),
        model.on_roll.sum().to_string(),
        model.total_meals.to_string(),
    ]);
    out.push_str(&enrollment.render());
    out.push_str(&format!("\n\nServing days: {}\n\n", model.serving_days));

    out.push_str("RICE ABSTRACT (kg)\n");
    out.push_str(&abstract_table(&model.rice_abstracts, fmt3).render());
    out.push_str("\n\nCASH ABSTRACT\n");
    out.push_str(&abstract_table(&model.cash_abstracts, fmt2).render());

    out.push_str("\n\nEXPENDITURE BREAKDOWN\n");
    let mut breakdown = Table::new(vec![
        TableColumn::left("Component"),
        TableColumn::right("Amount"),
    ]);
    breakdown.push_row(vec!["Dal/Vegetables".into(), fmt2(model.expenditure.dal_veg)]);
    breakdown.push_row(vec!["Oil/Condiments".into(), fmt2(model.expenditure.oil_cond)]);
    breakdown.push_row(vec!["Salt".into(), fmt2(model.expenditure.salt)]);
    breakdown.push_row(vec!["Fuel".into(), fmt2(model.expenditure.fuel)]);
    breakdown.push_row(vec!["Total".into(), fmt2(model.expenditure.total)]);
    out.push_str(&breakdown.render());

    out.push_str("\n\nHEALTH / MME\n");
    out.push_str(&format!(
        "IFA tablets given: {}\n",
        yes_no(model.health.ifa_tablets_given)
    ));
    out.push_str(&format!(
        "Deworming done   : {}\n",
        yes_no(model.health.deworming_done)
    ));
    out.push_str(&format!(
        "Health checkup   : {}\n",
        yes_no(model.health.health_checkup_done)
    ));
    out.push_str(&format!(
        "MME inspections  : {}    SMC meetings: {}\n",
        model.health.mme_inspections, model.health.smc_meetings
    ));
    if let Some(remarks) = &model.health.remarks {
        out.push_str(&format!("Remarks: {remarks}\n"));
    }
    out
}

fn abstract_table(abstracts: &PerCategory<Abstract>, fmt: fn(f64) -> String) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Cohort"),
        TableColumn::right("Opening"),
        TableColumn::right("Received"),
        TableColumn::right("Total"),
        TableColumn::right("Consumed"),
        TableColumn::right("Balance"),
    ]);
    for &c in &Category::ALL {
        let line = abstracts.get(c);
        table.push_row(vec![
            c.label().into(),
            fmt(line.opening),
            fmt(line.received),
            fmt(line.total),
            fmt(line.consumed),
            fmt(line.balance),
        ]);
    }
    table
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
