//! Report models and rendered documents.

mod common;

use common::{add_entry, date};
use mdm_register::core::services::{ReceiptService, SummaryService};
use mdm_register::domain::{
    AppData, Category, ClassRoll, FinancialYear, GenderCount, MonthKey, PerCategory,
};
use mdm_register::reports::{
    self, consumption_register, mdcf, rice_requirement, roll_statement, yearly, ReportKind,
};
use tempfile::TempDir;

fn configured_data() -> AppData {
    let mut data = AppData::default();
    data.settings.school.name = "GPS Rampur".into();
    data.settings.school.udise_code = "12345678901".into();
    data.settings.class_rolls = vec![
        ClassRoll {
            class_label: "Balvatika".into(),
            category: Category::Balvatika,
            general: GenderCount::new(8, 7),
            st_sc: GenderCount::new(3, 2),
        },
        ClassRoll {
            class_label: "Class 3".into(),
            category: Category::Primary,
            general: GenderCount::new(12, 10),
            st_sc: GenderCount::new(4, 4),
        },
        ClassRoll {
            class_label: "Class 7".into(),
            category: Category::Middle,
            general: GenderCount::new(9, 11),
            st_sc: GenderCount::new(5, 5),
        },
    ];
    data
}

#[test]
fn roll_statement_totals_the_cohorts() {
    let data = configured_data();
    let model = roll_statement::build(&data.settings);

    assert_eq!(model.category_totals.balvatika, 20);
    assert_eq!(model.category_totals.primary, 30);
    assert_eq!(model.category_totals.middle, 30);
    assert_eq!(model.grand_total, 80);

    let rendered = roll_statement::render(&model);
    assert!(rendered.contains("GPS Rampur"));
    assert!(rendered.contains("Class 3"));
}

#[test]
fn mdcf_combines_identity_enrollment_and_abstracts() {
    let mut data = configured_data();
    add_entry(&mut data, date(2024, 4, 10), PerCategory::new(15, 25, 20));
    let summary = SummaryService::calculate(&data, &MonthKey::new(2024, 4).unwrap());

    let model = mdcf::build(&data.settings, &summary);
    assert_eq!(model.total_meals, 60);
    assert_eq!(model.on_roll.sum(), 80);
    assert_eq!(model.serving_days, 1);

    let rendered = mdcf::render(&model);
    assert!(rendered.contains("MONTHLY DATA CAPTURE FORMAT"));
    assert!(rendered.contains("12345678901"));
    assert!(rendered.contains("GPS Rampur"));
}

#[test]
fn consumption_register_has_one_row_per_entry() {
    let mut data = configured_data();
    add_entry(&mut data, date(2024, 4, 1), PerCategory::new(10, 10, 10));
    add_entry(&mut data, date(2024, 4, 2), PerCategory::new(12, 12, 12));
    let summary = SummaryService::calculate(&data, &MonthKey::new(2024, 4).unwrap());

    let model = consumption_register::build(&summary);
    assert_eq!(model.rows.len(), 2);
    assert_eq!(model.totals.present, 66);

    let rendered = consumption_register::render(&model);
    assert!(rendered.contains("2024-04-01"));
    assert!(rendered.contains("2024-04-02"));
}

#[test]
fn rice_requirement_nets_out_current_stock() {
    let mut data = configured_data();
    // 20*100 + 30*100 + 30*150 grams/day = 9.5 kg/day; 24 days = 228 kg.
    let month = MonthKey::new(2024, 5).unwrap();
    let model = rice_requirement::build(
        &data.settings,
        &data,
        month,
        rice_requirement::DEFAULT_WORKING_DAYS,
    );
    assert_eq!(model.total_requirement, 228.0);
    assert_eq!(model.net_requirement, 228.0);

    // 100 kg already in stock leaves 128 to request.
    ReceiptService::add(
        &mut data,
        date(2024, 4, 1),
        PerCategory::new(40.0, 40.0, 20.0),
        PerCategory::splat(0.0),
    )
    .expect("receipt");
    let model = rice_requirement::build(
        &data.settings,
        &data,
        month,
        rice_requirement::DEFAULT_WORKING_DAYS,
    );
    assert_eq!(model.current_stock, 100.0);
    assert_eq!(model.net_requirement, 128.0);
}

#[test]
fn rice_requirement_never_goes_negative() {
    let mut data = configured_data();
    ReceiptService::add(
        &mut data,
        date(2024, 4, 1),
        PerCategory::splat(500.0),
        PerCategory::splat(0.0),
    )
    .expect("receipt");

    let model = rice_requirement::build(
        &data.settings,
        &data,
        MonthKey::new(2024, 5).unwrap(),
        rice_requirement::DEFAULT_WORKING_DAYS,
    );
    assert_eq!(model.net_requirement, 0.0);
}

#[test]
fn yearly_report_covers_april_to_march() {
    let mut data = configured_data();
    add_entry(&mut data, date(2024, 4, 10), PerCategory::new(10, 10, 10));
    add_entry(&mut data, date(2025, 3, 10), PerCategory::new(10, 10, 10));
    add_entry(&mut data, date(2025, 4, 10), PerCategory::new(99, 99, 99));

    let year: FinancialYear = "2024-25".parse().unwrap();
    let model = yearly::build(&data, year);

    assert_eq!(model.rows.len(), 12);
    assert_eq!(model.rows[0].month.to_string(), "2024-04");
    assert_eq!(model.rows[11].month.to_string(), "2025-03");
    // The April 2025 entry belongs to the next financial year.
    assert_eq!(model.total_meals, 60);
}

#[test]
fn write_document_places_a_txt_file() {
    let out = TempDir::new().unwrap();
    let dir = out.path().join("reports");
    let path = reports::write_document(&dir, "mdcf_2024-04", "CONTENT\n").expect("write");

    assert!(path.ends_with("mdcf_2024-04.txt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "CONTENT\n");
}

#[test]
fn report_kinds_parse_from_their_cli_names() {
    assert_eq!("mdcf".parse::<ReportKind>().unwrap(), ReportKind::Mdcf);
    assert_eq!(
        "rice-requirement".parse::<ReportKind>().unwrap(),
        ReportKind::RiceRequirement
    );
    assert!("pdf".parse::<ReportKind>().is_err());
}
