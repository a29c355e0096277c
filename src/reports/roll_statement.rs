//! Roll statement: class-by-class enrollment with general / ST-SC and
//! gender splits.

use crate::cli::ui::table::{Table, TableColumn};
use crate::domain::category::{Category, PerCategory};
use crate::domain::settings::{ClassRoll, Settings};

#[derive(Debug, Clone)]
pub struct RollStatementModel {
    pub school_name: String,
    pub rows: Vec<ClassRoll>,
    pub category_totals: PerCategory<u32>,
    pub grand_total: u32,
}

pub fn build(settings: &Settings) -> RollStatementModel {
    let category_totals = PerCategory::from_fn(|c| settings.on_roll(c));
    RollStatementModel {
        school_name: settings.school.name.clone(),
        rows: settings.class_rolls.clone(),
        grand_total: category_totals.sum(),
        category_totals,
    }
}

pub fn render(model: &RollStatementModel) -> String {
    let mut out = String::new();
    out.push_str("ROLL STATEMENT\n");
    out.push_str(&format!("School: {}\n\n", model.school_name));

    let mut table = Table::new(vec![
        TableColumn::left("Class"),
        TableColumn::left("Cohort"),
        TableColumn::right("Gen boys"),
        TableColumn::right("Gen girls"),
        TableColumn::right("ST/SC boys"),
        TableColumn::right("ST/SC girls"),
        TableColumn::right("On roll"),
    ]);
    for roll in &model.rows {
        table.push_row(vec![
            roll.class_label.clone(),
            roll.category.label().into(),
            roll.general.boys.to_string(),
            roll.general.girls.to_string(),
            roll.st_sc.boys.to_string(),
            roll.st_sc.girls.to_string(),
            roll.on_roll().to_string(),
        ]);
    }
    out.push_str(&table.render());

    out.push_str("\n\nCOHORT TOTALS\n");
    let mut totals = Table::new(vec![
        TableColumn::left("Cohort"),
        TableColumn::right("On roll"),
    ]);
    for &c in &Category::ALL {
        totals.push_row(vec![
            c.label().into(),
            model.category_totals.get(c).to_string(),
        ]);
    }
    totals.push_row(vec!["Total".into(), model.grand_total.to_string()]);
    out.push_str(&totals.render());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::GenderCount;

    #[test]
    fn totals_follow_the_rolls() {
        let mut settings = Settings::default();
        settings.school.name = "GPS Rampur".into();
        settings.class_rolls = vec![
            ClassRoll {
                class_label: "1st".into(),
                category: Category::Primary,
                general: GenderCount::new(10, 12),
                st_sc: GenderCount::new(3, 2),
            },
            ClassRoll {
                class_label: "2nd".into(),
                category: Category::Primary,
                general: GenderCount::new(9, 8),
                st_sc: GenderCount::new(2, 4),
            },
        ];
        let model = build(&settings);
        assert_eq!(model.category_totals.primary, 50);
        assert_eq!(model.grand_total, 50);
        let document = render(&model);
        assert!(document.contains("1st"));
        assert!(document.contains("50"));
    }
}
