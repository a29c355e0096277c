//! Monthly summary and balance commands.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::{LedgerService, SummaryService};
use crate::domain::{Abstract, Category, MonthlySummary, PerCategory};

use super::{parse_month, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show a month's abstracts and record its closing balance",
            "summary <YYYY-MM>",
            cmd_summary,
        ),
        CommandDefinition::new(
            "balance",
            "Show the overall rice/cash balance and stock alerts",
            "balance",
            cmd_balance,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [month] = args else {
        return Err(CommandError::Usage("summary <YYYY-MM>".into()));
    };
    let month = parse_month(month)?;
    let summary = SummaryService::calculate(&context.data, &month);

    print_summary(&summary);

    // Viewing a month pins its closing balance into the ledger so the next
    // month opens from it. A month without entries records nothing.
    if !summary.entries.is_empty() {
        LedgerService::record_closing_balance(
            &mut context.data,
            &month,
            summary.closing_balance.clone(),
        );
        context.mark_dirty();
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let balance = LedgerService::calculate_overall_balance(&context.data);
    output::section("Overall balance");
    output::info(format!("  Rice: {:.3} kg", balance.rice_kg));
    output::info(format!("  Cash: Rs {:.2}", balance.cash));

    let alerts = LedgerService::low_stock_alerts(&context.data, &context.data.settings.alerts);
    for alert in alerts {
        output::warning(format!(
            "Low {} stock: {:.2} is below the threshold of {:.2}.",
            alert.kind, alert.current, alert.threshold
        ));
    }
    Ok(())
}

fn print_summary(summary: &MonthlySummary) {
    output::section(format!("Summary for {}", summary.month));
    output::info(format!(
        "  Entries: {}   Serving days: {}   Total present: {}",
        summary.entries.len(),
        summary.serving_days(),
        summary.totals.present
    ));

    output::section("Rice abstract (kg)");
    print!("{}", abstract_table(&summary.rice_abstracts, 3).render());
    output::section("Cash abstract (Rs)");
    print!("{}", abstract_table(&summary.cash_abstracts, 2).render());

    let breakdown = &summary.expenditure_breakdown;
    output::section("Expenditure breakdown (Rs)");
    output::info(format!("  Dal/Veg        : {:.2}", breakdown.dal_veg));
    output::info(format!("  Oil/Condiments : {:.2}", breakdown.oil_cond));
    output::info(format!("  Salt           : {:.2}", breakdown.salt));
    output::info(format!("  Fuel           : {:.2}", breakdown.fuel));
    output::info(format!("  Total          : {:.2}", breakdown.total));
}

fn abstract_table(abstracts: &PerCategory<Abstract>, decimals: usize) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Cohort"),
        TableColumn::right("Opening"),
        TableColumn::right("Received"),
        TableColumn::right("Total"),
        TableColumn::right("Consumed"),
        TableColumn::right("Balance"),
    ]);
    for category in Category::ALL {
        let line = abstracts.get(category);
        table.push_row(vec![
            category.label().to_string(),
            format!("{:.decimals$}", line.opening),
            format!("{:.decimals$}", line.received),
            format!("{:.decimals$}", line.total),
            format!("{:.decimals$}", line.consumed),
            format!("{:.decimals$}", line.balance),
        ]);
    }
    table
}
