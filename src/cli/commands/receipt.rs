//! Receipt commands: add, list, delete.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::ReceiptService;
use crate::domain::PerCategory;

use super::{parse_date, parse_f64, parse_month, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "receipt-add",
            "Record incoming rice (kg) and cash per cohort",
            "receipt-add <YYYY-MM-DD> <riceBal> <ricePri> <riceMid> <cashBal> <cashPri> <cashMid>",
            cmd_receipt_add,
        ),
        CommandDefinition::new(
            "receipt-list",
            "List the receipts of a month",
            "receipt-list <YYYY-MM>",
            cmd_receipt_list,
        ),
        CommandDefinition::new(
            "receipt-delete",
            "Delete a receipt by id",
            "receipt-delete <id>",
            cmd_receipt_delete,
        ),
    ]
}

fn cmd_receipt_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, rice_b, rice_p, rice_m, cash_b, cash_p, cash_m] = args else {
        return Err(CommandError::Usage(
            "receipt-add <YYYY-MM-DD> <riceBal> <ricePri> <riceMid> <cashBal> <cashPri> <cashMid>"
                .into(),
        ));
    };
    let date = parse_date(date)?;
    let rice = PerCategory::new(parse_f64(rice_b)?, parse_f64(rice_p)?, parse_f64(rice_m)?);
    let cash = PerCategory::new(parse_f64(cash_b)?, parse_f64(cash_p)?, parse_f64(cash_m)?);

    let id = ReceiptService::add(&mut context.data, date, rice, cash)?;
    context.mark_dirty();
    output::success(format!("Receipt {id} recorded for {date}."));
    Ok(())
}

fn cmd_receipt_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [month] = args else {
        return Err(CommandError::Usage("receipt-list <YYYY-MM>".into()));
    };
    let month = parse_month(month)?;
    let receipts = context.data.receipts_in_month(&month);
    if receipts.is_empty() {
        output::info(format!("No receipts recorded for {month}."));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Date"),
        TableColumn::right("Rice (kg)"),
        TableColumn::right("Cash (Rs)"),
    ]);
    for receipt in &receipts {
        table.push_row(vec![
            receipt.id.clone(),
            receipt.date.to_string(),
            format!("{:.3}", receipt.total_rice()),
            format!("{:.2}", receipt.total_cash()),
        ]);
    }
    output::section(format!("Receipts for {month}"));
    print!("{}", table.render());
    Ok(())
}

fn cmd_receipt_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::Usage("receipt-delete <id>".into()));
    };
    let removed = ReceiptService::delete(&mut context.data, id)?;
    context.mark_dirty();
    output::success(format!(
        "Deleted receipt {} dated {}.",
        removed.id, removed.date
    ));
    Ok(())
}
