//! Daily entry commands: add, list, delete.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::{EntryService, SaveOutcome};
use crate::domain::{EntryDraft, NoMealReason, PerCategory, ReasonCategory};

use super::{parse_date, parse_month, parse_u32, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "entry-add",
            "Record a day's attendance and meal consumption",
            "entry-add <YYYY-MM-DD> <balvatika> <primary> <middle> [reason[:detail]] [--overwrite]",
            cmd_entry_add,
        ),
        CommandDefinition::new(
            "entry-list",
            "List the entries of a month",
            "entry-list <YYYY-MM>",
            cmd_entry_list,
        ),
        CommandDefinition::new(
            "entry-delete",
            "Delete the entry for a date",
            "entry-delete <YYYY-MM-DD>",
            cmd_entry_delete,
        ),
    ]
}

fn cmd_entry_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "entry-add <YYYY-MM-DD> <balvatika> <primary> <middle> [reason[:detail]] [--overwrite]";
    let mut overwrite = false;
    let mut positional = Vec::new();
    for arg in args {
        if *arg == "--overwrite" {
            overwrite = true;
        } else {
            positional.push(*arg);
        }
    }
    if positional.len() < 4 || positional.len() > 5 {
        return Err(CommandError::Usage(usage.into()));
    }

    let date = parse_date(positional[0])?;
    let present = PerCategory::new(
        parse_u32(positional[1])?,
        parse_u32(positional[2])?,
        parse_u32(positional[3])?,
    );
    let reason_for_no_meal = match positional.get(4) {
        Some(raw) => Some(parse_reason(raw)?),
        None => None,
    };

    let draft = EntryDraft {
        date,
        present,
        reason_for_no_meal,
    };

    match EntryService::save(&mut context.data, draft.clone(), overwrite)? {
        SaveOutcome::Saved => output::success(format!("Entry saved for {date}.")),
        SaveOutcome::Replaced => output::success(format!("Entry for {date} replaced.")),
        SaveOutcome::NeedsConfirmation => {
            let allowed = context.data.settings.auto_overwrite_entries
                || context.confirm(&format!("An entry for {date} exists. Overwrite it?"))?;
            if !allowed {
                output::warning(format!(
                    "Entry for {date} unchanged. Pass --overwrite to replace it."
                ));
                return Ok(());
            }
            EntryService::save(&mut context.data, draft, true)?;
            output::success(format!("Entry for {date} replaced."));
        }
    }
    context.mark_dirty();
    Ok(())
}

fn cmd_entry_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [month] = args else {
        return Err(CommandError::Usage("entry-list <YYYY-MM>".into()));
    };
    let month = parse_month(month)?;
    let entries = context.data.entries_in_month(&month);
    if entries.is_empty() {
        output::info(format!("No entries recorded for {month}."));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Bal"),
        TableColumn::right("Pri"),
        TableColumn::right("Mid"),
        TableColumn::right("Total"),
        TableColumn::right("Rice (kg)"),
        TableColumn::right("Cash (Rs)"),
        TableColumn::left("No-meal reason"),
    ]);
    for entry in &entries {
        table.push_row(vec![
            entry.id.clone(),
            entry.present.balvatika.to_string(),
            entry.present.primary.to_string(),
            entry.present.middle.to_string(),
            entry.total_present.to_string(),
            format!("{:.3}", entry.consumption.rice_total),
            format!("{:.2}", entry.consumption.total_cash),
            entry
                .reason_for_no_meal
                .as_ref()
                .map(|reason| reason.to_string())
                .unwrap_or_default(),
        ]);
    }
    output::section(format!("Entries for {month}"));
    print!("{}", table.render());
    output::info(format!("{} entr(ies).", entries.len()));
    Ok(())
}

fn cmd_entry_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date] = args else {
        return Err(CommandError::Usage("entry-delete <YYYY-MM-DD>".into()));
    };
    let date = parse_date(date)?;
    let removed = EntryService::delete(&mut context.data, date)?;
    context.mark_dirty();
    output::success(format!("Deleted entry {}.", removed.id));
    Ok(())
}

/// `reason` or `reason:detail`, e.g. `holiday:Republic Day`.
fn parse_reason(raw: &str) -> Result<NoMealReason, CommandError> {
    let (main, detail) = match raw.split_once(':') {
        Some((main, detail)) => (main, Some(detail.trim().to_string())),
        None => (raw, None),
    };
    let main: ReasonCategory = main
        .parse()
        .map_err(|err: crate::errors::RegisterError| CommandError::Failed(err.to_string()))?;
    Ok(NoMealReason {
        main,
        detail: detail.filter(|d| !d.is_empty()),
    })
}
