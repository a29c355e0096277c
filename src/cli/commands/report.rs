//! Report generation command.

use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{LedgerService, SummaryService};
use crate::domain::FinancialYear;
use crate::errors::RegisterError;
use crate::reports::{
    self, consumption_register, mdcf, rice_requirement, roll_statement, yearly, ReportKind,
};

use super::{parse_month, parse_u32, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "report",
        "Generate an official report document",
        "report <mdcf|roll-statement|consumption-register|rice-requirement|yearly> [period] [--days N] [--out DIR]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "report <mdcf|roll-statement|consumption-register|rice-requirement|yearly> \
                 [period] [--days N] [--out DIR]";
    let mut working_days = rice_requirement::DEFAULT_WORKING_DAYS;
    let mut out_dir: Option<PathBuf> = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--days" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CommandError::Usage(usage.into()))?;
                working_days = parse_u32(value)?;
            }
            "--out" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CommandError::Usage(usage.into()))?;
                out_dir = Some(PathBuf::from(value));
            }
            other => positional.push(other),
        }
    }

    let Some(kind_raw) = positional.first() else {
        return Err(CommandError::Usage(usage.into()));
    };
    let kind: ReportKind = kind_raw
        .parse()
        .map_err(|err: RegisterError| CommandError::Failed(err.to_string()))?;
    let period = positional.get(1).copied();
    let dir = out_dir.unwrap_or_else(|| context.store.base_dir().join("reports"));

    let (stem, content) = match kind {
        ReportKind::RollStatement => {
            let model = roll_statement::build(&context.data.settings);
            ("roll_statement".to_string(), roll_statement::render(&model))
        }
        ReportKind::Yearly => {
            let raw = period.ok_or_else(|| {
                CommandError::Usage("report yearly <YYYY-YY> [--out DIR]".into())
            })?;
            let year: FinancialYear = raw
                .parse()
                .map_err(|err: RegisterError| CommandError::Failed(err.to_string()))?;
            let model = yearly::build(&context.data, year);
            (format!("yearly_{year}"), yearly::render(&model))
        }
        ReportKind::RiceRequirement => {
            let raw = period.ok_or_else(|| {
                CommandError::Usage("report rice-requirement <YYYY-MM> [--days N] [--out DIR]".into())
            })?;
            let month = parse_month(raw)?;
            let model =
                rice_requirement::build(&context.data.settings, &context.data, month, working_days);
            (
                format!("rice_requirement_{month}"),
                rice_requirement::render(&model),
            )
        }
        ReportKind::Mdcf | ReportKind::ConsumptionRegister => {
            let raw = period.ok_or_else(|| {
                CommandError::Usage(format!("report {kind} <YYYY-MM> [--out DIR]"))
            })?;
            let month = parse_month(raw)?;
            let summary = SummaryService::calculate(&context.data, &month);
            let rendered = match kind {
                ReportKind::Mdcf => {
                    let model = mdcf::build(&context.data.settings, &summary);
                    (format!("mdcf_{month}"), mdcf::render(&model))
                }
                _ => {
                    let model = consumption_register::build(&summary);
                    (
                        format!("consumption_register_{month}"),
                        consumption_register::render(&model),
                    )
                }
            };
            // Month-scoped reports pin the month's closing balance, same as
            // viewing its summary. A month without entries records nothing.
            if !summary.entries.is_empty() {
                LedgerService::record_closing_balance(
                    &mut context.data,
                    &month,
                    summary.closing_balance.clone(),
                );
                context.mark_dirty();
            }
            rendered
        }
    };

    let path = reports::write_document(&dir, &stem, &content)?;
    output::success(format!("Report written to {}.", path.display()));
    Ok(())
}
