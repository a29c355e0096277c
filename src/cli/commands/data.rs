//! Data management commands: export, import, reset, backups.

use std::path::{Path, PathBuf};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::ui::table::{Table, TableColumn};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "export",
            "Export all data to a dated JSON file",
            "export [dir]",
            cmd_export,
        ),
        CommandDefinition::new(
            "import",
            "Replace all data with a previously exported file",
            "import <file> [--yes]",
            cmd_import,
        ),
        CommandDefinition::new(
            "reset",
            "Erase all data and start over",
            "reset [--yes]",
            cmd_reset,
        ),
        CommandDefinition::new(
            "backups",
            "List available backups, or restore one",
            "backups [restore <name>]",
            cmd_backups,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context.store.base_dir().join("exports"),
        [dir] => PathBuf::from(dir),
        _ => return Err(CommandError::Usage("export [dir]".into())),
    };
    // Flush first so the export reflects every command of this session.
    context.flush_autosave();
    let path = context.store.export(&context.data, &dir)?;
    output::success(format!("Exported to {}.", path.display()));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (path, assume_yes) = match args {
        [path] => (Path::new(path), false),
        [path, "--yes"] => (Path::new(path), true),
        _ => return Err(CommandError::Usage("import <file> [--yes]".into())),
    };
    if !assume_yes
        && !context.confirm("Importing replaces all current data. Continue?")?
    {
        output::warning("Import cancelled.");
        return Ok(());
    }
    context.store.import(&mut context.data, path)?;
    output::success(format!(
        "Imported {} entr(ies) and {} receipt(s).",
        context.data.entries.len(),
        context.data.receipts.len()
    ));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let assume_yes = match args {
        [] => false,
        ["--yes"] => true,
        _ => return Err(CommandError::Usage("reset [--yes]".into())),
    };
    if !assume_yes
        && !context.confirm("This erases every entry, receipt and setting. Continue?")?
    {
        output::warning("Reset cancelled.");
        return Ok(());
    }
    context.data = context.store.reset()?;
    output::success("All data erased.");
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let backups = context.store.list_backups()?;
            if backups.is_empty() {
                output::info("No backups yet. One is taken before every save.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                TableColumn::left("Name"),
                TableColumn::left("Created (UTC)"),
            ]);
            for backup in &backups {
                table.push_row(vec![
                    backup.name.clone(),
                    backup
                        .created_at
                        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default(),
                ]);
            }
            output::section("Backups (most recent first)");
            print!("{}", table.render());
            Ok(())
        }
        ["restore", name] => {
            if !context.confirm(&format!(
                "Restoring `{name}` discards the current data. Continue?"
            ))? {
                output::warning("Restore cancelled.");
                return Ok(());
            }
            context.data = context.store.restore_backup(name)?;
            output::success(format!("Restored backup {name}."));
            Ok(())
        }
        _ => Err(CommandError::Usage("backups [restore <name>]".into())),
    }
}
