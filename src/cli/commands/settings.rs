//! Settings commands. Every mutation goes through a clone-validate-replace
//! cycle so a rejected edit leaves the live settings untouched.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::SettingsService;
use crate::domain::{
    Category, ClassRoll, GenderCount, KitchenType, PerCategory, RateKind, Settings, StaffMember,
};
use crate::errors::RegisterError;

use super::{parse_f64, parse_u32, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "settings-show",
            "Show the configured school profile, rolls and rates",
            "settings-show",
            cmd_settings_show,
        ),
        CommandDefinition::new(
            "school-set",
            "Set a school profile field",
            "school-set <name|udise|block|district|incharge|contact|kitchen> <value...>",
            cmd_school_set,
        ),
        CommandDefinition::new(
            "rate-set",
            "Set per-cohort rates for one rate kind",
            "rate-set <rice|dal-veg|oil-cond|salt|fuel> <balvatika> <primary> <middle>",
            cmd_rate_set,
        ),
        CommandDefinition::new(
            "threshold-set",
            "Set a low-stock alert threshold",
            "threshold-set <rice|cash> <value>",
            cmd_threshold_set,
        ),
        CommandDefinition::new(
            "opening-set",
            "Set the initial opening balance",
            "opening-set <riceBal> <ricePri> <riceMid> <cashBal> <cashPri> <cashMid>",
            cmd_opening_set,
        ),
        CommandDefinition::new(
            "roll-add",
            "Add a class roll line",
            "roll-add <class> <balvatika|primary|middle> <genBoys> <genGirls> <stScBoys> <stScGirls>",
            cmd_roll_add,
        ),
        CommandDefinition::new(
            "roll-clear",
            "Remove all class roll lines",
            "roll-clear",
            cmd_roll_clear,
        ),
        CommandDefinition::new(
            "staff-add",
            "Add a cook or helper",
            "staff-add <name> <role>",
            cmd_staff_add,
        ),
        CommandDefinition::new(
            "staff-remove",
            "Remove a staff member by name",
            "staff-remove <name>",
            cmd_staff_remove,
        ),
        CommandDefinition::new(
            "auto-overwrite",
            "Toggle silent overwriting of existing entries",
            "auto-overwrite <on|off>",
            cmd_auto_overwrite,
        ),
    ]
}

fn cmd_settings_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let settings = &context.data.settings;
    let school = &settings.school;

    output::section("School");
    output::info(format!("  Name     : {}", school.name));
    output::info(format!("  UDISE    : {}", school.udise_code));
    output::info(format!("  Block    : {}", school.block));
    output::info(format!("  District : {}", school.district));
    output::info(format!("  Incharge : {}", school.incharge_name));
    output::info(format!("  Contact  : {}", school.incharge_contact));
    output::info(format!("  Kitchen  : {}", school.kitchen_type));

    output::section("Class rolls");
    if settings.class_rolls.is_empty() {
        output::info("  (none)");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Class"),
            TableColumn::left("Cohort"),
            TableColumn::right("Gen B"),
            TableColumn::right("Gen G"),
            TableColumn::right("ST/SC B"),
            TableColumn::right("ST/SC G"),
            TableColumn::right("On roll"),
        ]);
        for roll in &settings.class_rolls {
            table.push_row(vec![
                roll.class_label.clone(),
                roll.category.label().to_string(),
                roll.general.boys.to_string(),
                roll.general.girls.to_string(),
                roll.st_sc.boys.to_string(),
                roll.st_sc.girls.to_string(),
                roll.on_roll().to_string(),
            ]);
        }
        print!("{}", table.render());
        output::info(format!("  Total on roll: {}", settings.total_on_roll()));
    }

    output::section("Rates");
    let mut table = Table::new(vec![
        TableColumn::left("Kind"),
        TableColumn::right("Balvatika"),
        TableColumn::right("Primary"),
        TableColumn::right("Middle"),
    ]);
    for kind in RateKind::ALL {
        let rate = settings.rates.get(kind);
        table.push_row(vec![
            kind.label().to_string(),
            format!("{:.2}", rate.balvatika),
            format!("{:.2}", rate.primary),
            format!("{:.2}", rate.middle),
        ]);
    }
    print!("{}", table.render());

    output::section("Staff");
    if settings.staff.is_empty() {
        output::info("  (none)");
    } else {
        for member in &settings.staff {
            output::info(format!("  {} ({})", member.name, member.role));
        }
    }

    output::section("Alerts and flags");
    output::info(format!(
        "  Rice threshold : {:.2} kg",
        settings.alerts.min_rice_kg
    ));
    output::info(format!(
        "  Cash threshold : Rs {:.2}",
        settings.alerts.min_cash
    ));
    output::info(format!(
        "  Auto-overwrite : {}",
        if settings.auto_overwrite_entries {
            "on"
        } else {
            "off"
        }
    ));
    Ok(())
}

fn cmd_school_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "school-set <name|udise|block|district|incharge|contact|kitchen> <value...>";
    let [field, rest @ ..] = args else {
        return Err(CommandError::Usage(usage.into()));
    };
    if rest.is_empty() {
        return Err(CommandError::Usage(usage.into()));
    }
    let value = rest.join(" ");

    let mut settings = context.data.settings.clone();
    match field.to_lowercase().as_str() {
        "name" => settings.school.name = value,
        "udise" => settings.school.udise_code = value,
        "block" => settings.school.block = value,
        "district" => settings.school.district = value,
        "incharge" => settings.school.incharge_name = value,
        "contact" => settings.school.incharge_contact = value,
        "kitchen" => settings.school.kitchen_type = parse_kitchen(&value)?,
        other => {
            return Err(CommandError::Failed(format!(
                "unknown school field `{other}`"
            )))
        }
    }
    save_settings(context, settings)?;
    output::success(format!("School {field} updated."));
    Ok(())
}

fn cmd_rate_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, bal, pri, mid] = args else {
        return Err(CommandError::Usage(
            "rate-set <rice|dal-veg|oil-cond|salt|fuel> <balvatika> <primary> <middle>".into(),
        ));
    };
    let kind: RateKind = kind
        .parse()
        .map_err(|err: RegisterError| CommandError::Failed(err.to_string()))?;
    let values = PerCategory::new(parse_f64(bal)?, parse_f64(pri)?, parse_f64(mid)?);

    let mut settings = context.data.settings.clone();
    *settings.rates.get_mut(kind) = values;
    save_settings(context, settings)?;
    output::success(format!("{} rates updated.", kind.label()));
    Ok(())
}

fn cmd_threshold_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [which, value] = args else {
        return Err(CommandError::Usage("threshold-set <rice|cash> <value>".into()));
    };
    let value = parse_f64(value)?;

    let mut settings = context.data.settings.clone();
    match which.to_lowercase().as_str() {
        "rice" => settings.alerts.min_rice_kg = value,
        "cash" => settings.alerts.min_cash = value,
        other => {
            return Err(CommandError::Failed(format!(
                "unknown threshold `{other}` (expected rice or cash)"
            )))
        }
    }
    save_settings(context, settings)?;
    output::success("Alert threshold updated.");
    Ok(())
}

fn cmd_opening_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [rice_b, rice_p, rice_m, cash_b, cash_p, cash_m] = args else {
        return Err(CommandError::Usage(
            "opening-set <riceBal> <ricePri> <riceMid> <cashBal> <cashPri> <cashMid>".into(),
        ));
    };
    let mut settings = context.data.settings.clone();
    settings.initial_opening_balance.rice =
        PerCategory::new(parse_f64(rice_b)?, parse_f64(rice_p)?, parse_f64(rice_m)?);
    settings.initial_opening_balance.cash =
        PerCategory::new(parse_f64(cash_b)?, parse_f64(cash_p)?, parse_f64(cash_m)?);
    save_settings(context, settings)?;
    output::success("Initial opening balance updated.");
    Ok(())
}

fn cmd_roll_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [class_label, category, gen_boys, gen_girls, st_boys, st_girls] = args else {
        return Err(CommandError::Usage(
            "roll-add <class> <balvatika|primary|middle> <genBoys> <genGirls> <stScBoys> <stScGirls>"
                .into(),
        ));
    };
    let category: Category = category
        .parse()
        .map_err(|err: RegisterError| CommandError::Failed(err.to_string()))?;
    let roll = ClassRoll {
        class_label: class_label.to_string(),
        category,
        general: GenderCount::new(parse_u32(gen_boys)?, parse_u32(gen_girls)?),
        st_sc: GenderCount::new(parse_u32(st_boys)?, parse_u32(st_girls)?),
    };

    let mut settings = context.data.settings.clone();
    settings.class_rolls.push(roll);
    save_settings(context, settings)?;
    output::success(format!("Class {class_label} added."));
    Ok(())
}

fn cmd_roll_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut settings = context.data.settings.clone();
    let count = settings.class_rolls.len();
    settings.class_rolls.clear();
    save_settings(context, settings)?;
    output::success(format!("Removed {count} class roll line(s)."));
    Ok(())
}

fn cmd_staff_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, role] = args else {
        return Err(CommandError::Usage("staff-add <name> <role>".into()));
    };
    let mut settings = context.data.settings.clone();
    settings.staff.push(StaffMember::new(*name, *role));
    save_settings(context, settings)?;
    output::success(format!("Staff member {name} added."));
    Ok(())
}

fn cmd_staff_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::Usage("staff-remove <name>".into()));
    };
    let mut settings = context.data.settings.clone();
    let before = settings.staff.len();
    settings
        .staff
        .retain(|member| !member.name.eq_ignore_ascii_case(name));
    if settings.staff.len() == before {
        return Err(CommandError::Failed(format!(
            "no staff member named `{name}`"
        )));
    }
    save_settings(context, settings)?;
    output::success(format!("Staff member {name} removed."));
    Ok(())
}

fn cmd_auto_overwrite(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = match args {
        ["on"] => true,
        ["off"] => false,
        _ => return Err(CommandError::Usage("auto-overwrite <on|off>".into())),
    };
    let mut settings = context.data.settings.clone();
    settings.auto_overwrite_entries = enabled;
    save_settings(context, settings)?;
    output::success(format!(
        "Auto-overwrite is {}.",
        if enabled { "on" } else { "off" }
    ));
    Ok(())
}

fn save_settings(context: &mut ShellContext, settings: Settings) -> Result<(), CommandError> {
    SettingsService::save(&mut context.data, settings)?;
    context.mark_dirty();
    Ok(())
}

fn parse_kitchen(value: &str) -> Result<KitchenType, CommandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "school" | "school-kitchen" => Ok(KitchenType::SchoolKitchen),
        "centralized" | "centralized-kitchen" => Ok(KitchenType::CentralizedKitchen),
        "ngo" | "ngo-supplied" => Ok(KitchenType::NgoSupplied),
        other => Err(CommandError::Failed(format!(
            "unknown kitchen type `{other}` (expected school, centralized or ngo)"
        ))),
    }
}
