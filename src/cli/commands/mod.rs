use std::collections::HashMap;

pub mod data;
pub mod entry;
pub mod receipt;
pub mod report;
pub mod settings;
pub mod summary;
pub mod system;

use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::domain::MonthKey;
use crate::errors::RegisterError;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(entry::definitions());
    commands.extend(receipt::definitions());
    commands.extend(summary::definitions());
    commands.extend(report::definitions());
    commands.extend(settings::definitions());
    commands.extend(data::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CommandError::Failed(format!("`{value}` is not a date of the form YYYY-MM-DD"))
    })
}

pub(crate) fn parse_month(value: &str) -> Result<MonthKey, CommandError> {
    value
        .parse()
        .map_err(|err: RegisterError| CommandError::Failed(err.to_string()))
}

pub(crate) fn parse_u32(value: &str) -> Result<u32, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::Failed(format!("`{value}` is not a whole number")))
}

pub(crate) fn parse_f64(value: &str) -> Result<f64, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::Failed(format!("`{value}` is not a number")))
}

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}
