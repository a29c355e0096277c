//! Shell state and command dispatch plumbing.

use dialoguer::{theme::ColorfulTheme, Confirm};
use thiserror::Error;

use crate::cli::commands::{self, CommandRegistry};
use crate::cli::output;
use crate::domain::app_data::AppData;
use crate::errors::{CliError, RegisterError};
use crate::storage::{AppStore, Autosave};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Errors surfaced by command handlers. All of them are reported as
/// messages and leave the shell running, except the explicit exit request.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("Usage: {0}")]
    Usage(String),
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Core(#[from] RegisterError),
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: AppStore,
    pub data: AppData,
    pub autosave: Autosave,
    pub theme: ColorfulTheme,
    pub running: bool,
    pub last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let store = AppStore::new_default()?;
        let data = store.load()?;
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            data,
            autosave: Autosave::default(),
            theme: ColorfulTheme::default(),
            running: true,
            last_command: None,
        })
    }

    #[cfg(test)]
    pub fn with_store(mode: CliMode, store: AppStore) -> Result<Self, CliError> {
        let data = store.load()?;
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            data,
            autosave: Autosave::default(),
            theme: ColorfulTheme::default(),
            running: true,
            last_command: None,
        })
    }

    pub fn prompt(&self) -> String {
        let school = self.data.settings.school.name.trim();
        if school.is_empty() {
            "mdm> ".to_string()
        } else {
            format!("mdm [{school}]> ")
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match (definition.handler)(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Nearest-name hint for a mistyped command.
    pub fn suggest_command(&self, raw: &str) {
        let needle = raw.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (name, strsim::jaro_winkler(&needle, name)))
            .filter(|(_, score)| *score > 0.8)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some((name, _)) => {
                output::warning(format!("Unknown command `{raw}`. Did you mean `{name}`?"))
            }
            None => output::warning(format!("Unknown command `{raw}`. Try `help`.")),
        }
    }

    /// Interactive yes/no; script mode always declines so scripted runs
    /// must pass explicit flags instead.
    pub fn confirm(&self, question: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(false);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|err| CommandError::Failed(err.to_string()))
    }

    pub fn mark_dirty(&mut self) {
        self.autosave.mark_dirty();
    }

    /// Debounced write between commands; failures are reported, not fatal.
    pub fn flush_autosave_if_due(&mut self) {
        if let Err(err) = self.autosave.flush_if_due(&self.store, &self.data) {
            output::error(format!("Autosave failed: {err}"));
        }
    }

    pub fn flush_autosave(&mut self) {
        if let Err(err) = self.autosave.flush(&self.store, &self.data) {
            output::error(format!("Save failed: {err}"));
        }
    }

    pub fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        output::error(err.to_string());
        Ok(())
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit the shell?")
            .default(true)
            .interact()
            .unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = AppStore::new(Some(temp.path().to_path_buf()), None).unwrap();
        let context = ShellContext::with_store(CliMode::Script, store).unwrap();
        (context, temp)
    }

    #[test]
    fn unknown_command_keeps_the_loop_running() {
        let (mut context, _temp) = context();
        let control = context.dispatch("bogus", "bogus", &[]).unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let (mut context, _temp) = context();
        let control = context.dispatch("exit", "exit", &[]).unwrap();
        assert_eq!(control, LoopControl::Exit);
    }

    #[test]
    fn script_mode_declines_confirmations() {
        let (context, _temp) = context();
        assert!(!context.confirm("overwrite?").unwrap());
        assert!(context.confirm_exit().unwrap());
    }

    #[test]
    fn prompt_carries_the_school_name_once_set() {
        let (mut context, _temp) = context();
        assert_eq!(context.prompt(), "mdm> ");
        context.data.settings.school.name = "GPS Rampur".into();
        assert_eq!(context.prompt(), "mdm [GPS Rampur]> ");
    }
}
