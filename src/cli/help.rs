use crate::cli::commands::{CommandDefinition, CommandRegistry};
use crate::cli::output;

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let width = registry
        .iter()
        .map(|def| def.name.len())
        .max()
        .unwrap_or(0);
    for definition in registry.iter() {
        output::info(format!(
            "  {:width$}  {}",
            definition.name,
            definition.description,
            width = width
        ));
    }
    output::info("\nUse `help <command>` for usage details.");
}

pub fn print_command(definition: &CommandDefinition) {
    output::section(definition.name);
    output::info(definition.description);
    output::info(format!("Usage: {}", definition.usage));
}
