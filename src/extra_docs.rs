use commands_docgen::{CommandDescriptor, ExtraDocs};
use std::collections::HashMap;

/// Extra documentation registered by the bot author, keyed by command name.
///
/// Top-level commands and sub-commands live in separate tables. Sub-commands are
/// keyed by their qualified `parent sub` name, so two parents can share a
/// sub-command name. The table is handed
/// to the generator by reference and is never consumed, so the same entries are
/// rendered on every generation pass until `clear` is called
#[derive(Default, Debug, Clone)]
pub struct ExtraDocsTable {
    commands: HashMap<String, ExtraDocs>,
    sub_commands: HashMap<String, ExtraDocs>,
}

impl ExtraDocsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extra documentation of a top-level command.
    ///
    /// `f` receives the current entry (or an empty one) and returns the new entry
    pub fn additional_documentation(
        &mut self,
        command: &CommandDescriptor,
        f: impl FnOnce(ExtraDocs) -> ExtraDocs,
    ) -> &mut Self {
        let entry = self.commands.remove(&command.name).unwrap_or_default();
        self.commands.insert(command.name.clone(), f(entry));
        self
    }

    /// Sets the extra documentation of a sub-command
    pub fn sub_command_additional_documentation(
        &mut self,
        command: &CommandDescriptor,
        f: impl FnOnce(ExtraDocs) -> ExtraDocs,
    ) -> &mut Self {
        let name = command.qualified_name();
        let entry = self.sub_commands.remove(&name).unwrap_or_default();
        self.sub_commands.insert(name, f(entry));
        self
    }

    pub fn command(&self, name: &str) -> Option<&ExtraDocs> {
        self.commands.get(name)
    }

    /// Looks a sub-command up by its qualified name, e.g. `config view`
    pub fn sub_command(&self, qualified_name: &str) -> Option<&ExtraDocs> {
        self.sub_commands.get(qualified_name)
    }

    /// Looks the command up in the table for its scope (sub-command or top-level)
    pub fn for_command(&self, command: &CommandDescriptor) -> Option<&ExtraDocs> {
        if command.parent.is_some() {
            self.sub_command(&command.qualified_name())
        } else {
            self.command(&command.name)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.sub_commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.sub_commands.clear();
    }
}
