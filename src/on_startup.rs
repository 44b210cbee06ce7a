use crate::config::{DocsConfig, Environment};
use crate::error::Result;
use crate::extra_docs::ExtraDocsTable;
use crate::generator::DocsGenerator;
use commands_docgen::CommandContainer;
use serenity::all::CreateCommand;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    Production,
    NoCommandTypes,
}

/// What the startup hook did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Skipped(SkipReason),
    Generated(Vec<PathBuf>),
}

impl DocsGenerator {
    /// Runs once every extension has been added to the bot.
    ///
    /// Writes the documents when the generator is enabled and the bot runs in
    /// development
    pub async fn after_extensions_added<C: CommandContainer>(
        &self,
        config: &DocsConfig,
        containers: &[C],
        extra_docs: &ExtraDocsTable,
    ) -> Result<GenerationOutcome> {
        if !config.enabled {
            log::debug!("Doc generator is disabled, not generating documents");
            return Ok(GenerationOutcome::Skipped(SkipReason::Disabled));
        }

        let environment = config.parsed_environment()?;

        if environment == Environment::Production {
            log::debug!("Running in production, not generating documents");
            return Ok(GenerationOutcome::Skipped(SkipReason::Production));
        }

        if config.command_types.is_empty() {
            log::error!(
                "No command types specified for the doc generator, not generating documents"
            );
            return Ok(GenerationOutcome::Skipped(SkipReason::NoCommandTypes));
        }

        log::debug!(
            "Generating documents for {} containers in {}",
            containers.len(),
            environment
        );

        let paths = self
            .update_documents_file(
                &config.file_path,
                config.file_format,
                &config.command_types,
                containers,
                extra_docs,
                &config.locales(),
            )
            .await?;

        Ok(GenerationOutcome::Generated(paths))
    }

    /// Registration payload of the built-in `command-list` command, if the config
    /// asks for it. Register it alongside the bot's own commands
    pub fn builtin_commands(&self, config: &DocsConfig) -> Vec<CreateCommand> {
        match config.command_list() {
            Some(list) => vec![list.create_command(self.translations(), &config.locales())],
            None => Vec::new(),
        }
    }
}
