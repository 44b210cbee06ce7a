use super::converters::ConverterLabeler;
use crate::error::Result;
use crate::extra_docs::ExtraDocsTable;
use crate::i18n::{Locale, Translations};
use crate::permissions::{format_optional_permissions, format_permissions};
use commands_docgen::{CommandContainer, CommandDescriptor, CommandKind, ExtraDocs};
use indexmap::IndexMap;

/// Which document a rendering belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentTarget {
    /// No locales were requested; rendered in the default locale
    Default,
    Locale(Locale),
}

impl std::fmt::Display for DocumentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Locale(locale) => write!(f, "{}", locale),
        }
    }
}

/// The targets to render for a list of requested locales
pub fn document_targets(locales: &[Locale]) -> Vec<DocumentTarget> {
    if locales.is_empty() {
        vec![DocumentTarget::Default]
    } else {
        locales
            .iter()
            .cloned()
            .map(DocumentTarget::Locale)
            .collect()
    }
}

fn section_title_key(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Slash => "section.slash",
        CommandKind::Message => "section.message",
        CommandKind::User => "section.user",
    }
}

/// Collects every command of a kind across containers, keeping container order and
/// each container's own command order
pub fn collect_commands<C: CommandContainer>(
    kind: CommandKind,
    containers: &[C],
) -> Vec<&CommandDescriptor> {
    containers
        .iter()
        .flat_map(|container| container.commands(kind).iter())
        .collect()
}

/// Builds markdown reference documents for a set of command containers
pub struct MarkdownAssembler<'a> {
    translations: &'a Translations,
    extra_docs: &'a ExtraDocsTable,
}

impl<'a> MarkdownAssembler<'a> {
    pub fn new(translations: &'a Translations, extra_docs: &'a ExtraDocsTable) -> Self {
        Self {
            translations,
            extra_docs,
        }
    }

    /// Renders one document per requested locale, or a single default document if no
    /// locales were requested
    pub fn generate<C: CommandContainer>(
        &self,
        kinds: &[CommandKind],
        containers: &[C],
        locales: &[Locale],
    ) -> Result<IndexMap<DocumentTarget, String>> {
        let mut documents = IndexMap::new();

        for target in document_targets(locales) {
            let locale = match &target {
                DocumentTarget::Default => self.translations.default_locale(),
                DocumentTarget::Locale(locale) => locale,
            };

            let contents = self.render(kinds, containers, locale)?;
            log::debug!(
                "Generated {} bytes of markdown for {}",
                contents.len(),
                target
            );
            documents.insert(target, contents);
        }

        Ok(documents)
    }

    /// Renders the whole document in a single locale
    pub fn render<C: CommandContainer>(
        &self,
        kinds: &[CommandKind],
        containers: &[C],
        locale: &Locale,
    ) -> Result<String> {
        let renderer = LocaleRenderer {
            translations: self.translations,
            extra_docs: self.extra_docs,
            locale,
            labeler: ConverterLabeler::new(self.translations, locale),
        };

        let mut output = String::new();
        for kind in kinds {
            let commands = collect_commands(*kind, containers);
            output.push_str(&renderer.section(*kind, &commands)?);
        }

        Ok(output)
    }
}

struct LocaleRenderer<'a> {
    translations: &'a Translations,
    extra_docs: &'a ExtraDocsTable,
    locale: &'a Locale,
    labeler: ConverterLabeler<'a>,
}

impl LocaleRenderer<'_> {
    /// Translates one of the generator's own strings
    fn tr(&self, key: &str) -> String {
        self.translations.translate(key, self.locale, None)
    }

    /// Translates a string belonging to a command
    fn tr_command(&self, text: &str, command: &CommandDescriptor) -> String {
        self.translations
            .translate(text, self.locale, command.bundle.as_deref())
    }

    fn bullet(&self, out: &mut String, label_key: &str, value: &str) {
        out.push_str(&format!("* **{}**: {}\n", self.tr(label_key), value));
    }

    fn section(&self, kind: CommandKind, commands: &[&CommandDescriptor]) -> Result<String> {
        let mut out = format!("## {}\n\n", self.tr(section_title_key(kind)));

        if commands.is_empty() {
            out.push_str(&format!("{}\n\n", self.tr("commands.none")));
            return Ok(out);
        }

        for command in commands {
            match kind {
                CommandKind::Slash if command.has_sub_commands() => {
                    out.push_str(&self.parent_command(command)?)
                }
                CommandKind::Slash => out.push_str(&self.slash_command(command)?),
                CommandKind::Message => {
                    out.push_str(&self.context_command("header.messagecommand.name", command))
                }
                CommandKind::User => {
                    out.push_str(&self.context_command("header.usercommand.name", command))
                }
            }
        }

        Ok(out)
    }

    fn slash_command(&self, command: &CommandDescriptor) -> Result<String> {
        let extra = self.extra_docs.command(&command.name);

        let mut out = format!(
            "### {}: `{}`\n",
            self.tr("header.command.name"),
            self.tr_command(&command.name, command)
        );
        self.bullet(
            &mut out,
            "header.command.description",
            &self.tr_command(&command.description, command),
        );
        self.extra_lines(&mut out, command, extra);
        self.permissions(&mut out, command);
        out.push_str(&self.arguments(command)?);
        out.push('\n');

        Ok(out)
    }

    fn parent_command(&self, command: &CommandDescriptor) -> Result<String> {
        let extra = self.extra_docs.command(&command.name);

        let mut out = format!(
            "### {}: `{}`\n",
            self.tr("header.parentcommand.name"),
            self.tr_command(&command.name, command)
        );
        self.bullet(
            &mut out,
            "header.parentcommand.description",
            &self.tr_command(&command.description, command),
        );
        if let Some(info) = extra.and_then(|e| e.extra_information.as_deref()) {
            self.bullet(
                &mut out,
                "header.additionalinfo",
                &self.tr_command(info, command),
            );
        }
        out.push('\n');

        let parent_name = self.tr_command(&command.name, command);
        for sub_command in &command.sub_commands {
            out.push_str(&self.sub_command(&parent_name, sub_command)?);
        }

        Ok(out)
    }

    fn sub_command(&self, parent_name: &str, command: &CommandDescriptor) -> Result<String> {
        let extra = self.extra_docs.for_command(command);

        let mut out = format!(
            "#### {}: `{} {}`\n",
            self.tr("header.subcommand.name"),
            parent_name,
            self.tr_command(&command.name, command)
        );
        self.bullet(
            &mut out,
            "header.subcommand.description",
            &self.tr_command(&command.description, command),
        );
        self.extra_lines(&mut out, command, extra);
        self.permissions(&mut out, command);
        out.push_str(&self.arguments(command)?);
        out.push('\n');

        Ok(out)
    }

    /// Message and user commands have no description or arguments
    fn context_command(&self, header_key: &str, command: &CommandDescriptor) -> String {
        let extra = self.extra_docs.command(&command.name);

        let mut out = format!(
            "### {}: `{}`\n",
            self.tr(header_key),
            self.tr_command(&command.name, command)
        );
        self.extra_lines(&mut out, command, extra);
        self.permissions(&mut out, command);
        out.push('\n');

        out
    }

    fn extra_lines(
        &self,
        out: &mut String,
        command: &CommandDescriptor,
        extra: Option<&ExtraDocs>,
    ) {
        let Some(extra) = extra else {
            return;
        };

        if let Some(result) = &extra.command_result {
            self.bullet(out, "header.result", &self.tr_command(result, command));
        }

        if let Some(info) = &extra.extra_information {
            self.bullet(
                out,
                "header.additionalinfo",
                &self.tr_command(info, command),
            );
        }
    }

    fn permissions(&self, out: &mut String, command: &CommandDescriptor) {
        if let Some(required) =
            format_permissions(command.required_permissions, self.translations, self.locale)
        {
            self.bullet(out, "header.permissions.required", &required);
        }

        if let Some(default) = format_optional_permissions(
            command.default_member_permissions,
            self.translations,
            self.locale,
        ) {
            self.bullet(out, "header.permissions.default", &default);
        }
    }

    fn arguments(&self, command: &CommandDescriptor) -> Result<String> {
        if command.arguments.is_empty() {
            return Ok(format!(
                "* **{}**: {}\n",
                self.tr("header.arguments"),
                self.tr("arguments.none")
            ));
        }

        let mut out = format!("* **{}**:\n", self.tr("header.arguments"));
        for argument in &command.arguments {
            out.push_str(&format!(
                "\t* **{}** ({}): {}\n",
                self.tr_command(&argument.display_name, command),
                self.labeler.label_ref(&argument.converter)?,
                self.tr_command(&argument.description, command)
            ));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use commands_docgen::{ArgumentDescriptor, DecoratorConverter, DirectConverter, Extension};
    use serenity::all::Permissions;

    const CHANNEL_TYPE_ID: &str = "commands.converters.impl.ChannelConverter@7f3a";

    fn ping_extension() -> Extension {
        Extension::new("general").add_command(CommandDescriptor::slash("ping", "Pong!"))
    }

    fn moderation_extension() -> Extension {
        Extension::new("moderation")
            .add_command(
                CommandDescriptor::slash("ban", "Bans a user")
                    .required_permissions(Permissions::BAN_MEMBERS)
                    .default_member_permissions(Permissions::BAN_MEMBERS)
                    .add_argument(
                        ArgumentDescriptor::new("user", "The user to ban")
                            .direct(DirectConverter::User),
                    )
                    .add_argument(
                        ArgumentDescriptor::new("reason", "Why they were banned")
                            .decorated(DecoratorConverter::SingleToOptional, "text"),
                    ),
            )
            .add_command(
                CommandDescriptor::slash("config", "Configure the bot")
                    // Direct arguments are ignored once there are sub-commands
                    .add_argument(ArgumentDescriptor::new("ignored", "Never shown"))
                    .sub_command("view", |s| s.description("View the config"))
                    .sub_command("set", |s| {
                        s.description("Change a setting")
                            .required_permissions(Permissions::MANAGE_GUILD)
                            .add_argument(
                                ArgumentDescriptor::new("channel", "Log channel")
                                    .type_id(CHANNEL_TYPE_ID, "channel"),
                            )
                    }),
            )
            .add_command(CommandDescriptor::message("Report"))
            .add_command(CommandDescriptor::user("Profile"))
    }

    #[test]
    fn test_ping_document() {
        let translations = Translations::new().unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let docs = assembler
            .generate(&[CommandKind::Slash], &[ping_extension()], &[])
            .unwrap();

        assert_eq!(docs.len(), 1);
        let doc = &docs[&DocumentTarget::Default];

        assert_eq!(
            doc,
            "## Slash Commands\n\n\
             ### Command name: `ping`\n\
             * **Description**: Pong!\n\
             * **Arguments**: No arguments\n\n"
        );
        assert!(!doc.contains("permissions"));
        assert!(!doc.contains("Result"));
        assert!(!doc.contains("Additional information"));
    }

    #[test]
    fn test_full_document() {
        let translations = Translations::new().unwrap();
        let mut extra_docs = ExtraDocsTable::new();
        let ext = moderation_extension();
        extra_docs
            .additional_documentation(&ext.slash_commands[0], |e| {
                e.command_result("The user is banned")
            })
            .additional_documentation(&ext.slash_commands[1], |e| {
                e.extra_information("Only for admins")
            })
            .sub_command_additional_documentation(&ext.slash_commands[1].sub_commands[0], |e| {
                e.command_result("Shows the config")
            });

        let assembler = MarkdownAssembler::new(&translations, &extra_docs);
        let doc = assembler
            .render(&CommandKind::ALL, &[ext], &Locale::ENGLISH)
            .unwrap();

        let expected = "## Slash Commands\n\n\
            ### Command name: `ban`\n\
            * **Description**: Bans a user\n\
            * **Result**: The user is banned\n\
            * **Required bot permissions**: Ban Members\n\
            * **Default member permissions**: Ban Members\n\
            * **Arguments**:\n\
            \t* **user** (User): The user to ban\n\
            \t* **reason** (Optional String): Why they were banned\n\n\
            ### Command name: `config`\n\
            * **Description**: Configure the bot\n\
            * **Additional information**: Only for admins\n\n\
            #### Sub-command name: `config view`\n\
            * **Description**: View the config\n\
            * **Result**: Shows the config\n\
            * **Arguments**: No arguments\n\n\
            #### Sub-command name: `config set`\n\
            * **Description**: Change a setting\n\
            * **Required bot permissions**: Manage Server\n\
            * **Arguments**:\n\
            \t* **channel** (Channel): Log channel\n\n\
            ## Message Commands\n\n\
            ### Message command name: `Report`\n\n\
            ## User Commands\n\n\
            ### User command name: `Profile`\n\n";

        assert_eq!(doc, expected);
        assert!(!doc.contains("ignored"));
    }

    #[test]
    fn test_sub_command_extra_docs_stay_with_parent() {
        let translations = Translations::new().unwrap();
        let ext = Extension::new("settings")
            .add_command(
                CommandDescriptor::slash("config", "Configure the bot")
                    .sub_command("view", |s| s.description("View the config")),
            )
            .add_command(
                CommandDescriptor::slash("role", "Manage roles")
                    .sub_command("view", |s| s.description("View a role")),
            );

        let config_view = &ext.slash_commands[0].sub_commands[0];
        let mut extra_docs = ExtraDocsTable::new();
        extra_docs.sub_command_additional_documentation(config_view, |e| {
            e.command_result("Shows the config")
        });

        let assembler = MarkdownAssembler::new(&translations, &extra_docs);
        let doc = assembler
            .render(&[CommandKind::Slash], &[ext], &Locale::ENGLISH)
            .unwrap();

        assert_eq!(doc.matches("* **Result**: Shows the config\n").count(), 1);
        assert!(doc.contains(
            "#### Sub-command name: `role view`\n\
             * **Description**: View a role\n\
             * **Arguments**: No arguments\n\n"
        ));
    }

    #[test]
    fn test_empty_kind_keeps_section() {
        let translations = Translations::new().unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let doc = assembler
            .render(&[CommandKind::User], &[ping_extension()], &Locale::ENGLISH)
            .unwrap();

        assert_eq!(doc, "## User Commands\n\nNo commands\n\n");
    }

    #[test]
    fn test_container_order_is_kept() {
        let translations = Translations::new().unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let first = Extension::new("a")
            .add_command(CommandDescriptor::slash("zebra", "z"))
            .add_command(CommandDescriptor::slash("apple", "a"));
        let second = Extension::new("b").add_command(CommandDescriptor::slash("mango", "m"));

        let doc = assembler
            .render(&[CommandKind::Slash], &[first, second], &Locale::ENGLISH)
            .unwrap();

        let zebra = doc.find("`zebra`").unwrap();
        let apple = doc.find("`apple`").unwrap();
        let mango = doc.find("`mango`").unwrap();
        assert!(zebra < apple && apple < mango);
    }

    #[test]
    fn test_locale_fan_out() {
        let translations = Translations::new().unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let docs = assembler
            .generate(
                &[CommandKind::Slash],
                &[moderation_extension()],
                &[Locale::ENGLISH, Locale::GERMAN],
            )
            .unwrap();

        assert_eq!(
            docs.keys().cloned().collect::<Vec<_>>(),
            vec![
                DocumentTarget::Locale(Locale::ENGLISH),
                DocumentTarget::Locale(Locale::GERMAN)
            ]
        );

        let german = &docs[&DocumentTarget::Locale(Locale::GERMAN)];
        assert!(german.starts_with("## Slash-Befehle\n\n### Befehlsname: `ban`\n"));
        assert!(german.contains("* **Benötigte Bot-Berechtigungen**: Mitglieder bannen\n"));
        assert!(german.contains("\t* **user** (Benutzer): The user to ban\n"));
        assert!(german.contains("\t* **reason** (Optional Text): Why they were banned\n"));
        assert!(german.contains("* **Argumente**: Keine Argumente\n"));
    }

    #[test]
    fn test_command_strings_use_bundle() {
        let mut translations = Translations::new().unwrap();
        translations
            .load_yaml(
                "general",
                &Locale::GERMAN,
                "command.ping.description: Antwortet mit Pong!",
            )
            .unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let ext = Extension::new("general").add_command(
            CommandDescriptor::slash("ping", "command.ping.description").bundle("general"),
        );

        let doc = assembler
            .render(&[CommandKind::Slash], &[ext], &Locale::GERMAN)
            .unwrap();
        assert!(doc.contains("* **Beschreibung**: Antwortet mit Pong!\n"));
    }

    #[test]
    fn test_invalid_converter_fails_generation() {
        let translations = Translations::new().unwrap();
        let extra_docs = ExtraDocsTable::new();
        let assembler = MarkdownAssembler::new(&translations, &extra_docs);

        let ext = Extension::new("broken").add_command(
            CommandDescriptor::slash("weird", "Has a new converter").add_argument(
                ArgumentDescriptor::new("thing", "?")
                    .type_id("commands.converters.impl.ShinyNewConverter@1", "shiny"),
            ),
        );

        let err = assembler
            .generate(&[CommandKind::Slash], &[ext], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            DocsError::InvalidConverter(name) if name == "ShinyNewConverter"
        ));
    }
}
