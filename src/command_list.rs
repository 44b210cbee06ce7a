use crate::error::Result;
use crate::extra_docs::ExtraDocsTable;
use crate::generator::converters::ConverterLabeler;
use crate::generator::markdown::collect_commands;
use crate::i18n::{Locale, Translations};
use crate::permissions::format_permissions;
use commands_docgen::{CommandContainer, CommandDescriptor, CommandKind};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateCommand, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};

pub const COMMAND_NAME: &str = "command-list";

/// Custom id prefix of the page buttons, followed by `:<page index>`
pub const BUTTON_PREFIX: &str = "command-list:page";

/// One page of the command list, describing a single command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPage {
    pub title: String,
    pub description: String,
    pub arguments: String,
    pub permissions: String,
    pub result: Option<String>,
}

/// The built-in `command-list` slash command
pub struct CommandList {
    bot_name: String,
    kinds: Vec<CommandKind>,
}

impl CommandList {
    pub fn new(bot_name: &str, kinds: &[CommandKind]) -> Self {
        Self {
            bot_name: bot_name.to_string(),
            kinds: kinds.to_vec(),
        }
    }

    fn description(&self, translations: &Translations, locale: &Locale) -> String {
        translations
            .translate("commandlist.description", locale, None)
            .replace("{bot}", &self.bot_name)
    }

    /// Registration payload, localized into every given locale
    pub fn create_command(&self, translations: &Translations, locales: &[Locale]) -> CreateCommand {
        let description = self.description(translations, translations.default_locale());
        let mut command = CreateCommand::new(COMMAND_NAME).description(description);

        for locale in locales {
            command = command.description_localized(
                locale.tag(),
                self.description(translations, locale),
            );
        }

        command
    }

    /// One page per documented command, with sub-commands getting a page each
    pub fn pages<C: CommandContainer>(
        &self,
        containers: &[C],
        extra_docs: &ExtraDocsTable,
        translations: &Translations,
        locale: &Locale,
    ) -> Result<Vec<CommandPage>> {
        let builder = PageBuilder {
            extra_docs,
            translations,
            locale,
            labeler: ConverterLabeler::new(translations, locale),
        };

        let mut pages = Vec::new();
        for kind in &self.kinds {
            for command in collect_commands(*kind, containers) {
                if command.has_sub_commands() {
                    for sub_command in &command.sub_commands {
                        pages.push(builder.page(*kind, sub_command)?);
                    }
                } else {
                    pages.push(builder.page(*kind, command)?);
                }
            }
        }

        log::debug!("Built {} command list pages in {}", pages.len(), locale);
        Ok(pages)
    }

    /// The interaction response showing page `index`. Out of range indices show the
    /// closest page
    pub fn response(
        &self,
        pages: &[CommandPage],
        index: usize,
        translations: &Translations,
        locale: &Locale,
    ) -> CreateInteractionResponse {
        let tr = |key: &str| translations.translate(key, locale, None);

        let Some(index) = clamp_index(pages.len(), index) else {
            let embed = CreateEmbed::new()
                .title(self.description(translations, locale))
                .description(tr("commands.none"));

            return CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            );
        };

        let page = &pages[index];
        let mut embed = CreateEmbed::new().title(&page.title);
        // Context menu commands have no description
        if !page.description.is_empty() {
            embed = embed.description(&page.description);
        }

        embed = embed
            .field(tr("commandlist.field.arguments"), &page.arguments, false)
            .field(
                tr("commandlist.field.permissions"),
                &page.permissions,
                false,
            );

        if let Some(result) = &page.result {
            embed = embed.field(tr("commandlist.field.result"), result, false);
        }

        let footer = tr("commandlist.footer")
            .replace("{page}", &(index + 1).to_string())
            .replace("{total}", &pages.len().to_string());
        embed = embed.footer(CreateEmbedFooter::new(footer));

        let previous = CreateButton::new(format!("{}:{}", BUTTON_PREFIX, index.saturating_sub(1)))
            .label(tr("commandlist.button.previous"))
            .style(ButtonStyle::Secondary)
            .disabled(index == 0);
        let next = CreateButton::new(format!("{}:{}", BUTTON_PREFIX, index + 1))
            .label(tr("commandlist.button.next"))
            .style(ButtonStyle::Secondary)
            .disabled(index + 1 >= pages.len());

        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(embed)
                .components(vec![CreateActionRow::Buttons(vec![previous, next])]),
        )
    }
}

/// The page index a page button points at
pub fn page_from_custom_id(custom_id: &str) -> Option<usize> {
    custom_id
        .strip_prefix(BUTTON_PREFIX)?
        .strip_prefix(':')?
        .parse()
        .ok()
}

/// `None` when there are no pages
pub fn clamp_index(len: usize, index: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.min(len - 1))
    }
}

struct PageBuilder<'a> {
    extra_docs: &'a ExtraDocsTable,
    translations: &'a Translations,
    locale: &'a Locale,
    labeler: ConverterLabeler<'a>,
}

impl PageBuilder<'_> {
    fn tr(&self, key: &str) -> String {
        self.translations.translate(key, self.locale, None)
    }

    fn tr_command(&self, text: &str, command: &CommandDescriptor) -> String {
        self.translations
            .translate(text, self.locale, command.bundle.as_deref())
    }

    fn page(&self, kind: CommandKind, command: &CommandDescriptor) -> Result<CommandPage> {
        let name = match &command.parent {
            Some(parent) => format!(
                "{} {}",
                self.tr_command(parent, command),
                self.tr_command(&command.name, command)
            ),
            None => self.tr_command(&command.name, command),
        };

        let title = match kind {
            CommandKind::Slash => format!("/{}", name),
            CommandKind::Message | CommandKind::User => name,
        };

        let mut arguments = Vec::with_capacity(command.arguments.len());
        for argument in &command.arguments {
            arguments.push(format!(
                "**{}** ({}): {}",
                self.tr_command(&argument.display_name, command),
                self.labeler.label_ref(&argument.converter)?,
                self.tr_command(&argument.description, command)
            ));
        }

        let arguments = if arguments.is_empty() {
            self.tr("commandlist.none")
        } else {
            arguments.join("\n")
        };

        let permissions =
            format_permissions(command.required_permissions, self.translations, self.locale)
                .unwrap_or_else(|| self.tr("commandlist.none"));

        let result = self
            .extra_docs
            .for_command(command)
            .and_then(|e| e.command_result.as_deref())
            .map(|r| self.tr_command(r, command));

        Ok(CommandPage {
            title,
            description: self.tr_command(&command.description, command),
            arguments,
            permissions,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands_docgen::{ArgumentDescriptor, DirectConverter, Extension};
    use serenity::all::Permissions;

    fn extensions() -> Vec<Extension> {
        vec![
            Extension::new("general")
                .add_command(CommandDescriptor::slash("ping", "Pong!"))
                .add_command(CommandDescriptor::user("Profile")),
            Extension::new("moderation").add_command(
                CommandDescriptor::slash("mod", "Moderation")
                    .sub_command("ban", |s| {
                        s.description("Bans a user")
                            .required_permissions(Permissions::BAN_MEMBERS)
                            .add_argument(
                                ArgumentDescriptor::new("user", "Who to ban")
                                    .direct(DirectConverter::User),
                            )
                    })
                    .sub_command("kick", |s| s.description("Kicks a user")),
            ),
        ]
    }

    #[test]
    fn test_pages() {
        let translations = Translations::new().unwrap();
        let extensions = extensions();
        let mut extra_docs = ExtraDocsTable::new();
        extra_docs.sub_command_additional_documentation(
            &extensions[1].slash_commands[0].sub_commands[0],
            |e| e.command_result("The user is banned"),
        );

        let list = CommandList::new("Testbot", &[CommandKind::Slash, CommandKind::User]);
        let pages = list
            .pages(&extensions, &extra_docs, &translations, &Locale::ENGLISH)
            .unwrap();

        assert_eq!(
            pages.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["/ping", "/mod ban", "/mod kick", "Profile"]
        );

        assert_eq!(pages[0].arguments, "None");
        assert_eq!(pages[0].permissions, "None");
        assert_eq!(pages[0].result, None);

        assert_eq!(pages[1].arguments, "**user** (User): Who to ban");
        assert_eq!(pages[1].permissions, "Ban Members");
        assert_eq!(pages[1].result.as_deref(), Some("The user is banned"));
    }

    #[test]
    fn test_response() {
        let translations = Translations::new().unwrap();
        let list = CommandList::new("Testbot", &CommandKind::ALL);
        let pages = list
            .pages(
                &extensions(),
                &ExtraDocsTable::new(),
                &translations,
                &Locale::ENGLISH,
            )
            .unwrap();

        let response = list.response(&pages, 1, &translations, &Locale::ENGLISH);
        let value = serde_json::to_value(&response).unwrap();
        let embed = &value["data"]["embeds"][0];
        assert_eq!(embed["title"], "/mod ban");
        assert_eq!(embed["footer"]["text"], "Page 2 of 4");

        // Clamped to the last page
        let response = list.response(&pages, 100, &translations, &Locale::ENGLISH);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["embeds"][0]["title"], "Profile");
        assert_eq!(value["data"]["embeds"][0]["footer"]["text"], "Page 4 of 4");

        let response = list.response(&[], 0, &translations, &Locale::ENGLISH);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["embeds"][0]["description"], "No commands");
    }

    #[test]
    fn test_create_command() {
        let translations = Translations::new().unwrap();
        let list = CommandList::new("Testbot", &CommandKind::ALL);

        let command = list.create_command(&translations, &[Locale::GERMAN]);
        let value = serde_json::to_value(command).unwrap();
        assert_eq!(value["name"], COMMAND_NAME);
        assert_eq!(value["description"], "Shows a list of Testbot's commands!");
        assert_eq!(
            value["description_localizations"]["de"],
            "Zeigt eine Liste der Befehle von Testbot!"
        );
    }

    #[test]
    fn test_page_buttons() {
        assert_eq!(page_from_custom_id("command-list:page:3"), Some(3));
        assert_eq!(page_from_custom_id("command-list:page:x"), None);
        assert_eq!(page_from_custom_id("other:page:3"), None);

        assert_eq!(clamp_index(0, 5), None);
        assert_eq!(clamp_index(3, 5), Some(2));
        assert_eq!(clamp_index(3, 1), Some(1));
    }
}
