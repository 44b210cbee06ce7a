use crate::error::Result;
use commands_docgen::{
    ArgumentDescriptor, CommandDescriptor, CommandKind, DecoratorConverter, DirectConverter,
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serenity::all::{CommandOptionType, CommandType, Permissions};

/// An application command as registered with Discord
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCommand {
    /// Discord treats a missing type as a chat input command
    #[serde(rename = "type", default)]
    pub kind: Option<CommandType>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_member_permissions: Option<Permissions>,
    #[serde(default)]
    pub options: Vec<CreateCommandOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCommandOption {
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: Vec<CreateCommandOptionChoice>,
    #[serde(default)]
    pub options: Vec<CreateCommandOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCommandOptionChoice {
    pub name: String,
    pub value: Value,
}

/// Parses a json array of command payloads into an extension
pub fn from_json(name: &str, json: &str) -> Result<Extension> {
    let commands: Vec<CreateCommand> = serde_json::from_str(json)?;
    Ok(extension_from_commands(name, &commands))
}

/// Builds an extension out of registered command payloads.
///
/// Commands of a type that can't be documented are skipped
pub fn extension_from_commands(name: &str, commands: &[CreateCommand]) -> Extension {
    let mut extension = Extension::new(name);

    for command in commands {
        let kind = match command.kind.unwrap_or(CommandType::ChatInput) {
            CommandType::ChatInput => CommandKind::Slash,
            CommandType::User => CommandKind::User,
            CommandType::Message => CommandKind::Message,
            other => {
                log::warn!(
                    "Skipping command {} with unsupported type {:?}",
                    command.name,
                    other
                );
                continue;
            }
        };

        let mut descriptor = CommandDescriptor::new(kind, &command.name, &command.description);
        if let Some(permissions) = command.default_member_permissions {
            descriptor = descriptor.default_member_permissions(permissions);
        }

        if kind == CommandKind::Slash {
            descriptor = add_options(descriptor, &command.options);
        }

        extension = extension.add_command(descriptor);
    }

    extension
}

fn add_options(command: CommandDescriptor, options: &[CreateCommandOption]) -> CommandDescriptor {
    let mut command = command;

    for option in options {
        match option.kind {
            CommandOptionType::SubCommand => {
                command = add_sub_command(command, &option.name, option);
            }
            CommandOptionType::SubCommandGroup => {
                for sub in &option.options {
                    let name = format!("{} {}", option.name, sub.name);
                    command = add_sub_command(command, &name, sub);
                }
            }
            _ => match argument(option) {
                Some(argument) => command = command.add_argument(argument),
                None => log::warn!(
                    "Skipping option {} of {} with unsupported type {:?}",
                    option.name,
                    command.name,
                    option.kind
                ),
            },
        }
    }

    command
}

fn add_sub_command(
    command: CommandDescriptor,
    name: &str,
    option: &CreateCommandOption,
) -> CommandDescriptor {
    command.sub_command(name, |s| {
        let s = s.description(&option.description);
        add_options(s, &option.options)
    })
}

/// The converter of an option and the signature tag of the value it parses
fn option_converter(option: &CreateCommandOption) -> Option<(DirectConverter, &'static str)> {
    let has_choices = !option.choices.is_empty();

    Some(match option.kind {
        CommandOptionType::String if has_choices => (DirectConverter::StringChoice, "text"),
        CommandOptionType::String => (DirectConverter::String, "text"),
        CommandOptionType::Integer if has_choices => (DirectConverter::NumberChoice, "number"),
        CommandOptionType::Integer => (DirectConverter::Int, "number"),
        CommandOptionType::Number if has_choices => (DirectConverter::NumberChoice, "decimal"),
        CommandOptionType::Number => (DirectConverter::Decimal, "decimal"),
        CommandOptionType::Boolean => (DirectConverter::Boolean, "yes/no"),
        CommandOptionType::User => (DirectConverter::User, "user"),
        CommandOptionType::Channel => (DirectConverter::Channel, "channel"),
        CommandOptionType::Role => (DirectConverter::Role, "role"),
        CommandOptionType::Mentionable => (DirectConverter::Snowflake, "ID"),
        CommandOptionType::Attachment => (DirectConverter::Attachment, "attachment"),
        _ => return None,
    })
}

fn argument(option: &CreateCommandOption) -> Option<ArgumentDescriptor> {
    let (direct, signature) = option_converter(option)?;

    let argument = ArgumentDescriptor::new(&option.name, &option.description);

    Some(if option.required {
        argument.direct(direct)
    } else {
        argument.decorated(DecoratorConverter::SingleToOptional, signature)
    })
}
