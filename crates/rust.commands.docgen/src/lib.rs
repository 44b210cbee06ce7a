/// Data model for documenting a bot's application commands.
//
use serenity::all::Permissions;
use std::str::FromStr;

/// The kinds of application commands that can be documented.
///
/// Text (prefix) commands are not included
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CommandKind {
    #[serde(rename = "slash")]
    Slash,
    #[serde(rename = "message")]
    Message,
    #[serde(rename = "user")]
    User,
}

impl CommandKind {
    /// Every command kind, in documentation order
    pub const ALL: [CommandKind; 3] = [CommandKind::Slash, CommandKind::Message, CommandKind::User];
}

impl FromStr for CommandKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slash" => Ok(Self::Slash),
            "message" => Ok(Self::Message),
            "user" => Ok(Self::User),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slash => write!(f, "slash"),
            Self::Message => write!(f, "message"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A converter whose name already says what it parses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DirectConverter {
    Attachment,
    Boolean,
    Channel,
    Color,
    Decimal,
    Duration,
    DurationCoalescing,
    Email,
    Emoji,
    Enum,
    Guild,
    Int,
    Long,
    Member,
    Message,
    Regex,
    RegexCoalescing,
    Role,
    Snowflake,
    StringCoalescing,
    String,
    SupportedLocale,
    Timestamp,
    User,
    StringChoice,
    NumberChoice,
    EnumChoice,
}

impl DirectConverter {
    pub const ALL: [DirectConverter; 27] = [
        Self::Attachment,
        Self::Boolean,
        Self::Channel,
        Self::Color,
        Self::Decimal,
        Self::Duration,
        Self::DurationCoalescing,
        Self::Email,
        Self::Emoji,
        Self::Enum,
        Self::Guild,
        Self::Int,
        Self::Long,
        Self::Member,
        Self::Message,
        Self::Regex,
        Self::RegexCoalescing,
        Self::Role,
        Self::Snowflake,
        Self::StringCoalescing,
        Self::String,
        Self::SupportedLocale,
        Self::Timestamp,
        Self::User,
        Self::StringChoice,
        Self::NumberChoice,
        Self::EnumChoice,
    ];

    /// The converter's type identifier, without any namespace
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Attachment => "AttachmentConverter",
            Self::Boolean => "BooleanConverter",
            Self::Channel => "ChannelConverter",
            Self::Color => "ColorConverter",
            Self::Decimal => "DecimalConverter",
            Self::Duration => "DurationConverter",
            Self::DurationCoalescing => "DurationCoalescingConverter",
            Self::Email => "EmailConverter",
            Self::Emoji => "EmojiConverter",
            Self::Enum => "EnumConverter",
            Self::Guild => "GuildConverter",
            Self::Int => "IntConverter",
            Self::Long => "LongConverter",
            Self::Member => "MemberConverter",
            Self::Message => "MessageConverter",
            Self::Regex => "RegexConverter",
            Self::RegexCoalescing => "RegexCoalescingConverter",
            Self::Role => "RoleConverter",
            Self::Snowflake => "SnowflakeConverter",
            Self::StringCoalescing => "StringCoalescingConverter",
            Self::String => "StringConverter",
            Self::SupportedLocale => "SupportedLocaleConverter",
            Self::Timestamp => "TimestampConverter",
            Self::User => "UserConverter",
            Self::StringChoice => "StringChoiceConverter",
            Self::NumberChoice => "NumberChoiceConverter",
            Self::EnumChoice => "EnumChoiceConverter",
        }
    }
}

impl FromStr for DirectConverter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.identifier() == s)
            .ok_or(())
    }
}

/// A converter that wraps another converter (optional, defaulting, list etc.)
///
/// These don't encode the wrapped type in their name, so the signature tag of the
/// argument is needed to describe them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DecoratorConverter {
    CoalescingToDefaulting,
    CoalescingToOptional,
    SingleToDefaulting,
    SingleToList,
    SingleToOptional,
}

impl DecoratorConverter {
    pub const ALL: [DecoratorConverter; 5] = [
        Self::CoalescingToDefaulting,
        Self::CoalescingToOptional,
        Self::SingleToDefaulting,
        Self::SingleToList,
        Self::SingleToOptional,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            Self::CoalescingToDefaulting => "CoalescingToDefaultingConverter",
            Self::CoalescingToOptional => "CoalescingToOptionalConverter",
            Self::SingleToDefaulting => "SingleToDefaultingConverter",
            Self::SingleToList => "SingleToListConverter",
            Self::SingleToOptional => "SingleToOptionalConverter",
        }
    }
}

impl FromStr for DecoratorConverter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.identifier() == s)
            .ok_or(())
    }
}

/// The converter used by an argument, known at registration time
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Converter {
    Direct(DirectConverter),
    Decorated {
        decorator: DecoratorConverter,
        /// Short semantic tag of the wrapped value, e.g. `channel` or `number`
        signature: String,
    },
}

/// How an argument refers to its converter.
///
/// Hosts that can name the converter up front should use `Typed`. `TypeId` keeps the
/// raw type name (e.g. `commands.converters.impl.ChannelConverter@1a2b3c`) and is
/// resolved when documentation is generated
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ConverterRef {
    #[serde(rename = "typed")]
    Typed(Converter),
    #[serde(rename = "type_id")]
    TypeId { type_id: String, signature: String },
}

impl Default for ConverterRef {
    fn default() -> Self {
        ConverterRef::Typed(Converter::Direct(DirectConverter::String))
    }
}

/// An argument of a slash command
#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    pub display_name: String,
    pub description: String,
    pub converter: ConverterRef,
}

// ArgumentDescriptor builder code
impl ArgumentDescriptor {
    pub fn new(display_name: &str, description: &str) -> Self {
        ArgumentDescriptor {
            display_name: display_name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn direct(self, converter: DirectConverter) -> Self {
        let mut a = self;
        a.converter = ConverterRef::Typed(Converter::Direct(converter));
        a
    }

    pub fn decorated(self, decorator: DecoratorConverter, signature: &str) -> Self {
        let mut a = self;
        a.converter = ConverterRef::Typed(Converter::Decorated {
            decorator,
            signature: signature.to_string(),
        });
        a
    }

    pub fn type_id(self, type_id: &str, signature: &str) -> Self {
        let mut a = self;
        a.converter = ConverterRef::TypeId {
            type_id: type_id.to_string(),
            signature: signature.to_string(),
        };
        a
    }

    pub fn build(self) -> ArgumentDescriptor {
        self
    }
}

/// A registered application command, as seen by the documentation generator
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    #[serde(default)]
    pub arguments: Vec<ArgumentDescriptor>,
    #[serde(default)]
    pub sub_commands: Vec<CommandDescriptor>,
    /// Permissions the bot needs to run the command
    #[serde(default = "Permissions::empty")]
    pub required_permissions: Permissions,
    #[serde(default)]
    pub default_member_permissions: Option<Permissions>,
    /// Name of the parent command, set on sub-commands
    #[serde(default)]
    pub parent: Option<String>,
    /// Translation bundle for the command's own strings
    #[serde(default)]
    pub bundle: Option<String>,
}

impl Default for CommandDescriptor {
    fn default() -> Self {
        CommandDescriptor {
            name: String::new(),
            description: String::new(),
            kind: CommandKind::Slash,
            arguments: Vec::new(),
            sub_commands: Vec::new(),
            required_permissions: Permissions::empty(),
            default_member_permissions: None,
            parent: None,
            bundle: None,
        }
    }
}

// CommandDescriptor builder code
impl CommandDescriptor {
    pub fn new(kind: CommandKind, name: &str, description: &str) -> Self {
        CommandDescriptor {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            ..Default::default()
        }
    }

    pub fn slash(name: &str, description: &str) -> Self {
        Self::new(CommandKind::Slash, name, description)
    }

    pub fn message(name: &str) -> Self {
        Self::new(CommandKind::Message, name, "")
    }

    pub fn user(name: &str) -> Self {
        Self::new(CommandKind::User, name, "")
    }

    pub fn description(self, description: &str) -> Self {
        let mut c = self;
        c.description = description.to_string();
        c
    }

    pub fn add_argument(self, argument: ArgumentDescriptor) -> Self {
        let mut c = self;
        c.arguments.push(argument);
        c
    }

    /// Adds a sub-command, or updates the existing one with the same name.
    ///
    /// The sub-command's parent is set to this command's current name
    pub fn sub_command(
        self,
        name: &str,
        f: impl FnOnce(CommandDescriptor) -> CommandDescriptor,
    ) -> Self {
        let mut c = self;
        let parent = c.name.clone();

        if let Some(sub) = c.sub_commands.iter_mut().find(|s| s.name == name) {
            let mut new_sub = f(sub.clone());
            new_sub.parent = Some(parent);
            *sub = new_sub;
        } else {
            let sub = CommandDescriptor {
                name: name.to_string(),
                bundle: c.bundle.clone(),
                ..Default::default()
            };
            let mut new_sub = f(sub);
            new_sub.parent = Some(parent);
            c.sub_commands.push(new_sub);
        }

        c
    }

    pub fn required_permissions(self, permissions: Permissions) -> Self {
        let mut c = self;
        c.required_permissions = permissions;
        c
    }

    pub fn default_member_permissions(self, permissions: Permissions) -> Self {
        let mut c = self;
        c.default_member_permissions = Some(permissions);
        c
    }

    pub fn bundle(self, bundle: &str) -> Self {
        let mut c = self;
        c.bundle = Some(bundle.to_string());
        c
    }

    pub fn build(self) -> CommandDescriptor {
        self
    }
}

impl CommandDescriptor {
    pub fn has_sub_commands(&self) -> bool {
        !self.sub_commands.is_empty()
    }

    /// Name shown in headings: `parent sub` for sub-commands, otherwise just the name
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{} {}", parent, self.name),
            None => self.name.clone(),
        }
    }
}

/// Author-supplied extra documentation for a command
#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ExtraDocs {
    /// What running the command results in
    pub command_result: Option<String>,
    /// Any other notes
    pub extra_information: Option<String>,
}

// ExtraDocs builder code
impl ExtraDocs {
    pub fn command_result(self, result: &str) -> Self {
        let mut e = self;
        e.command_result = Some(result.to_string());
        e
    }

    pub fn extra_information(self, information: &str) -> Self {
        let mut e = self;
        e.extra_information = Some(information.to_string());
        e
    }
}

/// Anything that groups commands together (a bot extension, module, cog etc.)
pub trait CommandContainer {
    fn name(&self) -> &str;
    fn slash_commands(&self) -> &[CommandDescriptor];
    fn message_commands(&self) -> &[CommandDescriptor];
    fn user_commands(&self) -> &[CommandDescriptor];

    /// Commands of the given kind, in registration order
    fn commands(&self, kind: CommandKind) -> &[CommandDescriptor] {
        match kind {
            CommandKind::Slash => self.slash_commands(),
            CommandKind::Message => self.message_commands(),
            CommandKind::User => self.user_commands(),
        }
    }
}

/// A named group of commands
#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub slash_commands: Vec<CommandDescriptor>,
    #[serde(default)]
    pub message_commands: Vec<CommandDescriptor>,
    #[serde(default)]
    pub user_commands: Vec<CommandDescriptor>,
}

// Extension builder code
impl Extension {
    pub fn new(name: &str) -> Self {
        Extension {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a command to the list matching its kind
    pub fn add_command(self, command: CommandDescriptor) -> Self {
        let mut e = self;
        match command.kind {
            CommandKind::Slash => e.slash_commands.push(command),
            CommandKind::Message => e.message_commands.push(command),
            CommandKind::User => e.user_commands.push(command),
        }
        e
    }

    pub fn build(self) -> Extension {
        self
    }
}

impl CommandContainer for Extension {
    fn name(&self) -> &str {
        &self.name
    }

    fn slash_commands(&self) -> &[CommandDescriptor] {
        &self.slash_commands
    }

    fn message_commands(&self) -> &[CommandDescriptor] {
        &self.message_commands
    }

    fn user_commands(&self) -> &[CommandDescriptor] {
        &self.user_commands
    }
}
