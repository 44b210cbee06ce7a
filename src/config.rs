use crate::command_list::CommandList;
use crate::error::{DocsError, Result};
use crate::i18n::Locale;
use commands_docgen::CommandKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output formats the generator can write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportedFileFormat {
    #[serde(rename = "md")]
    Markdown,
}

impl SupportedFileFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
        }
    }
}

impl std::fmt::Display for SupportedFileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_extension())
    }
}

/// Where the bot is running. Documents are only generated in development
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(DocsError::InvalidEnvironmentVariable {
                variable: "environment".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct TranslationSupport {
    #[serde(default)]
    pub enable_translations: bool,
    #[serde(default)]
    pub supported_languages: Vec<Locale>,
}

fn default_file_path() -> PathBuf {
    PathBuf::from("docs/commands.md")
}

fn default_environment() -> String {
    "development".to_string()
}

/// The documentation block of a bot's configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocsConfig {
    /// Whether documents are generated at all
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
    pub file_format: SupportedFileFormat,
    #[serde(default)]
    pub command_types: Vec<CommandKind>,
    /// `development` or `production`, case-insensitive. Checked by `parsed_environment()`
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Register the `command-list` slash command
    #[serde(default)]
    pub use_builtin_command_list: bool,
    pub bot_name: Option<String>,
    #[serde(default)]
    pub translation_support: TranslationSupport,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            enabled: false,
            file_path: default_file_path(),
            file_format: SupportedFileFormat::Markdown,
            command_types: Vec::new(),
            environment: default_environment(),
            use_builtin_command_list: false,
            bot_name: None,
            translation_support: TranslationSupport::default(),
        }
    }
}

// DocsConfig builder code
impl DocsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(self, enabled: bool) -> Self {
        let mut c = self;
        c.enabled = enabled;
        c
    }

    pub fn file_path(self, path: impl Into<PathBuf>) -> Self {
        let mut c = self;
        c.file_path = path.into();
        c
    }

    pub fn file_format(self, format: SupportedFileFormat) -> Self {
        let mut c = self;
        c.file_format = format;
        c
    }

    pub fn command_types(self, kinds: &[CommandKind]) -> Self {
        let mut c = self;
        c.command_types = kinds.to_vec();
        c
    }

    pub fn environment(self, environment: &str) -> Self {
        let mut c = self;
        c.environment = environment.to_string();
        c
    }

    pub fn use_builtin_command_list(self, bot_name: &str) -> Self {
        let mut c = self;
        c.use_builtin_command_list = true;
        c.bot_name = Some(bot_name.to_string());
        c
    }

    /// Enables translations for the given languages
    pub fn translations(self, languages: &[Locale]) -> Self {
        let mut c = self;
        c.translation_support = TranslationSupport {
            enable_translations: true,
            supported_languages: languages.to_vec(),
        };
        c
    }
}

impl DocsConfig {
    /// Reads a config block from a yaml file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let cfg: DocsConfig = serde_yaml::from_reader(file)?;
        Ok(cfg)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses the configured environment
    pub fn parsed_environment(&self) -> Result<Environment> {
        self.environment.parse()
    }

    /// The built-in command list, when it is switched on.
    ///
    /// It lists the same command kinds that are documented
    pub fn command_list(&self) -> Option<CommandList> {
        if !self.use_builtin_command_list {
            return None;
        }

        let Some(bot_name) = &self.bot_name else {
            log::error!("The built-in command list needs a bot name, not adding it");
            return None;
        };

        Some(CommandList::new(bot_name, &self.command_types))
    }

    /// The languages to document in. Empty unless translations are enabled
    pub fn locales(&self) -> Vec<Locale> {
        if self.translation_support.enable_translations {
            self.translation_support.supported_languages.clone()
        } else {
            Vec::new()
        }
    }
}
