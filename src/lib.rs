//! Markdown reference documentation for a Discord bot's application commands.
//!
//! Attach a [`DocsGenerator`] at startup and call
//! [`DocsGenerator::after_extensions_added`] once every extension is registered.

pub mod command_list;
pub mod config;
pub mod error;
pub mod extra_docs;
pub mod generator;
pub mod i18n;
pub mod on_startup;
pub mod permissions;
pub mod register;

pub use commands_docgen::*;

pub use config::{DocsConfig, Environment, SupportedFileFormat, TranslationSupport};
pub use error::{DocsError, Result};
pub use extra_docs::ExtraDocsTable;
pub use generator::markdown::DocumentTarget;
pub use generator::DocsGenerator;
pub use i18n::{Locale, Translations};
pub use on_startup::{GenerationOutcome, SkipReason};
