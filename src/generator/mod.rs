pub mod converters;
pub mod markdown;
pub mod writer;

use crate::config::SupportedFileFormat;
use crate::error::Result;
use crate::extra_docs::ExtraDocsTable;
use crate::i18n::{Locale, Translations};
use commands_docgen::{CommandContainer, CommandKind};
use indexmap::IndexMap;
use markdown::{DocumentTarget, MarkdownAssembler};
use std::path::{Path, PathBuf};
use writer::FileWriter;

/// Generates and writes command documentation
pub struct DocsGenerator {
    translations: Translations,
}

impl DocsGenerator {
    pub fn new(translations: Translations) -> Self {
        Self { translations }
    }

    /// A generator using only the built-in translation bundles
    pub fn with_builtin_translations() -> Result<Self> {
        Ok(Self::new(Translations::new()?))
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn translations_mut(&mut self) -> &mut Translations {
        &mut self.translations
    }

    /// Renders the documents without writing them
    pub fn generate<C: CommandContainer>(
        &self,
        format: SupportedFileFormat,
        kinds: &[CommandKind],
        containers: &[C],
        extra_docs: &ExtraDocsTable,
        locales: &[Locale],
    ) -> Result<IndexMap<DocumentTarget, String>> {
        match format {
            SupportedFileFormat::Markdown => {
                MarkdownAssembler::new(&self.translations, extra_docs)
                    .generate(kinds, containers, locales)
            }
        }
    }

    /// Generates the documents and overwrites the files at `path`, one per locale.
    ///
    /// Returns the written paths
    pub async fn update_documents_file<C: CommandContainer>(
        &self,
        path: &Path,
        format: SupportedFileFormat,
        kinds: &[CommandKind],
        containers: &[C],
        extra_docs: &ExtraDocsTable,
        locales: &[Locale],
    ) -> Result<Vec<PathBuf>> {
        let documents = self.generate(format, kinds, containers, extra_docs, locales)?;

        FileWriter::new(format).write_all(path, documents).await
    }
}
