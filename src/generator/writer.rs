use super::markdown::DocumentTarget;
use crate::config::SupportedFileFormat;
use crate::error::{DocsError, Result};
use crate::i18n::Locale;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// `docs/commands.md` + `de` -> `docs/commands-de.md`
pub fn localized_path(base: &Path, locale: &Locale) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, locale.tag(), ext.to_string_lossy()),
        None => format!("{}-{}", stem, locale.tag()),
    };

    base.with_file_name(file_name)
}

pub fn target_path(base: &Path, target: &DocumentTarget) -> PathBuf {
    match target {
        DocumentTarget::Default => base.to_path_buf(),
        DocumentTarget::Locale(locale) => localized_path(base, locale),
    }
}

/// A rendered document and where it goes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub target: DocumentTarget,
    pub content: String,
    pub path: PathBuf,
}

impl RenderedDocument {
    pub fn new(base: &Path, target: DocumentTarget, content: String) -> Self {
        RenderedDocument {
            path: target_path(base, &target),
            target,
            content,
        }
    }
}

/// Writes rendered documents to disk, overwriting what was there
pub struct FileWriter {
    format: SupportedFileFormat,
}

impl FileWriter {
    pub fn new(format: SupportedFileFormat) -> Self {
        Self { format }
    }

    /// Writes every document next to `base`, returning the written paths in order.
    ///
    /// All extensions are checked before anything is created, so a conflicting format
    /// leaves the filesystem untouched
    pub async fn write_all(
        &self,
        base: &Path,
        documents: IndexMap<DocumentTarget, String>,
    ) -> Result<Vec<PathBuf>> {
        let documents = documents
            .into_iter()
            .map(|(target, text)| RenderedDocument::new(base, target, text))
            .collect::<Vec<_>>();

        for document in &documents {
            self.check_extension(&document.path)?;
        }

        let mut written = Vec::with_capacity(documents.len());
        for document in documents {
            self.write_document(&document).await?;
            log::info!("Written documents for {}!", document.target);
            written.push(document.path);
        }

        Ok(written)
    }

    pub fn check_extension(&self, path: &Path) -> Result<()> {
        let found = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        if found != self.format.file_extension() {
            return Err(DocsError::ConflictingFileFormat {
                expected: self.format.file_extension().to_string(),
                found,
            });
        }

        Ok(())
    }

    pub async fn write_document(&self, document: &RenderedDocument) -> Result<()> {
        ensure_exists(&document.path).await;
        check_access(&document.path).await?;
        tokio::fs::write(&document.path, document.content.as_bytes()).await?;
        Ok(())
    }
}

/// Creates the file if it isn't there yet. Failures are only logged, the access
/// check right after reports them
async fn ensure_exists(path: &Path) {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return;
    }

    match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(_) => log::debug!("Created documents file {}", path.display()),
        Err(e) => log::error!("Failed to create documents file {}: {}", path.display(), e),
    }
}

async fn check_access(path: &Path) -> Result<()> {
    tokio::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .await
        .map_err(|source| DocsError::Inaccessible {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}
