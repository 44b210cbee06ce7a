use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// The converter is missing from the label tables. This means the converter set
    /// gained a type the tables have not been updated for
    #[error("Invalid converter: {0}. Please report this so the converter tables can be updated")]
    InvalidConverter(String),

    #[error("Conflicting file formats! Expected `.{expected}` files but the path has `.{found}`")]
    ConflictingFileFormat { expected: String, found: String },

    #[error("Invalid value `{value}` for `{variable}`. Expected `development` or `production`")]
    InvalidEnvironmentVariable { variable: String, value: String },

    #[error("Unable to read/write documents file {}! Please check the permissions", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocsError {
    /// True for the I/O family of errors (including inaccessible files)
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Inaccessible { .. })
    }
}
