use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesplitError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("Output directory does not exist or is not a directory: {path}")]
    OutputDirectoryInvalid { path: PathBuf },

    #[error(
        "Append target does not exist: {path} - create the file before using append mode (-a)"
    )]
    AppendTargetMissing { path: PathBuf },

    #[error("Failed to read input file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TypesplitError>;

impl TypesplitError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputDirectoryInvalid { .. } => 1,
            Self::AppendTargetMissing { .. } => 2,
            Self::InvalidArguments { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. } => 3,
            Self::ReadInput { .. } | Self::WriteOutput { .. } | Self::Io(_) => 4,
        }
    }
}
