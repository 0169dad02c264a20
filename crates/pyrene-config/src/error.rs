use miette::Diagnostic;
use pyrene_utils::error::{FileSystemError, PathError, UtilsError};
use thiserror::Error;

use crate::repository::RepoType;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Unknown repository: {0}")]
    #[diagnostic(
        code(pyrene_config::unknown_repo),
        help("Define it first with `pyrene define <name>`, or check `pyrene list`")
    )]
    UnknownRepo(String),

    #[error("Repository '{0}' has no type")]
    #[diagnostic(
        code(pyrene_config::undefined_repo_type),
        help("Set one with `pyrene set <name> type=<file|http|piplocal|pypi>`")
    )]
    UndefinedRepoType(String),

    #[error("Unknown repository type: {0}")]
    #[diagnostic(
        code(pyrene_config::unknown_repo_type),
        help("Supported types are: file, http, piplocal, pypi")
    )]
    UnknownRepoType(String),

    #[error("{repo_type} repository requires the '{attribute}' attribute")]
    #[diagnostic(
        code(pyrene_config::missing_attribute),
        help("Set it with `pyrene set <name> <attribute>=<value>`")
    )]
    MissingAttribute {
        repo_type: RepoType,
        attribute: &'static str,
    },

    #[error("No such section: {0}")]
    #[diagnostic(
        code(pyrene_config::no_section),
        help("Add the section before writing options to it")
    )]
    NoSection(String),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(
        code(pyrene_config::toml),
        help("Check the repository file syntax")
    )]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(
        code(pyrene_config::unexpected_toml_item),
        help("Repository sections may only hold plain `key = \"value\"` pairs")
    )]
    UnexpectedTomlItem(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Utils(#[from] UtilsError),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
