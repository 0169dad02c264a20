use miette::Diagnostic;
use pyrene_config::error::ConfigError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid attribute assignment: {0}")]
    #[diagnostic(
        code(pyrene::invalid_assignment),
        help("Use KEY=VALUE, e.g. `type=file` or `directory=/srv/packages`")
    )]
    InvalidAssignment(String),

    #[error("{0} of {1} repositories failed to resolve")]
    #[diagnostic(
        code(pyrene::check_failed),
        help("Run `pyrene show <name>` to inspect the failing definitions")
    )]
    CheckFailed(usize, usize),

    #[error(transparent)]
    #[diagnostic(code(pyrene::json))]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
