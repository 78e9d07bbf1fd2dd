//! CLI errors. Every variant exits with status 2.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("invalid position `{0}`, expected <line>:<col> starting at 1")]
    InvalidPosition(String),

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("cannot infer a language from `{}`, pass --lang", path.display())]
    UndetectedLanguage { path: PathBuf },

    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit status for this error.
    pub const EXIT_CODE: i32 = 2;

    /// Usage mistakes get the usage text printed after the message.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_) | Self::UnexpectedArgument(_) | Self::InvalidPosition(_)
        )
    }
}
