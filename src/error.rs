//! Error taxonomy for argoscope.
//!
//! Usage errors (bad framework or weight input) are fatal and propagate to
//! the caller; the core never falls back to degraded output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate argument label: {0}")]
    DuplicateArgument(String),

    #[error("argument set is empty")]
    EmptyArgumentSet,

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("attacker {attacker} of {target} is not in the argument set")]
    UnknownAttacker { attacker: String, target: String },

    #[error("no weight supplied for argument {0}")]
    MissingWeight(String),

    #[error("invalid weight {value} for argument {argument} (must be finite and >= 0)")]
    InvalidWeight { argument: String, value: f64 },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("sampling run cancelled")]
    Cancelled,

    #[error("cannot parse attack relations: {0}")]
    ParseRelations(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
