//! Compile-time failures.
//!
//! A validator rejects a single raw value with a [`ValueError`]; the compiler
//! attaches the field that carried it and surfaces a [`CompileError`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{0:?} is not an unsigned integer")]
    NotUnsigned(String),

    #[error("{0:?} is not a valid url")]
    MalformedUrl(String),

    #[error("{0:?} is not a level name or integer level")]
    UnknownLevel(String),

    #[error("{text:?} is not a valid regular expression: {reason}")]
    InvalidRegex { text: String, reason: String },

    #[error("{0:?} is not a valid script identifier")]
    InvalidIdentifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid value for field {field:?}: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: ValueError,
    },

    #[error("logger {logger:?} references unknown appender {appender:?}")]
    DanglingAppender { logger: String, appender: String },

    #[error("invalid productionLibraryPath: {source}")]
    InvalidLibraryPath {
        #[source]
        source: ValueError,
    },
}

impl CompileError {
    pub fn field(&self) -> &str {
        match self {
            CompileError::InvalidField { field, .. } => field,
            CompileError::DanglingAppender { .. } => "appenders",
            CompileError::InvalidLibraryPath { .. } => "productionLibraryPath",
        }
    }
}
