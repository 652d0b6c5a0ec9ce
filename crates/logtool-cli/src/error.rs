// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::LogError;
use serde::Serialize;
use thiserror::Error;

/// Failure surfaced by the `logtool` binary, with a stable machine code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Log(#[from] LogError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render '{path}': {message}")]
    Plot { path: String, message: String },
    #[error("{0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn plot(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Plot {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Log(err) => err.code(),
            Self::InvalidInput(_) => "invalid_input",
            Self::Io { .. } => "io_error",
            Self::Json { .. } => "json_error",
            Self::Plot { .. } => "plot_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

/// Renders `err` as the JSON envelope printed on stderr.
pub fn error_envelope(err: &CliError) -> String {
    let envelope = ErrorEnvelope {
        error: ErrorPayload {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => json,
        Err(_) => format!(
            "{{\"error\":{{\"code\":\"{}\",\"message\":\"{}\"}}}}",
            err.code(),
            err
        ),
    }
}
