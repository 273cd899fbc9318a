use thiserror::Error;

/// Typed failures from translation providers.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("claude command not found at '{0}' (is Claude Code installed and on PATH?)")]
    CommandNotFound(String),

    #[error("failed to run {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    Process { command: String, status: String },

    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    #[error("{provider} API key is required (set {env_var} or run 'doc config set {key}=...')")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
        key: &'static str,
    },

    #[error("{0} provider is not implemented yet - use 'claude-code' or 'openai'")]
    Unsupported(&'static str),
}

impl TranslateError {
    /// Process exit code for this failure (sysexits conventions).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey { .. } => exitcode::CONFIG,
            _ => exitcode::UNAVAILABLE,
        }
    }
}
