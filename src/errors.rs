use thiserror::Error;

/// Raised while setting up the model client. Fatal: nothing catches it,
/// the run terminates with the error message.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("model identifier '{0}' must be of the form provider/model")]
    BadModelId(String),

    #[error("unknown model provider '{0}' (supported: groq, openai, ollama)")]
    UnknownProvider(String),

    #[error("provider '{provider}' needs the {var} environment variable")]
    MissingApiKey { provider: String, var: String },
}

/// Raised by the command generator for any transport or parse failure.
/// Caught at the entry point; the run ends without executing anything.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to model provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model provider returned {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model reply contained no completion text")]
    EmptyReply,

    #[error("could not parse model reply as a command list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raised per command on a non-zero shell exit. Caught per command;
/// the batch continues.
#[derive(Debug, Error)]
#[error("command failed with exit code {code:?}: {stderr}")]
pub struct ExecutionError {
    pub code: Option<i32>,
    pub stderr: String,
}
