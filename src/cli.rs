use clap::Parser;

pub const DEFAULT_MODEL: &str = "groq/llama-3.3-70b-specdec";

#[derive(Parser, Debug)]
#[command(name = "ecli", author, version, about = "LLM command assistant for the shell", long_about = None)]
pub struct Cli {
    /// User query to be converted to shell commands
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// LLM model identifier to use, as "provider/model"
    #[arg(long = "llm", value_name = "MODEL_ID", default_value = DEFAULT_MODEL)]
    pub llm: String,

    /// Return the suggested commands without executing them (default)
    #[arg(short = 's', long = "suggestion", conflicts_with = "execute")]
    pub suggestion: bool,

    /// Execute the suggested commands (no review or sandboxing is applied)
    #[arg(short = 'e', long = "execute")]
    pub execute: bool,
}

impl Cli {
    /// Suggestion is the default when neither mode flag is given.
    pub fn execute_mode(&self) -> bool {
        !self.suggestion && self.execute
    }
}
