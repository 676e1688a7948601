use serde::{Deserialize, Serialize};

use super::client::CompletionClient;
use crate::errors::GenerationError;

/// Inputs handed to the model: the user's request plus the host OS,
/// so generated commands fit the platform.
#[derive(Debug, Serialize)]
pub struct CommandRequest {
    pub query: String,
    pub user_os: String,
}

/// Reply contract with the provider: the OS echoed back plus an
/// ordered list of shell commands. Order is execution order.
#[derive(Debug, Deserialize)]
pub struct CommandResponse {
    pub user_os: String,
    pub commands: Vec<String>,
}

/// Ask the model to turn `query` into shell commands for `user_os`.
/// Both suggestion and execute mode go through this single path.
pub async fn generate(
    client: &impl CompletionClient,
    query: &str,
    user_os: &str,
) -> Result<Vec<String>, GenerationError> {
    let request = CommandRequest {
        query: query.to_string(),
        user_os: user_os.to_string(),
    };
    let prompt = build_prompt(&request)?;

    let reply = client.complete(&prompt).await?;
    let response = parse_reply(&reply)?;
    log::debug!("model echoed OS: {}", response.user_os);

    Ok(response.commands)
}

fn build_prompt(request: &CommandRequest) -> Result<String, GenerationError> {
    let input = serde_json::to_string(request)?;
    Ok(format!(
        "You are a shell command generator. Convert the user query into \
         shell commands appropriate for the user's operating system.\n\n\
         Input: {}\n\n\
         Reply with a single JSON object and nothing else, in this exact shape:\n\
         {{\"user_os\": \"<the user's operating system, echoed back>\", \
         \"commands\": [\"<shell commands, in execution order>\"]}}",
        input
    ))
}

fn parse_reply(reply: &str) -> Result<CommandResponse, GenerationError> {
    let payload = extract_json(reply);
    Ok(serde_json::from_str(payload)?)
}

/// Models often wrap the JSON in markdown fences or surrounding prose;
/// cut the reply down to the object before parsing.
fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after = &trimmed[fence_start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(fence_end) = after.find("```") {
            return after[..fence_end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
