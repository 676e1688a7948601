mod cli;
mod errors;
mod llm;
mod os_info;
mod runner;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use errors::ExecutionError;
use llm::client::LmClient;
use llm::generator;
use runner::ShellRunner;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let user_os = os_info::user_os();
    log::debug!("detected OS: {}", user_os);

    // A bad model id or missing API key is fatal; nothing downstream can run.
    let client = LmClient::configure(&cli.llm)?;

    let rt = tokio::runtime::Runtime::new()?;
    let commands = match rt.block_on(generator::generate(&client, &cli.query, &user_os)) {
        Ok(commands) => commands,
        Err(err) => {
            println!("Error generating commands: {}", err);
            return Ok(());
        }
    };

    if cli.execute_mode() {
        println!("Executing commands:");
        execute_commands(&ShellRunner::default(), &commands);
    } else {
        println!("Suggested commands:");
        for command in &commands {
            println!("{}", command);
        }
    }

    Ok(())
}

/// Run each command in order. One command failing does not stop the
/// rest of the batch; every outcome is reported individually.
fn execute_commands(
    runner: &ShellRunner,
    commands: &[String],
) -> Vec<Result<String, ExecutionError>> {
    let mut results = Vec::with_capacity(commands.len());

    for command in commands {
        println!("Executing: {}", command);
        match runner.run(command) {
            Ok(output) => {
                println!("Command Output:");
                println!("{}", output);
                results.push(Ok(output));
            }
            Err(err) => {
                println!("Error executing command: {}", err);
                results.push(Err(err));
            }
        }
    }

    results
}
