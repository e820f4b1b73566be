use std::process::ExitCode;

use clap::Parser;
use prompt_tester::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "prompt-tester exited");
            eprintln!("prompt-tester: {err}");
            ExitCode::FAILURE
        }
    }
}
