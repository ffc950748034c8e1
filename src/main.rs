use app_reviewer::errors::ErrorHandler;
use app_reviewer::structs::cli::Cli;
use app_reviewer::workers::command_runner::CommandRunner;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();
    if let Err(error) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&error);
        return Err(anyhow::Error::new(error).context("app-reviewer failed"));
    }
    Ok(())
}
