use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "app-reviewer")]
#[clap(about = "Audit a source file for security, code quality and UI/UX readiness", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
