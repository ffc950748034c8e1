use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Audit a single source file
    Analyze {
        file: PathBuf,
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Print the final report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Check the configuration for errors
    Validate {
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}
