use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modeswitch")]
#[command(about = "Named list and boolean modes driven by simple commands", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.modeswitch/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a command script
    Run {
        script: PathBuf,

        /// Stop at the first failing command
        #[arg(long)]
        strict: bool,
    },
    /// Execute commands given as arguments, one per argument
    Exec {
        #[arg(required = true)]
        commands: Vec<String>,
    },
    /// Print the command reference
    Commands,
}
