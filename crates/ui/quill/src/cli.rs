use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Create-user form in the terminal")]
pub struct Cli {
    /// Directory holding config.toml / config.json5
    #[arg(long, value_name = "DIR", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Run the interactive form (default)
    Run {
        /// Print all submissions as JSON when the UI exits
        #[arg(long)]
        dump: bool,
    },
    /// Print the active field table as JSON
    Schema,
    /// Run one field's validator on a value
    Check { field: String, value: String },
}

impl Cli {
    pub fn command(&self) -> Cmd {
        self.cmd.clone().unwrap_or(Cmd::Run { dump: false })
    }
}
