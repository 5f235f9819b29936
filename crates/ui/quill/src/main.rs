use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use quill::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    quill::run(args).await
}
