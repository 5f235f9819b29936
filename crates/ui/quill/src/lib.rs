pub mod action;
pub mod app;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod errors;
pub mod logging;
pub mod tui;

use std::process::ExitCode;

use color_eyre::Result;
use tracing::info;

use crate::{
    app::App,
    cli::{Cli, Cmd},
    config::Config,
};

pub async fn run(cli: Cli) -> Result<ExitCode> {
    crate::errors::init()?;
    let config = Config::new(cli.config.as_deref())?;
    let _guard = crate::logging::init(&config)?;

    match cli.command() {
        Cmd::Run { dump } => {
            let mut app = App::new(config)?;
            app.run().await?;
            if dump {
                println!("{}", serde_json::to_string_pretty(&app.history().to_json()?)?);
            }
        }
        Cmd::Schema => println!("{}", commands::schema_json(&config.schema()?)?),
        Cmd::Check { field, value } => {
            let report = commands::check(&config.schema()?, &field, &value)?;
            info!(field = %report.field, valid = report.valid, "check");
            println!("{report}");
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
