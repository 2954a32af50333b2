//! `calc` entry-point: wires configuration, persistence and the calculation
//! service behind a small command-line surface.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use mockable::DefaultClock;
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use calc_backend::cli::{execute, Cli, Command};
use calc_backend::config::CalcSettings;
use calc_backend::domain::CalculationService;
use calc_backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselCalculationRepository,
};

fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = CalcSettings::load_from_environment()?;
    let database_url = settings.resolve_database_url(cli.database_url)?;

    let command = match cli.command {
        Command::Migrate => {
            let applied = run_pending_migrations(&database_url)?;
            return print_json(&json!({ "applied": applied }));
        }
        Command::Calculation(command) => command,
    };

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;

    let output = runtime.block_on(async {
        let pool = DbPool::new(settings.pool_config(&database_url))
            .await
            .wrap_err("create database pool")?;
        let service = CalculationService::new(
            Arc::new(DieselCalculationRepository::new(pool)),
            Arc::new(DefaultClock),
        );
        execute(&service, command)
            .await
            .map_err(|error| eyre!(error))
    })?;

    print_json(&output)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("render output")?;
    println!("{rendered}");
    Ok(())
}
