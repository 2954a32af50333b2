//! Command-line surface of the `calc` binary.
//!
//! Parsing lives here together with [`execute`], which runs a parsed
//! calculation command against a [`CalculationService`]. The binary only
//! wires configuration, the database pool and output.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ports::CalculationRepository;
use crate::domain::{Calculation, CalculationService, CreateCalculationRequest, Error, UserId};

/// `calc` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "calc",
    about = "Create, evaluate and manage stored arithmetic calculations",
    version
)]
pub struct Cli {
    /// Database connection URL. Falls back to `CALC_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    pub database_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Apply pending database migrations.
    Migrate,
    #[command(flatten)]
    Calculation(CalculationCommand),
}

/// Commands served by the calculation service.
#[derive(Debug, Clone, Subcommand)]
pub enum CalculationCommand {
    /// Create a calculation.
    Create(CreateArgs),
    /// Evaluate a stored calculation and cache its result.
    Evaluate(RecordArgs),
    /// Show a stored calculation.
    Show(RecordArgs),
    /// List the owner's calculations, newest first.
    List(OwnerArgs),
    /// Replace a calculation's inputs; clears any cached result.
    Update(UpdateArgs),
    /// Delete a calculation.
    Delete(RecordArgs),
}

#[derive(Debug, Clone, Args)]
pub struct OwnerArgs {
    /// Owning user id.
    #[arg(long = "owner", value_name = "uuid")]
    pub owner_id: UserId,
}

#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,
    /// Calculation id.
    #[arg(long = "id", value_name = "uuid")]
    pub id: Uuid,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,
    /// Calculation type: addition, subtraction, multiplication or division.
    #[arg(long = "type", value_name = "tag")]
    pub calculation_type: String,
    /// Evaluate immediately and store the result.
    #[arg(long)]
    pub evaluate: bool,
    /// Operands, in order.
    #[arg(value_name = "input", allow_negative_numbers = true)]
    pub inputs: Vec<f64>,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub record: RecordArgs,
    /// Replacement operands, in order.
    #[arg(value_name = "input", allow_negative_numbers = true)]
    pub inputs: Vec<f64>,
}

/// What a command prints on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Calculation(Calculation),
    Calculations(Vec<Calculation>),
    Deleted { deleted: Uuid },
}

/// Run `command` against `service`.
pub async fn execute<R>(
    service: &CalculationService<R>,
    command: CalculationCommand,
) -> Result<CommandOutput, Error>
where
    R: CalculationRepository,
{
    match command {
        CalculationCommand::Create(args) => service
            .create(CreateCalculationRequest {
                owner_id: args.owner.owner_id,
                calculation_type: args.calculation_type,
                inputs: args.inputs,
                evaluate: args.evaluate,
            })
            .await
            .map(CommandOutput::Calculation),
        CalculationCommand::Evaluate(args) => service
            .evaluate(&args.owner.owner_id, args.id)
            .await
            .map(CommandOutput::Calculation),
        CalculationCommand::Show(args) => service
            .get(&args.owner.owner_id, args.id)
            .await
            .map(CommandOutput::Calculation),
        CalculationCommand::List(args) => service
            .list(&args.owner_id)
            .await
            .map(CommandOutput::Calculations),
        CalculationCommand::Update(args) => service
            .replace_inputs(&args.record.owner.owner_id, args.record.id, args.inputs)
            .await
            .map(CommandOutput::Calculation),
        CalculationCommand::Delete(args) => {
            service.delete(&args.owner.owner_id, args.id).await?;
            Ok(CommandOutput::Deleted { deleted: args.id })
        }
    }
}
