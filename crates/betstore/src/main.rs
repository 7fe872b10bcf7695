use std::process::ExitCode;

use anyhow::Result;
use betstore::backend::{DynamoDbTable, InMemoryTable, KeyValueTable};
use betstore::store::{BetStore, BET_ID};
use betstore::{BetRepository, Config, CreateBetRequest, ErrorMessage, UpdateBetRequest};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Betstore - Versioned bet records over DynamoDB
#[derive(Parser, Debug)]
#[command(name = "betstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Bet table name
    #[arg(long, env = "TABLE_NAME")]
    table_name: Option<String>,

    /// DynamoDB endpoint URL (e.g. http://localhost:8000)
    #[arg(long, env = "ENDPOINT_OVERRIDE")]
    endpoint: Option<String>,

    /// Run against a fresh in-memory table instead of DynamoDB
    #[arg(long)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a bet by id
    Get { bet_id: String },

    /// List one page of bets
    List {
        /// Resume after this bet id (a previous page's lastEvaluatedKey)
        #[arg(long)]
        start: Option<String>,
    },

    /// Create a bet with a fresh id at version 1
    Create {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        pre_tax: Decimal,
        #[arg(long)]
        post_tax: Decimal,
    },

    /// Replace a bet's fields if its version is current
    Update {
        bet_id: String,
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        pre_tax: Decimal,
        #[arg(long)]
        post_tax: Decimal,
        #[arg(long)]
        version: i64,
    },

    /// Delete a bet
    Delete { bet_id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "betstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(table_name) = cli.table_name {
        config.table_name = table_name;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint_override = Some(endpoint);
    }

    let outcome = if cli.in_memory {
        tracing::info!(table = %config.table_name, "Using in-memory table");
        let backend = InMemoryTable::with_table(&config.table_name, BET_ID).await;
        run(store(backend, &config), cli.command).await
    } else {
        tracing::info!(
            table = %config.table_name,
            region = %config.region,
            endpoint = ?config.endpoint_override,
            "Using DynamoDB table"
        );
        let backend =
            DynamoDbTable::connect(config.endpoint_override.as_deref(), &config.region).await;
        run(store(backend, &config), cli.command).await
    };

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(body) => {
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn store<T: KeyValueTable>(backend: T, config: &Config) -> BetStore<T> {
    BetStore::new(backend, config.table_name.clone(), config.page_size)
        .with_max_create_attempts(config.create_max_attempts)
}

/// Runs one command, returning the JSON result or the rendered error body.
async fn run(
    repository: impl BetRepository,
    command: Command,
) -> std::result::Result<Value, ErrorMessage> {
    let result = match command {
        Command::Get { bet_id } => repository.get_bet(&bet_id).await.map(to_json),
        Command::List { start } => repository.get_bets(start.as_deref()).await.map(to_json),
        Command::Create {
            customer_id,
            pre_tax,
            post_tax,
        } => repository
            .create_bet(&CreateBetRequest::new(customer_id, pre_tax, post_tax))
            .await
            .map(to_json),
        Command::Update {
            bet_id,
            customer_id,
            pre_tax,
            post_tax,
            version,
        } => repository
            .update_bet(&UpdateBetRequest::new(
                bet_id,
                customer_id,
                pre_tax,
                post_tax,
                version,
            ))
            .await
            .map(to_json),
        Command::Delete { bet_id } => repository.delete_bet(&bet_id).await.map(to_json),
    };

    result.map_err(|e| ErrorMessage::from(&e))
}

fn to_json<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
