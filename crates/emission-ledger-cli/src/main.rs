//! emission-ledger: command-line front end for footprint chains and proofing
//! documents.
//!
//! Documents are read from JSON files and results are written to stdout as
//! JSON, so commands compose in a shell pipeline:
//!
//! ```text
//! emission-ledger template --company Acme > fp.json
//! emission-ledger append --footprint fp.json --kind hub --id 100 > fp2.json
//! emission-ledger assemble --footprint fp2.json
//! ```

mod config;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emission_ledger::store::{FactorStore, MemoryStore};
use emission_ledger::{Ledger, ProofingDocument};

use config::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("emission_ledger={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(2);
    }

    let config = args.ledger_config();
    if args.command.needs_store() {
        info!(db = %config.store.path.display(), "opening emission factor repository");
        let ledger = Ledger::open(config)?;
        ledger.initialize().await?;
        run(&ledger, args.command).await
    } else {
        run(&Ledger::new(MemoryStore::new(), config), args.command).await
    }
}

async fn run<S: FactorStore>(ledger: &Ledger<S>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Seed => {
            let (hubs, transports) = ledger.store().record_counts().await?;
            info!(hubs, transports, "repository ready");
        }
        Command::Lookup { id } => {
            let record = ledger.lookup(&id.as_str().into()).await?;
            print_json(&serde_json::to_value(record)?)?;
        }
        Command::Template {
            company,
            shipment_id,
            weight,
        } => {
            let shipment = config::shipment(shipment_id, weight);
            let footprint = ledger.create_template(&company, &shipment);
            print_json(&serde_json::to_value(footprint)?)?;
        }
        Command::Append {
            footprint,
            kind,
            id,
            distance,
        } => {
            let footprint = read_json(&footprint)?;
            let next = ledger.append_document(&footprint, &kind, &id, distance)?;
            print_json(&next)?;
        }
        Command::RecordTransport {
            footprint,
            id,
            attestation,
            sensor_data,
        } => {
            let footprint = read_json(&footprint)?;
            let attestation = read_json(&attestation)?;
            let prior = sensor_data.as_deref().map(read_json).transpose()?;
            let outcome =
                ledger.record_transport_document(&footprint, &id, &attestation, prior.as_ref())?;
            print_json(&outcome)?;
        }
        Command::Assemble {
            footprint,
            sensor_data,
            digest,
        } => {
            let footprint = read_json(&footprint)?;
            let sensor_data = sensor_data.as_deref().map(read_json).transpose()?;
            let document = ledger
                .assemble_document(&footprint, sensor_data.as_ref())
                .await?;
            if digest {
                let typed: ProofingDocument = serde_json::from_value(document)?;
                println!("{}", typed.digest()?);
            } else {
                print_json(&document)?;
            }
        }
        Command::Verify { footprint } => {
            let footprint = emission_ledger::core::parse_footprint(&read_json(&footprint)?)?;
            ledger.verify_chain(&footprint)?;
            info!(elements = footprint.chain_len(), "lineage verified");
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
