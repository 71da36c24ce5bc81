//! Command-line arguments and environment handling.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use emission_ledger::store::config::{DEFAULT_ACCESS_TIMEOUT_MS, DEFAULT_DB_PATH};
use emission_ledger::store::StoreConfig;
use emission_ledger::{LedgerConfig, ShipmentInfo};

/// Emission ledger: chain-of-custody footprints and proofing documents
#[derive(Parser, Debug, Clone)]
#[command(name = "emission-ledger")]
#[command(about = "Track shipment emissions across hubs and transport legs")]
pub struct Args {
    /// Path of the emission factor database
    #[arg(long, env = "EMISSION_LEDGER_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Upper bound on a single repository call, in milliseconds
    #[arg(long, env = "EMISSION_LEDGER_TIMEOUT_MS", default_value_t = DEFAULT_ACCESS_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Audit the full chain lineage after every append
    #[arg(long, env = "EMISSION_LEDGER_VALIDATE_LINEAGE", default_value = "false")]
    pub validate_lineage: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Seed the repository with the reference records
    Seed,

    /// Print the emission factor record for an id
    Lookup {
        /// Hub or transport category id
        id: String,
    },

    /// Print an empty footprint for a shipment
    Template {
        /// Declaring company
        #[arg(long)]
        company: String,

        /// Shipment id; generated when omitted
        #[arg(long, requires = "weight")]
        shipment_id: Option<String>,

        /// Shipment mass; generated when omitted
        #[arg(long, requires = "shipment_id")]
        weight: Option<f64>,
    },

    /// Append a hub visit or transport leg to a footprint
    Append {
        /// Footprint JSON file
        #[arg(long)]
        footprint: PathBuf,

        /// Element kind: hub or transport
        #[arg(long)]
        kind: String,

        /// Hub or transport category id
        #[arg(long)]
        id: String,

        /// Measured distance of a transport leg
        #[arg(long)]
        distance: Option<f64>,
    },

    /// Append a transport leg backed by a signed sensor attestation
    RecordTransport {
        /// Footprint JSON file
        #[arg(long)]
        footprint: PathBuf,

        /// Transport category id
        #[arg(long)]
        id: String,

        /// Attestation JSON file
        #[arg(long)]
        attestation: PathBuf,

        /// Previously collected attestations (JSON array)
        #[arg(long)]
        sensor_data: Option<PathBuf>,
    },

    /// Assemble the proofing document for a footprint
    Assemble {
        /// Footprint JSON file
        #[arg(long)]
        footprint: PathBuf,

        /// Signed sensor data (JSON array)
        #[arg(long)]
        sensor_data: Option<PathBuf>,

        /// Print only the document digest
        #[arg(long)]
        digest: bool,
    },

    /// Audit the lineage of a footprint's chain
    Verify {
        /// Footprint JSON file
        #[arg(long)]
        footprint: PathBuf,
    },
}

impl Args {
    pub fn access_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            store: StoreConfig::new(&self.db).with_access_timeout(self.access_timeout()),
            validate_lineage_on_append: self.validate_lineage,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("EMISSION_LEDGER_TIMEOUT_MS must be greater than zero".to_string());
        }
        if let Command::Template {
            weight: Some(weight),
            ..
        } = &self.command
        {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(format!("shipment weight must be non-negative, got {weight}"));
            }
        }
        Ok(())
    }
}

impl Command {
    /// Whether the command reads or writes the repository.
    pub fn needs_store(&self) -> bool {
        matches!(
            self,
            Command::Seed | Command::Lookup { .. } | Command::Assemble { .. }
        )
    }
}

/// Shipment for a template command: given or generated.
pub fn shipment(shipment_id: Option<String>, weight: Option<f64>) -> ShipmentInfo {
    match (shipment_id, weight) {
        (Some(id), Some(weight)) => ShipmentInfo::new(id, weight),
        _ => ShipmentInfo::generate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("emission-ledger").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flags_build_ledger_config() {
        let args = parse(&["--db", "/tmp/factors.db", "--timeout-ms", "250", "seed"]);
        let config = args.ledger_config();
        assert_eq!(config.store.path, PathBuf::from("/tmp/factors.db"));
        assert_eq!(config.store.access_timeout(), Duration::from_millis(250));
        assert!(!config.validate_lineage_on_append);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_template_requires_both_shipment_fields() {
        let result = Args::try_parse_from([
            "emission-ledger",
            "template",
            "--company",
            "Acme",
            "--weight",
            "5000",
        ]);
        assert!(result.is_err());

        let args = parse(&[
            "template",
            "--company",
            "Acme",
            "--shipment-id",
            "S1",
            "--weight",
            "5000",
        ]);
        let Command::Template {
            shipment_id,
            weight,
            ..
        } = args.command
        else {
            panic!("expected template command");
        };
        let info = shipment(shipment_id, weight);
        assert_eq!(info.shipment_id, "S1");
        assert_eq!(info.shipment_weight, 5000.0);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let args = parse(&["--timeout-ms", "0", "seed"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_append_parses_distance() {
        let args = parse(&[
            "append",
            "--footprint",
            "fp.json",
            "--kind",
            "transport",
            "--id",
            "200",
            "--distance",
            "120.5",
        ]);
        assert!(!args.command.needs_store());
        match args.command {
            Command::Append { kind, distance, .. } => {
                assert_eq!(kind, "transport");
                assert_eq!(distance, Some(120.5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
