//! Command-line front end for rate-change simulations
//!
//! Usage:
//!   rate_change generate --output quotes.csv
//!   rate_change summarize --model data/demo_model.json --group-by Region_bnd
//!   rate_change simulate --model data/demo_model.json \
//!       --column Exposure_EscapeOfWater --kind multiplicative --magnitude 10
//!   rate_change quote --model data/demo_model.json \
//!       --field Exposure_EscapeOfWater=3 --field "Region_bnd=Region 2"

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rate_change::engine::{resolve_vocabulary, Session};
use rate_change::model::{ModelArtifact, ModelSource, ModelStore};
use rate_change::records::{
    generator, load_records, write_records, Adjustment, AdjustmentKind, RecordSet, Value,
};
use rate_change::report::format_table;
use rate_change::DashboardConfig;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rate_change", about = "Simulate rate changes against a premium model")]
struct Cli {
    /// JSON dashboard configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a synthetic quote book as CSV
    Generate {
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Score the base data and print the actual-vs-expected report
    Summarize(DataArgs),
    /// Apply one rate change and compare against the baseline
    Simulate {
        #[command(flatten)]
        data: DataArgs,
        /// Column to adjust (falls back to the configured adjustment)
        #[arg(long)]
        column: Option<String>,
        /// additive or multiplicative
        #[arg(long, default_value = "multiplicative")]
        kind: AdjustmentKind,
        /// Amount added, or percentage change
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        magnitude: f64,
    },
    /// Price a single quote entered as COLUMN=VALUE fields
    Quote {
        #[command(flatten)]
        data: DataArgs,
        /// Quote field, repeatable; unspecified model features count as zero
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, Value)>,
    },
}

fn parse_field(s: &str) -> std::result::Result<(String, Value), String> {
    let (column, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{}'", s))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{}'", s));
    }
    Ok((column.to_string(), Value::parse(value)))
}

#[derive(Args)]
struct DataArgs {
    /// CSV record set (synthetic data when omitted)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Model artifact path or URL
    #[arg(long)]
    model: Option<String>,
    /// Grouping dimension for the report
    #[arg(long)]
    group_by: Option<String>,
}

impl DataArgs {
    fn apply_to(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = Some(data.clone());
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(group) = &self.group_by {
            config.group_column = group.clone();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    match cli.command {
        Command::Generate { rows, seed, output } => {
            if let Some(rows) = rows {
                config.synthetic_rows = rows;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let records = generator::generate(&config.synthetic_params())?;
            let file = File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            write_records(&records, file)?;
            println!("Wrote {} quotes to {}", records.len(), output.display());
        }
        Command::Summarize(data) => {
            data.apply_to(&mut config);
            let session = open_session(&config)?;
            print_report(&session, &config, "Baseline")?;
        }
        Command::Simulate { data, column, kind, magnitude } => {
            data.apply_to(&mut config);
            let adjustment = match column {
                Some(column) => Adjustment::new(column, kind, magnitude),
                None => config.adjustment.clone().context(
                    "No adjustment: pass --column and --magnitude or set \"adjustment\" in the config",
                )?,
            };
            let mut session = open_session(&config)?;
            print_report(&session, &config, "Baseline")?;

            let start = Instant::now();
            session
                .apply(&adjustment)
                .with_context(|| format!("Scenario {} rejected", adjustment))?;
            println!("\nRecomputed in {:?}", start.elapsed());
            print_report(&session, &config, &format!("Scenario: {}", adjustment))?;
        }
        Command::Quote { data, fields } => {
            data.apply_to(&mut config);
            let quote = RecordSet::from_pairs(vec![fields])?;
            let session = open_session(&config)?;
            let prices = session.quote(&quote)?;
            for price in prices {
                println!("Expected premium difference: {:.2}", price);
            }
        }
    }

    Ok(())
}

fn open_session(config: &DashboardConfig) -> Result<Session<Arc<ModelArtifact>>> {
    let records: RecordSet = match &config.data_path {
        Some(path) => load_records(path)
            .with_context(|| format!("Failed to load records from {}", path.display()))?,
        None => generator::generate(&config.synthetic_params())?,
    };
    println!("Loaded {} quotes", records.len());

    let source = config
        .model
        .as_deref()
        .map(ModelSource::parse)
        .context("No model configured: pass --model or set \"model\" in the config")?;
    let mut store = ModelStore::new();
    let artifact = store.load(&source)?;

    let vocabulary = resolve_vocabulary(&artifact, &records, &config.categorical_columns);
    let session = Session::new(records, artifact, vocabulary, config.actual_column.clone())?;
    Ok(session)
}

fn print_report(
    session: &Session<Arc<ModelArtifact>>,
    config: &DashboardConfig,
    title: &str,
) -> Result<()> {
    println!("\n=== {} ===", title);
    print!("{}", format_table(&session.summary(&config.group_column)?));

    match session.loss_ratio() {
        Ok(ratio) => println!("Loss ratio: {:.2}%", ratio),
        Err(err) => println!("Loss ratio: undefined ({})", err),
    }

    let split = session.holdout_split(config.holdout_fraction, config.seed);
    let mse = session.holdout_mse(&split)?;
    println!("Mean Squared Error: {:.2}", mse);
    Ok(())
}
