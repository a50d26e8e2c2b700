//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::tracing_sink::TracingSink;
use crate::domain::config_validation::{
    data_dir, max_tables, output_dir, strategy_book, validate_run_config,
};
use crate::domain::engine::run_contracts;
use crate::domain::error::AlgoError;
use crate::domain::ledger::ContractResult;
use crate::domain::strategy::{StrategyBook, StrategyConfig};
use crate::domain::table::ContractKind;
use crate::domain::universe::validate_tables;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::table_port::TablePort;

/// Accepted `--date` format; table names carry the same date as `ddmmyyyy`.
pub const DATE_ARG_FORMAT: &str = "%d-%m-%Y";
pub const TABLE_DATE_FORMAT: &str = "%d%m%Y";

#[derive(Parser, Debug)]
#[command(name = "optalgo", about = "Options signal and position simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the nearest OTM call and put of every table
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_tables: Option<u32>,
    },
    /// Run a single contract of the table for one session date
    Contract {
        #[arg(short, long)]
        config: PathBuf,
        /// Session date as dd-mm-yyyy
        #[arg(long, value_parser = parse_session_date)]
        date: NaiveDate,
        /// Contract column, e.g. C48200 or P47800
        #[arg(long, value_parser = parse_contract_column)]
        contract: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List tables in the data folder
    ListTables {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file and show the resolved strategies
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn parse_session_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_ARG_FORMAT)
        .map_err(|e| format!("expected dd-mm-yyyy: {e}"))
}

pub fn parse_contract_column(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.starts_with('C') || s.starts_with('P') {
        Ok(s.to_string())
    } else {
        Err("contract must start with C or P".to_string())
    }
}

/// Pattern matched against table names for a session date.
pub fn table_pattern(date: NaiveDate) -> String {
    date.format(TABLE_DATE_FORMAT).to_string()
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Run {
            config,
            data_dir,
            output,
            max_tables,
        } => run_batch(
            &config,
            data_dir.as_deref(),
            output.as_deref(),
            max_tables.map(|n| n as usize),
        ),
        Command::Contract {
            config,
            date,
            contract,
            output,
        } => run_single(&config, date, &contract, output.as_deref()),
        Command::ListTables { config, data_dir } => run_list_tables(&config, data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, AlgoError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

fn table_adapter(config: &dyn ConfigPort, data_dir_override: Option<&Path>) -> Result<CsvAdapter, AlgoError> {
    let dir = match data_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from(data_dir(config)?),
    };
    Ok(CsvAdapter::new(dir))
}

fn report_adapter(config: &dyn ConfigPort, output_override: Option<&Path>) -> CsvReportAdapter {
    let dir = output_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(output_dir(config)));
    CsvReportAdapter::new(dir)
}

fn run_batch(
    config_path: &Path,
    data_dir_override: Option<&Path>,
    output_override: Option<&Path>,
    max_tables_override: Option<usize>,
) -> Result<(), AlgoError> {
    let config = load_config(config_path)?;
    if data_dir_override.is_none() {
        validate_run_config(&config)?;
    }
    let book = strategy_book(&config)?;
    let limit = match max_tables_override {
        Some(n) => n,
        None => max_tables(&config)?,
    };

    let tables = table_adapter(&config, data_dir_override)?;
    let names = tables.list_tables()?;
    if names.is_empty() {
        return Err(AlgoError::NoTables {
            location: data_dir_override
                .map(|p| p.display().to_string())
                .or_else(|| config.get_string("data", "dir"))
                .unwrap_or_default(),
        });
    }
    tracing::info!(tables = names.len(), limit, "found tables");

    let selection = validate_tables(&tables, names, limit);
    if !selection.skipped.is_empty() {
        tracing::warn!(skipped = selection.skipped.len(), "some tables were skipped");
    }

    let mut results = Vec::new();
    for selected in &selection.selected {
        let columns = selected.selection.columns();
        tracing::info!(
            table = %selected.table.name,
            base_price = selected.selection.base_price,
            contracts = ?columns,
            "processing table"
        );
        match run_contracts(&selected.table, &columns, &book, &TracingSink) {
            Ok(batch) => results.extend(batch),
            Err(e) => tracing::warn!(table = %selected.table.name, error = %e, "skipping table"),
        }
    }

    let reporter = report_adapter(&config, output_override);
    let summary = reporter.write_all(&results)?;
    print_summary(&results);
    eprintln!("\nResults written to: {}", summary.display());
    Ok(())
}

fn run_single(
    config_path: &Path,
    date: NaiveDate,
    contract: &str,
    output_override: Option<&Path>,
) -> Result<(), AlgoError> {
    let config = load_config(config_path)?;
    validate_run_config(&config)?;
    let book = strategy_book(&config)?;

    let tables = table_adapter(&config, None)?;
    let pattern = table_pattern(date);
    let table = tables.find_table(&pattern)?;
    tracing::info!(table = %table.name, contract, "running contract");

    let results = run_contracts(&table, &[contract.to_string()], &book, &TracingSink)?;

    let reporter = report_adapter(&config, output_override);
    let summary = reporter.write_all(&results)?;
    print_summary(&results);
    eprintln!("\nResults written to: {}", summary.display());
    Ok(())
}

fn run_list_tables(config_path: &Path, data_dir_override: Option<&Path>) -> Result<(), AlgoError> {
    let config = load_config(config_path)?;
    let tables = table_adapter(&config, data_dir_override)?;
    let names = tables.list_tables()?;
    if names.is_empty() {
        eprintln!("No tables found");
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), AlgoError> {
    let config = load_config(config_path)?;
    validate_run_config(&config)?;
    let book = strategy_book(&config)?;

    eprintln!("Config validated successfully");
    eprintln!("  data dir:    {}", data_dir(&config)?);
    eprintln!("  max tables:  {}", max_tables(&config)?);
    eprintln!("  output dir:  {}", output_dir(&config));
    print_book(&book);
    Ok(())
}

fn print_book(book: &StrategyBook) {
    eprintln!("\nStrategies:");
    print_strategy("default", &book.base);
    print_strategy(&ContractKind::Call.to_string(), &book.call);
    print_strategy(&ContractKind::Put.to_string(), &book.put);
}

fn print_strategy(label: &str, config: &StrategyConfig) {
    eprintln!(
        "  {:<8} trend filter: {:<5}  reversal: {:<5}  target: {:.2}%",
        label,
        config.use_trend_filter,
        config.allow_reversal,
        config.profit_target_pct * 100.0
    );
}

fn print_summary(results: &[ContractResult]) {
    let total: f64 = results.iter().map(|r| r.total_pnl).sum();
    let trades: usize = results.iter().map(ContractResult::trade_count).sum();

    eprintln!("\n=== Results ===");
    eprintln!("Contracts:        {}", results.len());
    eprintln!("Closed Trades:    {}", trades);
    eprintln!("Total PnL:        {:.2}", total);

    if !results.is_empty() {
        eprintln!("\n=== Per-Contract Summary ===");
        for r in results {
            let pnl_sign = if r.total_pnl >= 0.0 { "+" } else { "" };
            let open = match r.final_state.side() {
                Some(side) => format!(", {side} still open"),
                None => String::new(),
            };
            eprintln!(
                "  {}:  {} trades, {:.1}% win rate, {}{:.2}{}",
                r.contract_id,
                r.trade_count(),
                r.win_rate() * 100.0,
                pnl_sign,
                r.total_pnl,
                open,
            );
        }
    }
}
