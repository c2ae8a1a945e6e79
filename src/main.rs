use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ConfigArgs, load_config};
use core_types::{CoreError, PerformancePoint};
use dashboard::{DashboardBuilder, DashboardData};
use ingestion::parse_series_csv;
use rust_decimal::Decimal;
use serde::Serialize;
use simulator::{SimulatorInput, run_simulation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the ROI dashboard tooling.
fn main() -> Result<()> {
    // ROI__* overrides may live in a .env file next to the binary's working directory.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config =
        load_config(cli.config.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Import(args) => handle_import(args, cli.format),
        Commands::Dashboard(args) => handle_dashboard(args, &config, cli.format),
        Commands::Simulate(args) => handle_simulate(args, cli.format),
    }
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid logging.level filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Metrics, validation and growth simulation for the ROI dashboard.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format written to stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an uploaded `date,value` CSV file and report points and diagnostics.
    Import(ImportArgs),
    /// Build the dashboard payload from a JSON data bundle.
    Dashboard(DashboardArgs),
    /// Project a hypothetical investment through the model series.
    Simulate(SimulateArgs),
}

#[derive(Parser)]
struct ImportArgs {
    /// Path to the CSV file.
    #[arg(long)]
    file: PathBuf,
}

#[derive(Parser)]
struct DashboardArgs {
    /// Path to a JSON bundle with settings, series, allocation and change log.
    #[arg(long)]
    data: PathBuf,

    /// Reference date for staleness checks (format: YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Model series as a CSV file or a JSON array of `{date, value}` points.
    #[arg(long, conflicts_with = "point")]
    series: Option<PathBuf>,

    /// Inline series point (format: YYYY-MM-DD,VALUE). May be repeated.
    #[arg(long, value_parser = parse_point_arg)]
    point: Vec<PerformancePoint>,

    /// Starting capital.
    #[arg(long)]
    capital: Decimal,

    /// Start date of the investment (format: YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// Amount added on the 1st of every month.
    #[arg(long)]
    monthly: Option<Decimal>,
}

fn parse_point_arg(raw: &str) -> Result<PerformancePoint, CoreError> {
    let (date, value) = raw.split_once(',').ok_or_else(|| {
        CoreError::InvalidInput("point".to_string(), format!("expected DATE,VALUE, got '{raw}'"))
    })?;
    PerformancePoint::parse(date, value)
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_import(args: ImportArgs, format: OutputFormat) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let parsed = parse_series_csv(&text);
    tracing::info!(
        file = %args.file.display(),
        points = parsed.points.len(),
        errors = parsed.errors.len(),
        "CSV import parsed."
    );

    match format {
        OutputFormat::Json => print_json(&parsed),
        OutputFormat::Table => {
            let mut table = new_table(&["Date", "Value"]);
            for point in &parsed.points {
                table.add_row(vec![point.date.to_string(), point.value.to_string()]);
            }
            println!("{table}");
            print_messages("Error", &parsed.errors);
            print_messages("Warning", &parsed.warnings);
            Ok(())
        }
    }
}

fn handle_dashboard(args: DashboardArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let raw = fs::read_to_string(&args.data)
        .with_context(|| format!("Failed to read {}", args.data.display()))?;
    let data: DashboardData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse dashboard bundle {}", args.data.display()))?;

    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let payload = DashboardBuilder::new(config).build(data, today);
    tracing::info!(
        errors = payload.validation.errors.len(),
        warnings = payload.validation.warnings.len(),
        "Dashboard payload built."
    );

    match format {
        OutputFormat::Json => print_json(&payload),
        OutputFormat::Table => {
            let metrics = &payload.metrics;
            let mut table = new_table(&["Metric", "Value"]);
            let rows = [
                ("ROI since inception (%)".to_string(), metrics.roi_since_inception_pct),
                (
                    format!("ROI last {} days (%)", config.metrics.trailing_window_days),
                    metrics.roi_last_30_days_pct,
                ),
                ("Max drawdown (%)".to_string(), metrics.max_drawdown_pct),
                ("Invested (%)".to_string(), metrics.invested_pct),
                ("Cash (%)".to_string(), metrics.cash_pct),
            ];
            for (label, value) in rows {
                table.add_row(vec![label, value.round_dp(2).to_string()]);
            }
            table.add_row(vec!["Last updated".to_string(), display_date(metrics.last_updated_at)]);
            table.add_row(vec!["Allocation as of".to_string(), display_date(metrics.as_of_date)]);
            println!("{table}");
            print_messages("Error", &payload.validation.errors);
            print_messages("Warning", &payload.validation.warnings);
            Ok(())
        }
    }
}

fn handle_simulate(args: SimulateArgs, format: OutputFormat) -> Result<()> {
    let points = match &args.series {
        Some(path) => load_series(path)?,
        None if !args.point.is_empty() => args.point.clone(),
        None => bail!("Provide the model series with --series or --point"),
    };

    let input = SimulatorInput {
        starting_capital: args.capital,
        start_date: args.start,
        include_monthly_contributions: args.monthly.is_some(),
        monthly_contribution: args.monthly.unwrap_or(Decimal::ZERO),
    };
    let result = run_simulation(&points, &input);

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Table => {
            let mut table = new_table(&["Date", "Balance"]);
            for point in &result.series {
                table.add_row(vec![
                    point.date.to_string(),
                    point.balance.round_dp(2).to_string(),
                ]);
            }
            println!("{table}");

            let mut summary = new_table(&[
                "Final balance",
                "Contributed",
                "Profit",
                "ROI (%)",
                "Max DD (%)",
                "Max DD",
            ]);
            summary.add_row(vec![
                result.final_balance.round_dp(2).to_string(),
                result.total_contributed.round_dp(2).to_string(),
                result.profit.round_dp(2).to_string(),
                result.roi_pct.round_dp(2).to_string(),
                result.max_drawdown_pct.round_dp(2).to_string(),
                result.max_drawdown_amount.round_dp(2).to_string(),
            ]);
            println!("{summary}");
            Ok(())
        }
    }
}

/// Reads a series from CSV (by extension) or a JSON array of points.
fn load_series(path: &Path) -> Result<Vec<PerformancePoint>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse series {}", path.display()));
    }

    let parsed = parse_series_csv(&raw);
    for error in &parsed.errors {
        tracing::warn!(file = %path.display(), "{error}");
    }
    Ok(parsed.points)
}

// ==============================================================================
// Output Helpers
// ==============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn print_messages(kind: &str, messages: &[String]) {
    for message in messages {
        println!("{kind}: {message}");
    }
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
