//! sme-report CLI - extract Sun/Moon fields and derived metrics from a
//! Sun, Moon & Earth text report
//!
//! Report lines go to stdout; logs go to stderr.

use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use sme_report::{write_report, MetricsConfig, OutputFormat, SAMPLE_REPORT};

#[derive(Parser)]
#[command(name = "sme-report")]
#[command(version, about = "Extract Sun/Moon observation fields and derived metrics from a Sun, Moon & Earth report", long_about = None)]
struct Cli {
    /// Report file to read, or '-' for stdin
    #[arg(default_value = "-", conflicts_with = "sample")]
    input: PathBuf,

    /// Process the bundled sample report instead of INPUT
    #[arg(long)]
    sample: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// YAML file with reference ranges (perigee_km, apogee_km, declination_span_deg)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Perigee distance in km (overrides config and SME_PERIGEE_KM)
    #[arg(long)]
    perigee_km: Option<f64>,

    /// Apogee distance in km (overrides config and SME_APOGEE_KM)
    #[arg(long)]
    apogee_km: Option<f64>,

    /// Half-width of the declination range in degrees (overrides config and SME_DECLINATION_SPAN_DEG)
    #[arg(long)]
    declination_span: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve reference ranges with precedence: CLI > ENV > config file > defaults
fn resolve_config(cli: &Cli) -> Result<MetricsConfig, Box<dyn std::error::Error>> {
    let base = match &cli.config {
        Some(path) => MetricsConfig::load_from_file(path)?,
        None => MetricsConfig::default(),
    };

    let mut config = base.with_env()?;

    if let Some(perigee) = cli.perigee_km {
        config.perigee_km = perigee;
    }
    if let Some(apogee) = cli.apogee_km {
        config.apogee_km = apogee;
    }
    if let Some(span) = cli.declination_span {
        config.declination_span_deg = span;
    }

    config.validate()?;
    Ok(config)
}

fn read_input(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    if cli.sample {
        tracing::info!("using bundled sample report");
        return Ok(SAMPLE_REPORT.to_string());
    }

    if cli.input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to read report {}: {}", cli.input.display(), e).into())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&cli)?;
    tracing::info!(?config, "reference ranges");

    let text = read_input(&cli)?;
    tracing::info!(bytes = text.len(), "report loaded");

    let stdout = io::stdout();
    write_report(&text, &config, cli.format, stdout.lock())?;
    Ok(())
}

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
