use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use fortune_engine::{Clock, DateFormats, EngineConfig, FixedClock, FortuneEngine, FortuneRequest, SystemClock};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fortune", about = "Birthdate fortune readings", version)]
struct Cli {
    /// Birthdate, YYYY-MM-DD (or DD/MM/YYYY, MM/DD/YYYY with --flexible)
    #[arg(long)]
    dob: String,

    /// Birth time, H or HH:MM
    #[arg(long)]
    time: Option<String>,

    /// male / m / female / f
    #[arg(long)]
    gender: Option<String>,

    /// Compute as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Also accept slash-separated birthdates
    #[arg(long)]
    flexible: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run<C: Clock>(engine: &FortuneEngine<C>, request: &FortuneRequest, pretty: bool) -> Result<()> {
    let record = engine.fortune(request)?;
    let json = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env().context("loading FORTUNE_* configuration")?;
    if cli.flexible {
        config.date_formats = DateFormats::Flexible;
    }

    let request = FortuneRequest {
        dob:    Some(cli.dob),
        time:   cli.time,
        gender: cli.gender,
    };

    match cli.today {
        Some(today) => run(&FortuneEngine::with_clock(config, FixedClock(today))?, &request, cli.pretty),
        None => run(&FortuneEngine::with_clock(config, SystemClock)?, &request, cli.pretty),
    }
}
