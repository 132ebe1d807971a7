use std::io;
use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use geo_soft_json::app::App;
use geo_soft_json::config::{ConfigLoader, ConfigOverrides};
use geo_soft_json::domain::OutputStyle;
use geo_soft_json::error::SoftError;
use geo_soft_json::input::InputSource;
use geo_soft_json::sra::SraHttpClient;

#[derive(Parser)]
#[command(name = "geo-soft-json")]
#[command(about = "Convert GEO SOFT format to JSON with SRA codes")]
#[command(version, author)]
struct Cli {
    #[arg(long, value_name = "PATH|-", help = "SOFT file from GEO (`-` reads stdin)")]
    soft: InputSource,

    #[arg(long)]
    config: Option<String>,

    #[arg(long, help = "Escape field values as JSON strings")]
    json: bool,

    #[arg(long, help = "Skip samples missing title, organism or source")]
    require_complete: bool,

    #[arg(long, value_name = "SECS", help = "Request timeout for SRA links")]
    timeout: Option<u64>,

    #[arg(long, help = "Print a JSON conversion summary to stderr")]
    summary: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<SoftError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SoftError) -> u8 {
    match error {
        SoftError::InputRead(_)
        | SoftError::InvalidInput { .. }
        | SoftError::ConfigRead(_)
        | SoftError::ConfigParse(_) => 2,
        SoftError::SraHttp(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let resolved = ConfigLoader::apply(
        config,
        ConfigOverrides {
            timeout_secs: cli.timeout,
            style: cli.json.then_some(OutputStyle::Json),
            require_complete: cli.require_complete,
        },
    );

    let client = SraHttpClient::with_options(&resolved.sra)?;
    let app = App::new(client, resolved.policy);
    let reader = cli.soft.open()?;
    tracing::debug!(input = %cli.soft, "reading SOFT input");

    let mut stdout = io::stdout().lock();
    let result = app.convert(reader, &mut stdout)?;

    if cli.summary {
        let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
        eprintln!("{json}");
    }
    Ok(())
}
