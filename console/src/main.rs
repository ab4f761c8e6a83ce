use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use covidcore::config::ClientConfig;
use covidcore::controller::{CompletionPolicy, PredictionController};
use covidcore::domain::{Chart, CoercionPolicy, FeatureField, PredictionOutcome};
use covidcore::transport::{Backend, HealthBody, HttpBackend};
use covidcore::{Intent, Session};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod view;

#[derive(Parser)]
#[command(author, version, about = "Console front-end for the COVID-19 death predictor")]
struct Args {
    /// Load client settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the service base URL
    #[arg(long, env = "COVID_API_BASE_URL")]
    base_url: Option<String>,
    #[arg(long, value_enum)]
    completion: Option<CompletionArg>,
    #[arg(long, value_enum)]
    coercion: Option<CoercionArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the chart catalog
    Charts,
    /// Fetch one chart by catalog index
    Chart {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// Write the decoded PNG here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Submit feature values, e.g. `--set New_cases=1200`
    Predict {
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<(FeatureField, String)>,
    },
    /// Probe the service banner
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompletionArg {
    LastCompletion,
    LatestDispatch,
}

#[derive(Clone, Copy, ValueEnum)]
enum CoercionArg {
    Permissive,
    Strict,
}

fn parse_assignment(raw: &str) -> Result<(FeatureField, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = name.trim().parse::<FeatureField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn load_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path).context("loading client config")?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(completion) = args.completion {
        config.completion = match completion {
            CompletionArg::LastCompletion => CompletionPolicy::LastCompletion,
            CompletionArg::LatestDispatch => CompletionPolicy::LatestDispatch,
        };
    }
    if let Some(coercion) = args.coercion {
        config.coercion = match coercion {
            CoercionArg::Permissive => CoercionPolicy::Permissive,
            CoercionArg::Strict => CoercionPolicy::Strict,
        };
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if let Command::Charts = args.command {
        for line in view::catalog_lines() {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let backend = Arc::new(HttpBackend::new(&config).context("building HTTP client")?);
    info!("using {}", backend.base_url());

    match args.command {
        Command::Charts => Ok(ExitCode::SUCCESS),
        Command::Health => health(backend.as_ref()).await,
        Command::Chart { index, out } => chart(backend, &config, index, out).await,
        Command::Predict { values } => predict(backend, &config, values).await,
    }
}

async fn health(backend: &dyn Backend) -> anyhow::Result<ExitCode> {
    let reply = backend.health().await.context("probing service")?;
    let body: HealthBody = serde_json::from_slice(&reply.body).unwrap_or_default();
    println!(
        "{} {}",
        reply.status,
        body.message.unwrap_or_else(|| "(no banner)".into())
    );
    Ok(if reply.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn chart(
    backend: Arc<HttpBackend>,
    config: &ClientConfig,
    index: i64,
    out: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let chart = Chart::from_index(index)?;
    let mut session = Session::start(backend, config);
    // The default chart load finishes before another selection is issued.
    session.settle().await;
    if chart.index() != session.visualization().current_index() {
        session.handle(Intent::SelectChart(index))?;
        session.settle().await;
    }

    let outcome = session.visualization().current_outcome();
    let Some(image) = outcome.image() else {
        warn!("no image for {chart}");
        return Ok(ExitCode::FAILURE);
    };
    if let Some(line) = view::chart_line(chart, outcome) {
        println!("{line}");
    }
    if let Some(path) = out {
        let bytes = image.decode()?;
        fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn predict(
    backend: Arc<HttpBackend>,
    config: &ClientConfig,
    values: Vec<(FeatureField, String)>,
) -> anyhow::Result<ExitCode> {
    let mut controller = PredictionController::from_config(config);
    for (field, raw) in values {
        controller.edit_field(field, raw);
    }
    if let Some(dispatch) = controller.submit() {
        if let Some(line) = view::prediction_line(controller.current_outcome()) {
            eprintln!("{line}");
        }
        let reply = backend.predict(&dispatch.request).await;
        controller.complete(dispatch.token, reply);
    }

    let outcome = controller.current_outcome();
    match (view::prediction_line(outcome), outcome) {
        (Some(line), PredictionOutcome::Succeeded(_)) => {
            println!("{line}");
            Ok(ExitCode::SUCCESS)
        }
        (Some(line), _) => {
            eprintln!("{line}");
            Ok(ExitCode::FAILURE)
        }
        (None, _) => Ok(ExitCode::FAILURE),
    }
}
