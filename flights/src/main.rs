use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
use config::{Config, MetricsConfig};

/// Flight search aggregation service
#[derive(Parser)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(path = %cli.config.display(), %error, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    // The guard flushes pending events on drop, so it must outlive the
    // runtime below.
    let _sentry_guard = config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if let Some(metrics_config) = &config.metrics
        && let Err(error) = install_statsd_recorder(metrics_config)
    {
        tracing::warn!(%error, "statsd recorder unavailable, metrics are discarded");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(search::run(config.search)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "service exited with error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn install_statsd_recorder(config: &MetricsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let recorder =
        StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port).build(Some("flights"))?;
    metrics::set_global_recorder(recorder).map_err(|error| error.to_string())?;

    Ok(())
}
