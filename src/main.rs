use anyhow::Result;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use interaction_simulator::config::{LogFormat, LoggingSettings, Settings};
use interaction_simulator::{run_simulation, EventSimulator, SimulationRng};

fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so JSON lines on stdout stay machine-readable
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}

#[instrument(skip_all)]
fn run(settings: Settings) -> Result<()> {
    let seed = settings
        .simulation
        .seed
        .unwrap_or_else(SimulationRng::entropy_seed);
    let config = settings.simulation.to_config()?;

    info!(
        seed,
        start_date = %config.start_date(),
        day_count = %config.day_count(),
        sessions_per_day = %config.sessions_per_day(),
        output = ?settings.output.kind,
        "Starting simulation"
    );

    let simulator = EventSimulator::from_seed(config, seed);
    let mut sink = settings.output.open_sink()?;
    // The runner logs the summary once the sink is flushed
    run_simulation(simulator, &mut sink, settings.output.failure_policy)?;

    Ok(())
}

fn main() -> Result<()> {
    let config_file = env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_file.as_deref())?;

    init_tracing(&settings.logging);
    info!("Starting interaction simulator");

    run(settings)
}
