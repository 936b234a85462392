use mazestep::{app::App, config::VisualizationConfig};

/// Environment variable holding the log level
const LOG_LEVEL_ENV: &str = "MAZESTEP_LOG";
/// Environment variable holding the maze seed, used when no seed argument is given
const SEED_ENV: &str = "MAZESTEP_SEED";
/// File that receives the logs, since the terminal is taken by the app
const LOG_FILE: &str = "mazestep.log";

/// Log to a file through a non-blocking writer.
/// The returned guard flushes pending logs when dropped.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|s| s.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn parse_seed() -> Option<u64> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(SEED_ENV).ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

fn main() -> std::io::Result<()> {
    let _guard = init_tracing();

    let mut config = VisualizationConfig::default();
    config.maze.seed = parse_seed();
    tracing::info!(seed = ?config.maze.seed, "Starting mazestep");

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(config).run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "App exited with an error");
    }
    result
}
