//! # MySense Poller
//!
//! Polls the configured input modules and prints their decoded readings.
//!
//! # Usage
//!
//! ```bash
//! # Poll once with the default config
//! mysense
//!
//! # Ten polls, JSON output, timestamped debug log lines
//! mysense --config config.toml --count 10 --json --level debug --timestamps
//!
//! # Self-test every module, then exit
//! mysense --config config.toml --self-test --count 0
//!
//! # Print a config template with every module at its defaults
//! mysense --print-config
//! ```

#![deny(warnings)]

use clap::Parser;
use mysense_common::config::{AppConfig, ConfigLoader};
use mysense_common::consts::{DEFAULT_CONFIG_PATH, DEFAULT_POLL_INTERVAL_MS};
use mysense_common::log::Severity;
use mysense_common::module::descriptor::DecodedReading;
use mysense_log::{ConsoleSink, FileStore, LogSink, Logger, MemoryStore, PersistentSink};
use mysense_modules::{ModuleCatalog, ModuleRegistry, RegistryError};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// MySense - poll input modules and print decoded readings
#[derive(Parser, Debug)]
#[command(name = "mysense")]
#[command(author = "MySense")]
#[command(version)]
#[command(about = "Polls MySense input modules and prints decoded readings")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of polls (0 = none)
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Run every module's self-test before polling
    #[arg(long)]
    self_test: bool,

    /// Prefix dispatcher lines with a timestamp
    #[arg(long)]
    timestamps: bool,

    /// Dispatcher level override (fatal, error, warning, info, debug, all)
    #[arg(short, long)]
    level: Option<Severity>,

    /// Print a configuration template and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output readings and logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("MySense startup failed: {}", e);
        if let Some(logger) = Logger::try_instance() {
            logger.fatal(&format!("startup failed: {e}"));
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_tracing(&args);

    let catalog = ModuleCatalog::builtin();
    if args.print_config {
        print!("{}", config_template(&catalog));
        return Ok(());
    }

    info!("MySense v{} starting...", env!("CARGO_PKG_VERSION"));

    info!("Loading config from {:?}", args.config);
    let config = AppConfig::load(&args.config)?;
    config.validate()?;

    let logger = Logger::init(build_logger(&config))?;
    logger.set_level(args.level.unwrap_or(config.system.log_level));
    logger.set_timestamps(args.timestamps || config.system.timestamps);
    logger.info(&format!("{} starting", config.system.service_name));

    let mut registry = catalog.build(&config.system.modules, &config)?;
    if registry.is_empty() {
        logger.warning("no input modules configured");
    }

    if args.self_test {
        self_test(&mut registry, logger);
    }

    let interval = Duration::from_millis(config.system.poll_interval_ms);
    for poll in 0..args.count {
        if poll > 0 {
            thread::sleep(interval);
        }
        poll_once(&mut registry, logger, args.json)?;
    }

    info!("MySense shutdown complete");
    Ok(())
}

/// Dispatcher with a console sink and a persistent sink, file-backed when
/// `persist_dir` is configured.
fn build_logger(config: &AppConfig) -> Logger {
    let persistent: Box<dyn LogSink> = match &config.system.persist_dir {
        Some(dir) => {
            info!("Persisting severe log messages under {:?}", dir);
            Box::new(PersistentSink::new(FileStore::new(dir)))
        }
        None => Box::new(PersistentSink::new(MemoryStore::new())),
    };
    Logger::with_sinks(vec![Box::new(ConsoleSink::stdout()), persistent])
}

fn self_test(registry: &mut ModuleRegistry, logger: &Logger) {
    for (id, result) in registry.self_test_all() {
        match result {
            Ok(()) => logger.info(&format!("module {id} self-test passed")),
            Err(e) => logger.error(&format!("module {id} self-test failed: {e}")),
        }
    }
}

fn poll_once(
    registry: &mut ModuleRegistry,
    logger: &Logger,
    json: bool,
) -> Result<(), serde_json::Error> {
    for (id, result) in registry.poll_all() {
        let decoded = result
            .map_err(RegistryError::from)
            .and_then(|reading| registry.decode(id, &reading));
        match decoded {
            Ok(reading) => print_reading(&reading, json)?,
            Err(e) => logger.error(&format!("module {id}: {e}")),
        }
    }
    Ok(())
}

fn print_reading(reading: &DecodedReading, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(reading)?);
    } else {
        println!("{reading}");
    }
    Ok(())
}

fn config_template(catalog: &ModuleCatalog) -> String {
    let modules = catalog
        .sections()
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[system]\n\
         service_name = \"mysense\"\n\
         log_level = \"{}\"\n\
         timestamps = false\n\
         poll_interval_ms = {}\n\
         modules = [{}]\n\n{}",
        Severity::default(),
        DEFAULT_POLL_INTERVAL_MS,
        modules,
        catalog.template()
    )
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
