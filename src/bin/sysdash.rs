//! sysdash - live system telemetry dashboard.
//!
//! Usage:
//!   sysdash                              # connect to ws://localhost:8000/ws
//!   sysdash --url ws://host:8000/ws      # custom producer
//!   sysdash --demo                       # synthetic data, no producer needed
//!   sysdash --reconnect backoff          # retry after the connection drops
//!   sysdash --log-file /tmp/sysdash.log -v

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use sysdash::config::{
    Config, ConfigError, DEFAULT_COLUMNS, DEFAULT_DEMO_INTERVAL_MS, DEFAULT_TICK_MS, DEFAULT_URL,
};
use sysdash::tui::App;

/// Live system telemetry dashboard.
#[derive(Parser, Debug)]
#[command(name = "sysdash", about = "Live system telemetry dashboard")]
struct Args {
    /// WebSocket endpoint of the metrics producer.
    #[arg(long, env = "SYSDASH_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Use the built-in demo source instead of connecting.
    #[arg(long, env = "SYSDASH_DEMO")]
    demo: bool,

    /// Interval between demo snapshots in milliseconds.
    #[arg(long, value_name = "MS", env = "SYSDASH_DEMO_INTERVAL_MS", default_value_t = DEFAULT_DEMO_INTERVAL_MS)]
    demo_interval_ms: u64,

    /// Panels per row in the overview grid.
    #[arg(long, env = "SYSDASH_COLUMNS", default_value_t = DEFAULT_COLUMNS)]
    columns: u16,

    /// Add a bar panel with the current value of every core.
    #[arg(long, env = "SYSDASH_CORE_BARS")]
    core_bars: bool,

    /// What to do when the connection closes: freeze or backoff.
    #[arg(long, value_name = "POLICY", env = "SYSDASH_RECONNECT", default_value = "freeze")]
    reconnect: String,

    /// UI refresh tick in milliseconds.
    #[arg(long, value_name = "MS", env = "SYSDASH_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Write logs to this file. Logs are discarded otherwise.
    #[arg(long, value_name = "PATH", env = "SYSDASH_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    info!(
        endpoint = %config.endpoint(),
        columns = config.columns,
        reconnect = ?config.reconnect,
        "starting sysdash"
    );

    if let Err(e) = App::new(config).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<Config, ConfigError> {
    let config = if args.demo {
        Config::demo(args.demo_interval_ms)?
    } else {
        Config::websocket(&args.url)?
    };
    Ok(config
        .with_columns(args.columns)?
        .with_tick_ms(args.tick_ms)?
        .with_core_bars(args.core_bars)
        .with_reconnect(args.reconnect.parse()?))
}

/// Initializes tracing. The terminal belongs to the TUI, so logs only go to
/// `log_file` when one is given.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("sysdash={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysdash::config::{ReconnectPolicy, SourceKind};

    fn parse(argv: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("sysdash").chain(argv.iter().copied()))
            .unwrap();
        build_config(&args)
    }

    #[test]
    fn test_flags_map_to_config() {
        let config = parse(&[
            "--url",
            "ws://metrics:9000/ws",
            "--columns",
            "4",
            "--core-bars",
            "--reconnect",
            "backoff",
        ])
        .unwrap();
        assert_eq!(
            config.source,
            SourceKind::WebSocket {
                url: "ws://metrics:9000/ws".into()
            }
        );
        assert_eq!(config.columns, 4);
        assert!(config.core_bars);
        assert_eq!(config.reconnect, ReconnectPolicy::Backoff);
    }

    #[test]
    fn test_demo_flag_selects_demo_source() {
        let config = parse(&["--demo", "--demo-interval-ms", "100"]).unwrap();
        assert!(matches!(config.source, SourceKind::Demo { .. }));
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysdash.log");
        init_logging(1, false, Some(&path)).unwrap();
        info!("log file test");
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            parse(&["--url", "http://x"]),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert_eq!(parse(&["--columns", "0"]), Err(ConfigError::NoColumns));
        assert!(matches!(
            parse(&["--reconnect", "sometimes"]),
            Err(ConfigError::UnknownReconnect(_))
        ));
    }
}
