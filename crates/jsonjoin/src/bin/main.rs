use std::io;

use clap::{Parser, ValueEnum};
use jsonjoin::commands::Commands;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LogMode {
    #[default]
    Human,
    Json,
}

impl From<LogMode> for logutil::LogFormat {
    fn from(mode: LogMode) -> Self {
        match mode {
            LogMode::Human => logutil::LogFormat::HumanReadable,
            LogMode::Json => logutil::LogFormat::Json,
        }
    }
}

#[derive(Parser)]
#[clap(name = "jsonjoin")]
#[clap(version)]
#[clap(about = "Join and validate JSON records", long_about = None)]
struct Cli {
    /// Log verbosity. Repeat for more detail.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Format for logs written to stderr.
    #[clap(long, value_enum, default_value_t = LogMode::Human, env = "JSONJOIN_LOG_MODE", global = true)]
    log_mode: LogMode,

    #[clap(subcommand)]
    command: Commands,
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn main() {
    let cli = Cli::parse();
    logutil::configure_global_logger(log_level(cli.verbose), cli.log_mode.into(), io::stderr);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = cli.command.run(&mut out) {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}
