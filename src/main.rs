// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::Path;

use crate::app_config::{Config, LogLevel};
use crate::language::{Language, TranslationDirection};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod artifacts;
mod engine;
mod errors;
mod language;
mod models;
mod session;

/// CLI Wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSourceLanguage {
    Indonesia,
    Minangkabau,
}

impl From<CliSourceLanguage> for Language {
    fn from(cli_language: CliSourceLanguage) -> Self {
        match cli_language {
            CliSourceLanguage::Indonesia => Language::Indonesian,
            CliSourceLanguage::Minangkabau => Language::Minangkabau,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text between Indonesia and Minangkabau (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Verify that both model pairs load from the artifact store
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for penerjemah
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate; reads lines from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language; the target is always the other one
    #[arg(short, long, value_enum, default_value = "indonesia")]
    source_language: CliSourceLanguage,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Penerjemah - Indonesia <-> Minangkabau translation
///
/// Translates text between Indonesian and Minangkabau using a pair of local
/// sequence-to-sequence models, one per direction.
#[derive(Parser, Debug)]
#[command(name = "penerjemah")]
#[command(version = "1.0.0")]
#[command(about = "Indonesia <-> Minangkabau text translation")]
#[command(long_about = "Penerjemah translates text between Indonesian and Minangkabau using two
locally stored sequence-to-sequence models, one per direction.

EXAMPLES:
    penerjemah \"Selamat pagi\"                      # Indonesia -> Minangkabau
    penerjemah -s minangkabau \"Salamaik pagi\"      # Minangkabau -> Indonesia
    cat kalimat.txt | penerjemah                   # Translate stdin line by line
    penerjemah check                               # Verify model artifacts load
    penerjemah completions bash > penerjemah.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    default one will be created automatically.

MODELS:
    The artifact store root (models_dir) must contain one directory per
    direction: indonesia-minangkabau and minangkabau-indonesia, each holding
    the exported encoder/decoder ONNX files, tokenizer.json and config.json.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to translate; reads lines from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language; the target is always the other one
    #[arg(short, long, value_enum, default_value = "indonesia")]
    source_language: CliSourceLanguage,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the config file, creating a default one when it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        let config = Config::default();
        if let Err(e) = config.save(config_path) {
            error!("Could not write default config to {}: {}", config_path, e);
        }
        Ok(config)
    }
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = load_or_create_config(&args.config_path)?;
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let direction = TranslationDirection::from_source(args.source_language.into());
    let controller = Controller::with_config(config)?;

    match args.text {
        Some(text) => {
            let result = controller
                .translate_once(&text, direction)
                .await
                .map_err(|e| anyhow!("{}", e))?;
            println!("{}", result.text);
            Ok(())
        }
        None => controller.run_interactive(direction).await,
    }
}

async fn run_check(config_path: &str) -> Result<()> {
    let config = load_or_create_config(config_path)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller.check().await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "penerjemah", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check { config_path }) => run_check(&config_path).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            run_translate(TranslateArgs {
                text: cli.text,
                source_language: cli.source_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}
