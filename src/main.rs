// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{persist_api_key, resolve_api_key, ConfigStore};
use crate::app_controller::{Controller, RunConfig};
use crate::errors::AppError;
use crate::providers::openai::DEFAULT_MODEL;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod formatter;
mod language_utils;
mod providers;
mod subtitle_processor;
mod translation_service;

/// CLI wrapper for LevelFilter to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a subtitle file (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for srt-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// SRT file to translate
    #[arg(value_name = "FILE_PATH")]
    file_path: PathBuf,

    /// Language of the SRT file (name or ISO code)
    #[arg(value_name = "SOURCE_LANG")]
    source_lang: String,

    /// Target language (name or ISO code)
    #[arg(value_name = "TARGET_LANG")]
    target_lang: String,

    /// OpenAI API key
    #[arg(long)]
    api_key: Option<String>,

    /// Save the API key for future use
    #[arg(long)]
    save_key: bool,

    /// Output file path
    #[arg(short, long, default_value = "output.srt")]
    output: PathBuf,

    /// Model name to use for translation
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srt-translator
///
/// Translates an SRT subtitle file with an LLM chat-completion endpoint:
/// the file is split into batches of subtitle blocks, each batch is
/// translated in order, and the model output is repaired back into valid
/// SRT before writing.
#[derive(Parser, Debug)]
#[command(name = "srt-translator")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered SRT subtitle file translator")]
#[command(long_about = "srt-translator splits an SRT file into batches of subtitle blocks, \
translates each batch through an LLM chat-completion endpoint, and repairs the output \
back into a valid SRT file.

EXAMPLES:
    srt-translator movie.srt Swedish English            # Translate to output.srt
    srt-translator movie.srt sv en -o movie.en.srt      # ISO codes and explicit output
    srt-translator movie.srt Swedish English --api-key sk-... --save-key
    srt-translator completions bash > srt-translator.bash

API KEY RESOLUTION (first non-empty wins):
    1. --api-key command-line argument
    2. OPENAI_API_KEY environment variable
    3. OPENAI_API_KEY in a local .env file
    4. api_key field in ~/.srt-translator/config.json")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SRT file to translate
    #[arg(value_name = "FILE_PATH")]
    file_path: Option<PathBuf>,

    /// Language of the SRT file (name or ISO code)
    #[arg(value_name = "SOURCE_LANG")]
    source_lang: Option<String>,

    /// Target language (name or ISO code)
    #[arg(value_name = "TARGET_LANG")]
    target_lang: Option<String>,

    /// OpenAI API key
    #[arg(long)]
    api_key: Option<String>,

    /// Save the API key for future use
    #[arg(long)]
    save_key: bool,

    /// Output file path
    #[arg(short, long, default_value = "output.srt")]
    output: PathBuf,

    /// Model name to use for translation
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after argument parsing if requested
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srt-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let file_path = cli
                .file_path
                .ok_or_else(|| anyhow!("FILE_PATH is required when no subcommand is specified"))?;
            let source_lang = cli
                .source_lang
                .ok_or_else(|| anyhow!("SOURCE_LANG is required when no subcommand is specified"))?;
            let target_lang = cli
                .target_lang
                .ok_or_else(|| anyhow!("TARGET_LANG is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                file_path,
                source_lang,
                target_lang,
                api_key: cli.api_key,
                save_key: cli.save_key,
                output: cli.output,
                model: cli.model,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let store = ConfigStore::default_location()?;

    // Load API key from the resolution chain
    let resolved = resolve_api_key(&store, options.api_key.as_deref());

    // If an API key is provided and --save-key is set, persist it
    if let (Some(key), true) = (&options.api_key, options.save_key) {
        persist_api_key(&store, key)?;
        info!("Saved API key to {:?}", store.path());
    }

    // Check if an API key is available
    let Some(resolved) = resolved else {
        error!("OpenAI API key not found. Please provide it using one of these methods:");
        error!("  1. Set the OPENAI_API_KEY environment variable");
        error!("  2. Create a .env file with OPENAI_API_KEY=your_key");
        error!("  3. Use the --api-key command-line argument");
        error!("  4. Use --api-key with --save-key to save it for future use");
        return Err(AppError::MissingApiKey.into());
    };

    info!("Using API key from {}", resolved.source);

    let controller = Controller::with_config(RunConfig {
        api_key: resolved.key,
        model: options.model,
        source_language: options.source_lang,
        target_language: options.target_lang,
    })?;

    controller.run(&options.file_path, &options.output).await
}
