// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod artifact_store;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline_controller;
mod providers;
mod stage_runner;
mod transcoder;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dub a video into the target language (default command)
    Dub(DubArgs),

    /// List supported target languages
    Languages,

    /// Generate shell completions for revoice
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct DubArgs {
    /// Input video file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target language name or code (e.g., 'Spanish', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Rescale the video to 720p before extraction (better results)
    #[arg(short, long)]
    resize: bool,

    /// Package only the synthesized audio, not the video
    #[arg(short, long)]
    audio_only: bool,

    /// Directory for the packaged downloads
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Revoice - AI-powered video dubbing
///
/// Extracts and transcribes a video's audio track, translates the speech to a
/// target language, synthesizes new audio, and packages the results.
#[derive(Parser, Debug)]
#[command(name = "revoice")]
#[command(author = "Revoice Team")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered video dubbing tool")]
#[command(long_about = "Revoice extracts a video's speech, translates it, and synthesizes dubbed audio.

EXAMPLES:
    revoice movie.mp4                          # Dub into the configured target language
    revoice -t Spanish movie.mp4               # Dub into Spanish
    revoice -t fr -r movie.mp4                 # Rescale to 720p first, dub into French
    revoice -a movie.mp4                       # Package audio only
    revoice --log-level debug movie.mp4        # Run with debug logging
    revoice languages                          # List supported target languages
    revoice completions bash > revoice.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SERVICES:
    transcription - OpenAI-compatible /audio/transcriptions endpoint (whisper)
    translation   - LibreTranslate-compatible /translate endpoint
    synthesis     - OpenAI-compatible /audio/speech endpoint (TTS)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Target language name or code (e.g., 'Spanish', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Rescale the video to 720p before extraction (better results)
    #[arg(short, long)]
    resize: bool,

    /// Package only the synthesized audio, not the video
    #[arg(short, long)]
    audio_only: bool,

    /// Directory for the packaged downloads
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
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
            generate(shell, &mut cmd, "revoice", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Dub(args)) => run_dub(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let dub_args = DubArgs {
                input_path,
                target_language: cli.target_language,
                resize: cli.resize,
                audio_only: cli.audio_only,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_dub(dub_args).await
        }
    }
}

fn print_languages() {
    println!("Supported target languages:");
    for (name, code) in language_utils::SUPPORTED_LANGUAGES {
        println!("  {:<20} {}", name, code);
    }
}

async fn run_dub(options: DubArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(target_language) = &options.target_language {
            config.target_language = target_language.clone();
        }

        if options.resize {
            config.resize_to_720p = true;
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(target_language) = &options.target_language {
            config.target_language = target_language.clone();
        }

        if options.resize {
            config.resize_to_720p = true;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and run the workflow
    let controller = Controller::with_config(config)?;
    controller
        .run(options.input_path, options.output_dir, options.audio_only)
        .await
}
