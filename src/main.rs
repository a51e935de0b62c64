// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context, anyhow};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use clap::{Parser, Subcommand, ValueEnum, CommandFactory};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::generation::{GenerationService, Genre};
use crate::sentence_store::{SentenceStore, create_sample_data};
use crate::speech::SpeechService;

mod app_config;
mod app_controller;
mod content_parser;
mod errors;
mod file_utils;
mod generation;
mod highlight;
mod language_utils;
mod providers;
mod sentence_store;
mod session;
mod speech;

/// CLI Wrapper for Genre to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenre {
    Technology,
    Science,
    History,
    Environment,
    Business,
    Culture,
}

impl From<CliGenre> for Genre {
    fn from(cli_genre: CliGenre) -> Self {
        match cli_genre {
            CliGenre::Technology => Genre::Technology,
            CliGenre::Science => Genre::Science,
            CliGenre::History => Genre::History,
            CliGenre::Environment => Genre::Environment,
            CliGenre::Business => Genre::Business,
            CliGenre::Culture => Genre::Culture,
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
    /// Inspect the sentence data directory
    Data {
        /// Write a small sample data set first
        #[arg(long)]
        create_sample: bool,
    },

    /// Generate a shadowing passage on a topic
    Generate {
        /// Passage genre
        #[arg(value_enum)]
        genre: CliGenre,

        /// Concrete theme, e.g. "renewable energy"
        topic: String,

        /// Print the parsed pairs as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Synthesize speech for a sentence
    Speak {
        /// Text to read aloud
        text: String,

        /// Playback rate (0.7 slow, 1.0 normal, 1.3 fast)
        #[arg(short, long, default_value_t = 1.0)]
        rate: f32,

        /// Output file; extension follows the produced format
        #[arg(short, long, default_value = "speech")]
        output: String,
    },

    /// Generate shell completions for lexishadow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lexishadow - personal English study from the command line
///
/// Loads bilingual sentence data, generates shadowing passages with AI,
/// and renders study audio through Piper or an HTTP fallback.
#[derive(Parser, Debug)]
#[command(name = "lexishadow")]
#[command(version = "0.1.0")]
#[command(about = "English study sentences, AI shadowing passages, and speech synthesis")]
#[command(long_about = "lexishadow drives the study library from the command line.

EXAMPLES:
    lexishadow data                                # Show what the data directory holds
    lexishadow data --create-sample                # Bootstrap a sample data set
    lexishadow generate technology \"NVIDIA\"        # Generate a shadowing passage
    lexishadow speak \"Hello there.\" -r 0.7         # Render slow audio to speech.mp3
    lexishadow completions bash > lexishadow.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. Without a config file, defaults are used and the
    GOOGLE_API_KEY environment variable supplies the generation key.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

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

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lexishadow", &mut std::io::stdout());
            Ok(())
        }
        Commands::Data { create_sample } => {
            let config = load_config(&cli.config_path, cli.log_level.is_none())?;
            run_data(&config, create_sample)
        }
        Commands::Generate { genre, topic, json } => {
            let config = load_config(&cli.config_path, cli.log_level.is_none())?;
            run_generate(&config, genre.into(), &topic, json).await
        }
        Commands::Speak { text, rate, output } => {
            let config = load_config(&cli.config_path, cli.log_level.is_none())?;
            run_speak(&config, &text, rate, &output).await
        }
    }
}

/// Load the configuration file, falling back to defaults when absent
fn load_config(config_path: &str, apply_config_log_level: bool) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        Config::default()
    };

    if apply_config_log_level {
        let level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(level);
    }

    config.validate()?;
    Ok(config)
}

/// Report what the data directory holds
fn run_data(config: &Config, create_sample: bool) -> Result<()> {
    if create_sample {
        create_sample_data(&config.data_dir)?;
        info!("Sample data written to {}", config.data_dir);
    }

    let store = match SentenceStore::load_cached(&config.data_dir) {
        Ok(store) => store,
        Err(e) => {
            warn!("{}", e);
            return Err(anyhow!(
                "No usable sentence data in '{}' (try --create-sample)",
                config.data_dir
            ));
        }
    };

    let source = language_utils::get_language_name(&config.source_language)
        .unwrap_or_else(|_| config.source_language.clone());
    let target = language_utils::get_language_name(&config.target_language)
        .unwrap_or_else(|_| config.target_language.clone());

    println!("Data directory : {}", config.data_dir);
    println!("Languages      : {} -> {}", source, target);
    println!("Sentences      : {}", store.len());
    println!("Groups         : {}", store.group_count());
    println!("Word master    : {} words", store.word_master.len());
    Ok(())
}

/// Generate a passage and print the parsed pairs
async fn run_generate(config: &Config, genre: Genre, topic: &str, json: bool) -> Result<()> {
    let service = GenerationService::new(config.generation.clone());
    if !service.is_configured() {
        return Err(anyhow!(
            "No generation API key configured (set GOOGLE_API_KEY or generation.api_key)"
        ));
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Generating a {} passage about '{}'...", genre, topic));
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = service.generate(genre, topic).await;
    spinner.finish_and_clear();

    let pairs = result.context("Passage generation failed")?;
    if pairs.is_empty() {
        return Err(anyhow!("Generated passage could not be parsed into sentence pairs"));
    }

    info!("Generated {} sentence pairs", pairs.len());
    if json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
    } else {
        for (i, pair) in pairs.iter().enumerate() {
            println!("{}. {}", i + 1, pair.english);
            println!("   {}", pair.japanese);
        }
    }
    Ok(())
}

/// Render one sentence to an audio file
async fn run_speak(config: &Config, text: &str, rate: f32, output: &str) -> Result<()> {
    let service = SpeechService::new(&config.speech);

    let clip = service
        .synthesize(text, rate)
        .await
        .context("Speech synthesis failed")?;

    let extension = match clip.mime {
        "audio/wav" => "wav",
        _ => "mp3",
    };
    let output_path = if Path::new(output).extension().is_some() {
        output.to_string()
    } else {
        format!("{}.{}", output, extension)
    };

    std::fs::write(&output_path, &clip.bytes)
        .context(format!("Failed to write audio file: {}", output_path))?;

    info!("Wrote {} bytes ({}) to {}", clip.len(), clip.mime, output_path);
    Ok(())
}
