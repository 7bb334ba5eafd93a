//! CLI argument definitions for the Viva application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Viva — generate, answer, and review ML interview questions.
#[derive(Parser, Debug)]
#[command(name = "viva", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory where exported documents are written.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// One-shot command; without one, the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a single interview question.
    Ask {
        /// Truncate the output at the first `?` (practice style).
        #[arg(long)]
        practice: bool,
        /// Use the conversational question template.
        #[arg(long)]
        conversational: bool,
    },
    /// Answer a question.
    Answer {
        /// The question to answer.
        question: String,
    },
    /// Review a candidate answer (0-10 score plus correction).
    Review {
        /// The question that was asked.
        question: String,
        /// The candidate's answer.
        answer: String,
    },
    /// Generate a batch of questions and export them to markdown.
    Batch {
        /// How many questions to generate.
        #[arg(short = 'n', long = "count", default_value_t = 5)]
        count: usize,
        /// Also derive a PDF from the exported markdown.
        #[arg(long)]
        pdf: bool,
    },
    /// Run the diagnostic prompt battery against the backend.
    Probe,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VIVA_CONFIG env var > ~/.viva/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VIVA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the output directory.
    ///
    /// Priority: --output-dir flag > config file value.
    pub fn resolve_output_dir(&self, config_dir: &str) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_dir))
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".viva").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".viva").join("config.toml");
    }
    PathBuf::from("config.toml")
}
