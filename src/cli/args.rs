//! CLI argument definitions and parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::backend::AudioUpload;
use crate::config::ConfigOverrides;
use crate::form::FormController;
use crate::page::Route;

/// Browse and create voice cloning projects.
#[derive(Parser, Debug)]
#[command(name = "voicecloning")]
#[command(about = "Browse and create voice cloning projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// API root of the project service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Base URL of the rendered audio outputs
    #[arg(long, global = true)]
    pub asset_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Config file (default: <config dir>/voicecloning/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write rendered markup to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render the project listing
    List,

    /// Render the detail popup for a project
    Show {
        /// Project id as shown on its card
        id: String,
    },

    /// Submit the create-project form
    Create {
        /// Project title
        #[arg(long)]
        title: Option<String>,

        /// Text the cloned voice should speak
        #[arg(long)]
        text: Option<String>,

        /// Quality preset: ultra_fast, fast, standard or high_quality
        #[arg(short, long)]
        quality: Option<String>,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Reference audio file (repeatable)
        #[arg(short, long = "audio", value_parser = parse_audio)]
        audio: Vec<AudioUpload>,
    },

    /// Check service health
    Health,
}

impl Command {
    /// Page route this command loads, if it drives a whole page.
    ///
    /// `show` answers a single card click and `health` is a bare service
    /// call, so neither loads a page.
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::List => Some(Route::Listing),
            Command::Create { .. } => Some(Route::Create),
            Command::Show { .. } | Command::Health => None,
        }
    }

    /// Enter the `create` arguments into a loaded form.
    ///
    /// Flags left out stay empty, so the form's own constraints decide
    /// whether it can be submitted. Other commands leave the form untouched.
    pub fn fill_form(&self, form: &mut FormController) {
        let Command::Create {
            title,
            text,
            quality,
            description,
            audio,
        } = self
        else {
            return;
        };

        let fields = [
            ("title", title),
            ("text", text),
            ("quality", quality),
            ("description", description),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                form.input_text(name, value.as_str());
            }
        }
        form.input_files("audio_files", audio.clone());
    }
}

impl Args {
    /// Command-line configuration overrides.
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            asset_url: self.asset_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Errors that can occur when parsing an audio file argument.
#[derive(Error, Debug)]
pub enum UploadParseError {
    #[error("Audio path cannot be empty")]
    EmptyPath,

    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),
}

/// Parse an `--audio` argument into an upload.
///
/// # Examples
/// ```
/// use voicecloning_client::cli::parse_audio;
/// assert!(parse_audio("/nonexistent/voice.wav").is_err());
/// ```
pub fn parse_audio(input: &str) -> Result<AudioUpload, UploadParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UploadParseError::EmptyPath);
    }

    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(UploadParseError::FileNotFound(path));
    }
    if !path.is_file() {
        return Err(UploadParseError::NotAFile(path));
    }

    Ok(AudioUpload::new(path))
}
