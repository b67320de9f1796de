//! Project service request/response types.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp format used by the service for `created_at`.
const SERVICE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H:%M:%S";

/// Errors that can occur when talking to the project service.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Service(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opaque, server-assigned project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Marker carried by placeholder cards that stand for "no project".
    pub const SENTINEL: &'static str = "-1";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id is the "no project" marker.
    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::SENTINEL
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A voice cloning job as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub quality: String,
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    pub text: String,
    #[serde(default)]
    pub audio_files: Vec<String>,
}

impl Project {
    /// Creation time in display form.
    ///
    /// Falls back to the raw value when the service sends something other
    /// than its usual `dd-mm-YYYY_HH:MM:SS` stamp.
    pub fn created_at_display(&self) -> String {
        NaiveDateTime::parse_from_str(&self.created_at, SERVICE_TIMESTAMP_FORMAT)
            .map(|ts| ts.format("%d-%m-%Y %H:%M:%S").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Body returned by `POST /projects`.
///
/// The deployed service wraps the record together with its storage and
/// job-submission statuses; a bare record is accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateProjectResponse {
    Envelope {
        #[serde(default)]
        status_for_db: Option<u16>,
        #[serde(default)]
        status_for_batch: Option<u16>,
        project: Project,
    },
    Bare(Project),
}

impl CreateProjectResponse {
    pub fn into_project(self) -> Project {
        match self {
            CreateProjectResponse::Envelope { project, .. } => project,
            CreateProjectResponse::Bare(project) => project,
        }
    }
}

/// Error body in the shape the service's framework emits.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: serde_json::Value,
}

impl ServiceErrorBody {
    /// Human readable message; structured details are flattened to JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Health check response from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// An audio file attached to a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub path: PathBuf,
}

impl AudioUpload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name sent with the multipart part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string()
    }

    /// Lowercase extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// MIME type inferred from the extension.
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("ogg") => "audio/ogg",
            Some("flac") => "audio/flac",
            Some("m4a") | Some("mp4") => "audio/mp4",
            _ => "application/octet-stream",
        }
    }
}

/// Packaged form submission for one create request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFormInput {
    pub title: String,
    pub description: String,
    pub text: String,
    pub quality: String,
    pub audio_files: Vec<AudioUpload>,
}

impl ProjectFormInput {
    /// Text fields in submission order.
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("text", &self.text),
            ("quality", &self.quality),
        ]
    }
}
