//! HTTP client for the project service.

use std::io::ErrorKind;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use reqwest::blocking::{Response, multipart};
use tracing::debug;

use crate::config::ClientConfig;

use super::ProjectService;
use super::types::{
    AudioUpload, CreateProjectResponse, FetchError, HealthStatus, Project, ProjectFormInput,
    ProjectId, ServiceErrorBody,
};

/// HTTP-based project service client.
pub struct HttpProjectService {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpProjectService {
    /// Create a new client for the API rooted at `config.api_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder();
        // reqwest's blocking client defaults to a 30s timeout; requests here
        // wait indefinitely unless one is configured.
        builder = match config.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.timeout(None::<Duration>),
        };
        let client = builder
            .build()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn projects_url(&self) -> String {
        format!("{}/projects", self.base_url)
    }

    /// `{base}/projects/{id}` with the id as one encoded path segment.
    fn project_url(&self, id: &ProjectId) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.projects_url())
            .map_err(|e| FetchError::RequestFailed(format!("Invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::RequestFailed("API URL cannot take a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!(%url, "GET");
        self.client
            .get(url)
            .send()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))
    }

    /// Build the multipart body: text fields first, then one part per file.
    fn build_form(input: &ProjectFormInput) -> Result<multipart::Form, FetchError> {
        let mut form = multipart::Form::new();
        for (name, value) in input.text_fields() {
            form = form.text(name, value.to_string());
        }
        for upload in &input.audio_files {
            form = form.part("audio_files", Self::file_part(upload)?);
        }
        Ok(form)
    }

    fn file_part(upload: &AudioUpload) -> Result<multipart::Part, FetchError> {
        let data = std::fs::read(&upload.path).map_err(|e| {
            let path = upload.path.display().to_string();
            match e.kind() {
                ErrorKind::NotFound => FetchError::FileNotFound(path),
                _ => FetchError::ReadFailed { path, source: e },
            }
        })?;

        multipart::Part::bytes(data)
            .file_name(upload.file_name())
            .mime_str(upload.mime_type())
            .map_err(|e| FetchError::RequestFailed(e.to_string()))
    }

    /// Turn a non-success response into the message the service reported.
    fn service_error(response: Response) -> FetchError {
        let status = response.status();
        let body = response.text().unwrap_or_default();

        match serde_json::from_str::<ServiceErrorBody>(&body) {
            Ok(err) => FetchError::Service(err.message()),
            Err(_) => FetchError::Service(format!("Status: {status}")),
        }
    }
}

impl ProjectService for HttpProjectService {
    fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = format!("{}/health", self.base_url);
        let response = self.get(&url)?;

        if !response.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }

    fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        let response = self.get(&self.projects_url())?;

        if !response.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }

    fn get_project(&self, id: &ProjectId) -> Result<Project, FetchError> {
        let url = self.project_url(id)?;
        let response = self.get(url.as_str())?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id.to_string()));
        }

        if !response.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }

    fn create_project(&self, input: &ProjectFormInput) -> Result<Project, FetchError> {
        let url = self.projects_url();
        let form = Self::build_form(input)?;

        debug!(%url, files = input.audio_files.len(), "POST");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::service_error(response));
        }

        response
            .json::<CreateProjectResponse>()
            .map(CreateProjectResponse::into_project)
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
