//! Communication with the remote project service.
//!
//! Provides the service trait and its HTTP implementation for listing,
//! fetching and creating voice cloning projects.

mod client;
mod types;

pub use client::HttpProjectService;
pub use types::{
    AudioUpload, CreateProjectResponse, FetchError, HealthStatus, Project, ProjectFormInput,
    ProjectId, ServiceErrorBody,
};

use crate::config::ClientConfig;

/// Trait for project service communication.
///
/// Every call is a single round trip with no caching and no retries; a
/// failed attempt is returned to the caller as is.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectService {
    /// Check service health status.
    fn health(&self) -> Result<HealthStatus, FetchError>;

    /// Fetch every project.
    fn list_projects(&self) -> Result<Vec<Project>, FetchError>;

    /// Fetch a single project by id.
    fn get_project(&self, id: &ProjectId) -> Result<Project, FetchError>;

    /// Create a project from a packaged form submission.
    ///
    /// # Returns
    /// The record the service created, or the error message it reported.
    fn create_project(&self, input: &ProjectFormInput) -> Result<Project, FetchError>;
}

/// Create an HTTP service client from configuration.
pub fn create_service(config: &ClientConfig) -> Result<HttpProjectService, FetchError> {
    HttpProjectService::new(config)
}

#[cfg(test)]
pub(crate) fn sample_project(id: &str) -> Project {
    Project {
        id: ProjectId::new(id),
        title: format!("Project {id}"),
        quality: "fast".to_string(),
        created_at: "05-03-2024_14:30:00".to_string(),
        description: "Demo voice".to_string(),
        text: "The quick brown fox".to_string(),
        audio_files: vec!["sample1.wav".to_string(), "sample2.wav".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_service_list_projects() {
        let mut mock = MockProjectService::new();

        mock.expect_list_projects()
            .times(1)
            .returning(|| Ok(vec![sample_project("a"), sample_project("b")]));

        let projects = mock.list_projects().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].id.as_str(), "b");
    }

    #[test]
    fn test_mock_service_get_project_not_found() {
        let mut mock = MockProjectService::new();

        mock.expect_get_project()
            .withf(|id| id.as_str() == "missing")
            .times(1)
            .returning(|id| Err(FetchError::NotFound(id.to_string())));

        let result = mock.get_project(&ProjectId::new("missing"));
        assert!(matches!(result.unwrap_err(), FetchError::NotFound(_)));
    }

    #[test]
    fn test_mock_service_create_project() {
        let mut mock = MockProjectService::new();

        mock.expect_create_project()
            .withf(|input| input.title == "Narrator" && input.audio_files.len() == 1)
            .times(1)
            .returning(|_| Ok(sample_project("new")));

        let input = ProjectFormInput {
            title: "Narrator".to_string(),
            text: "Hello".to_string(),
            quality: "fast".to_string(),
            audio_files: vec![AudioUpload::new("/tmp/voice.wav")],
            ..Default::default()
        };

        let created = mock.create_project(&input).unwrap();
        assert_eq!(created.id.as_str(), "new");
    }

    #[test]
    fn test_create_service_trims_trailing_slash() {
        let config = ClientConfig {
            api_url: "http://localhost:8000/api/".to_string(),
            ..Default::default()
        };
        let service = create_service(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_create_fails_for_missing_upload() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let service = create_service(&config).unwrap();

        let input = ProjectFormInput {
            title: "t".to_string(),
            text: "x".to_string(),
            quality: "fast".to_string(),
            audio_files: vec![AudioUpload::new("/nonexistent/voice.wav")],
            ..Default::default()
        };

        let result = service.create_project(&input);
        assert!(matches!(result.unwrap_err(), FetchError::FileNotFound(_)));
    }

    #[test]
    fn test_create_reports_unreadable_upload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let service = create_service(&ClientConfig::default()).unwrap();

        // A directory exists but cannot be read as a file
        let input = ProjectFormInput {
            title: "t".to_string(),
            text: "x".to_string(),
            quality: "fast".to_string(),
            audio_files: vec![AudioUpload::new(temp_dir.path())],
            ..Default::default()
        };

        let result = service.create_project(&input);
        assert!(matches!(result.unwrap_err(), FetchError::ReadFailed { .. }));
    }

    // ===========================================
    // HttpProjectService against a local HTTP server
    // ===========================================

    mod http {
        use super::*;
        use serde_json::{Value, json};
        use tempfile::TempDir;
        use tokio::runtime::Runtime;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn runtime() -> Runtime {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        }

        /// Start a server and a blocking client rooted at `{server}/api`.
        fn start(rt: &Runtime) -> (MockServer, HttpProjectService) {
            let server = rt.block_on(MockServer::start());
            let config = ClientConfig {
                api_url: format!("{}/api", server.uri()),
                ..Default::default()
            };
            let service = create_service(&config).unwrap();
            (server, service)
        }

        fn respond(
            rt: &Runtime,
            server: &MockServer,
            verb: &str,
            route: &str,
            template: ResponseTemplate,
        ) {
            rt.block_on(
                Mock::given(method(verb))
                    .and(path(route))
                    .respond_with(template)
                    .mount(server),
            );
        }

        fn project_json(id: &str) -> Value {
            json!({
                "id": id,
                "title": "Narrator",
                "description": "",
                "text": "Hello",
                "quality": "fast",
                "created_at": "01-01-2024_00:00:00",
                "audio_files": ["take1.wav"]
            })
        }

        fn form_with_uploads(dir: &TempDir) -> ProjectFormInput {
            let first = dir.path().join("take1.wav");
            let second = dir.path().join("take2.mp3");
            std::fs::write(&first, b"RIFF fake wav").unwrap();
            std::fs::write(&second, b"ID3 fake mp3").unwrap();

            ProjectFormInput {
                title: "Narrator".to_string(),
                description: "Demo".to_string(),
                text: "Hello".to_string(),
                quality: "fast".to_string(),
                audio_files: vec![AudioUpload::new(first), AudioUpload::new(second)],
            }
        }

        #[test]
        fn test_list_projects() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "GET",
                "/api/projects",
                ResponseTemplate::new(200)
                    .set_body_json(json!([project_json("a"), project_json("b")])),
            );

            let projects = service.list_projects().unwrap();
            assert_eq!(projects.len(), 2);
            assert_eq!(projects[1].id.as_str(), "b");
        }

        #[test]
        fn test_get_project_not_found() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "GET",
                "/api/projects/zz",
                ResponseTemplate::new(404)
                    .set_body_json(json!({"detail": "Error: Project, ID of zz, not found!"})),
            );

            let result = service.get_project(&ProjectId::new("zz"));
            assert!(matches!(result.unwrap_err(), FetchError::NotFound(id) if id == "zz"));
        }

        #[test]
        fn test_get_project_encodes_id_as_one_segment() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "GET",
                "/api/projects/a%2Fb",
                ResponseTemplate::new(200).set_body_json(project_json("a/b")),
            );

            let project = service.get_project(&ProjectId::new("a/b")).unwrap();
            assert_eq!(project.id.as_str(), "a/b");
        }

        #[test]
        fn test_create_unwraps_envelope() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "POST",
                "/api/projects",
                ResponseTemplate::new(201).set_body_json(json!({
                    "status_for_db": 200,
                    "status_for_batch": 200,
                    "project": project_json("ab")
                })),
            );

            let dir = TempDir::new().unwrap();
            let project = service.create_project(&form_with_uploads(&dir)).unwrap();
            assert_eq!(project.id, ProjectId::new("ab"));
        }

        #[test]
        fn test_create_sends_multipart_fields_and_files() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "POST",
                "/api/projects",
                ResponseTemplate::new(201).set_body_json(project_json("ab")),
            );

            let dir = TempDir::new().unwrap();
            service.create_project(&form_with_uploads(&dir)).unwrap();

            let requests = rt.block_on(server.received_requests()).unwrap();
            assert_eq!(requests.len(), 1);
            let content_type = requests[0]
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert!(content_type.starts_with("multipart/form-data"));

            let body = String::from_utf8_lossy(&requests[0].body);
            for field in ["title", "description", "text", "quality"] {
                assert!(body.contains(&format!("name=\"{field}\"")), "missing {field}");
            }
            assert_eq!(body.matches("name=\"audio_files\"").count(), 2);
            assert!(body.contains("filename=\"take1.wav\""));
            assert!(body.contains("filename=\"take2.mp3\""));
            assert!(body.contains("audio/wav"));
            assert!(body.contains("RIFF fake wav"));
        }

        #[test]
        fn test_create_reports_service_detail() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "POST",
                "/api/projects",
                ResponseTemplate::new(422).set_body_json(json!({"detail": "nope!"})),
            );

            let dir = TempDir::new().unwrap();
            let err = service.create_project(&form_with_uploads(&dir)).unwrap_err();
            assert!(matches!(&err, FetchError::Service(msg) if msg == "nope!"));
            assert_eq!(err.to_string(), "nope!");
        }

        #[test]
        fn test_create_without_detail_reports_status() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "POST",
                "/api/projects",
                ResponseTemplate::new(500).set_body_string("boom"),
            );

            let dir = TempDir::new().unwrap();
            let err = service.create_project(&form_with_uploads(&dir)).unwrap_err();
            assert!(
                matches!(&err, FetchError::Service(msg) if msg == "Status: 500 Internal Server Error")
            );
        }

        #[test]
        fn test_health() {
            let rt = runtime();
            let (server, service) = start(&rt);
            respond(
                &rt,
                &server,
                "GET",
                "/api/health",
                ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})),
            );

            assert!(service.health().unwrap().is_ok());
        }
    }
}
