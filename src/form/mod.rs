//! Project creation form.
//!
//! The controller enables submission only while every field satisfies its
//! constraints, packages the fields and uploads into a create request, and
//! reports whether the page should navigate back to the listing.

mod controller;
mod schema;

pub use controller::{FormController, FormState, SUCCESS_MESSAGE, SubmitOutcome};
pub use schema::{
    ConstraintViolation, FieldKind, FieldSpec, FieldValue, QUALITY_PRESETS, project_form_fields,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AudioUpload, FetchError, MockProjectService, sample_project};
    use crate::notify::MockNotifier;
    use crate::page::Route;

    fn filled_controller() -> FormController {
        let mut form = FormController::for_project_form();
        form.input_text("title", "Narrator");
        form.input_text("text", "Read this aloud");
        form.input_text("quality", "standard");
        form.input_files("audio_files", vec![AudioUpload::new("/tmp/voice.wav")]);
        form
    }

    #[test]
    fn test_initial_state_is_invalid() {
        let form = FormController::for_project_form();
        assert_eq!(form.state(), FormState::Invalid);
        assert!(!form.submit_enabled());
    }

    #[test]
    fn test_form_without_required_fields_starts_valid() {
        let form = FormController::new(vec![FieldSpec::text("note", false)]);
        assert_eq!(form.state(), FormState::Valid);
    }

    #[test]
    fn test_state_tracks_every_input() {
        let mut form = FormController::for_project_form();

        assert_eq!(form.input_text("title", "Narrator"), FormState::Invalid);
        assert_eq!(form.input_text("text", "Hello"), FormState::Invalid);
        assert_eq!(form.input_text("quality", "fast"), FormState::Invalid);
        assert_eq!(
            form.input_files("audio_files", vec![AudioUpload::new("a.mp3")]),
            FormState::Valid
        );

        // Valid -> Invalid -> Valid, no hysteresis
        assert_eq!(form.input_text("title", ""), FormState::Invalid);
        assert!(!form.submit_enabled());
        assert_eq!(form.input_text("title", "Back"), FormState::Valid);
        assert!(form.submit_enabled());
    }

    #[test]
    fn test_description_is_optional() {
        let mut form = filled_controller();
        assert_eq!(form.input_text("description", ""), FormState::Valid);
    }

    #[test]
    fn test_constraint_violations() {
        let mut form = filled_controller();

        form.input_text("quality", "cinematic");
        assert_eq!(
            form.violations(),
            vec![ConstraintViolation::NotAnOption {
                field: "quality".to_string(),
                value: "cinematic".to_string(),
            }]
        );

        form.input_text("quality", "fast");
        form.input_text("audio_files", "voice.wav");
        assert_eq!(
            form.violations(),
            vec![ConstraintViolation::TypeMismatch("audio_files".to_string())]
        );

        form.input_files("audio_files", vec![]);
        assert_eq!(
            form.violations(),
            vec![ConstraintViolation::ValueMissing("audio_files".to_string())]
        );
    }

    #[test]
    fn test_long_text_and_any_upload_are_accepted() {
        let mut form = filled_controller();

        assert_eq!(form.input_text("text", "x".repeat(5000)), FormState::Valid);
        assert_eq!(form.input_text("title", "t".repeat(300)), FormState::Valid);
        assert_eq!(
            form.input_files(
                "audio_files",
                vec![AudioUpload::new("take1"), AudioUpload::new("notes.txt")]
            ),
            FormState::Valid
        );
        assert!(form.violations().is_empty());
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut form = filled_controller();
        assert_eq!(form.input_text("progress", "ongoing"), FormState::Valid);
        assert_eq!(form.form_input().title, "Narrator");
    }

    #[test]
    fn test_form_input_packages_fields() {
        let form = filled_controller();
        let input = form.form_input();

        assert_eq!(input.title, "Narrator");
        assert_eq!(input.description, "");
        assert_eq!(input.text, "Read this aloud");
        assert_eq!(input.quality, "standard");
        assert_eq!(input.audio_files, vec![AudioUpload::new("/tmp/voice.wav")]);
    }

    #[test]
    fn test_submit_suppressed_while_invalid() {
        let form = FormController::for_project_form();
        let mut service = MockProjectService::new();
        let mut notifier = MockNotifier::new();

        service.expect_create_project().times(0);
        notifier.expect_alert().times(0);

        assert_eq!(form.submit(&service, &notifier), SubmitOutcome::Suppressed);
    }

    #[test]
    fn test_submit_success_redirects_to_listing() {
        let form = filled_controller();
        let mut service = MockProjectService::new();
        let mut notifier = MockNotifier::new();

        service
            .expect_create_project()
            .withf(|input| input.title == "Narrator" && input.audio_files.len() == 1)
            .times(1)
            .returning(|_| Ok(sample_project("created")));
        notifier
            .expect_alert()
            .withf(|msg| msg == SUCCESS_MESSAGE)
            .times(1)
            .return_const(());

        match form.submit(&service, &notifier) {
            SubmitOutcome::Redirect { project, to } => {
                assert_eq!(project.id.as_str(), "created");
                assert_eq!(to, Route::Listing);
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_failure_stays_on_form() {
        let form = filled_controller();
        let mut service = MockProjectService::new();
        let mut notifier = MockNotifier::new();

        service
            .expect_create_project()
            .times(1)
            .returning(|_| Err(FetchError::Service("quota exceeded".to_string())));
        notifier
            .expect_alert()
            .withf(|msg| msg == "Error: quota exceeded")
            .times(1)
            .return_const(());

        assert_eq!(
            form.submit(&service, &notifier),
            SubmitOutcome::Failed {
                message: "quota exceeded".to_string()
            }
        );
        // Values survive for a manual retry
        assert_eq!(form.state(), FormState::Valid);
        assert_eq!(form.form_input().title, "Narrator");
    }
}
