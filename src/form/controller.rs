//! Form controller: validity tracking and the create flow.

use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::backend::{AudioUpload, Project, ProjectFormInput, ProjectService};
use crate::notify::Notifier;
use crate::page::Route;

use super::schema::{ConstraintViolation, FieldSpec, FieldValue, project_form_fields};

pub const SUCCESS_MESSAGE: &str = "Success: The voice is being cloned!";

/// Whether the submit control is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Invalid,
    Valid,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Form was invalid; nothing was sent.
    Suppressed,
    /// The project was created and the page navigates away.
    Redirect { project: Project, to: Route },
    /// The service rejected the request; the user stays on the form.
    Failed { message: String },
}

/// Tracks the create-project form and drives its submission.
pub struct FormController {
    fields: Vec<FieldSpec>,
    values: HashMap<String, FieldValue>,
    state: FormState,
}

impl FormController {
    /// Create a controller and run the initial validity check.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let mut controller = Self {
            fields,
            values: HashMap::new(),
            state: FormState::Invalid,
        };
        controller.check_validity();
        controller
    }

    /// Controller for the standard project form.
    pub fn for_project_form() -> Self {
        Self::new(project_form_fields())
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit_enabled(&self) -> bool {
        self.state == FormState::Valid
    }

    /// Input event on a text, textarea or select control.
    pub fn input_text(&mut self, name: &str, value: impl Into<String>) -> FormState {
        self.input(name, FieldValue::Text(value.into()))
    }

    /// Input event on a file control; replaces the selected files.
    pub fn input_files(&mut self, name: &str, files: Vec<AudioUpload>) -> FormState {
        self.input(name, FieldValue::Files(files))
    }

    fn input(&mut self, name: &str, value: FieldValue) -> FormState {
        if !self.fields.iter().any(|f| f.name == name) {
            debug!(field = name, "ignoring input for unknown field");
            return self.state;
        }
        self.values.insert(name.to_string(), value);
        self.check_validity()
    }

    /// Every constraint currently failing, in field order.
    pub fn violations(&self) -> Vec<ConstraintViolation> {
        self.fields
            .iter()
            .filter_map(|field| field.check(self.values.get(&field.name)))
            .collect()
    }

    fn check_validity(&mut self) -> FormState {
        self.state = if self.violations().is_empty() {
            FormState::Valid
        } else {
            FormState::Invalid
        };
        self.state
    }

    fn text_value(&self, name: &str) -> String {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    /// Package the current field set and attached files.
    pub fn form_input(&self) -> ProjectFormInput {
        let audio_files = match self.values.get("audio_files") {
            Some(FieldValue::Files(files)) => files.clone(),
            _ => Vec::new(),
        };

        ProjectFormInput {
            title: self.text_value("title"),
            description: self.text_value("description"),
            text: self.text_value("text"),
            quality: self.text_value("quality"),
            audio_files,
        }
    }

    /// Submit the form.
    ///
    /// Suppressed while invalid. Field values are kept either way, so a
    /// failed submission can be retried by submitting again.
    pub fn submit<S, N>(&self, service: &S, notifier: &N) -> SubmitOutcome
    where
        S: ProjectService + ?Sized,
        N: Notifier + ?Sized,
    {
        if !self.submit_enabled() {
            debug!("submission suppressed: form is invalid");
            return SubmitOutcome::Suppressed;
        }

        let input = self.form_input();
        match service.create_project(&input) {
            Ok(project) => {
                info!(id = %project.id, "project created");
                notifier.alert(SUCCESS_MESSAGE);
                SubmitOutcome::Redirect {
                    project,
                    to: Route::Listing,
                }
            }
            Err(e) => {
                error!(error = %e, "failed to create project");
                let message = e.to_string();
                notifier.alert(&format!("Error: {message}"));
                SubmitOutcome::Failed { message }
            }
        }
    }
}
