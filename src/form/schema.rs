//! Field constraints for the project creation form.
//!
//! Only the page's own constraints apply: required controls and the
//! options of the quality select. Lengths and file types are left to the
//! service, which accepts any text and any uploaded file.

use std::fmt;

use crate::backend::AudioUpload;

/// Quality presets the cloning job accepts.
pub const QUALITY_PRESETS: [&str; 4] = ["ultra_fast", "fast", "standard", "high_quality"];

/// Input control kind and its kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select { options: Vec<String> },
    Files,
}

/// One form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn text(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
            required,
        }
    }

    pub fn select(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            required: true,
        }
    }

    pub fn files(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Files,
            required: true,
        }
    }

    /// Check a value against this control's constraints.
    pub fn check(&self, value: Option<&FieldValue>) -> Option<ConstraintViolation> {
        let missing = || ConstraintViolation::ValueMissing(self.name.clone());

        match (&self.kind, value) {
            (_, None) => self.required.then(missing),
            (FieldKind::Text, Some(FieldValue::Text(text))) => {
                (text.is_empty() && self.required).then(missing)
            }
            (FieldKind::Select { options }, Some(FieldValue::Text(choice))) => {
                if choice.is_empty() {
                    return self.required.then(missing);
                }
                if options.iter().any(|o| o == choice) {
                    None
                } else {
                    Some(ConstraintViolation::NotAnOption {
                        field: self.name.clone(),
                        value: choice.clone(),
                    })
                }
            }
            (FieldKind::Files, Some(FieldValue::Files(files))) => {
                (files.is_empty() && self.required).then(missing)
            }
            _ => Some(ConstraintViolation::TypeMismatch(self.name.clone())),
        }
    }
}

/// Current value of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Files(Vec<AudioUpload>),
}

/// Why a control fails its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    ValueMissing(String),
    NotAnOption { field: String, value: String },
    /// Text given to a file control or files given to a text control.
    TypeMismatch(String),
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::ValueMissing(field) => write!(f, "{field} is required"),
            ConstraintViolation::NotAnOption { field, value } => {
                write!(f, "{value:?} is not a valid {field}")
            }
            ConstraintViolation::TypeMismatch(field) => {
                write!(f, "{field} has the wrong kind of value")
            }
        }
    }
}

/// The project creation form as the page defines it.
pub fn project_form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("title", true),
        FieldSpec::text("description", false),
        FieldSpec::text("text", true),
        FieldSpec::select("quality", &QUALITY_PRESETS),
        FieldSpec::files("audio_files"),
    ]
}
