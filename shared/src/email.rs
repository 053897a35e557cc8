use serde::{Deserialize, Serialize};

/// Payload of the "email a parent" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFormData {
    pub subject: String,
    pub message: String,
    /// Append the student's progress report
    #[serde(default = "default_true")]
    pub include_progress: bool,
    /// Append recommended activities
    #[serde(default = "default_true")]
    pub include_activities: bool,
}

fn default_true() -> bool {
    true
}

/// Per-field validation messages. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFieldErrors {
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl EmailFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.message.is_none()
    }
}

impl EmailFormData {
    /// Form values a fresh dialog starts from for the given student.
    pub fn defaults_for(student_name: &str) -> Self {
        Self {
            subject: format!("Update regarding {}'s progress", student_name),
            message: String::new(),
            include_progress: true,
            include_activities: true,
        }
    }

    /// Subject and message must be non-empty. Whitespace counts as content.
    pub fn validate(&self) -> Result<(), EmailFieldErrors> {
        let mut errors = EmailFieldErrors::default();

        if self.subject.is_empty() {
            errors.subject = Some("Subject is required".to_string());
        }
        if self.message.is_empty() {
            errors.message = Some("Message is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
