use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Avatar service used when a student has no uploaded picture.
const GENERATED_AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Grade a student is enrolled in. The roster only knows these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
    #[serde(rename = "6th")]
    Sixth,
}

impl Grade {
    /// All grades in the order the filter chips are shown.
    pub const ALL: [Grade; 6] = [
        Grade::First,
        Grade::Second,
        Grade::Third,
        Grade::Fourth,
        Grade::Fifth,
        Grade::Sixth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Grade::First => "1st",
            Grade::Second => "2nd",
            Grade::Third => "3rd",
            Grade::Fourth => "4th",
            Grade::Fifth => "5th",
            Grade::Sixth => "6th",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade: {0}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .iter()
            .copied()
            .find(|grade| grade.label() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// Whether a student's parent has joined the parent portal.
///
/// The backend sends a free-form string. Anything other than `accepted` or
/// `pending` is kept verbatim in `Other`, so no value is ever rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParentInviteStatus {
    Accepted,
    Pending,
    Other(String),
}

/// Visual indicator shown next to the invitation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    /// Check mark
    Positive,
    /// Clock
    Neutral,
    /// Alert
    Warning,
}

impl ParentInviteStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ParentInviteStatus::Accepted => "accepted",
            ParentInviteStatus::Pending => "pending",
            ParentInviteStatus::Other(raw) => raw,
        }
    }

    /// Display text: the first underscore becomes a space and each word is
    /// capitalized (`not_sent` -> `Not Sent`).
    pub fn label(&self) -> String {
        let spaced = self.as_str().replacen('_', " ", 1);
        let mut label = String::with_capacity(spaced.len());
        let mut word_start = true;
        for c in spaced.chars() {
            if word_start {
                label.extend(c.to_uppercase());
            } else {
                label.push(c);
            }
            word_start = c.is_whitespace();
        }
        label
    }

    pub fn indicator(&self) -> StatusIndicator {
        match self {
            ParentInviteStatus::Accepted => StatusIndicator::Positive,
            ParentInviteStatus::Pending => StatusIndicator::Neutral,
            ParentInviteStatus::Other(_) => StatusIndicator::Warning,
        }
    }
}

impl From<String> for ParentInviteStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "accepted" => ParentInviteStatus::Accepted,
            "pending" => ParentInviteStatus::Pending,
            _ => ParentInviteStatus::Other(raw),
        }
    }
}

impl From<ParentInviteStatus> for String {
    fn from(status: ParentInviteStatus) -> Self {
        match status {
            ParentInviteStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for ParentInviteStatus {
    fn default() -> Self {
        ParentInviteStatus::Other(String::new())
    }
}

/// A student on a class roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique within a roster
    pub id: String,
    pub name: String,
    pub email: String,
    pub grade: Grade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(default)]
    pub parent_invite_status: ParentInviteStatus,
    /// Opaque code the parent uses to link their account
    pub access_code: String,
}

impl Student {
    /// Uploaded avatar, or a generated one seeded by the student id.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(avatar) if !avatar.is_empty() => avatar.clone(),
            _ => format!("{}{}", GENERATED_AVATAR_BASE, self.id),
        }
    }
}

/// Body of `GET /api/students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

/// Partial student record sent to the add and edit handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
}

impl StudentChanges {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: Some(student.name.clone()),
            email: Some(student.email.clone()),
            grade: Some(student.grade),
            avatar: student.avatar.clone(),
            parent_email: student.parent_email.clone(),
        }
    }
}

/// Validation result for the add/edit student form
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFormValidation {
    pub is_valid: bool,
    pub errors: Vec<StudentValidationError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StudentValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Email is required")]
    EmptyEmail,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Grade is required")]
    MissingGrade,
    #[error("Parent email address is not valid")]
    InvalidParentEmail,
}

impl StudentFormValidation {
    pub fn validate(name: &str, email: &str, grade: Option<Grade>, parent_email: &str) -> Self {
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(StudentValidationError::EmptyName);
        }

        let email = email.trim();
        if email.is_empty() {
            errors.push(StudentValidationError::EmptyEmail);
        } else if !email.contains('@') {
            errors.push(StudentValidationError::InvalidEmail);
        }

        if grade.is_none() {
            errors.push(StudentValidationError::MissingGrade);
        }

        let parent_email = parent_email.trim();
        if !parent_email.is_empty() && !parent_email.contains('@') {
            errors.push(StudentValidationError::InvalidParentEmail);
        }

        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// First error message, used for the form's banner.
    pub fn first_message(&self) -> Option<String> {
        self.errors.first().map(|error| error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: "stu-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@school.test".to_string(),
            grade: Grade::Third,
            avatar: None,
            parent_email: Some("parent@home.test".to_string()),
            parent_invite_status: ParentInviteStatus::Pending,
            access_code: "ABC-123".to_string(),
        }
    }

    #[test]
    fn test_grade_labels_parse_back() {
        for grade in Grade::ALL {
            assert_eq!(grade.label().parse::<Grade>().unwrap(), grade);
        }
        assert!("7th".parse::<Grade>().is_err());
    }

    #[test]
    fn test_status_indicator_is_total() {
        assert_eq!(ParentInviteStatus::from("accepted".to_string()).indicator(), StatusIndicator::Positive);
        assert_eq!(ParentInviteStatus::from("pending".to_string()).indicator(), StatusIndicator::Neutral);
        assert_eq!(ParentInviteStatus::from("not_invited".to_string()).indicator(), StatusIndicator::Warning);
        assert_eq!(ParentInviteStatus::from(String::new()).indicator(), StatusIndicator::Warning);
        // Case matters, the backend sends lowercase
        assert_eq!(ParentInviteStatus::from("Accepted".to_string()).indicator(), StatusIndicator::Warning);
    }

    #[test]
    fn test_status_label_capitalizes_words() {
        assert_eq!(ParentInviteStatus::from("not_yet_sent".to_string()).label(), "Not Yet_sent");
        assert_eq!(ParentInviteStatus::Accepted.label(), "Accepted");
    }

    #[test]
    fn test_student_json_shape() {
        let json = r#"{
            "id": "stu-9",
            "name": "Grace Hopper",
            "email": "grace@school.test",
            "grade": "5th",
            "parentInviteStatus": "expired",
            "accessCode": "XYZ-789"
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.grade, Grade::Fifth);
        assert_eq!(student.parent_invite_status, ParentInviteStatus::Other("expired".to_string()));
        assert_eq!(student.parent_email, None);

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["parentInviteStatus"], "expired");
        assert!(value.get("avatar").is_none());
    }

    #[test]
    fn test_avatar_url_fallback() {
        let mut student = sample_student();
        assert_eq!(
            student.avatar_url(),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=stu-1"
        );

        student.avatar = Some("https://cdn.test/ada.png".to_string());
        assert_eq!(student.avatar_url(), "https://cdn.test/ada.png");
    }

    #[test]
    fn test_student_changes_skip_absent_fields() {
        let changes = StudentChanges {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&changes).unwrap();
        assert_eq!(json, r#"{"name":"New Name"}"#);

        let prefill = StudentChanges::from_student(&sample_student());
        assert_eq!(prefill.grade, Some(Grade::Third));
        assert_eq!(prefill.parent_email.as_deref(), Some("parent@home.test"));
    }

    #[test]
    fn test_student_form_validation() {
        let valid = StudentFormValidation::validate("Ada", "ada@school.test", Some(Grade::First), "");
        assert!(valid.is_valid);
        assert!(valid.first_message().is_none());

        let invalid = StudentFormValidation::validate("  ", "ada", None, "parent");
        assert!(!invalid.is_valid);
        assert_eq!(
            invalid.errors,
            vec![
                StudentValidationError::EmptyName,
                StudentValidationError::InvalidEmail,
                StudentValidationError::MissingGrade,
                StudentValidationError::InvalidParentEmail,
            ]
        );
        assert_eq!(invalid.first_message().as_deref(), Some("Name is required"));
    }
}
