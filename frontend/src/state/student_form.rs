//! Form state of the add/edit student dialog

use std::rc::Rc;

use shared::{ActionError, Grade, Student, StudentChanges, StudentFormValidation};
use yew::Reducible;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFormState {
    pub name: String,
    pub email: String,
    pub grade: Option<Grade>,
    pub parent_email: String,
    pub avatar: String,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentFormAction {
    /// Dialog opened: prefill from the student being edited, or start blank
    Reset(Option<Student>),
    NameChanged(String),
    EmailChanged(String),
    GradeChanged(Option<Grade>),
    ParentEmailChanged(String),
    AvatarChanged(String),
    Invalid(String),
    SaveStarted,
    SaveFailed(ActionError),
    SaveSucceeded,
}

impl StudentFormState {
    pub fn from_student(student: Option<&Student>) -> Self {
        student
            .map(|student| Self::from_changes(StudentChanges::from_student(student)))
            .unwrap_or_default()
    }

    fn from_changes(changes: StudentChanges) -> Self {
        Self {
            name: changes.name.unwrap_or_default(),
            email: changes.email.unwrap_or_default(),
            grade: changes.grade,
            parent_email: changes.parent_email.unwrap_or_default(),
            avatar: changes.avatar.unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn validation(&self) -> StudentFormValidation {
        StudentFormValidation::validate(&self.name, &self.email, self.grade, &self.parent_email)
    }

    /// Payload for the save handler. Blank optional fields are left out.
    pub fn to_changes(&self) -> StudentChanges {
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        StudentChanges {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            grade: self.grade,
            avatar: optional(&self.avatar),
            parent_email: optional(&self.parent_email),
        }
    }
}

impl Reducible for StudentFormState {
    type Action = StudentFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            StudentFormAction::Reset(student) => next = Self::from_student(student.as_ref()),
            StudentFormAction::NameChanged(name) => next.name = name,
            StudentFormAction::EmailChanged(email) => next.email = email,
            StudentFormAction::GradeChanged(grade) => next.grade = grade,
            StudentFormAction::ParentEmailChanged(parent_email) => next.parent_email = parent_email,
            StudentFormAction::AvatarChanged(avatar) => next.avatar = avatar,
            StudentFormAction::Invalid(message) => next.error = Some(message),
            StudentFormAction::SaveStarted => {
                next.saving = true;
                next.error = None;
            }
            StudentFormAction::SaveFailed(e) => {
                next.saving = false;
                next.error = Some(format!("Failed to save student: {}", e.banner_text("unknown error")));
            }
            StudentFormAction::SaveSucceeded => next.saving = false,
        }
        Rc::new(next)
    }
}
