//! Domain types shared by the classroom roster frontend.
//!
//! Everything in here is target independent: the student record and its
//! partial-update payload, the parent email form, the roster filter and the
//! error type that asynchronous handlers reject with.

pub mod email;
pub mod error;
pub mod roster;
pub mod student;

pub use email::{EmailFieldErrors, EmailFormData};
pub use error::ActionError;
pub use roster::{GradeFilter, StudentFilter};
pub use student::{
    Grade, ParentInviteStatus, StatusIndicator, Student, StudentChanges, StudentFormValidation,
    StudentListResponse, StudentValidationError,
};
