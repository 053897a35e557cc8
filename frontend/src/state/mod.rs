pub mod email_composer;
pub mod roster;
pub mod student_form;
