pub mod parent_email_modal;
pub mod student_management_modal;
pub mod student_management_table;

pub use parent_email_modal::ParentEmailModal;
pub use student_management_modal::StudentManagementModal;
pub use student_management_table::StudentManagementTable;
