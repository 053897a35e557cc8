//! # Roster State
//!
//! UI state of the student management table: search text, grade filter, the
//! student the row actions picked, and which of the two dialogs is open.
//!
//! The asynchronous delegation to the host's handlers lives here as well, as
//! plain async functions, so the routing rules can be exercised without a DOM.

use std::rc::Rc;

use shared::{ActionError, EmailFormData, Grade, GradeFilter, Student, StudentChanges, StudentFilter};
use yew::Reducible;

use crate::services::callback::AsyncCallback;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    pub search_query: String,
    pub grade_filter: GradeFilter,
    /// Shared by both dialogs. `None` while the management dialog is open means create mode.
    pub selected: Option<Student>,
    pub management_open: bool,
    pub email_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterAction {
    SearchChanged(String),
    GradeToggled(Grade),
    OpenAdd,
    OpenEdit(Student),
    OpenEmail(Student),
    CloseManagement,
    CloseEmail,
    /// The add/edit handler resolved
    SaveCompleted,
    /// The parent email handler resolved; the email dialog closes, the selection stays
    EmailDispatched,
}

/// Which handler a save from the management dialog goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(String),
}

impl RosterState {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter::new(self.search_query.clone(), self.grade_filter)
    }

    pub fn visible<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        self.filter().apply(students)
    }

    pub fn save_target(&self) -> SaveTarget {
        match &self.selected {
            Some(student) => SaveTarget::Update(student.id.clone()),
            None => SaveTarget::Create,
        }
    }
}

impl Reducible for RosterState {
    type Action = RosterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RosterAction::SearchChanged(query) => next.search_query = query,
            RosterAction::GradeToggled(grade) => next.grade_filter.toggle(grade),
            RosterAction::OpenAdd => {
                next.selected = None;
                next.management_open = true;
            }
            RosterAction::OpenEdit(student) => {
                next.selected = Some(student);
                next.management_open = true;
            }
            RosterAction::OpenEmail(student) => {
                next.selected = Some(student);
                next.email_open = true;
            }
            RosterAction::CloseManagement | RosterAction::SaveCompleted => {
                next.management_open = false;
                next.selected = None;
            }
            RosterAction::CloseEmail => {
                next.email_open = false;
                next.selected = None;
            }
            RosterAction::EmailDispatched => next.email_open = false,
        }
        log::debug!("Roster state after update: {:?}", next);
        Rc::new(next)
    }
}

/// Routes a save to the add or edit handler. A failure is returned to the
/// management dialog untouched; the caller closes the dialog only on success.
pub async fn dispatch_save(
    target: SaveTarget,
    changes: StudentChanges,
    on_add: &AsyncCallback<StudentChanges>,
    on_edit: &AsyncCallback<(String, StudentChanges)>,
) -> Result<(), ActionError> {
    match target {
        SaveTarget::Update(student_id) => {
            log::info!("Saving changes to student {}", student_id);
            on_edit.call((student_id, changes)).await
        }
        SaveTarget::Create => {
            log::info!("Adding a new student");
            on_add.call(changes).await
        }
    }
}

/// Sends the parent email for the selected student. Without a selection this
/// does nothing and resolves. Failures go back to the email dialog.
pub async fn dispatch_parent_email(
    selected: Option<&Student>,
    data: EmailFormData,
    on_send: &AsyncCallback<(String, EmailFormData)>,
) -> Result<(), ActionError> {
    let Some(student) = selected else {
        log::debug!("Parent email requested with no student selected, ignoring");
        return Ok(());
    };
    on_send.call((student.id.clone(), data)).await
}

/// Save from the management dialog. Closes the dialog and clears the
/// selection only after the handler resolved.
pub async fn complete_save(
    target: SaveTarget,
    changes: StudentChanges,
    on_add: &AsyncCallback<StudentChanges>,
    on_edit: &AsyncCallback<(String, StudentChanges)>,
    dispatch: impl Fn(RosterAction),
) -> Result<(), ActionError> {
    dispatch_save(target, changes, on_add, on_edit).await?;
    dispatch(RosterAction::SaveCompleted);
    Ok(())
}

/// Send from the email dialog. Marks the email dialog closed once the
/// handler resolved; with no selection nothing is sent or marked.
pub async fn complete_parent_email(
    selected: Option<&Student>,
    data: EmailFormData,
    on_send: &AsyncCallback<(String, EmailFormData)>,
    dispatch: impl Fn(RosterAction),
) -> Result<(), ActionError> {
    dispatch_parent_email(selected, data, on_send).await?;
    if selected.is_some() {
        dispatch(RosterAction::EmailDispatched);
    }
    Ok(())
}

/// Deletes right away. Nothing on screen reports a failure; it only reaches the log.
pub async fn dispatch_delete(student_id: String, on_delete: &AsyncCallback<String>) {
    if let Err(e) = on_delete.call(student_id.clone()).await {
        log::error!("Unhandled failure deleting student {}: {}", student_id, e);
    }
}
