use shared::{EmailFormData, Grade, StatusIndicator, Student, StudentChanges};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::parent_email_modal::ParentEmailModal;
use crate::components::student_management_modal::StudentManagementModal;
use crate::services::callback::AsyncCallback;
use crate::state::roster::{
    complete_parent_email, complete_save, dispatch_delete, RosterAction, RosterState,
};

#[derive(Properties, PartialEq)]
pub struct StudentManagementTableProps {
    pub students: Vec<Student>,
    pub on_add_student: AsyncCallback<StudentChanges>,
    pub on_edit_student: AsyncCallback<(String, StudentChanges)>,
    pub on_delete_student: AsyncCallback<String>,
    pub on_send_parent_email: AsyncCallback<(String, EmailFormData)>,
    #[prop_or_default]
    pub is_loading: bool,
}

fn status_icon(indicator: StatusIndicator) -> Html {
    match indicator {
        StatusIndicator::Positive => html! { <span class="status-icon positive">{"✅"}</span> },
        StatusIndicator::Neutral => html! { <span class="status-icon neutral">{"⏳"}</span> },
        StatusIndicator::Warning => html! { <span class="status-icon warning">{"⚠️"}</span> },
    }
}

#[function_component(StudentManagementTable)]
pub fn student_management_table(props: &StudentManagementTableProps) -> Html {
    let roster = use_reducer(RosterState::default);

    let on_search_input = {
        let roster = roster.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            roster.dispatch(RosterAction::SearchChanged(input.value()));
        })
    };

    let on_add_click = {
        let roster = roster.clone();
        Callback::from(move |_: MouseEvent| roster.dispatch(RosterAction::OpenAdd))
    };

    // Save goes to edit when a student is selected, otherwise to add.
    // The dialog only closes once the handler resolves.
    let on_save = {
        let target = roster.save_target();
        let on_add = props.on_add_student.clone();
        let on_edit = props.on_edit_student.clone();
        let dispatcher = roster.dispatcher();

        AsyncCallback::new(move |changes: StudentChanges| {
            let target = target.clone();
            let on_add = on_add.clone();
            let on_edit = on_edit.clone();
            let dispatcher = dispatcher.clone();
            async move {
                complete_save(target, changes, &on_add, &on_edit, |action| {
                    dispatcher.dispatch(action)
                })
                .await
            }
        })
    };

    let on_management_close = {
        let roster = roster.clone();
        Callback::from(move |_: ()| roster.dispatch(RosterAction::CloseManagement))
    };

    let on_email_send = {
        let selected = roster.selected.clone();
        let on_send_parent_email = props.on_send_parent_email.clone();
        let dispatcher = roster.dispatcher();

        AsyncCallback::new(move |data: EmailFormData| {
            let selected = selected.clone();
            let on_send_parent_email = on_send_parent_email.clone();
            let dispatcher = dispatcher.clone();
            async move {
                complete_parent_email(selected.as_ref(), data, &on_send_parent_email, |action| {
                    dispatcher.dispatch(action)
                })
                .await
            }
        })
    };

    let on_email_close = {
        let roster = roster.clone();
        Callback::from(move |_: ()| roster.dispatch(RosterAction::CloseEmail))
    };

    let grade_chips = Grade::ALL.iter().map(|grade| {
        let grade = *grade;
        let onclick = {
            let roster = roster.clone();
            Callback::from(move |_: MouseEvent| roster.dispatch(RosterAction::GradeToggled(grade)))
        };
        let class = if roster.grade_filter.is_active(grade) {
            "grade-chip active"
        } else {
            "grade-chip"
        };
        html! {
            <button type="button" key={grade.label()} {class} {onclick}>{grade.label()}</button>
        }
    });

    let visible = roster.visible(&props.students);

    let rows = if props.is_loading {
        html! {
            <tr><td colspan="5" class="table-message">{"Loading students..."}</td></tr>
        }
    } else if visible.is_empty() {
        html! {
            <tr><td colspan="5" class="table-message">{"No students found"}</td></tr>
        }
    } else {
        visible
            .into_iter()
            .map(|student| {
                let on_email_click = {
                    let roster = roster.clone();
                    let student = student.clone();
                    Callback::from(move |_: MouseEvent| {
                        roster.dispatch(RosterAction::OpenEmail(student.clone()))
                    })
                };
                let on_edit_click = {
                    let roster = roster.clone();
                    let student = student.clone();
                    Callback::from(move |_: MouseEvent| {
                        roster.dispatch(RosterAction::OpenEdit(student.clone()))
                    })
                };
                let on_delete_click = {
                    let on_delete = props.on_delete_student.clone();
                    let student_id = student.id.clone();
                    Callback::from(move |_: MouseEvent| {
                        let on_delete = on_delete.clone();
                        let student_id = student_id.clone();
                        spawn_local(async move {
                            dispatch_delete(student_id, &on_delete).await;
                        });
                    })
                };

                html! {
                    <tr key={student.id.clone()} class="student-row">
                        <td>
                            <div class="student-cell">
                                <img class="student-avatar" src={student.avatar_url()} alt={student.name.clone()} />
                                <div>
                                    <div class="student-name">{&student.name}</div>
                                    <div class="student-email">{&student.email}</div>
                                </div>
                            </div>
                        </td>
                        <td><span class="grade-badge">{student.grade.label()}</span></td>
                        <td>
                            <div class="parent-status">
                                {status_icon(student.parent_invite_status.indicator())}
                                <span class="parent-status-label">{student.parent_invite_status.label()}</span>
                            </div>
                        </td>
                        <td class="access-code">{&student.access_code}</td>
                        <td class="row-actions">
                            <button type="button" class="icon-button" title="Email parent" onclick={on_email_click}>{"✉️"}</button>
                            <button type="button" class="icon-button" title="Edit student" onclick={on_edit_click}>{"✏️"}</button>
                            <button type="button" class="icon-button" title="Delete student" onclick={on_delete_click}>{"🗑️"}</button>
                        </td>
                    </tr>
                }
            })
            .collect::<Html>()
    };

    html! {
        <div class="student-management">
            <div class="student-toolbar">
                <div class="student-search">
                    <input
                        type="text"
                        placeholder="Search students..."
                        value={roster.search_query.clone()}
                        oninput={on_search_input}
                    />
                </div>
                <div class="grade-filter">
                    {for grade_chips}
                </div>
                <button type="button" class="btn btn-primary" onclick={on_add_click}>
                    {"➕ Add Student"}
                </button>
            </div>

            <div class="table-container">
                <table class="students-table">
                    <thead>
                        <tr>
                            <th>{"Student"}</th>
                            <th>{"Grade"}</th>
                            <th>{"Parent Status"}</th>
                            <th>{"Access Code"}</th>
                            <th class="actions-header">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows}
                    </tbody>
                </table>
            </div>

            <StudentManagementModal
                is_open={roster.management_open}
                on_close={on_management_close}
                on_save={on_save}
                student={roster.selected.clone()}
            />

            {if let Some(student) = &roster.selected {
                html! {
                    <ParentEmailModal
                        is_open={roster.email_open}
                        on_close={on_email_close}
                        on_send={on_email_send}
                        student_name={student.name.clone()}
                        parent_email={student.parent_email.clone().unwrap_or_default()}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use shared::ParentInviteStatus;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn props(students: Vec<Student>, is_loading: bool) -> StudentManagementTableProps {
        StudentManagementTableProps {
            students,
            on_add_student: AsyncCallback::new(|_: StudentChanges| async { Ok(()) }),
            on_edit_student: AsyncCallback::new(|_: (String, StudentChanges)| async { Ok(()) }),
            on_delete_student: AsyncCallback::new(|_: String| async { Ok(()) }),
            on_send_parent_email: AsyncCallback::new(|_: (String, EmailFormData)| async { Ok(()) }),
            is_loading,
        }
    }

    async fn render(props: StudentManagementTableProps) -> web_sys::Element {
        let document = gloo::utils::document();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        yew::Renderer::<StudentManagementTable>::with_root_and_props(root.clone(), props).render();
        TimeoutFuture::new(20).await;
        root
    }

    #[wasm_bindgen_test]
    async fn test_loading_row() {
        let root = render(props(vec![], true)).await;
        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Loading students..."));
    }

    #[wasm_bindgen_test]
    async fn test_rows_and_empty_state() {
        let root = render(props(vec![], false)).await;
        assert!(root.text_content().unwrap_or_default().contains("No students found"));

        let student = Student {
            id: "s-1".to_string(),
            name: "Maya Patel".to_string(),
            email: "maya@school.test".to_string(),
            grade: Grade::Second,
            avatar: None,
            parent_email: None,
            parent_invite_status: ParentInviteStatus::Other("not_invited".to_string()),
            access_code: "M4Y-A01".to_string(),
        };
        let root = render(props(vec![student], false)).await;
        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Maya Patel"));
        assert!(text.contains("Not Invited"));
        assert!(root.query_selector(".status-icon.warning").unwrap().is_some());
    }
}
