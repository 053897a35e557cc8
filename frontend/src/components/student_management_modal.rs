use shared::{Grade, Student, StudentChanges};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::callback::AsyncCallback;
use crate::services::logging::Logger;
use crate::state::student_form::{StudentFormAction, StudentFormState};

#[derive(Properties, PartialEq, Clone)]
pub struct StudentManagementModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_save: AsyncCallback<StudentChanges>,
    /// `None` opens the dialog in create mode
    pub student: Option<Student>,
}

#[function_component(StudentManagementModal)]
pub fn student_management_modal(props: &StudentManagementModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    html! { <StudentForm ..props.clone() /> }
}

#[function_component(StudentForm)]
fn student_form(props: &StudentManagementModalProps) -> Html {
    let form = {
        let student = props.student.clone();
        use_reducer(move || StudentFormState::from_student(student.as_ref()))
    };

    // Re-prefill if the parent swaps the student while the dialog is up
    use_effect_with(props.student.clone(), {
        let form = form.clone();
        move |student: &Option<Student>| {
            form.dispatch(StudentFormAction::Reset(student.clone()));
            || ()
        }
    });

    let text_input = |make: fn(String) -> StudentFormAction| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(make(input.value()));
        })
    };
    let on_name_input = text_input(StudentFormAction::NameChanged);
    let on_email_input = text_input(StudentFormAction::EmailChanged);
    let on_parent_email_input = text_input(StudentFormAction::ParentEmailChanged);
    let on_avatar_input = text_input(StudentFormAction::AvatarChanged);

    let on_grade_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target().and_then(|target| target.dyn_into::<HtmlSelectElement>().ok()) {
                form.dispatch(StudentFormAction::GradeChanged(select.value().parse::<Grade>().ok()));
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let on_save = props.on_save.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if form.saving {
                return;
            }

            let validation = form.validation();
            if let Some(message) = validation.first_message() {
                form.dispatch(StudentFormAction::Invalid(message));
                return;
            }

            let changes = form.to_changes();
            form.dispatch(StudentFormAction::SaveStarted);

            let form = form.clone();
            let on_save = on_save.clone();
            spawn_local(async move {
                match on_save.call(changes).await {
                    Ok(()) => form.dispatch(StudentFormAction::SaveSucceeded),
                    Err(e) => {
                        Logger::warn_with_component("StudentManagementModal", &format!("Saving student failed: {}", e));
                        form.dispatch(StudentFormAction::SaveFailed(e));
                    }
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let (title, submit_label) = if props.student.is_some() {
        ("Edit Student", "Save Changes")
    } else {
        ("Add Student", "Add Student")
    };
    let selected_grade = form.grade.map(|grade| grade.label()).unwrap_or_default();

    html! {
        <div class="student-modal-backdrop" onclick={on_backdrop_click}>
            <div class="student-modal" onclick={on_modal_click}>
                <div class="student-modal-content">
                    <h3 class="student-modal-title">{title}</h3>

                    {if let Some(error) = form.error.clone() {
                        html! {
                            <div class="student-modal-error">
                                {error}
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    <form class="student-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="student-name">{"Name"}</label>
                            <input
                                id="student-name"
                                type="text"
                                value={form.name.clone()}
                                oninput={on_name_input}
                                disabled={form.saving}
                                autofocus=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="student-email">{"Email"}</label>
                            <input
                                id="student-email"
                                type="email"
                                value={form.email.clone()}
                                oninput={on_email_input}
                                disabled={form.saving}
                            />
                        </div>

                        <div class="form-group">
                            <label for="student-grade">{"Grade"}</label>
                            <select id="student-grade" onchange={on_grade_change} disabled={form.saving}>
                                <option value="" selected={form.grade.is_none()}>{"Select a grade"}</option>
                                {for Grade::ALL.iter().map(|grade| html! {
                                    <option
                                        value={grade.label()}
                                        selected={selected_grade == grade.label()}
                                    >
                                        {grade.label()}
                                    </option>
                                })}
                            </select>
                        </div>

                        <div class="form-group">
                            <label for="student-parent-email">{"Parent Email (optional)"}</label>
                            <input
                                id="student-parent-email"
                                type="email"
                                value={form.parent_email.clone()}
                                oninput={on_parent_email_input}
                                disabled={form.saving}
                            />
                        </div>

                        <div class="form-group">
                            <label for="student-avatar">{"Avatar URL (optional)"}</label>
                            <input
                                id="student-avatar"
                                type="url"
                                value={form.avatar.clone()}
                                oninput={on_avatar_input}
                                disabled={form.saving}
                            />
                        </div>

                        <div class="student-modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={form.saving}>
                                {if form.saving { "Saving..." } else { submit_label }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-secondary"
                                onclick={on_cancel}
                                disabled={form.saving}
                            >
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
