use shared::EmailFormData;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::callback::AsyncCallback;
use crate::state::email_composer::{begin_submit, send_email, ComposerAction, ComposerState};

#[derive(Properties, PartialEq, Clone)]
pub struct ParentEmailModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_send: AsyncCallback<EmailFormData>,
    pub student_name: AttrValue,
    pub parent_email: AttrValue,
}

/// Email dialog for a student's parent.
///
/// The dialog body, and with it the draft, only exists while `is_open` is
/// true. Closing throws the draft away.
#[function_component(ParentEmailModal)]
pub fn parent_email_modal(props: &ParentEmailModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    html! { <EmailDialog ..props.clone() /> }
}

#[function_component(EmailDialog)]
fn email_dialog(props: &ParentEmailModalProps) -> Html {
    let composer = {
        let student_name = props.student_name.clone();
        use_reducer(move || ComposerState::new(&student_name))
    };

    let on_subject_input = {
        let composer = composer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            composer.dispatch(ComposerAction::SubjectChanged(input.value()));
        })
    };

    let on_message_input = {
        let composer = composer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            composer.dispatch(ComposerAction::MessageChanged(input.value()));
        })
    };

    let on_progress_change = {
        let composer = composer.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            composer.dispatch(ComposerAction::IncludeProgressToggled(input.checked()));
        })
    };

    let on_activities_change = {
        let composer = composer.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            composer.dispatch(ComposerAction::IncludeActivitiesToggled(input.checked()));
        })
    };

    let on_submit = {
        let composer = composer.clone();
        let on_send = props.on_send.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let dispatcher = composer.dispatcher();
            let Some(data) = begin_submit(&composer, |action| dispatcher.dispatch(action)) else {
                return;
            };

            let on_send = on_send.clone();
            let on_close = on_close.clone();
            spawn_local(async move {
                send_email(data, &on_send, &on_close, |action| dispatcher.dispatch(action)).await;
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

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let field_error = |error: &Option<String>| match error {
        Some(message) => html! { <p class="field-error">{message}</p> },
        None => html! {},
    };

    html! {
        <div class="parent-email-modal-backdrop" onclick={on_backdrop_click}>
            <div class="parent-email-modal" onclick={on_modal_click}>
                <form class="parent-email-form" onsubmit={on_submit}>
                    <div class="parent-email-header">
                        <div>
                            <h2 class="parent-email-title">{"Email to Parent"}</h2>
                            <p class="parent-email-recipient">
                                {format!("Sending to: {}", props.parent_email)}
                            </p>
                        </div>
                        <button
                            type="button"
                            class="icon-button"
                            title="Close"
                            onclick={on_close_click.clone()}
                        >
                            {"✕"}
                        </button>
                    </div>

                    <div class="parent-email-body">
                        {if let Some(error) = composer.error.clone() {
                            html! {
                                <div class="parent-email-error">
                                    {"⚠️ "}{error}
                                </div>
                            }
                        } else {
                            html! {}
                        }}

                        <div class="form-group">
                            <label for="parent-email-subject">{"Subject"}</label>
                            <input
                                id="parent-email-subject"
                                type="text"
                                value={composer.draft.subject.clone()}
                                oninput={on_subject_input}
                            />
                            {field_error(&composer.field_errors.subject)}
                        </div>

                        <div class="form-group">
                            <label for="parent-email-message">{"Message"}</label>
                            <textarea
                                id="parent-email-message"
                                rows="6"
                                value={composer.draft.message.clone()}
                                oninput={on_message_input}
                            />
                            {field_error(&composer.field_errors.message)}
                        </div>

                        <div class="form-group checkboxes">
                            <label>
                                <input
                                    type="checkbox"
                                    checked={composer.draft.include_progress}
                                    onchange={on_progress_change}
                                />
                                <span>{"Include progress report"}</span>
                            </label>
                            <label>
                                <input
                                    type="checkbox"
                                    checked={composer.draft.include_activities}
                                    onchange={on_activities_change}
                                />
                                <span>{"Include recommended activities"}</span>
                            </label>
                        </div>
                    </div>

                    <div class="parent-email-footer">
                        <button type="button" class="btn btn-secondary" onclick={on_close_click}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={composer.sending}>
                            {if composer.sending {
                                html! { <><span class="spinner"></span>{"Sending..."}</> }
                            } else {
                                html! { <>{"📨 Send Email"}</> }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
