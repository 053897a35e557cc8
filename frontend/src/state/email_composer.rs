//! State machine behind the parent email dialog.
//!
//! Idle -> (valid submit) -> Sending -> Idle. A successful send resets the
//! draft to its defaults; a failed send keeps the draft and shows a banner so
//! the user can retry.

use std::rc::Rc;

use shared::{ActionError, EmailFieldErrors, EmailFormData};
use yew::{Callback, Reducible};

use crate::services::callback::AsyncCallback;
use crate::services::logging::Logger;

/// Banner text when the send handler fails without a message
pub const SEND_FAILURE_FALLBACK: &str = "Failed to send email";

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState {
    pub defaults: EmailFormData,
    pub draft: EmailFormData,
    pub field_errors: EmailFieldErrors,
    pub sending: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerAction {
    SubjectChanged(String),
    MessageChanged(String),
    IncludeProgressToggled(bool),
    IncludeActivitiesToggled(bool),
    ValidationFailed(EmailFieldErrors),
    SendStarted,
    SendFinished(Result<(), ActionError>),
}

impl ComposerState {
    pub fn new(student_name: &str) -> Self {
        let defaults = EmailFormData::defaults_for(student_name);
        Self {
            draft: defaults.clone(),
            defaults,
            field_errors: EmailFieldErrors::default(),
            sending: false,
            error: None,
        }
    }

    /// Validated payload ready to send, or the per-field errors.
    pub fn prepare(&self) -> Result<EmailFormData, EmailFieldErrors> {
        self.draft.validate().map(|()| self.draft.clone())
    }
}

impl Reducible for ComposerState {
    type Action = ComposerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ComposerAction::SubjectChanged(subject) => next.draft.subject = subject,
            ComposerAction::MessageChanged(message) => next.draft.message = message,
            ComposerAction::IncludeProgressToggled(on) => next.draft.include_progress = on,
            ComposerAction::IncludeActivitiesToggled(on) => next.draft.include_activities = on,
            ComposerAction::ValidationFailed(errors) => next.field_errors = errors,
            ComposerAction::SendStarted => {
                if self.sending {
                    log::warn!("Send already in flight, ignoring submit");
                    return self;
                }
                next.sending = true;
                next.error = None;
                next.field_errors = EmailFieldErrors::default();
            }
            ComposerAction::SendFinished(Ok(())) => {
                next.draft = next.defaults.clone();
                next.field_errors = EmailFieldErrors::default();
                next.error = None;
                next.sending = false;
            }
            ComposerAction::SendFinished(Err(e)) => {
                log::warn!("Parent email failed: {}", e);
                next.error = Some(e.banner_text(SEND_FAILURE_FALLBACK));
                next.sending = false;
            }
        }
        Rc::new(next)
    }
}

/// Synchronous half of a submit. Validates the draft and either records the
/// field errors or moves the dialog into Sending. Returns the payload to send.
pub fn begin_submit(state: &ComposerState, dispatch: impl Fn(ComposerAction)) -> Option<EmailFormData> {
    if state.sending {
        return None;
    }

    match state.prepare() {
        Ok(data) => {
            dispatch(ComposerAction::SendStarted);
            Some(data)
        }
        Err(errors) => {
            dispatch(ComposerAction::ValidationFailed(errors));
            None
        }
    }
}

/// Awaits the send handler and records the outcome. The dialog is closed
/// only when the handler resolved; on failure it stays open with the banner.
pub async fn send_email(
    data: EmailFormData,
    on_send: &AsyncCallback<EmailFormData>,
    on_close: &Callback<()>,
    dispatch: impl Fn(ComposerAction),
) {
    let result = on_send.call(data).await;
    let sent = result.is_ok();
    dispatch(ComposerAction::SendFinished(result));
    if sent {
        Logger::info_with_component("ParentEmailModal", "Parent email sent");
        on_close.emit(());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn apply(state: Rc<ComposerState>, actions: Vec<ComposerAction>) -> Rc<ComposerState> {
        actions.into_iter().fold(state, |state, action| state.reduce(action))
    }

    /// Holds the reducer state the way `use_reducer` does
    struct Dialog {
        state: RefCell<Rc<ComposerState>>,
    }

    impl Dialog {
        fn new(actions: Vec<ComposerAction>) -> Self {
            Self {
                state: RefCell::new(apply(Rc::new(ComposerState::new("Maya")), actions)),
            }
        }

        fn dispatch(&self, action: ComposerAction) {
            let current = self.state.borrow().clone();
            *self.state.borrow_mut() = current.reduce(action);
        }

        fn current(&self) -> Rc<ComposerState> {
            self.state.borrow().clone()
        }

        async fn submit(&self, on_send: &AsyncCallback<EmailFormData>, on_close: &Callback<()>) {
            let current = self.current();
            if let Some(data) = begin_submit(&current, |action| self.dispatch(action)) {
                assert!(self.current().sending);
                send_email(data, on_send, on_close, |action| self.dispatch(action)).await;
            }
        }
    }

    fn counting_sender(result: Result<(), ActionError>) -> (Rc<Cell<u32>>, AsyncCallback<EmailFormData>) {
        let count = Rc::new(Cell::new(0));
        let handler = {
            let count = count.clone();
            AsyncCallback::new(move |_data: EmailFormData| {
                let count = count.clone();
                let result = result.clone();
                async move {
                    count.set(count.get() + 1);
                    result
                }
            })
        };
        (count, handler)
    }

    fn counting_close() -> (Rc<Cell<u32>>, Callback<()>) {
        let count = Rc::new(Cell::new(0));
        let on_close = {
            let count = count.clone();
            Callback::from(move |_: ()| count.set(count.get() + 1))
        };
        (count, on_close)
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_handler() {
        let (sends, on_send) = counting_sender(Ok(()));
        let (closes, on_close) = counting_close();
        let dialog = Dialog::new(vec![ComposerAction::SubjectChanged(String::new())]);

        dialog.submit(&on_send, &on_close).await;

        let state = dialog.current();
        assert_eq!(sends.get(), 0);
        assert_eq!(closes.get(), 0);
        assert_eq!(state.field_errors.subject.as_deref(), Some("Subject is required"));
        assert_eq!(state.field_errors.message.as_deref(), Some("Message is required"));
        assert_eq!(state.error, None);
        assert!(!state.sending);
    }

    #[tokio::test]
    async fn test_successful_send_resets_draft_and_closes() {
        let (sends, on_send) = counting_sender(Ok(()));
        let (closes, on_close) = counting_close();
        let dialog = Dialog::new(vec![
            ComposerAction::SubjectChanged("Field trip".to_string()),
            ComposerAction::MessageChanged("Maya did great".to_string()),
            ComposerAction::IncludeActivitiesToggled(false),
        ]);

        dialog.submit(&on_send, &on_close).await;

        let state = dialog.current();
        assert_eq!(sends.get(), 1);
        assert_eq!(closes.get(), 1);
        assert_eq!(state.draft, EmailFormData::defaults_for("Maya"));
        assert_eq!(state.error, None);
        assert!(!state.sending);
    }

    #[tokio::test]
    async fn test_failed_send_keeps_dialog_open() {
        let (_sends, on_send) = counting_sender(Err(ActionError::message("quota exceeded")));
        let (closes, on_close) = counting_close();
        let dialog = Dialog::new(vec![ComposerAction::MessageChanged("Please call me".to_string())]);

        dialog.submit(&on_send, &on_close).await;

        let state = dialog.current();
        assert_eq!(closes.get(), 0);
        assert_eq!(state.error.as_deref(), Some("quota exceeded"));
        assert_eq!(state.draft.message, "Please call me");
        assert!(!state.sending);
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let (_sends, on_send) = counting_sender(Err(ActionError::Unknown));
        let (closes, on_close) = counting_close();
        let dialog = Dialog::new(vec![ComposerAction::MessageChanged("Hello".to_string())]);

        dialog.submit(&on_send, &on_close).await;

        assert_eq!(closes.get(), 0);
        assert_eq!(dialog.current().error.as_deref(), Some(SEND_FAILURE_FALLBACK));
    }

    #[test]
    fn test_begin_submit_while_sending_does_nothing() {
        let dialog = Dialog::new(vec![
            ComposerAction::MessageChanged("Hello".to_string()),
            ComposerAction::SendStarted,
        ]);
        let before = dialog.current();

        assert_eq!(begin_submit(&before, |action| dialog.dispatch(action)), None);
        assert!(Rc::ptr_eq(&before, &dialog.current()));
    }

    #[test]
    fn test_retry_clears_previous_error() {
        let state = apply(
            Rc::new(ComposerState::new("Maya")),
            vec![
                ComposerAction::MessageChanged("Hello".to_string()),
                ComposerAction::SendStarted,
                ComposerAction::SendFinished(Err(ActionError::message("offline"))),
                ComposerAction::SendStarted,
            ],
        );
        assert!(state.sending);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_second_send_while_sending_is_ignored() {
        let sending = apply(
            Rc::new(ComposerState::new("Maya")),
            vec![ComposerAction::MessageChanged("Hello".to_string()), ComposerAction::SendStarted],
        );
        let again = sending.clone().reduce(ComposerAction::SendStarted);
        assert!(Rc::ptr_eq(&sending, &again));
    }
}
