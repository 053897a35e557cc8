use std::rc::Rc;

use shared::{ActionError, EmailFormData, Student, StudentChanges};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::callback::AsyncCallback;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct StudentsState {
    pub students: Vec<Student>,
    pub loading: bool,
}

pub struct UseStudentsResult {
    pub state: StudentsState,
    pub actions: UseStudentsActions,
}

/// Handlers the roster table is wired to. Each one reloads the list after it succeeds.
#[derive(Clone, PartialEq)]
pub struct UseStudentsActions {
    pub refresh_students: Callback<()>,
    pub add_student: AsyncCallback<StudentChanges>,
    pub edit_student: AsyncCallback<(String, StudentChanges)>,
    pub delete_student: AsyncCallback<String>,
    pub send_parent_email: AsyncCallback<(String, EmailFormData)>,
}

async fn reload(api_client: &ApiClient, students: &UseStateHandle<Vec<Student>>, loading: &UseStateHandle<bool>) {
    loading.set(true);

    match api_client.list_students().await {
        Ok(list) => {
            log::debug!("Loaded {} students", list.len());
            students.set(list);
        }
        Err(e) => {
            Logger::error_with_component("use_students", &format!("Failed to fetch students: {}", e));
        }
    }

    loading.set(false);
}

#[hook]
pub fn use_students(api_client: &ApiClient) -> UseStudentsResult {
    let students = use_state(Vec::<Student>::new);
    let loading = use_state(|| true);

    let refresh_students = {
        let api_client = api_client.clone();
        let students = students.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let students = students.clone();
            let loading = loading.clone();

            spawn_local(async move {
                reload(&api_client, &students, &loading).await;
            });
        })
    };

    let handlers = {
        let students = students.clone();
        let loading = loading.clone();

        use_memo(api_client.clone(), move |api_client| {
            let api = Rc::new(api_client.clone());

            let add_student = {
                let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                AsyncCallback::new(move |changes: StudentChanges| {
                    let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                    async move {
                        api.add_student(&changes).await?;
                        reload(&api, &students, &loading).await;
                        Ok::<(), ActionError>(())
                    }
                })
            };

            let edit_student = {
                let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                AsyncCallback::new(move |(student_id, changes): (String, StudentChanges)| {
                    let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                    async move {
                        api.update_student(&student_id, &changes).await?;
                        reload(&api, &students, &loading).await;
                        Ok::<(), ActionError>(())
                    }
                })
            };

            let delete_student = {
                let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                AsyncCallback::new(move |student_id: String| {
                    let (api, students, loading) = (api.clone(), students.clone(), loading.clone());
                    async move {
                        api.delete_student(&student_id).await?;
                        reload(&api, &students, &loading).await;
                        Ok::<(), ActionError>(())
                    }
                })
            };

            let send_parent_email = {
                let api = api.clone();
                AsyncCallback::new(move |(student_id, data): (String, EmailFormData)| {
                    let api = api.clone();
                    async move { api.send_parent_email(&student_id, &data).await }
                })
            };

            (add_student, edit_student, delete_student, send_parent_email)
        })
    };

    // Load the roster once on mount
    use_effect_with((), {
        let refresh_students = refresh_students.clone();
        move |_| {
            refresh_students.emit(());
            || ()
        }
    });

    let (add_student, edit_student, delete_student, send_parent_email) = (*handlers).clone();

    let state = StudentsState {
        students: (*students).clone(),
        loading: *loading,
    };

    let actions = UseStudentsActions {
        refresh_students,
        add_student,
        edit_student,
        delete_student,
        send_parent_email,
    };

    UseStudentsResult { state, actions }
}
