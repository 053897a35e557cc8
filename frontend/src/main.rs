use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;
mod state;

use components::StudentManagementTable;
use config::AppConfig;
use hooks::use_students::use_students;
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.api_base_url.clone(), |base_url| {
        ApiClient::with_base_url(base_url.clone())
    });
    let students = use_students(&api_client);

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"🎒 My Students"}</h1>
                <button
                    type="button"
                    class="btn btn-secondary"
                    title="Reload roster"
                    onclick={
                        let refresh = students.actions.refresh_students.clone();
                        Callback::from(move |_: MouseEvent| refresh.emit(()))
                    }
                >
                    {"🔄 Refresh"}
                </button>
            </header>
            <main class="app-main">
                <StudentManagementTable
                    students={students.state.students.clone()}
                    on_add_student={students.actions.add_student.clone()}
                    on_edit_student={students.actions.edit_student.clone()}
                    on_delete_student={students.actions.delete_student.clone()}
                    on_send_parent_email={students.actions.send_parent_email.clone()}
                    is_loading={students.state.loading}
                />
            </main>
        </div>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    Logger::init(config.log_level);
    Logger::info_with_component("main", &format!("Starting roster UI against {}", config.api_base_url));

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
