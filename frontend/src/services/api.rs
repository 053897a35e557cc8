use gloo::net::http::{Request, Response};
use shared::{ActionError, EmailFormData, Student, StudentChanges, StudentListResponse};

/// API client for the roster backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn student_url(&self, student_id: &str) -> String {
        format!("{}/api/students/{}", self.base_url, student_id)
    }

    /// Fetch the whole roster
    pub async fn list_students(&self) -> Result<Vec<Student>, ActionError> {
        let url = format!("{}/api/students", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => {
                let response = ensure_ok(response).await?;
                match response.json::<StudentListResponse>().await {
                    Ok(data) => Ok(data.students),
                    Err(e) => Err(ActionError::Message(format!("Failed to parse students: {}", e))),
                }
            }
            Err(e) => Err(ActionError::Message(format!("Failed to fetch students: {}", e))),
        }
    }

    pub async fn add_student(&self, changes: &StudentChanges) -> Result<(), ActionError> {
        let url = format!("{}/api/students", self.base_url);
        let request = Request::post(&url)
            .json(changes)
            .map_err(|e| ActionError::Message(format!("Failed to serialize request: {}", e)))?;

        match request.send().await {
            Ok(response) => ensure_ok(response).await.map(|_| ()),
            Err(e) => Err(ActionError::Message(format!("Network error: {}", e))),
        }
    }

    pub async fn update_student(&self, student_id: &str, changes: &StudentChanges) -> Result<(), ActionError> {
        let request = Request::put(&self.student_url(student_id))
            .json(changes)
            .map_err(|e| ActionError::Message(format!("Failed to serialize request: {}", e)))?;

        match request.send().await {
            Ok(response) => ensure_ok(response).await.map(|_| ()),
            Err(e) => Err(ActionError::Message(format!("Network error: {}", e))),
        }
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<(), ActionError> {
        match Request::delete(&self.student_url(student_id)).send().await {
            Ok(response) => ensure_ok(response).await.map(|_| ()),
            Err(e) => Err(ActionError::Message(format!("Network error: {}", e))),
        }
    }

    /// Ask the backend to email the student's parent
    pub async fn send_parent_email(&self, student_id: &str, data: &EmailFormData) -> Result<(), ActionError> {
        let url = format!("{}/parent-email", self.student_url(student_id));
        let request = Request::post(&url)
            .json(data)
            .map_err(|e| ActionError::Message(format!("Failed to serialize request: {}", e)))?;

        match request.send().await {
            Ok(response) => ensure_ok(response).await.map(|_| ()),
            Err(e) => Err(ActionError::Message(format!("Network error: {}", e))),
        }
    }
}

/// Non-2xx responses become errors carrying the body text, if there is any.
async fn ensure_ok(response: Response) -> Result<Response, ActionError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => Err(ActionError::Message(text)),
        _ => {
            log::warn!("Request failed with status {} and no message", status);
            Err(ActionError::Unknown)
        }
    }
}
