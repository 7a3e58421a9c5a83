use serde::Deserialize;

/// Body accepted by both `POST /api/tasks` and `PUT /api/tasks/{id}`.
///
/// `title` stays optional here so an absent title is reported as
/// `missing title` rather than as a JSON error.
#[derive(Debug, Default, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskRequest {
    pub fn validated_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
