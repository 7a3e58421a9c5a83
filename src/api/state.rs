use sqlx::SqlitePool;

use crate::domain::TodoError;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Option<SqlitePool>,
}

impl AppState {
    pub fn new(db: Option<SqlitePool>) -> Self {
        Self { db }
    }

    pub fn require_db(&self) -> Result<&SqlitePool, TodoError> {
        self.db
            .as_ref()
            .ok_or_else(|| TodoError::Internal("Database not available".into()))
    }
}
