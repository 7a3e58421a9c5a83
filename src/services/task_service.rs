use sqlx::SqlitePool;

use crate::api::dto::TaskRequest;
use crate::domain::{Task, TodoError};

pub struct TaskService;

impl TaskService {
    pub async fn list_tasks(pool: &SqlitePool) -> Result<Vec<Task>, TodoError> {
        let tasks: Vec<Task> = sqlx::query_as("SELECT id, title, completed FROM tasks")
            .fetch_all(pool)
            .await?;
        Ok(tasks)
    }

    pub async fn get_task(pool: &SqlitePool, id: i64) -> Result<Task, TodoError> {
        let task: Task = sqlx::query_as("SELECT id, title, completed FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| TodoError::NotFound(format!("Task not found: {}", id)))?;

        Ok(task)
    }

    pub async fn create_task(pool: &SqlitePool, req: TaskRequest) -> Result<Task, TodoError> {
        let title = req
            .validated_title()
            .ok_or_else(|| TodoError::BadRequest("missing title".into()))?;
        let completed = req.completed.unwrap_or(false);

        let result = sqlx::query("INSERT INTO tasks (title, completed) VALUES (?, ?)")
            .bind(title)
            .bind(completed)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!("No rows inserted for task: {}", title);
            return Err(TodoError::Internal("unable to add task".into()));
        }

        let id = result.last_insert_rowid();
        tracing::debug!(task_id = id, "Task created");

        Self::get_task(pool, id).await
    }

    pub async fn update_task(
        pool: &SqlitePool,
        id: i64,
        req: TaskRequest,
    ) -> Result<Task, TodoError> {
        let title = req
            .validated_title()
            .ok_or_else(|| TodoError::BadRequest("missing title".into()))?;
        let completed = req.completed.unwrap_or(false);

        let result = sqlx::query("UPDATE tasks SET title = ?, completed = ? WHERE id = ?")
            .bind(title)
            .bind(completed)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(format!("Task not found: {}", id)));
        }

        Ok(Task {
            id,
            title: title.to_string(),
            completed,
        })
    }

    pub async fn delete_task(pool: &SqlitePool, id: i64) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(format!("Task not found: {}", id)));
        }

        tracing::debug!(task_id = id, "Task deleted");
        Ok(())
    }
}
