use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use sea_orm::sea_query::{Expr, ExprTrait};
use serde::{Deserialize, Serialize};

use crate::entities::task;

pub const DEFAULT_PRIORITY: &str = "medium";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a new task. Titles are expected to be validated (trimmed,
/// non-empty) by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub priority: String,
}

impl CreateTask {
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

/// Full replacement of every mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: String,
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            priority: model.priority,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl Task {
    /// Newest first. `completed` narrows the result when present.
    pub async fn find_all<C: ConnectionTrait>(
        db: &C,
        completed: Option<bool>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = task::Entity::find();
        if let Some(completed) = completed {
            query = query.filter(task::Column::Completed.eq(completed));
        }

        let models = query
            .order_by_desc(task::Column::CreatedAt)
            .order_by_desc(task::Column::Id)
            .all(db)
            .await?;

        tracing::debug!(count = models.len(), ?completed, "Loaded tasks");
        Ok(models.into_iter().map(Self::from).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Self>, DbErr> {
        Ok(task::Entity::find_by_id(id).one(db).await?.map(Self::from))
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        task::Entity::find().count(db).await
    }

    pub async fn create<C: ConnectionTrait>(db: &C, data: &CreateTask) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = task::ActiveModel {
            title: Set(data.title.clone()),
            description: Set(data.description.clone()),
            completed: Set(false),
            priority: Set(data.priority.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let id = task::Entity::insert(active).exec(db).await?.last_insert_id;
        tracing::debug!(task_id = id, "Inserted task");

        Self::find_by_id(db, id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))
    }

    /// Returns `None` when no task has this id.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i64,
        data: &UpdateTask,
    ) -> Result<Option<Self>, DbErr> {
        let result = task::Entity::update_many()
            .col_expr(task::Column::Title, Expr::value(data.title.clone()))
            .col_expr(task::Column::Description, Expr::value(data.description.clone()))
            .col_expr(task::Column::Completed, Expr::value(data.completed))
            .col_expr(task::Column::Priority, Expr::value(data.priority.clone()))
            .col_expr(task::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(task::Column::Id.eq(id))
            .exec(db)
            .await?;

        // MySQL counts changed rows rather than matched rows, so an unchanged
        // row can report zero. The read-back decides whether the task exists.
        if result.rows_affected == 0 {
            tracing::debug!(task_id = id, "Update touched no rows");
        }
        Self::find_by_id(db, id).await
    }

    /// Flips `completed` in a single statement so concurrent toggles on the
    /// same task alternate instead of overwriting each other.
    pub async fn toggle_completed<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<Self>, DbErr> {
        let result = task::Entity::update_many()
            .col_expr(
                task::Column::Completed,
                Expr::col(task::Column::Completed).not(),
            )
            .col_expr(task::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(task::Column::Id.eq(id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        Self::find_by_id(db, id).await
    }

    /// Returns whether a row was removed.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let result = task::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}
