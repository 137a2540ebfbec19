use axum::{
    Router,
    routing::{get, patch},
};

use super::{create_task, delete_task, get_task, get_tasks, toggle_task, update_task};
use crate::AppState;

pub fn router() -> Router<AppState> {
    let task_id_router = Router::new()
        .route("/", get(get_task).put(update_task).delete(delete_task))
        .route("/toggle", patch(toggle_task));

    let inner = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .nest("/{task_id}", task_id_router);

    Router::new().nest("/tasks", inner)
}
