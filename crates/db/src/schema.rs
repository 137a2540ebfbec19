//! Creates the `tasks` table when it does not exist yet. There is no
//! versioning: the table layout is fixed.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr,
    sea_query::{ColumnDef, Expr, IntoIden, Table, TableCreateStatement},
};

use crate::{entities::task, models::task::DEFAULT_PRIORITY};

pub async fn ensure_tasks_table<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let statement = tasks_table(backend);

    db.execute_unprepared(&backend.build(&statement).sql).await?;
    tracing::debug!(table = "tasks", "Ensured table exists");
    Ok(())
}

fn tasks_table(backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .if_not_exists()
        .table(task::Entity)
        .col(pk_id_col(backend, task::Column::Id))
        .col(ColumnDef::new(task::Column::Title).string_len(255).not_null())
        .col(ColumnDef::new(task::Column::Description).text().not_null())
        .col(
            ColumnDef::new(task::Column::Completed)
                .boolean()
                .not_null()
                .default(Expr::val(false)),
        )
        .col(
            ColumnDef::new(task::Column::Priority)
                .string_len(32)
                .not_null()
                .default(Expr::val(DEFAULT_PRIORITY)),
        )
        .col(timestamp_col(task::Column::CreatedAt))
        .col(timestamp_col(task::Column::UpdatedAt))
        .to_owned()
}

fn pk_id_col<T: IntoIden>(backend: DatabaseBackend, col: T) -> ColumnDef {
    let mut col = ColumnDef::new(col);
    // SQLite only auto-increments INTEGER PRIMARY KEY columns.
    match backend {
        DatabaseBackend::Sqlite => {
            col.integer();
        }
        _ => {
            col.big_integer();
        }
    }
    col.not_null().auto_increment().primary_key().to_owned()
}

// `DateTimeUtc` only decodes from `TIMESTAMPTZ` on Postgres. MySQL renders this
// as a plain `timestamp`.
fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[cfg(test)]
mod tests {
    use config::DatabaseConfig;
    use test_support::TempDatabase;

    use super::*;
    use crate::{
        DBService,
        models::task::{CreateTask, Task},
    };

    #[test]
    fn postgres_timestamps_carry_a_time_zone() {
        let sql = DatabaseBackend::Postgres
            .build(&tasks_table(DatabaseBackend::Postgres))
            .sql
            .to_lowercase();

        assert!(sql.contains("\"created_at\" timestamp with time zone"), "{sql}");
        assert!(sql.contains("\"updated_at\" timestamp with time zone"), "{sql}");
    }

    #[test]
    fn mysql_timestamps_stay_plain() {
        let sql = DatabaseBackend::MySql
            .build(&tasks_table(DatabaseBackend::MySql))
            .sql
            .to_lowercase();

        assert!(sql.contains("`created_at` timestamp"), "{sql}");
        assert!(!sql.contains("time zone"), "{sql}");
    }

    #[tokio::test]
    async fn bootstrapped_table_round_trips_a_task() {
        let temp = TempDatabase::new();
        let db = DBService::new(&DatabaseConfig::from_url(temp.url()))
            .await
            .unwrap();
        ensure_tasks_table(&db.pool).await.unwrap();

        let created = Task::create(&db.pool, &CreateTask::from_title("round trip"))
            .await
            .unwrap();
        let listed = Task::find_all(&db.pool, None).await.unwrap();

        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(created.created_at, created.updated_at);
    }
}
