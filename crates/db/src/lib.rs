use config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub use sea_orm::{ConnectionTrait, DbErr};

pub mod entities;
pub mod models;
pub mod schema;

pub type DbPool = DatabaseConnection;

/// Owns the connection pool. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct DBService {
    pub pool: DbPool,
}

impl DBService {
    pub async fn new(config: &DatabaseConfig) -> Result<DBService, DbErr> {
        let database_url = config
            .database_url()
            .map_err(|err| DbErr::Custom(err.to_string()))?;

        let mut options = ConnectOptions::new(database_url);
        options
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(config.connect_timeout)
            .acquire_timeout(config.connect_timeout)
            .sqlx_logging(false);

        let pool = Database::connect(options).await?;
        tracing::debug!(
            backend = ?pool.get_database_backend(),
            max_connections = config.max_connections,
            "Database pool created"
        );
        Ok(DBService { pool })
    }

    /// Round trip to the database; used for the startup check and the
    /// diagnostic endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.pool.ping().await
    }
}
