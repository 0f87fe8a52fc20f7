//! PostgreSQL repository for sensor readings
//!
//! Rows land in a flat table (default `sensor_data`):
//! `id`, `current_value_counter`, `pressure_value`, `status`.

use crate::sink::ReadingSink;
use async_trait::async_trait;
use common::config::redact_url;
use common::DatabaseConfig;
use errors::SensorResult;
use sensor_frames::SensorReading;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Reading store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgReadingStore {
    pool: PgPool,
    table: String,
}

impl PgReadingStore {
    /// Connect using the settings in `config`
    pub async fn connect(config: &DatabaseConfig) -> SensorResult<Self> {
        Self::connect_url(&config.connection_string(), config).await
    }

    /// Connect to an explicit URL, taking pool size and table from `config`
    pub async fn connect_url(url: &str, config: &DatabaseConfig) -> SensorResult<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;

        info!("PostgreSQL connected: {}", redact_url(url));

        Ok(Self::from_pool(pool, &config.table))
    }

    /// Create from an existing pool
    ///
    /// `table` must already be a valid identifier; see [`DatabaseConfig::validate`].
    pub fn from_pool(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Target table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Check if database is accessible
    pub async fn ping(&self) -> SensorResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the readings table if it does not exist
    pub async fn ensure_table(&self) -> SensorResult<()> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                current_value_counter INTEGER,
                pressure_value DOUBLE PRECISION,
                status VARCHAR
            )
            "#,
            self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        debug!("Table ready: {}", self.table);
        Ok(())
    }

    /// Whether the readings table has been created
    pub async fn table_exists(&self) -> SensorResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(&self.table)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Number of stored readings
    pub async fn count(&self) -> SensorResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Insert readings in a single transaction
    pub async fn insert_readings(&self, readings: &[SensorReading]) -> SensorResult<u64> {
        let sql = format!(
            "INSERT INTO {} (current_value_counter, pressure_value, status) VALUES ($1, $2, $3)",
            self.table
        );

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for reading in readings {
            let result = sqlx::query(&sql)
                .bind(i32::from(reading.counter))
                .bind(reading.pressure)
                .bind(&reading.status)
                .execute(&mut *tx)
                .await;

            match result {
                Ok(done) => inserted += done.rows_affected(),
                Err(e) => {
                    warn!("Insert failed, rolling back {} rows: {}", inserted, e);
                    tx.rollback().await?;
                    return Err(e.into());
                },
            }
        }

        tx.commit().await?;
        debug!("Committed {} rows into {}", inserted, self.table);
        Ok(inserted)
    }
}

#[async_trait]
impl ReadingSink for PgReadingStore {
    async fn save(&self, readings: &[SensorReading]) -> SensorResult<u64> {
        self.ensure_table().await?;
        self.insert_readings(readings).await
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
