//! PostgreSQL implementation of MoodRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use mood_core::entities::MoodRecord;
use mood_core::traits::{MoodQuery, MoodRepository, RepoResult};

use crate::mappers::MoodInsert;
use crate::models::MoodModel;

use super::error::map_db_error;

/// Rows per multi-value INSERT; keeps bind parameters well under the protocol limit
const INSERT_CHUNK: usize = 1000;

/// PostgreSQL implementation of MoodRepository
#[derive(Clone)]
pub struct PgMoodRepository {
    pool: PgPool,
}

impl PgMoodRepository {
    /// Create a new PgMoodRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoodRepository for PgMoodRepository {
    #[instrument(skip(self, record), fields(emoji = %record.emoji))]
    async fn insert(&self, record: &MoodRecord) -> RepoResult<()> {
        let row = MoodInsert::new(record);
        sqlx::query(
            r#"
            INSERT INTO moods (emoji, label, "timestamp", country, region, latitude, longitude, reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.emoji)
        .bind(row.label)
        .bind(row.timestamp)
        .bind(row.country)
        .bind(row.region)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn insert_many(&self, records: &[MoodRecord]) -> RepoResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut inserted = 0;

        for chunk in records.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                r#"INSERT INTO moods (emoji, label, "timestamp", country, region, latitude, longitude, reason) "#,
            );
            builder.push_values(chunk.iter().map(MoodInsert::new), |mut b, row| {
                b.push_bind(row.emoji)
                    .push_bind(row.label)
                    .push_bind(row.timestamp)
                    .push_bind(row.country)
                    .push_bind(row.region)
                    .push_bind(row.latitude)
                    .push_bind(row.longitude)
                    .push_bind(row.reason);
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &MoodQuery) -> RepoResult<Vec<MoodRecord>> {
        let results = sqlx::query_as::<_, MoodModel>(
            r#"
            SELECT id, emoji, label, "timestamp", country, region, latitude, longitude, reason
            FROM moods
            WHERE ($1::timestamptz IS NULL OR "timestamp" >= $1)
              AND ($2::text IS NULL OR country = $2)
            ORDER BY "timestamp" ASC, id ASC
            "#,
        )
        .bind(query.since)
        .bind(query.country.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MoodRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM moods")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
