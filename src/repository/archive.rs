//! Concert archive: concerts and performers persisted in two related tables

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{persistence, AppError, AppResult},
    models::archive::{ArchivedConcert, Genre, Performer},
};

const ERROR_SAVING_CONCERT: &str = "Unable to save Concert";
const ERROR_DELETING_CONCERT: &str = "Unable to delete Concert";
const ERROR_LOADING_CONCERT: &str = "Unable to retrieve Concert";
const ERROR_LOADING_ALL_CONCERTS: &str = "Unable to retrieve all Concerts";

/// Data access for archived concerts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConcertDao: Send + Sync {
    /// Insert or update the concert and its performer, keyed on whether
    /// each already has an id. Returns the concert with ids filled in.
    async fn save(&self, concert: ArchivedConcert) -> AppResult<ArchivedConcert>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<ArchivedConcert>>;

    /// All concerts ordered by date then title
    async fn get_all(&self) -> AppResult<Vec<ArchivedConcert>>;

    /// Returns false when no concert had this id
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(FromRow)]
struct ConcertRow {
    id: i64,
    title: String,
    date: NaiveDateTime,
    performer_id: i64,
}

#[derive(FromRow)]
struct PerformerRow {
    id: i64,
    name: String,
    image_uri: Option<String>,
    genre: String,
}

impl PerformerRow {
    fn into_performer(self, error: &'static str) -> AppResult<Performer> {
        let genre = self.genre.parse::<Genre>().map_err(|e| {
            tracing::debug!(performer_id = self.id, "{}: {}", error, e);
            AppError::Persistence(error)
        })?;
        Ok(Performer {
            id: Some(self.id),
            name: self.name,
            image_uri: self.image_uri,
            genre,
        })
    }
}

/// Postgres implementation. Keys come from the tables' BIGSERIAL columns.
///
/// `save` issues its statements one after another on the pool without an
/// enclosing transaction: two saves touching the same performer or concert
/// can interleave and the last write wins.
#[derive(Clone)]
pub struct PgConcertDao {
    pool: Pool<Postgres>,
}

impl PgConcertDao {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn fetch_performer(&self, id: i64, error: &'static str) -> AppResult<Performer> {
        sqlx::query_as::<_, PerformerRow>(
            "SELECT id, name, image_uri, genre FROM performers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence(error))?
        .ok_or_else(|| {
            tracing::debug!(performer_id = id, "{}: performer row missing", error);
            AppError::Persistence(error)
        })?
        .into_performer(error)
    }

    async fn save_performer(&self, performer: &Performer) -> AppResult<i64> {
        match performer.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO performers (name, image_uri, genre) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&performer.name)
                .bind(&performer.image_uri)
                .bind(performer.genre.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(persistence(ERROR_SAVING_CONCERT))?;
                Ok(id)
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE performers SET name = $1, image_uri = $2, genre = $3 WHERE id = $4",
                )
                .bind(&performer.name)
                .bind(&performer.image_uri)
                .bind(performer.genre.as_str())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(persistence(ERROR_SAVING_CONCERT))?;
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("Performer {} not found", id)));
                }
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl ConcertDao for PgConcertDao {
    async fn save(&self, concert: ArchivedConcert) -> AppResult<ArchivedConcert> {
        // The performer goes first: concerts reference it by foreign key
        let performer_id = self.save_performer(&concert.performer).await?;

        let concert_id = match concert.id {
            None => sqlx::query_scalar::<_, i64>(
                "INSERT INTO concerts (title, date, performer_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(&concert.title)
            .bind(concert.date)
            .bind(performer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence(ERROR_SAVING_CONCERT))?,
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE concerts SET title = $1, date = $2, performer_id = $3 WHERE id = $4",
                )
                .bind(&concert.title)
                .bind(concert.date)
                .bind(performer_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(persistence(ERROR_SAVING_CONCERT))?;
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("Concert {} not found", id)));
                }
                id
            }
        };

        tracing::debug!(concert_id, performer_id, "Saved archived concert");

        let mut performer = (*concert.performer).clone();
        performer.id = Some(performer_id);
        Ok(ArchivedConcert {
            id: Some(concert_id),
            title: concert.title,
            date: concert.date,
            performer: Arc::new(performer),
        })
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<ArchivedConcert>> {
        let row = sqlx::query_as::<_, ConcertRow>(
            "SELECT id, title, date, performer_id FROM concerts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence(ERROR_LOADING_CONCERT))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let performer = self.fetch_performer(row.performer_id, ERROR_LOADING_CONCERT).await?;
        Ok(Some(ArchivedConcert {
            id: Some(row.id),
            title: row.title,
            date: row.date,
            performer: Arc::new(performer),
        }))
    }

    async fn get_all(&self) -> AppResult<Vec<ArchivedConcert>> {
        let rows = sqlx::query_as::<_, ConcertRow>(
            "SELECT id, title, date, performer_id FROM concerts ORDER BY date, title, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence(ERROR_LOADING_ALL_CONCERTS))?;

        // One lookup per distinct performer; concerts share the loaded instance
        let mut performers: HashMap<i64, Arc<Performer>> = HashMap::new();
        let mut concerts = Vec::with_capacity(rows.len());
        for row in rows {
            let performer = match performers.get(&row.performer_id) {
                Some(p) => p.clone(),
                None => {
                    let p = Arc::new(
                        self.fetch_performer(row.performer_id, ERROR_LOADING_ALL_CONCERTS)
                            .await?,
                    );
                    performers.insert(row.performer_id, p.clone());
                    p
                }
            };
            concerts.push(ArchivedConcert {
                id: Some(row.id),
                title: row.title,
                date: row.date,
                performer,
            });
        }
        Ok(concerts)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM concerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence(ERROR_DELETING_CONCERT))?;
        Ok(result.rows_affected() > 0)
    }
}
