//! Concert archive service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::archive::ArchivedConcert,
    repository::ConcertDao,
};

#[derive(Clone)]
pub struct ArchiveService {
    dao: Arc<dyn ConcertDao>,
}

impl ArchiveService {
    pub fn new(dao: Arc<dyn ConcertDao>) -> Self {
        Self { dao }
    }

    /// Insert or update a concert together with its performer
    pub async fn save(&self, concert: ArchivedConcert) -> AppResult<ArchivedConcert> {
        concert.validate()?;
        concert.performer.validate()?;
        let saved = self.dao.save(concert).await?;
        tracing::info!(
            concert_id = ?saved.id,
            performer_id = ?saved.performer.id,
            "Saved archived concert"
        );
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ArchivedConcert> {
        self.dao
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Archived concert {} not found", id)))
    }

    pub async fn list(&self) -> AppResult<Vec<ArchivedConcert>> {
        self.dao.get_all().await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.dao.delete(id).await? {
            return Err(AppError::NotFound(format!("Archived concert {} not found", id)));
        }
        tracing::info!("Deleted archived concert with id: {}", id);
        Ok(())
    }
}
