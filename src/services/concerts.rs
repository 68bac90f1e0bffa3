//! Concert service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::concert::{Concert, NewConcert, UpdateConcert},
    repository::Repository,
};

#[derive(Clone)]
pub struct ConcertsService {
    repository: Repository,
}

impl ConcertsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn create(&self, data: NewConcert) -> AppResult<Concert> {
        data.validate()?;
        let concert = self
            .repository
            .concerts
            .insert_new(|id| Concert::new(id, data));
        tracing::info!("Created new concert with id: {}", concert.id);
        Ok(concert)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Concert> {
        tracing::debug!("Retrieving concert with id: {}", id);
        self.repository
            .concerts
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Concert {} not found", id)))
    }

    /// Concerts with ids in `[start, start + size)`
    pub fn list(&self, start: i64, size: i64) -> Vec<Concert> {
        let concerts = self.repository.concerts.get_range(start, size);
        tracing::debug!(start, size, found = concerts.len(), "Retrieved concert range");
        concerts
    }

    pub fn update(&self, id: i64, data: UpdateConcert) -> AppResult<()> {
        data.validate()?;
        self.repository
            .concerts
            .update(id, |concert| concert.apply(data))
            .ok_or_else(|| AppError::NotFound(format!("Concert {} not found", id)))?;
        tracing::info!("Updated concert with id: {}", id);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.repository.concerts.len()
    }

    /// Drop every concert and restart ids at 1
    pub fn clear(&self) {
        self.repository.concerts.clear();
        tracing::info!("Cleared all concerts");
    }
}
