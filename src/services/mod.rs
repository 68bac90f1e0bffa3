//! Business logic services

pub mod archive;
pub mod concerts;
pub mod parolees;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub concerts: concerts::ConcertsService,
    pub parolees: parolees::ParoleesService,
    /// Only present when the repository has a concert archive
    pub archive: Option<archive::ArchiveService>,
}

impl Services {
    /// Create all services with the given repository. The parolee store
    /// starts out holding its seed data.
    pub fn new(repository: Repository) -> Self {
        let parolees = parolees::ParoleesService::new(repository.clone());
        parolees.reload();

        Self {
            archive: repository.archive.clone().map(archive::ArchiveService::new),
            concerts: concerts::ConcertsService::new(repository.clone()),
            parolees,
        }
    }
}
