//! Data models for the concert hall server

pub mod archive;
pub mod concert;
pub mod parolee;
pub mod university;

// Re-export commonly used types
pub use archive::{ArchivedConcert, Genre, Performer};
pub use concert::{Concert, NewConcert, UpdateConcert};
pub use parolee::{Parolee, ParoleeDto};
pub use university::{University, UniversityDto};
