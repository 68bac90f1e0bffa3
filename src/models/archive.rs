//! Archived concert and performer models (relational store)

use std::{str::FromStr, sync::Arc};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Performer genre, stored as its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Pop,
    HipHop,
    RhythmAndBlues,
    Acappella,
    Metal,
    Rock,
    Classical,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "POP",
            Genre::HipHop => "HIP_HOP",
            Genre::RhythmAndBlues => "RHYTHM_AND_BLUES",
            Genre::Acappella => "ACAPPELLA",
            Genre::Metal => "METAL",
            Genre::Rock => "ROCK",
            Genre::Classical => "CLASSICAL",
        }
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POP" => Ok(Genre::Pop),
            "HIP_HOP" => Ok(Genre::HipHop),
            "RHYTHM_AND_BLUES" => Ok(Genre::RhythmAndBlues),
            "ACAPPELLA" => Ok(Genre::Acappella),
            "METAL" => Ok(Genre::Metal),
            "ROCK" => Ok(Genre::Rock),
            "CLASSICAL" => Ok(Genre::Classical),
            other => Err(format!("Unknown genre: {}", other)),
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Performer {
    /// Absent until the performer has been saved
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 80, message = "Name must be 1 to 80 characters"))]
    pub name: String,
    #[serde(default)]
    pub image_uri: Option<String>,
    pub genre: Genre,
}

/// Concert record persisted with its performer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ArchivedConcert {
    /// Absent until the concert has been saved
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 80, message = "Title must be 1 to 80 characters"))]
    pub title: String,
    /// YYYY-MM-DDTHH:MM:SS
    pub date: NaiveDateTime,
    /// Concerts loaded together share one instance per performer
    #[schema(value_type = Performer)]
    pub performer: Arc<Performer>,
}
