//! Concert model (in-memory concert service)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Concert record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Concert {
    /// Assigned by the store on creation
    pub id: i64,
    pub title: String,
    /// Concert date (YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Concert {
    pub fn new(id: i64, data: NewConcert) -> Self {
        Self {
            id,
            title: data.title,
            date: data.date,
        }
    }

    /// Overwrite the fields present in `data`
    pub fn apply(&mut self, data: UpdateConcert) {
        if let Some(title) = data.title {
            self.title = title;
        }
        if let Some(date) = data.date {
            self.date = date;
        }
    }
}

impl std::fmt::Display for Concert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Concert: id {}, title {}, date {}",
            self.id,
            self.title,
            self.date.format("%d/%m/%Y")
        )
    }
}

/// Create concert request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewConcert {
    #[validate(length(min = 1, max = 80, message = "Title must be 1 to 80 characters"))]
    pub title: String,
    pub date: NaiveDate,
}

/// Update concert request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateConcert {
    #[validate(length(min = 1, max = 80, message = "Title must be 1 to 80 characters"))]
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}
