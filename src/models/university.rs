//! University model: lecturers and courses in a many-to-many association.
//!
//! The association is held in both directions in memory. On the wire each
//! side only carries the ids of the other side, and [`University::from_dto`]
//! rebuilds the two directions after deserialization.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LecturerId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    lecturers: BTreeSet<LecturerId>,
}

impl Course {
    pub fn lecturers(&self) -> impl Iterator<Item = LecturerId> + '_ {
        self.lecturers.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    pub name: String,
    courses_taught: BTreeSet<CourseId>,
}

impl Lecturer {
    pub fn courses_taught(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.courses_taught.iter().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct University {
    courses: Vec<Course>,
    lecturers: Vec<Lecturer>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("Duplicate reference id: {0}")]
    DuplicateId(String),

    #[error("{from} refers to unknown id {to}")]
    DanglingReference { from: String, to: String },
}

/// Course wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub lecturers: Vec<String>,
}

/// Lecturer wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub courses_taught: Vec<String>,
}

/// University wire form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityDto {
    #[serde(default)]
    pub courses: Vec<CourseDto>,
    #[serde(default)]
    pub lecturers: Vec<LecturerDto>,
}

fn course_ref(id: CourseId) -> String {
    format!("course:{}", id.0 + 1)
}

fn lecturer_ref(id: LecturerId) -> String {
    format!("lecturer:{}", id.0 + 1)
}

impl University {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&mut self, title: &str) -> CourseId {
        self.courses.push(Course {
            title: title.to_string(),
            lecturers: BTreeSet::new(),
        });
        CourseId(self.courses.len() - 1)
    }

    pub fn add_lecturer(&mut self, name: &str) -> LecturerId {
        self.lecturers.push(Lecturer {
            name: name.to_string(),
            courses_taught: BTreeSet::new(),
        });
        LecturerId(self.lecturers.len() - 1)
    }

    /// Link a lecturer and a course in both directions. Returns false and
    /// links nothing when either id does not belong to this university.
    pub fn assign_course(&mut self, lecturer: LecturerId, course: CourseId) -> bool {
        if course.0 >= self.courses.len() {
            return false;
        }
        let Some(entry) = self.lecturers.get_mut(lecturer.0) else {
            return false;
        };
        entry.courses_taught.insert(course);
        self.courses[course.0].lecturers.insert(lecturer);
        true
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id.0)
    }

    pub fn lecturer(&self, id: LecturerId) -> Option<&Lecturer> {
        self.lecturers.get(id.0)
    }

    pub fn course_by_title(&self, title: &str) -> Option<CourseId> {
        self.courses.iter().position(|c| c.title == title).map(CourseId)
    }

    pub fn lecturer_by_name(&self, name: &str) -> Option<LecturerId> {
        self.lecturers.iter().position(|l| l.name == name).map(LecturerId)
    }

    pub fn to_dto(&self) -> UniversityDto {
        let courses = self
            .courses
            .iter()
            .enumerate()
            .map(|(i, c)| CourseDto {
                id: course_ref(CourseId(i)),
                title: c.title.clone(),
                lecturers: c.lecturers().map(lecturer_ref).collect(),
            })
            .collect();
        let lecturers = self
            .lecturers
            .iter()
            .enumerate()
            .map(|(i, l)| LecturerDto {
                id: lecturer_ref(LecturerId(i)),
                name: l.name.clone(),
                courses_taught: l.courses_taught().map(course_ref).collect(),
            })
            .collect();
        UniversityDto { courses, lecturers }
    }

    /// Rebuild the object graph from its wire form. A link named on either
    /// side establishes the association in both directions.
    pub fn from_dto(dto: &UniversityDto) -> Result<Self, GraphError> {
        let mut university = University::new();
        let mut course_ids = HashMap::new();
        let mut lecturer_ids = HashMap::new();

        for c in &dto.courses {
            let id = university.add_course(&c.title);
            if course_ids.insert(c.id.as_str(), id).is_some() || lecturer_ids.contains_key(c.id.as_str()) {
                return Err(GraphError::DuplicateId(c.id.clone()));
            }
        }
        for l in &dto.lecturers {
            let id = university.add_lecturer(&l.name);
            if lecturer_ids.insert(l.id.as_str(), id).is_some() || course_ids.contains_key(l.id.as_str()) {
                return Err(GraphError::DuplicateId(l.id.clone()));
            }
        }

        for l in &dto.lecturers {
            let lecturer = lecturer_ids[l.id.as_str()];
            for to in &l.courses_taught {
                let course = *course_ids.get(to.as_str()).ok_or_else(|| GraphError::DanglingReference {
                    from: l.id.clone(),
                    to: to.clone(),
                })?;
                university.assign_course(lecturer, course);
            }
        }
        for c in &dto.courses {
            let course = course_ids[c.id.as_str()];
            for to in &c.lecturers {
                let lecturer = *lecturer_ids.get(to.as_str()).ok_or_else(|| GraphError::DanglingReference {
                    from: c.id.clone(),
                    to: to.clone(),
                })?;
                university.assign_course(lecturer, course);
            }
        }

        Ok(university)
    }
}
