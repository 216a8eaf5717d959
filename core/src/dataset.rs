use crate::{AcademicUnit, FacultyMember, Searchable};
use lazy_static::lazy_static;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("record #{0} has an empty id")]
    MissingId(usize),
    #[error("duplicate record id `{0}`")]
    DuplicateId(String),
    #[error("record `{0}` has no searchable text")]
    EmptySearchableFields(String),
}

/// Immutable, ordered records backing one listing page.
#[derive(Debug, Clone)]
pub struct Dataset<R> {
    records: Vec<R>,
}

impl<R: Searchable> Dataset<R> {
    /// Validate `records`: ids are present and unique, and every record has
    /// at least one non-empty searchable field.
    pub fn new(records: Vec<R>) -> Result<Self, DatasetError> {
        validate(&records)?;
        Ok(Self { records })
    }

    pub fn supports_categories(&self) -> bool {
        R::SUPPORTS_CATEGORIES
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }
}

fn validate<R: Searchable>(records: &[R]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = record.id();
        if id.is_empty() {
            return Err(DatasetError::MissingId(index));
        }
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId(id.to_string()));
        }
        if record.searchable_fields().iter().all(|f| f.is_empty()) {
            return Err(DatasetError::EmptySearchableFields(id.to_string()));
        }
    }
    Ok(())
}

impl<R> Dataset<R> {
    pub fn records(&self) -> &[R] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

lazy_static! {
    static ref ACADEMIC_UNITS: Dataset<AcademicUnit> = Dataset::new(
        serde_json::from_str(include_str!("../data/academic_units.json")).expect("valid academic units json")
    )
    .expect("valid academic units dataset");
    static ref FACULTY_MEMBERS: Dataset<FacultyMember> = Dataset::new(
        serde_json::from_str(include_str!("../data/faculty_members.json")).expect("valid faculty json")
    )
    .expect("valid faculty dataset");
}

/// Departments and research centers shown on the academics hub.
pub fn academic_units() -> &'static Dataset<AcademicUnit> {
    &ACADEMIC_UNITS
}

/// Faculty shown in the directory.
pub fn faculty_members() -> &'static Dataset<FacultyMember> {
    &FACULTY_MEMBERS
}
