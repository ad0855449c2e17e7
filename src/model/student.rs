//! Student model for Roster.
//!
//! A student is the single record type of the roster. Field order here is
//! the on-disk key order of the JSON document and the CSV column order.

use serde::{Deserialize, Serialize};

/// A student entry in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Positive identifier, unique within a store.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Age in years.
    pub age: u32,

    /// Whether the student is enrolled full-time.
    #[serde(rename = "full-time")]
    pub full_time: bool,
}

impl Student {
    /// Create a student from its parts.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, age: u32, full_time: bool) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            full_time,
        }
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ID: {} | Name: {} | Age: {} | Full-time: {}",
            self.id,
            self.name,
            self.age,
            if self.full_time { "Yes" } else { "No" }
        )
    }
}

/// Partial update for a student. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub full_time: Option<bool>,
}

impl StudentPatch {
    /// Returns true if the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.full_time.is_none()
    }

    /// Apply the provided fields to `student`.
    pub fn apply(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(full_time) = self.full_time {
            student.full_time = full_time;
        }
    }
}
