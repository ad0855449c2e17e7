//! In-memory record store.
//!
//! The [`Store`] owns an ordered list of [`Student`]s. Insertion order is
//! preserved; the only re-sort happens in a replace-mode CSV import. Between
//! public operations no two students share an id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Student, StudentPatch};

/// The roster of students, in insertion order.
///
/// Serializes as `{"students": [...]}`, the shape of the JSON data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    students: Vec<Student>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing records, keeping their order.
    #[must_use]
    pub fn from_students(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// Create a student and append it.
    ///
    /// The id is `count + 1`, not `max + 1`. After a deletion this can hand
    /// out an id that is still in use; see DESIGN.md.
    pub fn create(&mut self, name: impl Into<String>, age: u32, full_time: bool) -> Student {
        let id = self.students.len() as u64 + 1;
        let student = Student::new(id, name, age, full_time);
        self.students.push(student.clone());
        student
    }

    /// Find a student by id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Apply a partial update in place and return the updated record.
    pub fn update(&mut self, id: u64, patch: StudentPatch) -> Option<&Student> {
        let student = self.students.iter_mut().find(|s| s.id == id)?;
        patch.apply(student);
        Some(student)
    }

    /// Remove every student with this id. Returns how many were removed.
    pub fn delete(&mut self, id: u64) -> usize {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        before - self.students.len()
    }

    /// Append an already-identified record.
    ///
    /// Callers are responsible for choosing an id not already present
    /// (the CSV allocators do this).
    pub(crate) fn push(&mut self, student: Student) {
        debug_assert!(self.find(student.id).is_none(), "duplicate id {}", student.id);
        self.students.push(student);
    }

    /// Replace every record with `students`, sorted by ascending id.
    pub(crate) fn replace_sorted(&mut self, mut students: Vec<Student>) {
        students.sort_by_key(|s| s.id);
        self.students = students;
    }

    /// All students in store order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Iterate students in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// The set of ids currently in use.
    #[must_use]
    pub fn ids(&self) -> HashSet<u64> {
        self.students.iter().map(|s| s.id).collect()
    }

    /// Largest id in use, or 0 for an empty store.
    #[must_use]
    pub fn max_id(&self) -> u64 {
        self.students.iter().map(|s| s.id).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}
