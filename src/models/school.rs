//! Directory records: classes, subjects, teachers.
//!
//! These are the records the external directory hands the generator.
//! [`TeacherRef`] is the one place teacher identity is compared —
//! legacy rows may carry a name without an id, so a reference
//! normalizes the id-or-name dual channel into a single comparison.

use serde::{Deserialize, Serialize};

/// A class (homeroom group) to be timetabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Unique class identifier.
    pub id: String,
    /// Display name, e.g. "7B".
    pub name: String,
    /// Name of the homeroom teacher. Homeroom teachers may take any
    /// subject for their own class.
    pub homeroom_teacher: String,
}

impl SchoolClass {
    /// Creates a class record.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            homeroom_teacher: String::new(),
        }
    }

    /// Sets the homeroom teacher's name.
    pub fn with_homeroom(mut self, teacher_name: impl Into<String>) -> Self {
        self.homeroom_teacher = teacher_name.into();
        self
    }
}

/// A taught subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name; the key used throughout the policy.
    pub name: String,
    /// Inactive subjects are skipped when deriving requirements.
    pub is_active: bool,
}

impl Subject {
    /// Creates an active subject.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
        }
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A teacher record from the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subjects this teacher takes.
    pub subjects: Vec<String>,
    /// Primary specialization; counts as a taught subject.
    pub specialization: String,
}

impl Teacher {
    /// Creates a teacher record.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subjects: Vec::new(),
            specialization: String::new(),
        }
    }

    /// Adds a taught subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Sets the specialization.
    pub fn with_specialization(mut self, subject: impl Into<String>) -> Self {
        self.specialization = subject.into();
        self
    }

    /// Whether this teacher takes the given subject, by subject list
    /// or specialization.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject) || self.specialization == subject
    }
}

/// A normalized reference to a teacher.
///
/// Upstream data may populate the id, the name, or both. Comparison
/// order: when both references carry a non-empty id, the id is
/// decisive (two teachers sharing a name stay distinct); otherwise
/// fall back to name equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: String,
    pub name: String,
}

impl TeacherRef {
    /// Creates a reference from raw id/name channels.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether two references resolve to the same teacher.
    pub fn same_teacher(&self, other: &TeacherRef) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            return self.id == other.id;
        }
        !self.name.is_empty() && self.name == other.name
    }
}

impl From<&Teacher> for TeacherRef {
    fn from(teacher: &Teacher) -> Self {
        Self::new(&teacher.id, &teacher.name)
    }
}
