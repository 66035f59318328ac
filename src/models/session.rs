//! Session records: a unit of work before placement, a committed
//! assignment after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grid::TimeSlot;
use super::school::TeacherRef;

/// One subject session that still needs a (day, slot) cell.
///
/// Derived once per class per run: one requirement per
/// (subject, repetition-index), repetition count taken from the
/// subject's weekly frequency target. Consumed destructively: each
/// requirement is placed at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequirement {
    /// Subject to teach.
    pub subject: String,
    /// Teacher assigned to this requirement.
    pub teacher: TeacherRef,
    /// Stable identifier, e.g. `Mathematics-2`.
    pub requirement_id: String,
}

impl SessionRequirement {
    /// Creates a requirement for the nth weekly repetition of a subject.
    pub fn new(subject: impl Into<String>, teacher: TeacherRef, repetition: u32) -> Self {
        let subject = subject.into();
        let requirement_id = format!("{subject}-{repetition}");
        Self {
            subject,
            teacher,
            requirement_id,
        }
    }
}

/// A committed session occupying one (day, slot) cell of a class week.
///
/// Stored rows may be placeholders: an empty subject marks a cell
/// that is held in the grid but teaches nothing and never conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSession {
    /// Subject taught; empty for placeholder rows.
    pub subject: String,
    /// Teacher taking the session.
    pub teacher: TeacherRef,
    /// Slot id within the day, `1..=10`.
    pub time_slot_id: u8,
    /// Start of the period, `HH:MM`.
    pub start_time: String,
    /// End of the period, `HH:MM`.
    pub end_time: String,
    /// Room assignment; empty until a room is allocated.
    pub room: String,
    /// Free-form note.
    pub note: String,
    /// When this row was created.
    pub created_at: DateTime<Utc>,
    /// When this row was last changed.
    pub last_modified: DateTime<Utc>,
}

impl PlacedSession {
    /// Creates a session in the given slot, stamped with the run time.
    pub fn new(
        subject: impl Into<String>,
        teacher: TeacherRef,
        slot: &TimeSlot,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            teacher,
            time_slot_id: slot.id,
            start_time: slot.start.to_string(),
            end_time: slot.end.to_string(),
            room: String::new(),
            note: String::new(),
            created_at: at,
            last_modified: at,
        }
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether this row teaches anything. Placeholder rows (empty
    /// subject) hold a cell but never conflict and never count.
    #[inline]
    pub fn is_lesson(&self) -> bool {
        !self.subject.is_empty()
    }
}
