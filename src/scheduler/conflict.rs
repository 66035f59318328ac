//! Teacher double-booking detection.
//!
//! A teacher can stand in one classroom at a time: before a session is
//! placed, every other class's committed sessions for the same
//! (day, slot) cell are checked for the same teacher. Placeholder rows
//! (empty subject) hold a cell without teaching and never conflict.

use crate::models::{Day, TeacherRef, WeekOccupancy};

/// Whether placing `teacher` at (`day`, `slot_id`) would collide with
/// a session already committed for another class.
///
/// Scans every class in `occupancy` except `exclude_class` (the class
/// being scheduled — its own cells are managed by the placement loop).
/// Pure predicate: O(classes × sessions that day), no side effects.
pub fn has_teacher_conflict(
    occupancy: &WeekOccupancy,
    teacher: &TeacherRef,
    day: Day,
    slot_id: u8,
    exclude_class: &str,
) -> bool {
    occupancy.iter().any(|(class_id, schedule)| {
        class_id != exclude_class
            && schedule.sessions(day).iter().any(|s| {
                s.time_slot_id == slot_id && s.is_lesson() && s.teacher.same_teacher(teacher)
            })
    })
}
