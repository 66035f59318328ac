//! Timetabling domain models.
//!
//! Core data types for representing a school week and the material to
//! be scheduled into it: the static time grid, the tunable policy,
//! directory records, session units, and the schedule containers.

pub mod grid;

mod constraints;
mod schedule;
mod school;
mod session;

pub use constraints::{ConstraintOverrides, SchedulingConstraints, TeacherWorkload};
pub use grid::{slot_by_id, Day, DayPeriod, TimeSlot, DAY_SLOTS, SLOTS_PER_DAY};
pub use schedule::{ClassSchedule, WeekOccupancy};
pub use school::{SchoolClass, Subject, Teacher, TeacherRef};
pub use session::{PlacedSession, SessionRequirement};
