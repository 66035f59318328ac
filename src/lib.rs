//! School timetable generation.
//!
//! Builds weekly class timetables over a six-day, ten-period grid:
//! each required (subject, teacher) session is scored against every
//! free (day, slot) cell and greedily committed to the best one,
//! subject to a hard no-double-booking rule for teachers and soft
//! preferences for time of day, spacing, and weekly balance.
//!
//! The crate owns the scheduling computation only. Directory data
//! (classes, subjects, teachers) and schedule persistence live behind
//! the collaborator traits in [`generator`]; hosts plug in their own
//! store.
//!
//! # Modules
//!
//! - **`models`**: domain types — the week grid, the scheduling
//!   policy, directory records, sessions, schedules, occupancy
//! - **`scheduler`**: conflict checking, slot scoring, the greedy
//!   placement engine, statistics and analysis
//! - **`validation`**: input integrity checks (duplicate ids, unknown
//!   policy subjects, workload caps)
//! - **`generator`**: orchestration — per-class and all-classes
//!   generation, the optimize-existing path, collaborator seams
//!
//! # Example
//!
//! ```
//! use timetabler::models::{SchedulingConstraints, SessionRequirement, TeacherRef, WeekOccupancy};
//! use timetabler::scheduler::{GreedyScheduler, ScheduleStats};
//!
//! let teacher = TeacherRef::new("t1", "Ada");
//! let requirements: Vec<_> = (1..=3)
//!     .map(|i| SessionRequirement::new("Mathematics", teacher.clone(), i))
//!     .collect();
//!
//! let mut occupancy = WeekOccupancy::new();
//! let schedule = GreedyScheduler::new().schedule(
//!     &requirements,
//!     "7a",
//!     &mut occupancy,
//!     &SchedulingConstraints::default(),
//! );
//!
//! let stats = ScheduleStats::calculate(&schedule, &requirements);
//! assert_eq!(stats.scheduled_sessions, 3);
//! ```

pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;
